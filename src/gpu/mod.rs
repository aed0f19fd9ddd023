//! GPU resource management.
//!
//! Provides wgpu device/surface initialization, the per-region offscreen
//! render-target pool, shared pipeline boilerplate, and WGSL shader
//! composition.

/// Shared wgpu boilerplate helpers for screen-space pipelines.
pub mod pipeline_helpers;
/// wgpu device, surface, and queue initialization.
pub mod render_context;
/// WGSL shader composition with `#import` support via naga-oil.
pub mod shader_composer;
/// Per-region offscreen color+depth render targets.
pub mod target;

pub use render_context::{RenderContext, RenderContextError};
pub use shader_composer::ShaderComposer;
pub use target::{RegionTarget, TargetError, TargetPool};
