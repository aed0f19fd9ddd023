// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]

//! GPU-accelerated split-pane workspace shell built on wgpu.
//!
//! Mullion partitions a window into named, resizable regions. Each content
//! region renders into its own offscreen color+depth target; a compositor
//! blits the targets back onto the surface and draws the separator bars at
//! the shared region boundaries, which the pointer can grab and drag. An
//! egui overlay (viewer builds) paints panels and controls on top.
//!
//! # Key entry points
//!
//! - [`engine::WorkspaceEngine`] - the application root owning the GPU
//!   context and all subsystems
//! - [`layout::RegionStore`] / [`layout::BoundaryEngine`] - the region
//!   layout and boundary-drag core
//! - [`options::Options`] - runtime configuration (layout thresholds,
//!   boundary-line appearance, background, window size)
//! - `viewer::Viewer` - standalone winit window (feature `viewer`)
//!
//! # Architecture
//!
//! Everything runs on one thread: the platform event pump feeds
//! [`engine::WorkspaceEngine::handle_input`], which drives the boundary
//! drag state machine and mutates the region store; the per-frame loop
//! re-syncs the offscreen targets to the current region geometry, encodes
//! one pane pass per content region, then a composite pass, then the
//! overlay. The overlay has first refusal on every pointer event.

pub mod engine;
pub mod error;
pub mod gpu;
pub mod input;
pub mod layout;
pub mod options;
#[cfg(feature = "viewer")]
pub mod overlay;
pub mod renderer;
#[cfg(feature = "viewer")]
pub mod viewer;

pub use engine::{RegionSpec, WorkspaceConfig, WorkspaceEngine};
pub use error::MullionError;
pub use input::{CursorRequest, InputEvent, MouseButton};
#[cfg(feature = "viewer")]
pub use viewer::{Viewer, ViewerBuilder};
