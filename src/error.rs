//! Crate-level error types.

use std::fmt;

use crate::gpu::render_context::RenderContextError;
use crate::layout::LayoutError;

/// Errors produced by the mullion crate.
#[derive(Debug)]
pub enum MullionError {
    /// GPU context initialization failure.
    Gpu(RenderContextError),
    /// Region layout construction or mutation failure.
    Layout(LayoutError),
    /// WGSL shader composition failure.
    ShaderCompose(String),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Viewer event-loop failure.
    Viewer(String),
}

impl fmt::Display for MullionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gpu(e) => write!(f, "GPU error: {e}"),
            Self::Layout(e) => write!(f, "layout error: {e}"),
            Self::ShaderCompose(msg) => {
                write!(f, "shader composition error: {msg}")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Viewer(msg) => write!(f, "viewer error: {msg}"),
        }
    }
}

impl std::error::Error for MullionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Gpu(e) => Some(e),
            Self::Layout(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RenderContextError> for MullionError {
    fn from(e: RenderContextError) -> Self {
        Self::Gpu(e)
    }
}

impl From<LayoutError> for MullionError {
    fn from(e: LayoutError) -> Self {
        Self::Layout(e)
    }
}

impl From<std::io::Error> for MullionError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
