//! Region layout core: the named normalized-rectangle store and the
//! boundary-drag interaction engine.
//!
//! All geometry here is in normalized window coordinates (fractions of the
//! current window size, origin top-left), which keeps the layout
//! resolution-independent: a window resize changes only the cached pixel
//! dimensions, never the region data.

/// Boundary hit-testing and the drag state machine.
pub mod boundary;
/// Region data model: normalized rectangles and typed content kinds.
pub mod region;
/// The ordered, name-indexed region store.
pub mod store;

use std::fmt;

pub use boundary::{Axis, BoundaryEngine, DragState};
pub use region::{ContentKind, NormRect, Region, TriangleStyle};
pub use store::RegionStore;

/// Errors produced by region construction, lookup, and mutation.
///
/// All of these fail fast at the call site and never leave the store
/// partially mutated.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutError {
    /// A rectangle violates the normalized-geometry invariants
    /// (`0 <= x,y <= 1`, `width,height > 0`, `x+width <= 1`,
    /// `y+height <= 1`).
    InvalidGeometry {
        /// Offending left edge.
        x: f32,
        /// Offending top edge.
        y: f32,
        /// Offending width.
        width: f32,
        /// Offending height.
        height: f32,
    },
    /// A region with this name is already registered.
    DuplicateName(String),
    /// No region with this name exists.
    NameNotFound(String),
    /// A region index is past the end of the store.
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// The number of registered regions.
        len: usize,
    },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidGeometry {
                x,
                y,
                width,
                height,
            } => write!(
                f,
                "invalid region geometry ({x}, {y}, {width}, {height}): all \
                 values must be normalized to [0, 1] with positive size"
            ),
            Self::DuplicateName(name) => {
                write!(f, "region '{name}' already exists")
            }
            Self::NameNotFound(name) => {
                write!(f, "no region named '{name}'")
            }
            Self::IndexOutOfRange { index, len } => {
                write!(f, "region index {index} out of range (len {len})")
            }
        }
    }
}

impl std::error::Error for LayoutError {}
