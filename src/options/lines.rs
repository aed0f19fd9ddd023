use serde::{Deserialize, Serialize};

/// Appearance of the separator bars drawn at the boundary positions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BoundaryLineOptions {
    /// Whether the bars are drawn at all.
    pub show: bool,
    /// Bar thickness in physical pixels.
    pub width: f32,
    /// Bar color (linear RGB).
    pub color: [f32; 3],
}

impl Default for BoundaryLineOptions {
    fn default() -> Self {
        Self {
            show: true,
            width: 2.0,
            color: [0.4, 0.4, 0.4],
        }
    }
}
