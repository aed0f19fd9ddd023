use serde::{Deserialize, Serialize};

/// Boundary interaction tuning.
///
/// These were literal constants in earlier revisions; they are configuration
/// now so presets can trade grab ease against precision.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LayoutOptions {
    /// How close (in normalized units) the pointer must be to a boundary to
    /// grab it.
    pub hit_threshold: f32,
    /// Lowest normalized position a boundary can be dragged to.
    pub clamp_min: f32,
    /// Highest normalized position a boundary can be dragged to.
    pub clamp_max: f32,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            hit_threshold: 0.015,
            clamp_min: 0.1,
            clamp_max: 0.9,
        }
    }
}
