use serde::{Deserialize, Serialize};

/// Clear colors shared by the panes and the surface.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppearanceOptions {
    /// Background clear color (linear RGB).
    pub background: [f32; 3],
}

impl Default for AppearanceOptions {
    fn default() -> Self {
        Self {
            background: [0.1, 0.1, 0.1],
        }
    }
}

impl AppearanceOptions {
    /// The background as a wgpu clear color.
    #[must_use]
    pub fn clear_color(&self) -> wgpu::Color {
        wgpu::Color {
            r: f64::from(self.background[0]),
            g: f64::from(self.background[1]),
            b: f64::from(self.background[2]),
            a: 1.0,
        }
    }
}
