use serde::{Deserialize, Serialize};

/// Initial window size in logical pixels.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowOptions {
    /// Initial window width.
    pub width: u32,
    /// Initial window height.
    pub height: u32,
}

impl Default for WindowOptions {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 900,
        }
    }
}
