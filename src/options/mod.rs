//! Centralized runtime options with TOML preset support.
//!
//! All tweakable settings (boundary hit threshold and clamp margins,
//! separator-bar appearance, background color, initial window size) are
//! consolidated here. Options serialize to/from TOML for presets.

mod appearance;
mod layout;
mod lines;
mod window;

use std::path::Path;

pub use appearance::AppearanceOptions;
pub use layout::LayoutOptions;
pub use lines::BoundaryLineOptions;
use serde::{Deserialize, Serialize};
pub use window::WindowOptions;

use crate::error::MullionError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[layout]`) work correctly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Options {
    /// Boundary hit-testing and drag-clamp tuning.
    pub layout: LayoutOptions,
    /// Separator-bar appearance.
    pub boundary_lines: BoundaryLineOptions,
    /// Background clear color.
    pub appearance: AppearanceOptions,
    /// Initial window size.
    pub window: WindowOptions,
}

impl Options {
    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`MullionError::Io`] if the file cannot be read or
    /// [`MullionError::OptionsParse`] on malformed TOML.
    pub fn load(path: &Path) -> Result<Self, MullionError> {
        let content = std::fs::read_to_string(path).map_err(MullionError::Io)?;
        toml::from_str(&content)
            .map_err(|e| MullionError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// Returns [`MullionError::OptionsParse`] on serialization failure or
    /// [`MullionError::Io`] if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), MullionError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| MullionError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(MullionError::Io)?;
        }
        std::fs::write(path, content).map_err(MullionError::Io)
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r"
[layout]
hit_threshold = 0.02
";
        let opts: Options = toml::from_str(toml_str).unwrap();
        assert_eq!(opts.layout.hit_threshold, 0.02);
        // Everything else should be default
        assert_eq!(opts.layout.clamp_min, 0.1);
        assert_eq!(opts.layout.clamp_max, 0.9);
        assert!(opts.boundary_lines.show);
        assert_eq!(opts.window.width, 1200);
    }

    #[test]
    fn boundary_line_defaults_match_shipped_appearance() {
        let lines = BoundaryLineOptions::default();
        assert_eq!(lines.width, 2.0);
        assert_eq!(lines.color, [0.4, 0.4, 0.4]);
    }
}
