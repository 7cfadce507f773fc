//! Centralized runtime options with TOML preset support.
//!
//! All tweakable settings (camera, animation timing, showcase materials,
//! keybindings) are consolidated here. Options serialize to/from TOML for
//! presets; every sub-struct uses `#[serde(default)]` so partial files
//! (e.g. only overriding `[animation]`) work correctly.

pub mod animation;
pub mod camera;
pub mod showcase;

pub use animation::AnimationOptions;
pub use camera::CameraOptions;
pub use showcase::ShowcaseOptions;

use std::path::Path;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::LustreError;
use crate::input::KeyBindings;

/// Top-level options container.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema)]
#[serde(default)]
pub struct Options {
    /// Camera projection and navigation.
    pub camera: CameraOptions,
    /// Animation timing and motion constants.
    pub animation: AnimationOptions,
    /// Starting pose and material defaults.
    pub showcase: ShowcaseOptions,
    /// Keyboard bindings.
    #[schemars(skip)]
    pub keybindings: KeyBindings,
}

impl Options {
    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, LustreError> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| {
            LustreError::OptionsParse(format!("{}: {e}", path.display()))
        })
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), LustreError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| LustreError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
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
    fn test_toml_round_trip() {
        let options = Options::default();
        let text = toml::to_string_pretty(&options).unwrap();
        let back: Options = toml::from_str(&text).unwrap();
        assert_eq!(options, back);
    }

    #[test]
    fn test_partial_toml_overrides_one_section() {
        let text = "[animation]\nspin_speed = 2.5\n";
        let options: Options = toml::from_str(text).unwrap();
        assert!((options.animation.spin_speed - 2.5).abs() < 1e-6);
        // Untouched sections keep their defaults.
        assert!((options.camera.fovy - 45.0).abs() < 1e-6);
        assert!((options.animation.max_lift - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_defaults_match_showcase_motion() {
        let options = Options::default();
        assert!((options.animation.rotation_seconds - 1.5).abs() < 1e-6);
        assert!((options.animation.rise_speed - 7.5).abs() < 1e-6);
        assert!((options.animation.lift_easing_factor - 0.15).abs() < 1e-6);
        assert_eq!(options.showcase.camera_start, [-5.0, 0.5, 5.0]);
    }
}
