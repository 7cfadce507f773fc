//! Showcase composition parameters.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::gem::OpticalProperties;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Showcase", inline)]
#[serde(default)]
/// Starting camera pose and per-gem material defaults.
pub struct ShowcaseOptions {
    /// Camera starting position.
    #[schemars(skip)]
    pub camera_start: [f32; 3],
    /// Starting optical properties for the diamond.
    pub diamond: OpticalProperties,
    /// Starting optical properties for the radiant stone.
    pub radiant: OpticalProperties,
}

impl Default for ShowcaseOptions {
    fn default() -> Self {
        Self {
            camera_start: [-5.0, 0.5, 5.0],
            diamond: OpticalProperties::default(),
            radiant: OpticalProperties::default(),
        }
    }
}
