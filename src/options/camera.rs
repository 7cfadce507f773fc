//! Camera projection and navigation parameters.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Camera", inline)]
#[serde(default)]
/// Camera projection and orbit-control parameters.
pub struct CameraOptions {
    /// Vertical field of view in degrees.
    #[schemars(title = "Field of View", range(min = 20.0, max = 90.0), extend("step" = 1.0))]
    pub fovy: f32,
    /// Near clipping plane distance.
    #[schemars(skip)]
    pub znear: f32,
    /// Far clipping plane distance.
    #[schemars(skip)]
    pub zfar: f32,
    /// Orbit rotation sensitivity multiplier.
    #[schemars(title = "Rotate Speed", range(min = 0.1, max = 2.0), extend("step" = 0.05))]
    pub rotate_speed: f32,
    /// Orbit zoom sensitivity multiplier.
    #[schemars(title = "Zoom Speed", range(min = 0.01, max = 0.5), extend("step" = 0.01))]
    pub zoom_speed: f32,
    /// Orbit inertia damping factor (higher settles faster).
    #[schemars(title = "Damping", range(min = 0.0, max = 1.0), extend("step" = 0.05))]
    pub damping: f32,
    /// Idle turntable speed, radians per second.
    #[schemars(title = "Auto-Rotate Speed", range(min = 0.0, max = 2.0), extend("step" = 0.05))]
    pub auto_rotate_speed: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            fovy: 45.0,
            znear: 0.1,
            zfar: 100.0,
            rotate_speed: 0.5,
            zoom_speed: 0.1,
            damping: 0.25,
            auto_rotate_speed: 0.5,
        }
    }
}
