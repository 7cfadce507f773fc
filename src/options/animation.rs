//! Animation tuning parameters.

use std::time::Duration;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Animation", inline)]
#[serde(default)]
/// Timing and motion constants for selection animation and camera
/// choreography.
pub struct AnimationOptions {
    /// Duration of the select/deselect rotation transition, in seconds.
    #[schemars(title = "Rotation Duration", range(min = 0.1, max = 5.0), extend("step" = 0.1))]
    pub rotation_seconds: f32,
    /// Lift rise speed multiplier.
    #[schemars(title = "Rise Speed", range(min = 1.0, max = 20.0), extend("step" = 0.5))]
    pub rise_speed: f32,
    /// Per-frame easing factor of the lift's exponential approach.
    #[schemars(title = "Lift Easing", range(min = 0.01, max = 1.0), extend("step" = 0.01))]
    pub lift_easing_factor: f32,
    /// Height a selected gem rises above its base position.
    #[schemars(title = "Max Lift", range(min = 0.0, max = 1.0), extend("step" = 0.05))]
    pub max_lift: f32,
    /// Turntable spin rate of a selected gem, radians per second.
    #[schemars(title = "Spin Speed", range(min = 0.0, max = 5.0), extend("step" = 0.1))]
    pub spin_speed: f32,
    /// Duration of the camera's return to its saved pose, in seconds.
    #[schemars(title = "Camera Return", range(min = 0.1, max = 5.0), extend("step" = 0.1))]
    pub camera_return_seconds: f32,
    /// Exponential rate of the focus-mode camera chase, per second.
    /// 6.32 reproduces a fixed 0.1-per-frame factor at 60 fps.
    #[schemars(title = "Focus Smoothing", range(min = 0.5, max = 20.0), extend("step" = 0.1))]
    pub focus_smoothing: f32,
}

impl Default for AnimationOptions {
    fn default() -> Self {
        Self {
            rotation_seconds: 1.5,
            rise_speed: 7.5,
            lift_easing_factor: 0.15,
            max_lift: 0.2,
            spin_speed: 1.0,
            camera_return_seconds: 1.5,
            focus_smoothing: 6.32,
        }
    }
}

impl AnimationOptions {
    /// Rotation transition duration. Non-positive values collapse to zero
    /// (transitions complete on their first sample).
    #[must_use]
    pub fn rotation_duration(&self) -> Duration {
        Duration::from_secs_f32(self.rotation_seconds.max(0.0))
    }

    /// Camera return transition duration, clamped the same way.
    #[must_use]
    pub fn camera_return_duration(&self) -> Duration {
        Duration::from_secs_f32(self.camera_return_seconds.max(0.0))
    }
}
