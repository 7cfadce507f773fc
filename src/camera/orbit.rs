//! Free-navigation orbit rig.
//!
//! Active only while no gem is selected and no return transition is in
//! flight. The rig orbits a focus point with damped drag input, clamps the
//! polar angle to the upper hemisphere, and slowly auto-rotates when left
//! alone. When the choreographer hands the camera back, the rig
//! re-synchronizes itself from wherever the camera ended up.

use std::f32::consts::FRAC_PI_2;

use glam::{Vec2, Vec3};

use super::core::Camera;
use crate::options::CameraOptions;

/// Small elevation floor so the rig never looks exactly along the horizon
/// or flips below the ground plane.
const PITCH_EPSILON: f32 = 0.001;

/// Damped orbit rig around a fixed focus point.
#[derive(Debug)]
pub struct OrbitControls {
    focus_point: Vec3,
    yaw: f32,
    pitch: f32,
    distance: f32,
    yaw_velocity: f32,
    pitch_velocity: f32,
    auto_rotate: bool,
}

impl OrbitControls {
    /// Create a rig around `focus_point`, synchronized to the camera's
    /// current pose.
    #[must_use]
    pub fn new(camera: &Camera, focus_point: Vec3) -> Self {
        let mut rig = Self {
            focus_point,
            yaw: 0.0,
            pitch: 0.0,
            distance: 1.0,
            yaw_velocity: 0.0,
            pitch_velocity: 0.0,
            auto_rotate: true,
        };
        rig.sync_from_camera(camera);
        rig
    }

    /// Whether idle auto-rotation is enabled.
    pub fn auto_rotate(&self) -> bool {
        self.auto_rotate
    }

    /// Toggle idle auto-rotation. Returns the new state.
    pub fn toggle_auto_rotate(&mut self) -> bool {
        self.auto_rotate = !self.auto_rotate;
        self.auto_rotate
    }

    /// Re-derive yaw/pitch/distance from the camera's current position.
    ///
    /// Called whenever the rig regains control of a camera someone else has
    /// been driving.
    pub fn sync_from_camera(&mut self, camera: &Camera) {
        let offset = camera.position - self.focus_point;
        self.distance = offset.length().max(0.01);
        self.pitch = (offset.y / self.distance)
            .clamp(-1.0, 1.0)
            .asin()
            .clamp(PITCH_EPSILON, FRAC_PI_2);
        self.yaw = offset.x.atan2(offset.z);
        self.yaw_velocity = 0.0;
        self.pitch_velocity = 0.0;
    }

    /// Feed a drag gesture (screen-space pixel delta) into the rig.
    pub fn handle_rotate(&mut self, delta: Vec2, options: &CameraOptions) {
        self.yaw_velocity -= delta.x * 0.01 * options.rotate_speed;
        self.pitch_velocity += delta.y * 0.01 * options.rotate_speed;
    }

    /// Feed a scroll gesture (positive = zoom in) into the rig.
    pub fn handle_zoom(&mut self, delta: f32, options: &CameraOptions) {
        self.distance *= 1.0 - delta * options.zoom_speed;
        self.distance = self.distance.clamp(1.0, 100.0);
    }

    /// Advance the rig by one frame and write the resulting pose into the
    /// camera.
    pub fn update(&mut self, dt: f32, camera: &mut Camera, options: &CameraOptions) {
        self.yaw += self.yaw_velocity;
        self.pitch = (self.pitch + self.pitch_velocity)
            .clamp(PITCH_EPSILON, FRAC_PI_2);

        // Exponential velocity decay, scaled so the damping factor means
        // the same thing at any frame rate.
        let decay = (1.0 - options.damping).powf(dt * 60.0);
        self.yaw_velocity *= decay;
        self.pitch_velocity *= decay;

        if self.auto_rotate {
            self.yaw += options.auto_rotate_speed * dt;
        }

        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        camera.position = self.focus_point
            + Vec3::new(
                self.distance * cos_pitch * sin_yaw,
                self.distance * sin_pitch,
                self.distance * cos_pitch * cos_yaw,
            );
        camera.look_at(self.focus_point);
    }
}
