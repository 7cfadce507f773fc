//! Camera choreography around the current selection.
//!
//! Two mutually exclusive behaviors, keyed off the selection each frame:
//!
//! - **Focus**: while a gem is selected the camera chases a viewing
//!   position beside the gem and re-orients onto it every frame.
//! - **Return**: when the selection clears, the camera replays a transition
//!   back to the pose captured at the instant the selection began.
//!
//! The pose capture happens on the controller's cue, before the focus
//! drive has moved the camera that frame; there is exactly one saved pose,
//! shared by all gems, last writer wins.

use std::time::Instant;

use glam::Vec3;

use super::core::Camera;
use crate::animation::{Easing, TransitionSlot};
use crate::options::AnimationOptions;

/// A camera pose captured when a selection begins and restored when it
/// ends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SavedCameraPose {
    /// Eye position.
    pub position: Vec3,
    /// Euler orientation (pitch, yaw, roll).
    pub rotation: Vec3,
}

/// Which behavior drove the camera this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraDrive {
    /// A gem is selected; the camera is tracking it.
    Focus,
    /// The camera is replaying the return to the saved pose.
    Returning,
    /// The choreographer left the camera alone (free-navigation frame).
    Idle,
}

/// Drives the shared camera from the selection state.
#[derive(Debug)]
pub struct CameraChoreographer {
    saved: Option<SavedCameraPose>,
    /// Return-transition progress, 0 → 1. The eased progress is applied as
    /// the per-frame lerp factor toward the saved position, so the return
    /// converges geometrically and still snaps exactly at completion.
    return_slot: TransitionSlot<f32>,
}

impl CameraChoreographer {
    /// Create a choreographer whose saved pose starts at the given camera's
    /// current pose.
    #[must_use]
    pub fn new(camera: &Camera) -> Self {
        Self {
            saved: Some(SavedCameraPose {
                position: camera.position,
                rotation: camera.rotation,
            }),
            return_slot: TransitionSlot::idle(),
        }
    }

    /// The pose the camera will return to on deselect, if any.
    pub fn saved_pose(&self) -> Option<&SavedCameraPose> {
        self.saved.as_ref()
    }

    /// Record the camera's current pose as the return target.
    ///
    /// Called on the gem controller's capture cue, i.e. on the first frame
    /// of a selection, before the focus drive moves the camera.
    pub fn capture_pose(&mut self, camera: &Camera) {
        let pose = SavedCameraPose {
            position: camera.position,
            rotation: camera.rotation,
        };
        log::debug!("camera pose captured at {:?}", pose.position);
        self.saved = Some(pose);
        // A capture interrupts any return still in flight.
        self.return_slot.cancel();
    }

    /// Begin the return transition toward the saved pose.
    ///
    /// Called on the deselect edge. Does nothing when no pose is saved.
    pub fn begin_return(&mut self, tuning: &AnimationOptions) {
        if self.saved.is_none() {
            return;
        }
        self.return_slot.begin(
            0.0,
            1.0,
            tuning.camera_return_duration(),
            Easing::CubicOut,
        );
    }

    /// Whether the return transition is still in flight.
    pub fn is_returning(&self) -> bool {
        self.return_slot.is_active()
    }

    /// Forget the saved pose and cancel any in-flight return.
    ///
    /// Used when the visualization context the pose belongs to is torn
    /// down.
    pub fn invalidate(&mut self) {
        self.saved = None;
        self.return_slot.cancel();
    }

    /// Drive the camera for one frame.
    ///
    /// `focus` is the selected gem's base position, when there is one; the
    /// lift is accounted for by the fixed viewing offset. Runs after all
    /// gem controllers have updated each frame.
    pub fn update(
        &mut self,
        now: Instant,
        dt: f32,
        focus: Option<Vec3>,
        camera: &mut Camera,
        tuning: &AnimationOptions,
    ) -> CameraDrive {
        if let Some(gem_position) = focus {
            // Focus mode: chase a fixed offset beside the raised gem and
            // re-orient onto it from scratch every frame.
            let target_position =
                gem_position + Vec3::new(-4.5, tuning.max_lift, 5.0);
            let target_look_at = gem_position + Vec3::new(0.0, tuning.max_lift, 0.0);

            let factor = 1.0 - (-tuning.focus_smoothing * dt).exp();
            camera.position = camera.position.lerp(target_position, factor);
            camera.look_at(target_look_at);
            return CameraDrive::Focus;
        }

        if self.return_slot.is_active() {
            if let (Some(pose), Some(t)) =
                (self.saved, self.return_slot.sample(now))
            {
                if t >= 1.0 {
                    // Final frame: land on the pose exactly rather than
                    // trusting a unit-factor lerp.
                    camera.position = pose.position;
                } else {
                    camera.position = camera.position.lerp(pose.position, t);
                }
                camera.rotation = pose.rotation;
                return CameraDrive::Returning;
            }
        }

        CameraDrive::Idle
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn camera() -> Camera {
        Camera::new(Vec3::new(-5.0, 0.5, 5.0), 45.0, 16.0 / 9.0, 0.1, 100.0)
    }

    #[test]
    fn test_focus_converges_on_offset_beside_gem() {
        let mut cam = camera();
        let mut chor = CameraChoreographer::new(&cam);
        let tuning = AnimationOptions::default();
        let gem = Vec3::new(0.0, 0.325, 0.0);

        let mut now = Instant::now();
        for _ in 0..600 {
            now += Duration::from_secs_f32(DT);
            let drive = chor.update(now, DT, Some(gem), &mut cam, &tuning);
            assert_eq!(drive, CameraDrive::Focus);
        }

        let expected = gem + Vec3::new(-4.5, tuning.max_lift, 5.0);
        assert!((cam.position - expected).length() < 1e-2);

        // Camera is oriented onto the raised gem.
        let look = gem + Vec3::new(0.0, tuning.max_lift, 0.0);
        let dir = (look - cam.position).normalize();
        assert!((cam.forward() - dir).length() < 1e-4);
    }

    #[test]
    fn test_return_restores_captured_pose_exactly() {
        let mut cam = camera();
        let mut chor = CameraChoreographer::new(&cam);
        let tuning = AnimationOptions::default();
        let gem = Vec3::new(0.0, 0.325, 0.0);

        // Capture at selection start, then let focus mode drag the camera
        // somewhere else entirely.
        chor.capture_pose(&cam);
        let captured = *chor.saved_pose().unwrap();

        let mut now = Instant::now();
        for _ in 0..240 {
            now += Duration::from_secs_f32(DT);
            let _ = chor.update(now, DT, Some(gem), &mut cam, &tuning);
        }
        assert!((cam.position - captured.position).length() > 1.0);

        // Deselect: the return must land on the captured pose, not on any
        // pose visited during focus.
        chor.begin_return(&tuning);
        while chor.is_returning() {
            now += Duration::from_secs_f32(DT);
            let _ = chor.update(now, DT, None, &mut cam, &tuning);
        }
        assert_eq!(cam.position, captured.position);
        assert_eq!(cam.rotation, captured.rotation);

        // Once the return finishes the choreographer goes idle.
        now += Duration::from_secs_f32(DT);
        assert_eq!(
            chor.update(now, DT, None, &mut cam, &tuning),
            CameraDrive::Idle
        );
    }

    #[test]
    fn test_recapture_wins_over_previous_pose() {
        let mut cam = camera();
        let mut chor = CameraChoreographer::new(&cam);

        chor.capture_pose(&cam);
        cam.position = Vec3::new(9.0, 9.0, 9.0);
        chor.capture_pose(&cam);

        assert_eq!(
            chor.saved_pose().unwrap().position,
            Vec3::new(9.0, 9.0, 9.0)
        );
    }

    #[test]
    fn test_begin_return_without_pose_is_a_no_op() {
        let mut cam = camera();
        let mut chor = CameraChoreographer::new(&cam);
        let tuning = AnimationOptions::default();

        chor.invalidate();
        chor.begin_return(&tuning);
        assert!(!chor.is_returning());
        assert_eq!(
            chor.update(Instant::now(), DT, None, &mut cam, &tuning),
            CameraDrive::Idle
        );
    }

    #[test]
    fn test_invalidate_cancels_in_flight_return() {
        let mut cam = camera();
        let mut chor = CameraChoreographer::new(&cam);
        let tuning = AnimationOptions::default();

        chor.begin_return(&tuning);
        assert!(chor.is_returning());

        chor.invalidate();
        assert!(!chor.is_returning());
        assert!(chor.saved_pose().is_none());
    }
}
