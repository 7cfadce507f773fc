//! Per-gem animation state machine.
//!
//! One controller drives one gem through its two states, Resting and
//! Selected, reacting to the externally-owned selection flag each frame:
//!
//! - entering Selected starts an eased rotation transition to the
//!   presentation orientation, begins a continuous lift toward the raised
//!   height, and spins the gem about Y;
//! - leaving Selected starts an eased rotation transition back to the
//!   profile's resting orientation and lets the lift settle back down.
//!
//! The lift is a per-frame exponential approach, not a fixed-duration
//! transition: the pull decelerates as it nears the target and cannot
//! overshoot for monotonic frame deltas.

use std::time::Instant;

use glam::Vec3;

use super::GemProfile;
use crate::animation::{Easing, TransitionSlot};
use crate::options::AnimationOptions;

/// One-shot requests a controller can raise toward the camera layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameCue {
    /// Nothing to do this frame.
    None,
    /// The gem just entered the Selected state: capture the camera pose
    /// before the focus drive moves it this frame.
    CaptureCameraPose,
}

/// Animation controller for a single gem.
#[derive(Debug)]
pub struct GemController {
    profile: GemProfile,
    position: Vec3,
    rotation: Vec3,
    rotation_slot: TransitionSlot<Vec3>,
    /// Selection flag observed on the previous frame, for edge detection.
    was_selected: bool,
    /// Edge-trigger distinguishing "just became selected" from "already
    /// selected".
    lifting: bool,
    /// Orientation recorded at the most recent selection. Not replayed;
    /// kept for diagnostics.
    rotation_at_select: Vec3,
}

impl GemController {
    /// Create a controller resting at the profile's base pose.
    #[must_use]
    pub fn new(profile: GemProfile) -> Self {
        let position = profile.base_position;
        let rotation = profile.resting_rotation;
        Self {
            profile,
            position,
            rotation,
            rotation_slot: TransitionSlot::idle(),
            was_selected: false,
            lifting: false,
            rotation_at_select: rotation,
        }
    }

    /// The static profile this controller animates.
    pub fn profile(&self) -> &GemProfile {
        &self.profile
    }

    /// Identifier of the gem this controller drives.
    pub fn id(&self) -> super::GemId {
        self.profile.id
    }

    /// Current world-space position.
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Current Euler rotation.
    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    /// Whether the gem is currently in its raised (selected) phase.
    pub fn is_lifting(&self) -> bool {
        self.lifting
    }

    /// Target of the in-flight rotation transition, if one is running.
    pub fn rotation_target(&self) -> Option<Vec3> {
        self.rotation_slot.target()
    }

    /// Advance the gem by one frame.
    ///
    /// `selected` is the externally-owned selection flag; the controller
    /// never decides selection itself. Returns a cue on the first frame of
    /// a new selection so the caller can capture the camera pose before
    /// the camera starts chasing this gem.
    pub fn update(
        &mut self,
        now: Instant,
        dt: f32,
        selected: bool,
        tuning: &AnimationOptions,
    ) -> FrameCue {
        // Selection edges start the rotation transitions; a new edge
        // supersedes whatever was still in flight.
        if selected && !self.was_selected {
            self.rotation_at_select = self.rotation;
            log::debug!(
                "{} selected (rotation at select {:?})",
                self.profile.id,
                self.rotation_at_select
            );
            self.rotation_slot.begin(
                self.rotation,
                Vec3::ZERO,
                tuning.rotation_duration(),
                Easing::CubicInOut,
            );
        } else if !selected && self.was_selected {
            log::debug!("{} deselected", self.profile.id);
            self.rotation_slot.begin(
                self.rotation,
                self.profile.resting_rotation,
                tuning.rotation_duration(),
                Easing::CubicInOut,
            );
        }
        self.was_selected = selected;

        if let Some(rotation) = self.rotation_slot.sample(now) {
            self.rotation = rotation;
        }

        // Continuous lift: exponential approach toward the state's height
        // target. Never overshoots while the per-step fraction stays < 1.
        let target_y = if selected {
            self.profile.base_position.y + tuning.max_lift
        } else {
            self.profile.base_position.y
        };
        self.position.y +=
            (target_y - self.position.y) * tuning.lift_easing_factor * dt * tuning.rise_speed;

        let mut cue = FrameCue::None;
        if selected {
            self.rotation.y += tuning.spin_speed * dt;

            if !self.lifting {
                self.lifting = true;
                cue = FrameCue::CaptureCameraPose;
            }
        } else if self.lifting {
            self.lifting = false;
        }
        cue
    }

    /// Cancel any in-flight animation and snap back to the resting pose.
    ///
    /// Used when the gem's composition is torn down (visualization switch):
    /// a destroyed gem must not keep animating.
    pub fn reset(&mut self) {
        self.rotation_slot.cancel();
        self.position = self.profile.base_position;
        self.rotation = self.profile.resting_rotation;
        self.was_selected = false;
        self.lifting = false;
    }
}
