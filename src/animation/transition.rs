//! Time-bounded eased transitions with explicit slot ownership.
//!
//! A [`Transition`] animates one value from a start to a target over a fixed
//! duration. Each animated quantity owns at most one live transition through
//! a [`TransitionSlot`]; beginning a new transition overwrites the slot, so a
//! superseded transition can never keep writing to the quantity it used to
//! own. Slots are advanced cooperatively, once per rendered frame, by
//! whatever drives the frame loop — there are no self-scheduling callbacks,
//! and teardown is [`TransitionSlot::cancel`].

use std::time::{Duration, Instant};

use glam::Vec3;

use super::easing::Easing;

/// Linear-interpolation seam for quantities a [`Transition`] can drive.
pub trait Animate: Copy {
    /// Interpolate from `start` to `end` at progress `t`.
    fn lerp(start: Self, end: Self, t: f32) -> Self;
}

impl Animate for f32 {
    #[inline]
    fn lerp(start: Self, end: Self, t: f32) -> Self {
        start + (end - start) * t
    }
}

impl Animate for Vec3 {
    #[inline]
    fn lerp(start: Self, end: Self, t: f32) -> Self {
        start + (end - start) * t
    }
}

/// One sampled frame of a transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample<V> {
    /// The interpolated value for this frame.
    pub value: V,
    /// Whether this sample is the final one (value equals the target
    /// exactly). The owning slot drops the transition after the finishing
    /// sample has been observed.
    pub finished: bool,
}

/// A single eased interpolation from a start value to a target value.
///
/// The start timestamp is latched on the first [`sample`](Self::sample) call
/// rather than at construction, so a transition created during event
/// handling measures its duration from the first rendered frame.
#[derive(Debug, Clone)]
pub struct Transition<V> {
    start: V,
    target: V,
    duration: Duration,
    easing: Easing,
    started: Option<Instant>,
}

impl<V: Animate> Transition<V> {
    /// Create a transition. A zero duration completes on the first sample.
    pub fn new(start: V, target: V, duration: Duration, easing: Easing) -> Self {
        Self {
            start,
            target,
            duration,
            easing,
            started: None,
        }
    }

    /// The value this transition is heading toward.
    pub fn target(&self) -> V {
        self.target
    }

    /// Normalized progress (0.0 to 1.0) at `now`. Zero before the first
    /// sample latches the start timestamp; 1.0 for zero-duration
    /// transitions.
    pub fn progress(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let Some(started) = self.started else {
            return 0.0;
        };
        let elapsed = now.saturating_duration_since(started);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    /// Sample the transition at `now`, latching the start timestamp on the
    /// first call.
    ///
    /// On completion the returned value is the target *exactly* — a
    /// floating-point lerp is never trusted to land on it.
    pub fn sample(&mut self, now: Instant) -> Sample<V> {
        if self.started.is_none() {
            self.started = Some(now);
        }
        let t = self.progress(now);
        if t >= 1.0 {
            return Sample {
                value: self.target,
                finished: true,
            };
        }
        Sample {
            value: V::lerp(self.start, self.target, self.easing.evaluate(t)),
            finished: false,
        }
    }
}

/// Exclusive owner of the (at most one) live transition for one animated
/// quantity.
///
/// `begin` supersedes: the previous transition, finished or not, is simply
/// never read again. `cancel` empties the slot so a torn-down owner stops
/// producing values immediately.
#[derive(Debug, Clone, Default)]
pub struct TransitionSlot<V> {
    active: Option<Transition<V>>,
}

impl<V: Animate> TransitionSlot<V> {
    /// An empty slot.
    pub fn idle() -> Self {
        Self { active: None }
    }

    /// Start a new transition, superseding any in-flight one.
    pub fn begin(&mut self, start: V, target: V, duration: Duration, easing: Easing) {
        self.active = Some(Transition::new(start, target, duration, easing));
    }

    /// Drop the in-flight transition, if any, without a final sample.
    pub fn cancel(&mut self) {
        self.active = None;
    }

    /// Whether a transition is currently in flight.
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// The in-flight transition's target, if any.
    pub fn target(&self) -> Option<V> {
        self.active.as_ref().map(Transition::target)
    }

    /// Advance the slot by one frame.
    ///
    /// Returns the interpolated value while a transition is live, including
    /// one final exact-target sample, after which the slot empties and
    /// subsequent calls return `None`.
    pub fn sample(&mut self, now: Instant) -> Option<V> {
        let transition = self.active.as_mut()?;
        let sample = transition.sample(now);
        if sample.finished {
            self.active = None;
        }
        Some(sample.value)
    }
}
