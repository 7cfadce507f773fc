//! Animation system: easing curves and slot-owned eased transitions.

pub mod easing;
pub mod transition;

pub use easing::Easing;
pub use transition::{Animate, Transition, TransitionSlot};
