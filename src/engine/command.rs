//! The engine's complete interactive vocabulary.
//!
//! Every user-facing operation — key press, mouse gesture, panel edit, or
//! programmatic call — is represented as a `ShowcaseCommand`. Consumers
//! construct commands and pass them to
//! [`ShowcaseEngine::execute`](super::ShowcaseEngine::execute); the engine
//! never cares how a command was triggered.

use glam::Vec2;

use crate::gem::{GemId, OpticalProperties};

/// A discrete or parameterized operation the engine can perform.
#[derive(Debug, Clone, PartialEq)]
pub enum ShowcaseCommand {
    /// Click at a screen position (physical pixels); picks and
    /// toggle-selects the gem under the cursor, if any.
    Click {
        /// Horizontal position.
        x: f32,
        /// Vertical position.
        y: f32,
    },
    /// Toggle-select a gem directly (panel or scripting path).
    SelectGem(GemId),
    /// Clear the selection regardless of which gem holds it.
    ClearSelection,
    /// Flip between the loose stones and the ring assembly.
    ToggleVisualization,
    /// Commit edited optical properties for a gem. Applied only while the
    /// gem is selected.
    SetProperties {
        /// Target gem.
        id: GemId,
        /// Edited properties.
        properties: OpticalProperties,
    },
    /// Orbit-drag the free camera by a screen-space delta.
    RotateCamera {
        /// Drag delta in physical pixels.
        delta: Vec2,
    },
    /// Zoom the free camera (positive = zoom in).
    Zoom {
        /// Scroll amount.
        delta: f32,
    },
    /// Toggle idle auto-rotation of the free camera.
    ToggleAutoRotate,
    /// The viewport changed size.
    Resize {
        /// New width in physical pixels.
        width: u32,
        /// New height in physical pixels.
        height: u32,
    },
}
