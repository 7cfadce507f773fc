//! Converts raw platform events into engine commands.
//!
//! The `InputProcessor` owns all transient input state (cursor tracking,
//! click-versus-drag discrimination) and the key-binding map. It is the
//! only thing between raw window events and
//! [`execute`](crate::ShowcaseEngine::execute).

use std::collections::HashMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::event::{InputEvent, MouseButton};
use crate::engine::command::ShowcaseCommand;

/// Movement budget (physical pixels) within which a press-release pair
/// still counts as a click rather than an orbit drag.
const CLICK_SLOP: f32 = 5.0;

/// Serializable tag for the subset of [`ShowcaseCommand`] that can be
/// key-bound (discrete, parameterless actions).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyCommandTag {
    /// Flip between the loose stones and the ring assembly.
    ChangeVisualization,
    /// Toggle turntable auto-rotation.
    ToggleAutoRotate,
    /// Clear the selection.
    Cancel,
}

impl KeyCommandTag {
    /// Convert to the corresponding parameterless [`ShowcaseCommand`].
    fn to_command(self) -> ShowcaseCommand {
        match self {
            Self::ChangeVisualization => ShowcaseCommand::ToggleVisualization,
            Self::ToggleAutoRotate => ShowcaseCommand::ToggleAutoRotate,
            Self::Cancel => ShowcaseCommand::ClearSelection,
        }
    }

    /// Human-readable label for the bound control.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::ChangeVisualization => "Change Visualization",
            Self::ToggleAutoRotate => "Toggle Auto-Rotate",
            Self::Cancel => "Cancel",
        }
    }
}

/// Maps physical key strings to [`ShowcaseCommand`] variants.
///
/// Key strings use the `winit::keyboard::KeyCode` debug format: `"KeyV"`,
/// `"Escape"`, etc.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct KeyBindings {
    /// Forward map: key string → command tag.
    bindings: HashMap<String, KeyCommandTag>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        let bindings = HashMap::from([
            ("KeyV".into(), KeyCommandTag::ChangeVisualization),
            ("KeyR".into(), KeyCommandTag::ToggleAutoRotate),
            ("Escape".into(), KeyCommandTag::Cancel),
        ]);
        Self { bindings }
    }
}

impl KeyBindings {
    /// Look up the command for a physical key string.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<ShowcaseCommand> {
        self.bindings.get(key).map(|tag| tag.to_command())
    }

    /// Look up the binding tag (for UI labeling) for a key string.
    #[must_use]
    pub fn tag(&self, key: &str) -> Option<KeyCommandTag> {
        self.bindings.get(key).copied()
    }
}

/// Converts raw window events into [`ShowcaseCommand`]s.
#[derive(Debug)]
pub struct InputProcessor {
    cursor: Vec2,
    dragged: f32,
    primary_pressed: bool,
    key_bindings: KeyBindings,
}

impl Default for InputProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl InputProcessor {
    /// Create a processor with default key bindings.
    #[must_use]
    pub fn new() -> Self {
        Self::with_key_bindings(KeyBindings::default())
    }

    /// Create a processor with custom key bindings.
    #[must_use]
    pub fn with_key_bindings(key_bindings: KeyBindings) -> Self {
        Self {
            cursor: Vec2::ZERO,
            dragged: 0.0,
            primary_pressed: false,
            key_bindings,
        }
    }

    /// Current cursor position in physical pixels.
    #[must_use]
    pub fn cursor(&self) -> Vec2 {
        self.cursor
    }

    /// Process one event, producing at most one command.
    ///
    /// A primary press-move-release sequence that stays within the click
    /// slop produces a `Click` on release; once the cursor travels further
    /// the gesture is an orbit drag and each move produces `RotateCamera`.
    pub fn handle_event(&mut self, event: InputEvent) -> Option<ShowcaseCommand> {
        match event {
            InputEvent::CursorMoved { x, y } => {
                let position = Vec2::new(x, y);
                let delta = position - self.cursor;
                self.cursor = position;
                if self.primary_pressed {
                    self.dragged += delta.length();
                    return Some(ShowcaseCommand::RotateCamera { delta });
                }
                None
            }
            InputEvent::MouseButton {
                button: MouseButton::Left,
                pressed,
            } => {
                if pressed {
                    self.primary_pressed = true;
                    self.dragged = 0.0;
                    None
                } else {
                    let was_pressed = self.primary_pressed;
                    self.primary_pressed = false;
                    (was_pressed && self.dragged <= CLICK_SLOP).then(|| {
                        ShowcaseCommand::Click {
                            x: self.cursor.x,
                            y: self.cursor.y,
                        }
                    })
                }
            }
            InputEvent::MouseButton { .. } => None,
            InputEvent::Scroll { delta } => {
                Some(ShowcaseCommand::Zoom { delta })
            }
        }
    }

    /// Look up the command bound to a pressed key.
    #[must_use]
    pub fn handle_key_press(&self, key: &str) -> Option<ShowcaseCommand> {
        self.key_bindings.lookup(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press() -> InputEvent {
        InputEvent::MouseButton {
            button: MouseButton::Left,
            pressed: true,
        }
    }

    fn release() -> InputEvent {
        InputEvent::MouseButton {
            button: MouseButton::Left,
            pressed: false,
        }
    }

    #[test]
    fn test_still_press_release_is_a_click() {
        let mut input = InputProcessor::new();
        let _ = input.handle_event(InputEvent::CursorMoved { x: 40.0, y: 60.0 });
        assert_eq!(input.handle_event(press()), None);
        assert_eq!(
            input.handle_event(release()),
            Some(ShowcaseCommand::Click { x: 40.0, y: 60.0 })
        );
    }

    #[test]
    fn test_drag_suppresses_click_and_rotates() {
        let mut input = InputProcessor::new();
        let _ = input.handle_event(press());

        let cmd = input.handle_event(InputEvent::CursorMoved { x: 30.0, y: 0.0 });
        assert_eq!(
            cmd,
            Some(ShowcaseCommand::RotateCamera {
                delta: Vec2::new(30.0, 0.0)
            })
        );

        // The gesture traveled past the slop: release is not a click.
        assert_eq!(input.handle_event(release()), None);
    }

    #[test]
    fn test_move_without_press_is_inert() {
        let mut input = InputProcessor::new();
        assert_eq!(
            input.handle_event(InputEvent::CursorMoved { x: 10.0, y: 10.0 }),
            None
        );
    }

    #[test]
    fn test_scroll_zooms() {
        let mut input = InputProcessor::new();
        assert_eq!(
            input.handle_event(InputEvent::Scroll { delta: 2.0 }),
            Some(ShowcaseCommand::Zoom { delta: 2.0 })
        );
    }

    #[test]
    fn test_default_key_bindings() {
        let input = InputProcessor::new();
        assert_eq!(
            input.handle_key_press("KeyV"),
            Some(ShowcaseCommand::ToggleVisualization)
        );
        assert_eq!(
            input.handle_key_press("Escape"),
            Some(ShowcaseCommand::ClearSelection)
        );
        assert_eq!(input.handle_key_press("KeyZ"), None);
    }

    #[test]
    fn test_visualization_toggle_label() {
        let bindings = KeyBindings::default();
        assert_eq!(
            bindings.tag("KeyV").map(KeyCommandTag::label),
            Some("Change Visualization")
        );
    }
}
