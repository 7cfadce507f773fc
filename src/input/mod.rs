//! Input handling: platform-agnostic event types and the processor that
//! converts raw window events into engine commands.

pub mod event;
pub mod processor;

pub use event::{InputEvent, MouseButton};
pub use processor::{InputProcessor, KeyBindings, KeyCommandTag};
