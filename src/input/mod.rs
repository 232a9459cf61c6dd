//! Input handling for the painter
//!
//! Events arrive already translated from the window layer. `InputState` holds
//! what the pointer and modifiers are doing between events.

mod event;
mod state;

pub use event::{InputEvent, Key, Modifiers, PointerButton, TextField};
pub use state::{InputState, InteractionMode};
