//! Input events as the painter core sees them
//!
//! The host translates its own window events (macroquad key codes, mouse
//! buttons) into these before handing them to the dispatcher, so the core
//! stays independent of any windowing crate.

use crate::color::Channel;

/// Pointer buttons the painter distinguishes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    Primary,
    Middle,
    Secondary,
}

impl PointerButton {
    /// Middle button eyedrops, the others paint
    pub fn is_eyedrop(self) -> bool {
        self == PointerButton::Middle
    }
}

/// Keys with painter meaning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Shift,
    Control,
    Tab,
    /// A letter key, uppercase
    Char(char),
    /// Number row 0-9
    Digit(u8),
}

/// Modifier keys held during an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers { shift: false, ctrl: false };
    pub const CTRL: Modifiers = Modifiers { shift: false, ctrl: true };
    pub const SHIFT: Modifiers = Modifiers { shift: true, ctrl: false };
}

/// Text fields that accept typed input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextField {
    Channel(Channel),
    Hex,
}

/// One input event, in window pixel coordinates
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    PointerDown { x: f32, y: f32, button: PointerButton, mods: Modifiers },
    PointerMove { x: f32, y: f32, mods: Modifiers },
    PointerUp { x: f32, y: f32, button: PointerButton },
    /// Wheel delta in pixels, positive scrolls down
    Wheel { x: f32, y: f32, dy: f32, mods: Modifiers },
    KeyDown { key: Key, mods: Modifiers },
    KeyUp { key: Key, mods: Modifiers },
    /// A text field was committed
    Text { field: TextField, text: String },
}

impl InputEvent {
    /// Pointer position carried by the event, if any
    pub fn position(&self) -> Option<(f32, f32)> {
        match *self {
            InputEvent::PointerDown { x, y, .. }
            | InputEvent::PointerMove { x, y, .. }
            | InputEvent::PointerUp { x, y, .. }
            | InputEvent::Wheel { x, y, .. } => Some((x, y)),
            InputEvent::KeyDown { .. } | InputEvent::KeyUp { .. } | InputEvent::Text { .. } => None,
        }
    }
}
