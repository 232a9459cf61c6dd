//! Translate macroquad input into painter events

use macroquad::prelude::*;

use skinpaint::input::{InputEvent, Key, Modifiers, PointerButton};

/// Browser-style wheel delta for one notch
const WHEEL_NOTCH: f32 = 100.0;

/// Keys the painter listens for, with their painter names
const KEYS: &[(KeyCode, Key)] = &[
    (KeyCode::Tab, Key::Tab),
    (KeyCode::S, Key::Char('S')),
    (KeyCode::O, Key::Char('O')),
    (KeyCode::L, Key::Char('L')),
    (KeyCode::R, Key::Char('R')),
    (KeyCode::Key1, Key::Digit(1)),
    (KeyCode::Key2, Key::Digit(2)),
    (KeyCode::Key3, Key::Digit(3)),
    (KeyCode::Key4, Key::Digit(4)),
    (KeyCode::Key5, Key::Digit(5)),
    (KeyCode::Key6, Key::Digit(6)),
    (KeyCode::Key7, Key::Digit(7)),
    (KeyCode::Key8, Key::Digit(8)),
    (KeyCode::Key9, Key::Digit(9)),
];

const BUTTONS: [(MouseButton, PointerButton); 3] = [
    (MouseButton::Left, PointerButton::Primary),
    (MouseButton::Middle, PointerButton::Middle),
    (MouseButton::Right, PointerButton::Secondary),
];

pub fn modifiers() -> Modifiers {
    Modifiers {
        shift: is_key_down(KeyCode::LeftShift) || is_key_down(KeyCode::RightShift),
        // Cmd on Mac
        ctrl: is_key_down(KeyCode::LeftControl)
            || is_key_down(KeyCode::RightControl)
            || is_key_down(KeyCode::LeftSuper)
            || is_key_down(KeyCode::RightSuper),
    }
}

/// Polls macroquad once per frame and emits painter events
pub struct InputPoller {
    last_mouse: Option<(f32, f32)>,
}

impl InputPoller {
    pub fn new() -> Self {
        Self { last_mouse: None }
    }

    pub fn poll(&mut self) -> Vec<InputEvent> {
        let mut events = Vec::new();
        let mods = modifiers();
        let (x, y) = mouse_position();

        // Modifier transitions first so this frame's clicks see them
        for (codes, key) in [
            ([KeyCode::LeftShift, KeyCode::RightShift], Key::Shift),
            ([KeyCode::LeftControl, KeyCode::RightControl], Key::Control),
        ] {
            if codes.iter().any(|&c| is_key_pressed(c)) {
                events.push(InputEvent::KeyDown { key, mods });
            }
            if codes.iter().any(|&c| is_key_released(c)) {
                events.push(InputEvent::KeyUp { key, mods });
            }
        }

        if self.last_mouse != Some((x, y)) {
            events.push(InputEvent::PointerMove { x, y, mods });
            self.last_mouse = Some((x, y));
        }

        for (mb, button) in BUTTONS {
            if is_mouse_button_pressed(mb) {
                events.push(InputEvent::PointerDown { x, y, button, mods });
            }
            if is_mouse_button_released(mb) {
                events.push(InputEvent::PointerUp { x, y, button });
            }
        }

        let (_, wheel) = mouse_wheel();
        if wheel != 0.0 {
            // macroquad reports up as positive; painter deltas grow downward
            events.push(InputEvent::Wheel { x, y, dy: -wheel.signum() * WHEEL_NOTCH, mods });
        }

        for &(code, key) in KEYS {
            if is_key_pressed(code) {
                events.push(InputEvent::KeyDown { key, mods });
            }
        }

        events
    }
}
