//! Single-line editing for the channel and hex fields

use macroquad::prelude::*;

use skinpaint::input::TextField;

/// Longest accepted entry (`#rrggbbaa`)
const MAX_LEN: usize = 9;

const FIELD_BG: Color = Color::new(0.12, 0.12, 0.14, 1.0);
const FIELD_BORDER: Color = Color::new(0.0, 0.75, 0.9, 1.0);
const FIELD_TEXT: Color = Color::new(0.8, 0.8, 0.85, 1.0);
const FIELD_CURSOR: Color = Color::new(0.9, 0.9, 0.95, 1.0);

pub enum FieldOutcome {
    Editing,
    Commit,
    Cancel,
}

/// A field being typed into. The value only reaches the painter on commit.
pub struct FieldEditor {
    pub field: TextField,
    pub text: String,
    blink_timer: f32,
}

impl FieldEditor {
    pub fn open(field: TextField, current: String) -> Self {
        Self { field, text: current, blink_timer: 0.0 }
    }

    /// Handle this frame's keys
    pub fn update(&mut self) -> FieldOutcome {
        self.blink_timer += get_frame_time();

        if is_key_pressed(KeyCode::Enter) || is_key_pressed(KeyCode::KpEnter) {
            return FieldOutcome::Commit;
        }
        if is_key_pressed(KeyCode::Escape) {
            return FieldOutcome::Cancel;
        }
        if is_key_pressed(KeyCode::Backspace) {
            self.text.pop();
            self.blink_timer = 0.0;
        }
        while let Some(ch) = get_char_pressed() {
            // Filter control characters
            if ch >= ' ' && ch != '\u{7f}' && self.text.chars().count() < MAX_LEN {
                self.text.push(ch);
                self.blink_timer = 0.0;
            }
        }
        FieldOutcome::Editing
    }

    pub fn draw(&self, x: f32, y: f32, w: f32, h: f32, font_size: f32) {
        draw_rectangle(x, y, w, h, FIELD_BG);
        draw_rectangle_lines(x, y, w, h, 1.0, FIELD_BORDER);

        let text_x = x + 4.0;
        let text_y = y + (h + font_size * 0.7) / 2.0;
        draw_text(&self.text, text_x, text_y, font_size, FIELD_TEXT);

        if (self.blink_timer % 1.0) < 0.5 {
            let cursor_x = text_x + measure_text(&self.text, None, font_size as u16, 1.0).width;
            draw_line(cursor_x, y + 4.0, cursor_x, y + h - 4.0, 1.5, FIELD_CURSOR);
        }
    }
}
