//! Color model - one color held in four synchronized representations
//!
//! HSL, RGB, hex and alpha always describe the same color. Every setter takes
//! one representation, floors and clamps it, recomputes the rest, and asks the
//! render sync to repaint all color widgets.

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::convert::{parse_hex, rgb_to_hsl, Hsl, Rgb};
use crate::render::{RenderSync, WidgetId};

/// A single adjustable color component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Channel {
    H,
    S,
    L,
    R,
    G,
    B,
    A,
}

impl Channel {
    pub const ALL: [Channel; 7] = [
        Channel::H,
        Channel::S,
        Channel::L,
        Channel::R,
        Channel::G,
        Channel::B,
        Channel::A,
    ];

    /// Upper bound of the channel's domain (lower bound is always 0)
    pub fn max(self) -> u16 {
        match self {
            Channel::H => 360,
            Channel::S | Channel::L => 100,
            Channel::R | Channel::G | Channel::B | Channel::A => 255,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Channel::H => "H",
            Channel::S => "S",
            Channel::L => "L",
            Channel::R => "R",
            Channel::G => "G",
            Channel::B => "B",
            Channel::A => "A",
        }
    }

    /// Whether this channel belongs to the HSL representation
    pub fn is_hsl(self) -> bool {
        matches!(self, Channel::H | Channel::S | Channel::L)
    }
}

/// One representation of a color, as handed to [`ColorModel::set_color`]
#[derive(Debug, Clone, PartialEq)]
pub enum ColorInput {
    Hsl { h: f32, s: f32, l: f32 },
    Rgb { r: f32, g: f32, b: f32 },
    Hex(String),
    Alpha(f32),
}

/// Floor, then clamp into `[0, max]`. Non-finite input is rejected.
fn floor_clamp(value: f32, max: u16) -> Option<f32> {
    if !value.is_finite() {
        return None;
    }
    Some(value.floor().clamp(0.0, max as f32))
}

/// The current brush color
#[derive(Debug, Clone, PartialEq)]
pub struct ColorModel {
    hsl: Hsl,
    rgb: Rgb,
    alpha: u8,
    hex: String,
}

impl ColorModel {
    /// Start from an HSL color at full opacity
    pub fn new(hsl: Hsl) -> Self {
        let rgb = hsl.to_rgb();
        Self {
            hsl,
            rgb,
            alpha: 255,
            hex: rgb.to_hex(),
        }
    }

    pub fn hsl(&self) -> Hsl {
        self.hsl
    }

    pub fn rgb(&self) -> Rgb {
        self.rgb
    }

    pub fn alpha(&self) -> u8 {
        self.alpha
    }

    pub fn hex(&self) -> &str {
        &self.hex
    }

    /// Color and alpha packed as RGBA bytes
    pub fn rgba(&self) -> [u8; 4] {
        self.rgb.with_alpha(self.alpha)
    }

    /// Current integer value of one channel
    pub fn channel_value(&self, channel: Channel) -> u16 {
        match channel {
            Channel::H => self.hsl.h,
            Channel::S => self.hsl.s as u16,
            Channel::L => self.hsl.l as u16,
            Channel::R => self.rgb.r as u16,
            Channel::G => self.rgb.g as u16,
            Channel::B => self.rgb.b as u16,
            Channel::A => self.alpha as u16,
        }
    }

    /// Set the color from one representation and resync the others.
    ///
    /// Returns `false` when the input was rejected (non-finite numbers,
    /// malformed hex); the previous color is kept in that case.
    pub fn set_color(&mut self, input: ColorInput, sync: &mut dyn RenderSync) -> bool {
        let accepted = match input {
            ColorInput::Hsl { h, s, l } => self.apply_hsl(h, s, l),
            ColorInput::Rgb { r, g, b } => self.apply_rgb(r, g, b),
            ColorInput::Hex(text) => self.apply_hex(&text),
            ColorInput::Alpha(a) => match floor_clamp(a, Channel::A.max()) {
                Some(a) => {
                    self.alpha = a as u8;
                    true
                }
                None => false,
            },
        };

        if accepted {
            for widget in WidgetId::COLOR_WIDGETS {
                sync.request_widget_repaint(widget);
            }
        }
        accepted
    }

    /// Set one channel, holding the other channels of its representation
    pub fn set_channel(&mut self, channel: Channel, value: f32, sync: &mut dyn RenderSync) -> bool {
        let Hsl { h, s, l } = self.hsl;
        let Rgb { r, g, b } = self.rgb;
        let (h, s, l) = (h as f32, s as f32, l as f32);
        let (r, g, b) = (r as f32, g as f32, b as f32);

        let input = match channel {
            Channel::H => ColorInput::Hsl { h: value, s, l },
            Channel::S => ColorInput::Hsl { h, s: value, l },
            Channel::L => ColorInput::Hsl { h, s, l: value },
            Channel::R => ColorInput::Rgb { r: value, g, b },
            Channel::G => ColorInput::Rgb { r, g: value, b },
            Channel::B => ColorInput::Rgb { r, g, b: value },
            Channel::A => ColorInput::Alpha(value),
        };
        self.set_color(input, sync)
    }

    /// Step a channel by `delta` (the up/down arrows next to each field)
    pub fn nudge(&mut self, channel: Channel, delta: i32, sync: &mut dyn RenderSync) -> bool {
        let value = self.channel_value(channel) as i32 + delta;
        self.set_channel(channel, value as f32, sync)
    }

    /// Map a pointer offset along a strip of `width` pixels to a channel value
    pub fn pick_from_offset(
        &mut self,
        channel: Channel,
        offset: f32,
        width: f32,
        sync: &mut dyn RenderSync,
    ) -> bool {
        if width <= 0.0 {
            return false;
        }
        let offset = offset.clamp(0.0, width);
        self.set_channel(channel, offset * channel.max() as f32 / width, sync)
    }

    /// Take an exact RGB + alpha (eyedropper, hotbar slot switch)
    pub fn load(&mut self, rgb: Rgb, alpha: u8, sync: &mut dyn RenderSync) {
        self.alpha = alpha;
        self.set_color(
            ColorInput::Rgb {
                r: rgb.r as f32,
                g: rgb.g as f32,
                b: rgb.b as f32,
            },
            sync,
        );
    }

    fn apply_hsl(&mut self, h: f32, s: f32, l: f32) -> bool {
        let (Some(h), Some(s), Some(l)) = (
            floor_clamp(h, Channel::H.max()),
            floor_clamp(s, Channel::S.max()),
            floor_clamp(l, Channel::L.max()),
        ) else {
            return false;
        };

        self.hsl = Hsl::new(h as u16, s as u8, l as u8);
        self.rgb = self.hsl.to_rgb();
        self.hex = self.rgb.to_hex();
        true
    }

    fn apply_rgb(&mut self, r: f32, g: f32, b: f32) -> bool {
        let (Some(r), Some(g), Some(b)) = (
            floor_clamp(r, Channel::R.max()),
            floor_clamp(g, Channel::G.max()),
            floor_clamp(b, Channel::B.max()),
        ) else {
            return false;
        };

        self.set_rgb_exact(Rgb::new(r as u8, g as u8, b as u8));
        true
    }

    fn apply_hex(&mut self, text: &str) -> bool {
        match parse_hex(text) {
            Ok((rgb, alpha)) => {
                // An alpha byte typed into the field wins over the tracked alpha
                if let Some(a) = alpha {
                    self.alpha = a;
                }
                self.set_rgb_exact(rgb);
                true
            }
            Err(e) => {
                warn!("ignoring hex input {:?}: {}", text, e);
                false
            }
        }
    }

    fn set_rgb_exact(&mut self, rgb: Rgb) {
        let (h, s, l) = rgb_to_hsl(rgb);
        self.rgb = rgb;
        self.hsl = Hsl::from_f32(h, s, l);
        self.hex = rgb.to_hex();
    }
}

impl Default for ColorModel {
    fn default() -> Self {
        Self::new(Hsl::new(0, 100, 50))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::testing::RecordingSync;
    use crate::render::NullSync;

    #[test]
    fn test_default_is_red() {
        let model = ColorModel::default();
        assert_eq!(model.rgb(), Rgb::new(255, 0, 0));
        assert_eq!(model.hex(), "ff0000");
        assert_eq!(model.alpha(), 255);
    }

    #[test]
    fn test_set_rgb_green_updates_hex_and_hue() {
        let mut model = ColorModel::default();
        let mut sync = RecordingSync::default();
        assert!(model.set_color(ColorInput::Rgb { r: 0.0, g: 255.0, b: 0.0 }, &mut sync));

        assert_eq!(model.hex(), "00ff00");
        assert_eq!(model.hsl().h, 120);
        assert_eq!(model.hsl().s, 100);
        assert_eq!(model.hsl().l, 50);
        for widget in WidgetId::COLOR_WIDGETS {
            assert!(sync.widgets.contains(&widget), "{:?} not repainted", widget);
        }
    }

    #[test]
    fn test_inputs_are_floored_and_clamped() {
        let mut model = ColorModel::default();
        model.set_color(ColorInput::Hsl { h: 400.7, s: -3.0, l: 50.9 }, &mut NullSync);
        assert_eq!(model.hsl(), Hsl::new(360, 0, 50));

        model.set_color(ColorInput::Rgb { r: 300.0, g: 12.9, b: -1.0 }, &mut NullSync);
        assert_eq!(model.rgb(), Rgb::new(255, 12, 0));

        model.set_color(ColorInput::Alpha(999.0), &mut NullSync);
        assert_eq!(model.alpha(), 255);
    }

    #[test]
    fn test_nan_is_ignored() {
        let mut model = ColorModel::default();
        let mut sync = RecordingSync::default();
        assert!(!model.set_color(ColorInput::Rgb { r: f32::NAN, g: 0.0, b: 0.0 }, &mut sync));
        assert_eq!(model.rgb(), Rgb::new(255, 0, 0));
        assert!(sync.widgets.is_empty());
    }

    #[test]
    fn test_malformed_hex_keeps_last_good() {
        let mut model = ColorModel::default();
        model.set_color(ColorInput::Hex("336699".into()), &mut NullSync);
        assert!(!model.set_color(ColorInput::Hex("33669".into()), &mut NullSync));
        assert!(!model.set_color(ColorInput::Hex("xyz123".into()), &mut NullSync));
        assert_eq!(model.hex(), "336699");
    }

    #[test]
    fn test_hex_alpha_precedence() {
        let mut model = ColorModel::default();
        model.set_color(ColorInput::Alpha(100.0), &mut NullSync);

        // No alpha in the text: tracked alpha survives
        model.set_color(ColorInput::Hex("#0000ff".into()), &mut NullSync);
        assert_eq!(model.alpha(), 100);

        // Explicit alpha wins
        model.set_color(ColorInput::Hex("0000ff80".into()), &mut NullSync);
        assert_eq!(model.alpha(), 0x80);
        assert_eq!(model.rgb(), Rgb::new(0, 0, 255));
    }

    #[test]
    fn test_hsl_kept_through_black() {
        // Dragging lightness to zero and back must not lose the hue
        let mut model = ColorModel::new(Hsl::new(200, 80, 40));
        model.set_channel(Channel::L, 0.0, &mut NullSync);
        assert_eq!(model.rgb(), Rgb::BLACK);
        model.set_channel(Channel::L, 40.0, &mut NullSync);
        assert_eq!(model.hsl(), Hsl::new(200, 80, 40));
    }

    #[test]
    fn test_pick_from_offset() {
        let mut model = ColorModel::default();
        model.pick_from_offset(Channel::H, 128.0, 256.0, &mut NullSync);
        assert_eq!(model.hsl().h, 180);

        model.pick_from_offset(Channel::R, 999.0, 256.0, &mut NullSync);
        assert_eq!(model.rgb().r, 255);

        model.pick_from_offset(Channel::A, -20.0, 256.0, &mut NullSync);
        assert_eq!(model.alpha(), 0);
    }

    #[test]
    fn test_nudge_clamps() {
        let mut model = ColorModel::default();
        model.nudge(Channel::H, -1, &mut NullSync);
        assert_eq!(model.hsl().h, 0);
        model.nudge(Channel::H, 1, &mut NullSync);
        assert_eq!(model.hsl().h, 1);
        model.nudge(Channel::A, 1, &mut NullSync);
        assert_eq!(model.alpha(), 255);
    }

    #[test]
    fn test_load_exact_rgba() {
        let mut model = ColorModel::default();
        model.load(Rgb::new(10, 20, 30), 0, &mut NullSync);
        assert_eq!(model.rgba(), [10, 20, 30, 0]);
    }
}
