//! Picker strip rendering
//!
//! Each strip varies one channel left to right while the other channels stay
//! at the model's current values, with a marker line at the current value.
//! Output is plain RGBA so the host can upload it however it likes.

use super::convert::{hsl_to_rgb, Rgb};
use super::model::{Channel, ColorModel};

/// Marker line width in pixels
const INDICATOR_WIDTH: usize = 2;

/// An RGBA image for one picker strip
#[derive(Debug, Clone, PartialEq)]
pub struct StripImage {
    pub width: usize,
    pub height: usize,
    /// RGBA, row-major
    pub pixels: Vec<u8>,
}

impl StripImage {
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        let i = (y * self.width + x) * 4;
        [self.pixels[i], self.pixels[i + 1], self.pixels[i + 2], self.pixels[i + 3]]
    }
}

/// X position of the current-value marker on a strip of `width` pixels
pub fn indicator_x(channel: Channel, model: &ColorModel, width: usize) -> usize {
    let value = model.channel_value(channel) as f32 / channel.max() as f32;
    ((value * width as f32) as usize).min(width.saturating_sub(1))
}

/// Color of the strip at fraction `t` (0..=1) along its length
fn strip_color(channel: Channel, model: &ColorModel, t: f32) -> [u8; 4] {
    let hsl = model.hsl();
    let rgb = model.rgb();
    let v = t * channel.max() as f32;

    match channel {
        Channel::H => hsl_to_rgb(v, hsl.s as f32, hsl.l as f32).with_alpha(255),
        Channel::S => hsl_to_rgb(hsl.h as f32, v, hsl.l as f32).with_alpha(255),
        Channel::L => hsl_to_rgb(hsl.h as f32, hsl.s as f32, v).with_alpha(255),
        Channel::R => Rgb::new(v as u8, rgb.g, rgb.b).with_alpha(255),
        Channel::G => Rgb::new(rgb.r, v as u8, rgb.b).with_alpha(255),
        Channel::B => Rgb::new(rgb.r, rgb.g, v as u8).with_alpha(255),
        Channel::A => rgb.with_alpha(v as u8),
    }
}

/// Marker color that stays visible against the current color
fn indicator_color(model: &ColorModel) -> [u8; 4] {
    if model.hsl().l > 50 {
        [0, 0, 0, 255]
    } else {
        [255, 255, 255, 255]
    }
}

/// Render the gradient strip for `channel`
pub fn render_strip(channel: Channel, model: &ColorModel, width: usize, height: usize) -> StripImage {
    let mut row = Vec::with_capacity(width * 4);
    let span = width.saturating_sub(1).max(1) as f32;
    for x in 0..width {
        row.extend_from_slice(&strip_color(channel, model, x as f32 / span));
    }

    let marker = indicator_x(channel, model, width);
    let marker_color = indicator_color(model);
    for x in marker..(marker + INDICATOR_WIDTH).min(width) {
        row[x * 4..x * 4 + 4].copy_from_slice(&marker_color);
    }

    let mut pixels = Vec::with_capacity(width * height * 4);
    for _ in 0..height {
        pixels.extend_from_slice(&row);
    }

    StripImage { width, height, pixels }
}
