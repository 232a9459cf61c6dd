//! Hotbar - nine brush swatches
//!
//! The selected slot is the brush: painting uses its color, and editing the
//! color model writes back into it. Switching slots loads the slot's color
//! into the color model.

use serde::{Deserialize, Serialize};

use crate::color::{Hsl, Rgb};

pub const SLOT_COUNT: usize = 9;

/// Hotbar artwork units: 182 wide plus a 1 unit margin each side, one slot
/// every 20 units
const ART_WIDTH: f32 = 184.0;
const ART_MARGIN: f32 = 1.0;
const ART_SLOT: f32 = 20.0;

/// One brush color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Swatch {
    pub rgb: Rgb,
    pub alpha: u8,
}

impl Swatch {
    pub const fn new(rgb: Rgb, alpha: u8) -> Self {
        Self { rgb, alpha }
    }

    pub fn rgba(&self) -> [u8; 4] {
        self.rgb.with_alpha(self.alpha)
    }
}

/// Starting colors for slots after the first
const PALETTE: [Rgb; SLOT_COUNT - 1] = [
    Rgb::new(255, 255, 255),
    Rgb::new(0, 0, 0),
    Rgb::new(255, 170, 0),
    Rgb::new(255, 255, 0),
    Rgb::new(0, 200, 0),
    Rgb::new(0, 170, 255),
    Rgb::new(120, 60, 200),
    Rgb::new(140, 90, 50),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hotbar {
    slots: [Swatch; SLOT_COUNT],
    selected: usize,
}

impl Hotbar {
    /// Slot 0 holds `first`, the rest a fixed palette
    pub fn new(first: Swatch) -> Self {
        let mut slots = [first; SLOT_COUNT];
        for (slot, &rgb) in slots.iter_mut().skip(1).zip(PALETTE.iter()) {
            *slot = Swatch::new(rgb, 255);
        }
        Self { slots, selected: 0 }
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn current(&self) -> Swatch {
        self.slots[self.selected]
    }

    pub fn slot(&self, index: usize) -> Option<Swatch> {
        self.slots.get(index).copied()
    }

    pub fn slots(&self) -> &[Swatch; SLOT_COUNT] {
        &self.slots
    }

    /// Select a slot. Returns whether the selection changed; out-of-range
    /// indices are ignored.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= SLOT_COUNT || index == self.selected {
            return false;
        }
        self.selected = index;
        true
    }

    /// Step the selection by one for a wheel delta, wrapping at both ends.
    /// Returns the new slot.
    pub fn scroll(&mut self, dy: f32) -> usize {
        if dy == 0.0 || !dy.is_finite() {
            return self.selected;
        }
        let step = if dy > 0.0 { 1 } else { SLOT_COUNT - 1 };
        self.selected = (self.selected + step) % SLOT_COUNT;
        self.selected
    }

    /// Overwrite the selected slot's color
    pub fn store(&mut self, swatch: Swatch) {
        self.slots[self.selected] = swatch;
    }
}

impl Default for Hotbar {
    fn default() -> Self {
        Self::new(Swatch::new(Hsl::new(0, 100, 50).to_rgb(), 255))
    }
}

/// Slot under a pointer `offset` pixels from the left of a hotbar drawn
/// `width` pixels wide
pub fn slot_at_offset(offset: f32, width: f32) -> usize {
    if width <= 0.0 || !offset.is_finite() {
        return 0;
    }
    let margin = width * (ART_MARGIN / ART_WIDTH);
    let size = width * (ART_SLOT / ART_WIDTH);
    ((offset - margin) / size).floor().clamp(0.0, (SLOT_COUNT - 1) as f32) as usize
}
