//! 2D canvas view - zoom and pan over the texture
//!
//! The whole 64x64 texture fills the view at zoom 1. At zoom Z the view shows
//! a window of N/Z texels whose top-left is the pan offset P, measured in
//! texels and clamped so the window never leaves the texture.

use crate::texture::{Texel, TEXTURE_SIZE};

pub const MIN_ZOOM: f32 = 1.0;
pub const MAX_ZOOM: f32 = 8.0;

/// Zoom and pan state of the 2D canvas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    pub zoom: f32,
    /// Pan offset in texels (top-left of the visible window)
    pub pan_x: f32,
    pub pan_y: f32,
    pub min_zoom: f32,
    pub max_zoom: f32,
}

impl ViewTransform {
    pub fn new() -> Self {
        Self::with_bounds(MIN_ZOOM, MAX_ZOOM)
    }

    /// Start fully zoomed out with custom zoom bounds, kept inside
    /// `MIN_ZOOM..=MAX_ZOOM`
    pub fn with_bounds(min_zoom: f32, max_zoom: f32) -> Self {
        let min_zoom = min_zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        Self {
            zoom: min_zoom,
            pan_x: 0.0,
            pan_y: 0.0,
            min_zoom,
            max_zoom: max_zoom.clamp(min_zoom, MAX_ZOOM),
        }
    }

    /// Reset zoom and pan to show the whole texture
    pub fn reset(&mut self) {
        self.zoom = self.min_zoom;
        self.pan_x = 0.0;
        self.pan_y = 0.0;
    }

    /// Texels visible along each axis
    pub fn visible_span(&self) -> f32 {
        TEXTURE_SIZE as f32 / self.zoom
    }

    /// Largest pan offset allowed at the current zoom
    pub fn max_pan(&self) -> f32 {
        TEXTURE_SIZE as f32 - self.visible_span()
    }

    /// Keep the visible window inside the texture
    pub fn clamp_pan(&mut self) {
        let max = self.max_pan().max(0.0);
        self.pan_x = self.pan_x.clamp(0.0, max);
        self.pan_y = self.pan_y.clamp(0.0, max);
    }

    /// Fractional texture position under a pointer offset inside the view
    pub fn texture_pos(&self, offset_x: f32, offset_y: f32, view_w: f32, view_h: f32) -> (f32, f32) {
        let span = self.visible_span();
        (
            offset_x / view_w * span + self.pan_x,
            offset_y / view_h * span + self.pan_y,
        )
    }

    /// Texel under a pointer offset inside a `view_w` x `view_h` view.
    ///
    /// The result is not bounds-checked; callers treat out-of-range texels
    /// as no-ops.
    pub fn texel_at(&self, offset_x: f32, offset_y: f32, view_w: f32, view_h: f32) -> Texel {
        let (x, y) = self.texture_pos(offset_x, offset_y, view_w, view_h);
        Texel::new(x.floor() as i32, y.floor() as i32)
    }

    /// Screen rectangle (relative to the view) covered by a texel: (x, y, w, h)
    pub fn texel_rect(&self, texel: Texel, view_w: f32, view_h: f32) -> (f32, f32, f32, f32) {
        let span = self.visible_span();
        let sx = view_w / span;
        let sy = view_h / span;
        (
            (texel.x as f32 - self.pan_x) * sx,
            (texel.y as f32 - self.pan_y) * sy,
            sx,
            sy,
        )
    }

    /// Zoom by `steps` notches (positive zooms in), keeping the texture
    /// position under the pointer fixed. Returns whether the zoom changed.
    pub fn zoom_at(&mut self, steps: i32, offset_x: f32, offset_y: f32, view_w: f32, view_h: f32) -> bool {
        let old_zoom = self.zoom;
        let new_zoom = (old_zoom + steps as f32).clamp(self.min_zoom, self.max_zoom);
        if new_zoom == old_zoom {
            return false;
        }

        let (ax, ay) = self.texture_pos(offset_x, offset_y, view_w, view_h);
        let ratio = old_zoom / new_zoom;
        self.zoom = new_zoom;
        self.pan_x = (self.pan_x - ax) * ratio + ax;
        self.pan_y = (self.pan_y - ay) * ratio + ay;
        self.clamp_pan();
        true
    }
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::new()
    }
}
