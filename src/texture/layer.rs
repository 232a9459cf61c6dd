//! Layer buffers - the two stacked 64x64 RGBA textures
//!
//! The base layer is the skin itself and is always visible. The overlay layer
//! is the "second skin" shell drawn slightly larger around the model; it can be
//! hidden. Composites stack overlay over base with straight-alpha blending.

use serde::{Deserialize, Serialize};

use crate::error::ImportError;

/// Fixed texture edge length in texels
pub const TEXTURE_SIZE: usize = 64;

/// On-screen scale of the overlay shell relative to the base model
pub const OVERLAY_SCALE: f32 = 9.0 / 8.0;

/// A texel coordinate, rows counted from the top of the buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Texel {
    pub x: i32,
    pub y: i32,
}

impl Texel {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Whether the texel lies inside a `size` x `size` buffer
    pub fn in_bounds(&self, size: usize) -> bool {
        self.x >= 0 && self.y >= 0 && (self.x as usize) < size && (self.y as usize) < size
    }
}

/// Which of the two layers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LayerId {
    Base,
    Overlay,
}

impl LayerId {
    pub fn other(self) -> LayerId {
        match self {
            LayerId::Base => LayerId::Overlay,
            LayerId::Overlay => LayerId::Base,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LayerId::Base => "Base",
            LayerId::Overlay => "Overlay",
        }
    }
}

/// One RGBA pixel buffer
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub id: LayerId,
    /// RGBA, row-major, `TEXTURE_SIZE` x `TEXTURE_SIZE`
    pixels: Vec<u8>,
    pub visible: bool,
    /// Render scale of the mesh this layer is shown on
    pub scale: f32,
}

impl Layer {
    /// Blank, fully transparent layer
    pub fn new(id: LayerId) -> Self {
        Self {
            id,
            pixels: vec![0; TEXTURE_SIZE * TEXTURE_SIZE * 4],
            visible: true,
            scale: match id {
                LayerId::Base => 1.0,
                LayerId::Overlay => OVERLAY_SCALE,
            },
        }
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    fn offset(&self, texel: Texel) -> Option<usize> {
        texel
            .in_bounds(TEXTURE_SIZE)
            .then(|| (texel.y as usize * TEXTURE_SIZE + texel.x as usize) * 4)
    }

    /// Read a texel, `None` outside the buffer
    pub fn get(&self, texel: Texel) -> Option<[u8; 4]> {
        let i = self.offset(texel)?;
        Some([self.pixels[i], self.pixels[i + 1], self.pixels[i + 2], self.pixels[i + 3]])
    }

    /// Overwrite a texel. Returns `false` outside the buffer.
    pub fn set(&mut self, texel: Texel, rgba: [u8; 4]) -> bool {
        match self.offset(texel) {
            Some(i) => {
                self.pixels[i..i + 4].copy_from_slice(&rgba);
                true
            }
            None => false,
        }
    }

    /// Make every texel transparent
    pub fn clear(&mut self) {
        self.pixels.fill(0);
    }
}

/// Straight-alpha "over" for one pixel
fn blend_over(top: [u8; 4], bottom: [u8; 4]) -> [u8; 4] {
    match (top[3], bottom[3]) {
        (255, _) | (_, 0) => top,
        (0, _) => bottom,
        (ta, ba) => {
            let ta = ta as f32 / 255.0;
            let ba = ba as f32 / 255.0;
            let out_a = ta + ba * (1.0 - ta);
            let mix = |t: u8, b: u8| {
                ((t as f32 * ta + b as f32 * ba * (1.0 - ta)) / out_a).round() as u8
            };
            [
                mix(top[0], bottom[0]),
                mix(top[1], bottom[1]),
                mix(top[2], bottom[2]),
                (out_a * 255.0).round() as u8,
            ]
        }
    }
}

/// The base and overlay layers plus the paint target
#[derive(Debug, Clone, PartialEq)]
pub struct LayerStack {
    base: Layer,
    overlay: Layer,
    active: LayerId,
}

impl LayerStack {
    pub fn new() -> Self {
        Self {
            base: Layer::new(LayerId::Base),
            overlay: Layer::new(LayerId::Overlay),
            active: LayerId::Base,
        }
    }

    pub fn layer(&self, id: LayerId) -> &Layer {
        match id {
            LayerId::Base => &self.base,
            LayerId::Overlay => &self.overlay,
        }
    }

    pub fn layer_mut(&mut self, id: LayerId) -> &mut Layer {
        match id {
            LayerId::Base => &mut self.base,
            LayerId::Overlay => &mut self.overlay,
        }
    }

    /// Current paint target
    pub fn active(&self) -> LayerId {
        self.active
    }

    pub fn set_active(&mut self, id: LayerId) {
        self.active = id;
    }

    pub fn overlay_visible(&self) -> bool {
        self.overlay.visible
    }

    /// Flip overlay visibility, returning the new state. The base layer
    /// cannot be hidden.
    pub fn toggle_overlay(&mut self) -> bool {
        self.overlay.visible = !self.overlay.visible;
        self.overlay.visible
    }

    /// Layers bottom to top
    pub fn iter(&self) -> impl Iterator<Item = &Layer> {
        [&self.base, &self.overlay].into_iter()
    }

    /// Flatten into one RGBA buffer. With `visible_only`, hidden layers are
    /// skipped (on-screen view); without, everything is merged (export).
    pub fn composite(&self, visible_only: bool) -> Vec<u8> {
        let mut out = self.base.pixels.clone();
        if visible_only && !self.overlay.visible {
            return out;
        }
        for (dst, top) in out.chunks_exact_mut(4).zip(self.overlay.pixels.chunks_exact(4)) {
            let blended = blend_over(
                [top[0], top[1], top[2], top[3]],
                [dst[0], dst[1], dst[2], dst[3]],
            );
            dst.copy_from_slice(&blended);
        }
        out
    }

    /// Composite value of one texel over visible layers
    pub fn composite_texel(&self, texel: Texel) -> Option<[u8; 4]> {
        let base = self.base.get(texel)?;
        if !self.overlay.visible {
            return Some(base);
        }
        let top = self.overlay.get(texel)?;
        Some(blend_over(top, base))
    }

    /// Replace the texture with a decoded image.
    ///
    /// The image lands in the base layer anchored at the top-left; anything
    /// beyond 64x64 is clipped and uncovered texels stay transparent. The
    /// overlay layer is cleared since the image carries both skin regions.
    pub fn replace_from_rgba(&mut self, rgba: &[u8], width: u32, height: u32) -> Result<(), ImportError> {
        if rgba.len() != width as usize * height as usize * 4 {
            return Err(ImportError::BufferSize { width, height, len: rgba.len() });
        }

        self.base.clear();
        self.overlay.clear();

        let copy_w = (width as usize).min(TEXTURE_SIZE);
        let copy_h = (height as usize).min(TEXTURE_SIZE);
        for y in 0..copy_h {
            let src = y * width as usize * 4;
            let dst = y * TEXTURE_SIZE * 4;
            self.base.pixels[dst..dst + copy_w * 4].copy_from_slice(&rgba[src..src + copy_w * 4]);
        }
        Ok(())
    }
}

impl Default for LayerStack {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_layers_are_blank() {
        let stack = LayerStack::new();
        assert_eq!(stack.active(), LayerId::Base);
        assert!(stack.layer(LayerId::Base).pixels().iter().all(|&b| b == 0));
        assert_eq!(stack.layer(LayerId::Base).pixels().len(), 64 * 64 * 4);
        assert!((stack.layer(LayerId::Overlay).scale - 1.125).abs() < 0.0001);
    }

    #[test]
    fn test_get_set_bounds() {
        let mut layer = Layer::new(LayerId::Base);
        assert!(layer.set(Texel::new(3, 4), [1, 2, 3, 4]));
        assert_eq!(layer.get(Texel::new(3, 4)), Some([1, 2, 3, 4]));
        assert!(!layer.set(Texel::new(-1, 0), [9, 9, 9, 9]));
        assert!(!layer.set(Texel::new(0, 64), [9, 9, 9, 9]));
        assert_eq!(layer.get(Texel::new(64, 0)), None);
    }

    #[test]
    fn test_composite_order_and_visibility() {
        let mut stack = LayerStack::new();
        let t = Texel::new(10, 10);
        stack.layer_mut(LayerId::Base).set(t, [255, 0, 0, 255]);
        stack.layer_mut(LayerId::Overlay).set(t, [0, 0, 255, 255]);

        assert_eq!(stack.composite_texel(t), Some([0, 0, 255, 255]));

        assert!(!stack.toggle_overlay());
        assert_eq!(stack.composite_texel(t), Some([255, 0, 0, 255]));

        let i = (10 * 64 + 10) * 4;
        assert_eq!(&stack.composite(true)[i..i + 4], &[255, 0, 0, 255]);
        // Export merges hidden layers too
        assert_eq!(&stack.composite(false)[i..i + 4], &[0, 0, 255, 255]);
    }

    #[test]
    fn test_blend_half_alpha() {
        let out = blend_over([255, 255, 255, 128], [0, 0, 0, 255]);
        assert_eq!(out[3], 255);
        assert!((out[0] as i16 - 128).abs() <= 1);
        // Transparent top leaves bottom alone
        assert_eq!(blend_over([9, 9, 9, 0], [1, 2, 3, 4]), [1, 2, 3, 4]);
    }

    #[test]
    fn test_replace_clips_and_pads() {
        let mut stack = LayerStack::new();
        stack.layer_mut(LayerId::Overlay).set(Texel::new(0, 0), [1, 1, 1, 1]);

        // 2x2 image
        let img = [10u8, 0, 0, 255, 20, 0, 0, 255, 30, 0, 0, 255, 40, 0, 0, 255];
        stack.replace_from_rgba(&img, 2, 2).unwrap();
        let base = stack.layer(LayerId::Base);
        assert_eq!(base.get(Texel::new(1, 1)), Some([40, 0, 0, 255]));
        assert_eq!(base.get(Texel::new(2, 0)), Some([0, 0, 0, 0]));
        assert_eq!(stack.layer(LayerId::Overlay).get(Texel::new(0, 0)), Some([0, 0, 0, 0]));

        // Oversized image is clipped
        let big = vec![7u8; 70 * 70 * 4];
        stack.replace_from_rgba(&big, 70, 70).unwrap();
        assert_eq!(stack.layer(LayerId::Base).get(Texel::new(63, 63)), Some([7, 7, 7, 7]));

        assert!(stack.replace_from_rgba(&img, 3, 3).is_err());
    }
}
