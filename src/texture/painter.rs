//! Pixel painter - texel writes, line strokes and samples
//!
//! Writes are straight overwrites (no blending) so dragging over the same
//! texel twice never builds up alpha.

use super::layer::{Layer, Texel};
use crate::color::Rgb;

/// Overwrite one texel with `rgb` at `alpha`.
///
/// Out-of-bounds texels and hidden layers are left alone. Returns whether a
/// write happened.
pub fn paint_texel(layer: &mut Layer, texel: Texel, rgb: Rgb, alpha: u8) -> bool {
    if !layer.visible {
        return false;
    }
    layer.set(texel, rgb.with_alpha(alpha))
}

/// Texels covered by a stroke from `from` to `to`, both endpoints included.
///
/// Samples `ceil(distance)` evenly spaced steps and floors each sample, so
/// horizontal, vertical and diagonal strokes come out gap-free.
pub fn line_texels(from: Texel, to: Texel) -> Vec<Texel> {
    let dx = (to.x - from.x) as f32;
    let dy = (to.y - from.y) as f32;
    let steps = (dx * dx + dy * dy).sqrt().ceil() as i32;

    if steps == 0 {
        return vec![from];
    }

    let mut texels: Vec<Texel> = Vec::with_capacity(steps as usize + 1);
    for i in 0..=steps {
        let t = i as f32 / steps as f32;
        let texel = Texel::new(
            (from.x as f32 + dx * t).floor() as i32,
            (from.y as f32 + dy * t).floor() as i32,
        );
        if texels.last() != Some(&texel) {
            texels.push(texel);
        }
    }
    texels
}

/// Paint a line stroke. Returns the number of texels written.
pub fn paint_line(layer: &mut Layer, from: Texel, to: Texel, rgb: Rgb, alpha: u8) -> usize {
    if !layer.visible {
        return 0;
    }
    line_texels(from, to)
        .into_iter()
        .filter(|&t| paint_texel(layer, t, rgb, alpha))
        .count()
}

/// Read back one texel as color + alpha
pub fn sample_texel(layer: &Layer, texel: Texel) -> Option<(Rgb, u8)> {
    layer
        .get(texel)
        .map(|[r, g, b, a]| (Rgb::new(r, g, b), a))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::texture::{LayerId, TEXTURE_SIZE};

    #[test]
    fn test_paint_then_sample() {
        let mut layer = Layer::new(LayerId::Base);
        let t = Texel::new(12, 40);
        assert!(paint_texel(&mut layer, t, Rgb::new(1, 2, 3), 77));
        assert_eq!(sample_texel(&layer, t), Some((Rgb::new(1, 2, 3), 77)));
    }

    #[test]
    fn test_paint_then_sample_corners_and_edges() {
        let mut layer = Layer::new(LayerId::Base);
        let last = TEXTURE_SIZE as i32 - 1;
        let mut texels = Vec::new();
        for i in 0..=last {
            texels.extend([Texel::new(i, 0), Texel::new(i, last), Texel::new(0, i), Texel::new(last, i)]);
        }
        for (n, &t) in texels.iter().enumerate() {
            let rgb = Rgb::new(t.x as u8, t.y as u8, (n % 256) as u8);
            let alpha = (n % 255) as u8 + 1;
            assert!(paint_texel(&mut layer, t, rgb, alpha), "texel {:?}", t);
            assert_eq!(sample_texel(&layer, t), Some((rgb, alpha)), "texel {:?}", t);
        }
        assert_eq!(sample_texel(&layer, Texel::new(last + 1, 0)), None);
        assert_eq!(sample_texel(&layer, Texel::new(0, -1)), None);
    }

    #[test]
    fn test_paint_overwrites_alpha() {
        let mut layer = Layer::new(LayerId::Base);
        let t = Texel::new(0, 0);
        paint_texel(&mut layer, t, Rgb::WHITE, 255);
        paint_texel(&mut layer, t, Rgb::BLACK, 10);
        assert_eq!(layer.get(t), Some([0, 0, 0, 10]));
    }

    #[test]
    fn test_out_of_bounds_and_hidden_are_noops() {
        let mut layer = Layer::new(LayerId::Overlay);
        assert!(!paint_texel(&mut layer, Texel::new(64, 3), Rgb::WHITE, 255));
        assert!(!paint_texel(&mut layer, Texel::new(-1, 3), Rgb::WHITE, 255));

        layer.visible = false;
        assert!(!paint_texel(&mut layer, Texel::new(5, 5), Rgb::WHITE, 255));
        assert_eq!(paint_line(&mut layer, Texel::new(0, 0), Texel::new(3, 0), Rgb::WHITE, 255), 0);
        assert!(layer.pixels().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_horizontal_line_has_no_gaps() {
        let mut layer = Layer::new(LayerId::Base);
        let n = paint_line(&mut layer, Texel::new(0, 0), Texel::new(5, 0), Rgb::WHITE, 255);
        assert_eq!(n, 6);
        for x in 0..=5 {
            assert_eq!(layer.get(Texel::new(x, 0)), Some([255, 255, 255, 255]));
        }
        assert_eq!(layer.get(Texel::new(6, 0)), Some([0, 0, 0, 0]));
        assert_eq!(layer.get(Texel::new(0, 1)), Some([0, 0, 0, 0]));
    }

    #[test]
    fn test_line_endpoints_and_direction() {
        let texels = line_texels(Texel::new(7, 9), Texel::new(3, 2));
        assert_eq!(texels.first(), Some(&Texel::new(7, 9)));
        assert_eq!(texels.last(), Some(&Texel::new(3, 2)));

        // Consecutive texels touch (8-connected)
        for w in texels.windows(2) {
            assert!((w[0].x - w[1].x).abs() <= 1 && (w[0].y - w[1].y).abs() <= 1);
        }

        assert_eq!(line_texels(Texel::new(4, 4), Texel::new(4, 4)), vec![Texel::new(4, 4)]);
    }

    #[test]
    fn test_line_clips_at_edge() {
        let mut layer = Layer::new(LayerId::Base);
        let n = paint_line(&mut layer, Texel::new(62, 0), Texel::new(66, 0), Rgb::WHITE, 255);
        assert_eq!(n, 2);
    }
}
