//! 3D surface picking - pointer to model intersection to texel
//!
//! Every 3D consumer (painting, eyedropping, hover) goes through the same
//! precedence rule to decide which intersection counts:
//!
//! - overlay shown and Shift up: the nearest intersection, whatever it is
//! - otherwise: the second intersection, dropped if it is on the overlay shell
//!
//! The overlay shell is always ray-tested, even while hidden, so with the
//! overlay off the first hit is the invisible shell and the second is the head.

use crate::scene::{Hit, OrbitCamera, SkinModel, Vec2};
use crate::texture::{LayerId, Texel, TEXTURE_SIZE};

/// Texel under a texture coordinate (v up), clamped into the texture
pub fn uv_to_texel(uv: Vec2) -> Texel {
    let n = TEXTURE_SIZE as i32;
    let x = ((uv.x * n as f32).floor() as i32).clamp(0, n - 1);
    let y = (n - (uv.y * n as f32).floor() as i32 - 1).clamp(0, n - 1);
    Texel::new(x, y)
}

/// Cast a ray through the pointer at (`x`, `y`) inside a `width` x `height`
/// viewport and list every intersection, nearest first
pub fn cast(camera: &OrbitCamera, model: &SkinModel, x: f32, y: f32, width: f32, height: f32) -> Vec<Hit> {
    let ray = camera.screen_to_ray(x, y, width, height);
    model.intersect(&ray)
}

/// Whether the nearest intersection is the one that counts
fn prefers_nearest(overlay_visible: bool, shift: bool) -> bool {
    overlay_visible && !shift
}

/// The intersection painting and hover act on, if any
pub fn resolve_paint_hit(hits: &[Hit], overlay_visible: bool, shift: bool) -> Option<&Hit> {
    if prefers_nearest(overlay_visible, shift) {
        hits.first()
    } else {
        hits.get(1).filter(|h| h.mesh != LayerId::Overlay)
    }
}

/// Intersections the 3D eyedropper probes, in order. A transparent sample
/// falls through to the next candidate.
pub fn eyedrop_candidates(hits: &[Hit], overlay_visible: bool, shift: bool) -> Vec<&Hit> {
    if prefers_nearest(overlay_visible, shift) {
        hits.iter().take(2).collect()
    } else {
        hits.get(1).filter(|h| h.mesh != LayerId::Overlay).into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(distance: f32, mesh: LayerId) -> Hit {
        Hit {
            distance,
            uv: Vec2::new(0.5, 0.5),
            mesh,
        }
    }

    #[test]
    fn test_uv_to_texel_flips_and_clamps() {
        assert_eq!(uv_to_texel(Vec2::new(0.0, 0.999)), Texel::new(0, 0));
        assert_eq!(uv_to_texel(Vec2::new(0.999, 0.001)), Texel::new(63, 63));
        assert_eq!(uv_to_texel(Vec2::new(1.0, 0.0)), Texel::new(63, 63));
        assert_eq!(uv_to_texel(Vec2::new(-0.2, 1.5)), Texel::new(0, 0));
        assert_eq!(uv_to_texel(Vec2::new(12.5 / 64.0, 1.0 - 12.5 / 64.0)), Texel::new(12, 12));
    }

    #[test]
    fn test_precedence_visible_overlay() {
        let hits = [hit(1.0, LayerId::Overlay), hit(1.1, LayerId::Base)];
        assert_eq!(resolve_paint_hit(&hits, true, false).map(|h| h.mesh), Some(LayerId::Overlay));
        // Shift skips past the shell
        assert_eq!(resolve_paint_hit(&hits, true, true).map(|h| h.mesh), Some(LayerId::Base));
    }

    #[test]
    fn test_precedence_hidden_overlay() {
        let hits = [hit(1.0, LayerId::Overlay), hit(1.1, LayerId::Base)];
        assert_eq!(resolve_paint_hit(&hits, false, false).map(|h| h.mesh), Some(LayerId::Base));

        // Only the shell was grazed: nothing to paint
        let grazed = [hit(1.0, LayerId::Overlay), hit(1.3, LayerId::Overlay)];
        assert!(resolve_paint_hit(&grazed, false, false).is_none());
        assert!(resolve_paint_hit(&grazed[..1], false, false).is_none());
        assert!(resolve_paint_hit(&[], true, false).is_none());
    }

    #[test]
    fn test_eyedrop_candidates() {
        let hits = [hit(1.0, LayerId::Overlay), hit(1.1, LayerId::Base), hit(2.0, LayerId::Base)];
        let preferred = eyedrop_candidates(&hits, true, false);
        assert_eq!(preferred.len(), 2);
        assert_eq!(preferred[1].mesh, LayerId::Base);

        let other = eyedrop_candidates(&hits, true, true);
        assert_eq!(other.len(), 1);
        assert_eq!(other[0].distance, 1.1);

        let grazed = [hit(1.0, LayerId::Overlay), hit(1.3, LayerId::Overlay)];
        assert!(eyedrop_candidates(&grazed, false, false).is_empty());
    }

    #[test]
    fn test_cast_from_start_camera_hits_shell_first() {
        let camera = OrbitCamera::new();
        let model = SkinModel::new();
        let hits = cast(&camera, &model, 410.0, 290.0, 800.0, 600.0);
        assert!(hits.len() >= 2);
        assert_eq!(hits[0].mesh, LayerId::Overlay);
        assert_eq!(hits[1].mesh, LayerId::Base);

        assert!(cast(&camera, &model, 2.0, 2.0, 800.0, 600.0).is_empty());
    }
}
