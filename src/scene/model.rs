//! Head model - a unit cube for the skin and a 9/8 scaled shell for the overlay
//!
//! Both cubes are UV-mapped onto the standard 64x64 skin layout: the head
//! occupies the 32x16 block at (0, 0) and the overlay "hat" the block at
//! (32, 0). Each block is laid out as
//!
//! ```text
//!         d     w     d     w
//!      +-----+-----+-----+
//!   d  |     | top | bot |
//!      +-----+-----+-----+-----+
//!   h  |right|front|left |back |
//!      +-----+-----+-----+-----+
//! ```

use super::math::{Vec2, Vec3};
use super::ray::{ray_triangle_intersect, Ray};
use crate::texture::{LayerId, OVERLAY_SCALE, TEXTURE_SIZE};

/// Texel size of one cube edge
const BLOCK: f32 = 8.0;

/// One textured triangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub v: [Vec3; 3],
    pub uv: [Vec2; 3],
}

/// A cube mesh belonging to one layer
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub layer: LayerId,
    pub scale: f32,
    pub triangles: Vec<Triangle>,
}

/// One ray/mesh intersection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub distance: f32,
    /// Texture coordinate, v measured up from the bottom of the texture
    pub uv: Vec2,
    pub mesh: LayerId,
}

/// Texel rectangle on the skin plus how it is laid on a cube face
struct FaceSpec {
    /// Top-left texel of the face region
    texel: (f32, f32),
    /// Cube corner under the region's top-left texel (unit cube)
    origin: Vec3,
    /// Direction of increasing texel x across the face
    right: Vec3,
    /// Direction of increasing texel y down the face
    down: Vec3,
}

/// Six faces of a cube whose skin block starts at texel column `u`
fn face_specs(u: f32) -> [FaceSpec; 6] {
    let d = BLOCK;
    let w = BLOCK;
    let h = 0.5;
    [
        // Top, front edge along the bottom of the region
        FaceSpec {
            texel: (u + d, 0.0),
            origin: Vec3::new(-h, h, -h),
            right: Vec3::new(1.0, 0.0, 0.0),
            down: Vec3::new(0.0, 0.0, 1.0),
        },
        // Bottom
        FaceSpec {
            texel: (u + d + w, 0.0),
            origin: Vec3::new(-h, -h, h),
            right: Vec3::new(1.0, 0.0, 0.0),
            down: Vec3::new(0.0, 0.0, -1.0),
        },
        // Right side of the head, facing -x
        FaceSpec {
            texel: (u, d),
            origin: Vec3::new(-h, h, -h),
            right: Vec3::new(0.0, 0.0, 1.0),
            down: Vec3::new(0.0, -1.0, 0.0),
        },
        // Front, facing +z
        FaceSpec {
            texel: (u + d, d),
            origin: Vec3::new(-h, h, h),
            right: Vec3::new(1.0, 0.0, 0.0),
            down: Vec3::new(0.0, -1.0, 0.0),
        },
        // Left side, facing +x
        FaceSpec {
            texel: (u + d + w, d),
            origin: Vec3::new(h, h, h),
            right: Vec3::new(0.0, 0.0, -1.0),
            down: Vec3::new(0.0, -1.0, 0.0),
        },
        // Back, facing -z
        FaceSpec {
            texel: (u + 2.0 * d + w, d),
            origin: Vec3::new(h, h, -h),
            right: Vec3::new(-1.0, 0.0, 0.0),
            down: Vec3::new(0.0, -1.0, 0.0),
        },
    ]
}

/// Texel position to texture coordinate (v up)
fn texel_uv(x: f32, y: f32) -> Vec2 {
    let n = TEXTURE_SIZE as f32;
    Vec2::new(x / n, 1.0 - y / n)
}

impl Mesh {
    /// Cube of edge `scale` centered on the origin, textured from the skin
    /// block starting at texel column `u`
    pub fn cube(layer: LayerId, u: f32, scale: f32) -> Self {
        let mut triangles = Vec::with_capacity(12);
        for face in face_specs(u) {
            let (tx, ty) = face.texel;
            let p00 = face.origin * scale;
            let p10 = (face.origin + face.right) * scale;
            let p01 = (face.origin + face.down) * scale;
            let p11 = (face.origin + face.right + face.down) * scale;

            let uv00 = texel_uv(tx, ty);
            let uv10 = texel_uv(tx + BLOCK, ty);
            let uv01 = texel_uv(tx, ty + BLOCK);
            let uv11 = texel_uv(tx + BLOCK, ty + BLOCK);

            triangles.push(Triangle { v: [p00, p01, p10], uv: [uv00, uv01, uv10] });
            triangles.push(Triangle { v: [p10, p01, p11], uv: [uv10, uv01, uv11] });
        }
        Self { layer, scale, triangles }
    }

    /// Every intersection of `ray` with this mesh
    pub fn intersect(&self, ray: &Ray) -> Vec<Hit> {
        self.triangles
            .iter()
            .filter_map(|tri| {
                let hit = ray_triangle_intersect(ray, tri.v[0], tri.v[1], tri.v[2])?;
                let w = 1.0 - hit.u - hit.v;
                let uv = tri.uv[0] * w + tri.uv[1] * hit.u + tri.uv[2] * hit.v;
                Some(Hit {
                    distance: hit.t,
                    uv,
                    mesh: self.layer,
                })
            })
            .collect()
    }
}

/// The head and its overlay shell
#[derive(Debug, Clone, PartialEq)]
pub struct SkinModel {
    pub base: Mesh,
    pub overlay: Mesh,
}

impl SkinModel {
    pub fn new() -> Self {
        Self::with_overlay_scale(OVERLAY_SCALE)
    }

    pub fn with_overlay_scale(scale: f32) -> Self {
        Self {
            base: Mesh::cube(LayerId::Base, 0.0, 1.0),
            overlay: Mesh::cube(LayerId::Overlay, 32.0, scale),
        }
    }

    pub fn meshes(&self) -> [&Mesh; 2] {
        [&self.base, &self.overlay]
    }

    /// All intersections with both meshes, nearest first.
    ///
    /// The overlay shell is tested whether or not it is currently shown, so
    /// callers decide what a hidden overlay means. A ray crossing a shared
    /// triangle edge is reported once.
    pub fn intersect(&self, ray: &Ray) -> Vec<Hit> {
        let mut hits: Vec<Hit> = self.meshes().iter().flat_map(|m| m.intersect(ray)).collect();
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits.dedup_by(|b, a| a.mesh == b.mesh && (a.distance - b.distance).abs() < 1e-5);
        hits
    }
}

impl Default for SkinModel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn front_ray(x: f32, y: f32) -> Ray {
        Ray::new(Vec3::new(x, y, 5.0), Vec3::new(0.0, 0.0, -1.0))
    }

    #[test]
    fn test_cube_has_twelve_triangles() {
        let model = SkinModel::new();
        assert_eq!(model.base.triangles.len(), 12);
        assert_eq!(model.overlay.triangles.len(), 12);
    }

    #[test]
    fn test_front_ray_hits_four_surfaces_in_order() {
        let model = SkinModel::new();
        let hits = model.intersect(&front_ray(0.1, 0.2));
        assert_eq!(hits.len(), 4);
        assert_eq!(hits[0].mesh, LayerId::Overlay);
        assert!((hits[0].distance - (5.0 - 0.5625)).abs() < 1e-4);
        assert_eq!(hits[1].mesh, LayerId::Base);
        assert!((hits[1].distance - 4.5).abs() < 1e-4);
        assert_eq!(hits[2].mesh, LayerId::Base);
        assert_eq!(hits[3].mesh, LayerId::Overlay);
    }

    #[test]
    fn test_front_face_uv_region() {
        let model = SkinModel::new();
        let hits = model.intersect(&front_ray(0.05, -0.1));
        let base = hits[1];
        // Front face region is (8..16, 8..16)
        assert!((base.uv.x * 64.0 - 12.4).abs() < 1e-3);
        assert!(((1.0 - base.uv.y) * 64.0 - 12.8).abs() < 1e-3);

        // Hat front region is (40..48, 8..16), on a larger cube
        let hat = hits[0];
        assert!((hat.uv.x * 64.0 - (40.0 + (0.05 / 1.125 + 0.5) * 8.0)).abs() < 1e-3);
    }

    #[test]
    fn test_upper_left_of_front_maps_to_region_corner() {
        let model = SkinModel::new();
        let hits = model.intersect(&front_ray(-0.49, 0.49));
        let base = hits[1];
        let x = base.uv.x * 64.0;
        let y = (1.0 - base.uv.y) * 64.0;
        assert!((8.0..9.0).contains(&x), "x={}", x);
        assert!((8.0..9.0).contains(&y), "y={}", y);
    }

    #[test]
    fn test_miss() {
        let model = SkinModel::new();
        assert!(model.intersect(&front_ray(3.0, 0.0)).is_empty());
    }
}
