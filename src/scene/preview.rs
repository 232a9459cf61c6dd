//! Software rasterizer for the 3D preview
//!
//! Draws the head model with nearest-neighbour texturing into an RGBA
//! framebuffer. Texels below half alpha are discarded, so transparent parts
//! of the overlay shell let the head show through.

use super::camera::OrbitCamera;
use super::math::{Vec2, Vec3};
use super::model::{Mesh, SkinModel, Triangle};
use crate::mapping::uv_to_texel;
use crate::texture::{Texel, TEXTURE_SIZE};

/// Alpha below this is discarded
const ALPHA_TEST: u8 = 128;

/// Preview background
pub const BACKGROUND: [u8; 4] = [0x38, 0x38, 0x38, 255];

/// Tint applied to the hovered texel
const HIGHLIGHT: [u8; 4] = [255, 255, 255, 255];

/// RGBA color buffer plus depth
pub struct Framebuffer {
    pub pixels: Vec<u8>,   // RGBA, 4 bytes per pixel
    pub zbuffer: Vec<f32>, // Depth buffer
    pub width: usize,
    pub height: usize,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            pixels: vec![0; width * height * 4],
            zbuffer: vec![f32::MAX; width * height],
            width,
            height,
        }
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        if self.width != width || self.height != height {
            self.width = width;
            self.height = height;
            self.pixels = vec![0; width * height * 4];
            self.zbuffer = vec![f32::MAX; width * height];
        }
    }

    pub fn clear(&mut self, color: [u8; 4]) {
        for px in self.pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&color);
        }
        self.zbuffer.fill(f32::MAX);
    }

    pub fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        let i = (y * self.width + x) * 4;
        [self.pixels[i], self.pixels[i + 1], self.pixels[i + 2], self.pixels[i + 3]]
    }
}

/// What to draw this frame
pub struct PreviewParams<'a> {
    /// Composite texture, RGBA 64x64
    pub texture: &'a [u8],
    pub overlay_visible: bool,
    pub highlight: Option<Texel>,
}

fn sample(texture: &[u8], texel: Texel) -> [u8; 4] {
    let i = (texel.y as usize * TEXTURE_SIZE + texel.x as usize) * 4;
    match texture.get(i..i + 4) {
        Some(px) => [px[0], px[1], px[2], px[3]],
        None => [0, 0, 0, 0],
    }
}

/// Draw the model as seen from `camera`
pub fn render_preview(fb: &mut Framebuffer, camera: &OrbitCamera, model: &SkinModel, params: &PreviewParams) {
    fb.clear(BACKGROUND);

    draw_mesh(fb, camera, &model.base, params);
    if params.overlay_visible {
        draw_mesh(fb, camera, &model.overlay, params);
    }
}

fn draw_mesh(fb: &mut Framebuffer, camera: &OrbitCamera, mesh: &Mesh, params: &PreviewParams) {
    let (w, h) = (fb.width as f32, fb.height as f32);
    for tri in &mesh.triangles {
        let projected = (
            camera.project(tri.v[0], w, h),
            camera.project(tri.v[1], w, h),
            camera.project(tri.v[2], w, h),
        );
        // Skip triangles crossing the near plane; the camera never gets that close
        if let (Some(a), Some(b), Some(c)) = projected {
            rasterize_triangle(fb, [a, b, c], tri, params);
        }
    }
}

fn rasterize_triangle(fb: &mut Framebuffer, v: [Vec3; 3], tri: &Triangle, params: &PreviewParams) {
    let [v1, v2, v3] = v;

    // Bounding box
    let min_x = v1.x.min(v2.x).min(v3.x).max(0.0) as usize;
    let max_x = (v1.x.max(v2.x).max(v3.x) + 1.0).min(fb.width as f32) as usize;
    let min_y = v1.y.min(v2.y).min(v3.y).max(0.0) as usize;
    let max_y = (v1.y.max(v2.y).max(v3.y) + 1.0).min(fb.height as f32) as usize;

    if min_x >= max_x || min_y >= max_y {
        return;
    }

    // Triangle area * 2
    let area = (v2.y - v3.y) * (v1.x - v3.x) + (v3.x - v2.x) * (v1.y - v3.y);
    if area.abs() < 0.00001 {
        return;
    }
    let inv_area = 1.0 / area;

    let inv_z = [1.0 / v1.z, 1.0 / v2.z, 1.0 / v3.z];

    for y in min_y..max_y {
        let py = y as f32 + 0.5;
        for x in min_x..max_x {
            let px = x as f32 + 0.5;

            let bc_x = ((v2.y - v3.y) * (px - v3.x) + (v3.x - v2.x) * (py - v3.y)) * inv_area;
            let bc_y = ((v3.y - v1.y) * (px - v3.x) + (v1.x - v3.x) * (py - v3.y)) * inv_area;
            let bc_z = 1.0 - bc_x - bc_y;

            const ERR: f32 = -0.0001;
            if bc_x < ERR || bc_y < ERR || bc_z < ERR {
                continue;
            }

            // Perspective-correct depth and UV
            let inv_z_interp = bc_x * inv_z[0] + bc_y * inv_z[1] + bc_z * inv_z[2];
            let z = 1.0 / inv_z_interp;

            let idx = y * fb.width + x;
            if z >= fb.zbuffer[idx] {
                continue;
            }

            let u = (bc_x * tri.uv[0].x * inv_z[0] + bc_y * tri.uv[1].x * inv_z[1] + bc_z * tri.uv[2].x * inv_z[2]) * z;
            let v = (bc_x * tri.uv[0].y * inv_z[0] + bc_y * tri.uv[1].y * inv_z[1] + bc_z * tri.uv[2].y * inv_z[2]) * z;

            let texel = uv_to_texel(Vec2::new(u, v));
            let mut color = sample(params.texture, texel);
            if color[3] < ALPHA_TEST {
                continue;
            }
            if params.highlight == Some(texel) {
                color = HIGHLIGHT;
            }
            color[3] = 255;

            fb.zbuffer[idx] = z;
            fb.pixels[idx * 4..idx * 4 + 4].copy_from_slice(&color);
        }
    }
}
