//! Orbit camera for the 3D preview
//!
//! The camera always looks at the origin, where the head model sits. Its
//! position is kept as pitch/yaw/distance so dragging and zooming never drift.

use super::math::Vec3;
use super::ray::Ray;

/// Camera start position
pub const START_POSITION: Vec3 = Vec3::new(1.1, 1.1, 1.1);
/// Vertical field of view in degrees
pub const DEFAULT_FOV: f32 = 75.0;
/// Near plane; anything closer is not drawn
pub const NEAR: f32 = 0.1;

const PITCH_LIMIT: f32 = std::f32::consts::FRAC_PI_2 - 0.01;

/// Perspective camera orbiting the origin
#[derive(Clone, Debug)]
pub struct OrbitCamera {
    pub rotation_x: f32, // Pitch
    pub rotation_y: f32, // Yaw
    pub distance: f32,
    /// Vertical field of view, degrees
    pub fov: f32,
    /// Zoom-in stops once closer than this
    pub min_distance: f32,
    /// Zoom-out stops once farther than this
    pub max_distance: f32,

    // Computed
    pub position: Vec3,
    pub basis_x: Vec3, // Right
    pub basis_y: Vec3, // Up
    pub basis_z: Vec3, // Forward
}

impl OrbitCamera {
    pub fn new() -> Self {
        Self::from_position(START_POSITION)
    }

    /// Place the camera at `position`, looking at the origin
    pub fn from_position(position: Vec3) -> Self {
        let distance = position.len().max(NEAR);
        let mut cam = Self {
            rotation_x: (position.y / distance).clamp(-1.0, 1.0).asin().clamp(-PITCH_LIMIT, PITCH_LIMIT),
            rotation_y: position.x.atan2(position.z),
            distance,
            fov: DEFAULT_FOV,
            min_distance: 1.2,
            max_distance: 5.0,
            position,
            basis_x: Vec3::new(1.0, 0.0, 0.0),
            basis_y: Vec3::UP,
            basis_z: Vec3::new(0.0, 0.0, -1.0),
        };
        cam.update_basis();
        cam
    }

    pub fn update_basis(&mut self) {
        let (sp, cp) = self.rotation_x.sin_cos();
        let (sy, cy) = self.rotation_y.sin_cos();
        self.position = Vec3::new(cp * sy, sp, cp * cy) * self.distance;

        self.basis_z = (-self.position).normalize();
        self.basis_x = self.basis_z.cross(Vec3::UP).normalize();
        self.basis_y = self.basis_x.cross(self.basis_z);
    }

    /// Orbit by a pointer drag of (`dx`, `dy`) pixels
    pub fn rotate(&mut self, dx: f32, dy: f32, sensitivity: f32) {
        self.rotation_y -= dx * sensitivity;
        self.rotation_x = (self.rotation_x + dy * sensitivity).clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.update_basis();
    }

    /// Radial zoom by one wheel delta. Scales the distance by `2^(dy/400)`
    /// unless already inside the near bound zooming in or past the far bound
    /// zooming out. Returns whether the camera moved.
    pub fn zoom(&mut self, dy: f32) -> bool {
        if !dy.is_finite() || dy == 0.0 {
            return false;
        }
        if (self.distance < self.min_distance && dy < 0.0) || (self.distance > self.max_distance && dy > 0.0) {
            return false;
        }
        self.distance *= 2f32.powf(dy / 400.0);
        self.update_basis();
        true
    }

    fn half_height(&self) -> f32 {
        (self.fov.to_radians() * 0.5).tan()
    }

    /// Ray through the pointer at (`x`, `y`) in a viewport of `width` x `height`
    pub fn screen_to_ray(&self, x: f32, y: f32, width: f32, height: f32) -> Ray {
        let aspect = if height > 0.0 { width / height } else { 1.0 };
        let ndc_x = if width > 0.0 { x / width * 2.0 - 1.0 } else { 0.0 };
        let ndc_y = if height > 0.0 { 1.0 - y / height * 2.0 } else { 0.0 };
        let hh = self.half_height();

        let dir = self.basis_z + self.basis_x * (ndc_x * hh * aspect) + self.basis_y * (ndc_y * hh);
        Ray::new(self.position, dir)
    }

    /// Project a world point to viewport pixels. Returns (x, y, depth) or
    /// `None` when the point is behind the near plane.
    pub fn project(&self, p: Vec3, width: f32, height: f32) -> Option<Vec3> {
        let rel = p - self.position;
        let depth = rel.dot(self.basis_z);
        if depth < NEAR {
            return None;
        }
        let aspect = if height > 0.0 { width / height } else { 1.0 };
        let hh = self.half_height();
        let ndc_x = rel.dot(self.basis_x) / (depth * hh * aspect);
        let ndc_y = rel.dot(self.basis_y) / (depth * hh);
        Some(Vec3::new(
            (ndc_x + 1.0) * 0.5 * width,
            (1.0 - ndc_y) * 0.5 * height,
            depth,
        ))
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new()
    }
}
