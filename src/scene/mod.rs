//! 3D preview scene: orbit camera, head model, picking rays and a small
//! software rasterizer
//!
//! Everything here is plain math over the layer data. The host uploads the
//! preview framebuffer as a texture each frame.

mod camera;
mod math;
mod model;
mod preview;
mod ray;

pub use camera::{OrbitCamera, DEFAULT_FOV, NEAR, START_POSITION};
pub use math::{Vec2, Vec3};
pub use model::{Hit, Mesh, SkinModel, Triangle};
pub use preview::{render_preview, Framebuffer, PreviewParams, BACKGROUND};
pub use ray::{ray_triangle_intersect, Ray, TriangleHit};
