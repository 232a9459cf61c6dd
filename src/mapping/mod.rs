//! Coordinate mapping from pointer positions to texels
//!
//! - **view**: the flat 2D canvas (zoom + pan)
//! - **surface**: the 3D model (ray intersection + UV lookup)

mod surface;
mod view;

pub use surface::{cast, eyedrop_candidates, resolve_paint_hit, uv_to_texel};
pub use view::{ViewTransform, MAX_ZOOM, MIN_ZOOM};
