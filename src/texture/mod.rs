//! Skin texture: two stacked 64x64 RGBA layers and the pixel operations on them
//!
//! ## Overview
//!
//! - **LayerStack**: base + overlay buffers, the paint target, compositing
//! - **painter**: texel writes, line strokes and samples
//! - **io**: PNG decode/encode at the file boundary
//!
//! Texel coordinates count rows from the top of the buffer, matching the
//! layout of a skin PNG.

mod io;
mod layer;
mod painter;

pub use io::{decode_png, encode_png, read_png_file, write_png_file, DecodedImage};
pub use layer::{Layer, LayerId, LayerStack, Texel, OVERLAY_SCALE, TEXTURE_SIZE};
pub use painter::{line_texels, paint_line, paint_texel, sample_texel};
