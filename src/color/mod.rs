//! Brush color: representations, the synchronized model, and picker strips

mod convert;
mod gradient;
mod model;

pub use convert::{hsl_to_rgb, parse_hex, rgb_to_hsl, Hsl, Rgb};
pub use gradient::{indicator_x, render_strip, StripImage};
pub use model::{Channel, ColorInput, ColorModel};
