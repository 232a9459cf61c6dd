//! PNG import and export
//!
//! Decoding happens on the collaborator side, before anything reaches the
//! layer stack. A malformed file comes back as `ImportError` and the current
//! texture is left untouched.

use std::path::Path;

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use tracing::info;

use super::layer::TEXTURE_SIZE;
use crate::error::{ExportError, ImportError};

/// A decoded image as tightly packed RGBA
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

/// Decode PNG (or any format `image` was built with) into RGBA
pub fn decode_png(bytes: &[u8]) -> Result<DecodedImage, ImportError> {
    let img = image::load_from_memory(bytes)?;
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    if width as usize != TEXTURE_SIZE || height as usize != TEXTURE_SIZE {
        info!("imported image is {}x{}, clipping to {}x{}", width, height, TEXTURE_SIZE, TEXTURE_SIZE);
    }
    Ok(DecodedImage {
        width,
        height,
        rgba: rgba.into_raw(),
    })
}

/// Read and decode an image file from disk
pub fn read_png_file(path: &Path) -> Result<DecodedImage, ImportError> {
    let bytes = std::fs::read(path).map_err(|source| ImportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    decode_png(&bytes)
}

/// Encode a square RGBA texture as PNG bytes
pub fn encode_png(rgba: &[u8], size: u32) -> Result<Vec<u8>, ExportError> {
    let mut out = Vec::new();
    PngEncoder::new(&mut out).write_image(rgba, size, size, ExtendedColorType::Rgba8)?;
    Ok(out)
}

/// Write encoded PNG bytes to disk
pub fn write_png_file(path: &Path, png: &[u8]) -> Result<(), ExportError> {
    std::fs::write(path, png).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!("exported skin to {}", path.display());
    Ok(())
}
