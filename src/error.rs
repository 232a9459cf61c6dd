//! Error types for the file and codec edges of the painter
//!
//! Interaction input never produces these; bad pointer or color input is
//! clamped or ignored. They only come out of import, export and config I/O.

use std::path::PathBuf;
use thiserror::Error;

/// Hex text that could not be read as a color
#[derive(Debug, Error)]
pub enum HexParseError {
    #[error("expected 6 or 8 hex digits, got {0}")]
    Length(usize),
    #[error("invalid hex digits in {0:?}")]
    InvalidDigit(String),
    #[error(transparent)]
    Int(#[from] std::num::ParseIntError),
}

/// Failure while bringing an external image into the painter
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
    #[error("rgba buffer of {len} bytes does not match {width}x{height}")]
    BufferSize { width: u32, height: u32, len: usize },
}

/// Failure while encoding or writing the composited texture
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to encode png: {0}")]
    Encode(#[from] image::ImageError),
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failure while loading or saving `config.ron`
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("config serialize error: {0}")]
    Serialize(#[from] ron::Error),
}
