//! skinpaint: a pixel painter for cube-mapped skin textures
//!
//! Paint a 64x64 skin either flat in a zoomable 2D view or straight onto the
//! head model in 3D. Two layers (head and the slightly larger overlay shell),
//! a nine-slot hotbar of brush colors, and an HSL/RGB/hex color model that
//! keeps every picker widget in sync.
//!
//! The library is headless. A host feeds [`InputEvent`]s into a
//! [`Dispatcher`], implements [`RenderSync`] to hear what needs redrawing,
//! and carries out the returned [`Effect`]s (file dialogs). The `skinpaint`
//! binary is that host, built on macroquad.

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod color;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod hotbar;
pub mod input;
pub mod mapping;
pub mod render;
pub mod scene;
pub mod session;
pub mod texture;
pub mod ui;

pub use config::PainterConfig;
pub use dispatch::{Dispatcher, Effect};
pub use error::{ConfigError, ExportError, HexParseError, ImportError};
pub use input::InputEvent;
pub use render::{NullSync, RenderSync, WidgetId};
pub use session::Session;
