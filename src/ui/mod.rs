//! Screen layout and keyboard shortcuts
//!
//! Immediate-mode style: the layout is recomputed from the window size each
//! frame, and hit-testing asks it which surface a point falls on.

pub mod actions;
mod layout;
mod rect;

pub use actions::{create_painter_actions, Action, ActionContext, ActionRegistry, Shortcut};
pub use layout::{ChannelRow, Layout, Surface, HOTBAR_H, HOTBAR_W, ROW_H};
pub use rect::Rect;
