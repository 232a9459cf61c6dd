//! Render sync: the seam between the painter core and whatever draws it
//!
//! The core never owns a render loop. After a buffer or color mutation it
//! tells the host what went stale and the host redraws on its own schedule.

use crate::color::Channel;
use crate::texture::{LayerId, Texel};

/// Widgets that show color state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetId {
    /// Gradient strip for one channel
    Strip(Channel),
    /// Current color + alpha preview
    Swatch,
    /// Hex text field
    HexField,
    /// Hotbar row (slot colors or selection changed)
    Hotbar,
}

impl WidgetId {
    /// Every widget that mirrors the color model
    pub const COLOR_WIDGETS: [WidgetId; 9] = [
        WidgetId::Strip(Channel::H),
        WidgetId::Strip(Channel::S),
        WidgetId::Strip(Channel::L),
        WidgetId::Strip(Channel::R),
        WidgetId::Strip(Channel::G),
        WidgetId::Strip(Channel::B),
        WidgetId::Strip(Channel::A),
        WidgetId::Swatch,
        WidgetId::HexField,
    ];
}

/// Callbacks the core makes after mutating state
pub trait RenderSync {
    /// A layer's pixels (or visibility) changed
    fn request_redraw(&mut self, layer: LayerId);

    /// A color widget needs repainting
    fn request_widget_repaint(&mut self, widget: WidgetId);

    /// Texel to outline in both views, `None` to clear
    fn highlight_texel(&mut self, _texel: Option<Texel>) {}

    /// Orbit camera moved or zoomed
    fn camera_moved(&mut self) {}
}

/// Sync that drops every notification (headless use)
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSync;

impl RenderSync for NullSync {
    fn request_redraw(&mut self, _layer: LayerId) {}
    fn request_widget_repaint(&mut self, _widget: WidgetId) {}
}
