//! Dirty tracking between the painter core and the macroquad frame loop

use std::collections::HashSet;

use skinpaint::texture::{LayerId, Texel};
use skinpaint::{RenderSync, WidgetId};

/// Collects what the core reported stale since the last frame
pub struct MacroquadSync {
    /// 2D canvas texture needs re-uploading
    pub canvas_dirty: bool,
    /// 3D preview needs re-rasterizing
    pub preview_dirty: bool,
    widgets_dirty: HashSet<WidgetId>,
    pub highlight: Option<Texel>,
}

impl MacroquadSync {
    /// Everything starts dirty so the first frame builds every texture
    pub fn new() -> Self {
        let mut widgets_dirty: HashSet<WidgetId> = WidgetId::COLOR_WIDGETS.into_iter().collect();
        widgets_dirty.insert(WidgetId::Hotbar);
        Self {
            canvas_dirty: true,
            preview_dirty: true,
            widgets_dirty,
            highlight: None,
        }
    }

    /// Check and clear one widget's dirty flag
    pub fn take_widget(&mut self, widget: WidgetId) -> bool {
        self.widgets_dirty.remove(&widget)
    }

    /// Force a full rebuild (window resized)
    pub fn invalidate_all(&mut self) {
        *self = Self { highlight: self.highlight, ..Self::new() };
    }
}

impl RenderSync for MacroquadSync {
    fn request_redraw(&mut self, _layer: LayerId) {
        // Both views show the composite, so any layer change touches both
        self.canvas_dirty = true;
        self.preview_dirty = true;
    }

    fn request_widget_repaint(&mut self, widget: WidgetId) {
        self.widgets_dirty.insert(widget);
    }

    fn highlight_texel(&mut self, texel: Option<Texel>) {
        if self.highlight != texel {
            self.highlight = texel;
            self.preview_dirty = true;
        }
    }

    fn camera_moved(&mut self) {
        self.preview_dirty = true;
    }
}
