//! Painter session - everything one open skin needs
//!
//! Owns the color model, both layers, the hotbar, the 2D view, the orbit
//! camera and the input state. The dispatcher is its only writer; every
//! mutation here reports what went stale through [`RenderSync`].

use tracing::{debug, info};

use crate::color::{ColorModel, Rgb};
use crate::config::PainterConfig;
use crate::error::{ExportError, ImportError};
use crate::hotbar::{Hotbar, Swatch};
use crate::input::InputState;
use crate::mapping::{eyedrop_candidates, uv_to_texel, ViewTransform};
use crate::render::{RenderSync, WidgetId};
use crate::scene::{Hit, OrbitCamera, SkinModel};
use crate::texture::{
    decode_png, encode_png, paint_line, paint_texel, sample_texel, LayerId, LayerStack, Texel,
    TEXTURE_SIZE,
};

pub struct Session {
    pub color: ColorModel,
    pub layers: LayerStack,
    pub hotbar: Hotbar,
    pub view: ViewTransform,
    pub camera: OrbitCamera,
    pub model: SkinModel,
    pub input: InputState,
    pub config: PainterConfig,
    hover: Option<Texel>,
    status: Option<String>,
}

impl Session {
    pub fn new(config: PainterConfig) -> Self {
        let color = ColorModel::new(config.start_hsl);
        let mut view = ViewTransform::with_bounds(config.min_zoom, config.max_zoom);
        view.zoom = config.initial_zoom.clamp(view.min_zoom, view.max_zoom);
        view.clamp_pan();

        Self {
            hotbar: Hotbar::new(Swatch::new(color.rgb(), color.alpha())),
            color,
            layers: LayerStack::new(),
            view,
            camera: config.camera(),
            model: config.model(),
            input: InputState::new(),
            config,
            hover: None,
            status: None,
        }
    }

    /// Color and alpha the next stroke uses
    pub fn brush(&self) -> Swatch {
        self.hotbar.current()
    }

    pub fn hover(&self) -> Option<Texel> {
        self.hover
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    // ------------------------------------------------------------------
    // Color
    // ------------------------------------------------------------------

    /// Run an edit against the color model, then copy the result into the
    /// selected hotbar slot so the brush follows the pickers
    pub fn edit_color<F>(&mut self, sync: &mut dyn RenderSync, edit: F) -> bool
    where
        F: FnOnce(&mut ColorModel, &mut dyn RenderSync) -> bool,
    {
        let changed = edit(&mut self.color, sync);
        if changed {
            self.store_brush(sync);
        }
        changed
    }

    /// Take an exact color (eyedropper) into the model and the brush
    pub fn pick_color(&mut self, rgb: Rgb, alpha: u8, sync: &mut dyn RenderSync) {
        self.color.load(rgb, alpha, sync);
        self.store_brush(sync);
    }

    fn store_brush(&mut self, sync: &mut dyn RenderSync) {
        self.hotbar.store(Swatch::new(self.color.rgb(), self.color.alpha()));
        sync.request_widget_repaint(WidgetId::Hotbar);
    }

    /// Make slot `index` the brush and show its color in the pickers
    pub fn select_slot(&mut self, index: usize, sync: &mut dyn RenderSync) -> bool {
        if !self.hotbar.select(index) {
            return false;
        }
        self.load_slot(sync);
        true
    }

    /// Cycle the selected slot by one wheel delta
    pub fn scroll_hotbar(&mut self, dy: f32, sync: &mut dyn RenderSync) -> usize {
        let before = self.hotbar.selected();
        let after = self.hotbar.scroll(dy);
        if after != before {
            self.load_slot(sync);
        }
        after
    }

    fn load_slot(&mut self, sync: &mut dyn RenderSync) {
        let swatch = self.hotbar.current();
        self.color.load(swatch.rgb, swatch.alpha, sync);
        sync.request_widget_repaint(WidgetId::Hotbar);
        debug!("hotbar slot {} selected", self.hotbar.selected() + 1);
    }

    // ------------------------------------------------------------------
    // Painting
    // ------------------------------------------------------------------

    /// Paint one texel of the active layer with the brush
    pub fn paint_at(&mut self, texel: Texel, sync: &mut dyn RenderSync) -> bool {
        let brush = self.brush();
        let target = self.layers.active();
        let written = paint_texel(self.layers.layer_mut(target), texel, brush.rgb, brush.alpha);
        if written {
            sync.request_redraw(target);
        }
        sync.highlight_texel(Some(texel));
        written
    }

    /// Paint a stroke segment on the active layer. Returns texels written.
    pub fn paint_stroke(&mut self, from: Texel, to: Texel, sync: &mut dyn RenderSync) -> usize {
        let brush = self.brush();
        let target = self.layers.active();
        let written = paint_line(self.layers.layer_mut(target), from, to, brush.rgb, brush.alpha);
        if written > 0 {
            sync.request_redraw(target);
        }
        sync.highlight_texel(Some(to));
        written
    }

    /// 2D eyedrop: takes whatever the visible composite shows, transparent
    /// texels included. Out-of-range texels are ignored.
    pub fn eyedrop_2d(&mut self, texel: Texel, sync: &mut dyn RenderSync) -> bool {
        let Some([r, g, b, a]) = self.layers.composite_texel(texel) else {
            return false;
        };
        self.pick_color(Rgb::new(r, g, b), a, sync);
        sync.highlight_texel(Some(texel));
        true
    }

    /// 3D eyedrop over a ray's intersections. Probes candidates in
    /// precedence order on the active layer; a fully transparent sample
    /// falls through to the next. No opaque sample leaves the color alone.
    pub fn eyedrop_3d(&mut self, hits: &[Hit], sync: &mut dyn RenderSync) -> bool {
        let overlay_visible = self.layers.overlay_visible();
        let layer = self.layers.layer(self.layers.active());

        let picked = eyedrop_candidates(hits, overlay_visible, self.input.shift)
            .into_iter()
            .map(|hit| uv_to_texel(hit.uv))
            .find_map(|texel| match sample_texel(layer, texel) {
                Some((rgb, alpha)) if alpha > 0 => Some((texel, rgb, alpha)),
                _ => None,
            });

        match picked {
            Some((texel, rgb, alpha)) => {
                self.pick_color(rgb, alpha, sync);
                sync.highlight_texel(Some(texel));
                true
            }
            None => false,
        }
    }

    // ------------------------------------------------------------------
    // Layers and view
    // ------------------------------------------------------------------

    pub fn toggle_overlay(&mut self, sync: &mut dyn RenderSync) -> bool {
        let visible = self.layers.toggle_overlay();
        sync.request_redraw(LayerId::Overlay);
        self.set_status(if visible { "Overlay shown" } else { "Overlay hidden" });
        visible
    }

    /// Switch the paint target to the other layer
    pub fn toggle_active_layer(&mut self, sync: &mut dyn RenderSync) -> LayerId {
        let target = self.layers.active().other();
        self.layers.set_active(target);
        sync.request_redraw(target);
        self.set_status(format!("Painting on {}", target.label()));
        target
    }

    /// Update the texel outlined under the pointer
    pub fn set_hover(&mut self, texel: Option<Texel>, sync: &mut dyn RenderSync) {
        if self.hover != texel {
            self.hover = texel;
            sync.highlight_texel(texel);
        }
    }

    pub fn orbit(&mut self, dx: f32, dy: f32, sync: &mut dyn RenderSync) {
        if dx == 0.0 && dy == 0.0 {
            return;
        }
        self.camera.rotate(dx, dy, self.config.orbit_sensitivity);
        sync.camera_moved();
    }

    pub fn zoom_camera(&mut self, dy: f32, sync: &mut dyn RenderSync) -> bool {
        let moved = self.camera.zoom(dy);
        if moved {
            sync.camera_moved();
        }
        moved
    }

    /// Back to 1x with no pan, camera back where it started
    pub fn reset_view(&mut self, sync: &mut dyn RenderSync) {
        self.view.reset();
        self.camera = self.config.camera();
        sync.request_redraw(self.layers.active());
        sync.camera_moved();
        debug!("view reset");
    }

    // ------------------------------------------------------------------
    // Import / export
    // ------------------------------------------------------------------

    /// Replace the texture with decoded RGBA pixels
    pub fn import_rgba(
        &mut self,
        rgba: &[u8],
        width: u32,
        height: u32,
        sync: &mut dyn RenderSync,
    ) -> Result<(), ImportError> {
        self.layers.replace_from_rgba(rgba, width, height)?;
        sync.request_redraw(LayerId::Base);
        sync.request_redraw(LayerId::Overlay);
        info!("imported {}x{} image", width, height);
        self.set_status("Skin imported");
        Ok(())
    }

    /// Decode PNG bytes and import them. A bad file leaves the texture alone.
    pub fn import_png(&mut self, bytes: &[u8], sync: &mut dyn RenderSync) -> Result<(), ImportError> {
        let image = decode_png(bytes)?;
        self.import_rgba(&image.rgba, image.width, image.height, sync)
    }

    /// Encode both layers, visible or not, as a 64x64 PNG
    pub fn export_png(&self) -> Result<Vec<u8>, ExportError> {
        encode_png(&self.layers.composite(false), TEXTURE_SIZE as u32)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(PainterConfig::default())
    }
}
