//! Interaction dispatcher - the painter's state machine
//!
//! Every input event comes through [`Dispatcher::handle`]. The event is
//! routed to a surface (the one under the pointer, or the one that owns the
//! drag in progress), then looked up in the route table. Handlers mutate the
//! session and report through `RenderSync`; anything the host has to do
//! itself (file dialogs) comes back as an [`Effect`].
//!
//! Modes: `Idle` -> `PickingChannel | Drawing2D | Painting3D |
//! OrbitingCamera` on pointer down, back to `Idle` on any pointer up.

mod handlers;
mod table;

pub use handlers::{run_action, Target};
pub use table::{captured_surface, lookup, EventKind, SurfaceKind, ROUTES};

use tracing::trace;

use crate::config::PainterConfig;
use crate::input::InputEvent;
use crate::render::RenderSync;
use crate::session::Session;
use crate::texture::{Texel, TEXTURE_SIZE};
use crate::ui::{create_painter_actions, ActionContext, ActionRegistry, Layout, Surface};

/// Work the host has to do on the core's behalf
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Encode the skin and hand it to the user (save dialog, download)
    Export,
    /// Ask the user for a skin to load
    Import,
}

pub struct Dispatcher {
    pub session: Session,
    layout: Layout,
    actions: ActionRegistry,
    /// A text field has keyboard focus
    text_editing: bool,
}

impl Dispatcher {
    /// Window size the layout starts with before the host reports one
    pub const DEFAULT_SIZE: (f32, f32) = (1280.0, 720.0);

    pub fn new(config: PainterConfig) -> Self {
        let (w, h) = Self::DEFAULT_SIZE;
        let layout = Layout::compute(w, h, config.strip_width);
        Self {
            session: Session::new(config),
            layout,
            actions: create_painter_actions(),
            text_editing: false,
        }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn actions(&self) -> &ActionRegistry {
        &self.actions
    }

    /// Recompute the layout for a new window size
    pub fn resize(&mut self, width: f32, height: f32) {
        if width != self.layout.screen.w || height != self.layout.screen.h {
            self.layout = Layout::compute(width, height, self.session.config.strip_width);
        }
    }

    /// Shortcuts are ignored while a text field is being edited
    pub fn set_text_editing(&mut self, editing: bool) {
        self.text_editing = editing;
    }

    pub fn action_context(&self) -> ActionContext {
        ActionContext { text_editing: self.text_editing }
    }

    /// Feed one event through the state machine
    pub fn handle(&mut self, event: &InputEvent, sync: &mut dyn RenderSync) -> Vec<Effect> {
        self.track_modifiers(event);

        let surface = self.route(event);
        let kind = EventKind::of(event);
        let surface_kind = match event {
            InputEvent::KeyDown { .. } | InputEvent::KeyUp { .. } => SurfaceKind::Keyboard,
            _ => SurfaceKind::of(surface),
        };

        let mut effects = Vec::new();
        match lookup(surface_kind, kind) {
            Some(handler) => {
                let target = Target { surface, event };
                effects.extend(handler(self, &target, sync));
            }
            None => trace!("unrouted {:?} on {:?}", kind, surface_kind),
        }

        if let Some(pos) = event.position() {
            self.session.input.last_pos = Some(pos);
        }
        effects
    }

    /// Surface an event belongs to: text goes to its field, a drag in
    /// progress keeps its surface, everything else is hit-tested
    fn route(&self, event: &InputEvent) -> Option<Surface> {
        match event {
            InputEvent::Text { field, .. } => Some(Surface::Field(*field)),
            InputEvent::PointerMove { x, y, .. } => {
                captured_surface(self.session.input.mode).or_else(|| self.layout.surface_at(*x, *y))
            }
            _ => {
                let (x, y) = event.position()?;
                self.layout.surface_at(x, y)
            }
        }
    }

    fn track_modifiers(&mut self, event: &InputEvent) {
        let mods = match event {
            InputEvent::PointerDown { mods, .. }
            | InputEvent::PointerMove { mods, .. }
            | InputEvent::Wheel { mods, .. } => *mods,
            _ => return,
        };
        self.session.input.shift = mods.shift;
        self.session.input.ctrl = mods.ctrl;
    }

    /// Recompute the hover texel at the last pointer position (after Shift
    /// or overlay visibility changes which intersection counts)
    fn refresh_hover(&mut self, sync: &mut dyn RenderSync) {
        let Some((x, y)) = self.session.input.last_pos else {
            return;
        };
        let hover = match self.layout.surface_at(x, y) {
            Some(Surface::View3D) => handlers::model_hover(self, x, y),
            Some(Surface::View2D) => {
                Some(handlers::canvas_texel(self, x, y)).filter(|t: &Texel| t.in_bounds(TEXTURE_SIZE))
            }
            _ => None,
        };
        self.session.set_hover(hover, sync);
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(PainterConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{Channel, Rgb};
    use crate::input::{InteractionMode, Key, Modifiers, PointerButton, TextField};
    use crate::mapping::{cast, uv_to_texel};
    use crate::render::testing::RecordingSync;
    use crate::render::NullSync;
    use crate::texture::LayerId;
    use crate::ui::Rect;

    fn down(x: f32, y: f32, button: PointerButton) -> InputEvent {
        InputEvent::PointerDown { x, y, button, mods: Modifiers::NONE }
    }

    fn moved(x: f32, y: f32) -> InputEvent {
        InputEvent::PointerMove { x, y, mods: Modifiers::NONE }
    }

    fn up(x: f32, y: f32) -> InputEvent {
        InputEvent::PointerUp { x, y, button: PointerButton::Primary }
    }

    fn key(key: Key, mods: Modifiers) -> InputEvent {
        InputEvent::KeyDown { key, mods }
    }

    /// Window point at the center of texel (x, y) in the unzoomed 2D view
    fn canvas_point(d: &Dispatcher, x: i32, y: i32) -> (f32, f32) {
        let r = d.layout().view2d;
        let size = r.w / TEXTURE_SIZE as f32;
        (r.x + (x as f32 + 0.5) * size, r.y + (y as f32 + 0.5) * size)
    }

    fn center(r: Rect) -> (f32, f32) {
        (r.x + r.w * 0.5, r.y + r.h * 0.5)
    }

    /// First point in the 3D view whose ray crosses the overlay shell and
    /// then the head
    fn model_point(d: &Dispatcher) -> (f32, f32) {
        let r = d.layout().view3d;
        let s = &d.session;
        let mut y = r.y + 3.5;
        while y < r.bottom() {
            let mut x = r.x + 3.5;
            while x < r.right() {
                let hits = cast(&s.camera, &s.model, x - r.x, y - r.y, r.w, r.h);
                if hits.len() >= 2 && hits[0].mesh == LayerId::Overlay && hits[1].mesh == LayerId::Base {
                    return (x, y);
                }
                x += 7.0;
            }
            y += 7.0;
        }
        panic!("model not visible in the 3D view");
    }

    fn model_hits(d: &Dispatcher, (x, y): (f32, f32)) -> Vec<crate::scene::Hit> {
        let r = d.layout().view3d;
        cast(&d.session.camera, &d.session.model, x - r.x, y - r.y, r.w, r.h)
    }

    #[test]
    fn test_strip_drag_clamps_outside_strip() {
        let mut d = Dispatcher::default();
        let strip = d.layout().row(Channel::R).strip;
        let (cx, cy) = center(strip);

        d.handle(&down(cx, cy, PointerButton::Primary), &mut NullSync);
        assert_eq!(d.session.input.mode, InteractionMode::PickingChannel(Channel::R));

        // Far past the right end, over a different surface entirely
        d.handle(&moved(strip.right() + 500.0, cy + 200.0), &mut NullSync);
        assert_eq!(d.session.color.rgb().r, 255);
        d.handle(&moved(strip.x - 50.0, cy), &mut NullSync);
        assert_eq!(d.session.color.rgb().r, 0);
        assert_eq!(d.session.brush().rgb.r, 0);

        d.handle(&up(0.0, 0.0), &mut NullSync);
        assert_eq!(d.session.input.mode, InteractionMode::Idle);
    }

    #[test]
    fn test_canvas_line_has_no_gaps() {
        let mut d = Dispatcher::default();
        let (x0, y0) = canvas_point(&d, 0, 0);
        let (x5, y5) = canvas_point(&d, 5, 0);

        d.handle(&down(x0, y0, PointerButton::Primary), &mut NullSync);
        assert_eq!(d.session.input.mode, InteractionMode::Drawing2D);
        d.handle(&moved(x5, y5), &mut NullSync);
        d.handle(&up(x5, y5), &mut NullSync);

        let base = d.session.layers.layer(LayerId::Base);
        for x in 0..=5 {
            assert_eq!(base.get(Texel::new(x, 0)), Some([255, 0, 0, 255]), "texel {}", x);
        }
        assert_eq!(base.get(Texel::new(6, 0)), Some([0, 0, 0, 0]));
        assert_eq!(d.session.input.last_texel, None);
    }

    #[test]
    fn test_secondary_button_paints() {
        let mut d = Dispatcher::default();
        let (x, y) = canvas_point(&d, 7, 9);
        d.handle(&down(x, y, PointerButton::Secondary), &mut NullSync);
        assert_eq!(
            d.session.layers.layer(LayerId::Base).get(Texel::new(7, 9)),
            Some([255, 0, 0, 255])
        );
    }

    #[test]
    fn test_canvas_middle_button_eyedrops_composite() {
        let mut d = Dispatcher::default();
        d.session.layers.layer_mut(LayerId::Base).set(Texel::new(3, 3), [9, 8, 7, 255]);
        let (x, y) = canvas_point(&d, 3, 3);
        d.handle(&down(x, y, PointerButton::Middle), &mut NullSync);
        assert_eq!(d.session.color.rgb(), Rgb::new(9, 8, 7));
        assert_eq!(d.session.layers.layer(LayerId::Base).get(Texel::new(3, 3)), Some([9, 8, 7, 255]));
    }

    #[test]
    fn test_ctrl_wheel_zooms_canvas_at_pointer() {
        let mut d = Dispatcher::default();
        let (x, y) = canvas_point(&d, 40, 20);
        let zoom_in = InputEvent::Wheel { x, y, dy: -100.0, mods: Modifiers::CTRL };

        d.handle(&zoom_in, &mut NullSync);
        assert_eq!(d.session.view.zoom, 2.0);
        assert_eq!(d.session.hotbar.selected(), 0);
        let r = d.layout().view2d;
        let (lx, ly) = r.local(x, y);
        assert_eq!(d.session.view.texel_at(lx, ly, r.w, r.h), Texel::new(40, 20));

        let zoom_out = InputEvent::Wheel { x, y, dy: 100.0, mods: Modifiers::CTRL };
        d.handle(&zoom_out, &mut NullSync);
        assert_eq!(d.session.view.zoom, 1.0);
    }

    #[test]
    fn test_wheel_cycles_hotbar_anywhere() {
        let mut d = Dispatcher::default();
        let mut sync = RecordingSync::default();
        let (x, y) = canvas_point(&d, 10, 10);
        d.handle(&InputEvent::Wheel { x, y, dy: -3.0, mods: Modifiers::NONE }, &mut sync);
        assert_eq!(d.session.hotbar.selected(), 8);
        assert_eq!(d.session.view.zoom, 1.0);
        d.handle(&InputEvent::Wheel { x: 0.0, y: 0.0, dy: 3.0, mods: Modifiers::NONE }, &mut sync);
        assert_eq!(d.session.hotbar.selected(), 0);
        assert_eq!(d.session.color.hex(), "ff0000");
    }

    #[test]
    fn test_hotbar_click_selects_slot() {
        let mut d = Dispatcher::default();
        let bar = d.layout().hotbar;
        // Slot 3 spans art units 61..81
        let x = bar.x + bar.w * (71.0 / 184.0);
        d.handle(&down(x, bar.y + bar.h * 0.5, PointerButton::Primary), &mut NullSync);
        assert_eq!(d.session.hotbar.selected(), 3);
        assert_eq!(d.session.color.hex(), "ffaa00");
    }

    #[test]
    fn test_nudge_arrows() {
        let mut d = Dispatcher::default();
        let (x, y) = center(d.layout().row(Channel::G).up);
        d.handle(&down(x, y, PointerButton::Primary), &mut NullSync);
        assert_eq!(d.session.color.rgb(), Rgb::new(255, 1, 0));
        let (x, y) = center(d.layout().row(Channel::R).down);
        d.handle(&down(x, y, PointerButton::Primary), &mut NullSync);
        assert_eq!(d.session.color.rgb(), Rgb::new(254, 1, 0));
    }

    #[test]
    fn test_text_fields() {
        let mut d = Dispatcher::default();
        let field = TextField::Channel(Channel::H);
        d.handle(&InputEvent::Text { field, text: " 120 ".into() }, &mut NullSync);
        assert_eq!(d.session.color.hex(), "00ff00");

        d.handle(&InputEvent::Text { field, text: "abc".into() }, &mut NullSync);
        assert_eq!(d.session.color.hex(), "00ff00");

        d.handle(&InputEvent::Text { field: TextField::Hex, text: "#0000FF80".into() }, &mut NullSync);
        assert_eq!(d.session.color.hex(), "0000ff");
        assert_eq!(d.session.color.alpha(), 0x80);
        assert_eq!(d.session.brush().alpha, 0x80);
    }

    #[test]
    fn test_keyboard_actions() {
        let mut d = Dispatcher::default();
        let mut sync = RecordingSync::default();

        assert_eq!(d.handle(&key(Key::Char('S'), Modifiers::CTRL), &mut sync), vec![Effect::Export]);
        assert_eq!(d.handle(&key(Key::Char('O'), Modifiers::CTRL), &mut sync), vec![Effect::Import]);

        assert!(d.handle(&key(Key::Tab, Modifiers::NONE), &mut sync).is_empty());
        assert!(!d.session.layers.overlay_visible());
        assert!(sync.redraws.contains(&LayerId::Overlay));

        d.handle(&key(Key::Char('L'), Modifiers::NONE), &mut sync);
        assert_eq!(d.session.layers.active(), LayerId::Overlay);

        d.handle(&key(Key::Digit(5), Modifiers::NONE), &mut sync);
        assert_eq!(d.session.hotbar.selected(), 4);

        d.session.view.zoom = 4.0;
        d.handle(&key(Key::Char('R'), Modifiers::NONE), &mut sync);
        assert_eq!(d.session.view.zoom, 1.0);
        assert_eq!(sync.camera_moves, 1);
    }

    #[test]
    fn test_shortcuts_blocked_while_typing() {
        let mut d = Dispatcher::default();
        d.set_text_editing(true);
        assert!(d.handle(&key(Key::Char('S'), Modifiers::CTRL), &mut NullSync).is_empty());
        d.handle(&key(Key::Tab, Modifiers::NONE), &mut NullSync);
        assert!(d.session.layers.overlay_visible());
    }

    #[test]
    fn test_shift_key_tracks_state() {
        let mut d = Dispatcher::default();
        d.handle(&key(Key::Shift, Modifiers::SHIFT), &mut NullSync);
        assert!(d.session.input.shift);
        d.handle(&InputEvent::KeyUp { key: Key::Shift, mods: Modifiers::NONE }, &mut NullSync);
        assert!(!d.session.input.shift);
    }

    #[test]
    fn test_model_miss_orbits_and_release_idles() {
        let mut d = Dispatcher::default();
        let r = d.layout().view3d;
        let corner = (r.x + 2.0, r.y + 2.0);
        assert!(model_hits(&d, corner).is_empty());

        let mut sync = RecordingSync::default();
        d.handle(&down(corner.0, corner.1, PointerButton::Primary), &mut sync);
        assert_eq!(d.session.input.mode, InteractionMode::OrbitingCamera);

        let yaw = d.session.camera.rotation_y;
        d.handle(&moved(corner.0 + 30.0, corner.1), &mut sync);
        assert!(d.session.camera.rotation_y != yaw);
        assert_eq!(sync.camera_moves, 1);

        d.handle(&up(corner.0 + 30.0, corner.1), &mut sync);
        assert_eq!(d.session.input.mode, InteractionMode::Idle);
    }

    #[test]
    fn test_middle_orbit_does_not_rotate() {
        let mut d = Dispatcher::default();
        let r = d.layout().view3d;
        let corner = (r.x + 2.0, r.y + 2.0);
        d.handle(&down(corner.0, corner.1, PointerButton::Middle), &mut NullSync);
        assert_eq!(d.session.input.mode, InteractionMode::OrbitingCamera);
        let yaw = d.session.camera.rotation_y;
        d.handle(&moved(corner.0 + 30.0, corner.1), &mut NullSync);
        assert_eq!(d.session.camera.rotation_y, yaw);
    }

    #[test]
    fn test_ctrl_press_on_model_orbits() {
        let mut d = Dispatcher::default();
        let (x, y) = model_point(&d);
        let press = InputEvent::PointerDown { x, y, button: PointerButton::Primary, mods: Modifiers::CTRL };
        d.handle(&press, &mut NullSync);
        assert_eq!(d.session.input.mode, InteractionMode::OrbitingCamera);
        assert_eq!(d.session.layers.composite(false), vec![0; TEXTURE_SIZE * TEXTURE_SIZE * 4]);
    }

    #[test]
    fn test_model_press_paints_nearest_hit() {
        let mut d = Dispatcher::default();
        let point = model_point(&d);
        let hits = model_hits(&d, point);
        let texel = uv_to_texel(hits[0].uv);

        d.handle(&down(point.0, point.1, PointerButton::Primary), &mut NullSync);
        assert_eq!(d.session.input.mode, InteractionMode::Painting3D);
        assert_eq!(d.session.layers.layer(LayerId::Base).get(texel), Some([255, 0, 0, 255]));
        // The overlay region of the skin starts at u = 32
        assert!(texel.x >= 32);
    }

    #[test]
    fn test_model_press_with_shift_paints_head() {
        let mut d = Dispatcher::default();
        let point = model_point(&d);
        let hits = model_hits(&d, point);
        let texel = uv_to_texel(hits[1].uv);

        let press = InputEvent::PointerDown { x: point.0, y: point.1, button: PointerButton::Primary, mods: Modifiers::SHIFT };
        d.handle(&press, &mut NullSync);
        assert_eq!(d.session.layers.layer(LayerId::Base).get(texel), Some([255, 0, 0, 255]));
        assert!(texel.x < 32);
    }

    #[test]
    fn test_model_eyedrop_falls_through_transparent_overlay() {
        let mut d = Dispatcher::default();
        let point = model_point(&d);
        let hits = model_hits(&d, point);
        let head = uv_to_texel(hits[1].uv);
        d.session.layers.layer_mut(LayerId::Base).set(head, [12, 34, 56, 255]);

        d.handle(&down(point.0, point.1, PointerButton::Middle), &mut NullSync);
        assert_eq!(d.session.input.mode, InteractionMode::Painting3D);
        assert_eq!(d.session.color.rgb(), Rgb::new(12, 34, 56));
        assert_eq!(d.session.brush().rgb, Rgb::new(12, 34, 56));
    }

    #[test]
    fn test_ctrl_wheel_zooms_camera() {
        let mut d = Dispatcher::default();
        let (x, y) = center(d.layout().view3d);
        let before = d.session.camera.distance;
        let mut sync = RecordingSync::default();
        d.handle(&InputEvent::Wheel { x, y, dy: 400.0, mods: Modifiers::CTRL }, &mut sync);
        assert!((d.session.camera.distance - before * 2.0).abs() < 1e-4);
        assert_eq!(sync.camera_moves, 1);
        assert_eq!(d.session.hotbar.selected(), 0);
    }

    #[test]
    fn test_hover_follows_pointer() {
        let mut d = Dispatcher::default();
        let mut sync = RecordingSync::default();
        let (x, y) = canvas_point(&d, 12, 34);
        d.handle(&moved(x, y), &mut sync);
        assert_eq!(d.session.hover(), Some(Texel::new(12, 34)));
        d.handle(&moved(1.0, 1.0), &mut sync);
        assert_eq!(d.session.hover(), None);
        assert_eq!(sync.highlights, vec![Some(Texel::new(12, 34)), None]);
    }

    #[test]
    fn test_pointer_up_always_idles() {
        let mut d = Dispatcher::default();
        d.handle(&up(0.0, 0.0), &mut NullSync);
        assert_eq!(d.session.input.mode, InteractionMode::Idle);

        let (x, y) = center(d.layout().row(Channel::H).strip);
        d.handle(&down(x, y, PointerButton::Primary), &mut NullSync);
        let bar = d.layout().hotbar;
        d.handle(&up(bar.x + 5.0, bar.y + 5.0), &mut NullSync);
        assert_eq!(d.session.input.mode, InteractionMode::Idle);
        assert_eq!(d.session.input.picking_channel(), None);
    }
}
