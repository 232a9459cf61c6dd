//! Event handlers, one per route table row

use tracing::{debug, warn};

use super::{Dispatcher, Effect};
use crate::color::{Channel, ColorInput};
use crate::hotbar::slot_at_offset;
use crate::input::{InputEvent, InteractionMode, Key, PointerButton, TextField};
use crate::mapping::{cast, resolve_paint_hit, uv_to_texel};
use crate::render::RenderSync;
use crate::scene::Hit;
use crate::texture::{Texel, TEXTURE_SIZE};
use crate::ui::{actions, Surface};

/// The event being handled and the surface it was routed to
pub struct Target<'a> {
    pub surface: Option<Surface>,
    pub event: &'a InputEvent,
}

impl Target<'_> {
    fn pos(&self) -> (f32, f32) {
        self.event.position().unwrap_or((0.0, 0.0))
    }
}

pub type Handler = fn(&mut Dispatcher, &Target, &mut dyn RenderSync) -> Option<Effect>;

// ----------------------------------------------------------------------
// Picker strips and fields
// ----------------------------------------------------------------------

fn pick_strip(d: &mut Dispatcher, channel: Channel, x: f32, sync: &mut dyn RenderSync) {
    let strip = d.layout.row(channel).strip;
    d.session
        .edit_color(sync, |color, sync| color.pick_from_offset(channel, x - strip.x, strip.w, sync));
}

pub fn strip_down(d: &mut Dispatcher, t: &Target, sync: &mut dyn RenderSync) -> Option<Effect> {
    let (Some(Surface::Strip(channel)), InputEvent::PointerDown { x, button, .. }) = (t.surface, t.event) else {
        return None;
    };
    d.session.input.begin(InteractionMode::PickingChannel(channel), *button);
    pick_strip(d, channel, *x, sync);
    None
}

/// Dragging a strip keeps picking from the pointer x, clamped to the strip,
/// even after the pointer leaves it
pub fn strip_drag(d: &mut Dispatcher, t: &Target, sync: &mut dyn RenderSync) -> Option<Effect> {
    let channel = d.session.input.picking_channel()?;
    let (x, _) = t.pos();
    pick_strip(d, channel, x, sync);
    None
}

pub fn nudge(d: &mut Dispatcher, t: &Target, sync: &mut dyn RenderSync) -> Option<Effect> {
    let (channel, delta) = match t.surface {
        Some(Surface::NudgeUp(c)) => (c, 1),
        Some(Surface::NudgeDown(c)) => (c, -1),
        _ => return None,
    };
    d.session.edit_color(sync, |color, sync| color.nudge(channel, delta, sync));
    None
}

pub fn text_commit(d: &mut Dispatcher, t: &Target, sync: &mut dyn RenderSync) -> Option<Effect> {
    let InputEvent::Text { field, text } = t.event else {
        return None;
    };
    match *field {
        TextField::Channel(channel) => match text.trim().parse::<f32>() {
            Ok(value) => {
                d.session.edit_color(sync, |color, sync| color.set_channel(channel, value, sync));
            }
            Err(e) => warn!("ignoring {} input {:?}: {}", channel.label(), text, e),
        },
        TextField::Hex => {
            let text = text.trim().to_string();
            d.session.edit_color(sync, |color, sync| color.set_color(ColorInput::Hex(text), sync));
        }
    }
    None
}

// ----------------------------------------------------------------------
// 2D canvas
// ----------------------------------------------------------------------

pub(super) fn canvas_texel(d: &Dispatcher, x: f32, y: f32) -> Texel {
    let rect = d.layout.view2d;
    let (lx, ly) = rect.local(x, y);
    d.session.view.texel_at(lx, ly, rect.w, rect.h)
}

fn canvas_apply(d: &mut Dispatcher, from: Texel, to: Texel, button: PointerButton, sync: &mut dyn RenderSync) {
    if button.is_eyedrop() {
        d.session.eyedrop_2d(to, sync);
    } else if from == to {
        d.session.paint_at(to, sync);
    } else {
        d.session.paint_stroke(from, to, sync);
    }
}

pub fn canvas_down(d: &mut Dispatcher, t: &Target, sync: &mut dyn RenderSync) -> Option<Effect> {
    let InputEvent::PointerDown { x, y, button, .. } = *t.event else {
        return None;
    };
    let texel = canvas_texel(d, x, y);
    d.session.input.begin(InteractionMode::Drawing2D, button);
    d.session.input.last_texel = Some(texel);
    canvas_apply(d, texel, texel, button, sync);
    None
}

/// Continue a stroke from the previous texel, or just track the hover texel
pub fn canvas_move(d: &mut Dispatcher, t: &Target, sync: &mut dyn RenderSync) -> Option<Effect> {
    let (x, y) = t.pos();
    let texel = canvas_texel(d, x, y);

    if d.session.input.drawing() {
        let button = d.session.input.button.unwrap_or(PointerButton::Primary);
        let from = d.session.input.last_texel.unwrap_or(texel);
        canvas_apply(d, from, texel, button, sync);
        d.session.input.last_texel = Some(texel);
    }

    let hover = texel.in_bounds(TEXTURE_SIZE).then_some(texel);
    d.session.set_hover(hover, sync);
    None
}

/// One wheel notch is one zoom step, anchored under the pointer
pub fn canvas_zoom(d: &mut Dispatcher, t: &Target, _sync: &mut dyn RenderSync) -> Option<Effect> {
    let InputEvent::Wheel { x, y, dy, .. } = *t.event else {
        return None;
    };
    if dy == 0.0 || !dy.is_finite() {
        return None;
    }
    let steps = if dy < 0.0 { 1 } else { -1 };
    let rect = d.layout.view2d;
    let (lx, ly) = rect.local(x, y);
    if d.session.view.zoom_at(steps, lx, ly, rect.w, rect.h) {
        debug!("2d zoom {}", d.session.view.zoom);
    }
    None
}

// ----------------------------------------------------------------------
// 3D view
// ----------------------------------------------------------------------

fn model_hits(d: &Dispatcher, x: f32, y: f32) -> Vec<Hit> {
    let rect = d.layout.view3d;
    let (lx, ly) = rect.local(x, y);
    cast(&d.session.camera, &d.session.model, lx, ly, rect.w, rect.h)
}

/// Paint or eyedrop at whatever the pointer hits on the model
fn model_apply(d: &mut Dispatcher, x: f32, y: f32, button: PointerButton, sync: &mut dyn RenderSync) {
    let hits = model_hits(d, x, y);
    if button.is_eyedrop() {
        d.session.eyedrop_3d(&hits, sync);
        return;
    }
    let overlay_visible = d.session.layers.overlay_visible();
    if let Some(hit) = resolve_paint_hit(&hits, overlay_visible, d.session.input.shift) {
        let texel = uv_to_texel(hit.uv);
        d.session.paint_at(texel, sync);
    }
}

/// Texel the pointer would paint, for the hover outline
pub(super) fn model_hover(d: &Dispatcher, x: f32, y: f32) -> Option<Texel> {
    let hits = model_hits(d, x, y);
    resolve_paint_hit(&hits, d.session.layers.overlay_visible(), d.session.input.shift).map(|h| uv_to_texel(h.uv))
}

/// Without Ctrl a press on the model paints; a miss (or Ctrl) grabs the camera
pub fn model_down(d: &mut Dispatcher, t: &Target, sync: &mut dyn RenderSync) -> Option<Effect> {
    let InputEvent::PointerDown { x, y, button, mods } = *t.event else {
        return None;
    };
    if !mods.ctrl && !model_hits(d, x, y).is_empty() {
        d.session.input.begin(InteractionMode::Painting3D, button);
        model_apply(d, x, y, button, sync);
    } else {
        d.session.input.begin(InteractionMode::OrbitingCamera, button);
    }
    debug!("3d press -> {}", d.session.input.mode.label());
    None
}

pub fn model_move(d: &mut Dispatcher, t: &Target, sync: &mut dyn RenderSync) -> Option<Effect> {
    let (x, y) = t.pos();
    let button = d.session.input.button;
    match d.session.input.mode {
        InteractionMode::Painting3D => {
            model_apply(d, x, y, button.unwrap_or(PointerButton::Primary), sync);
        }
        InteractionMode::OrbitingCamera => {
            // Only the primary button orbits
            if button == Some(PointerButton::Primary) {
                let (dx, dy) = d.session.input.delta_to(x, y);
                d.session.orbit(dx, dy, sync);
            }
            return None;
        }
        _ => {}
    }
    let hover = model_hover(d, x, y);
    d.session.set_hover(hover, sync);
    None
}

pub fn camera_zoom(d: &mut Dispatcher, t: &Target, sync: &mut dyn RenderSync) -> Option<Effect> {
    let InputEvent::Wheel { dy, .. } = *t.event else {
        return None;
    };
    d.session.zoom_camera(dy, sync);
    None
}

// ----------------------------------------------------------------------
// Hotbar
// ----------------------------------------------------------------------

pub fn hotbar_click(d: &mut Dispatcher, t: &Target, sync: &mut dyn RenderSync) -> Option<Effect> {
    let (x, _) = t.pos();
    let rect = d.layout.hotbar;
    let slot = slot_at_offset(x - rect.x, rect.w);
    d.session.select_slot(slot, sync);
    None
}

pub fn hotbar_scroll(d: &mut Dispatcher, t: &Target, sync: &mut dyn RenderSync) -> Option<Effect> {
    let InputEvent::Wheel { dy, .. } = *t.event else {
        return None;
    };
    d.session.scroll_hotbar(dy, sync);
    None
}

// ----------------------------------------------------------------------
// Keyboard
// ----------------------------------------------------------------------

pub fn key_down(d: &mut Dispatcher, t: &Target, sync: &mut dyn RenderSync) -> Option<Effect> {
    let InputEvent::KeyDown { key, mods } = *t.event else {
        return None;
    };
    match key {
        Key::Shift => {
            d.session.input.shift = true;
            d.refresh_hover(sync);
            None
        }
        Key::Control => {
            d.session.input.ctrl = true;
            None
        }
        _ => {
            let ctx = d.action_context();
            let id = d.actions.find(key, mods, &ctx)?;
            run_action(d, id, sync)
        }
    }
}

pub fn key_up(d: &mut Dispatcher, t: &Target, sync: &mut dyn RenderSync) -> Option<Effect> {
    let InputEvent::KeyUp { key, .. } = *t.event else {
        return None;
    };
    match key {
        Key::Shift => {
            d.session.input.shift = false;
            d.refresh_hover(sync);
        }
        Key::Control => d.session.input.ctrl = false,
        _ => {}
    }
    None
}

/// Run a registered action by id
pub fn run_action(d: &mut Dispatcher, id: &str, sync: &mut dyn RenderSync) -> Option<Effect> {
    debug!("action {}", id);
    match id {
        actions::EXPORT => return Some(Effect::Export),
        actions::IMPORT => return Some(Effect::Import),
        actions::TOGGLE_OVERLAY => {
            d.session.toggle_overlay(sync);
            d.refresh_hover(sync);
        }
        actions::TOGGLE_LAYER => {
            d.session.toggle_active_layer(sync);
        }
        actions::RESET_VIEW => d.session.reset_view(sync),
        _ => {
            if let Some(slot) = actions::HOTBAR_SLOTS.iter().position(|&s| s == id) {
                d.session.select_slot(slot, sync);
            }
        }
    }
    None
}

// ----------------------------------------------------------------------
// Everywhere
// ----------------------------------------------------------------------

pub fn clear_hover(d: &mut Dispatcher, _t: &Target, sync: &mut dyn RenderSync) -> Option<Effect> {
    d.session.set_hover(None, sync);
    None
}

/// Pointer up ends every interaction, whatever it was
pub fn release(d: &mut Dispatcher, _t: &Target, _sync: &mut dyn RenderSync) -> Option<Effect> {
    if d.session.input.mode != InteractionMode::Idle {
        debug!("{} -> Idle", d.session.input.mode.label());
    }
    d.session.input.release();
    None
}
