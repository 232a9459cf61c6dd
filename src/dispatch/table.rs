//! Route table: (surface, event kind) -> handler
//!
//! Lookup tries the exact surface first, then the `Any` row for the event
//! kind. Events with no row are dropped.

use super::handlers::{self, Handler};
use crate::input::{InputEvent, InteractionMode};
use crate::ui::Surface;

/// Where an event lands, coarse enough to key the table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceKind {
    View3D,
    View2D,
    Strip,
    Nudge,
    Field,
    Hotbar,
    Swatch,
    Keyboard,
    /// Fallback row, matches any surface (or none)
    Any,
}

impl SurfaceKind {
    pub fn of(surface: Option<Surface>) -> Self {
        match surface {
            Some(Surface::View3D) => SurfaceKind::View3D,
            Some(Surface::View2D) => SurfaceKind::View2D,
            Some(Surface::Strip(_)) => SurfaceKind::Strip,
            Some(Surface::NudgeUp(_)) | Some(Surface::NudgeDown(_)) => SurfaceKind::Nudge,
            Some(Surface::Field(_)) => SurfaceKind::Field,
            Some(Surface::Swatch) => SurfaceKind::Swatch,
            Some(Surface::Hotbar) => SurfaceKind::Hotbar,
            None => SurfaceKind::Any,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    PointerDown,
    PointerMove,
    PointerUp,
    /// Wheel without Ctrl
    Wheel,
    /// Wheel with Ctrl held
    CtrlWheel,
    KeyDown,
    KeyUp,
    Text,
}

impl EventKind {
    pub fn of(event: &InputEvent) -> Self {
        match event {
            InputEvent::PointerDown { .. } => EventKind::PointerDown,
            InputEvent::PointerMove { .. } => EventKind::PointerMove,
            InputEvent::PointerUp { .. } => EventKind::PointerUp,
            InputEvent::Wheel { mods, .. } if mods.ctrl => EventKind::CtrlWheel,
            InputEvent::Wheel { .. } => EventKind::Wheel,
            InputEvent::KeyDown { .. } => EventKind::KeyDown,
            InputEvent::KeyUp { .. } => EventKind::KeyUp,
            InputEvent::Text { .. } => EventKind::Text,
        }
    }
}

/// Surface that owns pointer moves while an interaction is in progress.
/// A drag keeps talking to the surface it started on wherever the pointer goes.
pub fn captured_surface(mode: InteractionMode) -> Option<Surface> {
    match mode {
        InteractionMode::Idle => None,
        InteractionMode::PickingChannel(c) => Some(Surface::Strip(c)),
        InteractionMode::Drawing2D => Some(Surface::View2D),
        InteractionMode::Painting3D | InteractionMode::OrbitingCamera => Some(Surface::View3D),
    }
}

pub struct Route {
    pub surface: SurfaceKind,
    pub event: EventKind,
    pub handler: Handler,
}

const fn route(surface: SurfaceKind, event: EventKind, handler: Handler) -> Route {
    Route { surface, event, handler }
}

pub static ROUTES: &[Route] = &[
    // Picker strips
    route(SurfaceKind::Strip, EventKind::PointerDown, handlers::strip_down),
    route(SurfaceKind::Strip, EventKind::PointerMove, handlers::strip_drag),
    route(SurfaceKind::Nudge, EventKind::PointerDown, handlers::nudge),
    route(SurfaceKind::Field, EventKind::Text, handlers::text_commit),
    // 2D canvas
    route(SurfaceKind::View2D, EventKind::PointerDown, handlers::canvas_down),
    route(SurfaceKind::View2D, EventKind::PointerMove, handlers::canvas_move),
    route(SurfaceKind::View2D, EventKind::CtrlWheel, handlers::canvas_zoom),
    // 3D view
    route(SurfaceKind::View3D, EventKind::PointerDown, handlers::model_down),
    route(SurfaceKind::View3D, EventKind::PointerMove, handlers::model_move),
    route(SurfaceKind::View3D, EventKind::CtrlWheel, handlers::camera_zoom),
    // Hotbar
    route(SurfaceKind::Hotbar, EventKind::PointerDown, handlers::hotbar_click),
    route(SurfaceKind::Any, EventKind::Wheel, handlers::hotbar_scroll),
    // Keyboard
    route(SurfaceKind::Keyboard, EventKind::KeyDown, handlers::key_down),
    route(SurfaceKind::Keyboard, EventKind::KeyUp, handlers::key_up),
    // Everywhere
    route(SurfaceKind::Any, EventKind::PointerMove, handlers::clear_hover),
    route(SurfaceKind::Any, EventKind::PointerUp, handlers::release),
];

/// Handler for an event on a surface, exact row first then the `Any` row
pub fn lookup(surface: SurfaceKind, event: EventKind) -> Option<Handler> {
    let find = |s: SurfaceKind| {
        ROUTES
            .iter()
            .find(|r| r.surface == s && r.event == event)
            .map(|r| r.handler)
    };
    find(surface).or_else(|| find(SurfaceKind::Any))
}
