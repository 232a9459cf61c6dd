//! Input state - pointer, modifiers and the current interaction mode
//!
//! A plain container. Only the dispatcher writes to it.

use super::event::PointerButton;
use crate::color::Channel;
use crate::texture::Texel;

/// What the held pointer is currently doing. Exactly one at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionMode {
    #[default]
    Idle,
    PickingChannel(Channel),
    Drawing2D,
    Painting3D,
    OrbitingCamera,
}

impl InteractionMode {
    pub fn label(&self) -> &'static str {
        match self {
            InteractionMode::Idle => "Idle",
            InteractionMode::PickingChannel(_) => "Picking",
            InteractionMode::Drawing2D => "Drawing",
            InteractionMode::Painting3D => "Painting",
            InteractionMode::OrbitingCamera => "Orbiting",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputState {
    pub mode: InteractionMode,
    /// Button that started the current interaction
    pub button: Option<PointerButton>,
    pub pointer_down: bool,
    pub shift: bool,
    pub ctrl: bool,
    /// Last pointer position seen, window pixels
    pub last_pos: Option<(f32, f32)>,
    /// Previous texel of a 2D stroke
    pub last_texel: Option<Texel>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Channel being dragged, if any
    pub fn picking_channel(&self) -> Option<Channel> {
        match self.mode {
            InteractionMode::PickingChannel(c) => Some(c),
            _ => None,
        }
    }

    pub fn drawing(&self) -> bool {
        self.mode == InteractionMode::Drawing2D
    }

    pub fn painting(&self) -> bool {
        self.mode == InteractionMode::Painting3D
    }

    pub fn camera_move(&self) -> bool {
        self.mode == InteractionMode::OrbitingCamera
    }

    /// Start an interaction with `button` held
    pub fn begin(&mut self, mode: InteractionMode, button: PointerButton) {
        self.mode = mode;
        self.button = Some(button);
        self.pointer_down = true;
    }

    /// Pointer released: back to idle, stroke and pick state cleared
    pub fn release(&mut self) {
        self.mode = InteractionMode::Idle;
        self.button = None;
        self.pointer_down = false;
        self.last_texel = None;
    }

    /// Movement since the last recorded pointer position
    pub fn delta_to(&self, x: f32, y: f32) -> (f32, f32) {
        match self.last_pos {
            Some((lx, ly)) => (x - lx, y - ly),
            None => (0.0, 0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_flags_follow_mode() {
        let mut state = InputState::new();
        assert_eq!(state.mode, InteractionMode::Idle);
        assert!(!state.drawing() && !state.painting() && !state.camera_move());

        state.begin(InteractionMode::PickingChannel(Channel::S), PointerButton::Primary);
        assert_eq!(state.picking_channel(), Some(Channel::S));
        assert!(state.pointer_down);

        state.begin(InteractionMode::Drawing2D, PointerButton::Middle);
        assert_eq!(state.picking_channel(), None);
        assert!(state.drawing());
    }

    #[test]
    fn test_release_clears_everything() {
        let mut state = InputState::new();
        state.begin(InteractionMode::Drawing2D, PointerButton::Primary);
        state.last_texel = Some(Texel::new(3, 3));
        state.release();
        assert_eq!(state.mode, InteractionMode::Idle);
        assert_eq!(state.button, None);
        assert!(!state.pointer_down);
        assert_eq!(state.last_texel, None);
    }

    #[test]
    fn test_delta() {
        let mut state = InputState::new();
        assert_eq!(state.delta_to(5.0, 5.0), (0.0, 0.0));
        state.last_pos = Some((1.0, 2.0));
        assert_eq!(state.delta_to(4.0, 0.0), (3.0, -2.0));
    }
}
