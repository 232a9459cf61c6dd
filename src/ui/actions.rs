//! Keyboard shortcut registry
//!
//! Every keyboard command the painter understands is registered here once,
//! with its shortcut, label and category. The dispatcher asks the
//! registry which action a key press triggers; the host uses the same
//! entries to draw the shortcut help line.
//!
//! # Example
//! ```ignore
//! let registry = create_painter_actions();
//! if let Some(id) = registry.find(Key::Char('S'), Modifiers::CTRL, &ctx) {
//!     assert_eq!(id, actions::EXPORT);
//! }
//! ```

use std::collections::HashMap;

use crate::input::{Key, Modifiers};

pub const EXPORT: &str = "file.export";
pub const IMPORT: &str = "file.import";
pub const TOGGLE_OVERLAY: &str = "view.toggle_overlay";
pub const TOGGLE_LAYER: &str = "layer.toggle";
pub const RESET_VIEW: &str = "view.reset";
/// Hotbar slot actions, `hotbar.slot_1` .. `hotbar.slot_9`
pub const HOTBAR_SLOTS: [&str; 9] = [
    "hotbar.slot_1",
    "hotbar.slot_2",
    "hotbar.slot_3",
    "hotbar.slot_4",
    "hotbar.slot_5",
    "hotbar.slot_6",
    "hotbar.slot_7",
    "hotbar.slot_8",
    "hotbar.slot_9",
];

/// A keyboard shortcut (key + modifiers)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shortcut {
    pub key: Key,
    pub ctrl: bool, // Cmd on Mac
    pub shift: bool,
}

impl Shortcut {
    /// Create a shortcut with just a key (no modifiers)
    pub fn key(key: Key) -> Self {
        Self { key, ctrl: false, shift: false }
    }

    /// Create a shortcut with Ctrl/Cmd + key
    pub fn ctrl(key: Key) -> Self {
        Self { key, ctrl: true, shift: false }
    }

    /// Format shortcut for display (e.g., "Ctrl+S")
    pub fn display(&self) -> String {
        let mut out = String::new();
        if self.ctrl {
            out.push_str("Ctrl+");
        }
        if self.shift {
            out.push_str("Shift+");
        }
        out.push_str(&key_name(self.key));
        out
    }
}

/// Get a human-readable name for a key
fn key_name(key: Key) -> String {
    match key {
        Key::Shift => "Shift".into(),
        Key::Control => "Ctrl".into(),
        Key::Tab => "Tab".into(),
        Key::Char(c) => c.to_string(),
        Key::Digit(d) => d.to_string(),
    }
}

/// State shortcuts are checked against
#[derive(Debug, Clone, Copy, Default)]
pub struct ActionContext {
    /// A text field has focus; shortcuts are suppressed
    pub text_editing: bool,
}

/// A registered action
#[derive(Clone)]
pub struct Action {
    /// Unique identifier (e.g., "file.export")
    pub id: &'static str,
    /// Human-readable label
    pub label: &'static str,
    pub shortcut: Option<Shortcut>,
    /// Category for grouping in the help line
    pub category: &'static str,
}

impl Action {
    /// Create a new action with the given ID
    pub fn new(id: &'static str) -> Self {
        Self {
            id,
            label: "",
            shortcut: None,
            category: "General",
        }
    }

    pub fn label(mut self, label: &'static str) -> Self {
        self.label = label;
        self
    }

    pub fn shortcut(mut self, shortcut: Shortcut) -> Self {
        self.shortcut = Some(shortcut);
        self
    }

    pub fn category(mut self, category: &'static str) -> Self {
        self.category = category;
        self
    }

    /// Shortcuts are suppressed while a text field has focus
    pub fn is_enabled(&self, ctx: &ActionContext) -> bool {
        !ctx.text_editing
    }
}

/// Central registry for all actions
pub struct ActionRegistry {
    actions: HashMap<&'static str, Action>,
    /// Map from shortcut to action ID
    shortcut_map: HashMap<Shortcut, &'static str>,
    /// Registration order, for stable help output
    order: Vec<&'static str>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self {
            actions: HashMap::new(),
            shortcut_map: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Register an action. A later registration with the same shortcut takes
    /// the shortcut over.
    pub fn register(&mut self, action: Action) {
        if let Some(shortcut) = action.shortcut {
            self.shortcut_map.insert(shortcut, action.id);
        }
        if !self.actions.contains_key(action.id) {
            self.order.push(action.id);
        }
        self.actions.insert(action.id, action);
    }

    /// Action fired by pressing `key` with `mods`, if one is bound and enabled
    pub fn find(&self, key: Key, mods: Modifiers, ctx: &ActionContext) -> Option<&'static str> {
        let shortcut = Shortcut { key, ctrl: mods.ctrl, shift: mods.shift };
        let id = *self.shortcut_map.get(&shortcut)?;
        self.actions
            .get(id)
            .filter(|a| a.is_enabled(ctx))
            .map(|a| a.id)
    }

    /// All actions in registration order
    pub fn iter(&self) -> impl Iterator<Item = &Action> {
        self.order.iter().filter_map(|id| self.actions.get(id))
    }
}

impl Default for ActionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the registry with every painter shortcut
pub fn create_painter_actions() -> ActionRegistry {
    let mut registry = ActionRegistry::new();

    registry.register(
        Action::new(EXPORT)
            .label("Export PNG")
            .shortcut(Shortcut::ctrl(Key::Char('S')))
            .category("File"),
    );
    registry.register(
        Action::new(IMPORT)
            .label("Open Skin")
            .shortcut(Shortcut::ctrl(Key::Char('O')))
            .category("File"),
    );
    registry.register(
        Action::new(TOGGLE_OVERLAY)
            .label("Toggle Overlay")
            .shortcut(Shortcut::key(Key::Tab))
            .category("View"),
    );
    registry.register(
        Action::new(RESET_VIEW)
            .label("Reset View")
            .shortcut(Shortcut::key(Key::Char('R')))
            .category("View"),
    );
    registry.register(
        Action::new(TOGGLE_LAYER)
            .label("Switch Layer")
            .shortcut(Shortcut::key(Key::Char('L')))
            .category("Layer"),
    );

    for (i, &id) in HOTBAR_SLOTS.iter().enumerate() {
        registry.register(
            Action::new(id)
                .label("Select Slot")
                .shortcut(Shortcut::key(Key::Digit(i as u8 + 1)))
                .category("Hotbar"),
        );
    }

    registry
}
