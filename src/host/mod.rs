//! macroquad host: window input in, pixels out, file dialogs on request

mod draw;
mod field;
mod input;
mod sync;

pub use draw::{draw_frame, TextureCache};
pub use field::{FieldEditor, FieldOutcome};
pub use input::InputPoller;
pub use sync::MacroquadSync;

use tracing::warn;

use skinpaint::input::{InputEvent, TextField};
use skinpaint::ui::Surface;
use skinpaint::{Dispatcher, Effect};

/// Current text of a field, as shown before editing starts
pub fn field_text(d: &Dispatcher, field: TextField) -> String {
    match field {
        TextField::Channel(channel) => d.session.color.channel_value(channel).to_string(),
        TextField::Hex => d.session.color.hex().to_string(),
    }
}

/// Start editing a field when one is clicked, committing any field that was
/// being edited. Returns the event to commit, if any.
pub fn focus_fields(
    d: &Dispatcher,
    editor: &mut Option<FieldEditor>,
    events: &[InputEvent],
) -> Option<InputEvent> {
    let mut commit = None;
    for event in events {
        let InputEvent::PointerDown { x, y, .. } = *event else {
            continue;
        };
        let clicked = match d.layout().surface_at(x, y) {
            Some(Surface::Field(field)) => Some(field),
            _ => None,
        };
        if editor.as_ref().map(|e| e.field) == clicked {
            continue;
        }
        if let Some(open) = editor.take() {
            commit = Some(InputEvent::Text { field: open.field, text: open.text });
        }
        *editor = clicked.map(|field| FieldEditor::open(field, field_text(d, field)));
    }
    commit
}

/// Carry out a request the painter core handed back
pub fn run_effect(effect: Effect, d: &mut Dispatcher, sync: &mut MacroquadSync) {
    match effect {
        Effect::Export => export_skin(d),
        Effect::Import => import_skin(d, sync),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn export_skin(d: &mut Dispatcher) {
    let png = match d.session.export_png() {
        Ok(png) => png,
        Err(e) => {
            warn!("export failed: {}", e);
            d.session.set_status(format!("Export failed: {}", e));
            return;
        }
    };

    let dialog = rfd::FileDialog::new()
        .add_filter("PNG Image", &["png"])
        .set_file_name("skin.png");

    if let Some(path) = dialog.save_file() {
        match skinpaint::texture::write_png_file(&path, &png) {
            Ok(()) => d.session.set_status(format!("Exported {}", path.display())),
            Err(e) => {
                warn!("export failed: {}", e);
                d.session.set_status(format!("Export failed: {}", e));
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn export_skin(d: &mut Dispatcher) {
    d.session.set_status("Export not available in browser");
}

#[cfg(not(target_arch = "wasm32"))]
fn import_skin(d: &mut Dispatcher, sync: &mut MacroquadSync) {
    let dialog = rfd::FileDialog::new().add_filter("PNG Image", &["png"]);
    if let Some(path) = dialog.pick_file() {
        load_skin(d, &path, sync);
    }
}

#[cfg(target_arch = "wasm32")]
fn import_skin(d: &mut Dispatcher, _sync: &mut MacroquadSync) {
    d.session.set_status("Import not available in browser");
}

/// Read a skin from disk into the painter, reporting failures in the status line
#[cfg(not(target_arch = "wasm32"))]
pub fn load_skin(d: &mut Dispatcher, path: &std::path::Path, sync: &mut MacroquadSync) {
    let result = skinpaint::texture::read_png_file(path)
        .and_then(|image| d.session.import_rgba(&image.rgba, image.width, image.height, sync));
    if let Err(e) = result {
        warn!("could not load {}: {}", path.display(), e);
        d.session.set_status(format!("Import failed: {}", e));
    }
}
