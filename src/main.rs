//! skinpaint: paint Minecraft-style skins in 2D or straight onto the model
//!
//! Left and right buttons paint, the middle button eyedrops. Drag the 3D view
//! off the model (or hold Ctrl) to orbit; Ctrl+wheel zooms either view and
//! the plain wheel cycles the hotbar.

mod host;

use macroquad::prelude::*;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use skinpaint::{Dispatcher, PainterConfig, VERSION};

use host::{FieldEditor, FieldOutcome, InputPoller, MacroquadSync, TextureCache};

fn window_conf() -> Conf {
    Conf {
        window_title: format!("skinpaint v{}", VERSION),
        window_width: 1280,
        window_height: 720,
        window_resizable: true,
        ..Default::default()
    }
}

fn init_logging() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "skinpaint=info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[cfg(not(target_arch = "wasm32"))]
fn load_config() -> PainterConfig {
    let path = PainterConfig::default_path();
    let config = PainterConfig::load_or_default(&path);
    if !path.exists() {
        if let Err(e) = config.save_to(&path) {
            tracing::warn!("could not write default config: {}", e);
        }
    }
    config
}

#[cfg(target_arch = "wasm32")]
fn load_config() -> PainterConfig {
    PainterConfig::default()
}

#[macroquad::main(window_conf)]
async fn main() {
    // Initialize crash logging FIRST (before any other code)
    #[cfg(not(target_arch = "wasm32"))]
    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);

    init_logging();

    let config = load_config();
    let mut dispatcher = Dispatcher::new(config);
    let mut sync = MacroquadSync::new();
    let mut textures = TextureCache::new();
    let mut poller = InputPoller::new();
    let mut editor: Option<FieldEditor> = None;

    // A skin given on the command line wins over the configured one
    #[cfg(not(target_arch = "wasm32"))]
    {
        let initial = std::env::args()
            .nth(1)
            .map(std::path::PathBuf::from)
            .or_else(|| dispatcher.session.config.initial_skin.clone());
        if let Some(path) = initial {
            host::load_skin(&mut dispatcher, &path, &mut sync);
        }
    }

    println!("=== skinpaint v{} ===", VERSION);

    loop {
        let (w, h) = (screen_width(), screen_height());
        if w != dispatcher.layout().screen.w || h != dispatcher.layout().screen.h {
            dispatcher.resize(w, h);
            sync.invalidate_all();
        }

        let events = poller.poll();

        // Clicking a field focuses it; clicking anywhere else commits it
        if let Some(commit) = host::focus_fields(&dispatcher, &mut editor, &events) {
            dispatcher.handle(&commit, &mut sync);
        }
        if let Some(open) = editor.as_mut() {
            match open.update() {
                FieldOutcome::Editing => {}
                FieldOutcome::Commit => {
                    if let Some(done) = editor.take() {
                        let commit = skinpaint::InputEvent::Text { field: done.field, text: done.text };
                        dispatcher.handle(&commit, &mut sync);
                    }
                }
                FieldOutcome::Cancel => editor = None,
            }
        }
        dispatcher.set_text_editing(editor.is_some());

        for event in &events {
            for effect in dispatcher.handle(event, &mut sync) {
                host::run_effect(effect, &mut dispatcher, &mut sync);
            }
        }

        textures.refresh(&dispatcher, &mut sync);
        host::draw_frame(&dispatcher, &textures, &sync, editor.as_ref());

        next_frame().await;
    }
}
