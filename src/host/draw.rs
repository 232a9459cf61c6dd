//! Frame drawing: both views, the color panel, hotbar and status line

use std::collections::HashMap;

use macroquad::prelude::*;

use skinpaint::color::{render_strip, Channel};
use skinpaint::dispatch::Dispatcher;
use skinpaint::input::TextField;
use skinpaint::scene::{render_preview, Framebuffer, PreviewParams};
use skinpaint::texture::TEXTURE_SIZE;
use skinpaint::ui::Rect as Area;
use skinpaint::WidgetId;

use super::field::FieldEditor;
use super::sync::MacroquadSync;

const BG: Color = Color::new(0.13, 0.13, 0.14, 1.0);
const PANEL_BORDER: Color = Color::new(0.24, 0.24, 0.26, 1.0);
const TEXT: Color = Color::new(0.8, 0.8, 0.85, 1.0);
const TEXT_DIM: Color = Color::new(0.5, 0.5, 0.55, 1.0);
const ACCENT: Color = Color::new(0.0, 0.75, 0.9, 1.0);
const CHECKER_A: Color = Color::new(0.22, 0.22, 0.22, 1.0);
const CHECKER_B: Color = Color::new(0.3, 0.3, 0.3, 1.0);
const FONT_SIZE: f32 = 16.0;

/// Hotbar artwork units across the full bar
const HOTBAR_ART_W: f32 = 184.0;

/// GPU copies of everything the core renders on the CPU
pub struct TextureCache {
    canvas: Option<Texture2D>,
    preview: Option<Texture2D>,
    fb: Framebuffer,
    strips: HashMap<Channel, Texture2D>,
}

impl TextureCache {
    pub fn new() -> Self {
        Self {
            canvas: None,
            preview: None,
            fb: Framebuffer::new(1, 1),
            strips: HashMap::new(),
        }
    }

    /// Rebuild whatever the core marked stale
    pub fn refresh(&mut self, d: &Dispatcher, sync: &mut MacroquadSync) {
        let session = &d.session;
        let layout = d.layout();

        if sync.canvas_dirty || self.canvas.is_none() {
            let pixels = session.layers.composite(true);
            let size = TEXTURE_SIZE as u16;
            let texture = Texture2D::from_rgba8(size, size, &pixels);
            texture.set_filter(FilterMode::Nearest);
            self.canvas = Some(texture);
            sync.canvas_dirty = false;
        }

        let (pw, ph) = (layout.view3d.w.max(1.0) as usize, layout.view3d.h.max(1.0) as usize);
        if self.fb.width != pw || self.fb.height != ph {
            self.fb.resize(pw, ph);
            sync.preview_dirty = true;
        }
        if sync.preview_dirty || self.preview.is_none() {
            let pixels = session.layers.composite(true);
            let params = PreviewParams {
                texture: &pixels,
                overlay_visible: session.layers.overlay_visible(),
                highlight: sync.highlight,
            };
            render_preview(&mut self.fb, &session.camera, &session.model, &params);
            let texture = Texture2D::from_rgba8(self.fb.width as u16, self.fb.height as u16, &self.fb.pixels);
            texture.set_filter(FilterMode::Nearest);
            self.preview = Some(texture);
            sync.preview_dirty = false;
        }

        for channel in Channel::ALL {
            let dirty = sync.take_widget(WidgetId::Strip(channel));
            if dirty || !self.strips.contains_key(&channel) {
                let strip = layout.row(channel).strip;
                let image = render_strip(channel, &session.color, strip.w.max(1.0) as usize, strip.h.max(1.0) as usize);
                let texture = Texture2D::from_rgba8(image.width as u16, image.height as u16, &image.pixels);
                texture.set_filter(FilterMode::Nearest);
                self.strips.insert(channel, texture);
            }
        }
        // Swatch, hex field and hotbar read state directly each frame
        sync.take_widget(WidgetId::Swatch);
        sync.take_widget(WidgetId::HexField);
        sync.take_widget(WidgetId::Hotbar);
    }
}

fn draw_checker(area: Area, cell: f32) {
    let cols = (area.w / cell).ceil() as usize;
    let rows = (area.h / cell).ceil() as usize;
    for j in 0..rows {
        for i in 0..cols {
            let x = area.x + i as f32 * cell;
            let y = area.y + j as f32 * cell;
            let w = cell.min(area.right() - x);
            let h = cell.min(area.bottom() - y);
            let color = if (i + j) % 2 == 0 { CHECKER_A } else { CHECKER_B };
            draw_rectangle(x, y, w, h, color);
        }
    }
}

fn rgba_color(rgba: [u8; 4]) -> Color {
    Color::from_rgba(rgba[0], rgba[1], rgba[2], rgba[3])
}

pub fn draw_frame(d: &Dispatcher, cache: &TextureCache, sync: &MacroquadSync, editor: Option<&FieldEditor>) {
    clear_background(BG);
    draw_preview(d, cache);
    draw_canvas(d, cache, sync);
    draw_color_panel(d, cache, editor);
    draw_hotbar(d);
    draw_status(d);
}

fn draw_preview(d: &Dispatcher, cache: &TextureCache) {
    let area = d.layout().view3d;
    if let Some(texture) = &cache.preview {
        draw_texture_ex(
            texture,
            area.x,
            area.y,
            WHITE,
            DrawTextureParams {
                dest_size: Some(vec2(area.w, area.h)),
                ..Default::default()
            },
        );
    }
    draw_rectangle_lines(area.x, area.y, area.w, area.h, 1.0, PANEL_BORDER);
}

fn draw_canvas(d: &Dispatcher, cache: &TextureCache, sync: &MacroquadSync) {
    let area = d.layout().view2d;
    let view = &d.session.view;
    let span = view.visible_span();

    // One checker cell per texel
    draw_checker(area, area.w / span);

    if let Some(texture) = &cache.canvas {
        draw_texture_ex(
            texture,
            area.x,
            area.y,
            WHITE,
            DrawTextureParams {
                dest_size: Some(vec2(area.w, area.h)),
                source: Some(Rect::new(view.pan_x, view.pan_y, span, span)),
                ..Default::default()
            },
        );
    }

    if let Some(texel) = sync.highlight {
        let (x, y, w, h) = view.texel_rect(texel, area.w, area.h);
        if x + w > 0.0 && y + h > 0.0 && x < area.w && y < area.h {
            draw_rectangle_lines(area.x + x, area.y + y, w, h, 1.5, WHITE);
        }
    }
    draw_rectangle_lines(area.x, area.y, area.w, area.h, 1.0, PANEL_BORDER);
}

fn draw_color_panel(d: &Dispatcher, cache: &TextureCache, editor: Option<&FieldEditor>) {
    let layout = d.layout();
    let color = &d.session.color;

    for (row, &channel) in layout.rows.iter().zip(Channel::ALL.iter()) {
        draw_text(channel.label(), row.label.x + 4.0, row.label.y + row.label.h * 0.7, FONT_SIZE, TEXT);

        if channel == Channel::A {
            draw_checker(row.strip, row.strip.h * 0.5);
        }
        if let Some(texture) = cache.strips.get(&channel) {
            draw_texture_ex(
                texture,
                row.strip.x,
                row.strip.y,
                WHITE,
                DrawTextureParams {
                    dest_size: Some(vec2(row.strip.w, row.strip.h)),
                    ..Default::default()
                },
            );
        }
        let highlight = d.session.input.picking_channel() == Some(channel);
        let border = if highlight { ACCENT } else { PANEL_BORDER };
        draw_rectangle_lines(row.strip.x, row.strip.y, row.strip.w, row.strip.h, 1.0, border);

        draw_arrow(row.up, true);
        draw_arrow(row.down, false);

        let field = TextField::Channel(channel);
        match editor.filter(|e| e.field == field) {
            Some(e) => e.draw(row.field.x, row.field.y, row.field.w, row.field.h, FONT_SIZE),
            None => draw_value(row.field, &color.channel_value(channel).to_string()),
        }
    }

    let swatch = layout.swatch;
    draw_checker(swatch, swatch.w * 0.25);
    draw_rectangle(swatch.x, swatch.y, swatch.w, swatch.h, rgba_color(color.rgba()));
    draw_rectangle_lines(swatch.x, swatch.y, swatch.w, swatch.h, 1.0, PANEL_BORDER);

    let hex = layout.hex_field;
    match editor.filter(|e| e.field == TextField::Hex) {
        Some(e) => e.draw(hex.x, hex.y, hex.w, hex.h, FONT_SIZE),
        None => draw_value(hex, &format!("#{}", color.hex())),
    }
}

fn draw_arrow(area: Area, up: bool) {
    let cx = area.x + area.w * 0.5;
    let (tip, base) = if up {
        (area.y + 2.0, area.bottom() - 2.0)
    } else {
        (area.bottom() - 2.0, area.y + 2.0)
    };
    let half = area.w * 0.3;
    draw_triangle(vec2(cx, tip), vec2(cx - half, base), vec2(cx + half, base), TEXT_DIM);
}

fn draw_value(area: Area, text: &str) {
    draw_rectangle_lines(area.x, area.y, area.w, area.h, 1.0, PANEL_BORDER);
    draw_text(text, area.x + 4.0, area.y + (area.h + FONT_SIZE * 0.7) / 2.0, FONT_SIZE, TEXT);
}

fn draw_hotbar(d: &Dispatcher) {
    let bar = d.layout().hotbar;
    let unit = bar.w / HOTBAR_ART_W;
    let hotbar = &d.session.hotbar;

    draw_rectangle(bar.x, bar.y, bar.w, bar.h, Color::new(0.0, 0.0, 0.0, 0.5));
    for (i, swatch) in hotbar.slots().iter().enumerate() {
        let slot = Area::new(bar.x + unit * (1.0 + 20.0 * i as f32), bar.y, unit * 20.0, bar.h);
        let inner = slot.pad(unit * 3.0);
        draw_checker(inner, inner.w * 0.25);
        draw_rectangle(inner.x, inner.y, inner.w, inner.h, rgba_color(swatch.rgba()));
        draw_rectangle_lines(slot.x, slot.y, slot.w, slot.h, 1.0, PANEL_BORDER);
        draw_text(&(i + 1).to_string(), slot.x + 3.0, slot.y + FONT_SIZE * 0.8, FONT_SIZE * 0.75, TEXT_DIM);
    }

    let selected = hotbar.selected() as f32;
    draw_rectangle_lines(
        bar.x + unit * 20.0 * selected,
        bar.y - 2.0,
        unit * 22.0,
        bar.h + 4.0,
        3.0,
        WHITE,
    );
}

fn draw_status(d: &Dispatcher) {
    let status = d.layout().status;
    let session = &d.session;
    let y = status.y + status.h * 0.75;

    let overlay = if session.layers.overlay_visible() { "shown" } else { "hidden" };
    let layer = session.layers.active().label();
    let mut left = format!(
        "{} | Layer: {} | Overlay: {} | Zoom: {}x",
        session.input.mode.label(),
        layer,
        overlay,
        session.view.zoom,
    );
    if let Some(texel) = session.hover() {
        left.push_str(&format!(" | {},{}", texel.x, texel.y));
    }
    if let Some(message) = session.status() {
        left.push_str(" | ");
        left.push_str(message);
    }
    draw_text(&left, status.x + 8.0, y, FONT_SIZE, TEXT);

    let help: Vec<String> = d
        .actions()
        .iter()
        .filter(|a| a.category != "Hotbar")
        .filter_map(|a| a.shortcut.map(|s| format!("{} {}", s.display(), a.label)))
        .collect();
    let help = help.join("  ");
    let width = measure_text(&help, None, FONT_SIZE as u16, 1.0).width;
    draw_text(&help, status.right() - width - 8.0, y, FONT_SIZE, TEXT_DIM);
}
