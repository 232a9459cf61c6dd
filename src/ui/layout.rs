//! Screen layout - where every input surface sits
//!
//! ```text
//! +-----------+-----------+------------------------------+
//! |           |           | H [=====strip=====] ^v [val] |
//! |  3D view  |  2D view  | S [=====strip=====] ^v [val] |
//! |           |           | ...                          |
//! |           |           | [swatch] [hex]               |
//! +-----------+-----------+------------------------------+
//! |                  [ hotbar 9 slots ]                  |
//! | status                                               |
//! +------------------------------------------------------+
//! ```

use super::rect::Rect;
use crate::color::Channel;
use crate::input::TextField;

const PAD: f32 = 8.0;
pub const ROW_H: f32 = 24.0;
const LABEL_W: f32 = 20.0;
const ARROW_W: f32 = 16.0;
const FIELD_W: f32 = 52.0;
/// Hotbar artwork proportions: 182 wide, 20 per slot, 1px border
pub const HOTBAR_W: f32 = 364.0;
pub const HOTBAR_H: f32 = 44.0;
const STATUS_H: f32 = 20.0;

/// One hit-testable region of the window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    View3D,
    View2D,
    Strip(Channel),
    NudgeUp(Channel),
    NudgeDown(Channel),
    Field(TextField),
    Swatch,
    Hotbar,
}

/// Rows of the color panel, one per channel
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ChannelRow {
    pub label: Rect,
    pub strip: Rect,
    pub up: Rect,
    pub down: Rect,
    pub field: Rect,
}

/// Computed rectangles for a window size
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub screen: Rect,
    pub view3d: Rect,
    pub view2d: Rect,
    pub rows: [ChannelRow; 7],
    pub swatch: Rect,
    pub hex_field: Rect,
    pub hotbar: Rect,
    pub status: Rect,
}

impl Layout {
    /// Lay out a `width` x `height` window with picker strips `strip_width` wide
    pub fn compute(width: f32, height: f32, strip_width: f32) -> Self {
        let screen = Rect::new(0.0, 0.0, width, height);
        let bottom_h = HOTBAR_H + STATUS_H + PAD * 2.0;
        let (main, bottom) = screen.split_v_px(height - bottom_h);

        let hotbar = Rect::new(
            (width - HOTBAR_W) * 0.5,
            bottom.y + PAD,
            HOTBAR_W,
            HOTBAR_H,
        );
        let status = Rect::new(0.0, bottom.bottom() - STATUS_H, width, STATUS_H);

        let panel_w = LABEL_W + strip_width + ARROW_W + FIELD_W + PAD * 5.0;
        let (views, panel) = main.split_h_px(main.w - panel_w);
        let (left, right) = views.split_h_px(views.w * 0.5);
        let view3d = left.pad(PAD);
        let view2d = right.pad(PAD).square();

        let mut rows = [ChannelRow::default(); 7];
        let mut y = panel.y + PAD;
        for row in rows.iter_mut() {
            let mut x = panel.x + PAD;
            row.label = Rect::new(x, y, LABEL_W, ROW_H);
            x += LABEL_W + PAD;
            row.strip = Rect::new(x, y, strip_width, ROW_H);
            x += strip_width + PAD;
            row.up = Rect::new(x, y, ARROW_W, ROW_H * 0.5);
            row.down = Rect::new(x, y + ROW_H * 0.5, ARROW_W, ROW_H * 0.5);
            x += ARROW_W + PAD;
            row.field = Rect::new(x, y, FIELD_W, ROW_H);
            y += ROW_H + PAD * 0.5;
        }

        let swatch = Rect::new(panel.x + PAD, y + PAD, ROW_H * 2.0, ROW_H * 2.0);
        let hex_field = Rect::new(swatch.right() + PAD, swatch.y, FIELD_W * 2.0, ROW_H);

        Self {
            screen,
            view3d,
            view2d,
            rows,
            swatch,
            hex_field,
            hotbar,
            status,
        }
    }

    /// Row for a channel
    pub fn row(&self, channel: Channel) -> &ChannelRow {
        let i = Channel::ALL.iter().position(|&c| c == channel).unwrap_or(0);
        &self.rows[i]
    }

    /// Rectangle of a surface
    pub fn rect(&self, surface: Surface) -> Rect {
        match surface {
            Surface::View3D => self.view3d,
            Surface::View2D => self.view2d,
            Surface::Strip(c) => self.row(c).strip,
            Surface::NudgeUp(c) => self.row(c).up,
            Surface::NudgeDown(c) => self.row(c).down,
            Surface::Field(TextField::Channel(c)) => self.row(c).field,
            Surface::Field(TextField::Hex) => self.hex_field,
            Surface::Swatch => self.swatch,
            Surface::Hotbar => self.hotbar,
        }
    }

    /// Topmost surface under a window point
    pub fn surface_at(&self, x: f32, y: f32) -> Option<Surface> {
        if self.hotbar.contains(x, y) {
            return Some(Surface::Hotbar);
        }
        for (row, &channel) in self.rows.iter().zip(Channel::ALL.iter()) {
            if row.strip.contains(x, y) {
                return Some(Surface::Strip(channel));
            }
            if row.up.contains(x, y) {
                return Some(Surface::NudgeUp(channel));
            }
            if row.down.contains(x, y) {
                return Some(Surface::NudgeDown(channel));
            }
            if row.field.contains(x, y) {
                return Some(Surface::Field(TextField::Channel(channel)));
            }
        }
        if self.swatch.contains(x, y) {
            return Some(Surface::Swatch);
        }
        if self.hex_field.contains(x, y) {
            return Some(Surface::Field(TextField::Hex));
        }
        if self.view2d.contains(x, y) {
            return Some(Surface::View2D);
        }
        if self.view3d.contains(x, y) {
            return Some(Surface::View3D);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_surface_hits_itself() {
        let layout = Layout::compute(1280.0, 720.0, 256.0);
        let mut surfaces = vec![
            Surface::View3D,
            Surface::View2D,
            Surface::Swatch,
            Surface::Hotbar,
            Surface::Field(TextField::Hex),
        ];
        for c in Channel::ALL {
            surfaces.push(Surface::Strip(c));
            surfaces.push(Surface::NudgeUp(c));
            surfaces.push(Surface::NudgeDown(c));
            surfaces.push(Surface::Field(TextField::Channel(c)));
        }
        for s in surfaces {
            let r = layout.rect(s);
            assert!(r.w > 0.0 && r.h > 0.0, "{:?} is empty", s);
            assert_eq!(layout.surface_at(r.x + r.w * 0.5, r.y + r.h * 0.5), Some(s));
        }
    }

    #[test]
    fn test_views_do_not_overlap_panel() {
        let layout = Layout::compute(1280.0, 720.0, 256.0);
        assert!(layout.view3d.right() <= layout.view2d.x);
        assert!(layout.view2d.right() <= layout.row(Channel::H).label.x);
        assert_eq!(layout.view2d.w, layout.view2d.h);
        assert_eq!(layout.row(Channel::A).strip.w, 256.0);
        assert_eq!(layout.hotbar.w, HOTBAR_W);
    }

    #[test]
    fn test_gutter_is_nothing() {
        let layout = Layout::compute(1280.0, 720.0, 256.0);
        assert_eq!(layout.surface_at(1.0, 1.0), None);
    }
}
