//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! Layout, left to right: the NEXT preview, the bordered playfield, and the
//! stats/controls panel. Panels are skipped when the viewport is too narrow;
//! the playfield is always drawn (clipped if necessary).

use crate::core::{GameSnapshot, PiecePreview};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

const GAP: u16 = 2;
const RIGHT_PANEL_MIN_W: u16 = 12;
const PREVIEW_CELLS: u16 = 4;

const BOARD_BG: Rgb = Rgb::new(26, 26, 46);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

const CONTROLS: [&str; 6] = [
    "<- -> MOVE",
    "UP/SPC ROTATE",
    "DOWN SOFT DROP",
    "ENTER HARD DROP",
    "P PAUSE",
    "Q QUIT",
];

/// Where each part of the screen goes for a given viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Layout {
    frame_x: u16,
    frame_y: u16,
    frame_w: u16,
    frame_h: u16,
    preview_x: Option<u16>,
    stats_x: Option<u16>,
}

/// A lightweight terminal renderer for the Tetris game.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    fn layout(&self, viewport: Viewport) -> Layout {
        let frame_w = BOARD_WIDTH as u16 * self.cell_w + 2;
        let frame_h = BOARD_HEIGHT as u16 * self.cell_h + 2;
        let frame_x = viewport.width.saturating_sub(frame_w) / 2;
        let frame_y = viewport.height.saturating_sub(frame_h) / 2;

        let preview_w = (PREVIEW_CELLS * self.cell_w).max(4);
        let preview_x = frame_x.checked_sub(GAP + preview_w);

        let right = frame_x + frame_w + GAP;
        let stats_x = (viewport.width.saturating_sub(right) >= RIGHT_PANEL_MIN_W).then_some(right);

        Layout {
            frame_x,
            frame_y,
            frame_w,
            frame_h,
            preview_x,
            stats_x,
        }
    }

    /// Render a snapshot into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(crate::fb::Cell::default());

        let layout = self.layout(viewport);

        self.draw_border(fb, &layout);
        self.draw_grid(fb, snap, &layout);

        if let Some(x) = layout.preview_x {
            self.draw_preview(fb, snap.next, x, layout.frame_y);
        }
        if let Some(x) = layout.stats_x {
            self.draw_stats(fb, snap, x, layout.frame_y, viewport.height);
        }

        if snap.game_over {
            let score = format!("SCORE {}", snap.score);
            self.draw_overlay(fb, &layout, &["GAME OVER", &score, "ENTER: RESTART"]);
        } else if snap.paused {
            self.draw_overlay(fb, &layout, &["PAUSED", "P: RESUME"]);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, layout: &Layout) {
        let style = CellStyle::plain(Rgb::new(200, 200, 200), PANEL_BG);
        let (x, y, w, h) = (layout.frame_x, layout.frame_y, layout.frame_w, layout.frame_h);

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);
        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn draw_grid(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, layout: &Layout) {
        let empty = CellStyle::plain(Rgb::new(90, 90, 110), BOARD_BG).dim();
        for (y, row) in snap.grid.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                let px = layout.frame_x + 1 + x as u16 * self.cell_w;
                let py = layout.frame_y + 1 + y as u16 * self.cell_h;
                let (ch, style) = match cell {
                    Some(kind) => ('█', block_style(*kind)),
                    None => ('·', empty),
                };
                fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
            }
        }
    }

    fn draw_preview(&self, fb: &mut FrameBuffer, next: Option<PiecePreview>, x: u16, y: u16) {
        fb.put_str(x, y, "NEXT", label_style());
        let Some(preview) = next else {
            return;
        };
        let style = block_style(preview.kind);
        for (dx, dy) in preview.shape.occupied() {
            let px = x + dx as u16 * self.cell_w;
            let py = y + 2 + dy as u16 * self.cell_h;
            fb.fill_rect(px, py, self.cell_w, self.cell_h, '█', style);
        }
    }

    fn draw_stats(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, x: u16, top: u16, bottom: u16) {
        let value = CellStyle::plain(Rgb::new(200, 200, 200), PANEL_BG);
        let mut y = top;

        for (label, v) in [("SCORE", snap.score), ("LINES", snap.lines), ("LEVEL", snap.level)] {
            fb.put_str(x, y, label, label_style());
            fb.put_u32(x, y + 1, v, value);
            y += 3;
        }

        let hint = value.dim();
        for line in CONTROLS {
            if y >= bottom {
                break;
            }
            fb.put_str(x, y, line, hint);
            y += 1;
        }
    }

    fn draw_overlay(&self, fb: &mut FrameBuffer, layout: &Layout, lines: &[&str]) {
        let style = CellStyle::plain(Rgb::new(255, 255, 255), PANEL_BG).bold();
        let first_y = (layout.frame_y + layout.frame_h / 2).saturating_sub(lines.len() as u16 / 2);
        for (i, text) in lines.iter().enumerate() {
            let text_w = text.chars().count() as u16;
            let x = layout.frame_x + layout.frame_w.saturating_sub(text_w) / 2;
            fb.put_str(x, first_y + i as u16, text, style);
        }
    }
}

fn label_style() -> CellStyle {
    CellStyle::plain(Rgb::new(220, 220, 220), PANEL_BG).bold()
}

fn block_style(kind: PieceKind) -> CellStyle {
    let fg = Rgb::from_hex(kind.color()).unwrap_or(Rgb::new(220, 220, 220));
    CellStyle::plain(fg, BOARD_BG).bold()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameState, Position, Tetromino};

    #[test]
    fn narrow_viewport_skips_panels() {
        let view = GameView::default();
        let layout = view.layout(Viewport::new(22, 22));
        assert_eq!((layout.frame_x, layout.frame_y), (0, 0));
        assert_eq!(layout.preview_x, None);
        assert_eq!(layout.stats_x, None);
    }

    #[test]
    fn wide_viewport_places_both_panels() {
        let view = GameView::default();
        let layout = view.layout(Viewport::new(80, 24));
        // frame is 22 wide, centered: x = 29
        assert_eq!(layout.frame_x, 29);
        assert_eq!(layout.preview_x, Some(29 - 2 - 8));
        assert_eq!(layout.stats_x, Some(29 + 22 + 2));
    }

    #[test]
    fn block_colors_follow_piece_palette() {
        assert_eq!(block_style(PieceKind::Z).fg, Rgb::new(240, 0, 0));
        assert_eq!(block_style(PieceKind::I).fg, Rgb::new(0, 240, 240));
    }

    #[test]
    fn preview_draws_next_shape() {
        let snap = GameState::new(1)
            .with_next(Some(Tetromino::new(PieceKind::O)))
            .with_active(Tetromino::new(PieceKind::T), Position::spawn())
            .snapshot();
        let view = GameView::default();
        let fb = view.render(&snap, Viewport::new(80, 24));
        let layout = view.layout(Viewport::new(80, 24));
        let x = layout.preview_x.unwrap();
        let y = layout.frame_y + 2;
        assert_eq!(fb.get(x, y).unwrap().ch, '█');
        assert_eq!(fb.get(x + 3, y + 1).unwrap().ch, '█');
        assert_eq!(fb.get(x + 4, y).unwrap().ch, ' ');
    }
}
