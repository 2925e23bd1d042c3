//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::GameSnapshot;
use crate::fb::{Cell, CellStyle, FrameBuffer};
use crate::types::Color;

const PLAY_BG: Color = Color::new(30, 30, 40);
const SCREEN_BG: Color = Color::new(0, 0, 0);

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

/// Vertical placement of the board frame inside the viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// A lightweight terminal renderer for the game.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

/// Where the board frame landed in the viewport
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Render the snapshot into an existing framebuffer.
    ///
    /// Callers can reuse one framebuffer across frames; it is only resized when
    /// the viewport changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Cell {
            ch: ' ',
            style: CellStyle::default(),
        });

        let board_px_w = to_u16(snap.width).saturating_mul(self.cell_w);
        let board_px_h = to_u16(snap.height).saturating_mul(self.cell_h);
        let frame_w = board_px_w.saturating_add(2);
        let frame_h = board_px_h.saturating_add(2);
        let frame = Frame {
            x: viewport.width.saturating_sub(frame_w) / 2,
            y: match self.anchor_y {
                AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
                AnchorY::Top => 0,
            },
            w: frame_w,
            h: frame_h,
        };

        let bg = CellStyle::new(Color::new(80, 80, 90), PLAY_BG);
        fb.fill_rect(frame.x + 1, frame.y + 1, board_px_w, board_px_h, ' ', bg);
        self.draw_border(fb, frame, CellStyle::new(Color::new(200, 200, 200), SCREEN_BG));

        for y in 0..snap.height as i32 {
            for x in 0..snap.width as i32 {
                match snap.settled(x, y) {
                    Some(color) => self.draw_block(fb, frame, x, y, color),
                    None => self.draw_empty_cell(fb, frame, x, y),
                }
            }
        }

        if let Some(active) = &snap.active {
            for &(x, y) in &active.cells {
                self.draw_block(fb, frame, x, y, active.color);
            }
        }

        self.draw_side_panel(fb, snap, viewport, frame);

        if snap.game_over {
            self.draw_game_over(fb, frame);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, frame: Frame, style: CellStyle) {
        let Frame { x, y, w, h } = frame;
        if w < 2 || h < 2 {
            return;
        }

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

    fn draw_empty_cell(&self, fb: &mut FrameBuffer, frame: Frame, x: i32, y: i32) {
        let style = CellStyle::new(Color::new(90, 90, 100), PLAY_BG).dim();
        self.fill_cell_rect(fb, frame, x, y, '·', style);
    }

    fn draw_block(&self, fb: &mut FrameBuffer, frame: Frame, x: i32, y: i32, color: Color) {
        let style = CellStyle::new(color, PLAY_BG).bold();
        self.fill_cell_rect(fb, frame, x, y, '█', style);
    }

    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        frame: Frame,
        x: i32,
        y: i32,
        ch: char,
        style: CellStyle,
    ) {
        if x < 0 || y < 0 {
            return;
        }
        let px = to_u16(x as usize)
            .saturating_mul(self.cell_w)
            .saturating_add(frame.x + 1);
        let py = to_u16(y as usize)
            .saturating_mul(self.cell_h)
            .saturating_add(frame.y + 1);
        if px >= fb.width() || py >= fb.height() {
            return;
        }
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        frame: Frame,
    ) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 10 {
            return;
        }

        let label = CellStyle::default().bold();
        let value = CellStyle::new(Color::new(200, 200, 200), SCREEN_BG);

        let mut y = frame.y;
        for (name, v) in [
            ("SCORE", snap.score),
            ("HIGH", snap.high_score),
            ("SPEED", snap.speed),
        ] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y.saturating_add(1), v, value);
            y = y.saturating_add(3);
        }

        let hint = value.dim();
        fb.put_str(panel_x, y, "←→↓ move", hint);
        fb.put_str(panel_x, y.saturating_add(1), "↑ rotate", hint);
        fb.put_str(panel_x, y.saturating_add(2), "q quit", hint);
    }

    fn draw_game_over(&self, fb: &mut FrameBuffer, frame: Frame) {
        let style = CellStyle::new(Color::new(255, 255, 255), SCREEN_BG).bold();
        let mid_y = frame.y.saturating_add(frame.h / 2);
        self.put_centered(fb, frame, mid_y, "GAME OVER", style);
        self.put_centered(fb, frame, mid_y.saturating_add(1), "move to restart", style.dim());
    }

    fn put_centered(&self, fb: &mut FrameBuffer, frame: Frame, y: u16, text: &str, style: CellStyle) {
        let text_w = text.chars().count() as u16;
        let x = frame.x.saturating_add(frame.w.saturating_sub(text_w) / 2);
        fb.put_str(x, y, text, style);
    }
}

fn to_u16(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_snapshot(width: usize, height: usize) -> GameSnapshot {
        GameSnapshot {
            width,
            height,
            board: vec![None; width * height],
            ..GameSnapshot::default()
        }
    }

    #[test]
    fn frame_tracks_board_dimensions() {
        let snap = empty_snapshot(4, 6);
        // 4 cells * 2 columns + border = 10 wide, 6 + border = 8 tall.
        let fb = GameView::default().render(&snap, Viewport::new(10, 8));
        assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
        assert_eq!(fb.get(9, 7).unwrap().ch, '┘');
    }

    #[test]
    fn board_wider_than_viewport_is_clipped() {
        let mut snap = empty_snapshot(40_000, 4);
        snap.board[39_999] = Some(Color::new(200, 0, 0));
        let fb = GameView::default().render(&snap, Viewport::new(80, 24));
        assert_eq!((fb.width(), fb.height()), (80, 24));
    }

    #[test]
    fn tiny_viewport_does_not_panic() {
        let snap = empty_snapshot(10, 20);
        let fb = GameView::default().render(&snap, Viewport::new(3, 2));
        assert_eq!((fb.width(), fb.height()), (3, 2));
    }
}
