//! Piece module - a falling polyomino with its own footprint
//!
//! A piece is a rectangular occupancy footprint plus a fill color and the board
//! position of the footprint's top-left corner. Rotation remaps the footprint
//! itself (swapping width and height); it never looks at the board. Callers test
//! the result with [`Piece::collides`] and undo what they do not accept.

use arrayvec::ArrayVec;
use thiserror::Error;

use crate::board::Board;
use crate::catalog::{ShapeKind, MAX_EXTENT};
use crate::types::Color;

/// Maximum number of footprint cells (occupied or not)
pub const FOOTPRINT_CAP: usize = MAX_EXTENT * MAX_EXTENT;

/// Footprint storage, row-major (row * width + col)
type Footprint = ArrayVec<bool, FOOTPRINT_CAP>;

/// Board edge hit by a proposed move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Bottom,
    Top,
    Left,
    Right,
}

/// Outcome of a collision probe.
///
/// Only one reason is ever reported. Edges are checked in the order bottom,
/// top, left, right, and settled cells last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collision {
    None,
    Wall(Side),
    Cells,
}

impl Collision {
    /// Nothing is in the way
    pub fn is_clear(self) -> bool {
        self == Collision::None
    }

    pub fn is_blocked(self) -> bool {
        !self.is_clear()
    }
}

/// Result of one gravity step on a piece
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Moved down one row
    Fell,
    /// Could not fall; written into the board and marked done
    Merged,
    /// Already done, nothing happened
    Idle,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("piece pattern has no rows or no columns")]
    Empty,
    #[error("piece pattern rows have different lengths")]
    Ragged,
    #[error("piece pattern is {width}x{height}, larger than the 4x4 maximum")]
    TooLarge { width: usize, height: usize },
}

/// A falling piece
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    width: usize,
    height: usize,
    footprint: Footprint,
    color: Color,
    x: i32,
    y: i32,
    done: bool,
}

impl Piece {
    /// Create a piece of a catalog shape at (0, 0)
    pub fn from_shape(kind: ShapeKind, color: Color) -> Self {
        let rows = kind.pattern();
        Self::build(rows, rows[0].len(), color)
    }

    /// Create a piece from occupancy rows (non-zero = occupied) at (0, 0)
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R], color: Color) -> Result<Self, PatternError> {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.as_ref().len());
        if width == 0 || height == 0 {
            return Err(PatternError::Empty);
        }
        if rows.iter().any(|r| r.as_ref().len() != width) {
            return Err(PatternError::Ragged);
        }
        if width > MAX_EXTENT || height > MAX_EXTENT {
            return Err(PatternError::TooLarge { width, height });
        }
        Ok(Self::build(rows, width, color))
    }

    fn build<R: AsRef<[u8]>>(rows: &[R], width: usize, color: Color) -> Self {
        let footprint: Footprint = rows
            .iter()
            .flat_map(|r| r.as_ref().iter().map(|&v| v != 0))
            .take(FOOTPRINT_CAP)
            .collect();
        Self {
            width,
            height: rows.len(),
            footprint,
            color,
            x: 0,
            y: 0,
            done: false,
        }
    }

    /// Move the footprint's top-left corner to (x, y), builder style
    pub fn at(mut self, x: i32, y: i32) -> Self {
        self.set_position(x, y);
        self
    }

    pub fn set_position(&mut self, x: i32, y: i32) {
        self.x = x;
        self.y = y;
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// True once the piece has been merged into the board
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Footprint occupancy at local (col, row); false outside the footprint
    pub fn is_occupied(&self, col: usize, row: usize) -> bool {
        col < self.width && row < self.height && self.footprint[row * self.width + col]
    }

    /// Whether board cell (x, y) is covered by an occupied footprint cell
    pub fn contains(&self, x: i32, y: i32) -> bool {
        let (col, row) = (x - self.x, y - self.y);
        col >= 0 && row >= 0 && self.is_occupied(col as usize, row as usize)
    }

    /// Board coordinates of every occupied footprint cell
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        (0..self.height).flat_map(move |row| {
            (0..self.width)
                .filter(move |&col| self.footprint[row * self.width + col])
                .map(move |col| (self.x + col as i32, self.y + row as i32))
        })
    }

    /// Footprint as occupancy rows (1 = occupied)
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        self.footprint
            .chunks(self.width)
            .map(|row| row.iter().map(|&v| u8::from(v)).collect())
            .collect()
    }

    /// Rotate by `direction` quarter turns: positive is clockwise, negative is
    /// counter-clockwise, zero does nothing. Bounds are not checked.
    pub fn rotate(&mut self, direction: i32) {
        for _ in 0..direction.unsigned_abs() % 4 {
            if direction > 0 {
                self.rotate_cw();
            } else {
                self.rotate_ccw();
            }
        }
    }

    // new[r][c] = old[h-1-c][r]
    fn rotate_cw(&mut self) {
        let (w, h) = (self.width, self.height);
        let rotated: Footprint = (0..w)
            .flat_map(|r| (0..h).map(move |c| (r, c)))
            .map(|(r, c)| self.footprint[(h - 1 - c) * w + r])
            .collect();
        self.footprint = rotated;
        self.width = h;
        self.height = w;
    }

    // new[r][c] = old[c][w-1-r]
    fn rotate_ccw(&mut self) {
        let (w, h) = (self.width, self.height);
        let rotated: Footprint = (0..w)
            .flat_map(|r| (0..h).map(move |c| (r, c)))
            .map(|(r, c)| self.footprint[c * w + (w - 1 - r)])
            .collect();
        self.footprint = rotated;
        self.width = h;
        self.height = w;
    }

    /// Probe the board as if the piece were translated by (dx, dy).
    pub fn collides(&self, board: &Board, dx: i32, dy: i32) -> Collision {
        let x = self.x + dx;
        let y = self.y + dy;

        if y + self.height as i32 > board.height() as i32 {
            return Collision::Wall(Side::Bottom);
        }
        if y < 0 {
            return Collision::Wall(Side::Top);
        }
        if x < 0 {
            return Collision::Wall(Side::Left);
        }
        if x + self.width as i32 > board.width() as i32 {
            return Collision::Wall(Side::Right);
        }

        // Out-of-board cells report as unoccupied and are skipped.
        if self
            .cells()
            .any(|(cx, cy)| board.is_occupied(cx + dx, cy + dy))
        {
            return Collision::Cells;
        }

        Collision::None
    }

    /// One gravity step: fall a row if nothing is in the way, otherwise merge
    /// into the board and become done. A done piece is left untouched.
    pub fn update(&mut self, board: &mut Board) -> Step {
        if self.done {
            return Step::Idle;
        }

        if self.collides(board, 0, 1).is_clear() {
            self.y += 1;
            return Step::Fell;
        }

        self.write_to_board(board);
        self.done = true;
        Step::Merged
    }

    /// Write every occupied cell into the board; cells outside it are skipped
    pub fn write_to_board(&self, board: &mut Board) {
        for (x, y) in self.cells() {
            board.set(x, y, Some(self.color));
        }
    }
}
