//! Snapshot module - read-only copy of the session for renderers

use arrayvec::ArrayVec;

use crate::piece::{Piece, FOOTPRINT_CAP};
use crate::types::{Cell, Color};

/// The falling piece as a renderer sees it
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub color: Color,
    /// Board coordinates of the occupied cells
    pub cells: ArrayVec<(i32, i32), FOOTPRINT_CAP>,
}

impl From<&Piece> for ActiveSnapshot {
    fn from(piece: &Piece) -> Self {
        Self {
            color: piece.color(),
            cells: piece.cells().collect(),
        }
    }
}

impl ActiveSnapshot {
    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.cells.contains(&(x, y))
    }
}

/// Read-only copy of the session for renderers
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub width: usize,
    pub height: usize,
    /// Settled cells, row-major
    pub board: Vec<Cell>,
    /// None once the piece has merged
    pub active: Option<ActiveSnapshot>,
    pub score: u32,
    pub high_score: u32,
    pub speed: u32,
    pub game_over: bool,
}

impl GameSnapshot {
    /// Settled cell at (x, y), empty when out of bounds
    pub fn settled(&self, x: i32, y: i32) -> Cell {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        self.board[y as usize * self.width + x as usize]
    }

    /// Settled cell with the falling piece drawn over it
    pub fn cell(&self, x: i32, y: i32) -> Cell {
        match &self.active {
            Some(active) if active.contains(x, y) => Some(active.color),
            _ => self.settled(x, y),
        }
    }
}
