//! Piece catalog - the five shapes and the fill palette
//!
//! Shapes are written in their spawn orientation as rows of occupancy flags
//! (non-zero = occupied). Every spawn applies a random number of clockwise
//! turns on top of these, so the written orientation carries no meaning.

use crate::types::Color;

/// The five polyomino shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    I,
    O,
    T,
    L,
    S,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 5] = [
        ShapeKind::I,
        ShapeKind::O,
        ShapeKind::T,
        ShapeKind::L,
        ShapeKind::S,
    ];

    /// Occupancy rows of the shape
    pub fn pattern(self) -> &'static [&'static [u8]] {
        match self {
            ShapeKind::I => &[&[1, 1, 1, 1]],
            ShapeKind::O => &[&[1, 1], &[1, 1]],
            ShapeKind::T => &[&[1, 1, 1], &[0, 1, 0]],
            ShapeKind::L => &[&[1, 1, 1], &[1, 0, 0]],
            ShapeKind::S => &[&[0, 1, 1], &[1, 1, 0]],
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ShapeKind::I => "i",
            ShapeKind::O => "o",
            ShapeKind::T => "t",
            ShapeKind::L => "l",
            ShapeKind::S => "s",
        }
    }
}

/// Longest side of any shape in the catalog.
///
/// A board must be at least this wide and tall so that every shape fits at
/// spawn in every orientation.
pub const MAX_EXTENT: usize = 4;

/// Fill colors a spawned piece may take. All entries are opaque.
pub const PALETTE: [Color; 7] = [
    Color::new(80, 220, 220),  // cyan
    Color::new(240, 220, 80),  // yellow
    Color::new(200, 120, 220), // purple
    Color::new(100, 220, 120), // green
    Color::new(220, 80, 80),   // red
    Color::new(80, 120, 220),  // blue
    Color::new(255, 165, 0),   // orange
];
