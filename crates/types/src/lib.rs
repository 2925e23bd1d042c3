//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (engine, terminal rendering, input mapping).
//!
//! # Board Dimensions
//!
//! The default playfield is 10 columns by 20 rows. Row 0 is the top row and
//! column 0 is the leftmost column. Sessions may choose other dimensions at
//! construction time; these constants are only the defaults.
//!
//! # Fall Cadence
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_FRAME_RATE` | 60 | Driver ticks per second |
//! | `BASE_SPEED` | 100 | Speed percentage for one gravity step per second |
//! | `SPEED_INCREMENT` | 5 | Speed added per cleared row |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Color, GameAction, DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH};
//!
//! let action = GameAction::from_str("moveLeft").unwrap();
//! assert_eq!(action, GameAction::MoveLeft);
//!
//! let red = Color::new(220, 80, 80);
//! assert_eq!(red.r, 220);
//!
//! assert_eq!(DEFAULT_BOARD_WIDTH, 10);
//! assert_eq!(DEFAULT_BOARD_HEIGHT, 20);
//! ```

/// Default board width in cells
pub const DEFAULT_BOARD_WIDTH: usize = 10;

/// Default board height in cells
pub const DEFAULT_BOARD_HEIGHT: usize = 20;

/// Default driver tick rate (ticks per second)
pub const DEFAULT_FRAME_RATE: u32 = 60;

/// Baseline speed percentage: one gravity step per `frame_rate` ticks
pub const BASE_SPEED: u32 = 100;

/// Speed percentage added for every cleared row
pub const SPEED_INCREMENT: u32 = 5;

/// An opaque 24-bit fill color
///
/// There is no alpha channel: an empty cell is `None` in [`Cell`], never a
/// "transparent" color value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(Color)`: Cell settled with the given fill color
pub type Cell = Option<Color>;

/// Player commands that can be applied to the game
///
/// While the game is over, every command doubles as "start over".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down, independent of gravity
    MoveDown,
    /// Rotate piece 90° clockwise
    Rotate,
}

impl GameAction {
    pub const ALL: [GameAction; 4] = [
        GameAction::MoveLeft,
        GameAction::MoveRight,
        GameAction::MoveDown,
        GameAction::Rotate,
    ];

    /// Parse action from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveRight"), Some(GameAction::MoveRight));
    /// assert_eq!(GameAction::from_str("rotate"), Some(GameAction::Rotate));
    /// assert_eq!(GameAction::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "movedown" => Some(GameAction::MoveDown),
            "rotate" => Some(GameAction::Rotate),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::MoveDown => "moveDown",
            GameAction::Rotate => "rotate",
        }
    }
}
