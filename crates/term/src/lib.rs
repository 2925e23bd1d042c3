//! Terminal front-end for the game.
//!
//! A small, game-oriented rendering layer: the game is drawn into a plain
//! framebuffer by [`GameView`] (pure, testable), then [`Screen`] flushes it to
//! the terminal with crossterm.
//!
//! Goals:
//! - Keep `core` deterministic and free of I/O
//! - Allow precise control over aspect ratio (2 chars wide per cell)

pub mod fb;
pub mod game_view;
pub mod screen;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer};
pub use game_view::{AnchorY, GameView, Viewport};
pub use screen::{encode_frame, Screen};
