//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains all the game rules and session state for a falling-block
//! puzzle. It has **zero dependencies** on UI, terminals, or I/O:
//!
//! - **Deterministic**: the random source is injected, so a seeded generator
//!   replays the same session
//! - **Testable**: every rule is reachable through plain method calls
//! - **Portable**: the driver only has to call [`Game::tick`] at a fixed rate
//!
//! # Module Structure
//!
//! - [`board`]: fixed-size grid of settled colors with row compaction
//! - [`piece`]: footprint, rotation, collision probing and merging
//! - [`catalog`]: the five shapes and the fill palette
//! - [`game`]: session engine (cadence, commands, spawning, scoring)
//! - [`config`]: construction parameters and their validation
//! - [`rng`]: a small seedable generator for reproducible runs
//! - [`snapshot`]: read-only copy of the session for renderers
//! - [`shared`]: mutex-guarded handle for multi-threaded hosts
//!
//! # Game Rules
//!
//! - A new piece takes a random shape, color, quarter-turn count and column
//! - Gravity moves the piece one row per `frame_rate / (speed / 100)` ticks
//! - A piece that cannot fall is merged into the board
//! - Every cleared row scores 1 point and adds 5 to the speed percentage
//! - A spawn that overlaps settled cells ends the game; any command restarts
//!
//! # Example
//!
//! ```
//! use blockfall_core::{Game, GameConfig, SimpleRng};
//! use blockfall_types::GameAction;
//!
//! let mut game = Game::with_rng(GameConfig::default(), SimpleRng::new(12345)).unwrap();
//!
//! game.apply_action(GameAction::MoveLeft);
//! game.apply_action(GameAction::Rotate);
//!
//! // One second of frames at the default 60 Hz moves the piece down one row.
//! let y = game.current().y();
//! for _ in 0..60 {
//!     game.tick();
//! }
//! assert_eq!(game.current().y(), y + 1);
//! ```

pub mod board;
pub mod catalog;
pub mod config;
pub mod game;
pub mod piece;
pub mod rng;
pub mod shared;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use catalog::{ShapeKind, MAX_EXTENT, PALETTE};
pub use config::{ConfigError, GameConfig, MAX_BOARD_DIMENSION};
pub use game::{Game, GameStatus};
pub use piece::{Collision, PatternError, Piece, Side, Step};
pub use rng::SimpleRng;
pub use shared::SharedGame;
pub use snapshot::{ActiveSnapshot, GameSnapshot};
