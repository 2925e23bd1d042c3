//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`]. The engine
//! applies every command immediately, so there is no repeat or buffering layer
//! here: one key press is one command.

pub mod map;

pub use blockfall_types as types;

pub use map::{handle_key_event, should_quit};
