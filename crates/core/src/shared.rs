//! Shared session handle for multi-threaded hosts.
//!
//! Board, piece, score and speed are only consistent as a unit, so the whole
//! session sits behind a single mutex and every operation takes it.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use rand::rngs::StdRng;
use rand::Rng;

use crate::game::Game;
use crate::snapshot::GameSnapshot;
use crate::types::GameAction;

pub struct SharedGame<R = StdRng> {
    inner: Arc<Mutex<Game<R>>>,
}

impl<R> Clone for SharedGame<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R: Rng> SharedGame<R> {
    pub fn new(game: Game<R>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(game)),
        }
    }

    /// Lock the session, recovering it if a previous holder panicked
    pub fn lock(&self) -> MutexGuard<'_, Game<R>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `f` with exclusive access to the session
    pub fn with<T>(&self, f: impl FnOnce(&mut Game<R>) -> T) -> T {
        f(&mut self.lock())
    }

    pub fn tick(&self) -> bool {
        self.with(Game::tick)
    }

    pub fn apply_action(&self, action: GameAction) -> bool {
        self.with(|game| game.apply_action(action))
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.lock().snapshot_into(out);
    }
}

impl<R> std::fmt::Debug for SharedGame<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedGame")
            .field("handles", &Arc::strong_count(&self.inner))
            .finish()
    }
}
