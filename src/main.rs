//! Terminal runner (default binary).
//!
//! Drives the engine at the configured frame rate, maps keys to commands and
//! renders through the framebuffer-based terminal layer.
//!
//! Environment:
//! - `BLOCKFALL_WIDTH`, `BLOCKFALL_HEIGHT`, `BLOCKFALL_FPS`, `BLOCKFALL_SPEED`: session config
//! - `BLOCKFALL_SEED`: replay a session with the deterministic generator
//! - `BLOCKFALL_LOG_FILE`: write tracing output to this file (filter via `BLOCKFALL_LOG`)

use std::fs::File;
use std::sync::Mutex;
use std::time::Instant;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use rand::{Rng, SeedableRng};
use tracing::info;
use tracing_subscriber::EnvFilter;

use tui_blockfall::core::{Game, GameConfig, GameSnapshot, SimpleRng};
use tui_blockfall::input::{handle_key_event, should_quit};
use tui_blockfall::term::{FrameBuffer, GameView, Screen, Viewport};

const ENV_SEED: &str = "BLOCKFALL_SEED";
const ENV_LOG_FILE: &str = "BLOCKFALL_LOG_FILE";
const ENV_LOG_FILTER: &str = "BLOCKFALL_LOG";

fn main() -> Result<()> {
    init_tracing()?;

    let config = GameConfig::from_env().context("invalid game configuration")?;
    info!(?config, "starting");

    match std::env::var(ENV_SEED) {
        Ok(raw) => {
            let seed = raw
                .trim()
                .parse::<u64>()
                .with_context(|| format!("{ENV_SEED}={raw:?} is not a valid seed"))?;
            info!(seed, "using seeded generator");
            play(Game::with_rng(config, SimpleRng::seed_from_u64(seed))?)
        }
        Err(_) => play(Game::new(config)?),
    }
}

/// Logging goes to a file only; stdout belongs to the game screen.
fn init_tracing() -> Result<()> {
    let Ok(path) = std::env::var(ENV_LOG_FILE) else {
        return Ok(());
    };
    let file = File::create(&path).with_context(|| format!("cannot open log file {path}"))?;
    let filter = EnvFilter::try_from_env(ENV_LOG_FILTER).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .init();
    Ok(())
}

fn play<R: Rng>(mut game: Game<R>) -> Result<()> {
    let mut screen = Screen::new();
    screen.enter()?;

    let result = run(&mut screen, &mut game);

    // Always try to restore terminal state.
    let _ = screen.leave();
    info!(
        score = game.score(),
        high_score = game.high_score(),
        "exiting"
    );
    result
}

fn run<R: Rng>(screen: &mut Screen, game: &mut Game<R>) -> Result<()> {
    let view = GameView::default();
    let frame_interval = game.config().frame_interval();

    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut dirty = true;
    let mut last_tick = Instant::now();

    loop {
        if dirty {
            let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
            game.snapshot_into(&mut snap);
            view.render_into(&snap, Viewport::new(w, h), &mut fb);
            screen.present(&mut fb)?;
            dirty = false;
        }

        // Input with timeout until next tick.
        let timeout = frame_interval.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        dirty |= game.apply_action(action);
                    }
                }
                Event::Resize(..) => {
                    screen.invalidate();
                    dirty = true;
                }
                _ => {}
            }
        }

        if last_tick.elapsed() >= frame_interval {
            last_tick = Instant::now();
            dirty |= game.tick();
        }
    }
}
