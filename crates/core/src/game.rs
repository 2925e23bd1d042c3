//! Game module - the session engine
//!
//! Ties together the board, the falling piece, the catalog and the random source.
//! It throttles gravity against the driver's tick rate, applies player commands
//! against the current collision state, clears rows, and keeps score.
//!
//! All mutation happens through `&mut self`; nothing here blocks or spawns work.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::board::Board;
use crate::catalog::{ShapeKind, PALETTE};
use crate::config::{ConfigError, GameConfig};
use crate::piece::{Collision, Piece, Step};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::{Cell, GameAction, BASE_SPEED, SPEED_INCREMENT};

/// Session state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    Playing,
    /// A spawned piece overlapped settled cells. Any command restarts.
    GameOver,
}

/// Complete game session
#[derive(Debug, Clone)]
pub struct Game<R = StdRng> {
    config: GameConfig,
    board: Board,
    current: Piece,
    score: u32,
    high_score: u32,
    speed: u32,
    /// Ticks since the last gravity step
    frames: u32,
    game_over: bool,
    rng: R,
}

impl Game<StdRng> {
    /// Create a session seeded from the OS entropy source
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::from_entropy())
    }
}

impl<R: Rng> Game<R> {
    /// Create a session drawing every spawn from `rng`
    pub fn with_rng(config: GameConfig, mut rng: R) -> Result<Self, ConfigError> {
        config.validate()?;

        let board = Board::new(config.width, config.height);
        let current = roll_piece(&mut rng, board.width());

        Ok(Self {
            config,
            board,
            current,
            score: 0,
            high_score: 0,
            speed: config.initial_speed,
            frames: 0,
            game_over: false,
            rng,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mutable board access for scripted setups (puzzles, replays, tests)
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// The current piece, including one that has merged and awaits replacement
    pub fn current(&self) -> &Piece {
        &self.current
    }

    /// The current piece while it is still falling
    pub fn active(&self) -> Option<&Piece> {
        (!self.current.is_done()).then_some(&self.current)
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn speed(&self) -> u32 {
        self.speed
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn status(&self) -> GameStatus {
        if self.game_over {
            GameStatus::GameOver
        } else {
            GameStatus::Playing
        }
    }

    /// Color shown at (x, y): the falling piece over settled cells.
    /// Out-of-bounds coordinates read as empty.
    pub fn cell_at(&self, x: i32, y: i32) -> Cell {
        match self.active() {
            Some(piece) if piece.contains(x, y) => Some(piece.color()),
            _ => self.board.get(x, y).flatten(),
        }
    }

    /// Driver entry point, called once per frame.
    ///
    /// Gravity fires once `frames >= frame_rate / (speed / 100)`, evaluated as
    /// `frames * speed >= frame_rate * 100` to stay in integers. Returns whether
    /// a gravity step ran.
    pub fn tick(&mut self) -> bool {
        self.frames = self.frames.saturating_add(1);

        let due = u64::from(self.frames) * u64::from(self.speed)
            >= u64::from(self.config.frame_rate) * u64::from(BASE_SPEED);
        if !due {
            return false;
        }

        self.frames = 0;
        self.update();
        true
    }

    /// One gravity step. Returns the number of rows cleared.
    pub fn update(&mut self) -> usize {
        if self.game_over {
            return 0;
        }

        if self.current.is_done() {
            self.spawn();
            if self.game_over {
                return 0;
            }
        }

        if self.current.update(&mut self.board) == Step::Merged {
            debug!(x = self.current.x(), y = self.current.y(), "piece merged");
        }

        let cleared = self.board.clear_completed_rows();
        if cleared > 0 {
            self.award_rows(cleared);
        }
        cleared
    }

    fn award_rows(&mut self, rows: usize) {
        for _ in 0..rows {
            self.score = self.score.saturating_add(1);
            self.speed = BASE_SPEED.max(self.speed.saturating_add(SPEED_INCREMENT));
        }
        self.high_score = self.high_score.max(self.score);

        info!(
            rows,
            score = self.score,
            high_score = self.high_score,
            speed = self.speed,
            "rows cleared"
        );
    }

    /// Replace the current piece with a random one at the top of the board
    fn spawn(&mut self) {
        let piece = roll_piece(&mut self.rng, self.board.width());
        self.place_piece(piece);
    }

    /// Install `piece` as the current piece at its own position.
    ///
    /// Runs the same check as a random spawn: overlapping settled cells ends the
    /// game (the piece is still installed). Keeping the piece inside the board is
    /// the caller's job.
    pub fn place_piece(&mut self, piece: Piece) {
        debug!(
            x = piece.x(),
            width = piece.width(),
            height = piece.height(),
            "piece spawned"
        );
        self.current = piece;

        if self.current.collides(&self.board, 0, 0) == Collision::Cells {
            self.game_over = true;
            info!(
                score = self.score,
                high_score = self.high_score,
                "game over"
            );
        }
    }

    /// Start over: empty board, zero score, initial speed. High score survives.
    pub fn reset(&mut self) {
        self.board.clear();
        self.score = 0;
        self.speed = self.config.initial_speed;
        self.frames = 0;
        self.game_over = false;
        self.spawn();
        info!(high_score = self.high_score, "session reset");
    }

    fn restart_if_over(&mut self) -> bool {
        if self.game_over {
            self.reset();
            return true;
        }
        false
    }

    /// Translate the current piece if `in_range` and nothing collides
    fn try_shift(&mut self, dx: i32, dy: i32, in_range: bool) -> bool {
        if self.current.is_done() || !in_range {
            return false;
        }
        if self.current.collides(&self.board, dx, dy).is_blocked() {
            return false;
        }
        let (x, y) = (self.current.x(), self.current.y());
        self.current.set_position(x + dx, y + dy);
        true
    }

    /// Each command returns whether state changed. While the game is over every
    /// command restarts the session instead.
    pub fn move_left(&mut self) -> bool {
        if self.restart_if_over() {
            return true;
        }
        let in_range = self.current.x() > 0;
        self.try_shift(-1, 0, in_range)
    }

    pub fn move_right(&mut self) -> bool {
        if self.restart_if_over() {
            return true;
        }
        let max_x = self.board.width() as i32 - self.current.width() as i32;
        let in_range = self.current.x() < max_x;
        self.try_shift(1, 0, in_range)
    }

    /// Manual one-row descent, independent of the gravity cadence
    pub fn move_down(&mut self) -> bool {
        if self.restart_if_over() {
            return true;
        }
        let max_y = self.board.height() as i32 - self.current.height() as i32;
        let in_range = self.current.y() < max_y;
        self.try_shift(0, 1, in_range)
    }

    /// Rotate clockwise, pulling the piece left if it now overhangs the right
    /// edge. A rotation that still collides is undone completely.
    pub fn rotate(&mut self) -> bool {
        if self.restart_if_over() {
            return true;
        }
        if self.current.is_done() {
            return false;
        }

        let (x, y) = (self.current.x(), self.current.y());
        self.current.rotate(1);

        // Only the right edge is clamped.
        let max_x = self.board.width() as i32 - self.current.width() as i32;
        if x > max_x {
            self.current.set_position(max_x, y);
        }

        if self.current.collides(&self.board, 0, 0).is_blocked() {
            self.current.rotate(-1);
            self.current.set_position(x, y);
            return false;
        }
        true
    }

    /// Apply a game action
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_left(),
            GameAction::MoveRight => self.move_right(),
            GameAction::MoveDown => self.move_down(),
            GameAction::Rotate => self.rotate(),
        }
    }

    /// Copy everything a renderer reads into `out`, reusing its allocation
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.width = self.board.width();
        out.height = self.board.height();
        out.board.clear();
        out.board.extend_from_slice(self.board.cells());
        out.active = self.active().map(ActiveSnapshot::from);
        out.score = self.score;
        out.high_score = self.high_score;
        out.speed = self.speed;
        out.game_over = self.game_over;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

/// Uniformly random shape, color, quarter-turn count and column, at row 0
fn roll_piece<R: Rng>(rng: &mut R, board_width: usize) -> Piece {
    let kind = ShapeKind::ALL[rng.gen_range(0..ShapeKind::ALL.len())];
    let color = PALETTE[rng.gen_range(0..PALETTE.len())];
    let turns = rng.gen_range(0..4);

    let mut piece = Piece::from_shape(kind, color);
    piece.rotate(turns);

    let max_x = board_width.saturating_sub(piece.width());
    let x = rng.gen_range(0..=max_x);
    debug!(shape = kind.as_str(), turns, x, "rolled piece");
    piece.at(x as i32, 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SimpleRng;
    use crate::types::Color;

    const GREY: Color = Color::new(128, 128, 128);

    fn game() -> Game<SimpleRng> {
        Game::with_rng(GameConfig::default(), SimpleRng::new(12345)).unwrap()
    }

    fn fill_row_except(board: &mut Board, y: i32, gap: i32) {
        for x in 0..board.width() as i32 {
            if x != gap {
                board.set(x, y, Some(GREY));
            }
        }
    }

    #[test]
    fn test_new_game() {
        let game = game();
        assert_eq!(game.status(), GameStatus::Playing);
        assert_eq!(game.score(), 0);
        assert_eq!(game.high_score(), 0);
        assert_eq!(game.speed(), BASE_SPEED);
        assert_eq!(game.current().y(), 0);
        assert!(game.active().is_some());
    }

    #[test]
    fn test_invalid_config_fails_fast() {
        let err = Game::with_rng(GameConfig::new(2, 2), SimpleRng::new(1)).unwrap_err();
        assert!(matches!(err, ConfigError::BoardTooSmall { .. }));
    }

    #[test]
    fn test_tick_fires_once_per_second_at_base_speed() {
        let mut game = game();
        for _ in 0..59 {
            assert!(!game.tick());
        }
        assert!(game.tick());
        assert_eq!(game.frames, 0);
    }

    #[test]
    fn test_tick_fires_sooner_at_higher_speed() {
        let config = GameConfig::default().with_initial_speed(200);
        let mut game = Game::with_rng(config, SimpleRng::new(1)).unwrap();
        let fired = (0..30).filter(|_| game.tick()).count();
        assert_eq!(fired, 1);
    }

    #[test]
    fn test_tick_threshold_rounds_up_for_fractional_intervals() {
        // 60 / 1.05 = 57.14 frames, so the 58th tick is the first to fire.
        let config = GameConfig::default().with_initial_speed(105);
        let mut game = Game::with_rng(config, SimpleRng::new(1)).unwrap();
        for _ in 0..57 {
            assert!(!game.tick());
        }
        assert!(game.tick());
    }

    #[test]
    fn test_update_moves_piece_down() {
        let mut game = game();
        let y = game.current().y();
        assert_eq!(game.update(), 0);
        assert_eq!(game.current().y(), y + 1);
    }

    #[test]
    fn test_done_piece_is_replaced_on_next_update() {
        let mut game = game();
        let piece = Piece::from_shape(ShapeKind::O, GREY).at(0, 18);
        game.place_piece(piece);

        game.update();
        assert!(game.current().is_done());
        assert!(game.active().is_none());
        assert_eq!(game.board().filled_count(), 4);

        game.update();
        assert!(!game.current().is_done());
    }

    #[test]
    fn test_commands_rejected_while_piece_done() {
        let mut game = game();
        game.place_piece(Piece::from_shape(ShapeKind::O, GREY).at(4, 18));
        game.update();

        assert!(!game.move_left());
        assert!(!game.rotate());
        assert_eq!(game.current().x(), 4);
    }

    #[test]
    fn test_speed_floor_applies_below_base() {
        let config = GameConfig::default().with_initial_speed(50);
        let mut game = Game::with_rng(config, SimpleRng::new(1)).unwrap();
        fill_row_except(game.board_mut(), 19, 0);
        game.place_piece(Piece::from_rows(&[[1u8]], GREY).unwrap().at(0, 18));

        assert_eq!(game.update(), 0);
        assert_eq!(game.update(), 1);
        assert_eq!(game.speed(), BASE_SPEED);
    }

    #[test]
    fn test_cell_at_composites_active_piece() {
        let mut game = game();
        game.board_mut().set(0, 19, Some(GREY));
        let red = Color::new(220, 80, 80);
        game.place_piece(Piece::from_shape(ShapeKind::O, red).at(4, 0));

        assert_eq!(game.cell_at(4, 0), Some(red));
        assert_eq!(game.cell_at(0, 19), Some(GREY));
        assert_eq!(game.cell_at(9, 9), None);
        assert_eq!(game.cell_at(-1, 0), None);
    }

    #[test]
    fn test_snapshot_reuses_buffer() {
        let game = game();
        let mut snap = GameSnapshot::default();
        game.snapshot_into(&mut snap);
        game.snapshot_into(&mut snap);

        assert_eq!(snap.board.len(), 200);
        assert_eq!((snap.width, snap.height), (10, 20));
        assert!(snap.active.is_some());
        assert!(!snap.game_over);
    }

    #[test]
    fn test_rolled_pieces_stay_on_board() {
        let mut rng = SimpleRng::new(42);
        for _ in 0..500 {
            let piece = roll_piece(&mut rng, 10);
            assert_eq!(piece.y(), 0);
            assert!(piece.x() >= 0);
            assert!(piece.x() as usize + piece.width() <= 10);
        }
    }
}
