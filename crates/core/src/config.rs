//! Session configuration and its validation.

use std::time::Duration;

use thiserror::Error;

use crate::catalog::MAX_EXTENT;
use crate::types::{BASE_SPEED, DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH, DEFAULT_FRAME_RATE};

pub const ENV_WIDTH: &str = "BLOCKFALL_WIDTH";
pub const ENV_HEIGHT: &str = "BLOCKFALL_HEIGHT";
pub const ENV_FRAME_RATE: &str = "BLOCKFALL_FPS";
pub const ENV_SPEED: &str = "BLOCKFALL_SPEED";

/// Largest accepted board width or height in cells
pub const MAX_BOARD_DIMENSION: usize = 4096;

/// Construction-time misconfiguration. There is no recovery path once a
/// session exists, so these are reported before one is built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("frame rate must be at least 1 tick per second")]
    ZeroFrameRate,
    #[error("initial speed must be a positive percentage")]
    ZeroSpeed,
    #[error(
        "board is {width}x{height} cells but must be at least {min_width}x{min_height} to fit every piece"
    )]
    BoardTooSmall {
        width: usize,
        height: usize,
        min_width: usize,
        min_height: usize,
    },
    #[error("board is {width}x{height} cells but neither side may exceed {max}")]
    BoardTooLarge {
        width: usize,
        height: usize,
        max: usize,
    },
    #[error("{key}={value:?} is not a valid number")]
    InvalidValue { key: &'static str, value: String },
}

/// Parameters fixed for the lifetime of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    /// Board width in cells
    pub width: usize,
    /// Board height in cells
    pub height: usize,
    /// Rate at which the driver calls `tick` (Hz)
    pub frame_rate: u32,
    /// Starting fall speed as a percentage of one row per second
    pub initial_speed: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_BOARD_WIDTH,
            height: DEFAULT_BOARD_HEIGHT,
            frame_rate: DEFAULT_FRAME_RATE,
            initial_speed: BASE_SPEED,
        }
    }
}

impl GameConfig {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn with_frame_rate(mut self, frame_rate: u32) -> Self {
        self.frame_rate = frame_rate;
        self
    }

    pub fn with_initial_speed(mut self, initial_speed: u32) -> Self {
        self.initial_speed = initial_speed;
        self
    }

    /// Create from environment variables, falling back to defaults for unset ones
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`GameConfig::from_env`] with a caller-supplied variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let config = Self {
            width: parse_var(&lookup, ENV_WIDTH, defaults.width)?,
            height: parse_var(&lookup, ENV_HEIGHT, defaults.height)?,
            frame_rate: parse_var(&lookup, ENV_FRAME_RATE, defaults.frame_rate)?,
            initial_speed: parse_var(&lookup, ENV_SPEED, defaults.initial_speed)?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width < MAX_EXTENT || self.height < MAX_EXTENT {
            return Err(ConfigError::BoardTooSmall {
                width: self.width,
                height: self.height,
                min_width: MAX_EXTENT,
                min_height: MAX_EXTENT,
            });
        }
        if self.width > MAX_BOARD_DIMENSION || self.height > MAX_BOARD_DIMENSION {
            return Err(ConfigError::BoardTooLarge {
                width: self.width,
                height: self.height,
                max: MAX_BOARD_DIMENSION,
            });
        }
        if self.frame_rate == 0 {
            return Err(ConfigError::ZeroFrameRate);
        }
        if self.initial_speed == 0 {
            return Err(ConfigError::ZeroSpeed);
        }
        Ok(())
    }

    /// Period between driver ticks
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs(1) / self.frame_rate.max(1)
    }
}

fn parse_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    let Some(raw) = lookup(key) else {
        return Ok(default);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(default);
    }
    trimmed.parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value: raw.clone(),
    })
}
