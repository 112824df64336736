//! Game configuration
//!
//! Fixed parameters handed to the simulation at construction. Defaults come
//! from [`crate::consts`]; a JSON file may override any subset of them.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Reasons a configuration cannot be used
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
    #[error("frame size {frame} does not fit a {width}x{height} board")]
    FrameTooLarge { frame: f32, width: f32, height: f32 },
    #[error("blob cap must be between 1 and {max}, got {got}")]
    BlobCap { got: usize, max: usize },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
}

/// Immutable simulation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Board ===
    pub game_width: f32,
    pub game_height: f32,
    /// Grid cell side and visible window size
    pub frame_size: f32,

    // === Population ===
    pub food_count: usize,
    pub cpu_players: usize,
    pub initial_radius: f32,

    // === Timing ===
    /// Tick cadence the driver is expected to use (seconds)
    pub tick_dt: f64,
    /// Seconds between decay ticks
    pub decay_interval: f64,

    // === Splitting ===
    pub split_min_radius: f32,
    pub max_blobs: usize,

    // === CPU ===
    pub sight_radius: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            game_width: GAME_WIDTH,
            game_height: GAME_HEIGHT,
            frame_size: FRAME_SIZE,

            food_count: FOOD_COUNT,
            cpu_players: CPU_PLAYERS,
            initial_radius: INITIAL_RADIUS,

            tick_dt: TICK_DT,
            decay_interval: DECAY_INTERVAL,

            split_min_radius: SPLIT_MIN_RADIUS,
            max_blobs: MAX_BLOBS,

            sight_radius: SIGHT_RADIUS,
        }
    }
}

impl GameConfig {
    /// Check that the parameters describe a playable board
    pub fn validate(&self) -> Result<(), ConfigError> {
        let dims = [self.game_width, self.game_height, self.frame_size];
        if dims.iter().any(|d| !d.is_finite() || *d <= 0.0) {
            return Err(ConfigError::Invalid("board and frame sizes must be positive"));
        }
        if self.frame_size > self.game_width || self.frame_size > self.game_height {
            return Err(ConfigError::FrameTooLarge {
                frame: self.frame_size,
                width: self.game_width,
                height: self.game_height,
            });
        }
        if !(self.initial_radius > 0.0) {
            return Err(ConfigError::Invalid("initial radius must be positive"));
        }
        if !(self.tick_dt > 0.0) || !(self.decay_interval > 0.0) {
            return Err(ConfigError::Invalid("tick and decay intervals must be positive"));
        }
        if self.max_blobs == 0 || self.max_blobs > MAX_BLOBS {
            return Err(ConfigError::BlobCap {
                got: self.max_blobs,
                max: MAX_BLOBS,
            });
        }
        if !(self.sight_radius > 0.0) {
            return Err(ConfigError::Invalid("sight radius must be positive"));
        }
        Ok(())
    }

    /// Parse and validate a JSON document
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load from a JSON file on disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.as_ref().display());
        Ok(config)
    }

    /// Half of the visible window (distance from a player's centre to the window edge)
    #[inline]
    pub fn half_frame(&self) -> f32 {
        self.frame_size / 2.0
    }
}
