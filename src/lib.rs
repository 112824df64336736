//! Blob Arena - simulation core for an agar.io-style area-control game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (grid, blobs, players, collisions, CPU policy)
//! - `game`: Presentation-facing facade (pending input, snapshots)
//! - `config`: Immutable game configuration
//! - `leaderboard`: Live standings and per-life run records

pub mod config;
pub mod game;
pub mod leaderboard;
pub mod sim;

pub use config::{ConfigError, GameConfig};
pub use game::Game;
pub use leaderboard::{RunRecords, Standing};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Board dimensions
    pub const GAME_WIDTH: f32 = 2400.0;
    pub const GAME_HEIGHT: f32 = 2400.0;
    /// Side of one grid cell, also the visible window around a player
    pub const FRAME_SIZE: f32 = 600.0;

    /// Fixed tick cadence (seconds)
    pub const TICK_DT: f64 = 0.05;
    /// Seconds between decay ticks
    pub const DECAY_INTERVAL: f64 = 10.0;

    /// Population
    pub const FOOD_COUNT: usize = 2000;
    pub const CPU_PLAYERS: usize = 20;
    pub const INITIAL_RADIUS: f32 = 10.0;

    /// Food lattice: pellets are scattered around points `FOOD_SPACING` apart
    pub const FOOD_RADIUS: f32 = 5.0;
    pub const FOOD_SPACING: f32 = 54.5;
    pub const FOOD_SPREAD: f32 = 20.0;

    /// Speed law: v = BASE_SPEED * r^SPEED_EXPONENT
    pub const BASE_SPEED: f32 = 20.0;
    pub const SPEED_EXPONENT: f32 = -0.439;

    /// Ejected blobs start SHOOT_BOOST times faster and slow down over SHOOT_DURATION
    pub const SHOOT_BOOST: f32 = 5.0;
    pub const SHOOT_DURATION: f64 = 2.0;
    /// A recovering blob is home once within this many parent radii
    pub const RECOVER_RANGE: f32 = 1.5;

    /// Decay multiplies radius by DECAY_FACTOR, never below MIN_RADIUS
    pub const DECAY_FACTOR: f32 = 0.99;
    pub const MIN_RADIUS: f32 = 10.0;

    /// Splitting
    pub const SPLIT_MIN_RADIUS: f32 = 20.0;
    pub const MAX_BLOBS: usize = 16;

    /// Recombination waits RECOVERY_BASE + RECOVERY_PER_RADIUS * total radius seconds
    pub const RECOVERY_BASE: f64 = 30.0;
    pub const RECOVERY_PER_RADIUS: f64 = 0.02;

    /// a dominates b when a.r > b.r / DOMINANCE_RATIO
    pub const DOMINANCE_RATIO: f32 = 0.75;

    /// CPU perception
    pub const SIGHT_RADIUS: f32 = 300.0;
    pub const MIN_THREAT_SCORE: f32 = 2.0;
    pub const MIN_THREAT_DISTANCE: f32 = 0.1;
}

/// Component-wise clamp of a point to a `width` x `height` board
#[inline]
pub fn clamp_to_board(pos: Vec2, width: f32, height: f32) -> Vec2 {
    Vec2::new(pos.x.clamp(0.0, width), pos.y.clamp(0.0, height))
}
