//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by player and blob ID)
//! - No rendering or platform dependencies

pub mod blob;
pub mod collision;
pub mod cpu;
pub mod entity;
pub mod grid;
pub mod player;
pub mod random;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use blob::{Blob, BlobId, BlobMotion};
pub use collision::{dominates, has_collided, has_eaten, is_dominated_by};
pub use entity::{Color, Entity, EntityKind};
pub use grid::Grid;
pub use player::{Player, PlayerId, PlayerKind};
pub use snapshot::{RenderItem, Viewport, blobs_in_view, food_in_view};
pub use state::{GameEvent, GameState};
pub use tick::{TickInput, tick};
