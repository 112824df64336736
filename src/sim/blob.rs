//! A single movable, eating, growing circle owned by a player
//!
//! Blobs ejected by a split run through three motion phases:
//! `Shooting` (fast, fixed direction) → `Recovering` (steer back to the
//! player's centre blob) → `Free` (follow player input).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::grown_radius;
use super::entity::{Color, Entity, EntityKind};
use super::player::PlayerId;
use crate::consts::*;

/// Stable blob identifier, unique for the lifetime of a game
pub type BlobId = u32;

/// Motion phase of a blob
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BlobMotion {
    /// Follows the player's input direction
    Free,
    /// Ejected by a split at `started_at` (simulation seconds), flying along `direction`
    Shooting { started_at: f64, direction: Vec2 },
    /// Ejection window over, homing on the player's centre blob
    Recovering,
}

/// A player-owned circle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Blob {
    pub id: BlobId,
    pub owner: PlayerId,
    pub body: Entity,
    pub motion: BlobMotion,
}

impl Blob {
    /// A free blob centred on `center`
    pub fn new(id: BlobId, owner: PlayerId, center: Vec2, radius: f32, color: Color) -> Self {
        Self {
            id,
            owner,
            body: Entity::centered(center, radius, color, EntityKind::Blob),
            motion: BlobMotion::Free,
        }
    }

    /// A freshly ejected blob
    pub fn ejected(
        id: BlobId,
        owner: PlayerId,
        center: Vec2,
        radius: f32,
        color: Color,
        direction: Vec2,
        now: f64,
    ) -> Self {
        let mut blob = Self::new(id, owner, center, radius, color);
        blob.motion = BlobMotion::Shooting {
            started_at: now,
            direction,
        };
        blob
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.body.radius
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.body.center()
    }

    #[inline]
    pub fn is_shooting(&self) -> bool {
        matches!(self.motion, BlobMotion::Shooting { .. })
    }

    #[inline]
    pub fn is_recovering(&self) -> bool {
        self.motion == BlobMotion::Recovering
    }

    /// Ejection direction, only while shooting
    pub fn shoot_direction(&self) -> Option<Vec2> {
        match self.motion {
            BlobMotion::Shooting { direction, .. } => Some(direction),
            _ => None,
        }
    }

    /// Cruising speed for this radius: larger blobs are slower
    #[inline]
    pub fn base_speed(&self) -> f32 {
        BASE_SPEED * self.radius().powf(SPEED_EXPONENT)
    }

    /// Distance covered per tick at simulation time `now`
    ///
    /// While shooting, speed falls linearly from `SHOOT_BOOST * v0` to `v0`
    /// over the ejection window; once the window has passed the blob switches
    /// to `Recovering`.
    pub fn velocity(&mut self, now: f64) -> f32 {
        let v0 = self.base_speed();
        match self.motion {
            BlobMotion::Shooting { started_at, .. } => {
                let delta = (now - started_at).max(0.0);
                if delta > SHOOT_DURATION {
                    self.motion = BlobMotion::Recovering;
                }
                let t = delta.min(SHOOT_DURATION) as f32;
                let slope = v0 * (1.0 - SHOOT_BOOST) / SHOOT_DURATION as f32;
                SHOOT_BOOST * v0 + slope * t
            }
            _ => v0,
        }
    }

    /// Move one tick
    ///
    /// `parent_center`/`parent_radius` describe the owning player's centre blob,
    /// the homing target while recovering.
    pub fn advance(&mut self, direction: Vec2, parent_center: Vec2, parent_radius: f32, now: f64) {
        let heading = match self.motion {
            BlobMotion::Recovering => {
                let to_parent = parent_center - self.center();
                if to_parent.length() < RECOVER_RANGE * parent_radius {
                    self.motion = BlobMotion::Free;
                }
                to_parent.normalize_or_zero()
            }
            BlobMotion::Shooting { direction, .. } => direction.normalize_or_zero(),
            BlobMotion::Free => direction.normalize_or_zero(),
        };
        let speed = self.velocity(now);
        self.body.pos += heading * speed;
    }

    /// Periodic shrink, floored at `MIN_RADIUS`
    pub fn decay(&mut self) {
        if self.radius() > MIN_RADIUS {
            self.body.set_radius((self.radius() * DECAY_FACTOR).max(MIN_RADIUS));
        }
    }

    /// Absorb a circle of `other_radius`: areas add
    pub fn eat(&mut self, other_radius: f32) {
        self.body.set_radius(grown_radius(self.radius(), other_radius));
    }

    /// Halve the radius around the same centre (split)
    pub fn halve(&mut self) {
        self.body.set_radius(self.radius() / 2.0);
    }
}
