//! Players: an owner of 1-16 blobs tracked through one centre blob
//!
//! Blobs live in an ordered map keyed by their stable id, so iteration order
//! (and therefore the simulation) is deterministic and removal is by id.

use std::collections::BTreeMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::blob::{Blob, BlobId};
use super::entity::Color;
use super::state::IdAllocator;
use crate::consts::*;

/// Stable player identifier; survives elimination and respawn
pub type PlayerId = u32;

/// Who steers the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerKind {
    User,
    Cpu,
}

/// Outcome of a recombination inside one player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Merge {
    pub survivor: BlobId,
    pub absorbed: BlobId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub kind: PlayerKind,
    pub color: Color,
    /// Radius the player spawned with
    pub spawn_radius: f32,
    /// Simulation time of the last split
    pub split_at: Option<f64>,
    /// Simulation time the player (re)spawned
    pub spawned_at: f64,
    blobs: BTreeMap<BlobId, Blob>,
    center: BlobId,
}

impl Player {
    /// A fresh player with a single free blob centred on `center`
    pub fn new(
        id: PlayerId,
        kind: PlayerKind,
        center: Vec2,
        radius: f32,
        color: Color,
        now: f64,
        ids: &mut IdAllocator,
    ) -> Self {
        let blob_id = ids.next_id();
        let mut blobs = BTreeMap::new();
        blobs.insert(blob_id, Blob::new(blob_id, id, center, radius, color));
        Self {
            id,
            kind,
            color,
            spawn_radius: radius,
            split_at: None,
            spawned_at: now,
            blobs,
            center: blob_id,
        }
    }

    #[inline]
    pub fn is_cpu(&self) -> bool {
        self.kind == PlayerKind::Cpu
    }

    /// Number of blobs
    #[inline]
    pub fn size(&self) -> usize {
        self.blobs.len()
    }

    #[inline]
    pub fn is_eliminated(&self) -> bool {
        self.blobs.is_empty()
    }

    pub fn blobs(&self) -> impl Iterator<Item = &Blob> {
        self.blobs.values()
    }

    pub fn blob_ids(&self) -> Vec<BlobId> {
        self.blobs.keys().copied().collect()
    }

    pub fn blob(&self, id: BlobId) -> Option<&Blob> {
        self.blobs.get(&id)
    }

    pub fn blob_mut(&mut self, id: BlobId) -> Option<&mut Blob> {
        self.blobs.get_mut(&id)
    }

    #[inline]
    pub fn center_id(&self) -> BlobId {
        self.center
    }

    /// The blob the camera follows
    pub fn center_blob(&self) -> Option<&Blob> {
        self.blobs.get(&self.center)
    }

    /// Absolute position of the centre blob
    pub fn center(&self) -> Vec2 {
        debug_assert!(!self.is_eliminated(), "player {} has no blobs", self.id);
        self.center_blob().map(Blob::center).unwrap_or_default()
    }

    /// Radius of the centre blob
    pub fn center_radius(&self) -> f32 {
        self.center_blob().map(Blob::radius).unwrap_or(self.spawn_radius)
    }

    /// Sum of blob radii
    pub fn total_radius(&self) -> f32 {
        self.blobs.values().map(Blob::radius).sum()
    }

    /// Sum of blob areas
    pub fn total_mass(&self) -> f32 {
        self.blobs.values().map(|b| b.body.area()).sum()
    }

    /// Split every blob in two, ejecting the new halves along `direction`
    ///
    /// Fires only while every blob is above `split_min_radius` and the player
    /// is below `max_blobs`. Returns whether the split happened.
    pub fn shoot(
        &mut self,
        direction: Vec2,
        now: f64,
        split_min_radius: f32,
        max_blobs: usize,
        ids: &mut IdAllocator,
    ) -> bool {
        let size = self.size();
        let can_split = size < max_blobs && self.blobs.values().all(|b| b.radius() > split_min_radius);
        if !can_split {
            return false;
        }
        let Some(center) = self.center_blob() else {
            return false;
        };
        let origin = center.center();
        let radius = center.radius() / 2.0;

        for blob in self.blobs.values_mut() {
            blob.halve();
        }
        for _ in 0..size.min(max_blobs - size) {
            let id = ids.next_id();
            let blob = Blob::ejected(id, self.id, origin, radius, self.color, direction, now);
            self.blobs.insert(id, blob);
        }
        self.split_at = Some(now);
        log::debug!("Player {} split into {} blobs", self.id, self.size());
        true
    }

    /// Seconds after a split before blobs may recombine; grows with total size
    pub fn recovery_time(&self) -> f64 {
        RECOVERY_BASE + RECOVERY_PER_RADIUS * self.total_radius() as f64
    }

    /// Whether enough time has passed since the last split to recombine
    pub fn can_recombine(&self, now: f64) -> bool {
        self.split_at
            .is_some_and(|at| now - at > self.recovery_time())
    }

    /// Advance every blob one tick, then allow at most one recombination
    pub fn move_blobs(&mut self, direction: Vec2, now: f64, width: f32, height: f32) -> Option<Merge> {
        for id in self.blob_ids() {
            let (parent_center, parent_radius) = match self.center_blob() {
                Some(c) => (c.center(), c.radius()),
                None => break,
            };
            if let Some(blob) = self.blobs.get_mut(&id) {
                blob.advance(direction, parent_center, parent_radius, now);
                let clamped = crate::clamp_to_board(blob.center(), width, height);
                blob.body.set_center(clamped);
            }
        }

        if !self.can_recombine(now) {
            return None;
        }
        let merge = self.find_merge()?;
        let absorbed = self.remove_blob(merge.absorbed)?;
        if let Some(survivor) = self.blobs.get_mut(&merge.survivor) {
            survivor.eat(absorbed.radius());
        }
        if absorbed.id == self.center || !self.blobs.contains_key(&self.center) {
            self.center = merge.survivor;
        }
        Some(merge)
    }

    /// First pair of own blobs close enough for the larger to swallow the smaller.
    /// Own blobs need no size advantage, only proximity.
    fn find_merge(&self) -> Option<Merge> {
        for a in self.blobs.values() {
            for b in self.blobs.values() {
                if a.id == b.id || a.radius() < b.radius() {
                    continue;
                }
                if a.center().distance(b.center()) < a.radius() {
                    return Some(Merge {
                        survivor: a.id,
                        absorbed: b.id,
                    });
                }
            }
        }
        None
    }

    /// Remove a blob by id, promoting another blob to centre if needed
    pub fn remove_blob(&mut self, id: BlobId) -> Option<Blob> {
        let removed = self.blobs.remove(&id)?;
        if id == self.center {
            if let Some(&next) = self.blobs.keys().next() {
                self.center = next;
            }
        }
        Some(removed)
    }

    pub fn decay(&mut self) {
        for blob in self.blobs.values_mut() {
            blob.decay();
        }
    }
}
