//! Standings and run records
//!
//! Standings rank the live players by total mass. Run records keep the
//! user's best finished lives (top 10 by peak mass) for the current session.

use serde::{Deserialize, Serialize};

use crate::sim::player::{PlayerId, PlayerKind};
use crate::sim::state::GameState;

/// Maximum number of run records to keep
pub const MAX_RUN_RECORDS: usize = 10;

/// Default number of rows in the live standings
pub const STANDINGS_LEN: usize = 10;

/// One row of the live standings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Standing {
    pub player: PlayerId,
    pub kind: PlayerKind,
    /// Total blob area
    pub mass: f32,
    pub blobs: usize,
}

/// Live players ranked by mass, heaviest first (ties by id)
pub fn standings(state: &GameState, limit: usize) -> Vec<Standing> {
    let mut rows: Vec<Standing> = state
        .players
        .values()
        .filter(|p| !p.is_eliminated())
        .map(|p| Standing {
            player: p.id,
            kind: p.kind,
            mass: p.total_mass(),
            blobs: p.size(),
        })
        .collect();
    rows.sort_by(|a, b| {
        b.mass
            .partial_cmp(&a.mass)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.player.cmp(&b.player))
    });
    rows.truncate(limit);
    rows
}

/// A finished life of the user
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    /// Largest total mass reached
    pub peak_mass: f32,
    /// Seconds between spawn and being eaten
    pub survived_secs: f64,
    /// Simulation time the life ended
    pub ended_at: f64,
}

/// Best finished lives, sorted by peak mass descending
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RunRecords {
    pub entries: Vec<RunRecord>,
}

impl RunRecords {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a peak mass makes the table
    pub fn qualifies(&self, peak_mass: f32) -> bool {
        if peak_mass <= 0.0 {
            return false;
        }
        if self.entries.len() < MAX_RUN_RECORDS {
            return true;
        }
        self.entries
            .last()
            .map(|e| peak_mass > e.peak_mass)
            .unwrap_or(true)
    }

    /// Rank a peak mass would achieve (1-indexed, None if it doesn't qualify)
    pub fn potential_rank(&self, peak_mass: f32) -> Option<usize> {
        if !self.qualifies(peak_mass) {
            return None;
        }
        let rank = self.entries.iter().position(|e| peak_mass > e.peak_mass);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Insert a record if it qualifies, returning its rank
    pub fn add(&mut self, record: RunRecord) -> Option<usize> {
        if !self.qualifies(record.peak_mass) {
            return None;
        }
        let pos = self
            .entries
            .iter()
            .position(|e| record.peak_mass > e.peak_mass);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, record);
                i + 1
            }
            None => {
                self.entries.push(record);
                self.entries.len()
            }
        };
        self.entries.truncate(MAX_RUN_RECORDS);
        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn best(&self) -> Option<&RunRecord> {
        self.entries.first()
    }
}
