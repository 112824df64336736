//! Game state and world population
//!
//! Everything the controller owns: players, food buckets, grid, RNG and the
//! simulation clock. Spawning and respawning live here; the per-tick rules
//! live in `tick`.

use std::collections::BTreeMap;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::blob::BlobId;
use super::entity::Entity;
use super::grid::Grid;
use super::player::{Player, PlayerId, PlayerKind};
use super::random::{gauss_point, random_color};
use crate::config::{ConfigError, GameConfig};
use crate::consts::*;
use crate::leaderboard::{RunRecord, RunRecords};

/// Hands out blob ids, never reusing one within a game
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IdAllocator {
    last: u32,
}

impl IdAllocator {
    pub fn next_id(&mut self) -> BlobId {
        self.last += 1;
        self.last
    }
}

/// Something that happened during the last tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    FoodEaten { player: PlayerId, blob: BlobId },
    BlobEaten {
        eater: PlayerId,
        eater_blob: BlobId,
        victim: PlayerId,
        victim_blob: BlobId,
    },
    PlayerSplit { player: PlayerId, blobs: usize },
    Recombined { player: PlayerId, survivor: BlobId, absorbed: BlobId },
    /// A CPU player lost its last blob and was replaced under the same id
    PlayerReplaced { player: PlayerId },
    /// The user lost its last blob and restarted
    UserRespawned { player: PlayerId },
    Decayed,
}

/// Endless sweep over a lattice of food anchor points
///
/// Each pellet lands gaussian-scattered around the next anchor, column by
/// column, so food stays spread over the whole board.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodLattice {
    cols: usize,
    rows: usize,
    col: usize,
    row: usize,
}

impl FoodLattice {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            cols: ((width / FOOD_SPACING) as usize).max(1),
            rows: ((height / FOOD_SPACING) as usize).max(1),
            col: 0,
            row: 0,
        }
    }

    /// Next anchor point, wrapping back to the origin after the last one
    pub fn next_anchor(&mut self) -> Vec2 {
        let anchor = Vec2::new(self.col as f32 * FOOD_SPACING, self.row as f32 * FOOD_SPACING);
        self.row += 1;
        if self.row == self.rows {
            self.row = 0;
            self.col = (self.col + 1) % self.cols;
        }
        anchor
    }
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: GameConfig,
    pub grid: Grid,
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    /// Simulation clock (seconds)
    pub time: f64,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Clock value of the last decay tick
    pub last_decay: f64,
    /// All players, user included, by id
    pub players: BTreeMap<PlayerId, Player>,
    pub user_id: PlayerId,
    /// Food bucketed by grid cell
    pub food: Vec<Vec<Entity>>,
    /// Events from the most recent tick
    pub events: Vec<GameEvent>,
    /// Finished lives of the user
    pub records: RunRecords,
    /// Largest total mass of the user's current life
    pub user_peak_mass: f32,
    lattice: FoodLattice,
    ids: IdAllocator,
}

impl GameState {
    /// Create a new game with default configuration and the given seed
    pub fn new(seed: u64) -> Self {
        Self::build(GameConfig::default(), seed)
    }

    /// Create a new game from a custom configuration
    pub fn with_config(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, seed))
    }

    fn build(config: GameConfig, seed: u64) -> Self {
        let grid = Grid::from_config(&config);
        let lattice = FoodLattice::new(config.game_width, config.game_height);
        let user_id = config.cpu_players as PlayerId + 1;
        let mut state = Self {
            food: vec![Vec::new(); grid.len()],
            grid,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            time: 0.0,
            time_ticks: 0,
            last_decay: 0.0,
            players: BTreeMap::new(),
            user_id,
            events: Vec::new(),
            records: RunRecords::new(),
            user_peak_mass: 0.0,
            lattice,
            ids: IdAllocator::default(),
            config,
        };

        for _ in 0..state.config.food_count {
            state.generate_food();
        }
        for id in 0..state.config.cpu_players as PlayerId {
            let radius = state.random_cpu_radius();
            let player = state.spawn_player(id, PlayerKind::Cpu, radius);
            state.players.insert(id, player);
        }
        let user = state.spawn_player(user_id, PlayerKind::User, state.config.initial_radius);
        state.user_peak_mass = user.total_mass();
        state.players.insert(user_id, user);

        log::info!(
            "World created: {}x{} board, {} cells, {} food, {} CPU players (seed {})",
            state.config.game_width,
            state.config.game_height,
            state.grid.len(),
            state.food_count(),
            state.config.cpu_players,
            seed
        );
        state
    }

    pub fn user(&self) -> Option<&Player> {
        self.players.get(&self.user_id)
    }

    /// CPU player ids in ascending order
    pub fn cpu_ids(&self) -> Vec<PlayerId> {
        self.players
            .values()
            .filter(|p| p.is_cpu())
            .map(|p| p.id)
            .collect()
    }

    /// Split a player's blobs along `direction`; returns whether it fired
    pub fn split_player(&mut self, id: PlayerId, direction: Vec2) -> bool {
        let now = self.time;
        let split_min = self.config.split_min_radius;
        let max_blobs = self.config.max_blobs;
        let Some(player) = self.players.get_mut(&id) else {
            return false;
        };
        if !player.shoot(direction, now, split_min, max_blobs, &mut self.ids) {
            return false;
        }
        let blobs = player.size();
        self.events.push(GameEvent::PlayerSplit { player: id, blobs });
        true
    }

    /// Total food on the board
    pub fn food_count(&self) -> usize {
        self.food.iter().map(Vec::len).sum()
    }

    /// Cells that can hold food overlapping the square `center ± extent`
    ///
    /// Food is filed under the cell of its top-left corner, which may sit up
    /// to one pellet diameter outside the square.
    pub fn food_cells(&self, center: Vec2, extent: f32) -> Vec<usize> {
        self.grid.cells_in_square(center, extent + 2.0 * FOOD_RADIUS)
    }

    /// File a food entity under its home cell
    pub fn add_food(&mut self, food: Entity) {
        debug_assert!(food.is_food());
        let cell = food.home_cell(&self.grid);
        self.food[cell].push(food);
    }

    /// Drop a new pellet scattered around the next lattice anchor
    pub fn generate_food(&mut self) {
        let anchor = self.lattice.next_anchor();
        let pos = gauss_point(
            &mut self.rng,
            anchor,
            FOOD_SPREAD,
            self.config.game_width,
            self.config.game_height,
        );
        let color = random_color(&mut self.rng);
        self.add_food(Entity::food(pos, FOOD_RADIUS, color));
    }

    /// CPU spawn radius: a whole number in `[r0, 10 r0)`
    fn random_cpu_radius(&mut self) -> f32 {
        let r0 = self.config.initial_radius;
        self.rng.random_range(r0..10.0 * r0).floor().max(r0)
    }

    /// Spawn position, bunched toward the middle of the board
    fn spawn_position(&mut self) -> Vec2 {
        let middle = Vec2::new(self.config.game_width, self.config.game_height) / 2.0;
        gauss_point(
            &mut self.rng,
            middle,
            self.config.frame_size,
            self.config.game_width,
            self.config.game_height,
        )
    }

    /// Build a fresh single-blob player at a random position (not inserted)
    pub fn spawn_player(&mut self, id: PlayerId, kind: PlayerKind, radius: f32) -> Player {
        let center = self.spawn_position();
        let color = random_color(&mut self.rng);
        Player::new(id, kind, center, radius, color, self.time, &mut self.ids)
    }

    /// Swap a player for a single blob at a fixed spot
    #[cfg(test)]
    pub(crate) fn place_player(&mut self, id: PlayerId, center: Vec2, radius: f32) {
        let kind = if id == self.user_id {
            PlayerKind::User
        } else {
            PlayerKind::Cpu
        };
        let color = super::entity::Color::default();
        let player = Player::new(id, kind, center, radius, color, self.time, &mut self.ids);
        self.players.insert(id, player);
    }

    /// Replace an eliminated CPU player with a new one under the same id
    pub fn replace_cpu(&mut self, id: PlayerId) {
        let radius = self.random_cpu_radius();
        let player = self.spawn_player(id, PlayerKind::Cpu, radius);
        log::debug!("CPU player {} replaced (radius {})", id, radius);
        self.players.insert(id, player);
        self.events.push(GameEvent::PlayerReplaced { player: id });
    }

    /// Restart the user at the initial radius, recording the life that ended
    pub fn respawn_user(&mut self) {
        let id = self.user_id;
        let spawned_at = self.user().map(|u| u.spawned_at).unwrap_or(self.time);
        let record = RunRecord {
            peak_mass: self.user_peak_mass,
            survived_secs: self.time - spawned_at,
            ended_at: self.time,
        };
        let rank = self.records.add(record);
        log::info!(
            "User eaten after {:.1}s (peak mass {:.0}, rank {:?}), respawning",
            record.survived_secs,
            record.peak_mass,
            rank
        );

        let user = self.spawn_player(id, PlayerKind::User, self.config.initial_radius);
        self.user_peak_mass = user.total_mass();
        self.players.insert(id, user);
        self.events.push(GameEvent::UserRespawned { player: id });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> GameConfig {
        GameConfig {
            food_count: 100,
            cpu_players: 3,
            ..Default::default()
        }
    }

    #[test]
    fn test_initial_population() {
        let state = GameState::new(12345);
        assert_eq!(state.food_count(), FOOD_COUNT);
        assert_eq!(state.players.len(), CPU_PLAYERS + 1);
        assert_eq!(state.user_id, CPU_PLAYERS as PlayerId + 1);
        assert_eq!(state.cpu_ids().len(), CPU_PLAYERS);

        let user = state.user().unwrap();
        assert_eq!(user.size(), 1);
        assert_eq!(user.center_radius(), INITIAL_RADIUS);
        assert_eq!(user.kind, PlayerKind::User);
    }

    #[test]
    fn test_cpu_radius_range() {
        let state = GameState::new(9);
        for id in state.cpu_ids() {
            let r = state.players[&id].center_radius();
            assert!((INITIAL_RADIUS..10.0 * INITIAL_RADIUS).contains(&r));
            assert_eq!(r, r.floor());
        }
    }

    #[test]
    fn test_players_spawn_on_board() {
        let state = GameState::new(77);
        for p in state.players.values() {
            let c = p.center();
            assert!((0.0..=GAME_WIDTH).contains(&c.x));
            assert!((0.0..=GAME_HEIGHT).contains(&c.y));
        }
    }

    #[test]
    fn test_food_filed_under_home_cell() {
        let state = GameState::with_config(small_config(), 5).unwrap();
        for (cell, bucket) in state.food.iter().enumerate() {
            for f in bucket {
                assert_eq!(f.home_cell(&state.grid), cell);
                assert_eq!(f.radius, FOOD_RADIUS);
            }
        }
    }

    #[test]
    fn test_same_seed_same_world() {
        let a = GameState::with_config(small_config(), 42).unwrap();
        let b = GameState::with_config(small_config(), 42).unwrap();
        assert_eq!(a.food, b.food);
        for (pa, pb) in a.players.values().zip(b.players.values()) {
            assert_eq!(pa.center(), pb.center());
            assert_eq!(pa.center_radius(), pb.center_radius());
        }
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = GameConfig {
            frame_size: -1.0,
            ..Default::default()
        };
        assert!(GameState::with_config(config, 1).is_err());
    }

    #[test]
    fn test_lattice_sweeps_columns() {
        let mut lattice = FoodLattice::new(GAME_WIDTH, GAME_HEIGHT);
        assert_eq!(lattice.next_anchor(), Vec2::ZERO);
        assert_eq!(lattice.next_anchor(), Vec2::new(0.0, FOOD_SPACING));
        for _ in 2..44 {
            lattice.next_anchor();
        }
        assert_eq!(lattice.next_anchor(), Vec2::new(FOOD_SPACING, 0.0));
        for _ in 1..(44 * 44) {
            lattice.next_anchor();
        }
        assert_eq!(lattice.next_anchor(), Vec2::new(FOOD_SPACING, 0.0));
    }

    #[test]
    fn test_replace_cpu_keeps_id() {
        let mut state = GameState::with_config(small_config(), 3).unwrap();
        let before = state.players[&1].blob_ids();
        state.replace_cpu(1);
        let after = &state.players[&1];
        assert_eq!(after.id, 1);
        assert_eq!(after.size(), 1);
        assert!(after.is_cpu());
        assert_ne!(after.blob_ids(), before);
        assert_eq!(state.events, vec![GameEvent::PlayerReplaced { player: 1 }]);
    }

    #[test]
    fn test_respawn_user_records_life() {
        let mut state = GameState::with_config(small_config(), 3).unwrap();
        state.time = 12.5;
        state.respawn_user();
        let user = state.user().unwrap();
        assert_eq!(user.id, state.user_id);
        assert_eq!(user.center_radius(), INITIAL_RADIUS);
        assert_eq!(user.spawned_at, 12.5);
        assert_eq!(state.records.entries.len(), 1);
        assert!((state.records.entries[0].survived_secs - 12.5).abs() < 1e-9);
    }
}
