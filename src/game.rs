//! Presentation-facing game handle
//!
//! Owns the simulation and the input the user has queued since the last tick.
//! A front end calls `tick` on its own clock and reads snapshots back.

use glam::Vec2;

use crate::config::{ConfigError, GameConfig};
use crate::leaderboard::{self, RunRecords, Standing, STANDINGS_LEN};
use crate::sim::snapshot::{self, RenderItem, Viewport};
use crate::sim::{GameEvent, GameState, TickInput, tick};

pub struct Game {
    state: GameState,
    input: TickInput,
}

impl Game {
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        Ok(Self {
            state: GameState::with_config(config, seed)?,
            input: TickInput::default(),
        })
    }

    /// Advance the simulation by `dt` seconds using the queued input
    pub fn tick(&mut self, dt: f64) {
        tick(&mut self.state, &self.input, dt);
        // One-shot
        self.input.shoot = false;
    }

    /// Direction the user steers toward; persists until changed
    pub fn set_user_direction(&mut self, direction: Vec2) {
        self.input.direction = direction;
    }

    /// Split the user's blobs on the next tick
    pub fn trigger_user_shoot(&mut self) {
        self.input.shoot = true;
    }

    pub fn food_in_view(&self, view: &Viewport) -> Vec<RenderItem> {
        snapshot::food_in_view(&self.state, view)
    }

    pub fn blobs_in_view(&self, view: &Viewport) -> Vec<RenderItem> {
        snapshot::blobs_in_view(&self.state, view)
    }

    /// The window centred on the user's centre blob
    pub fn user_viewport(&self) -> Option<Viewport> {
        snapshot::player_viewport(&self.state, self.state.user_id)
    }

    pub fn standings(&self) -> Vec<Standing> {
        leaderboard::standings(&self.state, STANDINGS_LEN)
    }

    pub fn run_records(&self) -> &RunRecords {
        &self.state.records
    }

    /// Events from the last tick; empties the queue
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.state.events)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet_game() -> Game {
        let config = GameConfig {
            food_count: 50,
            cpu_players: 0,
            ..Default::default()
        };
        Game::new(config, 11).unwrap()
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let config = GameConfig {
            max_blobs: 0,
            ..Default::default()
        };
        assert!(matches!(Game::new(config, 1), Err(ConfigError::BlobCap { .. })));
    }

    #[test]
    fn test_shoot_is_one_shot() {
        let mut game = quiet_game();
        let user = game.state().user_id;
        game.state.place_player(user, Vec2::new(1200.0, 1200.0), 100.0);

        game.set_user_direction(Vec2::X);
        game.trigger_user_shoot();
        game.tick(0.05);
        assert_eq!(game.state().user().map(|u| u.size()), Some(2));
        assert!(game.drain_events().iter().any(|e| matches!(e, GameEvent::PlayerSplit { .. })));

        game.tick(0.05);
        assert_eq!(game.state().user().map(|u| u.size()), Some(2));
    }

    #[test]
    fn test_drain_events_empties_queue() {
        let mut game = quiet_game();
        game.state.events.push(GameEvent::Decayed);
        assert_eq!(game.drain_events(), vec![GameEvent::Decayed]);
        assert!(game.drain_events().is_empty());
    }

    #[test]
    fn test_user_viewport_follows_user() {
        let mut game = quiet_game();
        game.set_user_direction(Vec2::new(1.0, 1.0));
        for _ in 0..10 {
            game.tick(0.05);
        }
        let view = game.user_viewport().unwrap();
        let user = game.state().user().unwrap();
        assert_eq!(view.center, user.center());
        assert_eq!(view.half, 300.0);
        assert!(!game.blobs_in_view(&view).is_empty());
        assert_eq!(game.standings().len(), 1);
        assert!(game.run_records().is_empty());
    }
}
