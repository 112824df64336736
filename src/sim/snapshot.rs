//! Render snapshots
//!
//! Flat, owned descriptions of what is visible through a viewport, with both
//! absolute board positions and positions relative to the viewport's corner.
//! The presentation layer draws these and never touches simulation types.

use glam::Vec2;
use serde::Serialize;

use super::collision::circle_overlaps_square;
use super::entity::{Color, Entity, EntityKind};
use super::player::PlayerId;
use super::state::GameState;

/// Square window onto the board
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Viewport {
    /// Board position at the middle of the screen
    pub center: Vec2,
    /// Half the side of the window
    pub half: f32,
}

impl Viewport {
    pub fn new(center: Vec2, half: f32) -> Self {
        Self { center, half }
    }

    /// Board position to screen position (origin at the window's top-left)
    #[inline]
    pub fn to_screen(&self, abs: Vec2) -> Vec2 {
        abs - self.center + Vec2::splat(self.half)
    }

    #[inline]
    pub fn sees(&self, center: Vec2, radius: f32) -> bool {
        circle_overlaps_square(center, radius, self.center, self.half)
    }
}

/// One circle to draw
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderItem {
    /// Blob id, or the bucket-local index for food
    pub id: u32,
    pub kind: EntityKind,
    /// Owning player (blobs only)
    pub owner: Option<PlayerId>,
    /// Absolute centre on the board
    pub center: Vec2,
    /// Centre relative to the viewport
    pub screen: Vec2,
    pub radius: f32,
    pub color: Color,
}

impl RenderItem {
    fn from_entity(id: u32, owner: Option<PlayerId>, entity: &Entity, view: &Viewport) -> Self {
        let center = entity.center();
        Self {
            id,
            kind: entity.kind,
            owner,
            center,
            screen: view.to_screen(center),
            radius: entity.radius,
            color: entity.color,
        }
    }
}

/// Food overlapping the viewport
pub fn food_in_view(state: &GameState, view: &Viewport) -> Vec<RenderItem> {
    let mut items = Vec::new();
    for cell in state.food_cells(view.center, view.half) {
        for (i, food) in state.food[cell].iter().enumerate() {
            if view.sees(food.center(), food.radius) {
                items.push(RenderItem::from_entity(i as u32, None, food, view));
            }
        }
    }
    items
}

/// Blobs overlapping the viewport, CPU players first so the user draws on top
pub fn blobs_in_view(state: &GameState, view: &Viewport) -> Vec<RenderItem> {
    let cpus = state.players.values().filter(|p| p.is_cpu());
    let user = state.user().into_iter();
    cpus.chain(user)
        .flat_map(|p| p.blobs())
        .filter(|b| view.sees(b.center(), b.radius()))
        .map(|b| RenderItem::from_entity(b.id, Some(b.owner), &b.body, view))
        .collect()
}

/// Viewport following a player's centre blob, one frame wide
pub fn player_viewport(state: &GameState, id: PlayerId) -> Option<Viewport> {
    let player = state.players.get(&id).filter(|p| !p.is_eliminated())?;
    Some(Viewport::new(player.center(), state.config.half_frame()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;

    fn empty_state() -> GameState {
        let config = GameConfig {
            food_count: 0,
            cpu_players: 2,
            ..Default::default()
        };
        GameState::with_config(config, 4).unwrap()
    }

    #[test]
    fn test_to_screen_centres_viewport() {
        let view = Viewport::new(Vec2::new(1000.0, 800.0), 300.0);
        assert_eq!(view.to_screen(Vec2::new(1000.0, 800.0)), Vec2::new(300.0, 300.0));
        assert_eq!(view.to_screen(Vec2::new(700.0, 500.0)), Vec2::ZERO);
    }

    #[test]
    fn test_food_filtered_by_viewport() {
        let mut state = empty_state();
        state.add_food(Entity::food(Vec2::new(995.0, 995.0), 5.0, Color::default()));
        state.add_food(Entity::food(Vec2::new(2000.0, 2000.0), 5.0, Color::default()));

        let view = Viewport::new(Vec2::new(1000.0, 1000.0), 300.0);
        let items = food_in_view(&state, &view);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].center, Vec2::new(1000.0, 1000.0));
        assert_eq!(items[0].screen, Vec2::new(300.0, 300.0));
        assert_eq!(items[0].kind, EntityKind::Food);
        assert_eq!(items[0].owner, None);
    }

    #[test]
    fn test_user_blobs_drawn_last() {
        let mut state = empty_state();
        let user = state.user_id;
        state.place_player(0, Vec2::new(1000.0, 1000.0), 30.0);
        state.place_player(1, Vec2::new(1100.0, 1000.0), 30.0);
        state.place_player(user, Vec2::new(1050.0, 1000.0), 10.0);

        let view = player_viewport(&state, user).unwrap();
        assert_eq!(view.center, Vec2::new(1050.0, 1000.0));
        let items = blobs_in_view(&state, &view);
        assert_eq!(items.len(), 3);
        assert_eq!(items.last().and_then(|i| i.owner), Some(user));
        assert!(items.iter().all(|i| i.kind == EntityKind::Blob));
    }

    #[test]
    fn test_offscreen_blob_skipped() {
        let mut state = empty_state();
        let user = state.user_id;
        state.place_player(0, Vec2::new(100.0, 100.0), 30.0);
        state.place_player(1, Vec2::new(2300.0, 2300.0), 30.0);
        state.place_player(user, Vec2::new(1200.0, 1200.0), 10.0);

        let view = player_viewport(&state, user).unwrap();
        let owners: Vec<_> = blobs_in_view(&state, &view).iter().filter_map(|i| i.owner).collect();
        assert_eq!(owners, vec![user]);
    }
}
