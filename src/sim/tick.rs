//! Fixed timestep simulation tick
//!
//! Core game loop that advances the simulation deterministically: user input,
//! movement, food and player collisions, CPU decisions, elimination and decay.

use glam::Vec2;

use super::blob::BlobId;
use super::collision::{dominates, has_collided, has_eaten, trim_direction};
use super::cpu;
use super::player::PlayerId;
use super::state::{GameEvent, GameState};

/// Slack for comparing the summed-`dt` clock against whole intervals
const CLOCK_EPSILON: f64 = 1e-9;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Desired user movement direction (any length; normalised by the blobs)
    pub direction: Vec2,
    /// Split the user's blobs along `direction`
    pub shoot: bool,
}

/// Advance the game state by one timestep of `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f64) {
    state.events.clear();
    state.time += dt;
    state.time_ticks += 1;

    let user_id = state.user_id;
    if input.shoot {
        state.split_player(user_id, input.direction);
    }

    // User: move, then eat
    move_player(state, user_id, input.direction);
    let user_blobs = state
        .players
        .get(&user_id)
        .map(|p| p.blob_ids())
        .unwrap_or_default();
    for blob_id in user_blobs {
        resolve_player_collisions(state, user_id, blob_id);
        resolve_food_collisions(state, user_id, blob_id);
    }

    // CPU players: eat, then decide and move
    for id in state.cpu_ids() {
        let blobs = match state.players.get(&id) {
            Some(p) => p.blob_ids(),
            None => continue,
        };
        for blob_id in blobs {
            resolve_food_collisions(state, id, blob_id);
            resolve_player_collisions(state, id, blob_id);
        }
        if state.players.contains_key(&id) {
            let direction = cpu::decide(state, id);
            move_player(state, id, direction);
        }
    }

    // Periodic decay, applied to every player
    if state.time - state.last_decay >= state.config.decay_interval - CLOCK_EPSILON {
        for player in state.players.values_mut() {
            player.decay();
        }
        state.last_decay = state.time;
        state.events.push(GameEvent::Decayed);
    }

    if let Some(mass) = state.user().map(|u| u.total_mass()) {
        state.user_peak_mass = state.user_peak_mass.max(mass);
    }
}

/// Move a player one tick, trimming the direction at the board edges
pub fn move_player(state: &mut GameState, id: PlayerId, direction: Vec2) {
    let now = state.time;
    let (width, height) = (state.config.game_width, state.config.game_height);
    let Some(player) = state.players.get_mut(&id) else {
        return;
    };
    let direction = trim_direction(direction, player.center(), width, height);
    if let Some(merge) = player.move_blobs(direction, now, width, height) {
        log::debug!(
            "Player {} recombined blob {} into {}",
            id,
            merge.absorbed,
            merge.survivor
        );
        state.events.push(GameEvent::Recombined {
            player: id,
            survivor: merge.survivor,
            absorbed: merge.absorbed,
        });
    }
}

/// Let one blob eat at most one food pellet per grid cell it reaches
///
/// Only food inside the player's visible window counts. Every pellet eaten is
/// replaced so the total stays constant.
pub fn resolve_food_collisions(state: &mut GameState, player_id: PlayerId, blob_id: BlobId) {
    let Some(player) = state.players.get(&player_id) else {
        return;
    };
    let Some(blob) = player.blob(blob_id) else {
        return;
    };
    let window = player.center();
    let half = state.config.half_frame();
    let cells = state.food_cells(blob.center(), blob.radius());

    for cell in cells {
        let Some(body) = state
            .players
            .get(&player_id)
            .and_then(|p| p.blob(blob_id))
            .map(|b| b.body.clone())
        else {
            return;
        };
        let hit = state.food[cell].iter().position(|f| {
            let offset = f.center() - window;
            f.is_food() && offset.x.abs() < half && offset.y.abs() < half && has_collided(&body, f)
        });
        let Some(index) = hit else {
            continue;
        };

        let food = state.food[cell].remove(index);
        if let Some(blob) = state
            .players
            .get_mut(&player_id)
            .and_then(|p| p.blob_mut(blob_id))
        {
            blob.eat(food.radius);
        }
        state.events.push(GameEvent::FoodEaten {
            player: player_id,
            blob: blob_id,
        });
        state.generate_food();
    }
}

/// Let one blob eat at most one rival blob
///
/// The acting blob must dominate its victim and contain its centre. A player
/// left without blobs is replaced (CPU) or respawned (user) immediately.
pub fn resolve_player_collisions(state: &mut GameState, player_id: PlayerId, blob_id: BlobId) {
    let Some(eater) = state
        .players
        .get(&player_id)
        .and_then(|p| p.blob(blob_id))
        .map(|b| b.body.clone())
    else {
        return;
    };

    let victim = state
        .players
        .values()
        .filter(|p| p.id != player_id)
        .flat_map(|p| p.blobs())
        .find(|b| dominates(&eater, &b.body) && has_eaten(&eater, &b.body))
        .map(|b| (b.owner, b.id));
    let Some((victim_id, victim_blob)) = victim else {
        return;
    };

    let Some(eaten) = state
        .players
        .get_mut(&victim_id)
        .and_then(|p| p.remove_blob(victim_blob))
    else {
        return;
    };
    if let Some(blob) = state
        .players
        .get_mut(&player_id)
        .and_then(|p| p.blob_mut(blob_id))
    {
        blob.eat(eaten.radius());
    }
    state.events.push(GameEvent::BlobEaten {
        eater: player_id,
        eater_blob: blob_id,
        victim: victim_id,
        victim_blob,
    });

    let eliminated = state
        .players
        .get(&victim_id)
        .is_some_and(|p| p.is_eliminated());
    if eliminated {
        if victim_id == state.user_id {
            state.respawn_user();
        } else {
            state.replace_cpu(victim_id);
        }
    }
}
