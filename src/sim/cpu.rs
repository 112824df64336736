//! CPU decision policy
//!
//! Each tick a CPU player looks at everything inside its sight window, scores
//! the worst threat, the juiciest target and the nearest food, and steers
//! toward (or away from) whichever scores highest.

use glam::Vec2;
use rand::Rng;

use super::collision::{circle_overlaps_square, dominates, is_dominated_by};
use super::player::{Player, PlayerId};
use super::random::{gauss, unit_square};
use super::state::GameState;
use crate::consts::{MIN_THREAT_DISTANCE, MIN_THREAT_SCORE};

/// A scored point of interest
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Target {
    pub pos: Vec2,
    pub score: f32,
}

/// What a CPU player perceives this tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Assessment {
    /// Rival blob that could eat one of ours
    pub danger: Option<Target>,
    /// Rival blob one of ours could eat
    pub reward: Option<Target>,
    /// Nearest visible food
    pub food: Option<Target>,
}

impl Assessment {
    fn danger_score(&self) -> f32 {
        self.danger.map_or(0.0, |t| t.score)
    }

    fn reward_score(&self) -> f32 {
        self.reward.map_or(0.0, |t| t.score)
    }

    fn food_score(&self) -> f32 {
        self.food.map_or(0.0, |t| t.score)
    }

    pub fn is_empty(&self) -> bool {
        self.danger.is_none() && self.reward.is_none() && self.food.is_none()
    }
}

/// Threat/opportunity score: grows with the size gap, shrinks with distance
#[inline]
pub fn threat_score(my_radius: f32, other_radius: f32, distance: f32) -> f32 {
    let gap = other_radius - my_radius;
    (my_radius * gap * gap / distance.max(MIN_THREAT_DISTANCE)).max(MIN_THREAT_SCORE)
}

/// Score everything in sight of `player`
pub fn assess(state: &GameState, player: &Player) -> Assessment {
    let sight = state.config.sight_radius;
    let center = player.center();
    let mut assessment = Assessment::default();

    for rival in state.players.values().filter(|p| p.id != player.id) {
        for other in rival.blobs() {
            if !circle_overlaps_square(other.center(), other.radius(), center, sight) {
                continue;
            }
            let distance = other.center().distance(center);
            for mine in player.blobs() {
                let score = threat_score(mine.radius(), other.radius(), distance);
                let slot = if dominates(&other.body, &mine.body) {
                    &mut assessment.danger
                } else if is_dominated_by(&other.body, &mine.body) {
                    &mut assessment.reward
                } else {
                    continue;
                };
                if slot.is_none_or(|t| score > t.score) {
                    *slot = Some(Target {
                        pos: other.center(),
                        score,
                    });
                }
            }
        }
    }

    let mut nearest: Option<(Vec2, f32)> = None;
    let mut best = sight * std::f32::consts::SQRT_2;
    for cell in state.food_cells(center, sight) {
        for food in &state.food[cell] {
            if !circle_overlaps_square(food.center(), food.radius, center, sight) {
                continue;
            }
            let distance = food.center().distance(center);
            if distance < best {
                best = distance;
                nearest = Some((food.center(), distance));
            }
        }
    }
    assessment.food = nearest.map(|(pos, distance)| Target {
        pos,
        score: 1.0 / distance.max(1.0),
    });

    assessment
}

/// Pick a raw movement vector from an assessment
///
/// The highest-scoring category wins, ties going danger, then reward, then
/// food. With nothing in sight the player wanders randomly.
pub fn steer<R: Rng>(
    assessment: &Assessment,
    center: Vec2,
    radius: f32,
    width: f32,
    height: f32,
    rng: &mut R,
) -> Vec2 {
    let danger = assessment.danger_score();
    let reward = assessment.reward_score();
    let food = assessment.food_score();
    let best = danger.max(reward).max(food);

    match (assessment.danger, assessment.reward, assessment.food) {
        (Some(threat), _, _) if danger == best => flee(threat.pos, center, radius, width, height),
        (_, Some(prey), _) if reward == best => prey.pos - center,
        (_, _, Some(pellet)) => pellet.pos - center,
        _ => unit_square(rng),
    }
}

/// Run away from `threat`, pushing off any board edge we are backed against
fn flee(threat: Vec2, center: Vec2, radius: f32, width: f32, height: f32) -> Vec2 {
    let margin = 2.0 * radius;
    let mut v = center - threat;
    if center.x <= margin {
        v = v.normalize_or_zero() + Vec2::X;
    } else if center.x >= width - margin {
        v = v.normalize_or_zero() - Vec2::X;
    }
    if center.y <= margin {
        v = v.normalize_or_zero() + Vec2::Y;
    } else if center.y >= height - margin {
        v = v.normalize_or_zero() - Vec2::Y;
    }
    v
}

/// Each component drawn from a normal centred on itself with σ = |c| / 10
pub fn jitter<R: Rng>(v: Vec2, rng: &mut R) -> Vec2 {
    Vec2::new(gauss(rng, v.x, v.x / 10.0), gauss(rng, v.y, v.y / 10.0))
}

/// Movement vector for a CPU player this tick (before edge trimming)
pub fn decide(state: &mut GameState, id: PlayerId) -> Vec2 {
    let Some(player) = state.players.get(&id) else {
        return Vec2::ZERO;
    };
    let assessment = assess(state, player);
    let center = player.center();
    let radius = player.center_radius();
    let (width, height) = (state.config.game_width, state.config.game_height);

    let raw = steer(&assessment, center, radius, width, height, &mut state.rng);
    jitter(raw, &mut state.rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::entity::{Color, Entity};
    use crate::sim::player::PlayerKind;
    use crate::sim::tick::move_player;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    /// Empty board with two CPU players (ids 0, 1) and the user (id 3)
    fn arena() -> GameState {
        let config = GameConfig {
            food_count: 0,
            cpu_players: 2,
            ..Default::default()
        };
        GameState::with_config(config, 21).unwrap()
    }

    fn place(state: &mut GameState, id: PlayerId, center: Vec2, radius: f32) {
        state.place_player(id, center, radius);
    }

    #[test]
    fn test_threat_score_floor_and_distance_guard() {
        assert_eq!(threat_score(10.0, 11.0, 100.0), MIN_THREAT_SCORE);
        // Distance floored at 0.1
        assert_eq!(threat_score(10.0, 20.0, 0.0), 10.0 * 100.0 / 0.1);
        assert!(threat_score(10.0, 50.0, 50.0) > threat_score(10.0, 50.0, 100.0));
    }

    #[test]
    fn test_danger_and_reward_detected() {
        let mut state = arena();
        place(&mut state, 0, Vec2::new(1200.0, 1200.0), 20.0);
        place(&mut state, 1, Vec2::new(1300.0, 1200.0), 60.0);
        place(&mut state, 3, Vec2::new(1100.0, 1200.0), 10.0);

        let a = assess(&state, &state.players[&0]);
        let danger = a.danger.unwrap();
        let reward = a.reward.unwrap();
        assert_eq!(danger.pos, Vec2::new(1300.0, 1200.0));
        assert_eq!(reward.pos, Vec2::new(1100.0, 1200.0));
        assert!((danger.score - 20.0 * 40.0 * 40.0 / 100.0).abs() < 1e-3);
        assert!(a.food.is_none());
    }

    #[test]
    fn test_out_of_sight_ignored() {
        let mut state = arena();
        place(&mut state, 0, Vec2::new(300.0, 300.0), 20.0);
        place(&mut state, 1, Vec2::new(2000.0, 2000.0), 200.0);
        place(&mut state, 3, Vec2::new(300.0, 2000.0), 10.0);
        assert!(assess(&state, &state.players[&0]).is_empty());
    }

    #[test]
    fn test_nearest_food_scored() {
        let mut state = arena();
        place(&mut state, 0, Vec2::new(1200.0, 1200.0), 20.0);
        place(&mut state, 1, Vec2::new(100.0, 100.0), 20.0);
        place(&mut state, 3, Vec2::new(2300.0, 100.0), 20.0);
        state.add_food(Entity::food(Vec2::new(1245.0, 1195.0), 5.0, Color::default()));
        state.add_food(Entity::food(Vec2::new(1395.0, 1195.0), 5.0, Color::default()));

        let a = assess(&state, &state.players[&0]);
        let food = a.food.unwrap();
        assert_eq!(food.pos, Vec2::new(1250.0, 1200.0));
        assert!((food.score - 1.0 / 50.0).abs() < 1e-6);
    }

    #[test]
    fn test_steer_prefers_danger_over_food() {
        let mut rng = Pcg32::seed_from_u64(1);
        let a = Assessment {
            danger: Some(Target { pos: Vec2::new(1300.0, 1200.0), score: 2.0 }),
            reward: None,
            food: Some(Target { pos: Vec2::new(1250.0, 1200.0), score: 0.5 }),
        };
        let v = steer(&a, Vec2::new(1200.0, 1200.0), 20.0, 2400.0, 2400.0, &mut rng);
        assert!(v.x < 0.0);
        assert_eq!(v.y, 0.0);
    }

    #[test]
    fn test_steer_tie_goes_to_danger() {
        let mut rng = Pcg32::seed_from_u64(1);
        let a = Assessment {
            danger: Some(Target { pos: Vec2::new(1300.0, 1200.0), score: 5.0 }),
            reward: Some(Target { pos: Vec2::new(1300.0, 1200.0), score: 5.0 }),
            food: None,
        };
        let v = steer(&a, Vec2::new(1200.0, 1200.0), 20.0, 2400.0, 2400.0, &mut rng);
        assert!(v.x < 0.0);
    }

    #[test]
    fn test_steer_chases_bigger_reward() {
        let mut rng = Pcg32::seed_from_u64(1);
        let a = Assessment {
            danger: Some(Target { pos: Vec2::new(1300.0, 1200.0), score: 2.0 }),
            reward: Some(Target { pos: Vec2::new(1200.0, 1100.0), score: 9.0 }),
            food: None,
        };
        let v = steer(&a, Vec2::new(1200.0, 1200.0), 20.0, 2400.0, 2400.0, &mut rng);
        assert_eq!(v, Vec2::new(0.0, -100.0));
    }

    #[test]
    fn test_flee_pushes_off_wall() {
        let mut rng = Pcg32::seed_from_u64(1);
        // Threat to the right, player pinned against the left wall
        let a = Assessment {
            danger: Some(Target { pos: Vec2::new(10.0, 1200.0), score: 3.0 }),
            ..Default::default()
        };
        let v = steer(&a, Vec2::new(5.0, 1200.0), 20.0, 2400.0, 2400.0, &mut rng);
        assert_eq!(v, Vec2::new(0.0, 0.0));

        // Threat from above-right while in the top-left corner
        let a = Assessment {
            danger: Some(Target { pos: Vec2::new(30.0, 0.0), score: 3.0 }),
            ..Default::default()
        };
        let v = steer(&a, Vec2::new(10.0, 10.0), 20.0, 2400.0, 2400.0, &mut rng);
        assert!(v.y > 0.0);
    }

    #[test]
    fn test_jitter_keeps_zero_components() {
        let mut rng = Pcg32::seed_from_u64(4);
        let v = jitter(Vec2::new(0.0, 5.0), &mut rng);
        assert_eq!(v.x, 0.0);
        assert!(v.y != 0.0);
    }

    #[test]
    fn test_idle_cpu_wanders() {
        let mut state = arena();
        place(&mut state, 0, Vec2::new(1200.0, 1200.0), 20.0);
        place(&mut state, 1, Vec2::new(100.0, 100.0), 20.0);
        place(&mut state, 3, Vec2::new(2300.0, 2300.0), 20.0);
        assert_eq!(state.players[&0].kind, PlayerKind::Cpu);

        let before = state.players[&0].center();
        let speed = state.players[&0].center_blob().unwrap().base_speed();
        let direction = decide(&mut state, 0);
        assert!(direction.length() > 0.0);
        move_player(&mut state, 0, direction);

        let moved = state.players[&0].center().distance(before);
        assert!(moved > 0.0);
        assert!(moved <= speed + 1e-3);
    }
}
