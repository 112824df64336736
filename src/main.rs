//! Blob Arena headless driver
//!
//! Runs the simulation on a fixed timestep with a scripted user that circles
//! the board and splits now and then, logging standings as it goes.
//!
//! Usage: `blob-arena [seed] [config.json]`

use blob_arena::sim::GameEvent;
use blob_arena::{Game, GameConfig};
use glam::Vec2;

/// Simulated seconds to run
const RUN_SECS: f64 = 120.0;
/// Seconds between standings reports
const REPORT_EVERY: f64 = 20.0;
/// Ticks between scripted splits
const SHOOT_EVERY: u64 = 200;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Blob Arena (headless) starting...");

    let args: Vec<String> = std::env::args().collect();
    let seed = args
        .get(1)
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(0x5EED);
    let config = match args.get(2) {
        Some(path) => match GameConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("{}", e);
                std::process::exit(1);
            }
        },
        None => GameConfig::default(),
    };

    let dt = config.tick_dt;
    let mut game = match Game::new(config, seed) {
        Ok(game) => game,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };
    log::info!("Game initialized with seed: {}", seed);

    let ticks = (RUN_SECS / dt).round() as u64;
    let report_ticks = ((REPORT_EVERY / dt).round() as u64).max(1);
    let (mut food_eaten, mut blobs_eaten) = (0usize, 0usize);

    for n in 1..=ticks {
        let angle = n as f32 * 0.01;
        game.set_user_direction(Vec2::from_angle(angle));
        if n % SHOOT_EVERY == 0 {
            game.trigger_user_shoot();
        }
        game.tick(dt);

        for event in game.drain_events() {
            match event {
                GameEvent::FoodEaten { .. } => food_eaten += 1,
                GameEvent::BlobEaten { .. } => blobs_eaten += 1,
                GameEvent::UserRespawned { .. } => log::info!("User respawned at {:.1}s", game.state().time),
                _ => {}
            }
        }

        if n % report_ticks == 0 {
            report(&game, food_eaten, blobs_eaten);
        }
    }

    if let Some(best) = game.run_records().best() {
        log::info!(
            "Best run: peak mass {:.0}, ended at {:.1}s",
            best.peak_mass,
            best.ended_at
        );
    }
    for (rank, record) in game.run_records().entries.iter().enumerate() {
        log::info!(
            "Run #{}: peak mass {:.0}, survived {:.1}s",
            rank + 1,
            record.peak_mass,
            record.survived_secs
        );
    }
    log::info!("Blob Arena finished after {} ticks", ticks);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No headless driver on the web; the library is driven by the page
}

fn report(game: &Game, food_eaten: usize, blobs_eaten: usize) {
    let state = game.state();
    log::info!(
        "t={:.0}s food eaten {}, blobs eaten {}, food on board {}",
        state.time,
        food_eaten,
        blobs_eaten,
        state.food_count()
    );
    if let Some(rank) = game.run_records().potential_rank(state.user_peak_mass) {
        log::info!("  current life would rank #{} (peak mass {:.0})", rank, state.user_peak_mass);
    }
    for (rank, row) in game.standings().iter().enumerate() {
        log::info!(
            "  {:>2}. player {:>2} ({:?}) mass {:.0} in {} blob(s)",
            rank + 1,
            row.player,
            row.kind,
            row.mass,
            row.blobs
        );
    }
}
