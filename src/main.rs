//! Gravity Sling headless driver
//!
//! Loads the first level, fires a demonstration shot and runs the frame loop
//! until the puck is back on the launcher, logging every simulation event.
//!
//! Usage: `gravity-sling [tuning.json]`

use glam::Vec2;

use gravity_sling::fx::ParticleField;
use gravity_sling::sim::{GameEvent, GameState, TickInput, tick};
use gravity_sling::{GameError, Tuning};

/// Play area used by the demo run
const WIDTH: f32 = 1280.0;
const HEIGHT: f32 = 720.0;
/// Safety cap on simulated frames
const MAX_FRAMES: usize = 5_000;

fn load_tuning() -> Result<Tuning, GameError> {
    match std::env::args().nth(1) {
        Some(path) => {
            let json = std::fs::read_to_string(&path)?;
            let tuning = Tuning::from_json(&json)?;
            log::info!("Loaded tuning from {path}");
            Ok(tuning)
        }
        None => Ok(Tuning::default()),
    }
}

fn log_event(event: &GameEvent) {
    match event {
        GameEvent::LevelComplete {
            name,
            shots,
            new_best,
        } => {
            let best = if *new_best { " (new best!)" } else { "" };
            log::info!("Level '{name}' cleared in {shots} shots{best}");
        }
        GameEvent::StarCollected { index, pos, .. } => {
            log::info!("Star {index} collected at ({:.0}, {:.0})", pos.x, pos.y);
        }
        other => log::info!("{other:?}"),
    }
}

fn run() -> Result<(), GameError> {
    let tuning = load_tuning()?;
    let dt = tuning.time_step;
    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();

    let mut state = GameState::with_tuning(seed, WIDTH, HEIGHT, tuning);
    let mut particles = ParticleField::new(seed);
    log::info!("Game initialized with seed: {seed}");
    if !state.level.hint.is_empty() {
        log::info!("Hint: {}", state.level.hint);
    }

    // Drag up and right so the shot skims over the first planet
    let home = state.launcher.pos;
    let target = home + Vec2::new(140.0, -45.0);
    state.begin_aim(home);
    state.update_aim(target);
    if let Some(preview) = state.preview() {
        log::info!("Predicted path: {} samples", preview.len());
    }
    state.cancel_aim();

    let input = TickInput {
        pointer_down: Some(home),
        pointer_up: Some(target),
        ..Default::default()
    };
    let mut frames = 0;
    tick(&mut state, &input, dt);
    while state.puck.is_alive() && frames < MAX_FRAMES {
        for event in state.drain_events() {
            particles.handle_event(&event);
            log_event(&event);
        }
        particles.update(dt);
        tick(&mut state, &TickInput::default(), dt);
        frames += 1;
    }
    for event in state.drain_events() {
        particles.handle_event(&event);
        log_event(&event);
    }

    log::info!(
        "Shot finished after {frames} frames: {}/{} stars, ghost trail {} points, {} particles live",
        state.level.collected,
        state.level.total_stars(),
        state.ghost_trail.len(),
        particles.len()
    );
    Ok(())
}

fn main() {
    env_logger::init();
    log::info!("Gravity Sling (native) starting...");

    if let Err(err) = run() {
        log::error!("{err}");
        std::process::exit(1);
    }
}
