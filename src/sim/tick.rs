//! Fixed timestep frame loop
//!
//! One call per display refresh. The puck always advances by the fixed
//! `tuning.time_step`, the same step the aiming preview uses. The `dt` handed
//! to [`tick`] only drives the visual clocks (planet spin, star pulse).

use glam::Vec2;

use super::collect::collect_pass;
use super::integrator::{Integrator, StepOutcome};
use super::state::{GameEvent, GamePhase, GameState};

/// Input gathered between frames. Handlers only set these fields; all
/// simulation happens inside [`tick`].
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pointer pressed (may start a drag on the launcher)
    pub pointer_down: Option<Vec2>,
    /// Pointer moved while pressed
    pub pointer_move: Option<Vec2>,
    /// Pointer released (fires if a drag is active)
    pub pointer_up: Option<Vec2>,
    /// Pointer left the canvas / touch cancelled
    pub pointer_cancel: bool,
    /// Replay the current level
    pub reset: bool,
    /// Advance to the next built-in level
    pub next_level: bool,
    /// Load a random system
    pub random_level: bool,
    /// Pause toggle
    pub pause: bool,
}

/// Advance the game by one frame. `dt` is the frame time for visual clocks.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if input.pause {
        state.phase = match state.phase {
            GamePhase::Playing => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Playing,
        };
    }
    if state.phase == GamePhase::Paused {
        return;
    }

    apply_input(state, input);

    state.time_ticks += 1;

    if state.puck.is_alive() {
        live_step(state);
    }

    // Visual clocks run whether or not the puck is flying
    let pulse_rate = state.tuning.star_pulse_rate;
    for body in &mut state.level.bodies {
        body.rotate(dt);
    }
    for star in &mut state.level.stars {
        star.advance_pulse(dt, pulse_rate);
    }
}

fn apply_input(state: &mut GameState, input: &TickInput) {
    if input.reset {
        state.reset_level();
    }
    if input.next_level {
        if let Err(err) = state.next_level() {
            log::warn!("Could not load next level: {err}");
        }
    }
    if input.random_level {
        if let Err(err) = state.load_random_level() {
            log::warn!("Could not load random level: {err}");
        }
    }

    if input.pointer_cancel {
        state.cancel_aim();
    }
    if let Some(pos) = input.pointer_down {
        state.begin_aim(pos);
    }
    if let Some(pos) = input.pointer_move {
        state.update_aim(pos);
    }
    if let Some(pos) = input.pointer_up {
        state.release_aim(pos);
    }
}

/// One live integrator step plus trail bookkeeping and the collection pass
fn live_step(state: &mut GameState) {
    let outcome = Integrator::live(&state.level.bodies, state.arena, &state.tuning).step(
        state.puck.pos,
        state.puck.vel,
        state.puck.radius,
    );

    let (trail_len, ghost_len) = (state.tuning.trail_length, state.tuning.ghost_trail_length);
    match outcome {
        StepOutcome::Crashed { body } => {
            let pos = state.puck.pos;
            log::debug!("Puck crashed into body {body} at ({:.1}, {:.1})", pos.x, pos.y);
            state.push_event(GameEvent::Crashed { pos, body });
            state.reset_puck();
        }
        StepOutcome::OutOfBounds { pos, vel } => {
            state.puck.pos = pos;
            state.puck.vel = vel;
            state.puck.record_trail(trail_len, ghost_len);
            log::debug!("Puck lost at ({:.1}, {:.1})", pos.x, pos.y);
            state.push_event(GameEvent::OutOfBounds { pos });
            state.reset_puck();
        }
        StepOutcome::Moved { pos, vel } => {
            state.puck.pos = pos;
            state.puck.vel = vel;
            state.puck.record_trail(trail_len, ghost_len);
            collect_stars(state);
        }
    }
}

fn collect_stars(state: &mut GameState) {
    let hits = collect_pass(
        state.puck.pos,
        state.puck.radius,
        &mut state.level.stars,
        state.tuning.collect_margin,
    );
    if hits.is_empty() {
        return;
    }

    let burst = state.tuning.burst_particles;
    for index in hits {
        state.level.collected += 1;
        let pos = state.level.stars[index].pos;
        state.push_event(GameEvent::StarCollected { index, pos, burst });
    }

    if state.level.is_complete() && !state.level.announced {
        state.level.announced = true;
        let name = state.level.name.clone();
        let shots = state.level.shots;
        let new_best = state.records.record(&name, shots);
        if new_best {
            log::info!("New best for '{name}': {shots} shots");
        }
        log::info!("Level '{name}' complete in {shots} shots");
        state.push_event(GameEvent::LevelComplete {
            name,
            shots,
            new_best,
        });
    }
}
