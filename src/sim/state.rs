//! Game state and core simulation types
//!
//! `GameState` is the single owner of everything the frame loop touches:
//! bodies, stars, the puck, trails, aim and the pending event list.

use std::collections::VecDeque;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::launch::LaunchParams;
use super::predict::predict_path;
use crate::consts::{LAUNCHER_X_RATIO, LAUNCHER_Y_RATIO};
use crate::error::LevelError;
use crate::levels::{LevelConfig, builtin_levels, random_level};
use crate::records::BestShots;
use crate::tuning::Tuning;
use crate::wrap_angle;

/// Whether the frame loop is advancing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Playing,
    Paused,
}

/// A fixed gravitating planet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec2,
    pub mass: f32,
    pub radius: f32,
    /// Spin rate in radians/sec (visual only)
    pub spin: f32,
    /// Current rotation angle (radians, [0, 2π))
    pub angle: f32,
}

impl Body {
    pub fn new(pos: Vec2, mass: f32, radius: f32) -> Self {
        Self {
            pos,
            mass,
            radius,
            spin: 0.0,
            angle: 0.0,
        }
    }

    /// Advance the rotation angle by spin * dt
    pub fn rotate(&mut self, dt: f32) {
        if self.spin != 0.0 {
            self.angle = wrap_angle(self.angle + self.spin * dt);
        }
    }
}

/// A star the puck has to touch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collectible {
    pub pos: Vec2,
    pub radius: f32,
    pub collected: bool,
    /// Glow pulse phase (visual only)
    pub pulse: f32,
}

impl Collectible {
    pub fn new(pos: Vec2, radius: f32) -> Self {
        Self {
            pos,
            radius,
            collected: false,
            pulse: 0.0,
        }
    }

    pub fn advance_pulse(&mut self, dt: f32, rate: f32) {
        self.pulse = wrap_angle(self.pulse + dt * rate);
    }
}

/// Puck lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PuckState {
    /// Parked on the launcher, zero velocity
    Dormant,
    /// Integrated every frame
    InFlight,
}

/// The projectile
#[derive(Debug, Clone)]
pub struct Puck {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub state: PuckState,
    /// Short glow trail (oldest first)
    pub trail: VecDeque<Vec2>,
    /// Whole-shot trail, becomes the ghost after the shot ends
    pub full_trail: VecDeque<Vec2>,
}

impl Puck {
    pub fn new(pos: Vec2, radius: f32) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            radius,
            state: PuckState::Dormant,
            trail: VecDeque::new(),
            full_trail: VecDeque::new(),
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.state == PuckState::InFlight
    }

    /// Launch (or re-launch) from the current position
    pub fn launch(&mut self, vel: Vec2) {
        self.vel = vel;
        self.trail.clear();
        self.state = PuckState::InFlight;
    }

    /// Record the current position to both bounded trails
    pub fn record_trail(&mut self, trail_len: usize, ghost_len: usize) {
        self.trail.push_back(self.pos);
        self.full_trail.push_back(self.pos);
        while self.trail.len() > trail_len {
            self.trail.pop_front();
        }
        while self.full_trail.len() > ghost_len {
            self.full_trail.pop_front();
        }
    }

    /// Park on the launcher. Returns the finished shot's trail when it is
    /// long enough to draw as a ghost.
    pub fn reset(&mut self, home: Vec2) -> Option<Vec<Vec2>> {
        let ghost = (self.full_trail.len() > 1).then(|| self.full_trail.iter().copied().collect());
        self.pos = home;
        self.vel = Vec2::ZERO;
        self.trail.clear();
        self.full_trail.clear();
        self.state = PuckState::Dormant;
        ghost
    }
}

/// Spawn and aim anchor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Launcher {
    pub pos: Vec2,
    pub radius: f32,
    /// How far outside the rim a drag may start
    pub grab_margin: f32,
}

impl Launcher {
    /// Place the launcher at its fixed spot in the play area
    pub fn placed(arena: Vec2, tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(arena.x * LAUNCHER_X_RATIO, arena.y * LAUNCHER_Y_RATIO),
            radius: tuning.launcher_radius,
            grab_margin: tuning.launcher_grab_margin,
        }
    }

    pub fn grabs(&self, pointer: Vec2) -> bool {
        pointer.distance(self.pos) <= self.radius + self.grab_margin
    }
}

/// The active level
#[derive(Debug, Clone, Default)]
pub struct Level {
    pub name: String,
    pub hint: String,
    pub bodies: Vec<Body>,
    pub stars: Vec<Collectible>,
    /// Shots fired since load/reset
    pub shots: u32,
    /// Stars collected since load/reset
    pub collected: u32,
    /// Completion has been reported for the current run
    pub announced: bool,
}

impl Level {
    pub fn total_stars(&self) -> usize {
        self.stars.len()
    }

    /// True when every star is collected
    pub fn is_complete(&self) -> bool {
        !self.stars.is_empty() && self.stars.iter().all(|s| s.collected)
    }

    /// Un-collect every star and zero the counters
    pub fn reset(&mut self) {
        for star in &mut self.stars {
            star.collected = false;
        }
        self.shots = 0;
        self.collected = 0;
        self.announced = false;
    }
}

/// An in-progress drag from the launcher
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Drag {
    pub start: Vec2,
    pub current: Vec2,
}

/// Things that happened during a frame, drained by the renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    LevelLoaded { name: String },
    LevelReset,
    Launched { angle: f32, speed: f32, shot: u32 },
    /// Puck hit a body; `pos` is where it was when the step began
    Crashed { pos: Vec2, body: usize },
    OutOfBounds { pos: Vec2 },
    StarCollected { index: usize, pos: Vec2, burst: u32 },
    LevelComplete { name: String, shots: u32, new_best: bool },
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// RNG seed for level decoration and random systems
    pub seed: u64,
    pub tuning: Tuning,
    /// Play area size (width, height)
    pub arena: Vec2,
    pub phase: GamePhase,
    pub launcher: Launcher,
    pub puck: Puck,
    pub level: Level,
    /// Index into the built-in catalogue
    pub level_index: usize,
    /// Trail of the previous shot
    pub ghost_trail: Vec<Vec2>,
    pub records: BestShots,
    pub drag: Option<Drag>,
    /// Frames simulated
    pub time_ticks: u64,
    events: Vec<GameEvent>,
    catalogue: Vec<LevelConfig>,
    rng: Pcg32,
}

impl GameState {
    /// New game on the first built-in level
    pub fn new(seed: u64, width: f32, height: f32) -> Self {
        Self::with_tuning(seed, width, height, Tuning::default())
    }

    pub fn with_tuning(seed: u64, width: f32, height: f32, tuning: Tuning) -> Self {
        let arena = Vec2::new(width, height);
        let launcher = Launcher::placed(arena, &tuning);
        let puck = Puck::new(launcher.pos, tuning.puck_radius);
        let mut state = Self {
            seed,
            tuning,
            arena,
            phase: GamePhase::Playing,
            launcher,
            puck,
            level: Level::default(),
            level_index: 0,
            ghost_trail: Vec::new(),
            records: BestShots::new(),
            drag: None,
            time_ticks: 0,
            events: Vec::new(),
            catalogue: builtin_levels(),
            rng: Pcg32::seed_from_u64(seed),
        };

        let first = state.catalogue[0].clone();
        if let Err(err) = state.load_level(&first) {
            log::error!("Built-in level rejected: {err}");
        }

        state
    }

    /// Validate and load a level, resolving placements against the current arena
    pub fn load_level(&mut self, config: &LevelConfig) -> Result<(), LevelError> {
        if let Err(err) = config.validate() {
            log::warn!("Rejected level '{}': {err}", config.name);
            return Err(err);
        }

        self.launcher = Launcher::placed(self.arena, &self.tuning);
        self.level = config.build(self.arena, self.tuning.star_radius, &mut self.rng);
        self.drag = None;
        self.puck.reset(self.launcher.pos);
        self.ghost_trail.clear();

        log::info!(
            "Loaded level '{}' ({} bodies, {} stars)",
            self.level.name,
            self.level.bodies.len(),
            self.level.total_stars()
        );
        self.events.push(GameEvent::LevelLoaded {
            name: self.level.name.clone(),
        });
        Ok(())
    }

    /// Replay the current level from scratch
    pub fn reset_level(&mut self) {
        self.level.reset();
        self.drag = None;
        self.puck.reset(self.launcher.pos);
        self.ghost_trail.clear();
        log::info!("Level '{}' reset", self.level.name);
        self.events.push(GameEvent::LevelReset);
    }

    /// Advance cyclically through the built-in catalogue
    pub fn next_level(&mut self) -> Result<(), LevelError> {
        self.level_index = (self.level_index + 1) % self.catalogue.len();
        let config = self.catalogue[self.level_index].clone();
        self.load_level(&config)
    }

    /// Generate and load a random system
    pub fn load_random_level(&mut self) -> Result<(), LevelError> {
        let config = random_level(&mut self.rng);
        self.level_index = 0;
        self.load_level(&config)
    }

    /// Change the play area. Placed bodies and stars stay where they are.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.arena = Vec2::new(width, height);
    }

    /// Launch parameters for a pointer position
    pub fn aim(&self, pointer: Vec2) -> LaunchParams {
        LaunchParams::from_drag(self.launcher.pos, pointer, self.arena, &self.tuning)
    }

    /// Start a drag if the pointer is on the launcher
    pub fn begin_aim(&mut self, pointer: Vec2) -> bool {
        if self.launcher.grabs(pointer) {
            self.drag = Some(Drag {
                start: self.launcher.pos,
                current: pointer,
            });
            true
        } else {
            false
        }
    }

    pub fn update_aim(&mut self, pointer: Vec2) {
        if let Some(drag) = &mut self.drag {
            drag.current = pointer;
        }
    }

    pub fn cancel_aim(&mut self) {
        self.drag = None;
    }

    /// Finish a drag and fire. No-op when no drag is in progress.
    pub fn release_aim(&mut self, pointer: Vec2) -> Option<LaunchParams> {
        self.drag.take()?;
        let params = self.aim(pointer);
        self.fire(params);
        Some(params)
    }

    /// Predicted path for the current drag
    pub fn preview(&self) -> Option<Vec<Vec2>> {
        let drag = self.drag?;
        let params = self.aim(drag.current);
        Some(predict_path(
            self.launcher.pos,
            &params,
            self.puck.radius,
            &self.level.bodies,
            self.arena,
            &self.tuning,
        ))
    }

    /// Fire the puck
    pub fn fire(&mut self, params: LaunchParams) {
        self.puck.launch(params.velocity());
        self.level.shots += 1;
        log::debug!(
            "Shot {} fired: angle={:.3} speed={:.1}",
            self.level.shots,
            params.angle,
            params.speed
        );
        self.events.push(GameEvent::Launched {
            angle: params.angle,
            speed: params.speed,
            shot: self.level.shots,
        });
    }

    /// Park the puck, keeping its finished trail as the ghost
    pub fn reset_puck(&mut self) {
        if let Some(ghost) = self.puck.reset(self.launcher.pos) {
            self.ghost_trail = ghost;
        }
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn pending_events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn catalogue(&self) -> &[LevelConfig] {
        &self.catalogue
    }
}
