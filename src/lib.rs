//! Gravity Sling - a single-screen slingshot puzzle
//!
//! Core modules:
//! - `sim`: Deterministic simulation (gravity field, integrator, collection, game state)
//! - `levels`: Level configuration, built-in catalogue and random systems
//! - `records`: Best-shot bookkeeping
//! - `tuning`: Data-driven physics and gameplay constants
//! - `fx`: Burst particles fed from simulation events (visual only)

pub mod error;
pub mod fx;
pub mod levels;
pub mod records;
pub mod sim;
pub mod tuning;

pub use error::{GameError, LevelError, TuningError};
pub use levels::{BodyConfig, LevelConfig, StarConfig};
pub use records::BestShots;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (one step per rendered frame)
    pub const SIM_DT: f32 = 1.0 / 75.0;

    /// Gravity strength: force = G * mass / (dist² + SOFTENING)
    pub const GRAVITY: f32 = 420_000.0;
    /// Additive term in the force denominator
    pub const SOFTENING: f32 = 2800.0;
    /// Added to every distance before dividing by it
    pub const DIST_EPSILON: f32 = 0.0001;
    /// Per-step velocity damping
    pub const DAMPING: f32 = 0.999;

    /// Extra clearance around a body for crash tests
    pub const COLLISION_MARGIN: f32 = 6.0;
    /// Live crash radius is shrunk by this factor (applied to the squared distance)
    pub const CRASH_SHRINK: f32 = 0.85;
    /// Preview stops at the full crash radius
    pub const PREVIEW_CRASH_SHRINK: f32 = 1.0;
    /// Live puck is lost this far outside the play area
    pub const BOUNDS_MARGIN: f32 = 150.0;
    /// Preview path is cut this far outside the play area
    pub const PREVIEW_BOUNDS_MARGIN: f32 = 200.0;
    /// Extra clearance for touching a star
    pub const COLLECT_MARGIN: f32 = 2.0;

    /// Preview horizon in integrator steps
    pub const PREVIEW_STEPS: usize = 80;
    /// Keep every Nth preview step
    pub const PREVIEW_STRIDE: usize = 2;
    /// Short glow trail
    pub const TRAIL_LENGTH: usize = 120;
    /// Long trail kept for the ghost of the previous shot
    pub const GHOST_TRAIL_LENGTH: usize = 600;

    /// Max drag as a fraction of the smaller play-area dimension
    pub const MAX_DRAG_RATIO: f32 = 0.35;
    /// Launch speed at zero drag
    pub const BASE_SPEED: f32 = 160.0;
    /// Extra launch speed at full drag
    pub const SPEED_RANGE: f32 = 260.0;

    /// Launcher placement (fractions of the play area)
    pub const LAUNCHER_X_RATIO: f32 = 0.12;
    pub const LAUNCHER_Y_RATIO: f32 = 0.5;
    pub const LAUNCHER_RADIUS: f32 = 11.0;
    /// Drags may start this far outside the launcher rim
    pub const LAUNCHER_GRAB_MARGIN: f32 = 30.0;

    pub const PUCK_RADIUS: f32 = 7.0;
    pub const STAR_RADIUS: f32 = 14.0;
    /// Particles per star burst
    pub const BURST_PARTICLES: u32 = 32;
    /// Star pulse phase speed (radians/sec)
    pub const STAR_PULSE_RATE: f32 = 3.0;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Convert cartesian (x, y) to polar (r, theta)
#[inline]
pub fn cartesian_to_polar(pos: Vec2) -> (f32, f32) {
    (pos.length(), pos.y.atan2(pos.x))
}

/// Wrap an angle into [0, 2π)
#[inline]
pub fn wrap_angle(angle: f32) -> f32 {
    angle.rem_euclid(std::f32::consts::TAU)
}
