//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (level order for bodies and stars)
//! - No rendering or platform dependencies

pub mod collect;
pub mod gravity;
pub mod integrator;
pub mod launch;
pub mod predict;
pub mod state;
pub mod tick;

pub use collect::{collect_pass, touches};
pub use gravity::{acceleration, body_pull, find_crash};
pub use integrator::{Integrator, StepLimits, StepOutcome};
pub use launch::{LaunchParams, max_drag};
pub use predict::predict_path;
pub use state::{
    Body, Collectible, Drag, GameEvent, GamePhase, GameState, Launcher, Level, Puck, PuckState,
};
pub use tick::{TickInput, tick};
