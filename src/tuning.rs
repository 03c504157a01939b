//! Data-driven game balance
//!
//! Every constant of the arcade gravity model lives here so a level designer
//! can override it from JSON without touching the simulation. Defaults come
//! from [`crate::consts`].

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::TuningError;

/// Longest preview horizon a tuning file may ask for
pub const MAX_PREVIEW_STEPS: usize = 10_000;

/// Physics and gameplay tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Gravity field ===
    pub gravity: f32,
    pub softening: f32,
    pub dist_epsilon: f32,

    // === Integrator ===
    pub time_step: f32,
    pub damping: f32,
    pub collision_margin: f32,
    pub crash_shrink: f32,
    pub preview_crash_shrink: f32,
    pub bounds_margin: f32,
    pub preview_bounds_margin: f32,

    // === Preview ===
    pub preview_steps: usize,
    pub preview_stride: usize,

    // === Trails ===
    pub trail_length: usize,
    pub ghost_trail_length: usize,

    // === Launch ===
    pub max_drag_ratio: f32,
    pub base_speed: f32,
    pub speed_range: f32,
    pub launcher_radius: f32,
    pub launcher_grab_margin: f32,

    // === Pieces ===
    pub puck_radius: f32,
    pub star_radius: f32,
    pub collect_margin: f32,
    pub burst_particles: u32,
    pub star_pulse_rate: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            softening: SOFTENING,
            dist_epsilon: DIST_EPSILON,

            time_step: SIM_DT,
            damping: DAMPING,
            collision_margin: COLLISION_MARGIN,
            crash_shrink: CRASH_SHRINK,
            preview_crash_shrink: PREVIEW_CRASH_SHRINK,
            bounds_margin: BOUNDS_MARGIN,
            preview_bounds_margin: PREVIEW_BOUNDS_MARGIN,

            preview_steps: PREVIEW_STEPS,
            preview_stride: PREVIEW_STRIDE,

            trail_length: TRAIL_LENGTH,
            ghost_trail_length: GHOST_TRAIL_LENGTH,

            max_drag_ratio: MAX_DRAG_RATIO,
            base_speed: BASE_SPEED,
            speed_range: SPEED_RANGE,
            launcher_radius: LAUNCHER_RADIUS,
            launcher_grab_margin: LAUNCHER_GRAB_MARGIN,

            puck_radius: PUCK_RADIUS,
            star_radius: STAR_RADIUS,
            collect_margin: COLLECT_MARGIN,
            burst_particles: BURST_PARTICLES,
            star_pulse_rate: STAR_PULSE_RATE,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON override and validate it
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values the integrator cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        check(
            "time_step",
            self.time_step,
            self.time_step.is_finite() && self.time_step > 0.0,
            "finite, > 0",
        )?;
        check(
            "damping",
            self.damping,
            self.damping > 0.0 && self.damping <= 1.0,
            "(0, 1]",
        )?;
        check("gravity", self.gravity, self.gravity >= 0.0, ">= 0")?;
        check("softening", self.softening, self.softening >= 0.0, ">= 0")?;
        check(
            "dist_epsilon",
            self.dist_epsilon,
            self.dist_epsilon > 0.0,
            "> 0",
        )?;
        check(
            "max_drag_ratio",
            self.max_drag_ratio,
            self.max_drag_ratio > 0.0,
            "> 0",
        )?;
        for (name, value) in [
            ("base_speed", self.base_speed),
            ("speed_range", self.speed_range),
            ("collision_margin", self.collision_margin),
            ("crash_shrink", self.crash_shrink),
            ("preview_crash_shrink", self.preview_crash_shrink),
            ("bounds_margin", self.bounds_margin),
            ("preview_bounds_margin", self.preview_bounds_margin),
            ("puck_radius", self.puck_radius),
            ("star_radius", self.star_radius),
            ("collect_margin", self.collect_margin),
            ("launcher_radius", self.launcher_radius),
            ("launcher_grab_margin", self.launcher_grab_margin),
        ] {
            check(name, value, value.is_finite() && value >= 0.0, "finite, >= 0")?;
        }
        check(
            "preview_steps",
            self.preview_steps as f32,
            (1..=MAX_PREVIEW_STEPS).contains(&self.preview_steps),
            "1..=10000",
        )?;
        check(
            "preview_stride",
            self.preview_stride as f32,
            self.preview_stride >= 1,
            ">= 1",
        )?;
        check(
            "trail_length",
            self.trail_length as f32,
            self.trail_length >= 1,
            ">= 1",
        )?;
        check(
            "ghost_trail_length",
            self.ghost_trail_length as f32,
            self.ghost_trail_length >= 1,
            ">= 1",
        )?;
        Ok(())
    }
}

fn check(name: &'static str, value: f32, ok: bool, expected: &'static str) -> Result<(), TuningError> {
    // NaN fails every comparison above, so it lands here too
    if ok {
        Ok(())
    } else {
        Err(TuningError::OutOfRange {
            name,
            value: value as f64,
            expected,
        })
    }
}
