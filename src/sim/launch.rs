//! Drag-to-launch mapping
//!
//! Shared by the live shot and the aiming preview so both see bit-identical
//! angle and speed for the same pointer position.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;
use crate::{cartesian_to_polar, polar_to_cartesian};

/// Launch direction and speed derived from a drag
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LaunchParams {
    /// Direction of the raw drag vector (radians)
    pub angle: f32,
    /// Launch speed (pixels/sec)
    pub speed: f32,
    /// Clamped drag length as a fraction of the max drag, in [0, 1]
    pub strength: f32,
}

impl LaunchParams {
    /// Map a drag from the launcher to `pointer` into launch parameters.
    ///
    /// Only the drag length is clamped; the direction is taken from the raw
    /// vector. A zero-length drag gives minimum speed at angle 0.
    pub fn from_drag(launcher: Vec2, pointer: Vec2, arena: Vec2, tuning: &Tuning) -> Self {
        let (drag_len, angle) = cartesian_to_polar(pointer - launcher);
        let max_drag = max_drag(arena, tuning.max_drag_ratio);
        let strength = if max_drag > 0.0 {
            drag_len.min(max_drag) / max_drag
        } else {
            0.0
        };
        let speed = tuning.base_speed + strength * tuning.speed_range;
        Self {
            angle,
            speed,
            strength,
        }
    }

    /// Initial velocity vector
    #[inline]
    pub fn velocity(&self) -> Vec2 {
        polar_to_cartesian(self.speed, self.angle)
    }
}

/// Longest useful drag for a play area
#[inline]
pub fn max_drag(arena: Vec2, ratio: f32) -> f32 {
    arena.x.min(arena.y) * ratio
}
