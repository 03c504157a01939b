//! Aiming preview
//!
//! Runs the integrator headless from the launcher for a fixed horizon. No
//! trails, no events, no state is touched.

use glam::Vec2;

use super::integrator::{Integrator, StepOutcome};
use super::launch::LaunchParams;
use super::state::Body;
use crate::tuning::{MAX_PREVIEW_STEPS, Tuning};

/// Predicted puck path for a launch, sub-sampled for drawing.
///
/// Keeps steps 0, stride, 2*stride, ... and stops early (without the
/// terminal point) on a crash or when the path leaves the preview bounds.
pub fn predict_path(
    origin: Vec2,
    params: &LaunchParams,
    radius: f32,
    bodies: &[Body],
    arena: Vec2,
    tuning: &Tuning,
) -> Vec<Vec2> {
    let integrator = Integrator::preview(bodies, arena, tuning);
    let stride = tuning.preview_stride.max(1);
    let steps = tuning.preview_steps.min(MAX_PREVIEW_STEPS);
    let mut path = Vec::with_capacity(steps / stride + 1);

    let mut pos = origin;
    let mut vel = params.velocity();
    for i in 0..steps {
        let outcome = integrator.step(pos, vel, radius);
        if outcome.is_terminal() {
            break;
        }
        if let StepOutcome::Moved { pos: p, vel: v } = outcome {
            pos = p;
            vel = v;
            if i % stride == 0 {
                path.push(pos);
            }
        }
    }
    path
}
