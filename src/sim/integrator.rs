//! Fixed-step trajectory integrator
//!
//! Semi-implicit Euler with damping. Per step, in this order:
//! 1. crash check at the start-of-step position
//! 2. acceleration from the gravity field
//! 3. vel += acc * dt
//! 4. vel *= damping
//! 5. pos += vel * dt
//! 6. bounds check at the new position

use glam::Vec2;

use super::gravity::{acceleration, find_crash};
use super::state::Body;
use crate::tuning::Tuning;

/// Result of one integrator step
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepOutcome {
    /// Still flying
    Moved { pos: Vec2, vel: Vec2 },
    /// Hit body `body` at the start of the step; nothing was integrated
    Crashed { body: usize },
    /// Left the play area; `pos`/`vel` are the state after the move
    OutOfBounds { pos: Vec2, vel: Vec2 },
}

impl StepOutcome {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, StepOutcome::Moved { .. })
    }
}

/// Terminal thresholds. Live play and the preview use different ones.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepLimits {
    /// Scale applied to the squared crash distance
    pub crash_shrink: f32,
    /// Distance past the canvas edges before a puck is lost
    pub bounds_margin: f32,
}

impl StepLimits {
    pub fn live(tuning: &Tuning) -> Self {
        Self {
            crash_shrink: tuning.crash_shrink,
            bounds_margin: tuning.bounds_margin,
        }
    }

    pub fn preview(tuning: &Tuning) -> Self {
        Self {
            crash_shrink: tuning.preview_crash_shrink,
            bounds_margin: tuning.preview_bounds_margin,
        }
    }
}

/// Integrator bound to a level's bodies and play area
#[derive(Debug, Clone, Copy)]
pub struct Integrator<'a> {
    bodies: &'a [Body],
    tuning: &'a Tuning,
    arena: Vec2,
    limits: StepLimits,
    dt: f32,
}

impl<'a> Integrator<'a> {
    pub fn new(bodies: &'a [Body], arena: Vec2, tuning: &'a Tuning, limits: StepLimits, dt: f32) -> Self {
        Self {
            bodies,
            tuning,
            arena,
            limits,
            dt,
        }
    }

    /// Integrator for the live puck. Live flight and the preview both step
    /// by `tuning.time_step`.
    pub fn live(bodies: &'a [Body], arena: Vec2, tuning: &'a Tuning) -> Self {
        Self::new(bodies, arena, tuning, StepLimits::live(tuning), tuning.time_step)
    }

    /// Integrator for the aiming preview
    pub fn preview(bodies: &'a [Body], arena: Vec2, tuning: &'a Tuning) -> Self {
        Self::new(bodies, arena, tuning, StepLimits::preview(tuning), tuning.time_step)
    }

    /// Advance a point mass of `radius` by one step
    pub fn step(&self, pos: Vec2, vel: Vec2, radius: f32) -> StepOutcome {
        if let Some(body) = find_crash(
            pos,
            radius,
            self.bodies,
            self.tuning.collision_margin,
            self.limits.crash_shrink,
        ) {
            return StepOutcome::Crashed { body };
        }

        let acc = acceleration(pos, self.bodies, self.tuning);
        let vel = (vel + acc * self.dt) * self.tuning.damping;
        let pos = pos + vel * self.dt;

        if self.in_bounds(pos) {
            StepOutcome::Moved { pos, vel }
        } else {
            StepOutcome::OutOfBounds { pos, vel }
        }
    }

    /// Inside the play area plus the bounds margin
    pub fn in_bounds(&self, pos: Vec2) -> bool {
        let m = self.limits.bounds_margin;
        pos.x >= -m && pos.x <= self.arena.x + m && pos.y >= -m && pos.y <= self.arena.y + m
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARENA: Vec2 = Vec2::new(1000.0, 800.0);

    fn center_planet() -> Body {
        Body::new(Vec2::new(500.0, 400.0), 8.0, 36.0)
    }

    /// Run until terminal or `max_steps`, returning every position and the last outcome
    fn fly(integrator: &Integrator, mut pos: Vec2, mut vel: Vec2, max_steps: usize) -> (Vec<Vec2>, StepOutcome) {
        let mut path = Vec::new();
        let mut last = StepOutcome::Moved { pos, vel };
        for _ in 0..max_steps {
            last = integrator.step(pos, vel, 7.0);
            match last {
                StepOutcome::Moved { pos: p, vel: v } => {
                    pos = p;
                    vel = v;
                    path.push(p);
                }
                _ => break,
            }
        }
        (path, last)
    }

    #[test]
    fn test_free_flight_is_damped_straight_line() {
        let t = Tuning::default();
        let integrator = Integrator::live(&[], ARENA, &t);
        let out = integrator.step(Vec2::new(100.0, 100.0), Vec2::new(75.0, 0.0), 7.0);
        match out {
            StepOutcome::Moved { pos, vel } => {
                assert!((vel.x - 75.0 * 0.999).abs() < 1e-4);
                assert_eq!(vel.y, 0.0);
                assert!((pos.x - (100.0 + 0.999)).abs() < 1e-4);
                assert_eq!(pos.y, 100.0);
            }
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[test]
    fn test_order_is_accelerate_damp_move() {
        let t = Tuning::default();
        let bodies = [center_planet()];
        let integrator = Integrator::live(&bodies, ARENA, &t);
        let pos = Vec2::new(300.0, 400.0);
        let vel = Vec2::new(0.0, 50.0);

        let acc = acceleration(pos, &bodies, &t);
        let expected_vel = (vel + acc * t.time_step) * t.damping;
        let expected_pos = pos + expected_vel * t.time_step;

        assert_eq!(
            integrator.step(pos, vel, 7.0),
            StepOutcome::Moved {
                pos: expected_pos,
                vel: expected_vel
            }
        );
    }

    #[test]
    fn test_crash_at_body_position_regardless_of_velocity() {
        let t = Tuning::default();
        let bodies = [center_planet()];
        let integrator = Integrator::live(&bodies, ARENA, &t);
        for vel in [Vec2::ZERO, Vec2::new(10_000.0, 0.0), Vec2::new(-300.0, 250.0)] {
            assert_eq!(
                integrator.step(bodies[0].pos, vel, 7.0),
                StepOutcome::Crashed { body: 0 }
            );
        }
    }

    #[test]
    fn test_crash_uses_start_of_step_position() {
        let t = Tuning::default();
        let bodies = [center_planet()];
        let integrator = Integrator::live(&bodies, ARENA, &t);
        // Starts clear of the planet but heads straight into it
        let out = integrator.step(Vec2::new(440.0, 400.0), Vec2::new(2000.0, 0.0), 7.0);
        assert!(matches!(out, StepOutcome::Moved { .. }));
        if let StepOutcome::Moved { pos, vel } = out {
            assert!(matches!(integrator.step(pos, vel, 7.0), StepOutcome::Crashed { body: 0 }));
        }
    }

    #[test]
    fn test_escaping_puck_goes_out_of_bounds() {
        let t = Tuning::default();
        let bodies = [center_planet()];
        let integrator = Integrator::live(&bodies, ARENA, &t);
        let (path, last) = fly(&integrator, Vec2::new(950.0, 400.0), Vec2::new(400.0, 0.0), 2000);
        assert!(matches!(last, StepOutcome::OutOfBounds { .. }));
        assert!(path.len() < 2000);
        if let StepOutcome::OutOfBounds { pos, .. } = last {
            assert!(pos.x > ARENA.x + t.bounds_margin);
        }
    }

    #[test]
    fn test_slingshot_curves_toward_body() {
        let t = Tuning::default();
        let bodies = [center_planet()];
        let integrator = Integrator::live(&bodies, ARENA, &t);
        let start = Vec2::new(100.0, 300.0);
        let (path, last) = fly(&integrator, start, Vec2::new(300.0, 0.0), 2000);

        // Passes the planet without crashing and eventually leaves the arena
        assert!(matches!(last, StepOutcome::OutOfBounds { .. }));
        let closest = path
            .iter()
            .map(|p| p.distance(bodies[0].pos))
            .fold(f32::MAX, f32::min);
        assert!(closest > 60.0);

        // Never bends away from the planet's side
        assert!(path.iter().all(|p| p.y >= start.y - 1e-3));

        // Concave toward the planet while approaching: y-steps keep growing
        let approach: Vec<Vec2> = path.iter().copied().take_while(|p| p.x < 500.0).collect();
        assert!(approach.len() > 50);
        for w in approach.windows(3) {
            let d1 = w[1].y - w[0].y;
            let d2 = w[2].y - w[1].y;
            assert!(d2 > d1 - 1e-4, "arc not concave toward planet: {d1} then {d2}");
        }
        // Swung past the planet's centre line
        assert!(path.last().map(|p| p.y > bodies[0].pos.y).unwrap_or(false));
    }

    #[test]
    fn test_preview_limits_are_stricter() {
        let t = Tuning::default();
        let bodies = [center_planet()];
        let live = Integrator::live(&bodies, ARENA, &t);
        let preview = Integrator::preview(&bodies, ARENA, &t);
        // 47 px from the centre: inside the full radius (49), outside the shrunk one (~45.2)
        let pos = Vec2::new(453.0, 400.0);
        assert!(matches!(live.step(pos, Vec2::ZERO, 7.0), StepOutcome::Moved { .. }));
        assert_eq!(preview.step(pos, Vec2::ZERO, 7.0), StepOutcome::Crashed { body: 0 });

        assert!(live.in_bounds(Vec2::new(-150.0, 0.0)));
        assert!(!live.in_bounds(Vec2::new(-151.0, 0.0)));
        assert!(preview.in_bounds(Vec2::new(-199.0, 0.0)));
    }
}
