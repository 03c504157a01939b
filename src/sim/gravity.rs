//! Softened gravity field of the fixed bodies
//!
//! force = G * mass / (dist² + softening), directed at the body. The
//! softening term flattens the pull near a planet, which keeps close passes
//! playable. It is not a true inverse-square law and must not be "fixed".

use glam::Vec2;

use super::state::Body;
use crate::tuning::Tuning;

/// Acceleration contributed by one body at `pos`
#[inline]
pub fn body_pull(pos: Vec2, body: &Body, tuning: &Tuning) -> Vec2 {
    let delta = body.pos - pos;
    let dist_sq = delta.length_squared();
    let dist = dist_sq.sqrt() + tuning.dist_epsilon;
    let force = tuning.gravity * body.mass / (dist_sq + tuning.softening);
    delta * force / dist
}

/// Total acceleration at `pos` from every body
pub fn acceleration(pos: Vec2, bodies: &[Body], tuning: &Tuning) -> Vec2 {
    bodies
        .iter()
        .fold(Vec2::ZERO, |acc, body| acc + body_pull(pos, body, tuning))
}

/// Squared crash distance between a body and a puck of `radius`
#[inline]
pub fn crash_dist_sq(body: &Body, radius: f32, margin: f32) -> f32 {
    let min_dist = body.radius + radius + margin;
    min_dist * min_dist
}

/// First body the puck at `pos` is crashing into, if any.
///
/// A crash is `dist² < shrink * (body.r + radius + margin)²`.
pub fn find_crash(pos: Vec2, radius: f32, bodies: &[Body], margin: f32, shrink: f32) -> Option<usize> {
    bodies
        .iter()
        .position(|body| body.pos.distance_squared(pos) < crash_dist_sq(body, radius, margin) * shrink)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn planet(x: f32, y: f32, mass: f32) -> Body {
        Body::new(Vec2::new(x, y), mass, 36.0)
    }

    #[test]
    fn test_pull_points_at_body() {
        let t = Tuning::default();
        let body = planet(500.0, 400.0, 8.0);
        let a = body_pull(Vec2::new(400.0, 400.0), &body, &t);
        assert!(a.x > 0.0);
        assert!(a.y.abs() < 1e-6);
    }

    #[test]
    fn test_softened_magnitude() {
        let t = Tuning::default();
        let body = planet(100.0, 0.0, 8.0);
        let a = body_pull(Vec2::ZERO, &body, &t);
        // 420000 * 8 / (10000 + 2800) = 262.5
        assert!((a.length() - 262.5).abs() < 0.01);
    }

    #[test]
    fn test_exact_overlap_is_finite() {
        let t = Tuning::default();
        let body = planet(10.0, 10.0, 8.0);
        let a = acceleration(Vec2::new(10.0, 10.0), &[body], &t);
        assert_eq!(a, Vec2::ZERO);
    }

    #[test]
    fn test_symmetric_bodies_cancel() {
        let t = Tuning::default();
        let bodies = [planet(-100.0, 0.0, 8.0), planet(100.0, 0.0, 8.0)];
        let a = acceleration(Vec2::ZERO, &bodies, &t);
        assert!(a.length() < 1e-3);
    }

    #[test]
    fn test_crash_thresholds() {
        let body = planet(0.0, 0.0, 8.0);
        // min dist = 36 + 7 + 6 = 49; live threshold = sqrt(0.85) * 49 ≈ 45.18
        assert_eq!(find_crash(Vec2::new(45.0, 0.0), 7.0, &[body.clone()], 6.0, 0.85), Some(0));
        assert_eq!(find_crash(Vec2::new(46.0, 0.0), 7.0, &[body.clone()], 6.0, 0.85), None);
        // Preview uses the full radius
        assert_eq!(find_crash(Vec2::new(46.0, 0.0), 7.0, &[body.clone()], 6.0, 1.0), Some(0));
        assert_eq!(find_crash(Vec2::new(49.0, 0.0), 7.0, &[body], 6.0, 1.0), None);
    }

    #[test]
    fn test_find_crash_reports_first_body() {
        let bodies = [planet(500.0, 500.0, 8.0), planet(0.0, 0.0, 8.0), planet(1.0, 0.0, 8.0)];
        assert_eq!(find_crash(Vec2::ZERO, 7.0, &bodies, 6.0, 0.85), Some(1));
    }

    proptest! {
        #[test]
        fn prop_acceleration_finite_and_positive(
            mass in 0.1f32..50.0,
            radius in 5.0f32..80.0,
            angle in 0.0f32..std::f32::consts::TAU,
            extra in 0.0f32..5000.0,
        ) {
            let t = Tuning::default();
            let body = Body::new(Vec2::new(640.0, 360.0), mass, radius);
            let combined = radius + t.puck_radius + t.collision_margin;
            let dist = 0.85 * combined + extra;
            let pos = body.pos + Vec2::new(angle.cos(), angle.sin()) * dist;
            let a = acceleration(pos, std::slice::from_ref(&body), &t);
            prop_assert!(a.is_finite());
            prop_assert!(a.length() > 0.0);
        }
    }
}
