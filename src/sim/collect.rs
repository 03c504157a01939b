//! Star collection pass
//!
//! Runs after every live integrator step. A star flips to collected at most
//! once, so repeated proximity never re-triggers it.

use glam::Vec2;

use super::state::Collectible;

/// Whether a puck at `pos` touches `star`
#[inline]
pub fn touches(pos: Vec2, radius: f32, star: &Collectible, margin: f32) -> bool {
    pos.distance(star.pos) < star.radius + radius + margin
}

/// Mark every uncollected star the puck touches. Returns the indices that
/// were newly collected, in level order.
pub fn collect_pass(pos: Vec2, radius: f32, stars: &mut [Collectible], margin: f32) -> Vec<usize> {
    let mut hits = Vec::new();
    for (idx, star) in stars.iter_mut().enumerate() {
        if star.collected {
            continue;
        }
        if touches(pos, radius, star, margin) {
            star.collected = true;
            hits.push(idx);
        }
    }
    hits
}
