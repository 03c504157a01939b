//! Star burst particles
//!
//! Purely visual. The renderer feeds simulation events in and draws what
//! comes out; nothing here feeds back into the physics.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::polar_to_cartesian;
use crate::sim::GameEvent;

/// Maximum live particles
pub const MAX_PARTICLES: usize = 512;

/// Downward pull on burst particles (pixels/s²)
pub const PARTICLE_GRAVITY: f32 = 120.0;

/// A single burst particle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Seconds alive
    pub life: f32,
    /// Seconds until it expires
    pub max_life: f32,
}

impl Particle {
    /// Normalised age, 0 at spawn, 1 at expiry
    #[inline]
    pub fn age(&self) -> f32 {
        (self.life / self.max_life).min(1.0)
    }

    /// Opacity for drawing
    pub fn alpha(&self) -> f32 {
        1.0 - self.age()
    }

    /// Draw radius (shrinks from 4 to 2)
    pub fn size(&self) -> f32 {
        2.0 + (1.0 - self.age()) * 2.0
    }

    /// Early particles draw warm white
    pub fn is_hot(&self) -> bool {
        self.age() < 0.4
    }

    pub fn is_alive(&self) -> bool {
        self.life < self.max_life
    }
}

/// All live burst particles
#[derive(Debug, Clone)]
pub struct ParticleField {
    pub particles: Vec<Particle>,
    rng: Pcg32,
}

impl ParticleField {
    pub fn new(seed: u64) -> Self {
        Self {
            particles: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Spawn `count` particles spraying out of `pos`
    pub fn spawn_burst(&mut self, pos: Vec2, count: u32) {
        for i in 0..count {
            if self.particles.len() >= MAX_PARTICLES {
                break;
            }
            let angle = i as f32 / count as f32 * TAU + self.rng.random::<f32>() * 0.4;
            let speed = 140.0 + self.rng.random::<f32>() * 220.0;
            self.particles.push(Particle {
                pos,
                vel: polar_to_cartesian(speed, angle),
                life: 0.0,
                max_life: 0.6 + self.rng.random::<f32>() * 0.4,
            });
        }
    }

    /// React to a simulation event
    pub fn handle_event(&mut self, event: &GameEvent) {
        match event {
            GameEvent::StarCollected { pos, burst, .. } => self.spawn_burst(*pos, *burst),
            GameEvent::LevelReset | GameEvent::LevelLoaded { .. } => self.clear(),
            _ => {}
        }
    }

    /// Age, move and cull particles
    pub fn update(&mut self, dt: f32) {
        for p in self.particles.iter_mut() {
            p.life += dt;
            if !p.is_alive() {
                continue;
            }
            p.pos += p.vel * dt;
            p.vel.y += PARTICLE_GRAVITY * dt;
        }
        self.particles.retain(Particle::is_alive);
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }
}
