//! Level configuration
//!
//! Placements are fractions of the play area and are resolved when a level
//! loads, so levels work at any resolution.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{GameError, LevelError};
use crate::sim::state::{Body, Collectible, Level};

/// Name given to generated systems
pub const RANDOM_LEVEL_NAME: &str = "Random System";

/// A planet placement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyConfig {
    #[serde(rename = "xFactor", alias = "x_factor")]
    pub x_factor: f32,
    #[serde(rename = "yFactor", alias = "y_factor")]
    pub y_factor: f32,
    pub mass: f32,
    pub radius: f32,
    #[serde(default)]
    pub spin: f32,
}

/// A star placement (radius comes from tuning)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StarConfig {
    #[serde(rename = "xFactor", alias = "x_factor")]
    pub x_factor: f32,
    #[serde(rename = "yFactor", alias = "y_factor")]
    pub y_factor: f32,
}

impl StarConfig {
    pub fn new(x_factor: f32, y_factor: f32) -> Self {
        Self { x_factor, y_factor }
    }
}

/// A complete level description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelConfig {
    pub name: String,
    #[serde(default)]
    pub hint: String,
    #[serde(alias = "planets")]
    pub bodies: Vec<BodyConfig>,
    pub stars: Vec<StarConfig>,
}

impl LevelConfig {
    /// Parse a level from JSON and validate it
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let config: LevelConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the level can be played
    pub fn validate(&self) -> Result<(), LevelError> {
        if self.stars.is_empty() {
            return Err(LevelError::NoCollectibles(self.name.clone()));
        }

        for (index, body) in self.bodies.iter().enumerate() {
            check_factor("body", index, body.x_factor)?;
            check_factor("body", index, body.y_factor)?;
            if !(body.mass.is_finite() && body.mass > 0.0) {
                return Err(LevelError::InvalidBody {
                    index,
                    reason: "mass must be positive",
                });
            }
            if !(body.radius.is_finite() && body.radius > 0.0) {
                return Err(LevelError::InvalidBody {
                    index,
                    reason: "radius must be positive",
                });
            }
            if !body.spin.is_finite() {
                return Err(LevelError::InvalidBody {
                    index,
                    reason: "spin must be finite",
                });
            }
        }

        for (index, star) in self.stars.iter().enumerate() {
            check_factor("star", index, star.x_factor)?;
            check_factor("star", index, star.y_factor)?;
        }
        Ok(())
    }

    /// Resolve placements against `arena`. Rotation angles and pulse phases
    /// are randomised for looks only.
    pub fn build<R: Rng>(&self, arena: Vec2, star_radius: f32, rng: &mut R) -> Level {
        let bodies = self
            .bodies
            .iter()
            .map(|b| Body {
                pos: Vec2::new(b.x_factor, b.y_factor) * arena,
                mass: b.mass,
                radius: b.radius,
                spin: b.spin,
                angle: rng.random_range(0.0..TAU),
            })
            .collect();
        let stars = self
            .stars
            .iter()
            .map(|s| {
                let mut star = Collectible::new(Vec2::new(s.x_factor, s.y_factor) * arena, star_radius);
                star.pulse = rng.random_range(0.0..TAU);
                star
            })
            .collect();

        Level {
            name: self.name.clone(),
            hint: self.hint.clone(),
            bodies,
            stars,
            ..Default::default()
        }
    }
}

fn check_factor(what: &'static str, index: usize, value: f32) -> Result<(), LevelError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(LevelError::InvalidFactor { what, index, value })
    }
}

fn body(x_factor: f32, y_factor: f32, mass: f32, radius: f32, spin: f32) -> BodyConfig {
    BodyConfig {
        x_factor,
        y_factor,
        mass,
        radius,
        spin,
    }
}

fn level(name: &str, hint: &str, bodies: Vec<BodyConfig>, stars: &[(f32, f32)]) -> LevelConfig {
    LevelConfig {
        name: name.to_string(),
        hint: hint.to_string(),
        bodies,
        stars: stars.iter().map(|&(x, y)| StarConfig::new(x, y)).collect(),
    }
}

/// The shipped levels, in play order
pub fn builtin_levels() -> Vec<LevelConfig> {
    vec![
        level(
            "Slingshot Basics",
            "Shoot past the planet so its gravity bends your path into the star.",
            vec![body(0.45, 0.5, 8.0, 36.0, 0.0)],
            &[(0.8, 0.5)],
        ),
        level(
            "Double Curve",
            "Use both planets: skim one, then swing around the other.",
            vec![
                body(0.4, 0.45, 9.0, 36.0, 0.15),
                body(0.65, 0.58, 9.0, 34.0, -0.18),
            ],
            &[(0.83, 0.45), (0.83, 0.65)],
        ),
        level(
            "Thread the Needle",
            "Aim between the planets; a shallow curve can pick up both stars.",
            vec![
                body(0.5, 0.4, 10.0, 34.0, 0.15),
                body(0.5, 0.6, 10.0, 34.0, -0.15),
            ],
            &[(0.8, 0.4), (0.8, 0.6)],
        ),
        level(
            "Orbital Carousel",
            "Try to park in orbit and graze each star.",
            vec![body(0.6, 0.5, 14.0, 42.0, 0.25)],
            &[(0.8, 0.35), (0.86, 0.5), (0.8, 0.65)],
        ),
        level(
            "Tight Binary",
            "Aim between the twins; a late curve can catch both stars.",
            vec![
                body(0.48, 0.48, 11.0, 30.0, 0.28),
                body(0.52, 0.52, 11.0, 30.0, -0.28),
            ],
            &[(0.75, 0.38), (0.78, 0.62)],
        ),
        level(
            "Gauntlet Run",
            "Use small slings to snake through the corridor.",
            vec![
                body(0.35, 0.35, 8.0, 26.0, 0.1),
                body(0.42, 0.6, 9.0, 28.0, -0.1),
                body(0.58, 0.4, 9.0, 30.0, 0.12),
                body(0.66, 0.62, 10.0, 32.0, -0.14),
            ],
            &[(0.72, 0.32), (0.82, 0.48), (0.72, 0.66)],
        ),
    ]
}

/// Generate a random system: 2-4 planets and 2-5 stars
pub fn random_level<R: Rng>(rng: &mut R) -> LevelConfig {
    let planet_count = rng.random_range(2..=4);
    let star_count = rng.random_range(2..=5);

    let bodies = (0..planet_count)
        .map(|_| BodyConfig {
            x_factor: 0.25 + rng.random::<f32>() * 0.6,
            y_factor: 0.15 + rng.random::<f32>() * 0.7,
            mass: 7.0 + rng.random::<f32>() * 10.0,
            radius: 28.0 + rng.random::<f32>() * 22.0,
            spin: (rng.random::<f32>() - 0.5) * 0.5,
        })
        .collect();
    let stars = (0..star_count)
        .map(|_| StarConfig {
            x_factor: 0.4 + rng.random::<f32>() * 0.55,
            y_factor: 0.2 + rng.random::<f32>() * 0.6,
        })
        .collect();

    LevelConfig {
        name: RANDOM_LEVEL_NAME.to_string(),
        hint: "Explore! Each random system has its own tricky gravity puzzle.".to_string(),
        bodies,
        stars,
    }
}
