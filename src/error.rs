//! Error types for loading levels and tuning
//!
//! The physics core never fails: crashes and lost pucks are ordinary
//! trajectory outcomes. Only data coming from outside (level configs,
//! tuning files) can be rejected.

/// Rejected level configuration
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LevelError {
    #[error("level '{0}' has no stars to collect")]
    NoCollectibles(String),
    #[error("body {index}: {reason}")]
    InvalidBody { index: usize, reason: &'static str },
    #[error("{what} {index}: placement factor {value} is outside [0, 1]")]
    InvalidFactor {
        what: &'static str,
        index: usize,
        value: f32,
    },
}

/// Rejected tuning override
#[derive(Debug, thiserror::Error)]
pub enum TuningError {
    #[error("tuning parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("tuning '{name}' = {value} is out of range (expected {expected})")]
    OutOfRange {
        name: &'static str,
        value: f64,
        expected: &'static str,
    },
}

/// Top-level error for the native driver
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Tuning(#[from] TuningError),
    #[error(transparent)]
    Level(#[from] LevelError),
}
