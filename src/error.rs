//! Error types for Pacer

use thiserror::Error;

use crate::types::WorkoutKind;

/// Errors that can occur while ingesting packets and computing summaries
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("Unknown workout code: {0}")]
    UnknownWorkout(String),

    #[error("{kind} sample expects {expected} sensor values, got {got}")]
    ArityMismatch {
        kind: WorkoutKind,
        expected: usize,
        got: usize,
    },

    #[error("Invalid {field} value: {value}")]
    InvalidValue { field: &'static str, value: f64 },

    #[error("Workout duration must be positive, got {0} h")]
    NonPositiveDuration(f64),

    #[error("Failed to parse sensor packet: {0}")]
    ParseError(String),

    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),
}
