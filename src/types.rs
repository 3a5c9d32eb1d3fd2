//! Core types for the Pacer pipeline
//!
//! This module defines the data structures that flow through each stage of
//! the pipeline: raw samples, derived metrics and workout summaries, plus
//! the per-kind constant table the derivations read from.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Meters per kilometer
pub const M_IN_KM: f64 = 1000.0;

/// Minutes per hour, for formulas billing calories per minute
pub const MIN_PER_HOUR: f64 = 60.0;

/// Workout kind identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutKind {
    Running,
    Walking,
    Swimming,
}

impl WorkoutKind {
    /// Label used in rendered summary messages
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkoutKind::Running => "Running",
            WorkoutKind::Walking => "SportsWalking",
            WorkoutKind::Swimming => "Swimming",
        }
    }

    /// Constant profile for this kind
    pub fn profile(&self) -> &'static KindProfile {
        match self {
            WorkoutKind::Running => &RUNNING_PROFILE,
            WorkoutKind::Walking => &WALKING_PROFILE,
            WorkoutKind::Swimming => &SWIMMING_PROFILE,
        }
    }
}

impl fmt::Display for WorkoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-kind constants: assumed distance per action unit plus the two
/// coefficients the kind's calorie formula consumes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KindProfile {
    /// Distance covered per step or stroke (meters)
    pub step_length_m: f64,
    /// First calorie coefficient (multiplier role varies by kind)
    pub speed_multiplier: f64,
    /// Second calorie coefficient (shift role varies by kind)
    pub speed_shift: f64,
}

const RUNNING_PROFILE: KindProfile = KindProfile {
    step_length_m: 0.65,
    speed_multiplier: 18.0,
    speed_shift: 20.0,
};

const WALKING_PROFILE: KindProfile = KindProfile {
    step_length_m: 0.65,
    speed_multiplier: 0.035,
    speed_shift: 0.029,
};

const SWIMMING_PROFILE: KindProfile = KindProfile {
    step_length_m: 1.38,
    speed_multiplier: 1.1,
    speed_shift: 2.0,
};

/// Raw sensor reading for one workout, tagged by kind.
///
/// Samples are immutable once constructed; the registry builds them from
/// positional packet data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WorkoutSample {
    Running {
        action_count: u32,
        duration_h: f64,
        weight_kg: f64,
    },
    Walking {
        action_count: u32,
        duration_h: f64,
        weight_kg: f64,
        height_cm: f64,
    },
    Swimming {
        action_count: u32,
        duration_h: f64,
        weight_kg: f64,
        pool_length_m: f64,
        pool_laps: f64,
    },
}

impl WorkoutSample {
    pub fn kind(&self) -> WorkoutKind {
        match self {
            WorkoutSample::Running { .. } => WorkoutKind::Running,
            WorkoutSample::Walking { .. } => WorkoutKind::Walking,
            WorkoutSample::Swimming { .. } => WorkoutKind::Swimming,
        }
    }

    /// Step or stroke count reported by the sensor
    pub fn action_count(&self) -> u32 {
        match self {
            WorkoutSample::Running { action_count, .. }
            | WorkoutSample::Walking { action_count, .. }
            | WorkoutSample::Swimming { action_count, .. } => *action_count,
        }
    }

    /// Workout duration in hours (positive, enforced at construction)
    pub fn duration_h(&self) -> f64 {
        match self {
            WorkoutSample::Running { duration_h, .. }
            | WorkoutSample::Walking { duration_h, .. }
            | WorkoutSample::Swimming { duration_h, .. } => *duration_h,
        }
    }

    pub fn weight_kg(&self) -> f64 {
        match self {
            WorkoutSample::Running { weight_kg, .. }
            | WorkoutSample::Walking { weight_kg, .. }
            | WorkoutSample::Swimming { weight_kg, .. } => *weight_kg,
        }
    }
}

/// Metrics derived from a sample by the measurement model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedMetrics {
    /// Distance covered (kilometers)
    pub distance_km: f64,
    /// Mean speed (km/h)
    pub mean_speed_kmh: f64,
}

/// Derived report for one sample. Created once, never mutated, consumed
/// only for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutSummary {
    pub kind: WorkoutKind,
    pub duration_h: f64,
    pub distance_km: f64,
    pub mean_speed_kmh: f64,
    pub calories_kcal: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_labels() {
        assert_eq!(WorkoutKind::Running.as_str(), "Running");
        assert_eq!(WorkoutKind::Walking.as_str(), "SportsWalking");
        assert_eq!(WorkoutKind::Swimming.as_str(), "Swimming");
    }

    #[test]
    fn test_profiles() {
        assert_eq!(WorkoutKind::Running.profile().step_length_m, 0.65);
        assert_eq!(WorkoutKind::Walking.profile().step_length_m, 0.65);
        assert_eq!(WorkoutKind::Swimming.profile().step_length_m, 1.38);
        assert_eq!(WorkoutKind::Running.profile().speed_multiplier, 18.0);
        assert_eq!(WorkoutKind::Walking.profile().speed_shift, 0.029);
    }

    #[test]
    fn test_sample_accessors() {
        let sample = WorkoutSample::Swimming {
            action_count: 720,
            duration_h: 1.0,
            weight_kg: 80.0,
            pool_length_m: 25.0,
            pool_laps: 40.0,
        };

        assert_eq!(sample.kind(), WorkoutKind::Swimming);
        assert_eq!(sample.action_count(), 720);
        assert_eq!(sample.duration_h(), 1.0);
        assert_eq!(sample.weight_kg(), 80.0);
    }

    #[test]
    fn test_sample_serde_round_trip() {
        let sample = WorkoutSample::Walking {
            action_count: 9000,
            duration_h: 1.0,
            weight_kg: 75.0,
            height_cm: 180.0,
        };

        let json = serde_json::to_string(&sample).unwrap();
        assert!(json.contains(r#""kind":"walking""#));

        let back: WorkoutSample = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sample);
    }
}
