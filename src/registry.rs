//! Workout registry & dispatch
//!
//! Maps short uppercase sensor codes to workout kinds and builds samples
//! from positional packet data. The registry is immutable and process-wide,
//! constructed once on first use.

use std::sync::OnceLock;

use crate::error::TrackerError;
use crate::types::{WorkoutKind, WorkoutSample};

/// One registry entry: code, kind and the packet arity the kind expects
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Registration {
    pub code: &'static str,
    pub kind: WorkoutKind,
    pub arity: usize,
}

const REGISTRATIONS: &[Registration] = &[
    Registration {
        code: "SWM",
        kind: WorkoutKind::Swimming,
        arity: 5,
    },
    Registration {
        code: "RUN",
        kind: WorkoutKind::Running,
        arity: 3,
    },
    Registration {
        code: "WLK",
        kind: WorkoutKind::Walking,
        arity: 4,
    },
];

/// Immutable code → kind registry
pub struct WorkoutRegistry {
    entries: &'static [Registration],
}

impl WorkoutRegistry {
    /// Process-wide registry instance
    pub fn global() -> &'static WorkoutRegistry {
        static REGISTRY: OnceLock<WorkoutRegistry> = OnceLock::new();
        REGISTRY.get_or_init(|| WorkoutRegistry {
            entries: REGISTRATIONS,
        })
    }

    /// Recognized codes, in registration order
    pub fn codes(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|r| r.code)
    }

    /// Registry entries, in registration order
    pub fn registrations(&self) -> &[Registration] {
        self.entries
    }

    /// Look up the registration for a code
    pub fn resolve(&self, code: &str) -> Option<&Registration> {
        self.entries.iter().find(|r| r.code == code)
    }

    /// Build a sample from a code and positional sensor values.
    ///
    /// Field order follows the sensor wire layout: action count, duration,
    /// weight, then kind-specific extras (height for walking; pool length
    /// and lap count for swimming).
    pub fn build_sample(&self, code: &str, data: &[f64]) -> Result<WorkoutSample, TrackerError> {
        let registration = self
            .resolve(code)
            .ok_or_else(|| TrackerError::UnknownWorkout(code.to_string()))?;

        if data.len() != registration.arity {
            return Err(TrackerError::ArityMismatch {
                kind: registration.kind,
                expected: registration.arity,
                got: data.len(),
            });
        }

        let action_count = action_count(data[0])?;
        let duration_h = positive_duration(data[1])?;
        let weight_kg = finite("weight_kg", data[2])?;

        Ok(match registration.kind {
            WorkoutKind::Running => WorkoutSample::Running {
                action_count,
                duration_h,
                weight_kg,
            },
            WorkoutKind::Walking => WorkoutSample::Walking {
                action_count,
                duration_h,
                weight_kg,
                height_cm: finite("height_cm", data[3])?,
            },
            WorkoutKind::Swimming => WorkoutSample::Swimming {
                action_count,
                duration_h,
                weight_kg,
                pool_length_m: finite("pool_length_m", data[3])?,
                pool_laps: finite("pool_laps", data[4])?,
            },
        })
    }
}

fn finite(field: &'static str, value: f64) -> Result<f64, TrackerError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(TrackerError::InvalidValue { field, value })
    }
}

fn positive_duration(value: f64) -> Result<f64, TrackerError> {
    let value = finite("duration_h", value)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(TrackerError::NonPositiveDuration(value))
    }
}

fn action_count(value: f64) -> Result<u32, TrackerError> {
    if value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= f64::from(u32::MAX) {
        Ok(value as u32)
    } else {
        Err(TrackerError::InvalidValue {
            field: "action_count",
            value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_in_registration_order() {
        let codes: Vec<_> = WorkoutRegistry::global().codes().collect();
        assert_eq!(codes, vec!["SWM", "RUN", "WLK"]);
    }

    #[test]
    fn test_resolve() {
        let registry = WorkoutRegistry::global();

        let swm = registry.resolve("SWM").unwrap();
        assert_eq!(swm.kind, WorkoutKind::Swimming);
        assert_eq!(swm.arity, 5);

        assert_eq!(registry.resolve("RUN").unwrap().arity, 3);
        assert_eq!(registry.resolve("WLK").unwrap().arity, 4);
        assert!(registry.resolve("WLKk").is_none());
    }

    #[test]
    fn test_build_each_kind() {
        let registry = WorkoutRegistry::global();

        let run = registry
            .build_sample("RUN", &[15000.0, 1.0, 75.0])
            .unwrap();
        assert_eq!(run.kind(), WorkoutKind::Running);

        let wlk = registry
            .build_sample("WLK", &[9000.0, 1.0, 75.0, 180.0])
            .unwrap();
        assert_eq!(
            wlk,
            WorkoutSample::Walking {
                action_count: 9000,
                duration_h: 1.0,
                weight_kg: 75.0,
                height_cm: 180.0,
            }
        );

        let swm = registry
            .build_sample("SWM", &[720.0, 1.0, 80.0, 25.0, 40.0])
            .unwrap();
        assert_eq!(swm.kind(), WorkoutKind::Swimming);
    }

    #[test]
    fn test_unknown_code() {
        let err = WorkoutRegistry::global()
            .build_sample("WLKk", &[9000.0, 1.0, 75.0, 180.0])
            .unwrap_err();
        assert!(matches!(err, TrackerError::UnknownWorkout(code) if code == "WLKk"));
    }

    #[test]
    fn test_arity_mismatch() {
        let err = WorkoutRegistry::global()
            .build_sample("RUN", &[15000.0, 1.0])
            .unwrap_err();
        assert!(matches!(
            err,
            TrackerError::ArityMismatch {
                kind: WorkoutKind::Running,
                expected: 3,
                got: 2,
            }
        ));
    }

    #[test]
    fn test_zero_duration_rejected() {
        let err = WorkoutRegistry::global()
            .build_sample("RUN", &[15000.0, 0.0, 75.0])
            .unwrap_err();
        assert!(matches!(err, TrackerError::NonPositiveDuration(d) if d == 0.0));
    }

    #[test]
    fn test_negative_duration_rejected() {
        let err = WorkoutRegistry::global()
            .build_sample("SWM", &[720.0, -1.0, 80.0, 25.0, 40.0])
            .unwrap_err();
        assert!(matches!(err, TrackerError::NonPositiveDuration(_)));
    }

    #[test]
    fn test_fractional_action_count_rejected() {
        let err = WorkoutRegistry::global()
            .build_sample("RUN", &[15000.5, 1.0, 75.0])
            .unwrap_err();
        assert!(matches!(
            err,
            TrackerError::InvalidValue {
                field: "action_count",
                ..
            }
        ));
    }

    #[test]
    fn test_non_finite_weight_rejected() {
        let err = WorkoutRegistry::global()
            .build_sample("RUN", &[15000.0, 1.0, f64::NAN])
            .unwrap_err();
        assert!(matches!(
            err,
            TrackerError::InvalidValue {
                field: "weight_kg",
                ..
            }
        ));
    }
}
