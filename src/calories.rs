//! Calorie estimation
//!
//! One formula per workout kind, each consuming the derived metrics plus
//! kind-specific sample fields. Coefficients come from the per-kind profile
//! table and are fixed.

use crate::types::{DerivedMetrics, WorkoutKind, WorkoutSample, MIN_PER_HOUR, M_IN_KM};

/// Calorie estimator dispatching to the kind's formula
pub struct CalorieEstimator;

impl CalorieEstimator {
    /// Estimate calories burned for a sample given its derived metrics
    pub fn estimate(sample: &WorkoutSample, metrics: &DerivedMetrics) -> f64 {
        match sample {
            WorkoutSample::Running {
                duration_h,
                weight_kg,
                ..
            } => running_calories(metrics.mean_speed_kmh, *duration_h, *weight_kg),
            WorkoutSample::Walking {
                duration_h,
                weight_kg,
                height_cm,
                ..
            } => walking_calories(metrics.mean_speed_kmh, *duration_h, *weight_kg, *height_cm),
            WorkoutSample::Swimming { weight_kg, .. } => {
                swimming_calories(metrics.mean_speed_kmh, *weight_kg)
            }
        }
    }
}

fn running_calories(speed_kmh: f64, duration_h: f64, weight_kg: f64) -> f64 {
    let profile = WorkoutKind::Running.profile();
    (profile.speed_multiplier * speed_kmh - profile.speed_shift) * weight_kg / M_IN_KM
        * duration_h
        * MIN_PER_HOUR
}

/// The speed²/height ratio truncates toward zero before scaling.
/// Intentional; the regression tests below pin the truncation.
fn walking_calories(speed_kmh: f64, duration_h: f64, weight_kg: f64, height_cm: f64) -> f64 {
    let profile = WorkoutKind::Walking.profile();
    let speed_height_term = (speed_kmh.powi(2) / height_cm).floor();
    (profile.speed_multiplier * weight_kg + speed_height_term * profile.speed_shift * weight_kg)
        * duration_h
        * MIN_PER_HOUR
}

fn swimming_calories(speed_kmh: f64, weight_kg: f64) -> f64 {
    let profile = WorkoutKind::Swimming.profile();
    (speed_kmh + profile.speed_multiplier) * (profile.speed_shift * weight_kg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::MetricDeriver;
    use crate::types::WorkoutSample;

    fn estimate(sample: &WorkoutSample) -> f64 {
        let metrics = MetricDeriver::derive(sample);
        CalorieEstimator::estimate(sample, &metrics)
    }

    #[test]
    fn test_running_calories() {
        let sample = WorkoutSample::Running {
            action_count: 15000,
            duration_h: 1.0,
            weight_kg: 75.0,
        };

        // (18 * 9.75 - 20) * 75 / 1000 * 1 * 60
        assert!((estimate(&sample) - 699.75).abs() < 1e-6);
    }

    #[test]
    fn test_swimming_calories() {
        let sample = WorkoutSample::Swimming {
            action_count: 720,
            duration_h: 1.0,
            weight_kg: 80.0,
            pool_length_m: 25.0,
            pool_laps: 40.0,
        };

        // (1.0 + 1.1) * (2 * 80)
        assert!((estimate(&sample) - 336.0).abs() < 1e-6);
    }

    #[test]
    fn test_walking_calories_truncates_speed_height_term() {
        let sample = WorkoutSample::Walking {
            action_count: 9000,
            duration_h: 1.0,
            weight_kg: 75.0,
            height_cm: 180.0,
        };

        // speed² / height = 34.2225 / 180 ≈ 0.19, truncated to 0, so only
        // the weight term remains: 0.035 * 75 * 60 = 157.5. A switch to
        // real division here shows up as a failure of this assertion.
        assert!((estimate(&sample) - 157.5).abs() < 1e-6);
    }

    #[test]
    fn test_walking_calories_with_nonzero_truncated_term() {
        let sample = WorkoutSample::Walking {
            action_count: 25000,
            duration_h: 1.0,
            weight_kg: 70.0,
            height_cm: 170.0,
        };

        // speed = 16.25, speed² / height ≈ 1.553, truncated to 1:
        // (0.035 * 70 + 1 * 0.029 * 70) * 60 = 268.8
        assert!((estimate(&sample) - 268.8).abs() < 1e-6);
    }

    #[test]
    fn test_estimation_is_pure() {
        let sample = WorkoutSample::Running {
            action_count: 15000,
            duration_h: 1.0,
            weight_kg: 75.0,
        };

        assert_eq!(estimate(&sample), estimate(&sample));
    }
}
