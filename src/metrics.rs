//! Metric derivation
//!
//! This module derives the shared measurement metrics from raw samples:
//! - distance from the action count and the kind's step length
//! - mean speed from distance and duration, with the pool-based override
//!   for swimming

use crate::types::{DerivedMetrics, WorkoutSample, M_IN_KM};

/// Metric deriver for computing distance and mean speed
pub struct MetricDeriver;

impl MetricDeriver {
    /// Derive metrics from a sample
    pub fn derive(sample: &WorkoutSample) -> DerivedMetrics {
        DerivedMetrics {
            distance_km: compute_distance(sample),
            mean_speed_kmh: compute_mean_speed(sample),
        }
    }
}

/// Distance in km: action count times the kind's step length
fn compute_distance(sample: &WorkoutSample) -> f64 {
    let step_length_m = sample.kind().profile().step_length_m;
    f64::from(sample.action_count()) * step_length_m / M_IN_KM
}

/// Mean speed in km/h. Swimming ignores stroke distance and derives speed
/// from pool length and lap count instead.
fn compute_mean_speed(sample: &WorkoutSample) -> f64 {
    match sample {
        WorkoutSample::Swimming {
            duration_h,
            pool_length_m,
            pool_laps,
            ..
        } => pool_length_m * pool_laps / M_IN_KM / duration_h,
        _ => compute_distance(sample) / sample.duration_h(),
    }
}
