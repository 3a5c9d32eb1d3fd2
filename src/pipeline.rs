//! Pipeline orchestration
//!
//! This module provides the public API for Pacer: packet → sample →
//! derived metrics → calories → summary. Batch processing is
//! skip-and-report: a failing packet yields an error entry and never
//! aborts the rest of the batch.

use crate::calories::CalorieEstimator;
use crate::error::TrackerError;
use crate::metrics::MetricDeriver;
use crate::packet::SensorPacket;
use crate::registry::WorkoutRegistry;
use crate::report::{BatchReport, ReportEncoder, ReportFailure};
use crate::types::{WorkoutSample, WorkoutSummary};

/// Compute the summary for an already-built sample.
/// Pure: identical samples always produce identical summaries.
pub fn summarize_sample(sample: &WorkoutSample) -> WorkoutSummary {
    let metrics = MetricDeriver::derive(sample);
    let calories_kcal = CalorieEstimator::estimate(sample, &metrics);

    WorkoutSummary {
        kind: sample.kind(),
        duration_h: sample.duration_h(),
        distance_km: metrics.distance_km,
        mean_speed_kmh: metrics.mean_speed_kmh,
        calories_kcal,
    }
}

/// Dispatch one packet through the registry and compute its summary
pub fn summarize_packet(packet: &SensorPacket) -> Result<WorkoutSummary, TrackerError> {
    let sample = WorkoutRegistry::global().build_sample(&packet.code, &packet.data)?;
    Ok(summarize_sample(&sample))
}

/// Summarize a batch, preserving input order. Failing packets produce
/// `Err` entries; the rest of the batch still runs.
pub fn summarize_batch(packets: &[SensorPacket]) -> Vec<Result<WorkoutSummary, TrackerError>> {
    packets.iter().map(summarize_packet).collect()
}

/// Built-in demo batch covering each workout kind, used by the CLI demo
/// command
pub fn demo_packets() -> Vec<SensorPacket> {
    vec![
        SensorPacket::new("SWM", vec![720.0, 1.0, 80.0, 25.0, 40.0]),
        SensorPacket::new("RUN", vec![15000.0, 1.0, 75.0]),
        SensorPacket::new("WLK", vec![9000.0, 1.0, 75.0, 180.0]),
    ]
}

/// Processor bundling the registry handle with a report encoder.
///
/// Use this when batches should be rendered into stamped JSON reports
/// rather than consumed summary by summary.
pub struct TrackerProcessor {
    registry: &'static WorkoutRegistry,
    encoder: ReportEncoder,
}

impl Default for TrackerProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl TrackerProcessor {
    /// Create a processor with a fresh encoder instance
    pub fn new() -> Self {
        Self {
            registry: WorkoutRegistry::global(),
            encoder: ReportEncoder::new(),
        }
    }

    /// Create a processor around a specific encoder
    pub fn with_encoder(encoder: ReportEncoder) -> Self {
        Self {
            registry: WorkoutRegistry::global(),
            encoder,
        }
    }

    pub fn registry(&self) -> &WorkoutRegistry {
        self.registry
    }

    /// Process a batch into a stamped report
    pub fn process(&self, packets: &[SensorPacket]) -> BatchReport {
        let mut entries = Vec::new();
        let mut failures = Vec::new();

        for (index, packet) in packets.iter().enumerate() {
            match self.registry.build_sample(&packet.code, &packet.data) {
                Ok(sample) => entries.push(summarize_sample(&sample)),
                Err(error) => failures.push(ReportFailure {
                    index,
                    code: packet.code.clone(),
                    error: error.to_string(),
                }),
            }
        }

        self.encoder.encode(entries, failures)
    }

    /// Process a batch and serialize the report to JSON
    pub fn process_to_json(&self, packets: &[SensorPacket]) -> Result<String, TrackerError> {
        serde_json::to_string_pretty(&self.process(packets)).map_err(TrackerError::JsonError)
    }
}
