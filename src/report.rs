//! Summary rendering and report encoding
//!
//! This module renders summaries into the fixed human-readable message and
//! encodes whole batches into JSON reports stamped with producer metadata.

use std::fmt;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::TrackerError;
use crate::registry::WorkoutRegistry;
use crate::types::WorkoutSummary;
use crate::{PACER_VERSION, PRODUCER_NAME};

/// Current report schema version
pub const REPORT_VERSION: &str = "1.0.0";

impl WorkoutSummary {
    /// Render the fixed-format summary message.
    /// All four numeric fields carry exactly 3 decimal places.
    pub fn message(&self) -> String {
        format!(
            "Тип тренировки: {}; Длительность: {:.3} ч.; Дистанция: {:.3} км; \
             Ср. скорость: {:.3} км/ч; Потрачено ккал: {:.3}.",
            self.kind, self.duration_h, self.distance_km, self.mean_speed_kmh, self.calories_kcal
        )
    }
}

impl fmt::Display for WorkoutSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

/// Diagnostic rendered for an unrecognized workout code: a label followed
/// by the list of valid codes, one per line
pub fn unknown_code_message(registry: &WorkoutRegistry) -> String {
    let mut message =
        String::from("Недопустимый тип тренировки. Пожалуйста выберете один из приведённых ниже:");
    for code in registry.codes() {
        message.push('\n');
        message.push_str(code);
    }
    message
}

/// Producer metadata stamped on every batch report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportProducer {
    pub name: String,
    pub version: String,
    pub instance_id: String,
}

/// Failure entry for a packet that produced no summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportFailure {
    /// Zero-based position in the input batch
    pub index: usize,
    pub code: String,
    pub error: String,
}

/// Complete batch report payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub report_version: String,
    pub producer: ReportProducer,
    pub computed_at_utc: String,
    /// Summaries for valid packets, in input order
    pub entries: Vec<WorkoutSummary>,
    /// Packets that produced no summary, in input order
    pub failures: Vec<ReportFailure>,
}

/// Report encoder producing stamped batch payloads
pub struct ReportEncoder {
    instance_id: String,
}

impl Default for ReportEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportEncoder {
    /// Create a new encoder with a unique instance ID
    pub fn new() -> Self {
        Self {
            instance_id: Uuid::new_v4().to_string(),
        }
    }

    /// Create an encoder with a specific instance ID
    pub fn with_instance_id(instance_id: String) -> Self {
        Self { instance_id }
    }

    /// Encode batch results into a report payload
    pub fn encode(
        &self,
        entries: Vec<WorkoutSummary>,
        failures: Vec<ReportFailure>,
    ) -> BatchReport {
        BatchReport {
            report_version: REPORT_VERSION.to_string(),
            producer: ReportProducer {
                name: PRODUCER_NAME.to_string(),
                version: PACER_VERSION.to_string(),
                instance_id: self.instance_id.clone(),
            },
            computed_at_utc: Utc::now().to_rfc3339(),
            entries,
            failures,
        }
    }

    /// Encode to a JSON string
    pub fn encode_to_json(
        &self,
        entries: Vec<WorkoutSummary>,
        failures: Vec<ReportFailure>,
    ) -> Result<String, TrackerError> {
        serde_json::to_string_pretty(&self.encode(entries, failures))
            .map_err(TrackerError::JsonError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::summarize_sample;
    use crate::types::{WorkoutKind, WorkoutSample};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_running_message() {
        let summary = summarize_sample(&WorkoutSample::Running {
            action_count: 15000,
            duration_h: 1.0,
            weight_kg: 75.0,
        });

        assert_eq!(
            summary.message(),
            "Тип тренировки: Running; Длительность: 1.000 ч.; Дистанция: 9.750 км; \
             Ср. скорость: 9.750 км/ч; Потрачено ккал: 699.750."
        );
    }

    #[test]
    fn test_swimming_message() {
        let summary = summarize_sample(&WorkoutSample::Swimming {
            action_count: 720,
            duration_h: 1.0,
            weight_kg: 80.0,
            pool_length_m: 25.0,
            pool_laps: 40.0,
        });

        assert_eq!(
            summary.message(),
            "Тип тренировки: Swimming; Длительность: 1.000 ч.; Дистанция: 0.994 км; \
             Ср. скорость: 1.000 км/ч; Потрачено ккал: 336.000."
        );
    }

    #[test]
    fn test_walking_message() {
        let summary = summarize_sample(&WorkoutSample::Walking {
            action_count: 9000,
            duration_h: 1.0,
            weight_kg: 75.0,
            height_cm: 180.0,
        });

        assert_eq!(
            summary.message(),
            "Тип тренировки: SportsWalking; Длительность: 1.000 ч.; Дистанция: 5.850 км; \
             Ср. скорость: 5.850 км/ч; Потрачено ккал: 157.500."
        );
    }

    #[test]
    fn test_display_matches_message() {
        let summary = WorkoutSummary {
            kind: WorkoutKind::Running,
            duration_h: 1.0,
            distance_km: 9.75,
            mean_speed_kmh: 9.75,
            calories_kcal: 699.75,
        };

        assert_eq!(summary.to_string(), summary.message());
    }

    #[test]
    fn test_unknown_code_message_lists_codes() {
        let message = unknown_code_message(WorkoutRegistry::global());
        assert_eq!(
            message,
            "Недопустимый тип тренировки. Пожалуйста выберете один из приведённых ниже:\nSWM\nRUN\nWLK"
        );
    }

    #[test]
    fn test_encoder_payload_shape() {
        let encoder = ReportEncoder::with_instance_id("test-instance".to_string());
        let summary = summarize_sample(&WorkoutSample::Running {
            action_count: 15000,
            duration_h: 1.0,
            weight_kg: 75.0,
        });
        let failure = ReportFailure {
            index: 1,
            code: "WLKk".to_string(),
            error: "Unknown workout code: WLKk".to_string(),
        };

        let json = encoder.encode_to_json(vec![summary], vec![failure]).unwrap();
        let payload: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(payload["report_version"], REPORT_VERSION);
        assert_eq!(payload["producer"]["name"], "pacer");
        assert_eq!(payload["producer"]["instance_id"], "test-instance");
        assert_eq!(payload["entries"][0]["kind"], "running");
        assert_eq!(payload["entries"][0]["distance_km"], 9.75);
        assert_eq!(payload["failures"][0]["index"], 1);
        assert!(payload["computed_at_utc"].as_str().is_some());
    }
}
