//! Pacer - On-device summary engine for workout sensor packets
//!
//! Pacer turns raw workout sensor packets into summary statistics through a
//! deterministic pipeline: packet ingestion → registry dispatch → metric
//! derivation → calorie estimation → report rendering.
//!
//! ## Modules
//!
//! - **Registry & Dispatch**: Map short workout codes (RUN, WLK, SWM) to
//!   typed samples built from positional sensor values
//! - **Metrics & Calories**: Derive distance, mean speed and calories burned
//!   with per-kind constants and formulas
//! - **Reports**: Render fixed-format summary messages and stamped JSON
//!   batch reports

pub mod calories;
pub mod error;
pub mod metrics;
pub mod packet;
pub mod pipeline;
pub mod registry;
pub mod report;
pub mod types;

pub use error::TrackerError;
pub use packet::{PacketReader, SensorPacket};
pub use pipeline::{summarize_batch, summarize_packet, summarize_sample, TrackerProcessor};
pub use registry::WorkoutRegistry;
pub use report::{unknown_code_message, BatchReport, ReportEncoder};
pub use types::{DerivedMetrics, WorkoutKind, WorkoutSample, WorkoutSummary};

/// Pacer version embedded in all batch reports
pub const PACER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Producer name for batch reports
pub const PRODUCER_NAME: &str = "pacer";
