//! Sensor packet schema and ingestion
//!
//! A packet is the external input record: a short workout code plus ordered
//! positional sensor values. Packet streams arrive as NDJSON (one object
//! per line) or a JSON array.

use serde::{Deserialize, Serialize};

use crate::error::TrackerError;
use crate::registry::WorkoutRegistry;

/// Raw input record from a sensor: workout code plus positional values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorPacket {
    /// Short uppercase workout code (SWM, RUN, WLK)
    pub code: String,
    /// Positional sensor values, ordered per the code's wire layout
    pub data: Vec<f64>,
}

impl SensorPacket {
    pub fn new(code: impl Into<String>, data: Vec<f64>) -> Self {
        Self {
            code: code.into(),
            data,
        }
    }
}

/// Reader for packet streams
pub struct PacketReader;

impl PacketReader {
    /// Parse a JSON string containing an array of packets
    pub fn parse_array(json: &str) -> Result<Vec<SensorPacket>, TrackerError> {
        let packets: Vec<SensorPacket> = serde_json::from_str(json)?;
        Ok(packets)
    }

    /// Parse NDJSON (newline-delimited JSON) containing packets.
    /// Blank lines are skipped; a malformed line reports its line number.
    pub fn parse_ndjson(ndjson: &str) -> Result<Vec<SensorPacket>, TrackerError> {
        let mut packets = Vec::new();
        for (line_num, line) in ndjson.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            match serde_json::from_str::<SensorPacket>(trimmed) {
                Ok(packet) => packets.push(packet),
                Err(e) => {
                    return Err(TrackerError::ParseError(format!(
                        "Failed to parse line {}: {}",
                        line_num + 1,
                        e
                    )));
                }
            }
        }
        Ok(packets)
    }

    /// Check each packet against the registry without building summaries.
    /// Returns one entry per failing packet; valid packets produce nothing.
    pub fn validate_packets(packets: &[SensorPacket]) -> Vec<PacketValidation> {
        let registry = WorkoutRegistry::global();
        packets
            .iter()
            .enumerate()
            .filter_map(|(index, packet)| {
                registry
                    .build_sample(&packet.code, &packet.data)
                    .err()
                    .map(|error| PacketValidation {
                        index,
                        code: packet.code.clone(),
                        error,
                    })
            })
            .collect()
    }
}

/// Validation failure for one packet in a stream
#[derive(Debug)]
pub struct PacketValidation {
    /// Zero-based position in the input stream
    pub index: usize,
    pub code: String,
    pub error: TrackerError,
}
