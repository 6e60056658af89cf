//! telemetry/snapshot.rs
//!
//! Immutable telemetry view of one region (or several, after merging).

use std::time::Duration;
use serde::{Serialize, Deserialize};

use crate::telemetry::counters::RegionCounters;
use crate::telemetry::timers::{Stage, StageTimes};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySnapshot {
    pub compressions: u64,
    pub decompressions: u64,
    pub codec_failures: u64,
    pub reallocations: u64,
    pub bytes_uncompressed: u64,
    pub bytes_compressed: u64,
    /// `bytes_compressed / bytes_uncompressed`, 0.0 when nothing moved.
    pub compression_ratio: f64,
    pub stage_times: StageTimes,
}

impl TelemetrySnapshot {
    pub fn from(counters: &RegionCounters, stage_times: &StageTimes) -> Self {
        let compression_ratio = if counters.bytes_uncompressed > 0 {
            counters.bytes_compressed as f64 / counters.bytes_uncompressed as f64
        } else {
            0.0
        };

        Self {
            compressions: counters.compressions,
            decompressions: counters.decompressions,
            codec_failures: counters.codec_failures,
            reallocations: counters.reallocations,
            bytes_uncompressed: counters.bytes_uncompressed,
            bytes_compressed: counters.bytes_compressed,
            compression_ratio,
            stage_times: stage_times.clone(),
        }
    }

    pub fn stage_time(&self, stage: Stage) -> Duration {
        self.stage_times.get(stage)
    }

    pub fn total_stage_time(&self) -> Duration {
        self.stage_times.total()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
