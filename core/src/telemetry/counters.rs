//! telemetry/counters.rs
//! Mutable counters kept by every region.
//!
//! Summary: counts codec transitions, failures, and reallocations.
//! Converted into an immutable `TelemetrySnapshot` on demand.
use bincode::{Decode, Encode};
use std::ops::AddAssign;

/// Deterministic counters collected over a region's lifetime.
#[derive(Default, Clone, Debug, Encode, Decode, PartialEq, Eq)]
pub struct RegionCounters {
    pub compressions: u64,
    pub decompressions: u64,
    pub codec_failures: u64,
    pub reallocations: u64,
    /// Raw bytes on the uncompressed side of successful transitions.
    pub bytes_uncompressed: u64,
    /// Stored bytes on the compressed side of successful transitions.
    pub bytes_compressed: u64,
}

impl RegionCounters {
    /// Record one successful `compress`.
    pub fn add_compress(&mut self, raw_len: usize, stored_len: usize) {
        self.compressions += 1;
        self.bytes_uncompressed += raw_len as u64;
        self.bytes_compressed += stored_len as u64;
    }

    /// Record one successful `uncompress`.
    pub fn add_decompress(&mut self, stored_len: usize, raw_len: usize) {
        self.decompressions += 1;
        self.bytes_uncompressed += raw_len as u64;
        self.bytes_compressed += stored_len as u64;
    }

    pub fn add_codec_failure(&mut self) {
        self.codec_failures += 1;
    }

    pub fn add_reallocation(&mut self) {
        self.reallocations += 1;
    }

    // Each handle owns its counters; aggregation happens here,
    // after the work, without locks or atomics.
    pub fn merge(&mut self, other: &RegionCounters) {
        self.compressions += other.compressions;
        self.decompressions += other.decompressions;
        self.codec_failures += other.codec_failures;
        self.reallocations += other.reallocations;
        self.bytes_uncompressed += other.bytes_uncompressed;
        self.bytes_compressed += other.bytes_compressed;
    }

    /// Compact binary form for shipping counters between workers.
    pub fn to_bytes(&self) -> Result<Vec<u8>, bincode::error::EncodeError> {
        bincode::encode_to_vec(self, bincode::config::standard())
    }

    pub fn from_bytes(buf: &[u8]) -> Result<Self, bincode::error::DecodeError> {
        let (counters, _) = bincode::decode_from_slice(buf, bincode::config::standard())?;
        Ok(counters)
    }
}

impl AddAssign for RegionCounters {
    fn add_assign(&mut self, rhs: Self) {
        self.merge(&rhs);
    }
}
