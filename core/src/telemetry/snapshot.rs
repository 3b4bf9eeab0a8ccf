// ## src/telemetry/snapshot.rs

use serde::{Deserialize, Serialize};

use crate::telemetry::counters::SliceCounters;
use crate::telemetry::pool::PoolSnapshot;

/// Immutable view of one slice file's activity plus the pools it borrowed from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SliceSnapshot {
    pub counters: SliceCounters,
    /// On-disk bytes written per payload byte written (1.0 means no gain).
    pub write_ratio: f64,
    pub compressors: PoolSnapshot,
    pub decompressors: PoolSnapshot,
}

impl SliceSnapshot {
    pub fn new(counters: &SliceCounters, compressors: PoolSnapshot, decompressors: PoolSnapshot) -> Self {
        let write_ratio = if counters.bytes_payload_written > 0 {
            counters.bytes_on_disk_written as f64 / counters.bytes_payload_written as f64
        } else {
            0.0
        };

        Self {
            counters: counters.clone(),
            write_ratio,
            compressors,
            decompressors,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
