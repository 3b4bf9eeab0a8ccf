//! telemetry/counters.rs
//! Mutable counters kept by a slice file.
//!
//! Summary: frame and byte counts for the plain and compressed paths.
//! Converted into an immutable `SliceSnapshot` on demand.
use serde::{Deserialize, Serialize};
use std::ops::AddAssign;

use crate::constants::LEN_PREFIX_SIZE;

#[derive(Default, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SliceCounters {
    pub slices_written: u64,
    pub slices_read: u64,
    pub compressed_written: u64,
    pub compressed_read: u64,
    /// Caller-visible payload bytes (before compression on write, after decompression on read).
    /// Raw bytes and bare u32s count as payload too: they reach disk unchanged.
    pub bytes_payload_written: u64,
    pub bytes_payload_read: u64,
    /// Bytes moved through the sink, prefixes included.
    pub bytes_on_disk_written: u64,
    pub bytes_on_disk_read: u64,
}

impl SliceCounters {
    /// Record raw bytes written without framing (`write_bytes`, stream copies, bare u32s).
    pub fn add_raw_write(&mut self, len: u64) {
        self.bytes_payload_written += len;
        self.bytes_on_disk_written += len;
    }

    /// Record a bare u32 read.
    pub fn add_raw_read(&mut self, len: u64) {
        self.bytes_payload_read += len;
        self.bytes_on_disk_read += len;
    }

    /// Record one plain slice written.
    /// - `total_len`: prefix + content as returned by the encoder
    pub fn add_slice_write(&mut self, total_len: usize) {
        self.slices_written += 1;
        self.bytes_payload_written += total_len.saturating_sub(LEN_PREFIX_SIZE) as u64;
        self.bytes_on_disk_written += total_len as u64;
    }

    /// Record one plain slice read.
    /// - `content_len`: declared (and actual) content length
    pub fn add_slice_read(&mut self, content_len: u32) {
        self.slices_read += 1;
        self.bytes_payload_read += u64::from(content_len);
        self.bytes_on_disk_read += (LEN_PREFIX_SIZE as u64) + u64::from(content_len);
    }

    /// Record one compressed slice written.
    /// - `payload_len`: bytes handed in by the caller
    /// - `total_len`: prefix + compressed content as returned by the encoder
    pub fn add_compressed_write(&mut self, payload_len: usize, total_len: usize) {
        self.compressed_written += 1;
        self.bytes_payload_written += payload_len as u64;
        self.bytes_on_disk_written += total_len as u64;
    }

    /// Record one compressed slice read.
    /// - `decoded_len`: bytes returned to the caller
    /// - `on_disk_len`: compressed content length from the prefix
    pub fn add_compressed_read(&mut self, decoded_len: usize, on_disk_len: u32) {
        self.compressed_read += 1;
        self.bytes_payload_read += decoded_len as u64;
        self.bytes_on_disk_read += (LEN_PREFIX_SIZE as u64) + u64::from(on_disk_len);
    }

    pub fn merge(&mut self, other: &SliceCounters) {
        self.slices_written += other.slices_written;
        self.slices_read += other.slices_read;
        self.compressed_written += other.compressed_written;
        self.compressed_read += other.compressed_read;

        self.bytes_payload_written += other.bytes_payload_written;
        self.bytes_payload_read += other.bytes_payload_read;
        self.bytes_on_disk_written += other.bytes_on_disk_written;
        self.bytes_on_disk_read += other.bytes_on_disk_read;
    }
}

impl AddAssign for SliceCounters {
    fn add_assign(&mut self, rhs: Self) {
        self.merge(&rhs);
    }
}
