//! telemetry/mod.rs
//! Counters and immutable snapshots for slice files and codec pools.
//!
//! Notes:
//! - Per-file counters are plain integers; a `SliceFile` is `&mut`-only so no atomics are needed.
//! - Pool counters are atomics because pools are shared across threads.
//! - Snapshots are immutable and serde-serializable for reporting.

pub mod counters;
pub mod pool;
pub mod snapshot;

pub use counters::*;
pub use pool::*;
pub use snapshot::*;
