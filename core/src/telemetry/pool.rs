//! telemetry/pool.rs
//! Lock-free counters for a codec pool.
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

#[derive(Debug, Default)]
pub struct PoolCounters {
    created: AtomicU64,
    acquired: AtomicU64,
    released: AtomicU64,
    rejected: AtomicU64,
    peak_in_use: AtomicUsize,
}

impl PoolCounters {
    pub fn record_created(&self) {
        self.created.fetch_add(1, Ordering::Relaxed);
    }

    /// `in_use` is the number of outstanding borrows including this one.
    pub fn record_acquired(&self, in_use: usize) {
        self.acquired.fetch_add(1, Ordering::Relaxed);
        self.peak_in_use.fetch_max(in_use, Ordering::Relaxed);
    }

    pub fn record_released(&self) {
        self.released.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_rejected(&self) {
        self.rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self, idle: usize, in_use: usize) -> PoolSnapshot {
        PoolSnapshot {
            created: self.created.load(Ordering::Relaxed),
            acquired: self.acquired.load(Ordering::Relaxed),
            released: self.released.load(Ordering::Relaxed),
            rejected: self.rejected.load(Ordering::Relaxed),
            idle,
            in_use,
            peak_in_use: self.peak_in_use.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time view of a codec pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolSnapshot {
    /// Instances constructed over the pool's lifetime.
    pub created: u64,
    pub acquired: u64,
    pub released: u64,
    /// Acquires refused by a bounded pool.
    pub rejected: u64,
    pub idle: usize,
    pub in_use: usize,
    pub peak_in_use: usize,
}

impl PoolSnapshot {
    /// Fraction of acquires served from the idle set rather than by construction.
    pub fn reuse_ratio(&self) -> f64 {
        if self.acquired == 0 {
            return 0.0;
        }
        self.acquired.saturating_sub(self.created) as f64 / self.acquired as f64
    }
}
