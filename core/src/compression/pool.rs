//! compression/pool.rs
//! Reusable codec instances shared across threads.
//!
//! Design notes:
//! - The idle set is a lock-free `SegQueue`; acquire pops or constructs, release pushes.
//! - Acquire never blocks. Unbounded pools grow with peak concurrency and keep
//!   every instance they ever built until the pool is dropped.
//! - Bounded pools refuse with `PoolError::Exhausted` once `capacity` borrows are outstanding.
//! - Borrowing is scoped: `PooledCodec` returns its instance on drop, on every exit path.
//! - Compressors and decompressors live in distinct pool types, so roles cannot mix.
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::sync::atomic::{AtomicUsize, Ordering};

use crossbeam::queue::SegQueue;
use thiserror::Error;
use tracing::{debug, trace};

use crate::compression::registry::{create_compressor, create_decompressor};
use crate::compression::types::{CompressionCodec, CompressionError, Compressor, Decompressor};
use crate::config::SliceConfig;
use crate::constants::DEFAULT_MAX_DECODED_LEN;
use crate::telemetry::{PoolCounters, PoolSnapshot};

#[derive(Debug, Error)]
pub enum PoolError {
    #[error("{role} pool exhausted: {capacity} instances already borrowed")]
    Exhausted { role: &'static str, capacity: usize },

    #[error("{role} pool could not construct an instance: {source}")]
    Init {
        role: &'static str,
        #[source]
        source: CompressionError,
    },
}

type Factory<T> = Box<dyn Fn() -> Result<T, CompressionError> + Send + Sync>;

pub struct CodecPool<T> {
    role: &'static str,
    idle: SegQueue<T>,
    factory: Factory<T>,
    capacity: Option<usize>,
    outstanding: AtomicUsize,
    counters: PoolCounters,
}

pub type CompressorPool = CodecPool<Box<dyn Compressor>>;
pub type DecompressorPool = CodecPool<Box<dyn Decompressor>>;

impl<T> CodecPool<T> {
    /// Unbounded pool; `factory` builds a new instance whenever the idle set is empty.
    pub fn new<F>(role: &'static str, factory: F) -> Self
    where
        F: Fn() -> Result<T, CompressionError> + Send + Sync + 'static,
    {
        Self {
            role,
            idle: SegQueue::new(),
            factory: Box::new(factory),
            capacity: None,
            outstanding: AtomicUsize::new(0),
            counters: PoolCounters::default(),
        }
    }

    /// Pool allowing at most `capacity` outstanding borrows.
    pub fn bounded<F>(role: &'static str, capacity: usize, factory: F) -> Self
    where
        F: Fn() -> Result<T, CompressionError> + Send + Sync + 'static,
    {
        let mut pool = Self::new(role, factory);
        pool.capacity = Some(capacity);
        pool
    }

    /// Borrow an instance: an idle one if available, otherwise a new one.
    ///
    /// # Errors
    /// - `PoolError::Exhausted` when a bounded pool is at capacity.
    /// - `PoolError::Init` when the factory fails; nothing stays reserved.
    pub fn acquire(&self) -> Result<PooledCodec<'_, T>, PoolError> {
        let in_use = self.reserve_slot()?;

        let inner = match self.idle.pop() {
            Some(inner) => inner,
            None => match (self.factory)() {
                Ok(inner) => {
                    self.counters.record_created();
                    debug!(role = self.role, in_use, "constructed codec instance");
                    inner
                }
                Err(source) => {
                    self.outstanding.fetch_sub(1, Ordering::AcqRel);
                    return Err(PoolError::Init { role: self.role, source });
                }
            },
        };

        self.counters.record_acquired(in_use);
        Ok(PooledCodec { pool: self, inner: Some(inner) })
    }

    /// Return an instance to the idle set. Only reachable through `PooledCodec`.
    fn release(&self, inner: T) {
        self.idle.push(inner);
        self.outstanding.fetch_sub(1, Ordering::AcqRel);
        self.counters.record_released();
        trace!(role = self.role, "released codec instance");
    }

    fn reserve_slot(&self) -> Result<usize, PoolError> {
        match self.capacity {
            None => Ok(self.outstanding.fetch_add(1, Ordering::AcqRel) + 1),
            Some(capacity) => self
                .outstanding
                .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| (n < capacity).then_some(n + 1))
                .map(|prev| prev + 1)
                .map_err(|_| {
                    self.counters.record_rejected();
                    debug!(role = self.role, capacity, "codec pool at capacity");
                    PoolError::Exhausted { role: self.role, capacity }
                }),
        }
    }

    pub fn role(&self) -> &'static str {
        self.role
    }

    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    pub fn idle_len(&self) -> usize {
        self.idle.len()
    }

    pub fn in_use(&self) -> usize {
        self.outstanding.load(Ordering::Acquire)
    }

    pub fn snapshot(&self) -> PoolSnapshot {
        self.counters.snapshot(self.idle_len(), self.in_use())
    }
}

impl<T> fmt::Debug for CodecPool<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CodecPool")
            .field("role", &self.role)
            .field("capacity", &self.capacity)
            .field("idle", &self.idle_len())
            .field("in_use", &self.in_use())
            .finish()
    }
}

/// Exclusive borrow of one pooled instance. Dereferences to the instance and
/// hands it back to its pool when dropped.
pub struct PooledCodec<'a, T> {
    pool: &'a CodecPool<T>,
    inner: Option<T>,
}

impl<T> PooledCodec<'_, T> {
    /// Give the instance back now instead of at end of scope.
    pub fn release(self) {
        drop(self);
    }
}

impl<T> Deref for PooledCodec<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.inner.as_ref().expect("pooled codec accessed after release")
    }
}

impl<T> DerefMut for PooledCodec<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        self.inner.as_mut().expect("pooled codec accessed after release")
    }
}

impl<T> Drop for PooledCodec<'_, T> {
    fn drop(&mut self) {
        if let Some(inner) = self.inner.take() {
            self.pool.release(inner);
        }
    }
}

/// The compressor and decompressor pools a slice file borrows from.
///
/// Owned by whoever builds the file wrapper, usually behind an `Arc` so
/// several files and threads can share warm instances.
#[derive(Debug)]
pub struct CodecPools {
    codec: CompressionCodec,
    compressors: CompressorPool,
    decompressors: DecompressorPool,
}

impl CodecPools {
    /// Unbounded pools for `codec` at its default level.
    pub fn new(codec: CompressionCodec) -> Self {
        let compressors = CodecPool::new("compressor", move || create_compressor(codec, None));
        let decompressors =
            CodecPool::new("decompressor", move || create_decompressor(codec, DEFAULT_MAX_DECODED_LEN));
        Self { codec, compressors, decompressors }
    }

    pub fn from_config(config: &SliceConfig) -> Self {
        let codec = config.codec;
        let level = config.effective_level();
        let max_decoded_len = config.max_decoded_len;

        let make_compressor = move || create_compressor(codec, Some(level));
        let make_decompressor = move || create_decompressor(codec, max_decoded_len);

        let (compressors, decompressors) = match config.pool_capacity {
            Some(capacity) => (
                CodecPool::bounded("compressor", capacity, make_compressor),
                CodecPool::bounded("decompressor", capacity, make_decompressor),
            ),
            None => (
                CodecPool::new("compressor", make_compressor),
                CodecPool::new("decompressor", make_decompressor),
            ),
        };

        Self { codec, compressors, decompressors }
    }

    /// Assemble from prebuilt pools (custom or instrumented codecs).
    pub fn from_pools(codec: CompressionCodec, compressors: CompressorPool, decompressors: DecompressorPool) -> Self {
        Self { codec, compressors, decompressors }
    }

    pub fn codec(&self) -> CompressionCodec {
        self.codec
    }

    pub fn compressors(&self) -> &CompressorPool {
        &self.compressors
    }

    pub fn decompressors(&self) -> &DecompressorPool {
        &self.decompressors
    }
}

impl Default for CodecPools {
    fn default() -> Self {
        Self::new(CompressionCodec::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicU32;
    use std::sync::Arc;

    fn counting_pool(capacity: Option<usize>) -> (CodecPool<u32>, Arc<AtomicU32>) {
        let built = Arc::new(AtomicU32::new(0));
        let counter = built.clone();
        let factory = move || Ok(counter.fetch_add(1, Ordering::SeqCst));
        let pool = match capacity {
            Some(cap) => CodecPool::bounded("test", cap, factory),
            None => CodecPool::new("test", factory),
        };
        (pool, built)
    }

    #[test]
    fn released_instance_is_reused() {
        let (pool, built) = counting_pool(None);
        let first = *pool.acquire().unwrap();
        let second = *pool.acquire().unwrap();
        assert_eq!(first, second);
        assert_eq!(built.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn concurrent_borrows_get_distinct_instances() {
        let (pool, _) = counting_pool(None);
        let a = pool.acquire().unwrap();
        let b = pool.acquire().unwrap();
        assert_ne!(*a, *b);
        assert_eq!(pool.in_use(), 2);
        drop(a);
        b.release();
        assert_eq!(pool.in_use(), 0);
        assert_eq!(pool.idle_len(), 2);
    }

    #[test]
    fn bounded_pool_refuses_without_blocking() {
        let (pool, _) = counting_pool(Some(1));
        let held = pool.acquire().unwrap();
        assert!(matches!(pool.acquire(), Err(PoolError::Exhausted { capacity: 1, .. })));
        drop(held);
        assert!(pool.acquire().is_ok());
        assert_eq!(pool.snapshot().rejected, 1);
    }

    #[test]
    fn factory_failure_frees_the_slot() {
        let pool: CodecPool<u32> = CodecPool::bounded("test", 1, || {
            Err(CompressionError::CodecInitFailed { codec: "test", msg: "boom".into() })
        });
        assert!(matches!(pool.acquire(), Err(PoolError::Init { .. })));
        assert_eq!(pool.in_use(), 0);
        assert!(matches!(pool.acquire(), Err(PoolError::Init { .. })));
    }
}
