//! compression/mod.rs
//! One-shot compression behind a pooled, reusable codec layer.
//!
//! Notes:
//! - Codecs compress a whole payload per call; there is no streaming or chunking.
//! - Instances are expensive to build and cheap to reset, so they are pooled.
//! - The envelope frames compressed bytes exactly like plain slices.

pub mod constants;
pub mod types;
pub mod registry;
pub mod codecs;
pub mod pool;
pub mod envelope;

pub use constants::*;
pub use types::*;
pub use registry::*;
pub use pool::{CodecPool, CodecPools, CompressorPool, DecompressorPool, PoolError, PooledCodec};
pub use envelope::{
    read_compressed_slice, read_compressed_slice_limited, write_compressed_slice, CompressedSliceIter,
};
