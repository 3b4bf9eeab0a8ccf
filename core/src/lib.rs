//! slicefile-core
//!
//! Length-prefixed binary slices on a plain file, with an optional
//! compression envelope backed by pooled codec instances.
//! No index, no seeking, no checksums: append slices, read them back in order.

#![forbid(unsafe_code)]

// Shared and top level
pub mod constants;
pub mod config;
pub mod types;
pub mod utils;

pub mod framing;
pub mod compression;
pub mod telemetry;

// File wrapper
pub mod file;

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::compression::{
        read_compressed_slice, write_compressed_slice, CodecPools, CompressionCodec, CompressionError,
        PoolError,
    };
    pub use crate::config::SliceConfig;
    pub use crate::file::SliceFile;
    pub use crate::framing::{
        decode_frame, encode_frame, read_slice, read_u32_le, write_slice, write_u32_le, FrameError,
    };
    pub use crate::types::SliceError;
}
