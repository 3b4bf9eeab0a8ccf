use std::io;
use thiserror::Error;

use crate::{
    compression::{CompressionError, PoolError},
    config::ConfigError,
    framing::FrameError,
};

/// Unified slice error covering I/O, framing, codecs, pool borrowing and configuration.
/// - `From<T>` impls enable `?` across the layers.
/// - Nothing in the crate logs, swallows or retries these; they go straight to the caller.
#[derive(Debug, Error)]
pub enum SliceError {
    /// Sink failure outside of frame encoding (open, raw writes, stream copies).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Frame-level error (end of stream, truncation, sink failure mid-frame).
    #[error("frame error: {0}")]
    Frame(#[from] FrameError),

    /// Compression or decompression rejected by the codec.
    #[error("compression error: {0}")]
    Compression(#[from] CompressionError),

    /// No codec instance could be borrowed.
    #[error("codec pool error: {0}")]
    Pool(#[from] PoolError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

impl SliceError {
    /// True when the source ended cleanly before any length-prefix byte.
    pub fn is_end_of_stream(&self) -> bool {
        matches!(self, SliceError::Frame(FrameError::EndOfStream))
    }

    /// True when the source ended in the middle of a frame.
    pub fn is_truncated(&self) -> bool {
        matches!(
            self,
            SliceError::Frame(FrameError::TruncatedHeader { .. })
                | SliceError::Frame(FrameError::TruncatedContent { .. })
        )
    }
}
