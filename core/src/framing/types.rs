use std::io;
use thiserror::Error;

/// Errors raised while encoding or decoding a length-prefixed slice.
///
/// `EndOfStream` is not corruption: it means the source was exhausted before
/// the first byte of a length prefix, which is how sequential scans end.
/// Both truncation variants mean the source stopped mid-frame.
#[derive(Debug, Error)]
pub enum FrameError {
    #[error("end of stream")]
    EndOfStream,

    #[error("truncated length prefix: expected {expected} bytes, got {actual}")]
    TruncatedHeader { expected: usize, actual: usize },

    #[error("truncated slice content: expected {expected} bytes, got {actual}")]
    TruncatedContent { expected: u32, actual: usize },

    #[error("slice of {len} bytes exceeds limit of {max} bytes")]
    TooLarge { len: usize, max: usize },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
