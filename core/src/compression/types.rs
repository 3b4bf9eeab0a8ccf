//! compression/types.rs
//! Codec identifiers, codec traits and their error type.
use num_enum::TryFromPrimitive;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::compression::constants::{
    codec_ids, DEFAULT_LEVEL_DEFLATE, DEFAULT_LEVEL_LZ4, DEFAULT_LEVEL_ZSTD,
};
use crate::utils::enum_name_or_hex;

/// Compression codec identifiers.
/// Zstd is the codec the slice file format was written with and stays the default.
#[repr(u16)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, TryFromPrimitive, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompressionCodec {
    Zstd    = codec_ids::ZSTD,
    Lz4     = codec_ids::LZ4,
    Deflate = codec_ids::DEFLATE,
}

// Not derived: num_enum treats a `#[default]` variant as the fallback for unknown ids.
impl Default for CompressionCodec {
    fn default() -> Self {
        CompressionCodec::Zstd
    }
}

impl CompressionCodec {
    pub fn from_id(raw: u16) -> Result<Self, CompressionError> {
        Self::try_from_primitive(raw).map_err(|_| CompressionError::UnsupportedCodec { codec_id: raw })
    }

    pub const fn id(self) -> u16 {
        self as u16
    }

    pub const fn name(self) -> &'static str {
        match self {
            CompressionCodec::Zstd => "zstd",
            CompressionCodec::Lz4 => "lz4",
            CompressionCodec::Deflate => "deflate",
        }
    }

    pub const fn default_level(self) -> i32 {
        match self {
            CompressionCodec::Zstd => DEFAULT_LEVEL_ZSTD,
            CompressionCodec::Lz4 => DEFAULT_LEVEL_LZ4,
            CompressionCodec::Deflate => DEFAULT_LEVEL_DEFLATE,
        }
    }
}

fn codec_label(raw: &u16) -> String {
    enum_name_or_hex::<CompressionCodec>(*raw)
}

#[derive(Debug, Error)]
pub enum CompressionError {
    #[error("unsupported compression codec: {}", codec_label(.codec_id))]
    UnsupportedCodec { codec_id: u16 },

    #[error("codec {codec} init failed: {msg}")]
    CodecInitFailed { codec: &'static str, msg: String },

    #[error("codec {codec} failed to compress: {msg}")]
    CompressFailed { codec: &'static str, msg: String },

    #[error("codec {codec} failed to decompress: {msg}")]
    DecompressFailed { codec: &'static str, msg: String },

    #[error("decoded size {have} exceeds limit {max}")]
    DecodedTooLarge { have: usize, max: usize },
}

impl CompressionError {
    /// True for failures on the decode side (malformed, truncated or oversized input).
    pub fn is_decompression(&self) -> bool {
        matches!(
            self,
            CompressionError::DecompressFailed { .. } | CompressionError::DecodedTooLarge { .. }
        )
    }
}

/// One-shot compressor. Instances are reusable: each call is independent,
/// but internal state (contexts, scratch buffers) survives between calls.
// Send so pooled instances can move between threads.
pub trait Compressor: Send {
    /// Compress the whole of `input`, appending the encoded bytes to `out`.
    fn compress(&mut self, input: &[u8], out: &mut Vec<u8>) -> Result<(), CompressionError>;
}

/// One-shot decompressor; the mirror of [`Compressor`].
pub trait Decompressor: Send {
    /// Decompress the whole of `input`, appending the decoded bytes to `out`.
    /// On error `out` is left as it was.
    fn decompress(&mut self, input: &[u8], out: &mut Vec<u8>) -> Result<(), CompressionError>;
}
