//! src/compression/codecs/zstd.rs
//!
//! Zstd one-shot compressor/decompressor over reusable bulk contexts.
//!
//! Design notes:
//! - Each instance owns a zstd context; contexts are the expensive part and are
//!   what the codec pool recycles.
//! - Every call produces one complete zstd frame with the content size recorded.
//! - The decoder accepts any sequence of complete frames (including none at all)
//!   and sizes its output from the summed frame content sizes.
//! - If any frame lacks a content size (written by a streaming encoder) the
//!   whole input goes through a streaming decode capped at `max_decoded_len`.
use std::io::Read;

use crate::compression::types::{CompressionError, Compressor, Decompressor};

const CODEC: &str = "zstd";

pub struct ZstdCompressor {
    inner: zstd::bulk::Compressor<'static>,
}

impl ZstdCompressor {
    /// Create a compressor at the given level.
    ///
    /// # Errors
    /// - `CompressionError::CodecInitFailed` if the context cannot be created or the level is rejected.
    pub fn new(level: i32) -> Result<Self, CompressionError> {
        let inner = zstd::bulk::Compressor::new(level).map_err(|e| CompressionError::CodecInitFailed {
            codec: CODEC,
            msg: e.to_string(),
        })?;
        Ok(Self { inner })
    }
}

impl Compressor for ZstdCompressor {
    fn compress(&mut self, input: &[u8], out: &mut Vec<u8>) -> Result<(), CompressionError> {
        let encoded = self.inner.compress(input).map_err(|e| CompressionError::CompressFailed {
            codec: CODEC,
            msg: e.to_string(),
        })?;
        out.extend_from_slice(&encoded);
        Ok(())
    }
}

pub struct ZstdDecompressor {
    inner: zstd::bulk::Decompressor<'static>,
    max_decoded_len: usize,
}

impl ZstdDecompressor {
    pub fn new(max_decoded_len: usize) -> Result<Self, CompressionError> {
        let inner = zstd::bulk::Decompressor::new().map_err(|e| CompressionError::CodecInitFailed {
            codec: CODEC,
            msg: e.to_string(),
        })?;
        Ok(Self { inner, max_decoded_len })
    }

    fn decompress_streaming(&self, input: &[u8], out: &mut Vec<u8>) -> Result<(), CompressionError> {
        let decoder = zstd::stream::read::Decoder::new(input).map_err(|e| CompressionError::CodecInitFailed {
            codec: CODEC,
            msg: e.to_string(),
        })?;

        let mut decoded = Vec::new();
        decoder
            .take(self.max_decoded_len as u64 + 1)
            .read_to_end(&mut decoded)
            .map_err(|e| CompressionError::DecompressFailed { codec: CODEC, msg: e.to_string() })?;

        if decoded.len() > self.max_decoded_len {
            return Err(CompressionError::DecodedTooLarge {
                have: decoded.len(),
                max: self.max_decoded_len,
            });
        }

        out.extend_from_slice(&decoded);
        Ok(())
    }
}

impl Decompressor for ZstdDecompressor {
    fn decompress(&mut self, input: &[u8], out: &mut Vec<u8>) -> Result<(), CompressionError> {
        // An empty payload may be stored as zero bytes rather than an empty frame.
        if input.is_empty() {
            return Ok(());
        }

        let capacity = match total_content_size(input)? {
            Some(size) => usize::try_from(size).unwrap_or(usize::MAX),
            None => return self.decompress_streaming(input, out),
        };

        if capacity > self.max_decoded_len {
            return Err(CompressionError::DecodedTooLarge {
                have: capacity,
                max: self.max_decoded_len,
            });
        }

        let decoded = self.inner.decompress(input, capacity).map_err(|e| CompressionError::DecompressFailed {
            codec: CODEC,
            msg: e.to_string(),
        })?;

        // Sanity check: the frame headers promised this size.
        if decoded.len() != capacity {
            return Err(CompressionError::DecompressFailed {
                codec: CODEC,
                msg: format!("decoded size {} != frame content size {}", decoded.len(), capacity),
            });
        }

        out.extend_from_slice(&decoded);
        Ok(())
    }
}

/// Sum the declared content sizes of every frame in `input`.
///
/// Returns `None` as soon as one frame omits its content size. Fails if the
/// input is not an exact sequence of complete frames.
fn total_content_size(input: &[u8]) -> Result<Option<u64>, CompressionError> {
    let mut total: u64 = 0;
    let mut rest = input;

    while !rest.is_empty() {
        let frame_len = zstd_safe::find_frame_compressed_size(rest).map_err(|code| {
            CompressionError::DecompressFailed {
                codec: CODEC,
                msg: zstd_safe::get_error_name(code).to_string(),
            }
        })?;

        let size = zstd_safe::get_frame_content_size(&rest[..frame_len]).map_err(|_| {
            CompressionError::DecompressFailed {
                codec: CODEC,
                msg: "invalid frame header".into(),
            }
        })?;

        match size {
            Some(n) => total = total.saturating_add(n),
            None => return Ok(None),
        }
        rest = &rest[frame_len..];
    }

    Ok(Some(total))
}
