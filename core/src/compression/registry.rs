//! compression/registry.rs
//! Codec registry and factory functions.

use crate::compression::codecs::{
    DeflateCompressor, DeflateDecompressor, Lz4Compressor, Lz4Decompressor, ZstdCompressor,
    ZstdDecompressor,
};
use crate::compression::types::{CompressionCodec, CompressionError, Compressor, Decompressor};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecInfo {
    pub codec: CompressionCodec,
    pub name: &'static str,
    pub supports_level: bool,
    pub default_level: i32,
}

/// Resolve a raw codec id into its static description.
pub fn resolve(codec_id: u16) -> Result<CodecInfo, CompressionError> {
    let codec = CompressionCodec::from_id(codec_id)?;
    Ok(CodecInfo {
        codec,
        name: codec.name(),
        supports_level: !matches!(codec, CompressionCodec::Lz4),
        default_level: codec.default_level(),
    })
}

/// Build a fresh compressor. `level` falls back to the codec default.
pub fn create_compressor(
    codec: CompressionCodec,
    level: Option<i32>,
) -> Result<Box<dyn Compressor>, CompressionError> {
    let level = level.unwrap_or(codec.default_level());
    match codec {
        CompressionCodec::Zstd => Ok(Box::new(ZstdCompressor::new(level)?)),
        CompressionCodec::Lz4 => Ok(Box::new(Lz4Compressor::new())),
        CompressionCodec::Deflate => Ok(Box::new(DeflateCompressor::new(level)?)),
    }
}

/// Build a fresh decompressor whose output is capped at `max_decoded_len` bytes.
pub fn create_decompressor(
    codec: CompressionCodec,
    max_decoded_len: usize,
) -> Result<Box<dyn Decompressor>, CompressionError> {
    match codec {
        CompressionCodec::Zstd => Ok(Box::new(ZstdDecompressor::new(max_decoded_len)?)),
        CompressionCodec::Lz4 => Ok(Box::new(Lz4Decompressor::new(max_decoded_len))),
        CompressionCodec::Deflate => Ok(Box::new(DeflateDecompressor::new(max_decoded_len))),
    }
}
