//! codecs/lz4.rs
//! LZ4 block compressor/decompressor with a 4-byte LE decoded-size prefix.
use byteorder::{ByteOrder, LittleEndian};
use lz4_flex::block::{compress_into, decompress_into, get_maximum_output_size};

use crate::compression::constants::LZ4_SIZE_PREFIX;
use crate::compression::types::{CompressionError, Compressor, Decompressor};

const CODEC: &str = "lz4";

/// LZ4 compressor using the block API.
/// Block mode has no levels or dictionaries; the reusable state is the
/// scratch buffer sized to the worst-case output.
pub struct Lz4Compressor {
    scratch: Vec<u8>,
}

impl Lz4Compressor {
    pub fn new() -> Self {
        Self { scratch: Vec::new() }
    }
}

impl Default for Lz4Compressor {
    fn default() -> Self {
        Self::new()
    }
}

impl Compressor for Lz4Compressor {
    fn compress(&mut self, input: &[u8], out: &mut Vec<u8>) -> Result<(), CompressionError> {
        let orig_len = u32::try_from(input.len()).map_err(|_| CompressionError::CompressFailed {
            codec: CODEC,
            msg: format!("input of {} bytes does not fit the size prefix", input.len()),
        })?;

        let bound = get_maximum_output_size(input.len());
        if self.scratch.len() < bound {
            self.scratch.resize(bound, 0);
        }

        let n = compress_into(input, &mut self.scratch)
            .map_err(|e| CompressionError::CompressFailed { codec: CODEC, msg: e.to_string() })?;

        out.reserve(LZ4_SIZE_PREFIX + n);
        out.extend_from_slice(&orig_len.to_le_bytes());
        out.extend_from_slice(&self.scratch[..n]);
        Ok(())
    }
}

pub struct Lz4Decompressor {
    max_decoded_len: usize,
}

impl Lz4Decompressor {
    pub fn new(max_decoded_len: usize) -> Self {
        Self { max_decoded_len }
    }
}

impl Decompressor for Lz4Decompressor {
    fn decompress(&mut self, input: &[u8], out: &mut Vec<u8>) -> Result<(), CompressionError> {
        if input.len() < LZ4_SIZE_PREFIX {
            return Err(CompressionError::DecompressFailed {
                codec: CODEC,
                msg: "input too short for size prefix".into(),
            });
        }

        let (prefix, block) = input.split_at(LZ4_SIZE_PREFIX);
        let orig_len = LittleEndian::read_u32(prefix) as usize;
        if orig_len > self.max_decoded_len {
            return Err(CompressionError::DecodedTooLarge {
                have: orig_len,
                max: self.max_decoded_len,
            });
        }

        if orig_len == 0 && block.is_empty() {
            return Ok(());
        }

        let start = out.len();
        out.resize(start + orig_len, 0);

        match decompress_into(block, &mut out[start..]) {
            Ok(n) if n == orig_len => Ok(()),
            Ok(n) => {
                out.truncate(start);
                Err(CompressionError::DecompressFailed {
                    codec: CODEC,
                    msg: format!("decoded size {} != prefix {}", n, orig_len),
                })
            }
            Err(e) => {
                out.truncate(start);
                Err(CompressionError::DecompressFailed { codec: CODEC, msg: e.to_string() })
            }
        }
    }
}
