//! Deflate in the zlib wrapper via flate2's low-level `Compress`/`Decompress` state.
//!
//! The state objects are reset between calls instead of being rebuilt, which
//! keeps the window allocation alive across pooled uses.

use flate2::{Compress, Compression, Decompress, FlushCompress, FlushDecompress, Status};

use crate::compression::types::{CompressionError, Compressor, Decompressor};

const CODEC: &str = "deflate";
const MIN_GROWTH: usize = 64;

pub struct DeflateCompressor {
    inner: Compress,
    scratch: Vec<u8>,
}

impl DeflateCompressor {
    pub fn new(level: i32) -> Result<Self, CompressionError> {
        let level = match level {
            0..=9 => Compression::new(level as u32),
            other => {
                return Err(CompressionError::CodecInitFailed {
                    codec: CODEC,
                    msg: format!("level {} outside 0..=9", other),
                })
            }
        };
        Ok(Self { inner: Compress::new(level, true), scratch: Vec::new() })
    }
}

impl Compressor for DeflateCompressor {
    fn compress(&mut self, input: &[u8], out: &mut Vec<u8>) -> Result<(), CompressionError> {
        self.inner.reset();
        self.scratch.clear();
        self.scratch.reserve(input.len() / 2 + MIN_GROWTH);

        loop {
            let consumed = self.inner.total_in() as usize;
            let status = self
                .inner
                .compress_vec(&input[consumed..], &mut self.scratch, FlushCompress::Finish)
                .map_err(|e| CompressionError::CompressFailed { codec: CODEC, msg: e.to_string() })?;

            match status {
                Status::StreamEnd => break,
                // Output buffer filled up; give the encoder more room.
                Status::Ok | Status::BufError => {
                    let grow = self.scratch.capacity().max(MIN_GROWTH);
                    self.scratch.reserve(grow);
                }
            }
        }

        out.extend_from_slice(&self.scratch);
        Ok(())
    }
}

pub struct DeflateDecompressor {
    inner: Decompress,
    scratch: Vec<u8>,
    max_decoded_len: usize,
}

impl DeflateDecompressor {
    pub fn new(max_decoded_len: usize) -> Self {
        Self { inner: Decompress::new(true), scratch: Vec::new(), max_decoded_len }
    }
}

impl Decompressor for DeflateDecompressor {
    fn decompress(&mut self, input: &[u8], out: &mut Vec<u8>) -> Result<(), CompressionError> {
        self.inner.reset(true);
        self.scratch.clear();
        self.scratch.reserve(input.len().saturating_mul(2).max(MIN_GROWTH));

        loop {
            if self.scratch.len() == self.scratch.capacity() {
                let grow = self.scratch.capacity().max(MIN_GROWTH);
                self.scratch.reserve(grow);
            }

            let before_in = self.inner.total_in();
            let before_out = self.inner.total_out();
            let consumed = before_in as usize;

            let status = self
                .inner
                .decompress_vec(&input[consumed..], &mut self.scratch, FlushDecompress::Finish)
                .map_err(|e| CompressionError::DecompressFailed { codec: CODEC, msg: e.to_string() })?;

            if self.scratch.len() > self.max_decoded_len {
                return Err(CompressionError::DecodedTooLarge {
                    have: self.scratch.len(),
                    max: self.max_decoded_len,
                });
            }

            match status {
                Status::StreamEnd => {
                    let consumed = self.inner.total_in() as usize;
                    if consumed != input.len() {
                        return Err(CompressionError::DecompressFailed {
                            codec: CODEC,
                            msg: format!("{} trailing bytes after end of stream", input.len() - consumed),
                        });
                    }
                    break;
                }
                Status::Ok | Status::BufError => {
                    // No progress with room to spare means the stream stops short.
                    let stalled = self.inner.total_in() == before_in && self.inner.total_out() == before_out;
                    if stalled {
                        return Err(CompressionError::DecompressFailed {
                            codec: CODEC,
                            msg: "unexpected end of deflate stream".into(),
                        });
                    }
                }
            }
        }

        out.extend_from_slice(&self.scratch);
        Ok(())
    }
}
