//! compression/envelope.rs
//! Compressed slices: the payload is compressed, then framed exactly like a plain slice.
//!
//! Nothing on disk marks a slice as compressed. Callers must know, out of band,
//! which slices went through this path.
use std::io::{Read, Write};

use crate::compression::pool::CodecPools;
use crate::framing::{decode_frame_limited, encode_frame, FrameError};
use crate::types::SliceError;

/// Compress `payload` in one shot and write it as a length-prefixed slice.
///
/// Returns the total bytes written to the sink (prefix + compressed content).
/// The compressor is back in its pool before the sink is touched, whether or
/// not compression succeeded.
pub fn write_compressed_slice<W: Write + ?Sized>(
    payload: &[u8],
    sink: &mut W,
    pools: &CodecPools,
) -> Result<usize, SliceError> {
    let encoded = {
        let mut compressor = pools.compressors().acquire()?;
        let mut encoded = Vec::new();
        compressor.compress(payload, &mut encoded)?;
        encoded
    };

    Ok(encode_frame(&encoded, sink)?)
}

/// Read one compressed slice and decompress it.
///
/// Returns `(decoded_payload, on_disk_len)`. The length is the compressed
/// size read from the prefix, **not** `decoded_payload.len()`.
pub fn read_compressed_slice<R: Read + ?Sized>(
    source: &mut R,
    pools: &CodecPools,
) -> Result<(Vec<u8>, u32), SliceError> {
    read_compressed_slice_limited(source, pools, None)
}

/// [`read_compressed_slice`] with an optional cap on the on-disk length.
pub fn read_compressed_slice_limited<R: Read + ?Sized>(
    source: &mut R,
    pools: &CodecPools,
    max_len: Option<u32>,
) -> Result<(Vec<u8>, u32), SliceError> {
    let (encoded, on_disk_len) = decode_frame_limited(source, max_len)?;

    let mut decompressor = pools.decompressors().acquire()?;
    let mut decoded = Vec::new();
    decompressor.decompress(&encoded, &mut decoded)?;

    Ok((decoded, on_disk_len))
}

/// Sequential scan over compressed slices; stops cleanly at end of stream
/// and fuses after the first error.
pub struct CompressedSliceIter<'a, R: Read + ?Sized> {
    source: &'a mut R,
    pools: &'a CodecPools,
    max_len: Option<u32>,
    done: bool,
}

impl<'a, R: Read + ?Sized> CompressedSliceIter<'a, R> {
    pub fn new(source: &'a mut R, pools: &'a CodecPools) -> Self {
        Self { source, pools, max_len: None, done: false }
    }

    pub fn with_limit(mut self, max_len: Option<u32>) -> Self {
        self.max_len = max_len;
        self
    }
}

impl<R: Read + ?Sized> Iterator for CompressedSliceIter<'_, R> {
    type Item = Result<(Vec<u8>, u32), SliceError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match read_compressed_slice_limited(&mut *self.source, self.pools, self.max_len) {
            Ok(slice) => Some(Ok(slice)),
            Err(SliceError::Frame(FrameError::EndOfStream)) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
