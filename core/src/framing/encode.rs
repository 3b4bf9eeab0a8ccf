use std::io::Write;
use byteorder::{ByteOrder, LittleEndian};

use crate::constants::{LEN_PREFIX_SIZE, MAX_SLICE_LEN};
use crate::framing::types::FrameError;

/// Write a bare u32 in the requested byte order.
#[inline]
pub fn write_u32<B: ByteOrder, W: Write + ?Sized>(sink: &mut W, value: u32) -> Result<(), FrameError> {
    let mut buf = [0u8; LEN_PREFIX_SIZE];
    B::write_u32(&mut buf, value);
    sink.write_all(&buf)?;
    Ok(())
}

/// Write a bare little-endian u32.
#[inline]
pub fn write_u32_le<W: Write + ?Sized>(sink: &mut W, value: u32) -> Result<(), FrameError> {
    write_u32::<LittleEndian, W>(sink, value)
}

/// Encode one slice onto the sink and return the total bytes written.
///
/// Layout:
///
/// ```text
/// [ len (4, LE) ]
/// [ content (len) ]
/// ```
///
/// The prefix and the content are two separate writes. If the second one
/// fails the sink already holds a dangling prefix; callers that need
/// atomicity must buffer themselves (see [`encode_frame_to_vec`]).
pub fn encode_frame<W: Write + ?Sized>(content: &[u8], sink: &mut W) -> Result<usize, FrameError> {
    let len = u32::try_from(content.len()).map_err(|_| FrameError::TooLarge {
        len: content.len(),
        max: MAX_SLICE_LEN,
    })?;

    write_u32_le(sink, len)?;
    sink.write_all(content)?;

    Ok(LEN_PREFIX_SIZE + content.len())
}

/// Encode one slice into a fresh buffer.
pub fn encode_frame_to_vec(content: &[u8]) -> Result<Vec<u8>, FrameError> {
    let mut out = Vec::with_capacity(LEN_PREFIX_SIZE + content.len());
    let written = encode_frame(content, &mut out)?;
    debug_assert_eq!(written, out.len(), "encoding wrote incorrect length");
    Ok(out)
}
