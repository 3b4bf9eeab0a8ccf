use std::io::{self, Read};
use byteorder::{ByteOrder, LittleEndian};

use crate::constants::{LEN_PREFIX_SIZE, READ_CHUNK_HINT};
use crate::framing::types::FrameError;

/// Fill a 4-byte prefix, telling a clean end of stream apart from a short prefix.
fn read_prefix<R: Read + ?Sized>(source: &mut R) -> Result<[u8; LEN_PREFIX_SIZE], FrameError> {
    let mut buf = [0u8; LEN_PREFIX_SIZE];
    let mut filled = 0usize;

    while filled < buf.len() {
        match source.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(FrameError::Io(e)),
        }
    }

    match filled {
        0 => Err(FrameError::EndOfStream),
        n if n < LEN_PREFIX_SIZE => Err(FrameError::TruncatedHeader {
            expected: LEN_PREFIX_SIZE,
            actual: n,
        }),
        _ => Ok(buf),
    }
}

/// Read a bare u32 in the requested byte order.
///
/// Zero available bytes yields `EndOfStream`; one to three yields `TruncatedHeader`.
#[inline]
pub fn read_u32<B: ByteOrder, R: Read + ?Sized>(source: &mut R) -> Result<u32, FrameError> {
    let buf = read_prefix(source)?;
    Ok(B::read_u32(&buf))
}

/// Read a bare little-endian u32.
#[inline]
pub fn read_u32_le<R: Read + ?Sized>(source: &mut R) -> Result<u32, FrameError> {
    read_u32::<LittleEndian, R>(source)
}

/// Decode one slice from the source.
///
/// Returns the content and the declared length, which always equals
/// `content.len()` on success. A source that ends inside the content is
/// reported as `TruncatedContent` and no partial bytes are returned.
pub fn decode_frame<R: Read + ?Sized>(source: &mut R) -> Result<(Vec<u8>, u32), FrameError> {
    decode_frame_limited(source, None)
}

/// [`decode_frame`] with an optional upper bound on the declared length.
///
/// Oversized prefixes are rejected before any content is read.
pub fn decode_frame_limited<R: Read + ?Sized>(
    source: &mut R,
    max_len: Option<u32>,
) -> Result<(Vec<u8>, u32), FrameError> {
    let len = read_u32_le(source)?;

    if let Some(max) = max_len {
        if len > max {
            return Err(FrameError::TooLarge {
                len: len as usize,
                max: max as usize,
            });
        }
    }

    let expected = len as usize;
    let mut content = Vec::with_capacity(expected.min(READ_CHUNK_HINT));
    (&mut *source).take(u64::from(len)).read_to_end(&mut content)?;

    if content.len() != expected {
        return Err(FrameError::TruncatedContent {
            expected: len,
            actual: content.len(),
        });
    }

    Ok((content, len))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    /// Hands out one byte per read call.
    struct Trickle<'a>(&'a [u8]);

    impl Read for Trickle<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.0.is_empty() || buf.is_empty() {
                return Ok(0);
            }
            buf[0] = self.0[0];
            self.0 = &self.0[1..];
            Ok(1)
        }
    }

    #[test]
    fn prefix_survives_short_reads() {
        let wire = [3u8, 0, 0, 0, b'a', b'b', b'c'];
        let (content, len) = decode_frame(&mut Trickle(&wire)).unwrap();
        assert_eq!(len, 3);
        assert_eq!(content, b"abc");
    }

    #[test]
    fn limit_rejects_before_reading_content() {
        let mut src = Cursor::new(vec![10u8, 0, 0, 0]);
        match decode_frame_limited(&mut src, Some(4)) {
            Err(FrameError::TooLarge { len, max }) => {
                assert_eq!(len, 10);
                assert_eq!(max, 4);
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert_eq!(src.position(), 4);
    }
}
