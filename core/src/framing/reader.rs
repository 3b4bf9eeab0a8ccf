use std::io::Read;

use crate::framing::decode::decode_frame_limited;
use crate::framing::types::FrameError;

/// Sequential scan over plain slices.
///
/// Yields `(content, len)` until the source ends cleanly. The first error
/// (truncation, oversize, I/O) is yielded once and then the iterator fuses.
pub struct SliceIter<'a, R: Read + ?Sized> {
    source: &'a mut R,
    max_len: Option<u32>,
    done: bool,
}

impl<'a, R: Read + ?Sized> SliceIter<'a, R> {
    pub fn new(source: &'a mut R) -> Self {
        Self { source, max_len: None, done: false }
    }

    /// Reject slices declaring more than `max_len` bytes.
    pub fn with_limit(mut self, max_len: Option<u32>) -> Self {
        self.max_len = max_len;
        self
    }
}

impl<R: Read + ?Sized> Iterator for SliceIter<'_, R> {
    type Item = Result<(Vec<u8>, u32), FrameError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match decode_frame_limited(&mut *self.source, self.max_len) {
            Ok(frame) => Some(Ok(frame)),
            Err(FrameError::EndOfStream) => {
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
