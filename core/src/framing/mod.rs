//! Length-prefixed slice framing.
//!
//! Responsibilities:
//! - Encode a slice as `[len: u32 LE][content: len bytes]`
//! - Decode slices with strict truncation checks
//! - Bare u32 primitives for layers that need integers without a payload
//!
//! Non-responsibilities:
//! - Compression
//! - Seeking, indexing, checksums
//! - Coordinating concurrent writers on one sink

pub mod types;
pub mod encode;
pub mod decode;
pub mod reader;

pub use types::FrameError;
pub use encode::{encode_frame, encode_frame_to_vec, write_u32, write_u32_le};
pub use decode::{decode_frame, decode_frame_limited, read_u32, read_u32_le};
pub use reader::SliceIter;

/// Plain slice write; alias of [`encode_frame`] under the file-level name.
pub use encode::encode_frame as write_slice;
/// Plain slice read; alias of [`decode_frame`] under the file-level name.
pub use decode::decode_frame as read_slice;
