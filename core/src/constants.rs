//! constants.rs
//! Wire-level constants and defaults shared by framing, compression and the file wrapper.

/// Size of the little-endian length prefix in front of every slice.
pub const LEN_PREFIX_SIZE: usize = 4;

/// Largest content a single slice can declare (the prefix is a u32).
pub const MAX_SLICE_LEN: usize = u32::MAX as usize;

/// Default cap on decompressed output (1 GiB).
pub const DEFAULT_MAX_DECODED_LEN: usize = 1024 * 1024 * 1024;

/// Initial allocation when reading slice content.
/// The buffer grows as bytes actually arrive, so a corrupt length prefix
/// cannot force a huge allocation up front.
pub const READ_CHUNK_HINT: usize = 64 * 1024;
