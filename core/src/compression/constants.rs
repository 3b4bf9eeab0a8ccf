/// Stable codec IDs (u16) for configuration and diagnostics.
pub mod codec_ids {
    pub const ZSTD: u16    = 0x0001;
    pub const LZ4: u16     = 0x0002;
    pub const DEFLATE: u16 = 0x0003;
}

/// Default compression levels (balanced).
pub const DEFAULT_LEVEL_ZSTD: i32 = 3;
pub const DEFAULT_LEVEL_LZ4: i32 = 0; // block mode has no levels
pub const DEFAULT_LEVEL_DEFLATE: i32 = 6;

/// Size of the decoded-length prefix the LZ4 block codec puts in front of its output.
pub const LZ4_SIZE_PREFIX: usize = 4;
