//! compression/codecs/mod.rs
//! Concrete codec implementations behind the `Compressor`/`Decompressor` traits.

pub mod deflate;
pub mod lz4;
pub mod zstd;

pub use self::deflate::{DeflateCompressor, DeflateDecompressor};
pub use self::lz4::{Lz4Compressor, Lz4Decompressor};
pub use self::zstd::{ZstdCompressor, ZstdDecompressor};
