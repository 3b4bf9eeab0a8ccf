//! file.rs
//! `SliceFile`: a file opened read-write (created if absent) that speaks the slice format.
//!
//! Every operation acts at the file's current cursor. Writes append whatever
//! is there; reads consume from wherever the cursor is. The framing layer
//! never seeks; `rewind` exists only for read-back after a write pass.
//!
//! All methods take `&mut self`: a frame write is two writes and a frame read
//! moves a shared cursor, so sharing one file across threads needs an
//! external lock.
use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use crate::compression::{
    read_compressed_slice_limited, write_compressed_slice, CodecPools, CompressedSliceIter,
};
use crate::config::SliceConfig;
use crate::constants::LEN_PREFIX_SIZE;
use crate::framing::{decode_frame_limited, encode_frame, read_u32_le, write_u32_le, SliceIter};
use crate::telemetry::{SliceCounters, SliceSnapshot};
use crate::types::SliceError;

#[derive(Debug)]
pub struct SliceFile {
    file: File,
    path: PathBuf,
    pools: Arc<CodecPools>,
    max_frame_len: Option<u32>,
    counters: SliceCounters,
}

impl SliceFile {
    /// Open (or create) `path` with default settings and private codec pools.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, SliceError> {
        Self::open_with_config(path, &SliceConfig::default())
    }

    /// Open with `config`, building pools from it.
    pub fn open_with_config<P: AsRef<Path>>(path: P, config: &SliceConfig) -> Result<Self, SliceError> {
        config.validate()?;
        let pools = Arc::new(CodecPools::from_config(config));
        Self::open_with_pools(path, pools, config)
    }

    /// Open with caller-owned pools, so several files can share warm codec instances.
    /// Only `max_frame_len` is taken from `config`; codec settings live in the pools.
    pub fn open_with_pools<P: AsRef<Path>>(
        path: P,
        pools: Arc<CodecPools>,
        config: &SliceConfig,
    ) -> Result<Self, SliceError> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new().read(true).write(true).create(true).open(&path)?;
        debug!(path = %path.display(), codec = pools.codec().name(), "slice file opened");

        Ok(Self {
            file,
            path,
            pools,
            max_frame_len: config.max_frame_len,
            counters: SliceCounters::default(),
        })
    }

    // ---------------------------------------------------------------------
    // Writes
    // ---------------------------------------------------------------------

    /// Write raw bytes with no framing. Returns the byte count.
    pub fn write_bytes(&mut self, buf: &[u8]) -> Result<usize, SliceError> {
        self.file.write_all(buf)?;
        self.counters.add_raw_write(buf.len() as u64);
        Ok(buf.len())
    }

    /// Drain `reader` into the file with no framing. Returns the bytes copied.
    pub fn write_from_reader<R: Read + ?Sized>(&mut self, reader: &mut R) -> Result<u64, SliceError> {
        let copied = io::copy(reader, &mut self.file)?;
        self.counters.add_raw_write(copied);
        Ok(copied)
    }

    /// Write a bare little-endian u32.
    pub fn write_u32_le(&mut self, value: u32) -> Result<(), SliceError> {
        write_u32_le(&mut self.file, value)?;
        self.counters.add_raw_write(LEN_PREFIX_SIZE as u64);
        Ok(())
    }

    /// Write a plain slice. Returns `4 + buf.len()`.
    pub fn write_slice(&mut self, buf: &[u8]) -> Result<usize, SliceError> {
        let written = encode_frame(buf, &mut self.file)?;
        self.counters.add_slice_write(written);
        Ok(written)
    }

    /// Compress `payload` and write it as a slice. Returns the on-disk bytes written.
    pub fn write_compressed_slice(&mut self, payload: &[u8]) -> Result<usize, SliceError> {
        let written = write_compressed_slice(payload, &mut self.file, &self.pools)?;
        self.counters.add_compressed_write(payload.len(), written);
        Ok(written)
    }

    // ---------------------------------------------------------------------
    // Reads
    // ---------------------------------------------------------------------

    /// Read a bare little-endian u32.
    pub fn read_u32_le(&mut self) -> Result<u32, SliceError> {
        let value = read_u32_le(&mut self.file)?;
        self.counters.add_raw_read(LEN_PREFIX_SIZE as u64);
        Ok(value)
    }

    /// Read a plain slice as `(content, len)`.
    pub fn read_slice(&mut self) -> Result<(Vec<u8>, u32), SliceError> {
        let (content, len) = decode_frame_limited(&mut self.file, self.max_frame_len)?;
        self.counters.add_slice_read(len);
        Ok((content, len))
    }

    /// Read and decompress one slice as `(payload, on_disk_len)`.
    ///
    /// `on_disk_len` is the compressed length from the prefix, not `payload.len()`.
    pub fn read_compressed_slice(&mut self) -> Result<(Vec<u8>, u32), SliceError> {
        let (payload, on_disk_len) =
            read_compressed_slice_limited(&mut self.file, &self.pools, self.max_frame_len)?;
        self.counters.add_compressed_read(payload.len(), on_disk_len);
        Ok((payload, on_disk_len))
    }

    /// Iterate plain slices from the cursor to end of stream.
    pub fn slices(&mut self) -> Slices<'_> {
        Slices {
            inner: SliceIter::new(&mut self.file).with_limit(self.max_frame_len),
            counters: &mut self.counters,
        }
    }

    /// Iterate compressed slices from the cursor to end of stream.
    pub fn compressed_slices(&mut self) -> CompressedSlices<'_> {
        CompressedSlices {
            inner: CompressedSliceIter::new(&mut self.file, &self.pools).with_limit(self.max_frame_len),
            counters: &mut self.counters,
        }
    }

    // ---------------------------------------------------------------------
    // Underlying file
    // ---------------------------------------------------------------------

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get_ref(&self) -> &File {
        &self.file
    }

    pub fn get_mut(&mut self) -> &mut File {
        &mut self.file
    }

    pub fn into_inner(self) -> File {
        self.file
    }

    pub fn pools(&self) -> &Arc<CodecPools> {
        &self.pools
    }

    pub fn flush(&mut self) -> Result<(), SliceError> {
        self.file.flush()?;
        Ok(())
    }

    pub fn sync_all(&mut self) -> Result<(), SliceError> {
        self.file.sync_all()?;
        Ok(())
    }

    /// Move the cursor back to the start of the file.
    pub fn rewind(&mut self) -> Result<(), SliceError> {
        self.file.rewind()?;
        Ok(())
    }

    pub fn counters(&self) -> &SliceCounters {
        &self.counters
    }

    pub fn snapshot(&self) -> SliceSnapshot {
        SliceSnapshot::new(
            &self.counters,
            self.pools.compressors().snapshot(),
            self.pools.decompressors().snapshot(),
        )
    }
}

/// Iterator returned by [`SliceFile::slices`]; counts every slice it yields.
pub struct Slices<'a> {
    inner: SliceIter<'a, File>,
    counters: &'a mut SliceCounters,
}

impl Iterator for Slices<'_> {
    type Item = Result<(Vec<u8>, u32), SliceError>;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.inner.next()?;
        if let Ok((_, len)) = &next {
            self.counters.add_slice_read(*len);
        }
        Some(next.map_err(SliceError::from))
    }
}

/// Iterator returned by [`SliceFile::compressed_slices`].
pub struct CompressedSlices<'a> {
    inner: CompressedSliceIter<'a, File>,
    counters: &'a mut SliceCounters,
}

impl Iterator for CompressedSlices<'_> {
    type Item = Result<(Vec<u8>, u32), SliceError>;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.inner.next()?;
        if let Ok((payload, on_disk_len)) = &next {
            self.counters.add_compressed_read(payload.len(), *on_disk_len);
        }
        Some(next)
    }
}
