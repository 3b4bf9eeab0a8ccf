// SliceFile tests on real temp files.

#[cfg(test)]
mod tests {
    use std::fs;
    use std::io::{Cursor, Read, Seek, SeekFrom};
    use std::sync::Arc;

    use slicefile_core::compression::{CodecPools, CompressionCodec};
    use slicefile_core::config::SliceConfig;
    use slicefile_core::file::SliceFile;
    use slicefile_core::framing::FrameError;
    use slicefile_core::types::SliceError;
    use tempfile::tempdir;

    fn init_tracing() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    }

// # ✅ 1. Open creates the file

    #[test]
    fn open_creates_missing_file() {
        init_tracing();
        let dir = tempdir().unwrap();
        let path = dir.path().join("records.bin");
        assert!(!path.exists());

        let file = SliceFile::open(&path).unwrap();
        assert!(path.exists());
        assert_eq!(file.path(), path.as_path());
        assert_eq!(fs::metadata(&path).unwrap().len(), 0);
    }

    #[test]
    fn open_existing_file_keeps_contents() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("existing.bin");
        fs::write(&path, [2u8, 0, 0, 0, b'o', b'k']).unwrap();

        let mut file = SliceFile::open(&path).unwrap();
        let (content, len) = file.read_slice().unwrap();
        assert_eq!(content, b"ok");
        assert_eq!(len, 2);
    }

// # ✅ 2. Mixed write pass, then sequential read-back

    #[test]
    fn mixed_operations_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("mixed.bin");
        let mut file = SliceFile::open(&path).unwrap();

        let big = b"compress me ".repeat(500);
        file.write_u32_le(7).unwrap();
        assert_eq!(file.write_slice(b"plain").unwrap(), 9);
        let compressed_written = file.write_compressed_slice(&big).unwrap();
        assert!(compressed_written < big.len());
        assert_eq!(file.write_slice(b"").unwrap(), 4);
        file.flush().unwrap();

        file.rewind().unwrap();
        assert_eq!(file.read_u32_le().unwrap(), 7);
        assert_eq!(file.read_slice().unwrap(), (b"plain".to_vec(), 5));

        let (payload, on_disk_len) = file.read_compressed_slice().unwrap();
        assert_eq!(payload, big);
        assert_eq!(on_disk_len as usize, compressed_written - 4);
        assert_ne!(on_disk_len as usize, payload.len());

        assert_eq!(file.read_slice().unwrap(), (Vec::new(), 0));
        assert!(file.read_slice().unwrap_err().is_end_of_stream());
    }

    #[test]
    fn raw_writes_are_unframed() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("raw.bin");
        let mut file = SliceFile::open(&path).unwrap();

        assert_eq!(file.write_bytes(b"abc").unwrap(), 3);
        let copied = file.write_from_reader(&mut Cursor::new(b"defgh".to_vec())).unwrap();
        assert_eq!(copied, 5);
        file.sync_all().unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"abcdefgh");
    }

    #[test]
    fn u32_is_little_endian_on_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("u32.bin");
        let mut file = SliceFile::open(&path).unwrap();
        file.write_u32_le(0x0A0B_0C0D).unwrap();

        let mut raw = Vec::new();
        let inner = file.get_mut();
        inner.seek(SeekFrom::Start(0)).unwrap();
        inner.read_to_end(&mut raw).unwrap();
        assert_eq!(raw, [0x0D, 0x0C, 0x0B, 0x0A]);
    }

// # ✅ 3. Iteration

    #[test]
    fn slices_iterate_until_end_of_stream() {
        let dir = tempdir().unwrap();
        let mut file = SliceFile::open(dir.path().join("iter.bin")).unwrap();
        for i in 0..5u8 {
            file.write_slice(&vec![i; i as usize]).unwrap();
        }
        file.rewind().unwrap();

        let lens: Vec<u32> = file.slices().map(|r| r.unwrap().1).collect();
        assert_eq!(lens, vec![0, 1, 2, 3, 4]);
        assert_eq!(file.counters().slices_read, 5);
    }

    #[test]
    fn compressed_slices_iterate() {
        let dir = tempdir().unwrap();
        let mut file = SliceFile::open(dir.path().join("citer.bin")).unwrap();
        let payloads: Vec<Vec<u8>> = (0..4).map(|i| format!("record-{}", i).repeat(20).into_bytes()).collect();
        for p in &payloads {
            file.write_compressed_slice(p).unwrap();
        }
        file.rewind().unwrap();

        let decoded: Vec<Vec<u8>> = file.compressed_slices().map(|r| r.unwrap().0).collect();
        assert_eq!(decoded, payloads);
    }

    #[test]
    fn iteration_stops_after_truncation() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("torn.bin");
        {
            let mut file = SliceFile::open(&path).unwrap();
            file.write_slice(b"complete").unwrap();
            file.write_u32_le(100).unwrap();
            file.write_bytes(b"partial").unwrap();
        }

        let mut file = SliceFile::open(&path).unwrap();
        let results: Vec<_> = file.slices().collect();
        assert_eq!(results.len(), 2);
        assert!(results[0].is_ok());
        match &results[1] {
            Err(SliceError::Frame(FrameError::TruncatedContent { expected, actual })) => {
                assert_eq!(*expected, 100);
                assert_eq!(*actual, 7);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

// # ✅ 4. Config and shared pools

    #[test]
    fn max_frame_len_is_enforced_on_read() {
        let dir = tempdir().unwrap();
        let config = SliceConfig::default().with_max_frame_len(8);
        let mut file = SliceFile::open_with_config(dir.path().join("limit.bin"), &config).unwrap();
        file.write_slice(b"way more than eight bytes").unwrap();
        file.rewind().unwrap();

        assert!(matches!(
            file.read_slice(),
            Err(SliceError::Frame(FrameError::TooLarge { max: 8, .. }))
        ));
    }

    #[test]
    fn invalid_config_is_rejected_at_open() {
        let dir = tempdir().unwrap();
        let config = SliceConfig::default().with_pool_capacity(0);
        assert!(matches!(
            SliceFile::open_with_config(dir.path().join("bad.bin"), &config),
            Err(SliceError::Config(_))
        ));
    }

    #[test]
    fn files_share_injected_pools() {
        let dir = tempdir().unwrap();
        let pools = Arc::new(CodecPools::new(CompressionCodec::Lz4));
        let config = SliceConfig::default();

        let mut a = SliceFile::open_with_pools(dir.path().join("a.bin"), pools.clone(), &config).unwrap();
        let mut b = SliceFile::open_with_pools(dir.path().join("b.bin"), pools.clone(), &config).unwrap();
        a.write_compressed_slice(b"from a").unwrap();
        b.write_compressed_slice(b"from b").unwrap();

        assert_eq!(pools.compressors().snapshot().created, 1);
        assert_eq!(pools.compressors().snapshot().acquired, 2);

        b.rewind().unwrap();
        assert_eq!(b.read_compressed_slice().unwrap().0, b"from b");
    }

    #[test]
    fn deflate_file_roundtrip() {
        let dir = tempdir().unwrap();
        let config = SliceConfig::default().with_codec(CompressionCodec::Deflate).with_level(9);
        let mut file = SliceFile::open_with_config(dir.path().join("deflate.bin"), &config).unwrap();
        let payload = b"deflate deflate deflate ".repeat(40);

        file.write_compressed_slice(&payload).unwrap();
        file.rewind().unwrap();
        assert_eq!(file.read_compressed_slice().unwrap().0, payload);
    }

// # ✅ 5. Counters and snapshots

    #[test]
    fn counters_track_both_paths() {
        let dir = tempdir().unwrap();
        let mut file = SliceFile::open(dir.path().join("count.bin")).unwrap();
        let payload = vec![b'z'; 4096];

        file.write_slice(b"1234").unwrap();
        let written = file.write_compressed_slice(&payload).unwrap();
        file.rewind().unwrap();
        file.read_slice().unwrap();
        file.read_compressed_slice().unwrap();

        let c = file.counters();
        assert_eq!(c.slices_written, 1);
        assert_eq!(c.compressed_written, 1);
        assert_eq!(c.slices_read, 1);
        assert_eq!(c.compressed_read, 1);
        assert_eq!(c.bytes_payload_written, 4 + 4096);
        assert_eq!(c.bytes_payload_read, 4 + 4096);
        assert_eq!(c.bytes_on_disk_written, 8 + written as u64);
        assert_eq!(c.bytes_on_disk_read, c.bytes_on_disk_written);

        let snap = file.snapshot();
        assert!(snap.write_ratio < 1.0);
        assert_eq!(snap.compressors.acquired, 1);
        assert_eq!(snap.decompressors.acquired, 1);
        assert!(snap.to_json().unwrap().contains("\"compressed_written\":1"));
    }

    #[test]
    fn compressed_iteration_counts_and_honors_limit() {
        let dir = tempdir().unwrap();
        let config = SliceConfig::default().with_max_frame_len(64);
        let mut file = SliceFile::open_with_config(dir.path().join("climit.bin"), &config).unwrap();
        file.write_compressed_slice(&[b'a'; 2048]).unwrap();
        file.write_slice(&[0x55u8; 256]).unwrap();
        file.rewind().unwrap();

        let results: Vec<_> = file.compressed_slices().collect();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].as_ref().unwrap().0.len(), 2048);
        assert!(matches!(results[1], Err(SliceError::Frame(FrameError::TooLarge { len: 256, max: 64 }))));

        assert_eq!(file.counters().compressed_read, 1);
        assert_eq!(file.counters().bytes_payload_read, 2048);
    }

    #[test]
    fn raw_only_file_has_unit_ratio() {
        let dir = tempdir().unwrap();
        let mut file = SliceFile::open(dir.path().join("rawratio.bin")).unwrap();
        file.write_u32_le(9).unwrap();
        file.write_bytes(&[1u8; 100]).unwrap();

        assert!((file.snapshot().write_ratio - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn into_inner_returns_positioned_file() {
        let dir = tempdir().unwrap();
        let mut file = SliceFile::open(dir.path().join("inner.bin")).unwrap();
        file.write_slice(b"abc").unwrap();

        assert_eq!(file.get_ref().metadata().unwrap().len(), 7);
        assert_eq!(file.pools().codec(), CompressionCodec::Zstd);

        let mut inner = file.into_inner();
        assert_eq!(inner.stream_position().unwrap(), 7);
    }
}
