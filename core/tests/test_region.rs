// Region lifecycle: binding, aliasing, destructive reallocation, and the
// compression state machine, including failure injection.

#[cfg(test)]
mod tests {
    use std::io::{self, Read, Write};
    use std::sync::Arc;

    use lump_core::compression::{
        create_codec, default_codec, CodecId, CompressionCodec, CompressionError, SharedCodec,
    };
    use lump_core::region::{Endian, RegionBuffer, RegionState};
    use lump_core::types::{LumpError, RangeError};
    use proptest::prelude::*;

    /// Codec that recognises a `BAD!` prefix and refuses every transform.
    struct FailingCodec;

    impl CompressionCodec for FailingCodec {
        fn id(&self) -> CodecId {
            CodecId::Stored
        }

        fn name(&self) -> &'static str {
            "failing"
        }

        fn detect(&self, bytes: &[u8]) -> bool {
            bytes.starts_with(b"BAD!")
        }

        fn encode(&self, _input: &[u8]) -> Result<Vec<u8>, CompressionError> {
            Err(CompressionError::EncodeFailed {
                codec: "failing",
                source: io::Error::new(io::ErrorKind::Other, "injected"),
            })
        }

        fn decode(&self, _input: &[u8]) -> Result<Vec<u8>, CompressionError> {
            Err(CompressionError::DecodeFailed {
                codec: "failing",
                source: io::Error::new(io::ErrorKind::Other, "injected"),
            })
        }
    }

    fn failing() -> SharedCodec {
        Arc::new(FailingCodec)
    }

    fn sample(len: usize) -> Vec<u8> {
        (0..len).map(|i| (i % 7) as u8).collect()
    }

    // ## 1️⃣ Binding

    #[test]
    fn new_region_is_unbound_and_empty() {
        let region = RegionBuffer::new(default_codec());
        assert_eq!(region.state(), RegionState::Unbound);
        assert_eq!(region.length(), 0);
        assert!(region.read().is_empty());
        assert!(!region.is_writable());
    }

    #[test]
    fn bind_slice_is_zero_copy_and_read_only() {
        let parent = sample(32);
        let mut region = RegionBuffer::new(default_codec());
        region.bind_slice(&parent, Endian::Big, 8, 16).unwrap();

        assert_eq!(region.length(), 16);
        assert_eq!(region.order(), Endian::Big);
        assert_eq!(region.as_bytes().as_ptr(), parent[8..].as_ptr());
        assert_eq!(region.state(), RegionState::Bound { writable: false, compressed: false });
        assert!(region.is_aliased());
    }

    #[test]
    fn bind_slice_at_exact_end_is_allowed() {
        let parent = sample(10);
        let mut region = RegionBuffer::new(default_codec());
        region.bind_slice(&parent, Endian::Little, 10, 0).unwrap();
        assert_eq!(region.length(), 0);
        region.bind_slice(&parent, Endian::Little, 0, 10).unwrap();
        assert_eq!(region.length(), 10);
    }

    #[test]
    fn bind_slice_rejects_out_of_bounds() {
        let parent = sample(10);
        let mut region = RegionBuffer::new(default_codec());

        let err = region.bind_slice(&parent, Endian::Little, 4, 7).unwrap_err();
        assert!(matches!(
            err,
            LumpError::Range(RangeError::OutOfBounds { offset: 4, length: 7, capacity: 10 })
        ));
        assert!(err.is_recoverable());

        // Overflowing offset + length is reported, not wrapped.
        let err = region.bind_slice(&parent, Endian::Little, usize::MAX, 2).unwrap_err();
        assert!(matches!(err, LumpError::Range(RangeError::OutOfBounds { .. })));

        // A failed bind leaves the region as it was.
        assert_eq!(region.state(), RegionState::Unbound);
    }

    #[test]
    fn bind_detects_compressed_payload() {
        let codec = default_codec();
        let framed = codec.encode(&sample(64)).unwrap();

        let mut region = RegionBuffer::new(codec.clone());
        region.bind_slice(&framed, Endian::Little, 0, framed.len()).unwrap();
        assert!(region.is_compressed());

        region.bind_owned(sample(64));
        assert!(!region.is_compressed());
    }

    #[test]
    fn bind_owned_keeps_byte_order() {
        let mut region = RegionBuffer::new(default_codec());
        region.set_order(Endian::Big);
        region.bind_owned(vec![1, 2, 3]);
        assert_eq!(region.order(), Endian::Big);
        assert_eq!(region.state(), RegionState::Bound { writable: true, compressed: false });
        assert!(!region.is_aliased());
    }

    // ## 2️⃣ Aliasing and reallocation

    #[test]
    fn writes_through_mutable_slice_reach_parent() {
        let mut parent = vec![0u8; 16];
        {
            let mut region = RegionBuffer::new(default_codec());
            region.bind_slice_mut(&mut parent, Endian::Little, 4, 4).unwrap();
            assert!(region.is_writable());
            assert!(region.is_aliased());

            region.write(None).unwrap().write_all(&[1, 2, 3, 4]).unwrap();
            assert_eq!(region.counters().reallocations, 0);
        }
        assert_eq!(&parent[4..8], &[1, 2, 3, 4]);
        assert!(parent[..4].iter().chain(&parent[8..]).all(|&b| b == 0));
    }

    #[test]
    fn mismatched_capacity_severs_parent_link() {
        let mut parent = vec![7u8; 16];
        {
            let mut region = RegionBuffer::new(default_codec());
            region.bind_slice_mut(&mut parent, Endian::Little, 0, 8).unwrap();

            region.ensure_writable(12).unwrap();
            assert!(!region.is_aliased());
            assert_eq!(region.length(), 12);
            // Fresh allocation: prior content is gone.
            assert!(region.as_bytes().iter().all(|&b| b == 0));

            region.write(None).unwrap().write_all(&[9; 12]).unwrap();
            assert_eq!(region.counters().reallocations, 1);
        }
        assert!(parent.iter().all(|&b| b == 7));
    }

    #[test]
    fn write_on_read_only_view_reallocates() {
        let parent = sample(8);
        let mut region = RegionBuffer::new(default_codec());
        region.bind_slice(&parent, Endian::Little, 0, 8).unwrap();

        region.write(None).unwrap().write_all(&[0xAA; 8]).unwrap();

        assert_eq!(region.state(), RegionState::Bound { writable: true, compressed: false });
        assert_eq!(region.as_bytes(), &[0xAA; 8]);
        assert_eq!(parent, sample(8));
    }

    #[test]
    fn ensure_writable_reuses_matching_owned_storage() {
        let mut region = RegionBuffer::new(default_codec());
        region.bind_owned(vec![5; 10]);

        region.ensure_writable(10).unwrap();
        assert_eq!(region.as_bytes(), &[5; 10]);
        assert_eq!(region.counters().reallocations, 0);
    }

    #[test]
    fn reallocation_clears_compressed_flag() {
        let mut region = RegionBuffer::new(default_codec());
        region.bind_owned(sample(256));
        region.compress().unwrap();
        assert!(region.is_compressed());

        region.ensure_writable(32).unwrap();
        assert_eq!(region.state(), RegionState::Bound { writable: true, compressed: false });
    }

    #[test]
    fn unsatisfiable_allocation_is_reported_and_state_kept() {
        let parent = sample(8);
        let mut region = RegionBuffer::new(default_codec());
        region.bind_slice(&parent, Endian::Little, 0, 8).unwrap();

        let err = region.ensure_writable(usize::MAX).unwrap_err();
        assert!(matches!(err, LumpError::Allocation { requested: usize::MAX }));
        assert!(!err.is_recoverable());

        assert_eq!(region.state(), RegionState::Bound { writable: false, compressed: false });
        assert_eq!(region.as_bytes(), &parent[..]);
    }

    #[test]
    fn writer_never_grows_the_region() {
        let mut region = RegionBuffer::new(default_codec());
        let mut w = region.write(Some(4)).unwrap();
        assert_eq!(w.capacity(), 4);

        let err = w.write_all(&[1, 2, 3, 4, 5]).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::WriteZero);
        assert_eq!(region.length(), 4);
    }

    #[test]
    fn into_owned_copies_and_keeps_state() {
        let codec = default_codec();
        let framed = codec.encode(&sample(40)).unwrap();

        let owned = {
            let mut region = RegionBuffer::new(codec.clone());
            region.bind_slice(&framed, Endian::Big, 0, framed.len()).unwrap();
            region.into_owned()
        };
        drop(framed);

        assert!(owned.is_compressed());
        assert!(owned.is_writable());
        assert!(!owned.is_aliased());
        assert_eq!(owned.order(), Endian::Big);
    }

    // ## 3️⃣ Compression state machine

    #[test]
    fn compress_uncompress_round_trip_every_codec() {
        for id in [CodecId::Stored, CodecId::Zstd, CodecId::Lz4, CodecId::Deflate] {
            let codec = create_codec(id as u16, None).unwrap();
            let original = sample(1000);

            let mut region = RegionBuffer::new(codec);
            region.bind_owned(original.clone());
            region.compress().unwrap();
            assert!(region.is_compressed(), "{:?}", id);
            region.uncompress().unwrap();

            assert!(!region.is_compressed(), "{:?}", id);
            assert_eq!(region.as_bytes(), &original[..], "{:?}", id);
        }
    }

    #[test]
    fn compress_and_uncompress_are_idempotent() {
        let mut region = RegionBuffer::new(default_codec());
        region.bind_owned(sample(500));

        region.compress().unwrap();
        let once = region.as_bytes().to_vec();
        region.compress().unwrap();
        assert_eq!(region.as_bytes(), &once[..]);
        assert_eq!(region.counters().compressions, 1);

        region.uncompress().unwrap();
        region.uncompress().unwrap();
        assert_eq!(region.as_bytes(), &sample(500)[..]);
        assert_eq!(region.counters().decompressions, 1);
    }

    #[test]
    fn compressing_read_only_view_leaves_parent_untouched() {
        let parent = sample(128);
        let mut region = RegionBuffer::new(default_codec());
        region.bind_slice(&parent, Endian::Little, 0, 128).unwrap();

        region.compress().unwrap();
        assert!(region.is_compressed());
        assert!(!region.is_aliased());
        assert_eq!(parent, sample(128));
    }

    #[test]
    fn length_is_stored_size_and_uncompressed_length_is_payload_size() {
        let codec = create_codec(CodecId::Stored as u16, None).unwrap();
        let mut region = RegionBuffer::new(codec);
        region.bind_owned(sample(100));
        assert_eq!(region.uncompressed_length(), Some(100));

        region.compress().unwrap();
        assert_eq!(region.length(), 112);
        assert_eq!(region.uncompressed_length(), Some(100));
    }

    #[test]
    fn frame_shaped_payload_binds_as_compressed() {
        let codec = create_codec(CodecId::Stored as u16, None).unwrap();
        let lookalike = codec.encode(b"xyz").unwrap();

        let mut region = RegionBuffer::new(codec);
        region.bind_owned(lookalike.clone());
        assert!(region.is_compressed());

        // compress is a no-op, uncompress decodes the lookalike frame.
        region.compress().unwrap();
        region.uncompress().unwrap();
        assert_eq!(region.as_bytes(), b"xyz");
    }

    #[test]
    fn raw_bind_round_trips_frame_shaped_payload() {
        let codec = create_codec(CodecId::Stored as u16, None).unwrap();
        let lookalike = codec.encode(b"xyz").unwrap();

        let mut region = RegionBuffer::new(codec);
        region.bind_owned_raw(lookalike.clone());
        assert_eq!(region.state(), RegionState::Bound { writable: true, compressed: false });

        region.compress().unwrap();
        assert!(region.is_compressed());
        region.uncompress().unwrap();

        assert!(!region.is_compressed());
        assert_eq!(region.as_bytes(), &lookalike[..]);
    }

    #[test]
    fn uncompressed_frame_payload_is_not_redetected() {
        let codec = create_codec(CodecId::Stored as u16, None).unwrap();
        let inner = codec.encode(b"nested").unwrap();
        let outer = codec.encode(&inner).unwrap();

        let mut region = RegionBuffer::new(codec);
        region.bind_owned(outer);
        region.uncompress().unwrap();

        assert!(!region.is_compressed());
        assert_eq!(region.as_bytes(), &inner[..]);
    }

    #[test]
    fn write_on_unbound_region_allocates() {
        let mut region = RegionBuffer::new(default_codec());
        region.write(Some(3)).unwrap().write_all(b"abc").unwrap();
        assert_eq!(region.state(), RegionState::Bound { writable: true, compressed: false });
        assert_eq!(region.as_bytes(), b"abc");
    }

    #[test]
    fn failed_compress_leaves_state_bit_identical() {
        let mut region = RegionBuffer::new(failing());
        region.bind_owned(b"plain payload".to_vec());
        let before = region.as_bytes().to_vec();

        let err = region.compress().unwrap_err();
        assert!(matches!(err, LumpError::Codec(CompressionError::EncodeFailed { .. })));
        assert!(err.is_recoverable());

        assert!(!region.is_compressed());
        assert_eq!(region.as_bytes(), &before[..]);
        assert_eq!(region.counters().codec_failures, 1);
        assert_eq!(region.counters().compressions, 0);
    }

    #[test]
    fn failed_uncompress_leaves_state_bit_identical() {
        let parent = b"BAD!not really compressed".to_vec();
        let mut region = RegionBuffer::new(failing());
        region.bind_slice(&parent, Endian::Little, 0, parent.len()).unwrap();
        assert!(region.is_compressed());

        let err = region.uncompress().unwrap_err();
        assert!(matches!(err, LumpError::Codec(CompressionError::DecodeFailed { .. })));

        assert!(region.is_compressed());
        assert!(region.is_aliased());
        assert_eq!(region.as_bytes(), &parent[..]);
        assert_eq!(region.counters().codec_failures, 1);
    }

    #[test]
    fn corrupt_frame_fails_uncompress_without_mutation() {
        let codec = default_codec();
        let mut framed = codec.encode(&sample(300)).unwrap();
        // Damage the payload but keep the header consistent.
        let last = framed.len() - 1;
        framed[12..last].iter_mut().for_each(|b| *b = 0xFF);

        let mut region = RegionBuffer::new(codec);
        region.bind_owned(framed.clone());
        assert!(region.is_compressed());

        region.uncompress().unwrap_err();
        assert!(region.is_compressed());
        assert_eq!(region.as_bytes(), &framed[..]);
    }

    #[test]
    fn read_stream_sees_current_bytes() {
        let mut region = RegionBuffer::new(default_codec());
        region.bind_owned(vec![1, 2, 3, 4, 5]);

        let mut r = region.read();
        let mut head = [0u8; 2];
        r.read_exact(&mut head).unwrap();
        assert_eq!(head, [1, 2]);
        assert_eq!(r.remaining(), 3);
        assert_eq!(r.remaining_slice(), &[3, 4, 5]);
    }

    #[test]
    fn telemetry_tracks_transitions() {
        let mut region = RegionBuffer::new(default_codec());
        region.bind_owned(vec![0u8; 4096]);
        region.compress().unwrap();
        region.uncompress().unwrap();
        region.ensure_writable(16).unwrap();

        let snap = region.telemetry();
        assert_eq!(snap.compressions, 1);
        assert_eq!(snap.decompressions, 1);
        assert_eq!(snap.reallocations, 1);
        assert_eq!(snap.bytes_uncompressed, 8192);
        assert!(snap.compression_ratio > 0.0 && snap.compression_ratio < 1.0);
    }

    proptest! {
        #[test]
        fn prop_region_round_trip(
            data in proptest::collection::vec(any::<u8>(), 0..4096),
            id in 0u16..4,
            pre_framed in any::<bool>(),
        ) {
            let codec = create_codec(id, None).unwrap();
            let data = if pre_framed { codec.encode(&data).unwrap() } else { data };

            let mut region = RegionBuffer::new(codec);
            region.bind_owned_raw(data.clone());
            region.compress().unwrap();
            region.uncompress().unwrap();
            prop_assert!(!region.is_compressed());
            prop_assert_eq!(region.as_bytes(), &data[..]);
        }

        #[test]
        fn prop_bind_slice_bounds(cap in 0usize..256, offset in 0usize..300, length in 0usize..300) {
            let parent = vec![0u8; cap];
            let mut region = RegionBuffer::new(default_codec());
            let res = region.bind_slice(&parent, Endian::Little, offset, length);
            prop_assert_eq!(res.is_ok(), offset + length <= cap);
        }
    }
}
