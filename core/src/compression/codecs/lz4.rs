//! codecs/lz4.rs
//! LZ4 block codec (lz4_flex, no levels, no dictionary).
use std::io;

use lz4_flex::block::{compress, decompress};

use crate::compression::constants::idents;
use crate::compression::frame::{check_decoded_len, encode_frame, has_signature, peek_frame_header, split_frame};
use crate::compression::types::{CodecId, CompressionCodec, CompressionError};

const NAME: &str = "lz4";

#[derive(Debug, Default, Clone, Copy)]
pub struct Lz4Codec;

impl Lz4Codec {
    pub fn new() -> Self {
        Self
    }
}

impl CompressionCodec for Lz4Codec {
    fn id(&self) -> CodecId {
        CodecId::Lz4
    }

    fn name(&self) -> &'static str {
        NAME
    }

    fn detect(&self, bytes: &[u8]) -> bool {
        has_signature(idents::LZ4, bytes)
    }

    fn encode(&self, input: &[u8]) -> Result<Vec<u8>, CompressionError> {
        // Size lives in our frame header, so the block itself is not size-prefixed.
        let compressed = compress(input);
        encode_frame(NAME, idents::LZ4, input.len(), &compressed)
    }

    fn decode(&self, input: &[u8]) -> Result<Vec<u8>, CompressionError> {
        let (header, payload) = split_frame(NAME, idents::LZ4, input)?;

        let decompressed = decompress(payload, header.actual_size as usize)
            .map_err(|e| CompressionError::DecodeFailed {
                codec: NAME,
                source: io::Error::new(io::ErrorKind::InvalidData, e.to_string()),
            })?;

        check_decoded_len(NAME, &header, &decompressed)?;
        Ok(decompressed)
    }

    fn uncompressed_len(&self, input: &[u8]) -> Option<usize> {
        peek_frame_header(input)
            .filter(|h| h.ident == idents::LZ4)
            .map(|h| h.actual_size as usize)
    }
}
