//! codecs/zstd.rs
//!
//! Zstd block codec.
//!
//! Design notes:
//! - Uses the bulk API (`zstd::bulk`): every region is one standalone block.
//! - The frame header records the uncompressed size, which doubles as the
//!   decoder's output capacity.
//! - Errors are mapped into `CompressionError` variants with codec context.

use crate::compression::constants::{idents, DEFAULT_LEVEL_ZSTD};
use crate::compression::frame::{check_decoded_len, encode_frame, has_signature, peek_frame_header, split_frame};
use crate::compression::types::{CodecId, CompressionCodec, CompressionError};

const NAME: &str = "zstd";

#[derive(Debug, Clone, Copy)]
pub struct ZstdCodec {
    level: i32,
}

impl ZstdCodec {
    /// Levels outside zstd's supported range are clamped by the library.
    pub fn new(level: i32) -> Self {
        Self { level }
    }

    pub fn level(&self) -> i32 {
        self.level
    }
}

impl Default for ZstdCodec {
    fn default() -> Self {
        Self::new(DEFAULT_LEVEL_ZSTD)
    }
}

impl CompressionCodec for ZstdCodec {
    fn id(&self) -> CodecId {
        CodecId::Zstd
    }

    fn name(&self) -> &'static str {
        NAME
    }

    fn detect(&self, bytes: &[u8]) -> bool {
        has_signature(idents::ZSTD, bytes)
    }

    fn encode(&self, input: &[u8]) -> Result<Vec<u8>, CompressionError> {
        let compressed = zstd::bulk::compress(input, self.level)
            .map_err(|source| CompressionError::EncodeFailed { codec: NAME, source })?;
        encode_frame(NAME, idents::ZSTD, input.len(), &compressed)
    }

    fn decode(&self, input: &[u8]) -> Result<Vec<u8>, CompressionError> {
        let (header, payload) = split_frame(NAME, idents::ZSTD, input)?;

        let decompressed = zstd::bulk::decompress(payload, header.actual_size as usize)
            .map_err(|source| CompressionError::DecodeFailed { codec: NAME, source })?;

        check_decoded_len(NAME, &header, &decompressed)?;
        Ok(decompressed)
    }

    fn uncompressed_len(&self, input: &[u8]) -> Option<usize> {
        peek_frame_header(input)
            .filter(|h| h.ident == idents::ZSTD)
            .map(|h| h.actual_size as usize)
    }
}
