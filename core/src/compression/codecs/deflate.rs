//! Deflate (zlib wrapper) via flate2.

use std::io::Read;
use std::io::Write;
use flate2::{Compression, write::ZlibEncoder, read::ZlibDecoder};

use crate::compression::constants::{idents, DEFAULT_LEVEL_DEFLATE};
use crate::compression::frame::{check_decoded_len, encode_frame, has_signature, peek_frame_header, split_frame};
use crate::compression::types::{CodecId, CompressionCodec, CompressionError};

const NAME: &str = "deflate";

#[derive(Debug, Clone, Copy)]
pub struct DeflateCodec {
    level: Compression,
}

impl DeflateCodec {
    pub fn new(level: i32) -> Self {
        let level = match level {
            0..=9 => Compression::new(level as u32),
            _ => Compression::default(),
        };
        Self { level }
    }
}

impl Default for DeflateCodec {
    fn default() -> Self {
        Self::new(DEFAULT_LEVEL_DEFLATE)
    }
}

impl CompressionCodec for DeflateCodec {
    fn id(&self) -> CodecId {
        CodecId::Deflate
    }

    fn name(&self) -> &'static str {
        NAME
    }

    fn detect(&self, bytes: &[u8]) -> bool {
        has_signature(idents::DEFLATE, bytes)
    }

    fn encode(&self, input: &[u8]) -> Result<Vec<u8>, CompressionError> {
        let mut enc = ZlibEncoder::new(Vec::new(), self.level);
        enc.write_all(input)
            .map_err(|source| CompressionError::EncodeFailed { codec: NAME, source })?;
        let compressed = enc.finish()
            .map_err(|source| CompressionError::EncodeFailed { codec: NAME, source })?;

        encode_frame(NAME, idents::DEFLATE, input.len(), &compressed)
    }

    fn decode(&self, input: &[u8]) -> Result<Vec<u8>, CompressionError> {
        let (header, payload) = split_frame(NAME, idents::DEFLATE, input)?;

        // Never read past the declared size, even if the stream claims more.
        let mut dec = ZlibDecoder::new(payload).take(header.actual_size as u64 + 1);
        let mut decompressed = Vec::with_capacity(header.actual_size as usize);
        dec.read_to_end(&mut decompressed)
            .map_err(|source| CompressionError::DecodeFailed { codec: NAME, source })?;

        check_decoded_len(NAME, &header, &decompressed)?;
        Ok(decompressed)
    }

    fn uncompressed_len(&self, input: &[u8]) -> Option<usize> {
        peek_frame_header(input)
            .filter(|h| h.ident == idents::DEFLATE)
            .map(|h| h.actual_size as usize)
    }
}
