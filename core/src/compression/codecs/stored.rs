//! codecs/stored.rs
//! Pass-through codec: framed but not compressed.

use crate::compression::constants::idents;
use crate::compression::frame::{check_decoded_len, encode_frame, has_signature, peek_frame_header, split_frame};
use crate::compression::types::{CodecId, CompressionCodec, CompressionError};

const NAME: &str = "stored";

#[derive(Debug, Default, Clone, Copy)]
pub struct StoredCodec;

impl StoredCodec {
    pub fn new() -> Self {
        Self
    }
}

impl CompressionCodec for StoredCodec {
    fn id(&self) -> CodecId {
        CodecId::Stored
    }

    fn name(&self) -> &'static str {
        NAME
    }

    fn detect(&self, bytes: &[u8]) -> bool {
        has_signature(idents::STORED, bytes)
    }

    fn encode(&self, input: &[u8]) -> Result<Vec<u8>, CompressionError> {
        encode_frame(NAME, idents::STORED, input.len(), input)
    }

    fn decode(&self, input: &[u8]) -> Result<Vec<u8>, CompressionError> {
        let (header, payload) = split_frame(NAME, idents::STORED, input)?;
        check_decoded_len(NAME, &header, payload)?;
        Ok(payload.to_vec())
    }

    fn uncompressed_len(&self, input: &[u8]) -> Option<usize> {
        peek_frame_header(input)
            .filter(|h| h.ident == idents::STORED)
            .map(|h| h.actual_size as usize)
    }
}
