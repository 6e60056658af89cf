//! compression/types.rs
//! Codec identifiers, the codec contract, and compression errors.
use std::fmt;
use std::io;
use std::sync::Arc;

use num_enum::TryFromPrimitive;
use serde::{Deserialize, Serialize};

use crate::compression::constants::codec_ids;
use crate::utils::{enum_name_or_hex, fmt_bytes};

/// Stable identifier of a shipped codec.
#[repr(u16)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, TryFromPrimitive, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodecId {
    Stored  = codec_ids::STORED,
    Zstd    = codec_ids::ZSTD,
    Lz4     = codec_ids::LZ4,
    Deflate = codec_ids::DEFLATE,
}

impl CodecId {
    pub fn verify(raw: u16) -> Result<Self, CompressionError> {
        CodecId::try_from_primitive(raw)
            .map_err(|_| CompressionError::UnsupportedCodec { codec_id: raw })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CompressionError {
    #[error("unsupported compression codec: {}", codec_label(.codec_id))]
    UnsupportedCodec { codec_id: u16 },

    #[error("codec {codec}: bad signature {}", fmt_bytes(.have))]
    BadSignature { codec: &'static str, have: [u8; 4] },

    #[error("codec {codec}: input truncated: {have} < {need}")]
    Truncated { codec: &'static str, have: usize, need: usize },

    #[error("codec {codec}: size mismatch: expected {expected}, got {actual}")]
    SizeMismatch { codec: &'static str, expected: usize, actual: usize },

    #[error("codec {codec}: region too large: {have} > {max}")]
    TooLarge { codec: &'static str, have: usize, max: usize },

    #[error("codec {codec} encode failed")]
    EncodeFailed {
        codec: &'static str,
        #[source]
        source: io::Error,
    },

    #[error("codec {codec} decode failed")]
    DecodeFailed {
        codec: &'static str,
        #[source]
        source: io::Error,
    },
}

fn codec_label(raw: &u16) -> String {
    enum_name_or_hex::<CodecId>(*raw)
}

/// Contract between a region and its compression algorithm.
///
/// Implementations only ever see raw byte ranges. They must be free of
/// side effects on failure; taking `&[u8]` keeps the caller's bytes intact.
pub trait CompressionCodec: Send + Sync {
    fn id(&self) -> CodecId;

    fn name(&self) -> &'static str;

    /// Signature sniff. Must not allocate or inspect beyond the header.
    fn detect(&self, bytes: &[u8]) -> bool;

    fn encode(&self, input: &[u8]) -> Result<Vec<u8>, CompressionError>;

    fn decode(&self, input: &[u8]) -> Result<Vec<u8>, CompressionError>;

    /// Uncompressed size recorded in a compressed region, if readable.
    fn uncompressed_len(&self, _input: &[u8]) -> Option<usize> {
        None
    }
}

impl fmt::Debug for dyn CompressionCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompressionCodec")
            .field("id", &self.id())
            .field("name", &self.name())
            .finish()
    }
}

/// Codecs are stateless and shared between regions.
pub type SharedCodec = Arc<dyn CompressionCodec>;
