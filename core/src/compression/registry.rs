//! compression/registry.rs
//! Codec registry and factory functions.

use std::sync::Arc;

use crate::compression::codecs::{DeflateCodec, Lz4Codec, StoredCodec, ZstdCodec};
use crate::compression::constants::{
    codec_ids, idents, DEFAULT_LEVEL_DEFLATE, DEFAULT_LEVEL_LZ4, DEFAULT_LEVEL_ZSTD,
};
use crate::compression::frame::peek_frame_header;
use crate::compression::types::{CodecId, CompressionError, SharedCodec};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecInfo {
    pub id: CodecId,
    pub name: &'static str,
    pub ident: [u8; 4],
    pub default_level: i32,
}

pub fn resolve(codec_id: u16) -> Result<CodecInfo, CompressionError> {
    match codec_id {
        x if x == codec_ids::STORED => Ok(CodecInfo {
            id: CodecId::Stored,
            name: "stored",
            ident: idents::STORED,
            default_level: 0,
        }),
        x if x == codec_ids::ZSTD => Ok(CodecInfo {
            id: CodecId::Zstd,
            name: "zstd",
            ident: idents::ZSTD,
            default_level: DEFAULT_LEVEL_ZSTD,
        }),
        x if x == codec_ids::LZ4 => Ok(CodecInfo {
            id: CodecId::Lz4,
            name: "lz4",
            ident: idents::LZ4,
            default_level: DEFAULT_LEVEL_LZ4,
        }),
        x if x == codec_ids::DEFLATE => Ok(CodecInfo {
            id: CodecId::Deflate,
            name: "deflate",
            ident: idents::DEFLATE,
            default_level: DEFAULT_LEVEL_DEFLATE,
        }),
        other => Err(CompressionError::UnsupportedCodec { codec_id: other }),
    }
}

pub fn create_codec(codec_id: u16, level: Option<i32>) -> Result<SharedCodec, CompressionError> {
    let info = resolve(codec_id)?;
    let level = level.unwrap_or(info.default_level);
    let codec: SharedCodec = match info.id {
        CodecId::Stored => Arc::new(StoredCodec::new()),
        CodecId::Zstd => Arc::new(ZstdCodec::new(level)),
        CodecId::Lz4 => Arc::new(Lz4Codec::new()),
        CodecId::Deflate => Arc::new(DeflateCodec::new(level)),
    };
    Ok(codec)
}

/// Zstd at its default level.
pub fn default_codec() -> SharedCodec {
    Arc::new(ZstdCodec::default())
}

/// Identify which shipped codec framed `bytes`, if any.
pub fn sniff(bytes: &[u8]) -> Option<CodecId> {
    let header = peek_frame_header(bytes)?;
    [CodecId::Stored, CodecId::Zstd, CodecId::Lz4, CodecId::Deflate]
        .into_iter()
        .filter_map(|id| resolve(id as u16).ok())
        .find(|info| info.ident == header.ident)
        .map(|info| info.id)
}
