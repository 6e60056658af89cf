//! compression/frame.rs
//!
//! Signature frame shared by every shipped codec.
//!
//! Layout (little-endian, 12 bytes), followed by the codec payload:
//! - 0..4   ident
//! - 4..8   actual_size      (uncompressed bytes)
//! - 8..12  compressed_size  (payload bytes after the header)

use std::io::{Cursor, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::compression::constants::{FRAME_HEADER_LEN, MAX_DECODED_SIZE};
use crate::compression::types::CompressionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    pub ident: [u8; 4],
    pub actual_size: u32,
    pub compressed_size: u32,
}

impl FrameHeader {
    pub const LEN: usize = FRAME_HEADER_LEN;
}

/// Read the header without validating it against any codec.
/// Returns `None` if fewer than `FrameHeader::LEN` bytes are present.
pub fn peek_frame_header(input: &[u8]) -> Option<FrameHeader> {
    if input.len() < FrameHeader::LEN {
        return None;
    }
    let mut ident = [0u8; 4];
    ident.copy_from_slice(&input[0..4]);

    let mut rdr = Cursor::new(&input[4..FrameHeader::LEN]);
    let actual_size = rdr.read_u32::<LittleEndian>().ok()?;
    let compressed_size = rdr.read_u32::<LittleEndian>().ok()?;

    Some(FrameHeader { ident, actual_size, compressed_size })
}

/// True iff `input` starts with `ident` and the declared payload length
/// matches the bytes that follow the header.
pub fn has_signature(ident: [u8; 4], input: &[u8]) -> bool {
    match peek_frame_header(input) {
        Some(h) => {
            h.ident == ident && h.compressed_size as usize == input.len() - FrameHeader::LEN
        }
        None => false,
    }
}

/// Prefix `payload` with a frame header.
pub fn encode_frame(
    codec: &'static str,
    ident: [u8; 4],
    actual_size: usize,
    payload: &[u8],
) -> Result<Vec<u8>, CompressionError> {
    let actual = u32::try_from(actual_size).map_err(|_| CompressionError::TooLarge {
        codec,
        have: actual_size,
        max: u32::MAX as usize,
    })?;
    let compressed = u32::try_from(payload.len()).map_err(|_| CompressionError::TooLarge {
        codec,
        have: payload.len(),
        max: u32::MAX as usize,
    })?;

    let mut out = Vec::with_capacity(FrameHeader::LEN + payload.len());
    let io_err = |source| CompressionError::EncodeFailed { codec, source };
    out.write_all(&ident).map_err(io_err)?;
    out.write_u32::<LittleEndian>(actual).map_err(io_err)?;
    out.write_u32::<LittleEndian>(compressed).map_err(io_err)?;
    out.write_all(payload).map_err(io_err)?;

    debug_assert_eq!(out.len(), FrameHeader::LEN + payload.len());
    Ok(out)
}

/// Validate a frame for `ident` and return its header and payload.
pub fn split_frame<'a>(
    codec: &'static str,
    ident: [u8; 4],
    input: &'a [u8],
) -> Result<(FrameHeader, &'a [u8]), CompressionError> {
    let header = peek_frame_header(input).ok_or(CompressionError::Truncated {
        codec,
        have: input.len(),
        need: FrameHeader::LEN,
    })?;

    if header.ident != ident {
        return Err(CompressionError::BadSignature { codec, have: header.ident });
    }

    let payload = &input[FrameHeader::LEN..];
    if header.compressed_size as usize != payload.len() {
        return Err(CompressionError::SizeMismatch {
            codec,
            expected: header.compressed_size as usize,
            actual: payload.len(),
        });
    }

    if header.actual_size as usize > MAX_DECODED_SIZE {
        return Err(CompressionError::TooLarge {
            codec,
            have: header.actual_size as usize,
            max: MAX_DECODED_SIZE,
        });
    }

    Ok((header, payload))
}

/// Reject decoder output whose length disagrees with the header.
pub fn check_decoded_len(
    codec: &'static str,
    header: &FrameHeader,
    decoded: &[u8],
) -> Result<(), CompressionError> {
    if decoded.len() != header.actual_size as usize {
        return Err(CompressionError::SizeMismatch {
            codec,
            expected: header.actual_size as usize,
            actual: decoded.len(),
        });
    }
    Ok(())
}
