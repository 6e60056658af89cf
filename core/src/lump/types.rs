//! lump/types.rs
//! Lump metadata handed over by the directory reader.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::RangeError;
use crate::utils::{fmt_bytes, range_end};

/// Four-character type tag, stored as the little-endian `u32` the directory
/// carries. Opaque to this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct FourCC(pub u32);

impl FourCC {
    pub const fn from_bytes(b: [u8; 4]) -> Self {
        FourCC(u32::from_le_bytes(b))
    }

    pub const fn to_bytes(self) -> [u8; 4] {
        self.0.to_le_bytes()
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for FourCC {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&fmt_bytes(&self.to_bytes()))
    }
}

impl From<u32> for FourCC {
    fn from(raw: u32) -> Self {
        FourCC(raw)
    }
}

impl From<[u8; 4]> for FourCC {
    fn from(b: [u8; 4]) -> Self {
        FourCC::from_bytes(b)
    }
}

impl From<FourCC> for u32 {
    fn from(tag: FourCC) -> Self {
        tag.0
    }
}

/// One directory record. Offsets and lengths stay signed as they were read;
/// `checked_range` is the only way to turn them into slice bounds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryEntry {
    pub name: String,
    pub offset: i64,
    pub length: i64,
    pub version: i32,
    pub four_cc: FourCC,
}

impl DirectoryEntry {
    pub fn new(name: impl Into<String>, offset: i64, length: i64) -> Self {
        Self {
            name: name.into(),
            offset,
            length,
            version: crate::constants::DEFAULT_LUMP_VERSION,
            four_cc: FourCC::default(),
        }
    }

    pub fn with_version(mut self, version: i32) -> Self {
        self.version = version;
        self
    }

    pub fn with_four_cc(mut self, four_cc: impl Into<FourCC>) -> Self {
        self.four_cc = four_cc.into();
        self
    }

    /// `(offset, length)` as slice bounds inside a parent of `capacity` bytes.
    pub fn checked_range(&self, capacity: usize) -> Result<(usize, usize), RangeError> {
        let offset = non_negative("offset", self.offset)?;
        let length = non_negative("length", self.length)?;

        range_end(offset, length, capacity)
            .map(|_| (offset, length))
            .ok_or(RangeError::OutOfBounds { offset, length, capacity })
    }
}

/// Negative values are rejected; values beyond `usize` saturate so the bounds
/// check reports them as out of range.
fn non_negative(field: &'static str, value: i64) -> Result<usize, RangeError> {
    if value < 0 {
        return Err(RangeError::Negative { field, value });
    }
    Ok(usize::try_from(value).unwrap_or(usize::MAX))
}
