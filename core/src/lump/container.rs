//! lump/container.rs
//!
//! Turns a parent byte range plus directory entries into lump handles.
//!
//! Design notes:
//! - `ContainerBuffer` hands out read-only views; any number may coexist.
//! - `ContainerBufferMut` consumes the parent borrow and carves it into
//!   disjoint writable views with `split_at_mut`. Overlapping entries are
//!   rejected before anything is bound.
//! - Zero-length entries never overlap anything; they bind an empty view.

use crate::compression::SharedCodec;
use crate::lump::handle::LumpHandle;
use crate::lump::types::DirectoryEntry;
use crate::region::{Endian, RegionBuffer};
use crate::types::{LumpError, RangeError};

/// Read-only parent container.
#[derive(Debug, Clone)]
pub struct ContainerBuffer<'a> {
    bytes: &'a [u8],
    order: Endian,
    codec: SharedCodec,
}

impl<'a> ContainerBuffer<'a> {
    pub fn new(bytes: &'a [u8], order: Endian, codec: SharedCodec) -> Self {
        Self { bytes, order, codec }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn order(&self) -> Endian {
        self.order
    }

    /// Bare region over `[offset, offset + length)`.
    pub fn region(&self, offset: usize, length: usize) -> Result<RegionBuffer<'a>, LumpError> {
        let mut region = RegionBuffer::new(self.codec.clone());
        region.bind_slice(self.bytes, self.order, offset, length)?;
        Ok(region)
    }

    pub fn lump(&self, entry: &DirectoryEntry) -> Result<LumpHandle<'a>, LumpError> {
        let (offset, length) = entry.checked_range(self.bytes.len())?;
        let mut lump = LumpHandle::from_entry(entry, self.codec.clone());
        lump.bind_slice(self.bytes, self.order, offset, length)?;
        Ok(lump)
    }

    /// One handle per entry, in entry order. Fails on the first bad entry.
    pub fn lumps(&self, entries: &[DirectoryEntry]) -> Result<Vec<LumpHandle<'a>>, LumpError> {
        entries.iter().map(|e| self.lump(e)).collect()
    }
}

/// Writable parent container.
#[derive(Debug)]
pub struct ContainerBufferMut<'a> {
    bytes: &'a mut [u8],
    order: Endian,
    codec: SharedCodec,
}

impl<'a> ContainerBufferMut<'a> {
    pub fn new(bytes: &'a mut [u8], order: Endian, codec: SharedCodec) -> Self {
        Self { bytes, order, codec }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Writable view of a single entry, borrowing the container.
    pub fn lump_mut(&mut self, entry: &DirectoryEntry) -> Result<LumpHandle<'_>, LumpError> {
        let (offset, length) = entry.checked_range(self.bytes.len())?;
        let mut lump = LumpHandle::from_entry(entry, self.codec.clone());
        lump.bind_slice_mut(&mut *self.bytes, self.order, offset, length)?;
        Ok(lump)
    }

    /// Writable handles for all entries, returned in entry order.
    ///
    /// Every entry is validated first; on error no handle is created.
    pub fn into_lumps(self, entries: &[DirectoryEntry]) -> Result<Vec<LumpHandle<'a>>, LumpError> {
        let capacity = self.bytes.len();
        let ranges = entries
            .iter()
            .map(|e| e.checked_range(capacity))
            .collect::<Result<Vec<_>, _>>()?;

        let mut order: Vec<usize> = (0..entries.len()).collect();
        order.sort_by_key(|&i| ranges[i]);

        let mut previous_end = 0usize;
        for &i in &order {
            let (offset, length) = ranges[i];
            if length == 0 {
                continue;
            }
            if offset < previous_end {
                return Err(RangeError::Overlap { offset, previous_end }.into());
            }
            previous_end = offset + length;
        }

        let mut slots: Vec<Option<LumpHandle<'a>>> = entries.iter().map(|_| None).collect();
        let mut rest: &'a mut [u8] = self.bytes;
        let mut cursor = 0usize;

        for &i in &order {
            let (offset, length) = ranges[i];
            let mut lump = LumpHandle::from_entry(&entries[i], self.codec.clone());

            let piece: &'a mut [u8] = if length == 0 {
                &mut []
            } else {
                let (_, tail) = std::mem::take(&mut rest).split_at_mut(offset - cursor);
                let (piece, tail) = tail.split_at_mut(length);
                rest = tail;
                cursor = offset + length;
                piece
            };

            lump.region_mut().bind_slice_mut(piece, self.order, 0, length)?;
            lump.offset = offset;
            slots[i] = Some(lump);
        }

        Ok(slots.into_iter().flatten().collect())
    }
}
