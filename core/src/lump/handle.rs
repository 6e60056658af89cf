//! lump/handle.rs
//!
//! `LumpHandle`: a region plus the directory metadata describing it.
//!
//! Design notes:
//! - Metadata fields are plain and public; the handle never interprets them,
//!   except that `version` is forwarded to structured adapters.
//! - Every buffer operation delegates to the owned `RegionBuffer`.
//! - No `PartialEq`: two handles are never the same lump by value.

use std::fmt;

use crate::compression::SharedCodec;
use crate::constants::DEFAULT_LUMP_VERSION;
use crate::lump::types::{DirectoryEntry, FourCC};
use crate::region::{Endian, RegionBuffer, RegionReader, RegionState, RegionWriter, StructReader, StructWriter};
use crate::telemetry::{RegionCounters, TelemetrySnapshot};
use crate::types::LumpError;

#[derive(Debug)]
pub struct LumpHandle<'a> {
    pub name: String,
    /// Byte offset inside the parent container. Informational only.
    pub offset: usize,
    pub version: i32,
    pub four_cc: FourCC,
    region: RegionBuffer<'a>,
}

impl<'a> LumpHandle<'a> {
    /// Unbound lump with default metadata.
    pub fn new(name: impl Into<String>, codec: SharedCodec) -> Self {
        Self::with_region(name, RegionBuffer::new(codec))
    }

    pub fn with_region(name: impl Into<String>, region: RegionBuffer<'a>) -> Self {
        Self {
            name: name.into(),
            offset: 0,
            version: DEFAULT_LUMP_VERSION,
            four_cc: FourCC::default(),
            region,
        }
    }

    /// Unbound lump carrying the metadata of `entry`; offset is recorded once
    /// the region is bound.
    pub(crate) fn from_entry(entry: &DirectoryEntry, codec: SharedCodec) -> Self {
        let mut lump = Self::new(entry.name.clone(), codec);
        lump.version = entry.version;
        lump.four_cc = entry.four_cc;
        lump
    }

    pub fn region(&self) -> &RegionBuffer<'a> {
        &self.region
    }

    pub fn region_mut(&mut self) -> &mut RegionBuffer<'a> {
        &mut self.region
    }

    pub fn into_region(self) -> RegionBuffer<'a> {
        self.region
    }

    // ---------------------------------------------------------------------
    // Binding
    // ---------------------------------------------------------------------

    /// Bind a read-only view of `parent` and record `offset`.
    pub fn bind_slice(
        &mut self,
        parent: &'a [u8],
        order: Endian,
        offset: usize,
        length: usize,
    ) -> Result<(), LumpError> {
        self.region.bind_slice(parent, order, offset, length)?;
        self.offset = offset;
        Ok(())
    }

    /// Bind a writable view of `parent` and record `offset`.
    pub fn bind_slice_mut(
        &mut self,
        parent: &'a mut [u8],
        order: Endian,
        offset: usize,
        length: usize,
    ) -> Result<(), LumpError> {
        self.region.bind_slice_mut(parent, order, offset, length)?;
        self.offset = offset;
        Ok(())
    }

    pub fn bind_owned(&mut self, bytes: Vec<u8>) {
        self.region.bind_owned(bytes);
    }

    pub fn bind_owned_raw(&mut self, bytes: Vec<u8>) {
        self.region.bind_owned_raw(bytes);
    }

    // ---------------------------------------------------------------------
    // Delegation
    // ---------------------------------------------------------------------

    pub fn state(&self) -> RegionState {
        self.region.state()
    }

    pub fn length(&self) -> usize {
        self.region.length()
    }

    pub fn uncompressed_length(&self) -> Option<usize> {
        self.region.uncompressed_length()
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.region.as_bytes()
    }

    pub fn order(&self) -> Endian {
        self.region.order()
    }

    pub fn is_writable(&self) -> bool {
        self.region.is_writable()
    }

    pub fn is_aliased(&self) -> bool {
        self.region.is_aliased()
    }

    pub fn is_compressed(&self) -> bool {
        self.region.is_compressed()
    }

    pub fn read(&self) -> RegionReader<'_> {
        self.region.read()
    }

    pub fn write(&mut self, capacity: Option<usize>) -> Result<RegionWriter<'_>, LumpError> {
        self.region.write(capacity)
    }

    /// Typed reader tagged with this lump's version.
    pub fn structured_read(&self) -> StructReader<'_> {
        self.region.structured_read_versioned(self.version)
    }

    /// Typed writer tagged with this lump's version.
    pub fn structured_write(&mut self, capacity: Option<usize>) -> Result<StructWriter<'_>, LumpError> {
        self.region.structured_write_versioned(capacity, self.version)
    }

    pub fn ensure_writable(&mut self, capacity: usize) -> Result<(), LumpError> {
        self.region.ensure_writable(capacity)
    }

    pub fn compress(&mut self) -> Result<(), LumpError> {
        self.region.compress()
    }

    pub fn uncompress(&mut self) -> Result<(), LumpError> {
        self.region.uncompress()
    }

    pub fn counters(&self) -> &RegionCounters {
        self.region.counters()
    }

    pub fn telemetry(&self) -> TelemetrySnapshot {
        self.region.telemetry()
    }

    /// Detach from the parent container, keeping metadata and content.
    pub fn into_owned(self) -> LumpHandle<'static> {
        LumpHandle {
            name: self.name,
            offset: self.offset,
            version: self.version,
            four_cc: self.four_cc,
            region: self.region.into_owned(),
        }
    }
}

impl fmt::Display for LumpHandle<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
