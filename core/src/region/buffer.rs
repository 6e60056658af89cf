//! region/buffer.rs
//!
//! `RegionBuffer`: one contiguous byte range, its byte order, and its
//! compression state.
//!
//! Design notes:
//! - Storage is explicit: `Shared` (read-only view of the parent), `Aliased`
//!   (writable view of the parent), `Owned` (independent allocation).
//! - `ensure_writable` discards the content whenever it has to reallocate.
//! - Codec failures never mutate the region; the new bytes are only bound
//!   after the codec returned successfully.

use std::fmt;
use std::time::Instant;

use crate::compression::{default_codec, SharedCodec};
use crate::region::data::{StructReader, StructWriter};
use crate::region::stream::{RegionReader, RegionWriter};
use crate::region::types::{Endian, RegionState, Storage};
use crate::telemetry::{RegionCounters, Stage, StageTimes, TelemetrySnapshot};
use crate::types::{LumpError, RangeError};
use crate::utils::range_end;

pub struct RegionBuffer<'a> {
    storage: Storage<'a>,
    order: Endian,
    compressed: bool,
    codec: SharedCodec,
    counters: RegionCounters,
    stage_times: StageTimes,
}

impl fmt::Debug for RegionBuffer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegionBuffer")
            .field("state", &self.state())
            .field("aliased", &self.is_aliased())
            .field("length", &self.length())
            .field("order", &self.order)
            .field("codec", &self.codec.name())
            .finish()
    }
}

impl Default for RegionBuffer<'_> {
    fn default() -> Self {
        Self::new(default_codec())
    }
}

/// Zero-filled buffer of exactly `len` bytes, or `Allocation` if the
/// allocator refuses.
fn allocate(len: usize) -> Result<Vec<u8>, LumpError> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|_| LumpError::Allocation { requested: len })?;
    buf.resize(len, 0);
    Ok(buf)
}

impl<'a> RegionBuffer<'a> {
    /// An unbound region using `codec` for detection and transforms.
    pub fn new(codec: SharedCodec) -> Self {
        Self {
            storage: Storage::Unbound,
            order: Endian::default(),
            compressed: false,
            codec,
            counters: RegionCounters::default(),
            stage_times: StageTimes::default(),
        }
    }

    /// An owned region holding `bytes`.
    pub fn from_owned(codec: SharedCodec, bytes: Vec<u8>, order: Endian) -> Self {
        let mut region = Self::new(codec);
        region.order = order;
        region.bind_owned(bytes);
        region
    }

    // ---------------------------------------------------------------------
    // Binding
    // ---------------------------------------------------------------------

    /// Alias `parent[offset..offset + length]` read-only. No copy is made.
    pub fn bind_slice(
        &mut self,
        parent: &'a [u8],
        order: Endian,
        offset: usize,
        length: usize,
    ) -> Result<(), LumpError> {
        let end = range_end(offset, length, parent.len()).ok_or(RangeError::OutOfBounds {
            offset,
            length,
            capacity: parent.len(),
        })?;

        self.bind(Storage::Shared(&parent[offset..end]), order);
        Ok(())
    }

    /// Alias `parent[offset..offset + length]` writably. Writes land in the
    /// parent until a reallocation severs the link.
    pub fn bind_slice_mut(
        &mut self,
        parent: &'a mut [u8],
        order: Endian,
        offset: usize,
        length: usize,
    ) -> Result<(), LumpError> {
        let capacity = parent.len();
        let end = range_end(offset, length, capacity).ok_or(RangeError::OutOfBounds {
            offset,
            length,
            capacity,
        })?;

        self.bind(Storage::Aliased(&mut parent[offset..end]), order);
        Ok(())
    }

    /// Take ownership of `bytes`, keeping the current byte order. Bytes that
    /// carry this codec's frame bind as compressed.
    pub fn bind_owned(&mut self, bytes: Vec<u8>) {
        let order = self.order;
        self.bind(Storage::Owned(bytes), order);
    }

    /// Take ownership of `bytes` as raw payload. Skips signature detection,
    /// so bytes that happen to look like a codec frame stay uncompressed.
    pub fn bind_owned_raw(&mut self, bytes: Vec<u8>) {
        self.storage = Storage::Owned(bytes);
        self.compressed = false;
    }

    fn bind(&mut self, storage: Storage<'a>, order: Endian) {
        self.storage = storage;
        self.order = order;
        self.compressed = self.codec.detect(self.storage.bytes());
    }

    // ---------------------------------------------------------------------
    // Accessors
    // ---------------------------------------------------------------------

    pub fn state(&self) -> RegionState {
        match self.storage {
            Storage::Unbound => RegionState::Unbound,
            _ => RegionState::Bound {
                writable: self.is_writable(),
                compressed: self.compressed,
            },
        }
    }

    /// Size of the bytes currently stored. When compressed this is the
    /// compressed size; see `uncompressed_length`.
    pub fn length(&self) -> usize {
        self.storage.bytes().len()
    }

    /// Payload size once uncompressed. Read from the codec frame when the
    /// region is compressed; `None` if the frame cannot be read.
    pub fn uncompressed_length(&self) -> Option<usize> {
        if self.compressed {
            self.codec.uncompressed_len(self.storage.bytes())
        } else {
            Some(self.length())
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.storage.bytes()
    }

    pub fn order(&self) -> Endian {
        self.order
    }

    pub fn set_order(&mut self, order: Endian) {
        self.order = order;
    }

    pub fn is_writable(&self) -> bool {
        self.storage.is_writable()
    }

    /// True while the bytes still live in the parent container.
    pub fn is_aliased(&self) -> bool {
        self.storage.is_aliased()
    }

    pub fn is_compressed(&self) -> bool {
        self.compressed
    }

    pub fn codec(&self) -> &SharedCodec {
        &self.codec
    }

    pub fn counters(&self) -> &RegionCounters {
        &self.counters
    }

    pub fn telemetry(&self) -> TelemetrySnapshot {
        TelemetrySnapshot::from(&self.counters, &self.stage_times)
    }

    // ---------------------------------------------------------------------
    // Stream adapters
    // ---------------------------------------------------------------------

    pub fn read(&self) -> RegionReader<'_> {
        RegionReader::new(self.storage.bytes(), self.order)
    }

    /// Writer over a region of `capacity` bytes (current length if `None`).
    /// May reallocate; see `ensure_writable`.
    pub fn write(&mut self, capacity: Option<usize>) -> Result<RegionWriter<'_>, LumpError> {
        let capacity = capacity.unwrap_or_else(|| self.length());
        self.ensure_writable(capacity)?;
        let order = self.order;
        let bytes = self
            .storage
            .bytes_mut()
            .expect("ensure_writable leaves writable storage");
        Ok(RegionWriter::new(bytes, order))
    }

    pub fn structured_read(&self) -> StructReader<'_> {
        self.structured_read_versioned(0)
    }

    pub fn structured_write(&mut self, capacity: Option<usize>) -> Result<StructWriter<'_>, LumpError> {
        self.structured_write_versioned(capacity, 0)
    }

    pub(crate) fn structured_read_versioned(&self, version: i32) -> StructReader<'_> {
        StructReader::new(self.read(), version)
    }

    pub(crate) fn structured_write_versioned(
        &mut self,
        capacity: Option<usize>,
        version: i32,
    ) -> Result<StructWriter<'_>, LumpError> {
        Ok(StructWriter::new(self.write(capacity)?, version))
    }

    // ---------------------------------------------------------------------
    // Lifecycle transitions
    // ---------------------------------------------------------------------

    /// Reuse the storage if it is writable and exactly `capacity` bytes long.
    /// Otherwise replace it with a zero-filled owned allocation of `capacity`
    /// bytes: prior content is discarded, the region is no longer compressed,
    /// and any link to the parent is severed.
    pub fn ensure_writable(&mut self, capacity: usize) -> Result<(), LumpError> {
        if self.storage.is_writable() && self.length() == capacity {
            return Ok(());
        }

        let start = Instant::now();
        let fresh = allocate(capacity)?;
        self.storage = Storage::Owned(fresh);
        self.compressed = false;

        self.counters.add_reallocation();
        self.stage_times.add(Stage::Reallocate, start.elapsed());
        Ok(())
    }

    /// Replace the stored bytes with their codec encoding. No-op when
    /// already compressed; on failure nothing changes.
    pub fn compress(&mut self) -> Result<(), LumpError> {
        if self.compressed {
            return Ok(());
        }

        let codec = self.codec.clone();
        let raw_len = self.length();
        let encoded = self
            .stage_times
            .time(Stage::Compress, || codec.encode(self.storage.bytes()));

        match encoded {
            Ok(encoded) => {
                self.counters.add_compress(raw_len, encoded.len());
                self.bind_owned(encoded);
                self.compressed = true;
                Ok(())
            }
            Err(e) => {
                self.counters.add_codec_failure();
                Err(e.into())
            }
        }
    }

    /// Replace the stored bytes with their decoded payload. No-op when not
    /// compressed; on failure nothing changes.
    pub fn uncompress(&mut self) -> Result<(), LumpError> {
        if !self.compressed {
            return Ok(());
        }

        let codec = self.codec.clone();
        let stored_len = self.length();
        let decoded = self
            .stage_times
            .time(Stage::Decompress, || codec.decode(self.storage.bytes()));

        match decoded {
            Ok(decoded) => {
                self.counters.add_decompress(stored_len, decoded.len());
                self.bind_owned_raw(decoded);
                Ok(())
            }
            Err(e) => {
                self.counters.add_codec_failure();
                Err(e.into())
            }
        }
    }

    /// Copy the bytes into an owned region, detaching it from the parent.
    /// Unlike `ensure_writable`, content and compression state survive.
    pub fn into_owned(self) -> RegionBuffer<'static> {
        let storage = match self.storage {
            Storage::Unbound => Storage::Unbound,
            Storage::Owned(v) => Storage::Owned(v),
            Storage::Shared(b) => Storage::Owned(b.to_vec()),
            Storage::Aliased(b) => Storage::Owned(b.to_vec()),
        };
        RegionBuffer {
            storage,
            order: self.order,
            compressed: self.compressed,
            codec: self.codec,
            counters: self.counters,
            stage_times: self.stage_times,
        }
    }
}
