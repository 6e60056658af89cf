//! region/stream.rs
//!
//! Sequential byte-stream views over a region's current bytes.
//!
//! Design notes:
//! - Both views start at position 0 and carry their own cursor.
//! - Readers borrow the region shared, writers borrow it exclusively, so a
//!   reallocating write can never overlap an outstanding reader.
//! - The writer never grows the region: writing past the capacity fails
//!   with `ErrorKind::WriteZero` (via `write_all`).

use std::io::{self, BufRead, Cursor, Read, Seek, SeekFrom, Write};

use crate::region::types::Endian;

/// Cursor positions beyond `usize` saturate; they are past any region's end.
fn cursor_index(pos: u64) -> usize {
    usize::try_from(pos).unwrap_or(usize::MAX)
}

/// Forward reader over a region.
#[derive(Debug, Clone)]
pub struct RegionReader<'r> {
    inner: Cursor<&'r [u8]>,
    order: Endian,
}

impl<'r> RegionReader<'r> {
    pub(crate) fn new(bytes: &'r [u8], order: Endian) -> Self {
        Self { inner: Cursor::new(bytes), order }
    }

    pub fn order(&self) -> Endian {
        self.order
    }

    pub fn position(&self) -> u64 {
        self.inner.position()
    }

    pub fn len(&self) -> usize {
        self.inner.get_ref().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bytes left between the cursor and the end of the region.
    pub fn remaining(&self) -> usize {
        self.len().saturating_sub(cursor_index(self.inner.position()))
    }

    /// Borrow the unread tail without advancing.
    pub fn remaining_slice(&self) -> &'r [u8] {
        let bytes: &'r [u8] = *self.inner.get_ref();
        let pos = cursor_index(self.inner.position()).min(bytes.len());
        &bytes[pos..]
    }
}

impl Read for RegionReader<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }

    fn read_exact(&mut self, buf: &mut [u8]) -> io::Result<()> {
        self.inner.read_exact(buf)
    }
}

impl BufRead for RegionReader<'_> {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        self.inner.fill_buf()
    }

    fn consume(&mut self, amt: usize) {
        self.inner.consume(amt)
    }
}

impl Seek for RegionReader<'_> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.inner.seek(pos)
    }
}

/// Fixed-capacity writer over a writable region.
#[derive(Debug)]
pub struct RegionWriter<'r> {
    inner: Cursor<&'r mut [u8]>,
    order: Endian,
}

impl<'r> RegionWriter<'r> {
    pub(crate) fn new(bytes: &'r mut [u8], order: Endian) -> Self {
        Self { inner: Cursor::new(bytes), order }
    }

    pub fn order(&self) -> Endian {
        self.order
    }

    pub fn position(&self) -> u64 {
        self.inner.position()
    }

    pub fn capacity(&self) -> usize {
        self.inner.get_ref().len()
    }

    pub fn remaining(&self) -> usize {
        self.capacity().saturating_sub(cursor_index(self.inner.position()))
    }
}

impl Write for RegionWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Seek for RegionWriter<'_> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.inner.seek(pos)
    }
}
