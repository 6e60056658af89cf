//! region/data.rs
//!
//! Structured (typed field) views over a region.
//!
//! Design notes:
//! - Thin layers over `RegionReader` / `RegionWriter`; they share the exact
//!   same cursor, so mixing typed and raw access is well defined.
//! - Multi-byte fields follow the region's byte order.
//! - Length-prefixed strings use a `u32` prefix in region byte order followed
//!   by UTF-8 bytes. Fixed-width strings are NUL-padded.
//! - `version` is the owning lump's format version (0 for bare regions), so
//!   payload decoders can branch on it.

use std::io::{self, Read, Seek, SeekFrom, Write};

use byteorder::{BigEndian, LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::constants::MAX_PREFIXED_STRING_LEN;
use crate::region::stream::{RegionReader, RegionWriter};
use crate::region::types::Endian;

macro_rules! ordered_read {
    ($(#[$doc:meta])* $name:ident, $ty:ty) => {
        $(#[$doc])*
        pub fn $name(&mut self) -> io::Result<$ty> {
            match self.inner.order() {
                Endian::Little => self.inner.$name::<LittleEndian>(),
                Endian::Big => self.inner.$name::<BigEndian>(),
            }
        }
    };
}

macro_rules! ordered_write {
    ($name:ident, $ty:ty) => {
        pub fn $name(&mut self, v: $ty) -> io::Result<()> {
            match self.inner.order() {
                Endian::Little => self.inner.$name::<LittleEndian>(v),
                Endian::Big => self.inner.$name::<BigEndian>(v),
            }
        }
    };
}

fn invalid_data(msg: String) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, msg)
}

/// Typed reader over a region.
#[derive(Debug, Clone)]
pub struct StructReader<'r> {
    inner: RegionReader<'r>,
    version: i32,
}

impl<'r> StructReader<'r> {
    pub fn new(inner: RegionReader<'r>, version: i32) -> Self {
        Self { inner, version }
    }

    pub fn version(&self) -> i32 {
        self.version
    }

    pub fn order(&self) -> Endian {
        self.inner.order()
    }

    pub fn position(&self) -> u64 {
        self.inner.position()
    }

    pub fn remaining(&self) -> usize {
        self.inner.remaining()
    }

    pub fn has_remaining(&self) -> bool {
        self.inner.remaining() > 0
    }

    pub fn into_inner(self) -> RegionReader<'r> {
        self.inner
    }

    pub fn seek_to(&mut self, pos: u64) -> io::Result<()> {
        self.inner.seek(SeekFrom::Start(pos)).map(|_| ())
    }

    /// Advance `n` bytes; fails without moving if that passes the end.
    pub fn skip(&mut self, n: usize) -> io::Result<()> {
        if n > self.inner.remaining() {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("skip {} past end ({} remaining)", n, self.inner.remaining()),
            ));
        }
        self.inner.seek(SeekFrom::Current(n as i64)).map(|_| ())
    }

    pub fn read_u8(&mut self) -> io::Result<u8> {
        self.inner.read_u8()
    }

    pub fn read_i8(&mut self) -> io::Result<i8> {
        self.inner.read_i8()
    }

    pub fn read_bool(&mut self) -> io::Result<bool> {
        Ok(self.inner.read_u8()? != 0)
    }

    ordered_read!(read_u16, u16);
    ordered_read!(read_i16, i16);
    ordered_read!(read_u32, u32);
    ordered_read!(read_i32, i32);
    ordered_read!(read_u64, u64);
    ordered_read!(read_i64, i64);
    ordered_read!(
        /// IEEE-754 single precision.
        read_f32, f32
    );
    ordered_read!(read_f64, f64);

    /// Read exactly `n` raw bytes.
    pub fn read_bytes(&mut self, n: usize) -> io::Result<Vec<u8>> {
        // Check before allocating; `n` often comes from the payload itself.
        if n > self.inner.remaining() {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("need {} bytes, {} remaining", n, self.inner.remaining()),
            ));
        }
        let mut buf = vec![0u8; n];
        self.inner.read_exact(&mut buf)?;
        Ok(buf)
    }

    /// Read a `width`-byte NUL-padded string; text stops at the first NUL.
    pub fn read_fixed_string(&mut self, width: usize) -> io::Result<String> {
        let raw = self.read_bytes(width)?;
        let end = raw.iter().position(|&b| b == 0).unwrap_or(raw.len());
        String::from_utf8(raw[..end].to_vec())
            .map_err(|e| invalid_data(format!("fixed string is not UTF-8: {}", e)))
    }

    /// Read a `u32`-prefixed UTF-8 string.
    pub fn read_prefixed_string(&mut self) -> io::Result<String> {
        let len = self.read_u32()? as usize;
        if len > MAX_PREFIXED_STRING_LEN {
            return Err(invalid_data(format!(
                "string prefix {} exceeds limit {}",
                len, MAX_PREFIXED_STRING_LEN
            )));
        }
        let raw = self.read_bytes(len)?;
        String::from_utf8(raw).map_err(|e| invalid_data(format!("string is not UTF-8: {}", e)))
    }
}

impl Read for StructReader<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}

/// Typed writer over a writable region.
#[derive(Debug)]
pub struct StructWriter<'r> {
    inner: RegionWriter<'r>,
    version: i32,
}

impl<'r> StructWriter<'r> {
    pub fn new(inner: RegionWriter<'r>, version: i32) -> Self {
        Self { inner, version }
    }

    pub fn version(&self) -> i32 {
        self.version
    }

    pub fn order(&self) -> Endian {
        self.inner.order()
    }

    pub fn position(&self) -> u64 {
        self.inner.position()
    }

    pub fn remaining(&self) -> usize {
        self.inner.remaining()
    }

    pub fn into_inner(self) -> RegionWriter<'r> {
        self.inner
    }

    pub fn seek_to(&mut self, pos: u64) -> io::Result<()> {
        self.inner.seek(SeekFrom::Start(pos)).map(|_| ())
    }

    pub fn write_u8(&mut self, v: u8) -> io::Result<()> {
        self.inner.write_u8(v)
    }

    pub fn write_i8(&mut self, v: i8) -> io::Result<()> {
        self.inner.write_i8(v)
    }

    pub fn write_bool(&mut self, v: bool) -> io::Result<()> {
        self.inner.write_u8(v as u8)
    }

    ordered_write!(write_u16, u16);
    ordered_write!(write_i16, i16);
    ordered_write!(write_u32, u32);
    ordered_write!(write_i32, i32);
    ordered_write!(write_u64, u64);
    ordered_write!(write_i64, i64);
    ordered_write!(write_f32, f32);
    ordered_write!(write_f64, f64);

    pub fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.inner.write_all(bytes)
    }

    pub fn write_zeros(&mut self, n: usize) -> io::Result<()> {
        if n > self.inner.remaining() {
            return Err(io::Error::new(
                io::ErrorKind::WriteZero,
                format!("pad {} past end ({} remaining)", n, self.inner.remaining()),
            ));
        }
        io::copy(&mut io::repeat(0).take(n as u64), &mut self.inner).map(|_| ())
    }

    /// Write `s` into a `width`-byte field, NUL-padded.
    pub fn write_fixed_string(&mut self, s: &str, width: usize) -> io::Result<()> {
        if s.len() > width {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("string of {} bytes does not fit width {}", s.len(), width),
            ));
        }
        if width > self.inner.remaining() {
            return Err(io::Error::new(
                io::ErrorKind::WriteZero,
                format!("field of {} bytes past end ({} remaining)", width, self.inner.remaining()),
            ));
        }
        self.write_bytes(s.as_bytes())?;
        self.write_zeros(width - s.len())
    }

    /// Write a `u32` length prefix followed by the UTF-8 bytes. Writes nothing
    /// if the whole field does not fit.
    pub fn write_prefixed_string(&mut self, s: &str) -> io::Result<()> {
        let len = u32::try_from(s.len()).map_err(|_| {
            io::Error::new(io::ErrorKind::InvalidInput, "string longer than u32::MAX")
        })?;
        let need = 4 + s.len();
        if need > self.inner.remaining() {
            return Err(io::Error::new(
                io::ErrorKind::WriteZero,
                format!("prefixed string needs {} bytes ({} remaining)", need, self.inner.remaining()),
            ));
        }
        self.write_u32(len)?;
        self.write_bytes(s.as_bytes())
    }
}

impl Write for StructWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
