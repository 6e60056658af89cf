//! region/mod.rs
//! Byte regions sliced out of (or copied from) a container, with stream
//! adapters and codec-driven compression.
//!
//! Notes:
//! - `RegionBuffer` owns the storage and the compression flag.
//! - `RegionReader` / `RegionWriter` are raw cursors over the current bytes.
//! - `StructReader` / `StructWriter` add typed fields in region byte order.

pub mod types;
pub mod stream;
pub mod data;
pub mod buffer;

pub use types::{Endian, RegionState};
pub use stream::*;
pub use data::*;
pub use buffer::*;
