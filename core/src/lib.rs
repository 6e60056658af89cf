//! lump-core
//!
//! Byte regions for lump-based container files: zero-copy slicing out of a
//! parent buffer, typed stream adapters, and pluggable compression.
//! Directory parsing and payload decoding live elsewhere.

#![forbid(unsafe_code)]

// Shared and top level
pub mod constants;
pub mod types;
pub mod utils;
pub mod config;

// Building blocks
pub mod compression;
pub mod telemetry;

// Regions and lumps
pub mod region;
pub mod lump;

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::compression::{
        create_codec, default_codec, CodecId, CompressionCodec, CompressionError, SharedCodec,
    };
    pub use crate::config::CodecConfig;
    pub use crate::lump::{ContainerBuffer, ContainerBufferMut, DirectoryEntry, FourCC, LumpHandle};
    pub use crate::region::{
        Endian, RegionBuffer, RegionReader, RegionState, RegionWriter, StructReader, StructWriter,
    };
    pub use crate::telemetry::{RegionCounters, Stage, TelemetrySnapshot};
    pub use crate::types::{LumpError, RangeError};
}
