//! compression/codecs/mod.rs
//! Shipped codec implementations.
//!
//! Each codec frames its payload with the shared signature header
//! (see `compression::frame`) so detection never needs to decode.

pub mod stored;
pub mod deflate;
pub mod lz4;
pub mod zstd;

pub use self::stored::*;
pub use self::deflate::*;
pub use self::lz4::*;
pub use self::zstd::*;
