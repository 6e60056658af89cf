//! compression/mod.rs
//! Region compression: the codec contract, shipped codecs, and the registry.
//!
//! Notes:
//! - A region only ever hands raw byte ranges to a codec; no lump format
//!   knowledge crosses this boundary.
//! - Every shipped codec writes the same 12-byte signature frame, so
//!   detection is a header peek and never decodes.
//! - Registry resolves codec IDs to implementations.

pub mod constants;
pub mod types;
pub mod frame;
pub mod registry;
pub mod codecs;

pub use constants::*;
pub use types::*;
pub use frame::*;
pub use registry::*;
