//! lump/mod.rs
//! Lump handles and container binding.

pub mod types;
pub mod handle;
pub mod container;

pub use types::*;
pub use handle::*;
pub use container::*;
