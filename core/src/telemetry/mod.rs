//! telemetry/mod.rs
//! Region telemetry: counters, stage timers, and immutable snapshots.
//!
//! Notes:
//! - Counters are plain fields owned by each region; nothing is global.
//! - Snapshots are immutable and serializable (JSON via serde_json,
//!   counters alone via bincode).

pub mod counters;
pub mod timers;
pub mod snapshot;

pub use counters::*;
pub use timers::*;
pub use snapshot::*;
