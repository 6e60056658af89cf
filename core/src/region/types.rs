//! region/types.rs
//! Byte order and lifecycle state of a region.

use serde::{Deserialize, Serialize};

/// Byte order used by the structured adapters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Endian {
    #[default]
    Little,
    Big,
}

/// Observable lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionState {
    Unbound,
    Bound { writable: bool, compressed: bool },
}

/// Backing storage of a region.
///
/// `Shared` and `Aliased` point into the parent container; `Owned` is an
/// independent allocation. Only `Aliased` and `Owned` may be written.
#[derive(Debug)]
pub(crate) enum Storage<'a> {
    Unbound,
    Shared(&'a [u8]),
    Aliased(&'a mut [u8]),
    Owned(Vec<u8>),
}

impl<'a> Storage<'a> {
    pub(crate) fn bytes(&self) -> &[u8] {
        match self {
            Storage::Unbound => &[],
            Storage::Shared(b) => *b,
            Storage::Aliased(b) => &**b,
            Storage::Owned(v) => v.as_slice(),
        }
    }

    pub(crate) fn bytes_mut(&mut self) -> Option<&mut [u8]> {
        match self {
            Storage::Aliased(b) => Some(&mut **b),
            Storage::Owned(v) => Some(v.as_mut_slice()),
            Storage::Unbound | Storage::Shared(_) => None,
        }
    }

    pub(crate) fn is_writable(&self) -> bool {
        matches!(self, Storage::Aliased(_) | Storage::Owned(_))
    }

    pub(crate) fn is_aliased(&self) -> bool {
        matches!(self, Storage::Shared(_) | Storage::Aliased(_))
    }
}
