use crate::compression::CompressionError;

/// Invalid bounds handed to a bind operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RangeError {
    /// A directory field was negative.
    #[error("negative {field}: {value}")]
    Negative { field: &'static str, value: i64 },

    /// `offset + length` overflows or exceeds the parent capacity.
    #[error("range {offset}+{length} exceeds capacity {capacity}")]
    OutOfBounds { offset: usize, length: usize, capacity: usize },

    /// Two writable regions would alias the same parent bytes.
    #[error("region at {offset} overlaps previous region ending at {previous_end}")]
    Overlap { offset: usize, previous_end: usize },
}

/// Unified error for region and lump operations.
/// - `Range` and `Codec` are recoverable; the region is left untouched.
/// - `Allocation` is not recoverable locally and should be propagated.
#[derive(Debug, thiserror::Error)]
pub enum LumpError {
    #[error("range error: {0}")]
    Range(#[from] RangeError),

    #[error("codec error: {0}")]
    Codec(#[from] CompressionError),

    #[error("allocation of {requested} bytes failed")]
    Allocation { requested: usize },
}

impl LumpError {
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, LumpError::Allocation { .. })
    }
}
