/// Version tag given to lumps created without directory metadata.
pub const DEFAULT_LUMP_VERSION: i32 = 0;

/// Sanity bound for length-prefixed strings read from a region (16 MiB).
/// A corrupt prefix must not trigger a huge allocation.
pub const MAX_PREFIXED_STRING_LEN: usize = 16 * 1024 * 1024;
