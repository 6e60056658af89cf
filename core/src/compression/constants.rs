/// Stable codec IDs (u16) used by configuration and the registry.
pub mod codec_ids {
    pub const STORED: u16  = 0x0000;
    pub const ZSTD: u16    = 0x0001;
    pub const LZ4: u16     = 0x0002;
    pub const DEFLATE: u16 = 0x0003;
}

/// Frame identifiers written at offset 0 of every compressed region.
pub mod idents {
    pub const STORED: [u8; 4]  = *b"STOR";
    pub const ZSTD: [u8; 4]    = *b"ZSTD";
    pub const LZ4: [u8; 4]     = *b"LZ4B";
    pub const DEFLATE: [u8; 4] = *b"ZLIB";
}

/// Default compression levels (balanced).
pub const DEFAULT_LEVEL_ZSTD: i32 = 6;
pub const DEFAULT_LEVEL_LZ4: i32 = 0; // block mode has no levels
pub const DEFAULT_LEVEL_DEFLATE: i32 = 6;

/// ident(4) + actual_size(4) + compressed_size(4), little-endian.
pub const FRAME_HEADER_LEN: usize = 12;

/// Upper bound for a declared uncompressed size (512 MiB).
pub const MAX_DECODED_SIZE: usize = 512 * 1024 * 1024;
