//! config.rs
//! Codec selection as loaded from a settings file.
//!
//! ```json
//! { "codec": "lz4" }
//! { "codec": "zstd", "level": 19 }
//! ```
//!
//! A missing `level` means the registry default for that codec.

use serde::{Deserialize, Serialize};

use crate::compression::{create_codec, CodecId, CompressionError, SharedCodec};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid codec config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Codec(#[from] CompressionError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodecConfig {
    pub codec: CodecId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<i32>,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self { codec: CodecId::Zstd, level: None }
    }
}

impl CodecConfig {
    pub fn new(codec: CodecId, level: Option<i32>) -> Self {
        Self { codec, level }
    }

    pub fn from_json(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Instantiate the configured codec.
    pub fn build(&self) -> Result<SharedCodec, ConfigError> {
        Ok(create_codec(self.codec as u16, self.level)?)
    }
}
