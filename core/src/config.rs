//! config.rs
//! Runtime configuration for slice files and the codec pools behind them.
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::compression::CompressionCodec;
use crate::constants::DEFAULT_MAX_DECODED_LEN;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config json: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Defaults when a field is absent:
/// - `codec`: zstd
/// - `level`: codec default
/// - `pool_capacity`: unbounded (acquire never fails for capacity reasons)
/// - `max_frame_len`: unlimited
/// - `max_decoded_len`: 1 GiB
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SliceConfig {
    pub codec: CompressionCodec,
    pub level: Option<i32>,
    pub pool_capacity: Option<usize>,
    pub max_frame_len: Option<u32>,
    pub max_decoded_len: usize,
}

impl Default for SliceConfig {
    fn default() -> Self {
        Self {
            codec: CompressionCodec::Zstd,
            level: None,
            pool_capacity: None,
            max_frame_len: None,
            max_decoded_len: DEFAULT_MAX_DECODED_LEN,
        }
    }
}

impl SliceConfig {
    pub fn with_codec(mut self, codec: CompressionCodec) -> Self {
        self.codec = codec;
        self
    }

    pub fn with_level(mut self, level: i32) -> Self {
        self.level = Some(level);
        self
    }

    pub fn with_pool_capacity(mut self, capacity: usize) -> Self {
        self.pool_capacity = Some(capacity);
        self
    }

    pub fn with_max_frame_len(mut self, max_len: u32) -> Self {
        self.max_frame_len = Some(max_len);
        self
    }

    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: SliceConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Level used for new compressors.
    pub fn effective_level(&self) -> i32 {
        self.level.unwrap_or(self.codec.default_level())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pool_capacity == Some(0) {
            return Err(ConfigError::Invalid("pool_capacity must be at least 1".into()));
        }
        if self.max_decoded_len == 0 {
            return Err(ConfigError::Invalid("max_decoded_len must be non-zero".into()));
        }

        if let Some(level) = self.level {
            let ok = match self.codec {
                CompressionCodec::Zstd => zstd::compression_level_range().contains(&level),
                CompressionCodec::Deflate => (0..=9).contains(&level),
                CompressionCodec::Lz4 => true,
            };
            if !ok {
                return Err(ConfigError::Invalid(format!(
                    "level {} not supported by {}",
                    level,
                    self.codec.name()
                )));
            }
        }
        Ok(())
    }
}
