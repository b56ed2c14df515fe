//! Configuration module for frame synchronization
//!
//! Configuration is handed to the firmware as a JSON blob (host tool or
//! flash parameter page), NOT read from files.

use serde::Deserialize;

use crate::error::ConfigError;
use crate::streaming::frame_sync::{DEFAULT_PREFIX_CHECK_LEN, DEFAULT_TERMINATOR};

/// Receive-side framing configuration
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct SyncConfig {
    /// Header bytes marking the start of a frame
    #[serde(default = "default_header")]
    pub header: Vec<u8>,

    /// Byte expected at the last position of a realigned frame
    #[serde(default = "default_terminator")]
    pub terminator: u8,

    /// Total frame length including header and terminator
    #[serde(default = "default_frame_len")]
    pub frame_len: usize,

    /// Header bytes re-checked after rotation
    #[serde(default = "default_prefix_check_len")]
    pub prefix_check_len: usize,

    /// Receive ring buffer capacity
    #[serde(default = "default_ring_capacity")]
    pub ring_capacity: usize,
}

fn default_header() -> Vec<u8> {
    b"IRS".to_vec()
}

fn default_terminator() -> u8 {
    DEFAULT_TERMINATOR
}

fn default_frame_len() -> usize {
    32
}

fn default_prefix_check_len() -> usize {
    DEFAULT_PREFIX_CHECK_LEN
}

fn default_ring_capacity() -> usize {
    256
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            header: default_header(),
            terminator: default_terminator(),
            frame_len: default_frame_len(),
            prefix_check_len: default_prefix_check_len(),
            ring_capacity: default_ring_capacity(),
        }
    }
}

impl SyncConfig {
    /// Parse and validate configuration from JSON bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ConfigError> {
        let config_str =
            std::str::from_utf8(bytes).map_err(|e| ConfigError::InvalidUtf8(e.to_string()))?;

        let config: Self =
            serde_json::from_str(config_str).map_err(|e| ConfigError::InvalidJson(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.header.is_empty() {
            return Err(ConfigError::Invalid("header must not be empty".to_string()));
        }
        if self.frame_len == 0 {
            return Err(ConfigError::Invalid("frame_len must be positive".to_string()));
        }
        if self.header.len() > self.frame_len {
            return Err(ConfigError::Invalid(format!(
                "header ({} bytes) longer than frame_len ({})",
                self.header.len(),
                self.frame_len
            )));
        }
        // One slot is always kept free
        if self.ring_capacity <= self.frame_len {
            return Err(ConfigError::Invalid(format!(
                "ring_capacity ({}) must exceed frame_len ({})",
                self.ring_capacity, self.frame_len
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SyncConfig::default();
        assert_eq!(config.header, b"IRS".to_vec());
        assert_eq!(config.terminator, 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_config() {
        let json = r#"{"header": [36, 36], "frame_len": 16, "terminator": 10}"#;
        let config = SyncConfig::from_bytes(json.as_bytes()).unwrap();
        assert_eq!(config.header, b"$$".to_vec());
        assert_eq!(config.frame_len, 16);
        assert_eq!(config.terminator, b'\n');
        assert_eq!(config.ring_capacity, 256);
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            SyncConfig::from_bytes(b"{not json"),
            Err(ConfigError::InvalidJson(_))
        ));
        assert!(matches!(
            SyncConfig::from_bytes(&[0xFF, 0xFE]),
            Err(ConfigError::InvalidUtf8(_))
        ));
    }

    #[test]
    fn test_rejects_bad_geometry() {
        let empty_header = r#"{"header": []}"#;
        assert!(matches!(
            SyncConfig::from_bytes(empty_header.as_bytes()),
            Err(ConfigError::Invalid(_))
        ));

        let too_long = SyncConfig {
            header: vec![1; 8],
            frame_len: 4,
            ..Default::default()
        };
        assert!(too_long.validate().is_err());

        let small_ring = SyncConfig {
            frame_len: 32,
            ring_capacity: 32,
            ..Default::default()
        };
        assert!(small_ring.validate().is_err());
    }
}
