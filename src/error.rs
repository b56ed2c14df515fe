//! Error types for mcu-frame-sync.
//!
//! Frame synchronization itself reports a [`SyncStatus`](crate::streaming::SyncStatus)
//! rather than an error, since an invalid payload still carries output.

use thiserror::Error;

/// Ring buffer capacity/occupancy violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RingBufferError {
    /// Push rejected, buffer holds `capacity - 1` bytes.
    #[error("ring buffer full")]
    Full,

    /// Pop on an empty buffer.
    #[error("ring buffer empty")]
    Empty,

    /// Storage for the requested capacity could not be obtained.
    #[error("cannot allocate ring buffer storage of {capacity} bytes")]
    AllocationFailure { capacity: usize },
}

/// Header pattern construction errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PatternError {
    /// Pattern has no bytes.
    #[error("header pattern is empty")]
    Empty,
}

/// PWM output errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PwmError {
    /// Channel selector outside 1..=4.
    #[error("unsupported PWM channel: {0}")]
    UnsupportedChannel(u8),
}

/// Configuration parsing and validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Invalid UTF-8: {0}")]
    InvalidUtf8(String),

    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
