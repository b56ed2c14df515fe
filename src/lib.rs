//! Microcontroller helper routines for UART frame reception
//!
//! Receive bytes land in a fixed-capacity ring buffer. A snapshot of one
//! frame's length is taken from it, the frame header is located even when
//! it wraps around the end of the snapshot, and the snapshot is rotated so
//! the header sits at offset 0 and validated against the frame layout
//! `[header][payload...][terminator]`.
//!
//! Alongside the receive path the crate carries the small timer helpers the
//! firmware uses: a monotonic clock with busy-wait delay, range mapping, and
//! 16-bit PWM duty scaling.
//!
//! ## Example
//!
//! ```
//! use mcu_frame_sync::streaming::{synchronize, SyncStatus};
//!
//! // Header "AB" wrapped to the middle of the capture, terminator 0x01 last
//! let snapshot = [0x10, 0x01, b'A', b'B', 0x20];
//! let outcome = synchronize(&snapshot, b"AB");
//!
//! assert_eq!(outcome.status, SyncStatus::Valid);
//! assert_eq!(outcome.frame.unwrap(), vec![b'A', b'B', 0x20, 0x10, 0x01]);
//! ```

pub mod config;
pub mod error;
pub mod hal;
pub mod receiver;
pub mod streaming;
pub mod telemetry;

pub use config::SyncConfig;
pub use error::{ConfigError, PatternError, PwmError, RingBufferError};
pub use receiver::FrameReceiver;
pub use streaming::{
    synchronize, FrameSynchronizer, HeaderPattern, RingBuffer, SharedRingBuffer, SyncOutcome,
    SyncStatus,
};
