//! Frame Receiver
//!
//! Glue between a byte producer (UART RX interrupt, DMA half/full callback)
//! and the frame synchronizer. Bytes are queued in a fixed-size ring buffer;
//! once a full frame's worth is buffered, exactly `frame_len` bytes are
//! drained into a snapshot and synchronized.
//!
//! The receiver takes `&mut self` everywhere. Sharing it with an interrupt
//! handler requires wrapping it the same way as
//! [`SharedRingBuffer`](crate::streaming::SharedRingBuffer).

use log::{debug, warn};

use crate::config::SyncConfig;
use crate::error::{ConfigError, RingBufferError};
use crate::streaming::{FrameSynchronizer, RingBuffer, SyncOutcome};
use crate::telemetry;

/// Ring-buffered receiver producing synchronized frames
pub struct FrameReceiver {
    ring: RingBuffer,
    synchronizer: FrameSynchronizer,
    /// Snapshot scratch, reused across polls
    snapshot: Vec<u8>,
    dropped_bytes: usize,
    frames_valid: usize,
    frames_rejected: usize,
}

impl FrameReceiver {
    /// Create a receiver from configuration
    pub fn from_config(config: &SyncConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let ring = RingBuffer::new(config.ring_capacity)
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;

        Ok(Self {
            ring,
            synchronizer: FrameSynchronizer::from_config(config),
            snapshot: vec![0u8; config.frame_len],
            dropped_bytes: 0,
            frames_valid: 0,
            frames_rejected: 0,
        })
    }

    /// Queue one received byte.
    ///
    /// A full buffer rejects the byte; the drop is counted and logged.
    pub fn on_rx_byte(&mut self, byte: u8) -> Result<(), RingBufferError> {
        match self.ring.push(byte) {
            Ok(()) => Ok(()),
            Err(e) => {
                self.dropped_bytes += 1;
                telemetry::overflow_event(self.dropped_bytes).emit();
                Err(e)
            }
        }
    }

    /// Queue a burst of bytes, returns how many were accepted
    pub fn on_rx_bytes(&mut self, bytes: &[u8]) -> usize {
        let mut accepted = 0;
        for &byte in bytes {
            if self.ring.push(byte).is_ok() {
                accepted += 1;
            } else {
                self.dropped_bytes += 1;
            }
        }

        if accepted < bytes.len() {
            warn!(
                "Receive buffer full, dropped {} of {} bytes",
                bytes.len() - accepted,
                bytes.len()
            );
            telemetry::overflow_event(self.dropped_bytes).emit();
        }
        accepted
    }

    /// Synchronize the next frame once enough bytes are buffered.
    ///
    /// Returns `None` while fewer than `frame_len` bytes are queued.
    pub fn poll_frame(&mut self) -> Option<SyncOutcome> {
        let frame_len = self.snapshot.len();
        if self.ring.len() < frame_len {
            return None;
        }

        for slot in self.snapshot.iter_mut() {
            match self.ring.pop() {
                Ok(byte) => *slot = byte,
                // Length was checked above; nothing else drains the ring
                Err(_) => return None,
            }
        }

        let outcome = self.synchronizer.synchronize(&self.snapshot);
        if outcome.status.is_valid() {
            self.frames_valid += 1;
        } else {
            self.frames_rejected += 1;
            debug!(
                "Snapshot rejected with status {} ({} rejected so far)",
                outcome.status.code(),
                self.frames_rejected
            );
        }
        telemetry::sync_event(&outcome, frame_len).emit();

        Some(outcome)
    }

    /// Bytes currently queued
    pub fn buffered(&self) -> usize {
        self.ring.len()
    }

    pub fn dropped_bytes(&self) -> usize {
        self.dropped_bytes
    }

    pub fn frames_valid(&self) -> usize {
        self.frames_valid
    }

    pub fn frames_rejected(&self) -> usize {
        self.frames_rejected
    }

    /// Reset the receiver for reuse
    pub fn reset(&mut self) {
        self.ring.reset();
        self.dropped_bytes = 0;
        self.frames_valid = 0;
        self.frames_rejected = 0;
    }
}
