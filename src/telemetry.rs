//! Telemetry Module for frame synchronization
//!
//! Emits structured sync events as single-line JSON through the `log`
//! facade, so the firmware's log sink (RTT, UART console, host logger) can
//! collect them without a separate metrics channel.

use log::{info, warn};
use serde::Serialize;

use crate::streaming::{SyncOutcome, SyncStatus};

/// Sync event types
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SyncEventType {
    /// Frame realigned and verified
    FrameAccepted,
    /// Snapshot rejected (no header, bad payload, bad input)
    FrameRejected,
    /// Receive ring buffer dropped a byte
    Overflow,
}

/// Sync event for logging
#[derive(Debug, Clone, Serialize)]
pub struct SyncEvent {
    pub event_type: SyncEventType,
    /// Status of the synchronization attempt
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<SyncStatus>,
    /// Numeric status code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,
    /// Header offset in the snapshot
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header_pos: Option<usize>,
    /// Snapshot length
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot_len: Option<usize>,
    /// Reason for rejection
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl SyncEvent {
    pub fn new(event_type: SyncEventType) -> Self {
        Self {
            event_type,
            status: None,
            code: None,
            header_pos: None,
            snapshot_len: None,
            reason: None,
        }
    }

    /// Set status and its code
    pub fn with_status(mut self, status: SyncStatus) -> Self {
        self.status = Some(status);
        self.code = Some(status.code());
        self
    }

    pub fn with_header_pos(mut self, pos: usize) -> Self {
        self.header_pos = Some(pos);
        self
    }

    pub fn with_snapshot_len(mut self, len: usize) -> Self {
        self.snapshot_len = Some(len);
        self
    }

    pub fn with_reason(mut self, reason: &str) -> Self {
        self.reason = Some(reason.to_string());
        self
    }

    /// Log the event
    pub fn emit(&self) {
        match serde_json::to_string(self) {
            Ok(json) => match self.event_type {
                SyncEventType::FrameAccepted => info!("[FRAME-SYNC] {}", json),
                SyncEventType::FrameRejected | SyncEventType::Overflow => {
                    warn!("[FRAME-SYNC] {}", json)
                }
            },
            Err(e) => {
                warn!("Failed to serialize sync event: {}", e);
            }
        }
    }
}

/// Build the event describing a synchronization outcome
pub fn sync_event(outcome: &SyncOutcome, snapshot_len: usize) -> SyncEvent {
    let event_type = if outcome.status.is_valid() {
        SyncEventType::FrameAccepted
    } else {
        SyncEventType::FrameRejected
    };

    let mut event = SyncEvent::new(event_type)
        .with_status(outcome.status)
        .with_snapshot_len(snapshot_len);

    if let Some(pos) = outcome.header_pos {
        event = event.with_header_pos(pos);
    }

    match outcome.status {
        SyncStatus::HeaderNotFound => event.with_reason("header not present in snapshot"),
        SyncStatus::PayloadInvalid => event.with_reason("header prefix or terminator mismatch"),
        _ => event,
    }
}

/// Overflow event for a dropped receive byte
pub fn overflow_event(dropped_total: usize) -> SyncEvent {
    SyncEvent::new(SyncEventType::Overflow)
        .with_reason(&format!("receive buffer full, {} bytes dropped", dropped_total))
}
