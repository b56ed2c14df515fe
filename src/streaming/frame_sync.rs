//! Frame Synchronization
//!
//! Locates the header inside a snapshot of a circular receive buffer, rotates
//! the snapshot so the header sits at offset 0, and checks the realigned
//! frame layout `[header][payload...][terminator]`.
//!
//! Each call is independent. All outcomes are reported through
//! [`SyncStatus`]; nothing is retried here, a caller that gets
//! `HeaderNotFound` or `PayloadInvalid` should wait for more bytes and take a
//! new snapshot.

use log::debug;
use serde::Serialize;

use super::pattern_matcher::HeaderPattern;
use crate::config::SyncConfig;

/// End-of-frame marker expected in the last byte of a realigned frame
pub const DEFAULT_TERMINATOR: u8 = 1;

/// Number of leading header bytes re-checked after rotation
pub const DEFAULT_PREFIX_CHECK_LEN: usize = 3;

/// Outcome of a synchronization attempt
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncStatus {
    /// Header found, frame realigned and verified
    Valid,
    /// No header anywhere in the snapshot, including across the wrap
    HeaderNotFound,
    /// Header found and frame realigned, but prefix or terminator check failed
    PayloadInvalid,
    /// Snapshot has no bytes
    EmptySnapshot,
    /// Header pattern has no bytes
    EmptyHeader,
    /// Output buffer length differs from the snapshot length
    OutputLengthMismatch,
}

impl SyncStatus {
    /// Numeric status code used by the firmware's host protocol
    pub fn code(&self) -> u16 {
        match self {
            SyncStatus::Valid => 200,
            SyncStatus::HeaderNotFound => 300,
            SyncStatus::PayloadInvalid => 400,
            SyncStatus::EmptySnapshot => 401,
            SyncStatus::EmptyHeader => 402,
            SyncStatus::OutputLengthMismatch => 403,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, SyncStatus::Valid)
    }

    /// True when the rejection happened before any search
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            SyncStatus::EmptySnapshot | SyncStatus::EmptyHeader | SyncStatus::OutputLengthMismatch
        )
    }
}

/// Status plus the realigned frame, when one was produced
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyncOutcome {
    pub status: SyncStatus,
    /// Offset of the header in the original snapshot
    pub header_pos: Option<usize>,
    /// Rotated snapshot. Present for `Valid` and for `PayloadInvalid`
    /// (diagnostics only, not a verified frame).
    pub frame: Option<Vec<u8>>,
}

impl SyncOutcome {
    fn rejected(status: SyncStatus) -> Self {
        Self {
            status,
            header_pos: None,
            frame: None,
        }
    }

    /// The frame, only if it passed validation
    pub fn verified_frame(&self) -> Option<&[u8]> {
        if self.status.is_valid() {
            self.frame.as_deref()
        } else {
            None
        }
    }
}

/// Header search, rotation and validation with a fixed policy
#[derive(Clone, Debug)]
pub struct FrameSynchronizer {
    /// `None` when constructed with an empty header; reported at sync time
    header: Option<HeaderPattern>,
    terminator: u8,
    prefix_check_len: usize,
}

impl FrameSynchronizer {
    /// Create with the default terminator and prefix check
    pub fn new(header: impl Into<Vec<u8>>) -> Self {
        Self {
            header: HeaderPattern::new(header).ok(),
            terminator: DEFAULT_TERMINATOR,
            prefix_check_len: DEFAULT_PREFIX_CHECK_LEN,
        }
    }

    pub fn from_config(config: &SyncConfig) -> Self {
        Self::new(config.header.clone())
            .with_terminator(config.terminator)
            .with_prefix_check_len(config.prefix_check_len)
    }

    pub fn with_terminator(mut self, terminator: u8) -> Self {
        self.terminator = terminator;
        self
    }

    /// Leading bytes compared against the header after rotation (capped at
    /// the header length)
    pub fn with_prefix_check_len(mut self, len: usize) -> Self {
        self.prefix_check_len = len;
        self
    }

    pub fn header(&self) -> Option<&HeaderPattern> {
        self.header.as_ref()
    }

    pub fn terminator(&self) -> u8 {
        self.terminator
    }

    /// Synchronize into a caller-owned buffer of the snapshot's length.
    ///
    /// `out` is left untouched unless the header is found. On
    /// `PayloadInvalid` it holds the rotated snapshot.
    pub fn synchronize_into(&self, snapshot: &[u8], out: &mut [u8]) -> SyncStatus {
        self.locate_and_rotate(snapshot, out).0
    }

    /// Synchronize, allocating the output frame
    pub fn synchronize(&self, snapshot: &[u8]) -> SyncOutcome {
        let mut frame = vec![0u8; snapshot.len()];
        let (status, header_pos) = self.locate_and_rotate(snapshot, &mut frame);

        match header_pos {
            Some(pos) => SyncOutcome {
                status,
                header_pos: Some(pos),
                frame: Some(frame),
            },
            None => SyncOutcome::rejected(status),
        }
    }

    fn locate_and_rotate(&self, snapshot: &[u8], out: &mut [u8]) -> (SyncStatus, Option<usize>) {
        if snapshot.is_empty() {
            return (SyncStatus::EmptySnapshot, None);
        }
        let header = match &self.header {
            Some(header) => header,
            None => return (SyncStatus::EmptyHeader, None),
        };
        if out.len() != snapshot.len() {
            return (SyncStatus::OutputLengthMismatch, None);
        }

        debug!(
            "Synchronizing snapshot of {} bytes against {}-byte header",
            snapshot.len(),
            header.len()
        );

        let header_pos = match header.find_wrapped(snapshot) {
            Some(pos) => pos,
            None => return (SyncStatus::HeaderNotFound, None),
        };
        debug!("Header found at offset {}", header_pos);

        rotate_into(snapshot, header_pos, out);

        let status = if self.is_well_formed(header, out) {
            SyncStatus::Valid
        } else {
            SyncStatus::PayloadInvalid
        };
        (status, Some(header_pos))
    }

    fn is_well_formed(&self, header: &HeaderPattern, frame: &[u8]) -> bool {
        let check_len = self.prefix_check_len.min(header.len());
        let prefix_ok = frame[..check_len] == header.as_bytes()[..check_len];
        let terminator_ok = frame.last() == Some(&self.terminator);
        prefix_ok && terminator_ok
    }
}

/// Copy `src` into `out` so that `src[start]` lands at `out[0]`.
///
/// Every byte is preserved in circular order; `out` must be as long as `src`.
pub fn rotate_into(src: &[u8], start: usize, out: &mut [u8]) {
    let len = src.len();
    for (i, slot) in out.iter_mut().enumerate().take(len) {
        *slot = src[(start + i) % len];
    }
}

/// Synchronize with the default terminator and prefix check
pub fn synchronize(snapshot: &[u8], header: &[u8]) -> SyncOutcome {
    FrameSynchronizer::new(header.to_vec()).synchronize(snapshot)
}
