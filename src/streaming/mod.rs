//! Streaming module for receive-side frame handling
//!
//! This module provides the primitives that:
//! - Buffer received bytes in fixed memory (ring buffer)
//! - Find a header in a circular snapshot (KMP, no regex)
//! - Realign and validate frames against the header

pub mod frame_sync;
pub mod pattern_matcher;
pub mod ring_buffer;

pub use frame_sync::{synchronize, FrameSynchronizer, SyncOutcome, SyncStatus};
pub use pattern_matcher::{HeaderPattern, MatchState};
pub use ring_buffer::{RingBuffer, SharedRingBuffer};
