//! Fixed-Capacity Byte Ring Buffer
//!
//! CRITICAL: Storage is allocated once and never grows.
//! This ring buffer:
//! - Rejects new bytes when full (no overwrite of unread data)
//! - Sacrifices one slot so that `head == tail` always means empty
//! - Uses modulo-indexed access only, never steps past its storage
//!
//! There is no internal locking. A single producer and a single consumer may
//! use it only through exclusive access; see [`SharedRingBuffer`] for the
//! interrupt-safe wrapper.

use std::cell::RefCell;

use critical_section::Mutex;

use crate::error::RingBufferError;

/// Circular byte queue with reject-on-full semantics
#[derive(Debug)]
pub struct RingBuffer {
    /// Pre-allocated fixed-size storage
    storage: Vec<u8>,
    /// Next write position
    head: usize,
    /// Next read position
    tail: usize,
}

impl RingBuffer {
    /// Create with fixed capacity - NO dynamic growth.
    ///
    /// A buffer of capacity `N` holds at most `N - 1` bytes.
    pub fn new(capacity: usize) -> Result<Self, RingBufferError> {
        if capacity == 0 {
            return Err(RingBufferError::AllocationFailure { capacity });
        }

        let mut storage = Vec::new();
        storage
            .try_reserve_exact(capacity)
            .map_err(|_| RingBufferError::AllocationFailure { capacity })?;
        storage.resize(capacity, 0);

        Ok(Self {
            storage,
            head: 0,
            tail: 0,
        })
    }

    /// Push one byte, rejecting it if the buffer is full
    pub fn push(&mut self, byte: u8) -> Result<(), RingBufferError> {
        let next = self.advance(self.head);
        if next == self.tail {
            return Err(RingBufferError::Full);
        }

        self.storage[self.head] = byte;
        self.head = next;
        Ok(())
    }

    /// Pop the oldest byte
    pub fn pop(&mut self) -> Result<u8, RingBufferError> {
        if self.head == self.tail {
            return Err(RingBufferError::Empty);
        }

        let byte = self.storage[self.tail];
        self.tail = self.advance(self.tail);
        Ok(byte)
    }

    /// Get buffer capacity (one more than the bytes it can hold)
    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    /// Number of bytes waiting to be popped
    pub fn len(&self) -> usize {
        (self.head + self.capacity() - self.tail) % self.capacity()
    }

    pub fn is_empty(&self) -> bool {
        self.head == self.tail
    }

    pub fn is_full(&self) -> bool {
        self.advance(self.head) == self.tail
    }

    /// Reset to empty
    pub fn reset(&mut self) {
        self.head = 0;
        self.tail = 0;
        // Stale bytes stay in storage, they are unreachable until overwritten
    }

    fn advance(&self, index: usize) -> usize {
        (index + 1) % self.capacity()
    }
}

/// Ring buffer shared between an interrupt/callback producer and a consumer.
///
/// Every access runs inside a critical section, so a snapshot drained with
/// [`take_snapshot`](Self::take_snapshot) is consistent and cannot change
/// while the synchronizer scans it.
pub struct SharedRingBuffer {
    inner: Mutex<RefCell<RingBuffer>>,
}

impl SharedRingBuffer {
    pub fn new(capacity: usize) -> Result<Self, RingBufferError> {
        Ok(Self {
            inner: Mutex::new(RefCell::new(RingBuffer::new(capacity)?)),
        })
    }

    /// Push from the producer side (safe to call from an ISR)
    pub fn push(&self, byte: u8) -> Result<(), RingBufferError> {
        critical_section::with(|cs| self.inner.borrow(cs).borrow_mut().push(byte))
    }

    pub fn pop(&self) -> Result<u8, RingBufferError> {
        critical_section::with(|cs| self.inner.borrow(cs).borrow_mut().pop())
    }

    pub fn len(&self) -> usize {
        critical_section::with(|cs| self.inner.borrow(cs).borrow().len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drain up to `out.len()` bytes in one critical section.
    ///
    /// Returns the number of bytes written to `out`.
    pub fn take_snapshot(&self, out: &mut [u8]) -> usize {
        critical_section::with(|cs| {
            let mut ring = self.inner.borrow(cs).borrow_mut();
            let mut taken = 0;
            for slot in out.iter_mut() {
                match ring.pop() {
                    Ok(byte) => {
                        *slot = byte;
                        taken += 1;
                    }
                    Err(_) => break,
                }
            }
            taken
        })
    }
}
