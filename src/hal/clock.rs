//! Monotonic time from a millisecond tick plus the SysTick down-counter.
//!
//! Microseconds are `ms * 1000` plus the ticks elapsed in the current
//! millisecond, converted with the core clock frequency.

use std::cell::Cell;
use std::time::Instant;

/// Hardware counters the clock is derived from
pub trait TickSource {
    /// Millisecond tick incremented by the SysTick interrupt
    fn tick_ms(&self) -> u32;
    /// SysTick reload value (ticks per millisecond minus one)
    fn reload(&self) -> u32;
    /// Current SysTick down-counter value
    fn current(&self) -> u32;
    /// Counter input clock in Hz
    fn core_clock_hz(&self) -> u32;
}

/// Monotonically non-decreasing time queries
pub trait MonotonicClock {
    fn now_ms(&self) -> u64;
    fn now_us(&self) -> u64;

    /// Busy-wait for `us` microseconds. No cancellation.
    fn delay_us(&self, us: u64) {
        let start = self.now_us();
        while self.now_us().wrapping_sub(start) < us {
            std::hint::spin_loop();
        }
    }
}

/// Clock backed by a [`TickSource`].
///
/// The 32-bit millisecond tick wraps after ~49.7 days; the clock counts
/// rollovers so `now_ms`/`now_us` keep increasing. It must be queried at
/// least once per wrap period for a rollover to be seen.
pub struct Clock<T> {
    source: T,
    last_tick: Cell<u32>,
    rollovers: Cell<u64>,
}

impl<T: TickSource> Clock<T> {
    pub fn new(source: T) -> Self {
        let last_tick = Cell::new(source.tick_ms());
        Self {
            source,
            last_tick,
            rollovers: Cell::new(0),
        }
    }

    pub fn source(&self) -> &T {
        &self.source
    }

    /// Widen a raw tick to 64 bits, counting wraps of the 32-bit counter
    fn extend(&self, tick: u32) -> u64 {
        if tick < self.last_tick.get() {
            self.rollovers.set(self.rollovers.get() + 1);
        }
        self.last_tick.set(tick);
        (self.rollovers.get() << 32) | u64::from(tick)
    }

    /// Sub-millisecond microseconds elapsed since the last tick
    fn elapsed_us_in_tick(&self, counter: u32) -> u64 {
        let hz = u64::from(self.source.core_clock_hz());
        if hz == 0 {
            return 0;
        }
        let elapsed_ticks = u64::from(self.source.reload().saturating_sub(counter));
        // Clamp so a late-latched counter never reaches the next millisecond
        (elapsed_ticks * 1_000_000 / hz).min(999)
    }
}

impl<T: TickSource> MonotonicClock for Clock<T> {
    fn now_ms(&self) -> u64 {
        self.extend(self.source.tick_ms())
    }

    fn now_us(&self) -> u64 {
        // Re-read until the millisecond tick did not roll over mid-sample
        loop {
            let before = self.source.tick_ms();
            let counter = self.source.current();
            let after = self.source.tick_ms();
            if before == after {
                return self.extend(before) * 1000 + self.elapsed_us_in_tick(counter);
            }
        }
    }
}

/// Host clock for simulation and tests
pub struct StdClock {
    origin: Instant,
}

impl StdClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for StdClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MonotonicClock for StdClock {
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }

    fn now_us(&self) -> u64 {
        self.origin.elapsed().as_micros() as u64
    }
}
