//! Hardware collaborators
//!
//! Thin, stateless wrappers around the timer peripherals:
//! - Monotonic clock and busy-wait delay
//! - Range mapping and clamping
//! - PWM duty scaling

pub mod clock;
pub mod mapping;
pub mod pwm;

pub use clock::{Clock, MonotonicClock, StdClock, TickSource};
pub use mapping::{constrain, map_range, map_range_f32, power};
pub use pwm::{duty_to_pulse, set_duty_16bit, PwmChannel, PwmTimer};
