//! PWM duty scaling against a timer's auto-reload (period) register.

use log::debug;

use crate::error::PwmError;

/// Timer output compare channel
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PwmChannel {
    Ch1,
    Ch2,
    Ch3,
    Ch4,
}

impl TryFrom<u8> for PwmChannel {
    type Error = PwmError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(PwmChannel::Ch1),
            2 => Ok(PwmChannel::Ch2),
            3 => Ok(PwmChannel::Ch3),
            4 => Ok(PwmChannel::Ch4),
            other => Err(PwmError::UnsupportedChannel(other)),
        }
    }
}

/// A hardware timer with four compare channels
pub trait PwmTimer {
    /// Auto-reload register value
    fn period(&self) -> u32;
    /// Write the compare register of `channel`
    fn set_compare(&mut self, channel: PwmChannel, pulse: u32);
}

/// Compare value for a 16-bit duty: `duty * (period + 1) >> 16`
pub fn duty_to_pulse(duty: u16, period: u32) -> u32 {
    ((u64::from(duty) * (u64::from(period) + 1)) >> 16) as u32
}

/// Set the duty of `channel` (1..=4) from a 16-bit value.
///
/// Returns the compare value written.
pub fn set_duty_16bit<T: PwmTimer>(timer: &mut T, channel: u8, duty: u16) -> Result<u32, PwmError> {
    let channel = PwmChannel::try_from(channel)?;
    let pulse = duty_to_pulse(duty, timer.period());

    debug!("PWM {:?} duty {} -> compare {}", channel, duty, pulse);
    timer.set_compare(channel, pulse);
    Ok(pulse)
}
