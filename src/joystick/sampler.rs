//! # Joystick Sampler
//!
//! Reads both joystick axes and the mode button once per tick.
//!
//! Hardware access goes through the [`AnalogInput`] and [`DigitalInput`]
//! traits so the sampler can run against the Linux sysfs backends in
//! [`crate::hardware`] or against mocks in tests.

use tracing::debug;

#[cfg(test)]
use mockall::automock;

use super::JoystickSample;
use crate::config::HardwareConfig;
use crate::error::Result;

/// Single-shot analog input (ADC unit).
#[cfg_attr(test, automock)]
pub trait AnalogInput {
    /// Reads one raw sample from `channel`.
    fn read_channel(&self, channel: u8) -> Result<u16>;
}

/// Digital input (GPIO).
#[cfg_attr(test, automock)]
pub trait DigitalInput {
    /// Reads the current level of `pin`. `true` is high.
    fn read_pin(&self, pin: u32) -> Result<bool>;
}

/// Which inputs the joystick is wired to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JoystickChannels {
    /// ADC channel for the forward magnitude axis.
    pub x_channel: u8,
    /// ADC channel for the turn axis.
    pub y_channel: u8,
    /// GPIO pin for the mode button.
    pub button_pin: u32,
    /// Treat a low level as "pressed".
    pub button_active_low: bool,
}

impl Default for JoystickChannels {
    fn default() -> Self {
        Self::from(&HardwareConfig::default())
    }
}

impl From<&HardwareConfig> for JoystickChannels {
    fn from(config: &HardwareConfig) -> Self {
        Self {
            x_channel: config.x_channel,
            y_channel: config.y_channel,
            button_pin: config.button_pin,
            button_active_low: config.button_active_low,
        }
    }
}

/// Reads a [`JoystickSample`] from the hardware.
///
/// Each call reflects the instant it was made; nothing is filtered or
/// averaged across calls.
#[derive(Debug)]
pub struct Sampler<A, D> {
    analog: A,
    digital: D,
    channels: JoystickChannels,
}

impl<A: AnalogInput, D: DigitalInput> Sampler<A, D> {
    /// Creates a sampler over the given inputs.
    pub fn new(analog: A, digital: D, channels: JoystickChannels) -> Self {
        Self {
            analog,
            digital,
            channels,
        }
    }

    /// Reads both axes and the button.
    ///
    /// # Errors
    ///
    /// Returns [`TeleopError::HardwareRead`](crate::error::TeleopError::HardwareRead)
    /// if any of the three reads fails. No partial sample is produced.
    pub fn read(&self) -> Result<JoystickSample> {
        let x_raw = self.analog.read_channel(self.channels.x_channel)?;
        let y_raw = self.analog.read_channel(self.channels.y_channel)?;
        let level = self.digital.read_pin(self.channels.button_pin)?;

        let button = level != self.channels.button_active_low;

        debug!("Sampled x={} y={} button={}", x_raw, y_raw, button);

        Ok(JoystickSample {
            x_raw,
            y_raw,
            button,
        })
    }
}
