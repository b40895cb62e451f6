//! # Joystick Module
//!
//! Analog joystick and mode button input handling.
//!
//! This module handles:
//! - Reading the forward and turn axes from two ADC channels
//! - Reading the forward/reverse mode button from a digital pin
//! - Mapping a raw sample to a velocity command (deadzone, scaling, sign)

pub mod command_mapper;
pub mod sampler;

pub use command_mapper::{CommandMapper, VelocityCommand};
pub use sampler::{AnalogInput, DigitalInput, JoystickChannels, Sampler};

/// Raw joystick readings taken during one tick.
///
/// Axis values are raw ADC counts in `0..=adc_max`. The x axis is a
/// non-negative forward magnitude; direction comes from `button`.
///
/// # Examples
///
/// ```
/// use teleop_joystick::joystick::JoystickSample;
///
/// let sample = JoystickSample::new(4095, 2048, true);
/// assert_eq!(sample.x_raw, 4095);
/// assert!(sample.button);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JoystickSample {
    /// Forward magnitude axis (raw ADC counts).
    pub x_raw: u16,
    /// Turn axis (raw ADC counts, centered around `y_center`).
    pub y_raw: u16,
    /// Mode button. `true` drives forward, `false` drives in reverse.
    pub button: bool,
}

impl JoystickSample {
    /// Creates a sample from raw readings.
    #[must_use]
    pub const fn new(x_raw: u16, y_raw: u16, button: bool) -> Self {
        Self {
            x_raw,
            y_raw,
            button,
        }
    }
}
