//! # Hardware Module
//!
//! Linux sysfs backends for the joystick inputs.
//!
//! This module handles:
//! - Single-shot ADC reads through the IIO subsystem
//! - Button reads and status LED writes through sysfs GPIO
//!
//! Channel and pin configuration (attenuation, bit width, pull-ups, export)
//! is done by the board setup before the controller starts.

pub mod gpio;
pub mod iio;

pub use gpio::SysfsGpio;
pub use iio::IioAdc;
