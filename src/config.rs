//! # Configuration Module
//!
//! Handles loading and validating configuration from TOML files.

use serde::de::Error;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::{Result, TeleopError};
use crate::transport::frame::MAX_TOPIC_LEN;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub hardware: HardwareConfig,
    #[serde(default)]
    pub normalization: NormalizationConfig,
    #[serde(default)]
    pub scheduler: SchedulerConfig,
    #[serde(default)]
    pub publisher: PublisherConfig,
}

/// Joystick wiring and host device locations
#[derive(Debug, Deserialize, Clone)]
pub struct HardwareConfig {
    #[serde(default = "default_adc_device")]
    pub adc_device: String,

    #[serde(default = "default_x_channel")]
    pub x_channel: u8,

    #[serde(default = "default_y_channel")]
    pub y_channel: u8,

    #[serde(default = "default_gpio_root")]
    pub gpio_root: String,

    #[serde(default = "default_button_pin")]
    pub button_pin: u32,

    #[serde(default)]
    pub button_active_low: bool,

    #[serde(default)]
    pub status_led_pin: Option<u32>,
}

/// Constants used to turn raw ADC readings into a velocity command
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct NormalizationConfig {
    /// Full-scale raw ADC value (4095 for a 12-bit converter).
    #[serde(default = "default_adc_max")]
    pub adc_max: u16,

    /// Raw value of the turn axis at rest.
    #[serde(default = "default_y_center")]
    pub y_center: u16,

    /// Divisor applied to the centered turn reading.
    #[serde(default = "default_y_span")]
    pub y_span: u16,

    /// Half-width of the turn dead band, in centered/scaled units.
    #[serde(default = "default_turn_deadzone")]
    pub turn_deadzone: f32,
}

/// What the control loop does when the joystick cannot be read
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum HardwareFaultPolicy {
    /// Stop the control loop and propagate the error.
    #[default]
    FailFast,
    /// Log the fault and wait for the next tick.
    SkipTick,
}

/// Tick cadence configuration
#[derive(Debug, Deserialize, Clone)]
pub struct SchedulerConfig {
    #[serde(default = "default_tick_period_ms")]
    pub tick_period_ms: u64,

    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    #[serde(default)]
    pub hardware_fault: HardwareFaultPolicy,

    #[serde(default = "default_status_log_interval_ticks")]
    pub status_log_interval_ticks: u64,
}

/// Which transport carries the velocity messages
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PublisherKind {
    /// Framed messages over a serial link.
    #[default]
    Serial,
    /// JSON lines on stdout.
    Console,
}

/// Publisher configuration
#[derive(Debug, Deserialize, Clone)]
pub struct PublisherConfig {
    #[serde(default)]
    pub kind: PublisherKind,

    #[serde(default = "default_node_name")]
    pub node_name: String,

    #[serde(default = "default_topic")]
    pub topic: String,

    #[serde(default = "default_serial_port")]
    pub port: String,

    #[serde(default = "default_baud_rate")]
    pub baud_rate: u32,
}

// Default value functions
fn default_adc_device() -> String { "/sys/bus/iio/devices/iio:device0".to_string() }
fn default_x_channel() -> u8 { 4 }
fn default_y_channel() -> u8 { 5 }
fn default_gpio_root() -> String { "/sys/class/gpio".to_string() }
fn default_button_pin() -> u32 { 15 }

fn default_adc_max() -> u16 { 4095 }
fn default_y_center() -> u16 { 2048 }
fn default_y_span() -> u16 { 1024 }
fn default_turn_deadzone() -> f32 { 0.5 }

fn default_tick_period_ms() -> u64 { 1000 }
fn default_poll_interval_ms() -> u64 { 100 }
fn default_status_log_interval_ticks() -> u64 { 60 }

fn default_node_name() -> String { "teleop_joystick_controller".to_string() }
fn default_topic() -> String { "turtle1/cmd_vel".to_string() }
fn default_serial_port() -> String { "/dev/ttyUSB0".to_string() }
fn default_baud_rate() -> u32 { 115200 }

/// Baud rates accepted for the serial transport
const VALID_BAUD_RATES: [u32; 6] = [9600, 57600, 115200, 230400, 460800, 921600];

impl Default for HardwareConfig {
    fn default() -> Self {
        Self {
            adc_device: default_adc_device(),
            x_channel: default_x_channel(),
            y_channel: default_y_channel(),
            gpio_root: default_gpio_root(),
            button_pin: default_button_pin(),
            button_active_low: false,
            status_led_pin: None,
        }
    }
}

impl Default for NormalizationConfig {
    fn default() -> Self {
        Self {
            adc_max: default_adc_max(),
            y_center: default_y_center(),
            y_span: default_y_span(),
            turn_deadzone: default_turn_deadzone(),
        }
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            tick_period_ms: default_tick_period_ms(),
            poll_interval_ms: default_poll_interval_ms(),
            hardware_fault: HardwareFaultPolicy::default(),
            status_log_interval_ticks: default_status_log_interval_ticks(),
        }
    }
}

impl Default for PublisherConfig {
    fn default() -> Self {
        Self {
            kind: PublisherKind::default(),
            node_name: default_node_name(),
            topic: default_topic(),
            port: default_serial_port(),
            baud_rate: default_baud_rate(),
        }
    }
}

fn invalid(msg: impl std::fmt::Display) -> TeleopError {
    TeleopError::Config(toml::de::Error::custom(msg))
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration file
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - TOML parsing fails
    /// - Validation fails
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use teleop_joystick::config::Config;
    ///
    /// let config = Config::load("config/default.toml")?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns error if any configuration value is out of valid range
    pub fn validate(&self) -> Result<()> {
        // Hardware
        if self.hardware.adc_device.is_empty() {
            return Err(invalid("adc_device cannot be empty"));
        }

        if self.hardware.gpio_root.is_empty() {
            return Err(invalid("gpio_root cannot be empty"));
        }

        if self.hardware.x_channel == self.hardware.y_channel {
            return Err(invalid("x_channel and y_channel must be different"));
        }

        if self.hardware.status_led_pin == Some(self.hardware.button_pin) {
            return Err(invalid("status_led_pin cannot be the same as button_pin"));
        }

        // Normalization
        let norm = &self.normalization;
        if norm.adc_max == 0 {
            return Err(invalid("adc_max must be greater than 0"));
        }

        if norm.y_center > norm.adc_max {
            return Err(invalid("y_center must be within 0..=adc_max"));
        }

        if norm.y_span == 0 {
            return Err(invalid("y_span must be greater than 0"));
        }

        if !norm.turn_deadzone.is_finite() || !(0.0..=2.0).contains(&norm.turn_deadzone) {
            return Err(invalid("turn_deadzone must be between 0.0 and 2.0"));
        }

        // Scheduler timing
        let sched = &self.scheduler;
        if sched.tick_period_ms == 0 || sched.tick_period_ms > 60000 {
            return Err(invalid("tick_period_ms must be between 1 and 60000"));
        }

        if sched.poll_interval_ms == 0 || sched.poll_interval_ms > sched.tick_period_ms {
            return Err(invalid("poll_interval_ms must be between 1 and tick_period_ms"));
        }

        if sched.status_log_interval_ticks == 0 {
            return Err(invalid("status_log_interval_ticks must be greater than 0"));
        }

        // Publisher
        let publisher = &self.publisher;
        if publisher.node_name.is_empty() {
            return Err(invalid("node_name cannot be empty"));
        }

        if publisher.topic.is_empty() {
            return Err(invalid("topic cannot be empty"));
        }

        if publisher.topic.len() > MAX_TOPIC_LEN {
            return Err(invalid(format!(
                "topic must be at most {} bytes",
                MAX_TOPIC_LEN
            )));
        }

        if publisher.kind == PublisherKind::Serial {
            if publisher.port.is_empty() {
                return Err(invalid("serial port cannot be empty"));
            }

            if !VALID_BAUD_RATES.contains(&publisher.baud_rate) {
                return Err(invalid(
                    "baud_rate must be one of: 9600, 57600, 115200, 230400, 460800, 921600",
                ));
            }
        }

        Ok(())
    }
}
