//! # Error Types
//!
//! Custom error types for the teleop controller using `thiserror`.

use thiserror::Error;

/// Main error type for the teleop controller
#[derive(Debug, Error)]
pub enum TeleopError {
    /// Analog or digital input could not be read
    #[error("Hardware read error on {input}: {reason}")]
    HardwareRead {
        /// Which input failed (e.g. "ADC channel 4")
        input: String,
        /// What went wrong
        reason: String,
    },

    /// Velocity message could not be published
    #[error("Publish error: {0}")]
    Publish(String),

    /// Serial link errors
    #[error("Serial port error: {0}")]
    Serial(String),

    /// None of the candidate serial devices could be opened
    #[error("No serial device found (tried: {0})")]
    SerialPortNotFound(String),

    /// Message framing errors
    #[error("Frame encoding error: {0}")]
    Frame(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl TeleopError {
    /// Shorthand for a [`TeleopError::HardwareRead`].
    pub fn hardware(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::HardwareRead {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Whether this error came from the joystick hardware.
    #[must_use]
    pub fn is_hardware_fault(&self) -> bool {
        matches!(self, Self::HardwareRead { .. })
    }
}

/// Result type alias for the teleop controller
pub type Result<T> = std::result::Result<T, TeleopError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hardware_error_message() {
        let err = TeleopError::hardware("ADC channel 4", "device busy");
        assert_eq!(
            err.to_string(),
            "Hardware read error on ADC channel 4: device busy"
        );
        assert!(err.is_hardware_fault());
    }

    #[test]
    fn test_publish_error_is_not_hardware_fault() {
        let err = TeleopError::Publish("link down".to_string());
        assert!(!err.is_hardware_fault());
    }
}
