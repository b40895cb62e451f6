//! sysfs GPIO backend.
//!
//! Pin `n` is expected to be exported already, with its level at
//! `<root>/gpio<n>/value` (`0` or `1`).

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{Result, TeleopError};
use crate::joystick::DigitalInput;

/// GPIO controller rooted at a sysfs directory (normally `/sys/class/gpio`).
#[derive(Debug, Clone)]
pub struct SysfsGpio {
    root: PathBuf,
}

impl SysfsGpio {
    /// Creates a GPIO accessor rooted at `root`.
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    fn value_path(&self, pin: u32) -> PathBuf {
        self.root.join(format!("gpio{}", pin)).join("value")
    }

    /// Drives an output pin high or low.
    ///
    /// # Errors
    ///
    /// Returns `HardwareRead` if the value file cannot be written.
    pub fn write_pin(&self, pin: u32, level: bool) -> Result<()> {
        let value = if level { "1" } else { "0" };
        fs::write(self.value_path(pin), value)
            .map_err(|e| TeleopError::hardware(format!("GPIO {}", pin), e.to_string()))?;

        debug!("GPIO {} set to {}", pin, value);
        Ok(())
    }

    /// Turns the status LED off.
    pub fn reset_status_led(&self, pin: u32) -> Result<()> {
        self.write_pin(pin, false)?;
        info!("Status LED on GPIO {} switched off", pin);
        Ok(())
    }
}

impl DigitalInput for SysfsGpio {
    fn read_pin(&self, pin: u32) -> Result<bool> {
        let text = fs::read_to_string(self.value_path(pin))
            .map_err(|e| TeleopError::hardware(format!("GPIO {}", pin), e.to_string()))?;

        match text.trim() {
            "0" => Ok(false),
            "1" => Ok(true),
            other => Err(TeleopError::hardware(
                format!("GPIO {}", pin),
                format!("unexpected level {:?}", other),
            )),
        }
    }
}
