//! IIO sysfs ADC backend.
//!
//! Channel `n` of an IIO device is exposed as `<device>/in_voltage<n>_raw`
//! and yields the raw conversion as decimal text.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Result, TeleopError};
use crate::joystick::AnalogInput;

/// ADC unit backed by an IIO device directory.
#[derive(Debug, Clone)]
pub struct IioAdc {
    device_dir: PathBuf,
}

impl IioAdc {
    /// Opens the IIO device at `device_dir`.
    ///
    /// # Errors
    ///
    /// Returns `HardwareRead` if the directory does not exist.
    pub fn open<P: AsRef<Path>>(device_dir: P) -> Result<Self> {
        let device_dir = device_dir.as_ref().to_path_buf();

        if !device_dir.is_dir() {
            return Err(TeleopError::hardware(
                device_dir.display().to_string(),
                "IIO device directory not found",
            ));
        }

        debug!("Using IIO ADC at {}", device_dir.display());
        Ok(Self { device_dir })
    }

    fn channel_path(&self, channel: u8) -> PathBuf {
        self.device_dir.join(format!("in_voltage{}_raw", channel))
    }
}

impl AnalogInput for IioAdc {
    fn read_channel(&self, channel: u8) -> Result<u16> {
        let input = || format!("ADC channel {}", channel);

        let text = fs::read_to_string(self.channel_path(channel))
            .map_err(|e| TeleopError::hardware(input(), e.to_string()))?;

        let reading = text.trim();
        reading.parse::<u16>().map_err(|e| {
            TeleopError::hardware(input(), format!("invalid reading {:?}: {}", reading, e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn fake_device(readings: &[(u8, &str)]) -> TempDir {
        let dir = TempDir::new().unwrap();
        for (channel, value) in readings {
            fs::write(dir.path().join(format!("in_voltage{}_raw", channel)), value).unwrap();
        }
        dir
    }

    #[test]
    fn test_read_channel() {
        let dir = fake_device(&[(4, "4095\n"), (5, "2048\n")]);
        let adc = IioAdc::open(dir.path()).unwrap();

        assert_eq!(adc.read_channel(4).unwrap(), 4095);
        assert_eq!(adc.read_channel(5).unwrap(), 2048);
    }

    #[test]
    fn test_missing_channel() {
        let dir = fake_device(&[(4, "12")]);
        let adc = IioAdc::open(dir.path()).unwrap();

        let err = adc.read_channel(6).unwrap_err();
        assert!(err.is_hardware_fault());
        assert!(err.to_string().contains("ADC channel 6"));
    }

    #[test]
    fn test_garbage_reading() {
        let dir = fake_device(&[(4, "-12\n")]);
        let adc = IioAdc::open(dir.path()).unwrap();

        assert!(adc.read_channel(4).unwrap_err().is_hardware_fault());
    }

    #[test]
    fn test_open_missing_device() {
        let result = IioAdc::open("/nonexistent/iio:device9");
        assert!(matches!(result, Err(TeleopError::HardwareRead { .. })));
    }

    #[test]
    #[ignore] // Run with: cargo test -- --ignored
    fn test_read_real_adc() {
        let adc = IioAdc::open("/sys/bus/iio/devices/iio:device0").expect("No IIO device");
        let value = adc.read_channel(0).expect("Channel 0 not readable");
        println!("ADC channel 0: {}", value);
    }
}
