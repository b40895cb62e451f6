//! # Serial Publisher
//!
//! Sends framed [`Twist`] messages to the robot base over a serial link.
//!
//! This module handles:
//! - Opening the link (8N1, no flow control) with device auto-detection
//! - Encoding each message with [`encode_twist_frame`]
//! - Writing and flushing one frame per publish

use async_trait::async_trait;
use tokio_serial::SerialPortBuilderExt;
use tracing::{debug, info, warn};

use super::frame::encode_twist_frame;
use super::message::Twist;
use super::port_trait::{SerialPortIO, TokioSerialPort};
use super::Publisher;
use crate::error::{Result, TeleopError};

/// Fallback device paths tried after the configured one
const FALLBACK_DEVICE_PATHS: &[&str] = &[
    "/dev/ttyUSB0", // USB-to-serial adapters
    "/dev/ttyACM0", // USB CDC devices
];

/// Publisher writing frames to a serial port
pub struct SerialPublisher<P = TokioSerialPort> {
    port: P,
    device_path: String,
    frames_sent: u64,
}

impl<P> std::fmt::Debug for SerialPublisher<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerialPublisher")
            .field("device_path", &self.device_path)
            .field("frames_sent", &self.frames_sent)
            .finish_non_exhaustive()
    }
}

impl SerialPublisher<TokioSerialPort> {
    /// Open the configured device, falling back to common paths
    ///
    /// # Errors
    ///
    /// Returns `SerialPortNotFound` if none of the candidates can be opened
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use teleop_joystick::transport::SerialPublisher;
    ///
    /// let publisher = SerialPublisher::open("/dev/ttyUSB0", 115200)?;
    /// println!("Connected to {}", publisher.device_path());
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn open(preferred: &str, baud_rate: u32) -> Result<Self> {
        let mut paths = vec![preferred];
        paths.extend(FALLBACK_DEVICE_PATHS.iter().filter(|p| **p != preferred));
        Self::open_with_paths(&paths, baud_rate)
    }

    /// Open the first device in `paths` that accepts the connection
    pub fn open_with_paths(paths: &[&str], baud_rate: u32) -> Result<Self> {
        for path in paths {
            debug!("Trying to open serial port: {}", path);

            match Self::open_port(path, baud_rate) {
                Ok(port) => {
                    info!("Opened serial link at {} ({} baud)", path, baud_rate);
                    return Ok(Self::with_port(TokioSerialPort::new(port), *path));
                }
                Err(e) => {
                    warn!("Failed to open {}: {}", path, e);
                    continue;
                }
            }
        }

        Err(TeleopError::SerialPortNotFound(paths.join(", ")))
    }

    fn open_port(path: &str, baud_rate: u32) -> Result<tokio_serial::SerialStream> {
        tokio_serial::new(path, baud_rate)
            .data_bits(tokio_serial::DataBits::Eight)
            .parity(tokio_serial::Parity::None)
            .stop_bits(tokio_serial::StopBits::One)
            .flow_control(tokio_serial::FlowControl::None)
            .open_native_async()
            .map_err(|e| TeleopError::Serial(format!("Failed to open {}: {}", path, e)))
    }
}

impl<P: SerialPortIO> SerialPublisher<P> {
    /// Wrap an already-open port
    pub fn with_port(port: P, device_path: impl Into<String>) -> Self {
        Self {
            port,
            device_path: device_path.into(),
            frames_sent: 0,
        }
    }

    /// Path of the serial device in use
    pub fn device_path(&self) -> &str {
        &self.device_path
    }

    /// Frames written successfully so far
    pub fn frames_sent(&self) -> u64 {
        self.frames_sent
    }
}

#[async_trait]
impl<P: SerialPortIO> Publisher for SerialPublisher<P> {
    async fn publish(&mut self, topic: &str, message: &Twist) -> Result<()> {
        let frame = encode_twist_frame(topic, message)?;

        self.port
            .write_all(&frame)
            .await
            .map_err(|e| TeleopError::Publish(format!("Failed to write frame: {}", e)))?;

        self.port
            .flush()
            .await
            .map_err(|e| TeleopError::Publish(format!("Failed to flush serial port: {}", e)))?;

        self.frames_sent += 1;
        debug!("Sent Twist frame on {} ({} bytes)", topic, frame.len());
        Ok(())
    }
}
