//! # Transport Module
//!
//! Publishes velocity messages to the robot base.
//!
//! This module handles:
//! - The six-field [`Twist`] message carried on the command topic
//! - Framing and CRC-8 checksums for the serial link
//! - Serial and console [`Publisher`] implementations

pub mod console;
pub mod crc;
pub mod frame;
pub mod message;
pub mod port_trait;
pub mod serial;

use async_trait::async_trait;

use crate::error::Result;

pub use console::ConsolePublisher;
pub use message::{Twist, Vector3};
pub use serial::SerialPublisher;

/// Publish side of a topic.
///
/// A failed publish is reported to the caller and never retried here.
#[async_trait]
pub trait Publisher: Send {
    /// Sends `message` on `topic`.
    async fn publish(&mut self, topic: &str, message: &Twist) -> Result<()>;
}
