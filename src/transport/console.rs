//! Console publisher.
//!
//! Writes each message as one JSON line. Used for dry runs on a host without
//! the serial link, or to pipe commands into another tool.

use std::io::{self, Write};

use async_trait::async_trait;
use chrono::Utc;
use serde::Serialize;

use super::message::Twist;
use super::Publisher;
use crate::error::{Result, TeleopError};

#[derive(Serialize)]
struct Record<'a> {
    timestamp: String,
    node: &'a str,
    topic: &'a str,
    twist: &'a Twist,
}

/// Publisher writing JSON lines to any [`Write`] sink
#[derive(Debug)]
pub struct ConsolePublisher<W> {
    writer: W,
    node_name: String,
}

impl ConsolePublisher<io::Stdout> {
    /// Publisher writing to stdout
    pub fn stdout(node_name: impl Into<String>) -> Self {
        Self::new(io::stdout(), node_name)
    }
}

impl<W: Write + Send> ConsolePublisher<W> {
    pub fn new(writer: W, node_name: impl Into<String>) -> Self {
        Self {
            writer,
            node_name: node_name.into(),
        }
    }

    /// Consumes the publisher, returning the sink.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

#[async_trait]
impl<W: Write + Send> Publisher for ConsolePublisher<W> {
    async fn publish(&mut self, topic: &str, message: &Twist) -> Result<()> {
        let record = Record {
            timestamp: Utc::now().to_rfc3339(),
            node: &self.node_name,
            topic,
            twist: message,
        };

        let line = serde_json::to_string(&record)
            .map_err(|e| TeleopError::Publish(format!("Failed to serialize message: {}", e)))?;

        writeln!(self.writer, "{}", line)
            .and_then(|_| self.writer.flush())
            .map_err(|e| TeleopError::Publish(format!("Failed to write message: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::joystick::VelocityCommand;

    #[test]
    fn test_writes_one_json_line() {
        let mut publisher = ConsolePublisher::new(Vec::new(), "teleop_joystick_controller");
        let twist = Twist::from(&VelocityCommand {
            linear_speed: 1.0,
            turn_rate: -0.5,
        });

        tokio_test::block_on(publisher.publish("turtle1/cmd_vel", &twist)).unwrap();

        let output = String::from_utf8(publisher.into_inner()).unwrap();
        assert_eq!(output.lines().count(), 1);

        let value: serde_json::Value = serde_json::from_str(output.trim()).unwrap();
        assert_eq!(value["node"], "teleop_joystick_controller");
        assert_eq!(value["topic"], "turtle1/cmd_vel");
        assert_eq!(value["twist"]["linear"]["x"], 1.0);
        assert_eq!(value["twist"]["angular"]["z"], -0.5);
        assert_eq!(value["twist"]["linear"]["y"], 0.0);
        assert!(value["timestamp"].is_string());
    }

    #[test]
    fn test_lines_accumulate() {
        let mut publisher = ConsolePublisher::new(Vec::new(), "node");
        for _ in 0..3 {
            tokio_test::block_on(publisher.publish("cmd_vel", &Twist::default())).unwrap();
        }

        let output = String::from_utf8(publisher.into_inner()).unwrap();
        assert_eq!(output.lines().count(), 3);
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_failure_is_publish_error() {
        let mut publisher = ConsolePublisher::new(BrokenPipe, "node");
        let result = tokio_test::block_on(publisher.publish("cmd_vel", &Twist::default()));
        assert!(matches!(result, Err(TeleopError::Publish(_))));
    }
}
