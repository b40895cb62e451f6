//! # Serial Frame Encoder
//!
//! Encodes a [`Twist`] published on a topic into one serial frame.
//!
//! ## Frame Layout
//!
//! ```text
//! +------+--------+------+-----------+-------+--------------------+-----+
//! | sync | length | type | topic_len | topic | 6 x f64 (LE)       | crc |
//! | 0x7E |   1    | 0x01 |     1     |   N   | 48 bytes           |  1  |
//! +------+--------+------+-----------+-------+--------------------+-----+
//! ```
//!
//! - `length` counts every byte after itself (type through crc).
//! - `crc` is CRC-8/DVB-S2 over length through the last payload byte.
//! - Payload order: linear x/y/z, angular x/y/z.

use bytes::{BufMut, Bytes, BytesMut};

use super::crc::crc8;
use super::message::Twist;
use crate::error::{Result, TeleopError};

/// Frame sync byte
pub const FRAME_SYNC_BYTE: u8 = 0x7E;

/// Twist message frame type
pub const FRAME_TYPE_TWIST: u8 = 0x01;

/// Twist payload size (6 × f64)
pub const TWIST_PAYLOAD_SIZE: usize = 48;

/// Longest topic name that fits in a frame
pub const MAX_TOPIC_LEN: usize = 200;

/// Bytes in a frame besides the topic: sync, length, type, topic_len, payload, crc
pub const FRAME_OVERHEAD: usize = 4 + TWIST_PAYLOAD_SIZE + 1;

/// Encode a Twist message into a complete frame
///
/// # Arguments
///
/// * `topic` - Topic name, at most [`MAX_TOPIC_LEN`] bytes
/// * `twist` - Message to send
///
/// # Errors
///
/// Returns [`TeleopError::Frame`] if the topic is empty or too long.
///
/// # Examples
///
/// ```
/// use teleop_joystick::transport::frame::{encode_twist_frame, FRAME_OVERHEAD};
/// use teleop_joystick::transport::Twist;
///
/// let frame = encode_twist_frame("cmd_vel", &Twist::default())?;
/// assert_eq!(frame.len(), FRAME_OVERHEAD + 7);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn encode_twist_frame(topic: &str, twist: &Twist) -> Result<Bytes> {
    if topic.is_empty() || topic.len() > MAX_TOPIC_LEN {
        return Err(TeleopError::Frame(format!(
            "topic length {} outside 1..={}",
            topic.len(),
            MAX_TOPIC_LEN
        )));
    }

    // type + topic_len + topic + payload + crc
    let length = 2 + topic.len() + TWIST_PAYLOAD_SIZE + 1;

    let mut frame = BytesMut::with_capacity(FRAME_OVERHEAD + topic.len());
    frame.put_u8(FRAME_SYNC_BYTE);
    frame.put_u8(length as u8);
    frame.put_u8(FRAME_TYPE_TWIST);
    frame.put_u8(topic.len() as u8);
    frame.put_slice(topic.as_bytes());
    for component in twist.components() {
        frame.put_f64_le(component);
    }

    let crc = crc8(&frame[1..]);
    frame.put_u8(crc);

    Ok(frame.freeze())
}
