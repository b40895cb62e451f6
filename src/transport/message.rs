//! Velocity message carried on the command topic.

use serde::Serialize;

use crate::joystick::VelocityCommand;

/// Three-component vector.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Linear and angular velocity, laid out like `geometry_msgs/Twist`.
///
/// Only `linear.x` and `angular.z` are driven by the joystick; the other
/// four components stay at zero.
///
/// # Examples
///
/// ```
/// use teleop_joystick::joystick::VelocityCommand;
/// use teleop_joystick::transport::Twist;
///
/// let mut msg = Twist::default();
/// msg.apply(&VelocityCommand { linear_speed: -1.0, turn_rate: 0.25 });
///
/// assert_eq!(msg.linear.x, -1.0);
/// assert_eq!(msg.angular.z, 0.25);
/// assert_eq!(msg.linear.y, 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Twist {
    pub linear: Vector3,
    pub angular: Vector3,
}

impl Twist {
    /// Overwrites the message in place with `command`.
    pub fn apply(&mut self, command: &VelocityCommand) {
        *self = Self::from(command);
    }

    /// Components in wire order: linear x/y/z, angular x/y/z.
    #[must_use]
    pub fn components(&self) -> [f64; 6] {
        [
            self.linear.x,
            self.linear.y,
            self.linear.z,
            self.angular.x,
            self.angular.y,
            self.angular.z,
        ]
    }
}

impl From<&VelocityCommand> for Twist {
    fn from(command: &VelocityCommand) -> Self {
        Self {
            linear: Vector3 {
                x: f64::from(command.linear_speed),
                ..Vector3::default()
            },
            angular: Vector3 {
                z: f64::from(command.turn_rate),
                ..Vector3::default()
            },
        }
    }
}
