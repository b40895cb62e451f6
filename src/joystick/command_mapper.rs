//! # Command Mapper Module
//!
//! Maps a raw [`JoystickSample`] to a [`VelocityCommand`].
//!
//! ## Axes
//!
//! | Axis | Raw range | Normalized | Output |
//! |------|-----------|------------|--------|
//! | X | 0-4095 | `x / adc_max` → 0.0..1.0 | `linear_speed` magnitude |
//! | Y | 0-4095 | `(y - y_center) / y_span` → about -2.0..2.0 | `turn_rate` |
//! | Button | 0/1 | - | sign of `linear_speed` |
//!
//! ## Turn Deadzone
//!
//! Centered turn values with magnitude strictly below `turn_deadzone` map to
//! zero. At or beyond the threshold the value is halved, so the output jumps
//! from 0 to `±turn_deadzone / 2` at the edge of the band and reaches about
//! ±1.0 at full deflection. There is no upper clamp.
//!
//! ## Usage
//!
//! ```
//! use teleop_joystick::config::NormalizationConfig;
//! use teleop_joystick::joystick::{CommandMapper, JoystickSample};
//!
//! let mapper = CommandMapper::new(NormalizationConfig::default());
//! let cmd = mapper.map(&JoystickSample::new(4095, 2048, false));
//!
//! assert_eq!(cmd.linear_speed, -1.0); // full reverse
//! assert_eq!(cmd.turn_rate, 0.0);     // centered
//! ```

use super::JoystickSample;
use crate::config::NormalizationConfig;

/// Velocity command produced for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct VelocityCommand {
    /// Signed forward speed as a fraction of full speed (-1.0 to 1.0).
    pub linear_speed: f32,
    /// Signed turn rate. Positive turns left.
    pub turn_rate: f32,
}

impl VelocityCommand {
    /// A command that holds the base still.
    pub const STOP: Self = Self {
        linear_speed: 0.0,
        turn_rate: 0.0,
    };
}

/// Stateless sample-to-command translation.
///
/// # Examples
///
/// ```
/// use teleop_joystick::config::NormalizationConfig;
/// use teleop_joystick::joystick::{CommandMapper, JoystickSample};
///
/// let mapper = CommandMapper::new(NormalizationConfig::default());
///
/// // Exactly on the deadzone edge resolves to the scaled branch
/// let cmd = mapper.map(&JoystickSample::new(0, 2560, true));
/// assert_eq!(cmd.turn_rate, 0.25);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CommandMapper {
    config: NormalizationConfig,
}

impl Default for CommandMapper {
    fn default() -> Self {
        Self::new(NormalizationConfig::default())
    }
}

impl CommandMapper {
    /// Creates a mapper with the given normalization constants.
    #[must_use]
    pub fn new(config: NormalizationConfig) -> Self {
        Self { config }
    }

    /// Returns the normalization constants in use.
    #[must_use]
    pub fn config(&self) -> &NormalizationConfig {
        &self.config
    }

    /// Maps one sample to a velocity command.
    ///
    /// Pure: the same sample always yields the same command.
    #[must_use]
    pub fn map(&self, sample: &JoystickSample) -> VelocityCommand {
        let fwd = self.forward_magnitude(sample.x_raw);
        let turn = self.centered_turn(sample.y_raw);

        let linear_speed = if sample.button { fwd } else { -fwd };

        VelocityCommand {
            linear_speed,
            turn_rate: self.apply_turn_deadzone(turn),
        }
    }

    /// Normalizes the x axis to 0.0..=1.0.
    ///
    /// Readings above `adc_max` are clamped so the speed never exceeds 1.0.
    #[inline]
    fn forward_magnitude(&self, x_raw: u16) -> f32 {
        let x = x_raw.min(self.config.adc_max);
        f32::from(x) / f32::from(self.config.adc_max)
    }

    /// Centers and scales the y axis.
    #[inline]
    fn centered_turn(&self, y_raw: u16) -> f32 {
        let y = y_raw.min(self.config.adc_max);
        (f32::from(y) - f32::from(self.config.y_center)) / f32::from(self.config.y_span)
    }

    /// Zeroes turns inside the dead band and halves the rest.
    #[inline]
    fn apply_turn_deadzone(&self, turn: f32) -> f32 {
        let deadzone = self.config.turn_deadzone;

        if turn >= 0.0 {
            if turn < deadzone {
                0.0
            } else {
                turn / 2.0
            }
        } else if turn > -deadzone {
            0.0
        } else {
            turn / 2.0
        }
    }
}

/// Maps a sample with explicit constants.
///
/// Convenience wrapper around [`CommandMapper::map`].
#[must_use]
pub fn map_sample(sample: &JoystickSample, config: &NormalizationConfig) -> VelocityCommand {
    CommandMapper::new(*config).map(sample)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapper() -> CommandMapper {
        CommandMapper::default()
    }

    fn assert_close(actual: f32, expected: f32) {
        assert!(
            (actual - expected).abs() < 1e-3,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    #[test]
    fn test_forward_full_throttle_centered() {
        let cmd = mapper().map(&JoystickSample::new(4095, 2048, true));
        assert_eq!(cmd.linear_speed, 1.0);
        assert_eq!(cmd.turn_rate, 0.0);
    }

    #[test]
    fn test_reverse_full_throttle_centered() {
        let cmd = mapper().map(&JoystickSample::new(4095, 2048, false));
        assert_eq!(cmd.linear_speed, -1.0);
        assert_eq!(cmd.turn_rate, 0.0);
    }

    #[test]
    fn test_zero_input() {
        let cmd = mapper().map(&JoystickSample::new(0, 2048, true));
        assert_eq!(cmd.linear_speed, 0.0);
        assert_eq!(cmd.turn_rate, 0.0);
        assert_eq!(cmd, VelocityCommand::STOP);
    }

    #[test]
    fn test_half_throttle() {
        let cmd = mapper().map(&JoystickSample::new(2048, 2048, true));
        assert_close(cmd.linear_speed, 0.5);
    }

    #[test]
    fn test_deadzone_interior() {
        // |y - 2048| < 512 means turn in (-0.5, 0.5)
        for y_raw in [1537, 1800, 2000, 2048, 2100, 2400, 2559] {
            for (x_raw, button) in [(0, true), (4095, true), (1234, false), (4095, false)] {
                let cmd = mapper().map(&JoystickSample::new(x_raw, y_raw, button));
                assert_eq!(cmd.turn_rate, 0.0, "y_raw {} should be in the deadzone", y_raw);
            }
        }
    }

    #[test]
    fn test_deadzone_boundary_positive() {
        // turn = 512 / 1024 = 0.5 exactly
        let cmd = mapper().map(&JoystickSample::new(0, 2560, true));
        assert_eq!(cmd.turn_rate, 0.25);
    }

    #[test]
    fn test_deadzone_boundary_negative() {
        // turn = -512 / 1024 = -0.5 exactly
        let cmd = mapper().map(&JoystickSample::new(0, 1536, true));
        assert_eq!(cmd.turn_rate, -0.25);
    }

    #[test]
    fn test_extreme_turn_right() {
        let cmd = mapper().map(&JoystickSample::new(0, 0, true));
        assert_eq!(cmd.turn_rate, -1.0);
    }

    #[test]
    fn test_extreme_turn_left() {
        let cmd = mapper().map(&JoystickSample::new(0, 4095, true));
        assert_close(cmd.turn_rate, 1.0);
        assert!(cmd.turn_rate < 1.0);
    }

    #[test]
    fn test_turn_identical_in_reverse() {
        for y_raw in [0, 1000, 1536, 2048, 2560, 3000, 4095] {
            let fwd = mapper().map(&JoystickSample::new(3000, y_raw, true));
            let rev = mapper().map(&JoystickSample::new(3000, y_raw, false));
            assert_eq!(fwd.turn_rate, rev.turn_rate);
            assert_eq!(fwd.linear_speed, -rev.linear_speed);
        }
    }

    #[test]
    fn test_sign_comes_only_from_button() {
        for x_raw in [0u16, 1, 100, 2048, 4095] {
            let fwd = mapper().map(&JoystickSample::new(x_raw, 2048, true));
            let rev = mapper().map(&JoystickSample::new(x_raw, 2048, false));
            assert!(fwd.linear_speed >= 0.0);
            assert!(rev.linear_speed <= 0.0);
        }
    }

    #[test]
    fn test_mapping_is_pure() {
        let m = mapper();
        for sample in [
            JoystickSample::new(0, 0, false),
            JoystickSample::new(1234, 2987, true),
            JoystickSample::new(4095, 4095, false),
        ] {
            let first = m.map(&sample);
            for _ in 0..10 {
                let again = m.map(&sample);
                assert_eq!(first.linear_speed.to_bits(), again.linear_speed.to_bits());
                assert_eq!(first.turn_rate.to_bits(), again.turn_rate.to_bits());
            }
        }
    }

    #[test]
    fn test_out_of_range_x_is_clamped() {
        let cmd = mapper().map(&JoystickSample::new(u16::MAX, 2048, true));
        assert_eq!(cmd.linear_speed, 1.0);

        let cmd = mapper().map(&JoystickSample::new(5000, 2048, false));
        assert_eq!(cmd.linear_speed, -1.0);
    }

    #[test]
    fn test_out_of_range_y_is_clamped() {
        let clamped = mapper().map(&JoystickSample::new(0, u16::MAX, true));
        let full = mapper().map(&JoystickSample::new(0, 4095, true));
        assert_eq!(clamped.turn_rate, full.turn_rate);
    }

    #[test]
    fn test_linear_speed_never_exceeds_one() {
        for x_raw in (0..=u16::MAX).step_by(97) {
            for button in [true, false] {
                let cmd = mapper().map(&JoystickSample::new(x_raw, 2048, button));
                assert!(cmd.linear_speed.abs() <= 1.0);
            }
        }
    }

    #[test]
    fn test_custom_deadzone() {
        let config = NormalizationConfig {
            turn_deadzone: 0.0,
            ..NormalizationConfig::default()
        };
        let cmd = map_sample(&JoystickSample::new(0, 2049, true), &config);
        assert!(cmd.turn_rate > 0.0);

        // Zero turn is on the boundary too and maps to zero / 2
        let cmd = map_sample(&JoystickSample::new(0, 2048, true), &config);
        assert_eq!(cmd.turn_rate, 0.0);
    }

    #[test]
    fn test_custom_ten_bit_adc() {
        let config = NormalizationConfig {
            adc_max: 1023,
            y_center: 512,
            y_span: 256,
            turn_deadzone: 0.5,
        };
        let cmd = map_sample(&JoystickSample::new(1023, 0, true), &config);
        assert_eq!(cmd.linear_speed, 1.0);
        assert_eq!(cmd.turn_rate, -1.0);
    }

    #[test]
    fn test_config_accessor() {
        let m = mapper();
        assert_eq!(m.config().adc_max, 4095);
    }
}
