//! # Teleop Joystick Library
//!
//! Drive a mobile robot base from an analog joystick and a mode button.
//!
//! This library provides the core functionality for sampling the joystick,
//! turning each sample into a velocity command, and publishing that command
//! at a fixed rate.

pub mod config;
pub mod error;
pub mod hardware;
pub mod joystick;
pub mod scheduler;
pub mod transport;
