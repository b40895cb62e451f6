//! # Scheduler Module
//!
//! Fixed-period control loop.
//!
//! This module handles:
//! - A periodic [`TickTimer`] pumped at a shorter polling interval
//! - The per-tick sample → map → publish sequence in [`ControlLoop`]
//! - Hardware fault policy (fail fast or skip the tick)
//! - Loop statistics and periodic status logging

pub mod control_loop;
pub mod timer;

pub use control_loop::{ControlLoop, LoopStats, TickOutcome};
pub use timer::TickTimer;
