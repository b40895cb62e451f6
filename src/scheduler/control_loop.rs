//! # Control Loop
//!
//! Runs one sample → map → publish sequence per timer firing.
//!
//! ## Error Handling
//!
//! | Failure | Policy |
//! |---------|--------|
//! | Hardware read | [`HardwareFaultPolicy::FailFast`]: loop stops, error returned |
//! | Hardware read | [`HardwareFaultPolicy::SkipTick`]: logged, tick skipped |
//! | Publish | Logged, tick counts as done, next tick publishes again |
//!
//! ## Concurrency
//!
//! The loop runs on a single task. Timer callbacks never overlap, and the
//! outbound [`Twist`] is owned by the loop and overwritten on every tick.

use std::future::Future;
use std::time::Duration;

use tokio::time::{interval, Instant, MissedTickBehavior};
use tracing::{debug, error, info, warn};

use super::timer::TickTimer;
use crate::config::{HardwareFaultPolicy, SchedulerConfig};
use crate::error::Result;
use crate::joystick::{AnalogInput, CommandMapper, DigitalInput, Sampler, VelocityCommand};
use crate::transport::{Publisher, Twist};

/// What happened during one timer callback.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// Command computed and published.
    Published(VelocityCommand),
    /// Command computed, publish failed (logged and ignored).
    PublishFailed(VelocityCommand),
    /// Joystick read failed under [`HardwareFaultPolicy::SkipTick`].
    HardwareFault,
    /// No timer was passed to the callback; nothing was done.
    Skipped,
}

/// Counters kept by the control loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoopStats {
    /// Callbacks that ran the full sequence or hit a hardware fault.
    pub ticks: u64,
    /// Successful publishes.
    pub published: u64,
    /// Failed publishes.
    pub publish_failures: u64,
    /// Hardware reads that failed (skip-tick policy only).
    pub hardware_faults: u64,
    /// Callbacks without a timer.
    pub skipped: u64,
}

/// Periodic joystick-to-velocity control loop.
pub struct ControlLoop<A, D, P> {
    sampler: Sampler<A, D>,
    mapper: CommandMapper,
    publisher: P,
    topic: String,
    message: Twist,
    fault_policy: HardwareFaultPolicy,
    status_log_interval: u64,
    stats: LoopStats,
}

impl<A, D, P> ControlLoop<A, D, P>
where
    A: AnalogInput,
    D: DigitalInput,
    P: Publisher,
{
    /// Creates a loop publishing on `topic`.
    ///
    /// The outbound message starts zeroed.
    pub fn new(
        sampler: Sampler<A, D>,
        mapper: CommandMapper,
        publisher: P,
        topic: impl Into<String>,
    ) -> Self {
        Self {
            sampler,
            mapper,
            publisher,
            topic: topic.into(),
            message: Twist::default(),
            fault_policy: HardwareFaultPolicy::default(),
            status_log_interval: 60,
            stats: LoopStats::default(),
        }
    }

    /// Sets the hardware fault policy.
    #[must_use]
    pub fn with_fault_policy(mut self, policy: HardwareFaultPolicy) -> Self {
        self.fault_policy = policy;
        self
    }

    /// Sets how many ticks pass between status log lines (0 disables them).
    #[must_use]
    pub fn with_status_log_interval(mut self, ticks: u64) -> Self {
        self.status_log_interval = ticks;
        self
    }

    /// Counters so far.
    pub fn stats(&self) -> LoopStats {
        self.stats
    }

    /// The last message handed to the publisher.
    pub fn message(&self) -> &Twist {
        &self.message
    }

    /// The publisher.
    pub fn publisher(&self) -> &P {
        &self.publisher
    }

    /// Timer callback.
    ///
    /// Runs exactly one sample → map → publish sequence. A `None` timer is a
    /// no-op.
    ///
    /// # Errors
    ///
    /// Returns the hardware error under [`HardwareFaultPolicy::FailFast`].
    /// Publish failures never produce an error.
    pub async fn on_timer(&mut self, timer: Option<&TickTimer>) -> Result<TickOutcome> {
        if timer.is_none() {
            self.stats.skipped += 1;
            return Ok(TickOutcome::Skipped);
        }

        self.stats.ticks += 1;

        let sample = match self.sampler.read() {
            Ok(sample) => sample,
            Err(e) => match self.fault_policy {
                HardwareFaultPolicy::FailFast => {
                    error!("Joystick read failed, stopping control loop: {}", e);
                    return Err(e);
                }
                HardwareFaultPolicy::SkipTick => {
                    warn!("Joystick read failed, skipping tick: {}", e);
                    self.stats.hardware_faults += 1;
                    self.log_status();
                    return Ok(TickOutcome::HardwareFault);
                }
            },
        };

        let command = self.mapper.map(&sample);
        self.message.apply(&command);

        let outcome = match self.publisher.publish(&self.topic, &self.message).await {
            Ok(()) => {
                self.stats.published += 1;
                debug!(
                    "Published linear.x={:.3} angular.z={:.3}",
                    command.linear_speed, command.turn_rate
                );
                TickOutcome::Published(command)
            }
            Err(e) => {
                self.stats.publish_failures += 1;
                warn!("Publish failed, continuing: {}", e);
                TickOutcome::PublishFailed(command)
            }
        };

        self.log_status();

        Ok(outcome)
    }

    /// Whether the current tick count lands on a status log line.
    fn should_log_status(&self) -> bool {
        self.status_log_interval > 0
            && self.stats.ticks > 0
            && self.stats.ticks % self.status_log_interval == 0
    }

    fn log_status(&self) {
        if self.should_log_status() {
            info!(
                "{} ticks: {} published, {} publish failures, {} hardware faults",
                self.stats.ticks,
                self.stats.published,
                self.stats.publish_failures,
                self.stats.hardware_faults
            );
        }
    }

    /// Runs the loop until `shutdown` completes.
    ///
    /// The timer is polled every `poll_interval_ms` and fires every
    /// `tick_period_ms`. After each callback the task yields once.
    ///
    /// # Errors
    ///
    /// Returns a hardware error under [`HardwareFaultPolicy::FailFast`].
    pub async fn run<F>(mut self, scheduler: &SchedulerConfig, shutdown: F) -> Result<LoopStats>
    where
        F: Future<Output = ()>,
    {
        let period = Duration::from_millis(scheduler.tick_period_ms);
        let poll_period = Duration::from_millis(scheduler.poll_interval_ms);

        let mut timer = TickTimer::new(period, Instant::now());
        let mut poll = interval(poll_period);
        poll.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(
            "Publishing on {} every {}ms (polling every {}ms)",
            self.topic, scheduler.tick_period_ms, scheduler.poll_interval_ms
        );

        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = poll.tick() => {
                    let now = Instant::now();
                    if !timer.is_ready(now) {
                        continue;
                    }

                    if let Some(since_last) = timer.call(now) {
                        debug!("Timer fired {}ms after previous", since_last.as_millis());
                    }

                    self.on_timer(Some(&timer)).await?;
                    tokio::task::yield_now().await;
                }

                _ = &mut shutdown => {
                    info!("Control loop stopping");
                    break;
                }
            }
        }

        Ok(self.stats)
    }
}
