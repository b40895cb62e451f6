//! # Teleop Joystick
//!
//! Drive a mobile robot base from an analog joystick and a mode button.
//!
//! This application samples the joystick once per tick and publishes a
//! `Twist` velocity command on the configured topic.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use teleop_joystick::config::{Config, PublisherKind};
use teleop_joystick::hardware::{IioAdc, SysfsGpio};
use teleop_joystick::joystick::{CommandMapper, JoystickChannels, Sampler};
use teleop_joystick::scheduler::{ControlLoop, LoopStats};
use teleop_joystick::transport::{ConsolePublisher, Publisher, SerialPublisher};

/// Environment variable holding the configuration file path
const CONFIG_ENV_VAR: &str = "TELEOP_CONFIG";

/// Configuration file used when the environment variable is not set
const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Log filter used when `RUST_LOG` is unset or unparsable
const DEFAULT_LOG_FILTER: &str = "info";

/// Main entry point for the teleop controller
///
/// # Control Flow
///
/// 1. **Initialization**
///    - Set up logging with tracing subscriber (stderr, non-blocking)
///    - Load configuration (`$TELEOP_CONFIG`, `config/default.toml`, or defaults)
///    - Open the ADC and GPIO, switch the status LED off
///    - Open the publisher (serial link or console)
///
/// 2. **Main Loop**
///    - Every tick: sample joystick, map to a velocity command, publish
///    - Publish failures are logged and the loop keeps going
///    - Joystick read failures stop the loop unless `hardware_fault = "skip_tick"`
///
/// 3. **Graceful Shutdown**
///    - Ctrl+C stops the loop and the totals are logged
///
/// # Errors
///
/// Returns error if:
/// - Configuration cannot be loaded or is invalid
/// - The ADC device or serial link cannot be opened
/// - A joystick read fails under the fail-fast policy
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Initialize logging
    let (writer, _guard) = tracing_appender::non_blocking(std::io::stderr());
    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_env_filter(log_filter())
        .init();

    info!("Teleop joystick v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = load_config()?;

    // Joystick hardware
    let adc = IioAdc::open(&config.hardware.adc_device)
        .with_context(|| format!("opening ADC at {}", config.hardware.adc_device))?;
    let gpio = SysfsGpio::new(&config.hardware.gpio_root);

    if let Some(pin) = config.hardware.status_led_pin {
        if let Err(e) = gpio.reset_status_led(pin) {
            warn!("Could not switch status LED off: {}", e);
        }
    }

    let sampler = Sampler::new(adc, gpio, JoystickChannels::from(&config.hardware));
    let mapper = CommandMapper::new(config.normalization);

    info!(
        "Node {} publishing on {}",
        config.publisher.node_name, config.publisher.topic
    );

    let stats = match config.publisher.kind {
        PublisherKind::Serial => {
            let publisher =
                SerialPublisher::open(&config.publisher.port, config.publisher.baud_rate)?;
            info!("Serial link opened at: {}", publisher.device_path());
            run(sampler, mapper, publisher, &config).await?
        }
        PublisherKind::Console => {
            let publisher = ConsolePublisher::stdout(config.publisher.node_name.clone());
            run(sampler, mapper, publisher, &config).await?
        }
    };

    info!(
        "Total: {} ticks, {} published, {} publish failures, {} hardware faults",
        stats.ticks, stats.published, stats.publish_failures, stats.hardware_faults
    );

    Ok(())
}

/// Load configuration from `$TELEOP_CONFIG`, the default path, or defaults
fn load_config() -> Result<Config> {
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        info!("Loading configuration from {}", path);
        return Config::load(&path).with_context(|| format!("loading {}", path));
    }

    if Path::new(DEFAULT_CONFIG_PATH).exists() {
        info!("Loading configuration from {}", DEFAULT_CONFIG_PATH);
        return Config::load(DEFAULT_CONFIG_PATH)
            .with_context(|| format!("loading {}", DEFAULT_CONFIG_PATH));
    }

    info!("No configuration file found, using defaults");
    Ok(Config::default())
}

async fn run<P: Publisher>(
    sampler: Sampler<IioAdc, SysfsGpio>,
    mapper: CommandMapper,
    publisher: P,
    config: &Config,
) -> teleop_joystick::error::Result<LoopStats> {
    info!("Press Ctrl+C to exit");

    ControlLoop::new(sampler, mapper, publisher, config.publisher.topic.clone())
        .with_fault_policy(config.scheduler.hardware_fault)
        .with_status_log_interval(config.scheduler.status_log_interval_ticks)
        .run(&config.scheduler, shutdown_signal())
        .await
}

/// Resolves on Ctrl+C
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received Ctrl+C, shutting down..."),
        Err(e) => {
            warn!("Could not listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    }
}

/// Builds the log filter from `RUST_LOG`, falling back to `info`.
fn log_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}
