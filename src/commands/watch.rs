//! Watch command implementation
//!
//! Loads the sensor set once, then polls and prints reconciled readings on
//! a fixed cadence. Poll failures are logged and retried on the next tick.

use crate::cli::args::{OutputFormat, WatchArgs};
use crate::cli::output::{print_output, Readings, SensorRow};
use crate::commands::build_executor;
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::liquidctl::LiquidctlExecutor;
use crate::plugin::{LiquidctlPlugin, SensorContainer};

use std::sync::Arc;
use std::time::Duration;

/// Execute the watch command
pub fn run_watch(
    args: &WatchArgs,
    config: &Config,
    exe: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    let executor: Arc<dyn LiquidctlExecutor> = Arc::new(build_executor(config, exe));
    let mut plugin = LiquidctlPlugin::new(executor);
    plugin.initialize();

    let mut container = SensorContainer::default();
    plugin.load(&mut container);

    if container.fan_sensors.is_empty() && container.control_sensors.is_empty() {
        return Err(AppError::NoDevicesFound);
    }

    let interval = Duration::from_secs(
        args.interval
            .unwrap_or(config.poll.interval_seconds)
            .max(1),
    );

    loop {
        print_output(&readings_of(&container), format)?;

        if args.single_use {
            log::info!("Single-use mode: exiting after one poll");
            break;
        }

        std::thread::sleep(interval);
        plugin.update();
    }

    Ok(())
}

fn readings_of(container: &SensorContainer) -> Readings {
    Readings {
        sensors: container
            .fan_sensors
            .iter()
            .map(|s| SensorRow {
                id: s.id().to_string(),
                name: s.name().to_string(),
                value: s.value(),
            })
            .collect(),
        controls: container
            .control_sensors
            .iter()
            .map(|c| SensorRow {
                id: c.id().to_string(),
                name: c.name().to_string(),
                value: c.value(),
            })
            .collect(),
    }
}
