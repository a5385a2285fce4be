//! Status command implementation
//!
//! Prints one snapshot of all recognized sensor readings.

use crate::cli::args::OutputFormat;
use crate::cli::output::{print_output, Readings, SensorRow};
use crate::commands::build_executor;
use crate::config::Config;
use crate::domain::LiquidctlDevice;
use crate::error::{AppError, Result};
use crate::liquidctl::{LiquidctlExecutor, StatusReport};

/// Execute the status command
pub fn run_status(config: &Config, exe: Option<&str>, format: OutputFormat) -> Result<()> {
    let executor = build_executor(config, exe);
    let raw = executor.status()?;
    let report = StatusReport::parse(&raw)?;

    if report.is_empty() {
        return Err(AppError::NoDevicesFound);
    }

    let mut sensors = Vec::new();
    let mut controls = Vec::new();

    for (index, status) in report.devices.iter().enumerate() {
        let device = LiquidctlDevice::from_status(status, index);

        for sample in &device.fan_speed_sensors {
            sensors.push(SensorRow {
                id: sample.id.clone(),
                name: sample.name.clone(),
                value: sample.value,
            });
        }
        if let Some(sample) = &device.pump_speed_sensor {
            sensors.push(SensorRow {
                id: sample.id.clone(),
                name: sample.name.clone(),
                value: sample.value,
            });
        }
        if let Some(sample) = &device.liquid_temperature_sensor {
            sensors.push(SensorRow {
                id: sample.id.clone(),
                name: sample.name.clone(),
                value: sample.value,
            });
        }

        for sample in &device.fan_control_sensors {
            controls.push(SensorRow {
                id: sample.id.clone(),
                name: sample.name.clone(),
                value: sample.duty,
            });
        }
        if let Some(sample) = &device.pump_duty_controller {
            controls.push(SensorRow {
                id: sample.id.clone(),
                name: sample.name.clone(),
                value: sample.duty,
            });
        }
    }

    print_output(&Readings { sensors, controls }, format)?;
    Ok(())
}
