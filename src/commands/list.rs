//! List command implementation
//!
//! Shows detected devices and which capabilities each reports.

use crate::cli::args::OutputFormat;
use crate::cli::output::{print_output, DeviceList, DeviceListEntry};
use crate::commands::build_executor;
use crate::config::Config;
use crate::domain::LiquidctlDevice;
use crate::error::{AppError, Result};
use crate::liquidctl::{LiquidctlExecutor, StatusReport};

/// Execute the list command
pub fn run_list(config: &Config, exe: Option<&str>, format: OutputFormat) -> Result<()> {
    let executor = build_executor(config, exe);
    let raw = executor.status()?;
    let report = StatusReport::parse(&raw)?;

    if report.is_empty() {
        return Err(AppError::NoDevicesFound);
    }

    let devices = report
        .devices
        .iter()
        .enumerate()
        .map(|(index, status)| {
            let device = LiquidctlDevice::from_status(status, index);
            DeviceListEntry::from_device(index, &device)
        })
        .collect();

    print_output(&DeviceList { devices }, format)?;
    Ok(())
}
