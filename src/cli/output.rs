//! Output formatting utilities
//!
//! Provides table and JSON output formatting for CLI commands.

use crate::cli::args::OutputFormat;
use crate::domain::LiquidctlDevice;
use serde::Serialize;
use std::io::{self, Write};

/// Format and print output based on the selected format
pub fn print_output<T: Serialize + TableDisplay>(data: &T, format: OutputFormat) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();

    match format {
        OutputFormat::Table => {
            writeln!(handle, "{}", data.to_table())?;
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(data).unwrap_or_else(|_| "{}".to_string());
            writeln!(handle, "{}", json)?;
        }
        OutputFormat::Compact => {
            writeln!(handle, "{}", data.to_compact())?;
        }
    }

    Ok(())
}

/// Trait for types that can be displayed as a table
pub trait TableDisplay {
    /// Format as a table string
    fn to_table(&self) -> String;

    /// Format as a compact single line
    fn to_compact(&self) -> String {
        self.to_table().replace('\n', " | ")
    }
}

/// Device list entry for display
#[derive(Debug, Clone, Serialize)]
pub struct DeviceListEntry {
    pub index: usize,
    pub name: String,
    pub address: String,
    pub fans: usize,
    pub has_pump: bool,
    pub has_liquid_temperature: bool,
}

impl DeviceListEntry {
    /// Build a list entry from one device model
    pub fn from_device(index: usize, device: &LiquidctlDevice) -> Self {
        Self {
            index,
            name: device.name.clone(),
            address: device.device_key.clone(),
            fans: device.fan_speed_sensors.len(),
            has_pump: device.has_pump_duty,
            has_liquid_temperature: device.has_liquid_temperature,
        }
    }
}

impl TableDisplay for DeviceListEntry {
    fn to_table(&self) -> String {
        let mut capabilities = Vec::new();
        if self.fans > 0 {
            capabilities.push(format!("{} fans", self.fans));
        }
        if self.has_pump {
            capabilities.push("pump".to_string());
        }
        if self.has_liquid_temperature {
            capabilities.push("liquid temp".to_string());
        }
        if capabilities.is_empty() {
            capabilities.push("no recognized sensors".to_string());
        }

        format!(
            "[{}] {} ({}, {})",
            self.index,
            self.name,
            self.address,
            capabilities.join(", ")
        )
    }

    fn to_compact(&self) -> String {
        format!("{}:{}", self.index, self.name)
    }
}

/// Device list for display
#[derive(Debug, Clone, Serialize)]
pub struct DeviceList {
    pub devices: Vec<DeviceListEntry>,
}

impl TableDisplay for DeviceList {
    fn to_table(&self) -> String {
        let mut output = format!("Devices Found: {}\n\n", self.devices.len());
        for device in &self.devices {
            output.push_str(&device.to_table());
            output.push('\n');
        }
        output
    }

    fn to_compact(&self) -> String {
        self.devices
            .iter()
            .map(|d| d.to_compact())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// One sensor row for display
#[derive(Debug, Clone, Serialize)]
pub struct SensorRow {
    pub id: String,
    pub name: String,
    pub value: Option<f64>,
}

impl SensorRow {
    fn render_value(&self) -> String {
        match self.value {
            Some(v) => format!("{}", v),
            None => "-".to_string(),
        }
    }
}

/// All current readings for display
#[derive(Debug, Clone, Serialize)]
pub struct Readings {
    pub sensors: Vec<SensorRow>,
    pub controls: Vec<SensorRow>,
}

impl TableDisplay for Readings {
    fn to_table(&self) -> String {
        let mut output = String::new();

        output.push_str("Sensors:\n");
        for row in &self.sensors {
            output.push_str(&format!("  {}: {}\n", row.name, row.render_value()));
        }
        output.push_str("Controls:\n");
        for row in &self.controls {
            output.push_str(&format!("  {}: {}%\n", row.name, row.render_value()));
        }

        output
    }

    fn to_compact(&self) -> String {
        self.sensors
            .iter()
            .chain(self.controls.iter())
            .map(|r| format!("{}={}", r.name, r.render_value()))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Simple message output
#[derive(Debug, Clone, Serialize)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl TableDisplay for Message {
    fn to_table(&self) -> String {
        self.message.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::liquidctl::StatusReport;
    use crate::mock::{FAN_STATUS_JSON, PUMP_STATUS_JSON};

    fn entry(raw: &str) -> DeviceListEntry {
        let report = StatusReport::parse(raw).unwrap();
        let device = LiquidctlDevice::from_status(&report.devices[0], 0);
        DeviceListEntry::from_device(0, &device)
    }

    #[test]
    fn test_device_entry_table_lists_capabilities() {
        let fan = entry(FAN_STATUS_JSON);
        assert!(fan.to_table().contains("3 fans"));
        assert!(!fan.to_table().contains("pump"));

        let pump = entry(PUMP_STATUS_JSON);
        assert!(pump.to_table().contains("pump"));
        assert!(pump.to_table().contains("liquid temp"));
    }

    #[test]
    fn test_readings_table_renders_missing_values() {
        let readings = Readings {
            sensors: vec![SensorRow {
                id: "x-fanRPM1".to_string(),
                name: "Fan 1 - X".to_string(),
                value: None,
            }],
            controls: vec![],
        };
        assert!(readings.to_table().contains("Fan 1 - X: -"));
    }

    #[test]
    fn test_compact_joins_rows() {
        let readings = Readings {
            sensors: vec![SensorRow {
                id: "x-fanRPM1".to_string(),
                name: "Fan 1 - X".to_string(),
                value: Some(1200.0),
            }],
            controls: vec![SensorRow {
                id: "x-fanCtrl1".to_string(),
                name: "Fan Control 1 - X".to_string(),
                value: Some(40.0),
            }],
        };
        let compact = readings.to_compact();
        assert!(compact.contains("Fan 1 - X=1200"));
        assert!(compact.contains("Fan Control 1 - X=40"));
    }
}
