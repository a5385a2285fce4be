//! Per-poll device model
//!
//! One `LiquidctlDevice` is rebuilt from every status snapshot. It classifies
//! which capabilities a device block reports and derives the stable sensor
//! identifiers and display names the live objects are keyed by.

use crate::domain::line::LineKind;
use crate::liquidctl::status::DeviceStatus;
use std::collections::HashMap;

/// Where a control write lands: one channel of one device
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteTarget {
    /// Hardware address of the owning device
    pub address: String,
    /// liquidctl channel name, e.g. `fan1` or `pump`
    pub channel: String,
}

/// One reading sensor derived from a status snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct SensorSample {
    /// Stable identifier, reproducible across polls
    pub id: String,
    /// Human-readable display name
    pub name: String,
    /// Unit-stripped reading, if the line carried a numeric value
    pub value: Option<f64>,
}

/// One control point derived from a status snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct ControlSample {
    /// Stable identifier, reproducible across polls
    pub id: String,
    /// Human-readable display name
    pub name: String,
    /// Last observed duty readback, if reported
    pub duty: Option<f64>,
    /// Write destination for this control
    pub target: WriteTarget,
}

/// Capabilities and sensors of one device, derived from one device block
///
/// Capability flags depend solely on which status-line patterns matched;
/// fans and pump/liquid sensors may coexist on the same device.
#[derive(Debug, Clone, PartialEq)]
pub struct LiquidctlDevice {
    /// Device display name as reported by the utility
    pub name: String,
    /// Identity prefix: hardware address, or `bus:index` when absent
    pub device_key: String,
    pub has_fan_speed: bool,
    pub has_pump_duty: bool,
    pub has_liquid_temperature: bool,
    /// Fan rpm sensors in encounter order; always paired 1:1 with controls
    pub fan_speed_sensors: Vec<SensorSample>,
    pub fan_control_sensors: Vec<ControlSample>,
    pub pump_speed_sensor: Option<SensorSample>,
    pub pump_duty_controller: Option<ControlSample>,
    pub liquid_temperature_sensor: Option<SensorSample>,
}

impl LiquidctlDevice {
    /// Build the device model from one parsed device block
    ///
    /// Pure: scans the status lines once and classifies each by pattern.
    /// A block with zero recognized lines yields a device with all
    /// capability flags false and empty sensor lists.
    pub fn from_status(status: &DeviceStatus, device_index: usize) -> Self {
        let name = status.description.trim().to_string();
        let device_key = match status.address.as_deref() {
            Some(addr) if !addr.is_empty() => addr.to_string(),
            _ => format!(
                "{}:{}",
                status.bus.as_deref().unwrap_or("unknown"),
                device_index
            ),
        };

        // Fan channels in encounter order; a channel mentioned by either a
        // speed or a duty line yields a full (sensor, control) pair so the
        // pairing invariant holds on all inputs.
        let mut fan_channels: Vec<u8> = Vec::new();
        let mut fan_speeds: HashMap<u8, f64> = HashMap::new();
        let mut fan_duties: HashMap<u8, f64> = HashMap::new();
        let mut has_fan_speed = false;

        let mut has_pump_speed = false;
        let mut pump_speed: Option<f64> = None;
        let mut has_pump_duty = false;
        let mut pump_duty: Option<f64> = None;
        let mut has_liquid_temperature = false;
        let mut liquid_temp: Option<f64> = None;

        for entry in &status.status {
            match LineKind::classify(&entry.key) {
                LineKind::FanSpeed(channel) => {
                    has_fan_speed = true;
                    if !fan_channels.contains(&channel) {
                        fan_channels.push(channel);
                    }
                    if let Some(v) = entry.as_f64() {
                        fan_speeds.insert(channel, v);
                    }
                }
                LineKind::FanDuty(channel) => {
                    if !fan_channels.contains(&channel) {
                        fan_channels.push(channel);
                    }
                    if let Some(v) = entry.as_f64() {
                        fan_duties.insert(channel, v);
                    }
                }
                LineKind::PumpSpeed => {
                    has_pump_speed = true;
                    pump_speed = entry.as_f64().or(pump_speed);
                }
                LineKind::PumpDuty => {
                    has_pump_duty = true;
                    pump_duty = entry.as_f64().or(pump_duty);
                }
                LineKind::LiquidTemp => {
                    has_liquid_temperature = true;
                    liquid_temp = entry.as_f64().or(liquid_temp);
                }
                LineKind::Unrecognized => {}
            }
        }

        let mut fan_speed_sensors = Vec::with_capacity(fan_channels.len());
        let mut fan_control_sensors = Vec::with_capacity(fan_channels.len());
        for (i, channel) in fan_channels.iter().enumerate() {
            let index = i + 1;
            fan_speed_sensors.push(SensorSample {
                id: format!("{}-fanRPM{}", device_key, index),
                name: format!("Fan {} - {}", index, name),
                value: fan_speeds.get(channel).copied(),
            });
            fan_control_sensors.push(ControlSample {
                id: format!("{}-fanCtrl{}", device_key, index),
                name: format!("Fan Control {} - {}", index, name),
                duty: fan_duties.get(channel).copied(),
                target: WriteTarget {
                    address: device_key.clone(),
                    channel: format!("fan{}", channel),
                },
            });
        }

        let pump_speed_sensor = has_pump_speed.then(|| SensorSample {
            id: format!("{}-pumpRPM", device_key),
            name: format!("Pump - {}", name),
            value: pump_speed,
        });
        let pump_duty_controller = has_pump_duty.then(|| ControlSample {
            id: format!("{}-pumpCtrl", device_key),
            name: format!("Pump Control - {}", name),
            duty: pump_duty,
            target: WriteTarget {
                address: device_key.clone(),
                channel: "pump".to_string(),
            },
        });
        let liquid_temperature_sensor = has_liquid_temperature.then(|| SensorSample {
            id: format!("{}-liquidTemp", device_key),
            name: format!("Liquid Temp. - {}", name),
            value: liquid_temp,
        });

        Self {
            name,
            device_key,
            has_fan_speed,
            has_pump_duty,
            has_liquid_temperature,
            fan_speed_sensors,
            fan_control_sensors,
            pump_speed_sensor,
            pump_duty_controller,
            liquid_temperature_sensor,
        }
    }

    /// Total number of reading sensors on this device
    pub fn sensor_count(&self) -> usize {
        self.fan_speed_sensors.len()
            + usize::from(self.pump_speed_sensor.is_some())
            + usize::from(self.liquid_temperature_sensor.is_some())
    }

    /// Total number of control points on this device
    pub fn control_count(&self) -> usize {
        self.fan_control_sensors.len() + usize::from(self.pump_duty_controller.is_some())
    }
}
