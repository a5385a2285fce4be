//! Status report parsing
//!
//! Decodes one `liquidctl status --json` snapshot into typed device blocks.
//! Parsing is pure: the same input always yields an equal report.

use crate::error::UtilityError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One labeled measurement or control line reported by the utility
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusEntry {
    /// Line label, e.g. `"Fan 1 speed"`
    pub key: String,
    /// Numeric or string value; firmware lines report strings
    #[serde(default)]
    pub value: Value,
    /// Unit suffix, e.g. `"rpm"`, `"%"`, `"°C"`
    #[serde(default)]
    pub unit: String,
}

impl StatusEntry {
    /// Numeric view of the value, accepting numbers and numeric strings
    pub fn as_f64(&self) -> Option<f64> {
        match &self.value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

/// One device block within a status report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceStatus {
    /// Bus the device is attached to, e.g. `"hid"`
    #[serde(default)]
    pub bus: Option<String>,
    /// Hardware address, e.g. `"/dev/hidraw3"`
    #[serde(default)]
    pub address: Option<String>,
    /// Device display name as reported by the utility
    pub description: String,
    /// Ordered status lines; a device with none is valid
    #[serde(default)]
    pub status: Vec<StatusEntry>,
}

/// A full status snapshot: ordered device blocks
///
/// Device ordering follows the utility's output; an empty report means no
/// devices were detected and is valid.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusReport {
    pub devices: Vec<DeviceStatus>,
}

impl StatusReport {
    /// Parse raw JSON text into a report
    ///
    /// Unknown extra JSON fields are ignored for forward compatibility.
    ///
    /// # Errors
    /// Returns `UtilityError::MalformedStatus` if the JSON does not match
    /// the expected schema (missing required keys, wrong types).
    pub fn parse(raw: &str) -> Result<Self, UtilityError> {
        serde_json::from_str(raw).map_err(|e| UtilityError::MalformedStatus(e.to_string()))
    }

    /// Number of device blocks in the report
    pub fn len(&self) -> usize {
        self.devices.len()
    }

    /// Whether the report contains no devices
    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }
}
