//! Mock implementations for testing
//!
//! Provides a scriptable liquidctl executor for unit testing without
//! spawning real processes.

use crate::domain::DutyCycle;
use crate::error::UtilityError;
use crate::liquidctl::LiquidctlExecutor;

use std::sync::{Mutex, PoisonError};

/// Fan-only fixture: three channels at 40% duty
pub const FAN_STATUS_JSON: &str = r#"[
    {
        "bus": "hid",
        "address": "/dev/hidraw1",
        "description": "NZXT RGB & Fan Controller (3+6 channels)",
        "status": [
            {"key": "Fan 1 speed", "value": 1205, "unit": "rpm"},
            {"key": "Fan 1 duty", "value": 40, "unit": "%"},
            {"key": "Fan 2 speed", "value": 1198, "unit": "rpm"},
            {"key": "Fan 2 duty", "value": 40, "unit": "%"},
            {"key": "Fan 3 speed", "value": 1210, "unit": "rpm"},
            {"key": "Fan 3 duty", "value": 40, "unit": "%"}
        ]
    }
]"#;

/// The same controller after the duty was raised to 100%
pub const FAN_STATUS_FULL_JSON: &str = r#"[
    {
        "bus": "hid",
        "address": "/dev/hidraw1",
        "description": "NZXT RGB & Fan Controller (3+6 channels)",
        "status": [
            {"key": "Fan 1 speed", "value": 2005, "unit": "rpm"},
            {"key": "Fan 1 duty", "value": 100, "unit": "%"},
            {"key": "Fan 2 speed", "value": 1996, "unit": "rpm"},
            {"key": "Fan 2 duty", "value": 100, "unit": "%"},
            {"key": "Fan 3 speed", "value": 2011, "unit": "rpm"},
            {"key": "Fan 3 duty", "value": 100, "unit": "%"}
        ]
    }
]"#;

/// Pump/liquid fixture with no fan channels
pub const PUMP_STATUS_JSON: &str = r#"[
    {
        "bus": "hid",
        "address": "/dev/hidraw2",
        "description": "NZXT Kraken Pump",
        "status": [
            {"key": "Liquid temperature", "value": 28.5, "unit": "°C"},
            {"key": "Pump speed", "value": 2310, "unit": "rpm"},
            {"key": "Pump duty", "value": 60, "unit": "%"},
            {"key": "Firmware version", "value": "6.0.2", "unit": ""}
        ]
    }
]"#;

/// One recorded set-duty invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetCall {
    pub address: String,
    pub channel: String,
    pub duty: u8,
}

/// Scriptable liquidctl executor
///
/// Returns canned JSON from `status`, records every set-duty call, and can
/// be told to fail any operation.
pub struct MockExecutor {
    version: String,
    status_json: Mutex<String>,
    fail_probe: Mutex<bool>,
    fail_status: Mutex<bool>,
    fail_writes: Mutex<bool>,
    set_calls: Mutex<Vec<SetCall>>,
    status_calls: Mutex<u32>,
}

impl MockExecutor {
    /// Create a mock executor serving the given status JSON
    pub fn new(status_json: &str) -> Self {
        Self {
            version: "liquidctl v1.13.0".to_string(),
            status_json: Mutex::new(status_json.to_string()),
            fail_probe: Mutex::new(false),
            fail_status: Mutex::new(false),
            fail_writes: Mutex::new(false),
            set_calls: Mutex::new(Vec::new()),
            status_calls: Mutex::new(0),
        }
    }

    /// Builder: set the probed version string
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Replace the canned status JSON
    pub fn set_status_json(&self, json: &str) {
        *lock(&self.status_json) = json.to_string();
    }

    /// Make `probe` fail with an unreachable error
    pub fn set_fail_probe(&self, fail: bool) {
        *lock(&self.fail_probe) = fail;
    }

    /// Make `status` fail with a command error
    pub fn set_fail_status(&self, fail: bool) {
        *lock(&self.fail_status) = fail;
    }

    /// Make `set_duty` fail with a command error
    pub fn set_fail_writes(&self, fail: bool) {
        *lock(&self.fail_writes) = fail;
    }

    /// All recorded set-duty calls, in order
    pub fn set_calls(&self) -> Vec<SetCall> {
        lock(&self.set_calls).clone()
    }

    /// Number of status queries served so far
    pub fn status_calls(&self) -> u32 {
        *lock(&self.status_calls)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl LiquidctlExecutor for MockExecutor {
    fn probe(&self) -> Result<String, UtilityError> {
        if *lock(&self.fail_probe) {
            return Err(UtilityError::Unreachable("mock probe failure".to_string()));
        }
        Ok(self.version.clone())
    }

    fn initialize_all(&self) -> Result<(), UtilityError> {
        if *lock(&self.fail_probe) {
            return Err(UtilityError::Unreachable("mock probe failure".to_string()));
        }
        Ok(())
    }

    fn status(&self) -> Result<String, UtilityError> {
        *lock(&self.status_calls) += 1;
        if *lock(&self.fail_status) {
            return Err(UtilityError::CommandFailed {
                status: 1,
                stderr: "mock status failure".to_string(),
            });
        }
        Ok(lock(&self.status_json).clone())
    }

    fn set_duty(
        &self,
        address: &str,
        channel: &str,
        duty: DutyCycle,
    ) -> Result<(), UtilityError> {
        if *lock(&self.fail_writes) {
            return Err(UtilityError::CommandFailed {
                status: 1,
                stderr: "mock write failure".to_string(),
            });
        }
        lock(&self.set_calls).push(SetCall {
            address: address.to_string(),
            channel: channel.to_string(),
            duty: duty.as_percentage(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_probe() {
        let exec = MockExecutor::new("[]").with_version("liquidctl v1.12.1");
        assert_eq!(exec.probe().unwrap(), "liquidctl v1.12.1");

        exec.set_fail_probe(true);
        assert!(exec.probe().is_err());
    }

    #[test]
    fn test_mock_status_counts_calls() {
        let exec = MockExecutor::new("[]");
        assert_eq!(exec.status().unwrap(), "[]");
        exec.set_status_json(FAN_STATUS_JSON);
        assert_eq!(exec.status().unwrap(), FAN_STATUS_JSON);
        assert_eq!(exec.status_calls(), 2);
    }

    #[test]
    fn test_mock_records_writes() {
        let exec = MockExecutor::new("[]");
        exec.set_duty("/dev/hidraw1", "fan2", DutyCycle::new(75).unwrap())
            .unwrap();

        let calls = exec.set_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].channel, "fan2");
        assert_eq!(calls[0].duty, 75);
    }

    #[test]
    fn test_mock_write_failure() {
        let exec = MockExecutor::new("[]");
        exec.set_fail_writes(true);
        let result = exec.set_duty("/dev/hidraw1", "fan1", DutyCycle::new(50).unwrap());
        assert!(matches!(result, Err(UtilityError::CommandFailed { .. })));
        assert!(exec.set_calls().is_empty());
    }
}
