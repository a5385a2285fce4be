//! Live sensor objects and the identity registry
//!
//! Sensor objects are created once at load time and mutated in place by
//! every poll, so identity held by the host stays valid across cycles. The
//! registry writes fresh values through stable ids instead of replacing
//! entries.

use crate::domain::{DutyCycle, WriteTarget};
use crate::error::Result;
use crate::plugin::writer::WriteCoordinator;

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// A reading sensor: fan rpm, pump rpm, or liquid temperature
pub struct Sensor {
    id: String,
    name: String,
    value: RwLock<Option<f64>>,
}

impl Sensor {
    pub(crate) fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        value: Option<f64>,
    ) -> Arc<Self> {
        Arc::new(Self {
            id: id.into(),
            name: name.into(),
            value: RwLock::new(value),
        })
    }

    /// Stable identifier, reproducible across polls
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Human-readable display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Last value set by a poll reconciliation
    pub fn value(&self) -> Option<f64> {
        *self.value.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Overwrite the reading in place; `None` retains the previous value
    pub(crate) fn set_value(&self, value: Option<f64>) {
        if let Some(v) = value {
            *self.value.write().unwrap_or_else(PoisonError::into_inner) = Some(v);
        }
    }
}

/// A writable duty-cycle control point with a duty readback
pub struct ControlSensor {
    id: String,
    name: String,
    value: RwLock<Option<f64>>,
    target: WriteTarget,
    writer: Arc<WriteCoordinator>,
}

impl ControlSensor {
    pub(crate) fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        value: Option<f64>,
        target: WriteTarget,
        writer: Arc<WriteCoordinator>,
    ) -> Arc<Self> {
        Arc::new(Self {
            id: id.into(),
            name: name.into(),
            value: RwLock::new(value),
            target,
            writer,
        })
    }

    /// Stable identifier, reproducible across polls
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Human-readable display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Last duty readback observed by a poll
    pub fn value(&self) -> Option<f64> {
        *self.value.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Write destination for this control point
    pub fn target(&self) -> &WriteTarget {
        &self.target
    }

    /// Request a new duty cycle for this control point
    ///
    /// The set-point is validated before any subprocess is invoked; the call
    /// then blocks on the write coordinator until the command completes.
    /// The sensor's own value is not updated here: hardware duty changes are
    /// observed by a later poll, never assumed.
    pub fn set(&self, duty: u8) -> Result<()> {
        let duty = DutyCycle::new(duty)?;
        self.writer.apply(&self.target, duty)
    }

    pub(crate) fn set_value(&self, value: Option<f64>) {
        if let Some(v) = value {
            *self.value.write().unwrap_or_else(PoisonError::into_inner) = Some(v);
        }
    }
}

/// Arena keyed by stable identifier owning the canonical sensor objects
#[derive(Default)]
pub struct SensorRegistry {
    sensors: HashMap<String, Arc<Sensor>>,
    controls: HashMap<String, Arc<ControlSensor>>,
}

impl SensorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert_sensor(&mut self, sensor: Arc<Sensor>) {
        self.sensors.insert(sensor.id().to_string(), sensor);
    }

    pub(crate) fn insert_control(&mut self, control: Arc<ControlSensor>) {
        self.controls.insert(control.id().to_string(), control);
    }

    /// Look up a reading sensor by id
    pub fn sensor(&self, id: &str) -> Option<Arc<Sensor>> {
        self.sensors.get(id).cloned()
    }

    /// Look up a control sensor by id
    pub fn control(&self, id: &str) -> Option<Arc<ControlSensor>> {
        self.controls.get(id).cloned()
    }

    /// Write a fresh reading through the registry
    ///
    /// Returns false when the id is unknown (a sensor that appeared after
    /// load); the caller decides whether that is worth logging.
    pub(crate) fn update_reading(&self, id: &str, value: Option<f64>) -> bool {
        match self.sensors.get(id) {
            Some(sensor) => {
                sensor.set_value(value);
                true
            }
            None => false,
        }
    }

    /// Write a fresh duty readback through the registry
    pub(crate) fn update_duty(&self, id: &str, value: Option<f64>) -> bool {
        match self.controls.get(id) {
            Some(control) => {
                control.set_value(value);
                true
            }
            None => false,
        }
    }

    pub fn sensor_count(&self) -> usize {
        self.sensors.len()
    }

    pub fn control_count(&self) -> usize {
        self.controls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sensors.is_empty() && self.controls.is_empty()
    }
}
