//! Plugin lifecycle and polling orchestration
//!
//! The host drives this through `initialize`/`load`/`update`/`close`.
//! `load` is the only point at which sensor objects are created; every
//! later poll writes fresh values through the registry without replacing
//! entries, so identity held by the host stays valid for the whole session.

pub mod writer;

pub use writer::WriteCoordinator;

use crate::domain::{ControlSample, LiquidctlDevice, SensorSample};
use crate::error::{AppError, UtilityError};
use crate::liquidctl::{LiquidctlExecutor, StatusReport};
use crate::sensors::{ControlSensor, Sensor, SensorRegistry};

use std::sync::{Arc, Mutex, PoisonError};

/// Host-provided collections, populated exactly once at load
///
/// The host owns the containers but never mutates the sensors directly;
/// writes go through each control sensor's `set`.
#[derive(Default)]
pub struct SensorContainer {
    /// Reading sensors: fan rpm, pump rpm, liquid temperature
    pub fan_sensors: Vec<Arc<Sensor>>,
    /// Writable duty-cycle control points
    pub control_sensors: Vec<Arc<ControlSensor>>,
}

/// Polling orchestrator bridging the utility to the host's sensor model
///
/// States: Uninitialized → Initialized → Loaded → polling steady state.
/// The host calls `update` repeatedly on its own schedule; the core keeps
/// no timer thread of its own.
pub struct LiquidctlPlugin {
    executor: Arc<dyn LiquidctlExecutor>,
    gate: Arc<Mutex<()>>,
    writer: Arc<WriteCoordinator>,
    registry: SensorRegistry,
    initialized: bool,
    loaded: bool,
}

impl LiquidctlPlugin {
    /// Create a plugin over the given utility executor
    pub fn new(executor: Arc<dyn LiquidctlExecutor>) -> Self {
        let gate = Arc::new(Mutex::new(()));
        let writer = Arc::new(WriteCoordinator::new(
            Arc::clone(&executor),
            Arc::clone(&gate),
        ));
        log::info!("liquidctl plugin created");

        Self {
            executor,
            gate,
            writer,
            registry: SensorRegistry::new(),
            initialized: false,
            loaded: false,
        }
    }

    /// Probe the utility and run its device initialization pass
    ///
    /// Failure is never fatal: the plugin stays constructed and reports the
    /// degraded state through the log only.
    pub fn initialize(&mut self) {
        let probed = {
            let _slot = self.gate.lock().unwrap_or_else(PoisonError::into_inner);
            self.executor.probe()
        };
        match probed {
            Ok(version) => {
                log::info!("liquidctl reachable: {}", version);
                self.initialized = true;
            }
            Err(e) => {
                log::error!("liquidctl unreachable, continuing degraded: {}", e);
                return;
            }
        }

        let initialized = {
            let _slot = self.gate.lock().unwrap_or_else(PoisonError::into_inner);
            self.executor.initialize_all()
        };
        if let Err(e) = initialized {
            log::warn!("device initialization failed: {}", e);
        }
    }

    /// Whether the reachability probe succeeded
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Whether the initial sensor set has been built
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Perform one full poll and build the initial sensor set
    ///
    /// Must be called at most once per session; repeated calls are logged
    /// and ignored. If the initial poll fails the container stays empty and
    /// the plugin runs degraded.
    pub fn load(&mut self, container: &mut SensorContainer) {
        if self.loaded {
            log::warn!("load called more than once; ignoring");
            return;
        }
        self.loaded = true;

        let report = match self.poll() {
            Ok(report) => report,
            Err(e) => {
                log::error!("initial poll failed, no sensors published: {}", e);
                return;
            }
        };

        for (index, status) in report.devices.iter().enumerate() {
            let device = LiquidctlDevice::from_status(status, index);
            log::info!(
                "found {}: {} sensors, {} controls",
                device.name,
                device.sensor_count(),
                device.control_count()
            );
            self.publish(&device, container);
        }
    }

    /// One poll-and-reconcile cycle
    ///
    /// Every reconciliation completes before this returns, so the host
    /// never observes a partially-updated sensor set. Any poll failure is
    /// caught and logged; all sensors keep their previous values and the
    /// next scheduled call retries.
    pub fn update(&self) {
        let report = match self.poll() {
            Ok(report) => report,
            Err(e) => {
                log::warn!("poll failed, keeping previous readings: {}", e);
                return;
            }
        };

        for (index, status) in report.devices.iter().enumerate() {
            let device = LiquidctlDevice::from_status(status, index);
            self.reconcile(&device);
        }
    }

    /// Apply a duty set-point to the control sensor with the given id
    ///
    /// Validates the set-point, then blocks on the write coordinator until
    /// the command completes. Fails with `UnknownSensor` for ids the
    /// registry does not own.
    pub fn apply(&self, sensor_id: &str, duty: u8) -> Result<(), AppError> {
        let control = self
            .registry
            .control(sensor_id)
            .ok_or_else(|| AppError::UnknownSensor(sensor_id.to_string()))?;
        control.set(duty)
    }

    /// Shut down; sensors the host still holds keep their last readings
    pub fn close(&mut self) {
        log::info!("liquidctl plugin closing");
    }

    /// The registry owning the canonical sensor objects
    pub fn registry(&self) -> &SensorRegistry {
        &self.registry
    }

    /// The shared write coordinator
    pub fn writer(&self) -> &Arc<WriteCoordinator> {
        &self.writer
    }

    fn poll(&self) -> Result<StatusReport, UtilityError> {
        let raw = {
            let _slot = self.gate.lock().unwrap_or_else(PoisonError::into_inner);
            self.executor.status()?
        };
        StatusReport::parse(&raw)
    }

    fn publish(&mut self, device: &LiquidctlDevice, container: &mut SensorContainer) {
        for sample in &device.fan_speed_sensors {
            self.publish_sensor(sample, container);
        }
        for sample in &device.fan_control_sensors {
            self.publish_control(sample, container);
        }
        if let Some(sample) = &device.pump_speed_sensor {
            self.publish_sensor(sample, container);
        }
        if let Some(sample) = &device.pump_duty_controller {
            self.publish_control(sample, container);
        }
        if let Some(sample) = &device.liquid_temperature_sensor {
            self.publish_sensor(sample, container);
        }
    }

    fn publish_sensor(&mut self, sample: &SensorSample, container: &mut SensorContainer) {
        let sensor = Sensor::new(&sample.id, &sample.name, sample.value);
        self.registry.insert_sensor(Arc::clone(&sensor));
        container.fan_sensors.push(sensor);
    }

    fn publish_control(&mut self, sample: &ControlSample, container: &mut SensorContainer) {
        let control = ControlSensor::new(
            &sample.id,
            &sample.name,
            sample.duty,
            sample.target.clone(),
            Arc::clone(&self.writer),
        );
        self.registry.insert_control(Arc::clone(&control));
        container.control_sensors.push(control);
    }

    fn reconcile(&self, device: &LiquidctlDevice) {
        for sample in &device.fan_speed_sensors {
            if !self.registry.update_reading(&sample.id, sample.value) {
                log::debug!("sensor {} appeared after load; ignored", sample.id);
            }
        }
        for sample in &device.fan_control_sensors {
            if !self.registry.update_duty(&sample.id, sample.duty) {
                log::debug!("control {} appeared after load; ignored", sample.id);
            }
        }
        if let Some(sample) = &device.pump_speed_sensor {
            self.registry.update_reading(&sample.id, sample.value);
        }
        if let Some(sample) = &device.pump_duty_controller {
            self.registry.update_duty(&sample.id, sample.duty);
        }
        if let Some(sample) = &device.liquid_temperature_sensor {
            self.registry.update_reading(&sample.id, sample.value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::mock::{
        MockExecutor, FAN_STATUS_FULL_JSON, FAN_STATUS_JSON, PUMP_STATUS_JSON,
    };

    fn loaded_plugin(json: &str) -> (Arc<MockExecutor>, LiquidctlPlugin, SensorContainer) {
        let executor = Arc::new(MockExecutor::new(json));
        let dyn_executor: Arc<dyn LiquidctlExecutor> = executor.clone();
        let mut plugin = LiquidctlPlugin::new(dyn_executor);
        plugin.initialize();

        let mut container = SensorContainer::default();
        plugin.load(&mut container);
        (executor, plugin, container)
    }

    #[test]
    fn test_initialize_probes_utility() {
        let executor = Arc::new(MockExecutor::new("[]"));
        let dyn_executor: Arc<dyn LiquidctlExecutor> = executor.clone();
        let mut plugin = LiquidctlPlugin::new(dyn_executor);
        assert!(!plugin.is_initialized());

        plugin.initialize();
        assert!(plugin.is_initialized());
    }

    #[test]
    fn test_initialize_failure_is_not_fatal() {
        let executor = Arc::new(MockExecutor::new("[]"));
        executor.set_fail_probe(true);
        let dyn_executor: Arc<dyn LiquidctlExecutor> = executor.clone();
        let mut plugin = LiquidctlPlugin::new(dyn_executor);

        plugin.initialize();
        assert!(!plugin.is_initialized());
    }

    #[test]
    fn test_load_populates_fan_sensors() {
        let (_executor, plugin, container) = loaded_plugin(FAN_STATUS_JSON);

        assert_eq!(container.fan_sensors.len(), 3);
        assert_eq!(container.control_sensors.len(), 3);
        assert_eq!(
            container.fan_sensors[0].name(),
            "Fan 1 - NZXT RGB & Fan Controller (3+6 channels)"
        );
        assert_eq!(container.fan_sensors[0].value(), Some(1205.0));
        assert_eq!(container.control_sensors[0].value(), Some(40.0));
        assert_eq!(plugin.registry().sensor_count(), 3);
        assert_eq!(plugin.registry().control_count(), 3);
    }

    #[test]
    fn test_load_populates_pump_and_liquid_sensors() {
        let (_executor, _plugin, container) = loaded_plugin(PUMP_STATUS_JSON);

        assert_eq!(container.fan_sensors.len(), 2);
        assert_eq!(container.control_sensors.len(), 1);

        let names: Vec<&str> = container.fan_sensors.iter().map(|s| s.name()).collect();
        assert!(names.contains(&"Pump - NZXT Kraken Pump"));
        assert!(names.contains(&"Liquid Temp. - NZXT Kraken Pump"));
        assert_eq!(
            container.control_sensors[0].name(),
            "Pump Control - NZXT Kraken Pump"
        );
    }

    #[test]
    fn test_load_is_single_shot() {
        let (_executor, mut plugin, mut container) = loaded_plugin(FAN_STATUS_JSON);
        plugin.load(&mut container);
        assert_eq!(container.fan_sensors.len(), 3);
        assert_eq!(container.control_sensors.len(), 3);
    }

    #[test]
    fn test_load_failure_leaves_container_empty() {
        let executor = Arc::new(MockExecutor::new("[]"));
        executor.set_fail_status(true);
        let dyn_executor: Arc<dyn LiquidctlExecutor> = executor.clone();
        let mut plugin = LiquidctlPlugin::new(dyn_executor);

        let mut container = SensorContainer::default();
        plugin.load(&mut container);

        assert!(container.fan_sensors.is_empty());
        assert!(container.control_sensors.is_empty());
        assert!(plugin.is_loaded());
    }

    #[test]
    fn test_update_reconciles_values_in_place() {
        let (executor, plugin, container) = loaded_plugin(FAN_STATUS_JSON);
        let sensor = Arc::clone(&container.fan_sensors[0]);
        assert_eq!(sensor.value(), Some(1205.0));

        executor.set_status_json(FAN_STATUS_FULL_JSON);
        plugin.update();

        // Same object the host already holds, new reading
        assert_eq!(sensor.value(), Some(2005.0));
        assert_eq!(container.control_sensors[0].value(), Some(100.0));
        let registered = plugin.registry().sensor(sensor.id()).unwrap();
        assert!(Arc::ptr_eq(&sensor, &registered));
    }

    #[test]
    fn test_identifiers_stable_across_updates() {
        let (_executor, plugin, container) = loaded_plugin(FAN_STATUS_JSON);
        let ids_before: Vec<String> = container
            .fan_sensors
            .iter()
            .map(|s| s.id().to_string())
            .collect();

        plugin.update();
        plugin.update();

        let ids_after: Vec<String> = container
            .fan_sensors
            .iter()
            .map(|s| s.id().to_string())
            .collect();
        assert_eq!(ids_before, ids_after);
        assert_eq!(ids_before[0], "/dev/hidraw1-fanRPM1");
    }

    #[test]
    fn test_failed_poll_leaves_values_unchanged() {
        let (executor, plugin, container) = loaded_plugin(FAN_STATUS_JSON);

        executor.set_fail_status(true);
        plugin.update();

        assert_eq!(container.fan_sensors[0].value(), Some(1205.0));
        assert_eq!(container.control_sensors[0].value(), Some(40.0));
    }

    #[test]
    fn test_malformed_poll_leaves_values_unchanged() {
        let (executor, plugin, container) = loaded_plugin(FAN_STATUS_JSON);

        executor.set_status_json("{broken");
        plugin.update();

        assert_eq!(container.fan_sensors[0].value(), Some(1205.0));
    }

    #[test]
    fn test_disappeared_device_retains_last_reading() {
        let (executor, plugin, container) = loaded_plugin(FAN_STATUS_JSON);

        executor.set_status_json("[]");
        plugin.update();

        assert_eq!(container.fan_sensors.len(), 3);
        assert_eq!(container.fan_sensors[0].value(), Some(1205.0));
    }

    #[test]
    fn test_set_out_of_range_issues_no_subprocess_call() {
        let (executor, _plugin, container) = loaded_plugin(FAN_STATUS_JSON);

        let result = container.control_sensors[0].set(150);
        assert!(matches!(result, Err(AppError::Domain(_))));
        assert!(executor.set_calls().is_empty());
    }

    #[test]
    fn test_set_then_poll_reflects_hardware() {
        let (executor, plugin, container) = loaded_plugin(FAN_STATUS_JSON);
        let control = Arc::clone(&container.control_sensors[0]);
        let fan = Arc::clone(&container.fan_sensors[0]);
        let rpm_before = fan.value().unwrap();

        control.set(100).unwrap();

        let calls = executor.set_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].address, "/dev/hidraw1");
        assert_eq!(calls[0].channel, "fan1");
        assert_eq!(calls[0].duty, 100);

        // Not reflected until the hardware is observed again
        assert_eq!(control.value(), Some(40.0));

        executor.set_status_json(FAN_STATUS_FULL_JSON);
        plugin.update();

        assert_eq!(control.value(), Some(100.0));
        assert!(fan.value().unwrap() > rpm_before);
    }

    #[test]
    fn test_apply_routes_by_sensor_id() {
        let (executor, plugin, _container) = loaded_plugin(FAN_STATUS_JSON);

        plugin.apply("/dev/hidraw1-fanCtrl2", 55).unwrap();
        let calls = executor.set_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].channel, "fan2");
        assert_eq!(calls[0].duty, 55);

        let unknown = plugin.apply("/dev/hidraw1-fanCtrl9", 55);
        assert!(matches!(unknown, Err(AppError::UnknownSensor(_))));
    }

    #[test]
    fn test_failed_write_leaves_control_value_stale() {
        let (executor, _plugin, container) = loaded_plugin(FAN_STATUS_JSON);
        executor.set_fail_writes(true);

        let result = container.control_sensors[0].set(80);
        assert!(matches!(result, Err(AppError::WriteFailed(_))));
        assert_eq!(container.control_sensors[0].value(), Some(40.0));
    }
}
