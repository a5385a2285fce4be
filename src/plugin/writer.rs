//! Write coordination for control sensors
//!
//! Every liquidctl invocation in the session shares a single-slot gate, so
//! a control write never runs concurrently with a poll or another write
//! against the same hardware interface.

use crate::domain::{DutyCycle, WriteTarget};
use crate::error::{AppError, Result};
use crate::liquidctl::LiquidctlExecutor;

use std::sync::{Arc, Mutex, PoisonError};

/// Serializes duty writes against the shared utility connection
pub struct WriteCoordinator {
    executor: Arc<dyn LiquidctlExecutor>,
    gate: Arc<Mutex<()>>,
}

impl WriteCoordinator {
    /// Create a coordinator sharing the given invocation gate
    pub fn new(executor: Arc<dyn LiquidctlExecutor>, gate: Arc<Mutex<()>>) -> Self {
        Self { executor, gate }
    }

    /// Apply a duty set-point to one device channel
    ///
    /// Blocks the caller until the command process exits. On failure the
    /// owning control sensor's value is left stale; the next poll reflects
    /// the actual hardware state.
    pub fn apply(&self, target: &WriteTarget, duty: DutyCycle) -> Result<()> {
        let _slot = self.gate.lock().unwrap_or_else(PoisonError::into_inner);
        log::debug!("setting {} {} to {}", target.address, target.channel, duty);

        self.executor
            .set_duty(&target.address, &target.channel, duty)
            .map_err(|e| {
                log::error!(
                    "write to {} {} failed: {}",
                    target.address,
                    target.channel,
                    e
                );
                AppError::WriteFailed(e)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockExecutor;

    fn coordinator(executor: &Arc<MockExecutor>) -> WriteCoordinator {
        let executor: Arc<dyn LiquidctlExecutor> = executor.clone();
        WriteCoordinator::new(executor, Arc::new(Mutex::new(())))
    }

    fn target(channel: &str) -> WriteTarget {
        WriteTarget {
            address: "/dev/hidraw2".to_string(),
            channel: channel.to_string(),
        }
    }

    #[test]
    fn test_apply_invokes_set_duty() {
        let executor = Arc::new(MockExecutor::new("[]"));
        let coordinator = coordinator(&executor);

        coordinator
            .apply(&target("pump"), DutyCycle::new(60).unwrap())
            .unwrap();

        let calls = executor.set_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].address, "/dev/hidraw2");
        assert_eq!(calls[0].channel, "pump");
        assert_eq!(calls[0].duty, 60);
    }

    #[test]
    fn test_apply_maps_failure_to_write_failed() {
        let executor = Arc::new(MockExecutor::new("[]"));
        executor.set_fail_writes(true);
        let coordinator = coordinator(&executor);

        let result = coordinator.apply(&target("fan1"), DutyCycle::new(50).unwrap());
        assert!(matches!(result, Err(AppError::WriteFailed(_))));
    }
}
