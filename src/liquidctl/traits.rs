//! Trait definitions for liquidctl operations
//!
//! This trait abstracts the external utility to enable testing with mocks.

use crate::domain::DutyCycle;
use crate::error::UtilityError;

/// Trait for invoking the liquidctl utility
///
/// Implementations are blocking: callers must not invoke these from a
/// thread that needs to stay responsive. The polling orchestrator and the
/// write coordinator serialize invocations through a shared gate so at most
/// one command runs against the hardware interface at a time.
pub trait LiquidctlExecutor: Send + Sync {
    /// Query the utility version (lightweight reachability probe)
    fn probe(&self) -> Result<String, UtilityError>;

    /// Run the utility's device initialization pass
    fn initialize_all(&self) -> Result<(), UtilityError>;

    /// Fetch one raw JSON status snapshot for all devices
    fn status(&self) -> Result<String, UtilityError>;

    /// Set the duty cycle for one channel of one device
    ///
    /// Blocks until the command process exits. A non-zero exit maps to
    /// `UtilityError::CommandFailed`; exceeding the configured timeout
    /// force-terminates the process and maps to `UtilityError::Timeout`.
    fn set_duty(&self, address: &str, channel: &str, duty: DutyCycle)
        -> Result<(), UtilityError>;
}
