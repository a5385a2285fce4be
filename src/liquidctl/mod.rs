//! liquidctl abstraction layer
//!
//! Provides trait-based abstractions over the external utility for testability.

pub mod process;
pub mod status;
pub mod traits;

pub use process::CliExecutor;
pub use status::{DeviceStatus, StatusEntry, StatusReport};
pub use traits::LiquidctlExecutor;
