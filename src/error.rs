//! Unified error types for liqctl
//!
//! This module defines all error types used throughout the crate.
//! Uses thiserror for ergonomic error definitions.

use thiserror::Error;

/// Top-level application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from the liquidctl utility boundary
    #[error("liquidctl error: {0}")]
    Utility(#[from] UtilityError),

    /// Error from domain type validation
    #[error("Domain validation error: {0}")]
    Domain(#[from] DomainError),

    /// Error from configuration parsing/validation
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A control write failed or timed out at the device
    #[error("Device write failed: {0}")]
    WriteFailed(UtilityError),

    /// No cooling devices detected in the status report
    #[error("No liquidctl devices detected")]
    NoDevicesFound,

    /// Sensor identifier not known to the registry
    #[error("Unknown sensor id: {0}")]
    UnknownSensor(String),

    /// IO error (file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from invocations of the liquidctl utility
#[derive(Error, Debug)]
pub enum UtilityError {
    /// Executable missing or not spawnable
    #[error("liquidctl not reachable: {0}")]
    Unreachable(String),

    /// Status output did not match the expected JSON schema
    #[error("Malformed status report: {0}")]
    MalformedStatus(String),

    /// Command exited with a non-zero status
    #[error("liquidctl exited with status {status}: {stderr}")]
    CommandFailed { status: i32, stderr: String },

    /// Command did not finish within the configured timeout
    #[error("liquidctl did not finish within {0}s")]
    Timeout(u64),

    /// IO failure while talking to the child process
    #[error("IO error invoking liquidctl: {0}")]
    Io(String),
}

/// Errors from domain type validation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Invalid duty cycle value (must be 0-100)
    #[error("Invalid duty cycle: {0}% (must be 0-100)")]
    InvalidDuty(u8),

    /// Invalid value provided
    #[error("Invalid value: {0}")]
    InvalidValue(String),
}

/// Errors from configuration parsing and validation
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file not found
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    /// Invalid config value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_error_display() {
        let err = DomainError::InvalidDuty(150);
        assert_eq!(err.to_string(), "Invalid duty cycle: 150% (must be 0-100)");
    }

    #[test]
    fn test_utility_error_display() {
        let err = UtilityError::Unreachable("No such file or directory".to_string());
        assert!(err.to_string().contains("not reachable"));

        let err = UtilityError::CommandFailed {
            status: 1,
            stderr: "no devices matched".to_string(),
        };
        assert!(err.to_string().contains("status 1"));
        assert!(err.to_string().contains("no devices matched"));
    }

    #[test]
    fn test_timeout_error_display() {
        let err = UtilityError::Timeout(10);
        assert_eq!(err.to_string(), "liquidctl did not finish within 10s");
    }

    #[test]
    fn test_error_conversion() {
        let domain_err = DomainError::InvalidDuty(120);
        let app_err: AppError = domain_err.into();
        assert!(matches!(app_err, AppError::Domain(_)));
    }

    #[test]
    fn test_write_failed_wraps_utility_error() {
        let err = AppError::WriteFailed(UtilityError::Timeout(5));
        assert!(err.to_string().contains("Device write failed"));
    }
}
