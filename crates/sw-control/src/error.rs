//! Error types for control operations.

use sw_devices::DeviceError;
use thiserror::Error;

/// Result type for control operations.
pub type ControlResult<T> = Result<T, ControlError>;

/// Errors that can occur while configuring or running the control layer.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ControlError {
    /// Invalid argument provided to a control function.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// Decision thresholds that cannot produce a sensible state machine.
    #[error("Invalid decision configuration: {what}")]
    InvalidConfig { what: String },

    #[error("Device error: {0}")]
    Device(#[from] DeviceError),
}
