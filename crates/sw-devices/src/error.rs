//! Error types for device operations.

use sw_core::SwError;
use thiserror::Error;

/// Result type for device operations.
pub type DeviceResult<T> = Result<T, DeviceError>;

/// Errors that can occur while driving field devices.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DeviceError {
    /// Invalid argument provided to a device constructor or command.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// Not enough water left for one cleaning cycle.
    #[error("Insufficient water for cleaning: {available_l:.3} L available, {required_l:.3} L required")]
    InsufficientWater { available_l: f64, required_l: f64 },

    #[error(transparent)]
    Core(#[from] SwError),
}
