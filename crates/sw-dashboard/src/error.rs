//! Error types for the sw-dashboard service layer.

use std::path::PathBuf;

/// Dashboard error type shared by the CLI and GUI front ends.
///
/// Missing render targets and chart surfaces are initialization failures:
/// the dashboard refuses to start rather than render a partial page.
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error("Render target not provided by host: {name}")]
    MissingTarget { name: String },

    #[error("Chart surface not provided by host: {surface}")]
    MissingSurface { surface: String },

    #[error("Invalid chart '{surface}': {reason}")]
    InvalidChart { surface: String, reason: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to read config file: {path}")]
    ConfigFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write config file: {path}")]
    ConfigFileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Control error: {0}")]
    Control(String),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for sw-dashboard operations.
pub type DashboardResult<T> = Result<T, DashboardError>;

// Conversions from backend error types
impl From<sw_control::ControlError> for DashboardError {
    fn from(err: sw_control::ControlError) -> Self {
        DashboardError::Control(err.to_string())
    }
}

impl From<sw_devices::DeviceError> for DashboardError {
    fn from(err: sw_devices::DeviceError) -> Self {
        DashboardError::Control(err.to_string())
    }
}

impl From<sw_core::SwError> for DashboardError {
    fn from(err: sw_core::SwError) -> Self {
        DashboardError::InvalidInput(err.to_string())
    }
}
