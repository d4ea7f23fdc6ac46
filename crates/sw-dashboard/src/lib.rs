//! Service layer for the solar panel dashboard.
//!
//! This crate provides a single interface for the CLI and GUI front ends:
//! the synthetic metric feed, the event log, the static chart set, operator
//! actions and the panel control loop, all behind [`Dashboard`].

pub mod actions;
pub mod charts;
pub mod config;
pub mod control_loop;
pub mod dashboard;
pub mod error;
pub mod log;
pub mod simulator;
pub mod snapshot;
pub mod targets;

// Re-export key types for convenience
pub use actions::{Dialogs, RecordingDialogs, on_reset_system, on_start_cleaning};
pub use charts::{
    AxisOptions, CHART_SURFACES, ChartKind, ChartPresenter, ChartSpec, Dataset, Rgba,
    default_charts,
};
pub use config::{ControlLoopConfig, DashboardConfig, load, load_json, load_yaml, save_yaml};
pub use control_loop::ControlLoop;
pub use dashboard::{Dashboard, UpdateSummary};
pub use error::{DashboardError, DashboardResult};
pub use log::{LogEntry, LogRegistry};
pub use simulator::{DEFAULT_TICK_PERIOD_S, MetricsSimulator};
pub use snapshot::{MetricSnapshot, PanelStatus};
pub use targets::{
    DisplaySlots, MetricsDisplay, RenderHost, SurfaceLayout, all_target_names, render_snapshot,
    require_targets,
};
