pub mod chart_view;
pub mod control_view;
pub mod log_view;
pub mod metrics_view;

pub use chart_view::ChartView;
pub use control_view::{ControlActions, ControlView};
pub use log_view::LogView;
pub use metrics_view::MetricsView;
