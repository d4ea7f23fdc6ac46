//! Render targets the dashboard writes into.
//!
//! The host (egui window, terminal) provides named targets: three text slots
//! for the metrics, the log table and one surface per chart. The dashboard
//! checks for all of them at construction and refuses to start if any is
//! missing.

use crate::charts::CHART_SURFACES;
use crate::error::{DashboardError, DashboardResult};
use crate::snapshot::MetricSnapshot;
use std::collections::BTreeSet;

pub const ENERGY_OUTPUT: &str = "energyOutput";
pub const TILT_ANGLE: &str = "tiltAngle";
pub const SYSTEM_STATUS: &str = "systemStatus";
pub const LOGS_TABLE: &str = "logsTable";

/// Text slots and the log table.
pub const METRIC_TARGETS: [&str; 4] = [ENERGY_OUTPUT, TILT_ANGLE, SYSTEM_STATUS, LOGS_TABLE];

/// Receives the formatted metric values.
pub trait MetricsDisplay {
    fn set_energy(&mut self, text: &str);
    fn set_tilt(&mut self, text: &str);
    fn set_status(&mut self, text: &str);
}

/// Write all three values of `snapshot`, energy first.
pub fn render_snapshot(display: &mut dyn MetricsDisplay, snapshot: &MetricSnapshot) {
    display.set_energy(&snapshot.energy_text());
    display.set_tilt(&snapshot.tilt_text());
    display.set_status(snapshot.status_text());
}

/// Plain text slots, read back by whatever draws them.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DisplaySlots {
    pub energy: String,
    pub tilt: String,
    pub status: String,
}

impl MetricsDisplay for DisplaySlots {
    fn set_energy(&mut self, text: &str) {
        text.clone_into(&mut self.energy);
    }

    fn set_tilt(&mut self, text: &str) {
        text.clone_into(&mut self.tilt);
    }

    fn set_status(&mut self, text: &str) {
        text.clone_into(&mut self.status);
    }
}

/// Something that can host dashboard targets.
pub trait RenderHost {
    fn provides(&self, target: &str) -> bool;
}

/// Host layout given as a set of target names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceLayout {
    names: BTreeSet<String>,
}

impl SurfaceLayout {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Every metric target and chart surface.
    pub fn full() -> Self {
        Self::new(all_target_names())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

impl RenderHost for SurfaceLayout {
    fn provides(&self, target: &str) -> bool {
        self.names.contains(target)
    }
}

/// Metric targets followed by chart surfaces.
pub fn all_target_names() -> Vec<&'static str> {
    METRIC_TARGETS
        .iter()
        .chain(CHART_SURFACES.iter())
        .copied()
        .collect()
}

/// Fail with [`DashboardError::MissingTarget`] on the first target `host` lacks.
pub fn require_targets<'a>(
    host: &dyn RenderHost,
    targets: impl IntoIterator<Item = &'a str>,
) -> DashboardResult<()> {
    for name in targets {
        if !host.provides(name) {
            return Err(DashboardError::MissingTarget {
                name: name.to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::PanelStatus;

    #[test]
    fn full_layout_provides_everything() {
        let layout = SurfaceLayout::full();
        assert!(require_targets(&layout, all_target_names()).is_ok());
        assert_eq!(layout.names().count(), 10);
    }

    #[test]
    fn missing_target_is_reported_by_name() {
        let layout = SurfaceLayout::new([ENERGY_OUTPUT, TILT_ANGLE, LOGS_TABLE]);
        let err = require_targets(&layout, METRIC_TARGETS).unwrap_err();
        match err {
            DashboardError::MissingTarget { name } => assert_eq!(name, SYSTEM_STATUS),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn render_writes_all_slots() {
        let mut slots = DisplaySlots::default();
        let snap = MetricSnapshot::new(1234, 33, PanelStatus::Maintenance).unwrap();
        render_snapshot(&mut slots, &snap);
        assert_eq!(slots.energy, "12.34 kWh");
        assert_eq!(slots.tilt, "33°");
        assert_eq!(slots.status, "Maintenance");
    }
}
