//! The three textual metrics shown at the top of the dashboard.

use crate::error::{DashboardError, DashboardResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lowest energy reading, in hundredths of a kWh (5.00 kWh).
pub const ENERGY_MIN_HUNDREDTHS: u32 = 500;
/// Exclusive upper bound on energy readings, in hundredths of a kWh (15.00 kWh).
pub const ENERGY_MAX_HUNDREDTHS: u32 = 1500;
pub const TILT_MIN_DEG: u32 = 10;
pub const TILT_MAX_DEG: u32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PanelStatus {
    Online,
    Optimizing,
    Maintenance,
    Error,
}

impl PanelStatus {
    /// Draw order used by the simulator.
    pub const ALL: [PanelStatus; 4] = [
        PanelStatus::Online,
        PanelStatus::Optimizing,
        PanelStatus::Maintenance,
        PanelStatus::Error,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PanelStatus::Online => "Online",
            PanelStatus::Optimizing => "Optimizing",
            PanelStatus::Maintenance => "Maintenance",
            PanelStatus::Error => "Error",
        }
    }
}

impl fmt::Display for PanelStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One set of displayed values. Replaced wholesale on every tick.
///
/// Energy is kept in integer hundredths so the two-decimal text is exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SnapshotFields")]
pub struct MetricSnapshot {
    energy_hundredths: u32,
    tilt_deg: u32,
    status: PanelStatus,
}

/// Unchecked wire form; deserialized snapshots go through [`MetricSnapshot::new`].
#[derive(Deserialize)]
struct SnapshotFields {
    energy_hundredths: u32,
    tilt_deg: u32,
    status: PanelStatus,
}

impl TryFrom<SnapshotFields> for MetricSnapshot {
    type Error = DashboardError;

    fn try_from(f: SnapshotFields) -> DashboardResult<Self> {
        Self::new(f.energy_hundredths, f.tilt_deg, f.status)
    }
}

impl MetricSnapshot {
    /// # Errors
    ///
    /// [`DashboardError::InvalidInput`] when energy is outside `[5.00, 15.00)`
    /// kWh or tilt outside `10..=50` degrees.
    pub fn new(energy_hundredths: u32, tilt_deg: u32, status: PanelStatus) -> DashboardResult<Self> {
        if !(ENERGY_MIN_HUNDREDTHS..ENERGY_MAX_HUNDREDTHS).contains(&energy_hundredths) {
            return Err(DashboardError::InvalidInput(format!(
                "energy {energy_hundredths}/100 kWh outside [5.00, 15.00)"
            )));
        }
        if !(TILT_MIN_DEG..=TILT_MAX_DEG).contains(&tilt_deg) {
            return Err(DashboardError::InvalidInput(format!(
                "tilt {tilt_deg}° outside [10, 50]"
            )));
        }
        Ok(Self {
            energy_hundredths,
            tilt_deg,
            status,
        })
    }

    /// Clamp into range instead of failing; used for values drawn in range.
    pub(crate) fn from_parts(energy_hundredths: u32, tilt_deg: u32, status: PanelStatus) -> Self {
        Self {
            energy_hundredths: energy_hundredths
                .clamp(ENERGY_MIN_HUNDREDTHS, ENERGY_MAX_HUNDREDTHS - 1),
            tilt_deg: tilt_deg.clamp(TILT_MIN_DEG, TILT_MAX_DEG),
            status,
        }
    }

    pub fn energy_kwh(&self) -> f64 {
        f64::from(self.energy_hundredths) / 100.0
    }

    pub fn energy_hundredths(&self) -> u32 {
        self.energy_hundredths
    }

    pub fn tilt_deg(&self) -> u32 {
        self.tilt_deg
    }

    pub fn status(&self) -> PanelStatus {
        self.status
    }

    /// e.g. `9.13 kWh`
    pub fn energy_text(&self) -> String {
        format!(
            "{}.{:02} kWh",
            self.energy_hundredths / 100,
            self.energy_hundredths % 100
        )
    }

    /// e.g. `27°`
    pub fn tilt_text(&self) -> String {
        format!("{}°", self.tilt_deg)
    }

    pub fn status_text(&self) -> &'static str {
        self.status.as_str()
    }

    /// Log line recorded with every tick.
    pub fn log_message(&self) -> String {
        format!(
            "Metrics updated: Energy={}, Tilt={}, Status={}",
            self.energy_text(),
            self.tilt_text(),
            self.status_text()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_match_dashboard_text() {
        let s = MetricSnapshot::new(913, 27, PanelStatus::Optimizing).unwrap();
        assert_eq!(s.energy_text(), "9.13 kWh");
        assert_eq!(s.tilt_text(), "27°");
        assert_eq!(s.status_text(), "Optimizing");
        assert_eq!(
            s.log_message(),
            "Metrics updated: Energy=9.13 kWh, Tilt=27°, Status=Optimizing"
        );
    }

    #[test]
    fn keeps_trailing_zeroes() {
        let s = MetricSnapshot::new(500, 10, PanelStatus::Online).unwrap();
        assert_eq!(s.energy_text(), "5.00 kWh");
        let s = MetricSnapshot::new(1405, 50, PanelStatus::Error).unwrap();
        assert_eq!(s.energy_text(), "14.05 kWh");
        assert!((s.energy_kwh() - 14.05).abs() < 1e-12);
    }

    #[test]
    fn rejects_out_of_range_values() {
        assert!(MetricSnapshot::new(499, 20, PanelStatus::Online).is_err());
        assert!(MetricSnapshot::new(1500, 20, PanelStatus::Online).is_err());
        assert!(MetricSnapshot::new(1000, 9, PanelStatus::Online).is_err());
        assert!(MetricSnapshot::new(1000, 51, PanelStatus::Online).is_err());
    }

    #[test]
    fn deserializing_checks_ranges() {
        let s = MetricSnapshot::new(913, 27, PanelStatus::Optimizing).unwrap();
        let json = serde_json::to_string(&s).unwrap();
        assert_eq!(serde_json::from_str::<MetricSnapshot>(&json).unwrap(), s);

        let too_much = r#"{"energy_hundredths":1500,"tilt_deg":27,"status":"Online"}"#;
        let err = serde_json::from_str::<MetricSnapshot>(too_much).unwrap_err();
        assert!(err.to_string().contains("outside [5.00, 15.00)"));
        let too_flat = r#"{"energy_hundredths":913,"tilt_deg":5,"status":"Online"}"#;
        assert!(serde_json::from_str::<MetricSnapshot>(too_flat).is_err());
    }
}
