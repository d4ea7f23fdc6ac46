//! Static chart configuration.
//!
//! Six charts with fixed datasets are handed to the renderer once at startup
//! and never updated. [`ChartPresenter::bind`] checks that the host has a
//! surface for each of them.

use crate::error::{DashboardError, DashboardResult};
use crate::targets::RenderHost;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const ENERGY_CHART: &str = "energyChart";
pub const EFFICIENCY_CHART: &str = "efficiencyChart";
pub const SUNLIGHT_CHART: &str = "sunlightChart";
pub const WIND_SPEED_CHART: &str = "windSpeedChart";
pub const DUST_CHART: &str = "dustChart";
pub const CLEANING_CHART: &str = "cleaningChart";

pub const CHART_SURFACES: [&str; 6] = [
    ENERGY_CHART,
    EFFICIENCY_CHART,
    SUNLIGHT_CHART,
    WIND_SPEED_CHART,
    DUST_CHART,
    CLEANING_CHART,
];

/// Alpha used for the area under line charts.
const LINE_FILL_ALPHA: f32 = 0.2;
const LINE_TENSION: f64 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Line,
    Bar,
}

/// 8-bit RGBA colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parse `#rrggbb` (case-insensitive).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#')?;
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Same colour with opacity `alpha` in `[0, 1]`.
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self {
            a: (alpha.clamp(0.0, 1.0) * 255.0).round() as u8,
            ..self
        }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(
                f,
                "rgba({},{},{},{:.2})",
                self.r,
                self.g,
                self.b,
                f32::from(self.a) / 255.0
            )
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub label: String,
    pub values: Vec<f64>,
    pub border_color: Rgba,
    pub fill_color: Rgba,
    /// Shade the area under a line chart.
    pub fill: bool,
    /// Bezier smoothing for line charts, 0 = straight segments.
    pub tension: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisOptions {
    pub begin_at_zero: bool,
    pub max: Option<f64>,
}

impl Default for AxisOptions {
    fn default() -> Self {
        Self {
            begin_at_zero: true,
            max: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    /// Name of the host surface the chart is drawn on.
    pub surface: String,
    pub title: String,
    pub kind: ChartKind,
    pub labels: Vec<String>,
    pub dataset: Dataset,
    pub y_axis: AxisOptions,
}

impl ChartSpec {
    fn line(surface: &str, title: &str, labels: &[&str], label: &str, values: &[f64], hex: &str) -> Self {
        let color = Rgba::from_hex(hex).unwrap_or(Rgba::rgb(0, 0, 0));
        Self {
            surface: surface.to_string(),
            title: title.to_string(),
            kind: ChartKind::Line,
            labels: labels.iter().map(|s| s.to_string()).collect(),
            dataset: Dataset {
                label: label.to_string(),
                values: values.to_vec(),
                border_color: color,
                fill_color: color.with_alpha(LINE_FILL_ALPHA),
                fill: true,
                tension: LINE_TENSION,
            },
            y_axis: AxisOptions::default(),
        }
    }

    fn bar(surface: &str, title: &str, labels: &[&str], label: &str, values: &[f64], hex: &str) -> Self {
        let color = Rgba::from_hex(hex).unwrap_or(Rgba::rgb(0, 0, 0));
        Self {
            surface: surface.to_string(),
            title: title.to_string(),
            kind: ChartKind::Bar,
            labels: labels.iter().map(|s| s.to_string()).collect(),
            dataset: Dataset {
                label: label.to_string(),
                values: values.to_vec(),
                border_color: color,
                fill_color: color,
                fill: true,
                tension: 0.0,
            },
            y_axis: AxisOptions::default(),
        }
    }

    fn with_y_max(mut self, max: f64) -> Self {
        self.y_axis.max = Some(max);
        self
    }

    /// Y range to display: zero-based when requested, capped by `max` when set,
    /// otherwise fitted to the data.
    pub fn y_range(&self) -> (f64, f64) {
        let values = &self.dataset.values;
        let data_min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let data_max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let lo = if self.y_axis.begin_at_zero {
            0.0_f64.min(data_min)
        } else {
            data_min
        };
        let hi = self.y_axis.max.unwrap_or(data_max);
        if lo.is_finite() && hi.is_finite() {
            (lo, hi)
        } else {
            (0.0, 1.0)
        }
    }

    /// `(index, value)` pairs in label order.
    pub fn points(&self) -> Vec<[f64; 2]> {
        self.dataset
            .values
            .iter()
            .enumerate()
            .map(|(i, v)| [i as f64, *v])
            .collect()
    }

    fn validate(&self) -> DashboardResult<()> {
        if self.labels.len() != self.dataset.values.len() {
            return Err(DashboardError::InvalidChart {
                surface: self.surface.clone(),
                reason: format!(
                    "{} labels but {} values",
                    self.labels.len(),
                    self.dataset.values.len()
                ),
            });
        }
        if let Some(bad) = self.dataset.values.iter().find(|v| !v.is_finite()) {
            return Err(DashboardError::InvalidChart {
                surface: self.surface.clone(),
                reason: format!("non-finite value {bad}"),
            });
        }
        Ok(())
    }
}

const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// The six dashboard charts, in page order.
pub fn default_charts() -> Vec<ChartSpec> {
    vec![
        ChartSpec::line(
            ENERGY_CHART,
            "Energy Output Over Time",
            &WEEKDAYS,
            "Energy (kWh)",
            &[10.0, 13.0, 9.0, 15.0, 22.0, 18.0, 25.0],
            "#2D9CDB",
        ),
        ChartSpec::bar(
            EFFICIENCY_CHART,
            "Efficiency Loss Due to Dust",
            &["Panel A", "Panel B", "Panel C", "Panel D"],
            "Efficiency (%)",
            &[78.0, 82.0, 75.0, 88.0],
            "#27AE60",
        )
        .with_y_max(100.0),
        ChartSpec::line(
            SUNLIGHT_CHART,
            "Sunlight Intensity Over Time",
            &["6 AM", "8 AM", "10 AM", "12 PM", "2 PM", "4 PM", "6 PM"],
            "Sunlight Intensity (W/m²)",
            &[200.0, 550.0, 800.0, 950.0, 1000.0, 700.0, 300.0],
            "#f39c12",
        ),
        ChartSpec::line(
            WIND_SPEED_CHART,
            "Wind Speed Trends",
            &WEEKDAYS,
            "Wind Speed (m/s)",
            &[5.0, 7.0, 3.0, 9.0, 6.0, 4.0, 8.0],
            "#9b59b6",
        ),
        ChartSpec::line(
            DUST_CHART,
            "Dust Accumulation Over Time",
            &["Week 1", "Week 2", "Week 3", "Week 4"],
            "Dust Accumulation (g)",
            &[5.0, 12.0, 25.0, 40.0],
            "#e67e22",
        ),
        ChartSpec::bar(
            CLEANING_CHART,
            "Cleaning Activations",
            &WEEKDAYS,
            "# of Cleanings",
            &[1.0, 0.0, 2.0, 1.0, 3.0, 0.0, 2.0],
            "#3498db",
        ),
    ]
}

/// Charts bound to the host's surfaces.
#[derive(Debug, Clone)]
pub struct ChartPresenter {
    charts: Vec<ChartSpec>,
}

impl ChartPresenter {
    /// # Errors
    ///
    /// [`DashboardError::MissingSurface`] if the host has no surface for a
    /// chart, [`DashboardError::InvalidChart`] if a dataset is malformed.
    pub fn bind(charts: Vec<ChartSpec>, host: &dyn RenderHost) -> DashboardResult<Self> {
        for chart in &charts {
            chart.validate()?;
            if !host.provides(&chart.surface) {
                return Err(DashboardError::MissingSurface {
                    surface: chart.surface.clone(),
                });
            }
        }
        tracing::debug!(count = charts.len(), "charts bound");
        Ok(Self { charts })
    }

    pub fn charts(&self) -> &[ChartSpec] {
        &self.charts
    }

    pub fn get(&self, surface: &str) -> Option<&ChartSpec> {
        self.charts.iter().find(|c| c.surface == surface)
    }
}
