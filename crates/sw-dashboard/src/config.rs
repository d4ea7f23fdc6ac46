//! Dashboard configuration file (YAML or JSON).

use crate::error::{DashboardError, DashboardResult};
use crate::simulator::DEFAULT_TICK_PERIOD_S;
use crate::targets::all_target_names;
use serde::{Deserialize, Serialize};
use std::path::Path;
use sw_control::DecisionConfig;
use sw_devices::SensorRanges;
use sw_devices::cleaning::{DEFAULT_RESERVOIR_L, DEFAULT_WATER_PER_CLEAN_L};

pub const DEFAULT_CONTROL_PERIOD_S: f64 = 2.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Seconds between metric updates.
    pub tick_period_s: f64,
    /// Fixed RNG seed; entropy when absent.
    pub seed: Option<u64>,
    /// Maximum log rows; unbounded when absent.
    pub log_capacity: Option<usize>,
    /// Targets the host lays out.
    pub surfaces: Vec<String>,
    pub control: ControlLoopConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            tick_period_s: DEFAULT_TICK_PERIOD_S,
            seed: None,
            log_capacity: None,
            surfaces: all_target_names().into_iter().map(String::from).collect(),
            control: ControlLoopConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlLoopConfig {
    pub enabled: bool,
    pub period_s: f64,
    pub initial_water_l: f64,
    pub water_per_clean_l: f64,
    pub decision: DecisionConfig,
    pub sensors: SensorRanges,
}

impl Default for ControlLoopConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            period_s: DEFAULT_CONTROL_PERIOD_S,
            initial_water_l: DEFAULT_RESERVOIR_L,
            water_per_clean_l: DEFAULT_WATER_PER_CLEAN_L,
            decision: DecisionConfig::default(),
            sensors: SensorRanges::default(),
        }
    }
}

fn positive(value: f64, what: &str) -> DashboardResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(DashboardError::Config(format!(
            "{what} must be positive, got {value}"
        )))
    }
}

impl DashboardConfig {
    pub fn validate(&self) -> DashboardResult<()> {
        positive(self.tick_period_s, "tick_period_s")?;
        if self.log_capacity == Some(0) {
            return Err(DashboardError::Config(
                "log_capacity must be at least 1 when set".to_string(),
            ));
        }
        if self.surfaces.is_empty() {
            return Err(DashboardError::Config("surfaces must not be empty".to_string()));
        }
        self.control.validate()
    }

    pub fn from_yaml_str(content: &str) -> DashboardResult<Self> {
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml_string(&self) -> DashboardResult<String> {
        self.validate()?;
        Ok(serde_yaml::to_string(self)?)
    }
}

impl ControlLoopConfig {
    pub fn validate(&self) -> DashboardResult<()> {
        positive(self.period_s, "control.period_s")?;
        positive(self.water_per_clean_l, "control.water_per_clean_l")?;
        if !self.initial_water_l.is_finite() || self.initial_water_l < 0.0 {
            return Err(DashboardError::Config(format!(
                "control.initial_water_l must be non-negative, got {}",
                self.initial_water_l
            )));
        }
        positive(self.sensors.wind_speed_max_mps, "control.sensors.wind_speed_max_mps")?;
        positive(self.sensors.dust_max_pct, "control.sensors.dust_max_pct")?;
        positive(self.sensors.direction_step_deg, "control.sensors.direction_step_deg")?;
        self.decision.validate()?;
        Ok(())
    }
}

pub fn load_yaml(path: &Path) -> DashboardResult<DashboardConfig> {
    let content =
        std::fs::read_to_string(path).map_err(|source| DashboardError::ConfigFileRead {
            path: path.to_path_buf(),
            source,
        })?;
    DashboardConfig::from_yaml_str(&content)
}

pub fn save_yaml(path: &Path, config: &DashboardConfig) -> DashboardResult<()> {
    let content = config.to_yaml_string()?;
    std::fs::write(path, content).map_err(|source| DashboardError::ConfigFileWrite {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load_json(path: &Path) -> DashboardResult<DashboardConfig> {
    let content =
        std::fs::read_to_string(path).map_err(|source| DashboardError::ConfigFileRead {
            path: path.to_path_buf(),
            source,
        })?;
    let config: DashboardConfig = serde_json::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

/// Pick the loader from the file extension (`.json`, otherwise YAML).
pub fn load(path: &Path) -> DashboardResult<DashboardConfig> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => load_json(path),
        _ => load_yaml(path),
    }
}
