//! Decision state machine for panel operation.
//!
//! Four states:
//! - sun tracking (normal operation)
//! - wind cleaning (panel turned into a strong wind for up to a fixed duration)
//! - water cleaning (fallback when the wind is too weak or did not help)
//! - idle (operator stop)
//!
//! Each call to [`DecisionManager::run_logic`] reads the sensors, applies at
//! most one operator override, then runs the handler for the current state.

use crate::error::{ControlError, ControlResult};
use crate::overrides::{OverrideCommand, OverrideSource};
use serde::{Deserialize, Serialize};
use std::fmt;
use sw_core::LogSink;
use sw_core::units::{in_mps, in_percent};
use sw_devices::{CleaningController, PanelActuator, Sensors};
use tracing::{debug, info, warn};

/// Thresholds and timings for the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecisionConfig {
    /// Dust coverage above which cleaning starts.
    pub dust_threshold_pct: f64,
    /// Wind speed above which wind cleaning is attempted.
    pub wind_speed_threshold_mps: f64,
    /// Give up on wind cleaning after this long.
    pub wind_clean_duration_s: f64,
}

impl Default for DecisionConfig {
    fn default() -> Self {
        Self {
            dust_threshold_pct: 20.0,
            wind_speed_threshold_mps: 15.0,
            wind_clean_duration_s: 15.0 * 60.0,
        }
    }
}

impl DecisionConfig {
    pub fn validate(&self) -> ControlResult<()> {
        let checks = [
            ("dust_threshold_pct", self.dust_threshold_pct),
            ("wind_speed_threshold_mps", self.wind_speed_threshold_mps),
            ("wind_clean_duration_s", self.wind_clean_duration_s),
        ];
        for (name, value) in checks {
            if !value.is_finite() || value < 0.0 {
                return Err(ControlError::InvalidConfig {
                    what: format!("{name} must be a non-negative number, got {value}"),
                });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SystemState {
    SunTracking,
    CleaningWind,
    CleaningWater,
    Idle,
}

impl SystemState {
    pub fn label(&self) -> &'static str {
        match self {
            SystemState::SunTracking => "Sun tracking",
            SystemState::CleaningWind => "Wind cleaning",
            SystemState::CleaningWater => "Water cleaning",
            SystemState::Idle => "Idle",
        }
    }
}

impl fmt::Display for SystemState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Published state, as pushed to a remote monitor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StateReport {
    pub current_state: SystemState,
    pub wind_clean_start_time_s: Option<f64>,
}

/// Sensor values read at the start of a step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Readings {
    pub dust_pct: f64,
    pub wind_speed_mps: f64,
}

/// Result of one [`DecisionManager::run_logic`] call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepOutcome {
    pub readings: Readings,
    pub applied_override: Option<OverrideCommand>,
    pub from: SystemState,
    pub to: SystemState,
}

impl StepOutcome {
    pub fn changed(&self) -> bool {
        self.from != self.to
    }
}

pub struct DecisionManager<S> {
    sensors: S,
    actuator: PanelActuator,
    cleaning: CleaningController,
    config: DecisionConfig,
    state: SystemState,
    wind_clean_started_at: Option<f64>,
    last_readings: Option<Readings>,
}

impl<S: Sensors> DecisionManager<S> {
    /// # Errors
    ///
    /// Returns error if `config` fails [`DecisionConfig::validate`].
    pub fn new(
        sensors: S,
        actuator: PanelActuator,
        cleaning: CleaningController,
        config: DecisionConfig,
    ) -> ControlResult<Self> {
        config.validate()?;
        Ok(Self {
            sensors,
            actuator,
            cleaning,
            config,
            state: SystemState::SunTracking,
            wind_clean_started_at: None,
            last_readings: None,
        })
    }

    pub fn state(&self) -> SystemState {
        self.state
    }

    pub fn config(&self) -> &DecisionConfig {
        &self.config
    }

    pub fn actuator(&self) -> &PanelActuator {
        &self.actuator
    }

    pub fn cleaning(&self) -> &CleaningController {
        &self.cleaning
    }

    pub fn sensors_mut(&mut self) -> &mut S {
        &mut self.sensors
    }

    pub fn last_readings(&self) -> Option<Readings> {
        self.last_readings
    }

    pub fn report(&self) -> StateReport {
        StateReport {
            current_state: self.state,
            wind_clean_start_time_s: self.wind_clean_started_at,
        }
    }

    /// One pass of the control loop at time `now_s` (seconds, monotonic).
    pub fn run_logic(
        &mut self,
        now_s: f64,
        overrides: &mut dyn OverrideSource,
        log: &mut dyn LogSink,
    ) -> StepOutcome {
        let from = self.state;
        let readings = Readings {
            dust_pct: in_percent(self.sensors.dust_level()),
            wind_speed_mps: in_mps(self.sensors.wind_speed()),
        };
        self.last_readings = Some(readings);
        debug!(
            state = %self.state,
            dust_pct = readings.dust_pct,
            wind_speed_mps = readings.wind_speed_mps,
            "control step"
        );

        let applied_override = overrides.take_override();
        if let Some(command) = applied_override {
            self.apply_override(command, log);
        }

        match self.state {
            SystemState::SunTracking => self.handle_sun_tracking(readings),
            SystemState::CleaningWind => self.handle_wind_cleaning(now_s, readings),
            SystemState::CleaningWater => self.handle_water_cleaning(log),
            SystemState::Idle => {}
        }

        StepOutcome {
            readings,
            applied_override,
            from,
            to: self.state,
        }
    }

    fn apply_override(&mut self, command: OverrideCommand, log: &mut dyn LogSink) {
        info!(%command, "operator override");
        match command {
            OverrideCommand::ForceClean => {
                self.switch_state(SystemState::CleaningWater);
                log.append("User override: Forced water cleaning.");
            }
            OverrideCommand::StopAll => {
                self.actuator.stop();
                self.switch_state(SystemState::Idle);
                log.append("User override: Stopped all actuators.");
            }
            OverrideCommand::Resume => {
                self.switch_state(SystemState::SunTracking);
                log.append("User override: Resumed sun tracking.");
            }
        }
    }

    fn handle_sun_tracking(&mut self, readings: Readings) {
        if readings.dust_pct > self.config.dust_threshold_pct {
            if readings.wind_speed_mps > self.config.wind_speed_threshold_mps {
                self.switch_state(SystemState::CleaningWind);
            } else {
                self.switch_state(SystemState::CleaningWater);
            }
        } else {
            self.actuator.stop();
        }
    }

    fn handle_wind_cleaning(&mut self, now_s: f64, readings: Readings) {
        let started = match self.wind_clean_started_at {
            Some(t) => t,
            None => {
                self.wind_clean_started_at = Some(now_s);
                let direction = self.sensors.wind_direction();
                self.cleaning
                    .tilt_for_wind_cleaning(&mut self.actuator, direction);
                now_s
            }
        };
        let elapsed = now_s - started;

        if readings.dust_pct <= self.config.dust_threshold_pct {
            self.switch_state(SystemState::SunTracking);
        } else if elapsed > self.config.wind_clean_duration_s {
            self.switch_state(SystemState::CleaningWater);
        }
    }

    fn handle_water_cleaning(&mut self, log: &mut dyn LogSink) {
        if let Err(e) = self.cleaning.clean_with_water() {
            warn!(error = %e, "water cleaning failed");
            log.append("WARNING: Water reservoir empty or cleaning failed.");
        }
        self.switch_state(SystemState::SunTracking);
    }

    fn switch_state(&mut self, next: SystemState) {
        if next != self.state {
            info!(from = %self.state, to = %next, "control state change");
        }
        self.state = next;
        if next != SystemState::CleaningWind {
            self.wind_clean_started_at = None;
        }
    }
}
