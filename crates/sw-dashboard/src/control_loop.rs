//! Panel control loop driven alongside the metric feed.

use crate::config::ControlLoopConfig;
use crate::error::DashboardResult;
use sw_control::{
    DecisionManager, OverrideSource, SampleClock, SampleConfig, StateReport, StepOutcome,
    SystemState,
};
use sw_core::units::liters;
use sw_core::{LogSink, StdRandom};
use sw_devices::{CleaningController, PanelActuator, Sensors, SimulatedSensors};

pub struct ControlLoop<S = SimulatedSensors<StdRandom>> {
    manager: DecisionManager<S>,
    clock: SampleClock,
    steps: u64,
}

impl ControlLoop<SimulatedSensors<StdRandom>> {
    /// Simulated sensors seeded with `seed`, or from entropy.
    pub fn from_config(config: &ControlLoopConfig, seed: Option<u64>) -> DashboardResult<Self> {
        let sensors =
            SimulatedSensors::with_ranges(StdRandom::from_seed_option(seed), config.sensors);
        Self::with_sensors(config, sensors)
    }
}

impl<S: Sensors> ControlLoop<S> {
    pub fn with_sensors(config: &ControlLoopConfig, sensors: S) -> DashboardResult<Self> {
        config.validate()?;
        let cleaning = CleaningController::new(
            liters(config.initial_water_l),
            liters(config.water_per_clean_l),
        )?;
        let manager = DecisionManager::new(
            sensors,
            PanelActuator::new(),
            cleaning,
            config.decision,
        )?;
        Ok(Self {
            manager,
            clock: SampleClock::new(SampleConfig::new(config.period_s)?),
            steps: 0,
        })
    }

    /// Arm the loop; the first step runs one period after `now_s`.
    pub fn start(&mut self, now_s: f64) {
        if !self.clock.is_running() {
            self.clock.start(now_s);
        }
    }

    pub fn stop(&mut self) {
        self.clock.stop();
    }

    pub fn is_running(&self) -> bool {
        self.clock.is_running()
    }

    /// Run every step due by `now_s`, each at its scheduled time.
    pub fn poll(
        &mut self,
        now_s: f64,
        overrides: &mut dyn OverrideSource,
        log: &mut dyn LogSink,
    ) -> Vec<StepOutcome> {
        self.clock
            .poll(now_s)
            .into_iter()
            .map(|at| {
                self.steps += 1;
                self.manager.run_logic(at, overrides, log)
            })
            .collect()
    }

    pub fn state(&self) -> SystemState {
        self.manager.state()
    }

    pub fn report(&self) -> StateReport {
        self.manager.report()
    }

    pub fn manager(&self) -> &DecisionManager<S> {
        &self.manager
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn time_until_next(&self, now_s: f64) -> Option<f64> {
        self.clock.time_until_sample(now_s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sw_control::{NoOverrides, OverrideCommand, OverrideQueue};
    use sw_core::MemoryLog;
    use sw_devices::FixedSensors;

    fn dusty_calm() -> FixedSensors {
        FixedSensors {
            wind_speed_mps: 3.0,
            dust_pct: 35.0,
            wind_direction_deg: 90.0,
        }
    }

    #[test]
    fn idle_until_started() {
        let mut lp = ControlLoop::with_sensors(&ControlLoopConfig::default(), dusty_calm()).unwrap();
        let mut log = MemoryLog::new();
        assert!(lp.poll(100.0, &mut NoOverrides, &mut log).is_empty());
        assert_eq!(lp.state(), SystemState::SunTracking);
    }

    #[test]
    fn steps_on_period() {
        let mut lp = ControlLoop::with_sensors(&ControlLoopConfig::default(), dusty_calm()).unwrap();
        let mut log = MemoryLog::new();
        lp.start(0.0);
        assert!(lp.poll(1.0, &mut NoOverrides, &mut log).is_empty());
        let outcomes = lp.poll(2.0, &mut NoOverrides, &mut log);
        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].to, SystemState::CleaningWater);
        assert_eq!(lp.steps(), 1);
    }

    #[test]
    fn override_is_forwarded() {
        let mut lp = ControlLoop::with_sensors(&ControlLoopConfig::default(), dusty_calm()).unwrap();
        let mut log = MemoryLog::new();
        let mut queue = OverrideQueue::new();
        queue.push(OverrideCommand::StopAll);
        lp.start(0.0);
        let outcomes = lp.poll(2.0, &mut queue, &mut log);
        assert_eq!(outcomes[0].applied_override, Some(OverrideCommand::StopAll));
        assert_eq!(lp.state(), SystemState::Idle);
        assert_eq!(log.last(), Some("User override: Stopped all actuators."));
    }

    #[test]
    fn stalled_host_replays_steps_at_their_scheduled_times() {
        let windy = FixedSensors {
            wind_speed_mps: 20.0,
            dust_pct: 35.0,
            wind_direction_deg: 90.0,
        };
        let mut lp = ControlLoop::with_sensors(&ControlLoopConfig::default(), windy).unwrap();
        let mut log = MemoryLog::new();
        lp.start(0.0);

        // Steps fall due at 2, 4, ..., 20; the catch-up cap keeps the first eight.
        let outcomes = lp.poll(20.0, &mut NoOverrides, &mut log);
        assert_eq!(outcomes.len(), 8);
        assert_eq!(outcomes[0].to, SystemState::CleaningWind);
        assert_eq!(lp.state(), SystemState::CleaningWind);
        // Entered at the 2 s step, timed from the 4 s step.
        assert_eq!(lp.report().wind_clean_start_time_s, Some(4.0));
    }

    #[test]
    fn invalid_config_rejected() {
        let config = ControlLoopConfig {
            period_s: -1.0,
            ..ControlLoopConfig::default()
        };
        assert!(ControlLoop::from_config(&config, Some(1)).is_err());
    }
}
