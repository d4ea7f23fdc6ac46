//! Dashboard facade used by the CLI and GUI front ends.
//!
//! Owns the metric feed, the log, the bound charts and the optional control
//! loop. The host calls [`Dashboard::startup`] once, then [`Dashboard::update`]
//! with the elapsed time whenever it gets a chance (every frame, or on the
//! instant returned by [`Dashboard::next_wakeup`]).

use crate::actions::{Dialogs, on_reset_system, on_start_cleaning};
use crate::charts::{ChartPresenter, default_charts};
use crate::config::DashboardConfig;
use crate::control_loop::ControlLoop;
use crate::error::DashboardResult;
use crate::log::LogRegistry;
use crate::simulator::MetricsSimulator;
use crate::snapshot::MetricSnapshot;
use crate::targets::{DisplaySlots, METRIC_TARGETS, RenderHost, SurfaceLayout, require_targets};
use sw_control::{OverrideCommand, OverrideQueue, StateReport, StepOutcome};
use sw_core::{Clock, RandomSource, StdRandom, SystemClock};

/// What one [`Dashboard::update`] call did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateSummary {
    pub snapshots: Vec<MetricSnapshot>,
    pub steps: Vec<StepOutcome>,
}

impl UpdateSummary {
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty() && self.steps.is_empty()
    }
}

pub struct Dashboard {
    config: DashboardConfig,
    display: DisplaySlots,
    log: LogRegistry,
    charts: ChartPresenter,
    simulator: MetricsSimulator<Box<dyn RandomSource>>,
    control: Option<ControlLoop>,
    overrides: OverrideQueue,
    latest: Option<MetricSnapshot>,
    started: bool,
}

impl Dashboard {
    /// Build a dashboard against `host`.
    ///
    /// # Errors
    ///
    /// Fails on an invalid config, or when `host` is missing a metric target
    /// or chart surface. Nothing is rendered or logged in that case.
    pub fn new(
        config: DashboardConfig,
        rng: Box<dyn RandomSource>,
        clock: Box<dyn Clock>,
        host: &dyn RenderHost,
    ) -> DashboardResult<Self> {
        config.validate()?;
        require_targets(host, METRIC_TARGETS)?;
        let charts = ChartPresenter::bind(default_charts(), host)?;
        let simulator = MetricsSimulator::new(rng, config.tick_period_s)?;
        let control = if config.control.enabled {
            let seed = config.seed.map(|s| s.wrapping_add(1));
            Some(ControlLoop::from_config(&config.control, seed)?)
        } else {
            None
        };
        let log = LogRegistry::with_capacity(clock, config.log_capacity);

        tracing::debug!(
            tick_period_s = config.tick_period_s,
            control = config.control.enabled,
            "dashboard built"
        );
        Ok(Self {
            config,
            display: DisplaySlots::default(),
            log,
            charts,
            simulator,
            control,
            overrides: OverrideQueue::new(),
            latest: None,
            started: false,
        })
    }

    /// Wall clock, seeded or entropy RNG, and a host exposing `config.surfaces`.
    pub fn from_config(config: DashboardConfig) -> DashboardResult<Self> {
        let rng: Box<dyn RandomSource> = Box::new(StdRandom::from_seed_option(config.seed));
        let layout = SurfaceLayout::new(config.surfaces.iter().cloned());
        Self::new(config, rng, Box::new(SystemClock), &layout)
    }

    /// First metric update and timer start. Later calls do nothing.
    pub fn startup(&mut self, now_s: f64) -> Option<MetricSnapshot> {
        if self.started {
            return None;
        }
        self.started = true;
        let snapshot = self.simulator.start(now_s, &mut self.display, &mut self.log);
        if let Some(snapshot) = snapshot {
            self.latest = Some(snapshot);
        }
        if let Some(control) = self.control.as_mut() {
            control.start(now_s);
        }
        tracing::info!("dashboard started");
        snapshot
    }

    /// Run whatever fell due by `now_s`.
    pub fn update(&mut self, now_s: f64) -> UpdateSummary {
        let snapshots = self.simulator.poll(now_s, &mut self.display, &mut self.log);
        if let Some(last) = snapshots.last() {
            self.latest = Some(*last);
        }
        let steps = match self.control.as_mut() {
            Some(control) => control.poll(now_s, &mut self.overrides, &mut self.log),
            None => Vec::new(),
        };
        for step in steps.iter().filter(|s| s.changed()) {
            tracing::info!(from = %step.from, to = %step.to, "panel state changed");
        }
        UpdateSummary { snapshots, steps }
    }

    /// Operator pressed "start cleaning".
    pub fn start_cleaning(&mut self, dialogs: &mut dyn Dialogs) {
        on_start_cleaning(dialogs, &mut self.log);
        self.queue_override(OverrideCommand::ForceClean);
    }

    /// Operator pressed "reset". Returns whether it was confirmed.
    pub fn reset_system(&mut self, dialogs: &mut dyn Dialogs) -> bool {
        let confirmed = on_reset_system(dialogs, &mut self.log);
        if confirmed {
            self.queue_override(OverrideCommand::Resume);
        }
        confirmed
    }

    /// Hand `command` to the control loop's next step. Dropped when the loop is disabled.
    pub fn queue_override(&mut self, command: OverrideCommand) {
        if self.control.is_some() {
            self.overrides.push(command);
        } else {
            tracing::debug!(%command, "control loop disabled, override dropped");
        }
    }

    /// Stop both timers. The dashboard can not be started again.
    pub fn shutdown(&mut self) {
        self.simulator.stop();
        if let Some(control) = self.control.as_mut() {
            control.stop();
        }
        tracing::info!(ticks = self.simulator.ticks(), "dashboard stopped");
    }

    /// Seconds until something falls due, `None` when nothing is scheduled.
    pub fn next_wakeup(&self, now_s: f64) -> Option<f64> {
        let metrics = self.simulator.time_until_next(now_s);
        let control = self
            .control
            .as_ref()
            .and_then(|c| c.time_until_next(now_s));
        match (metrics, control) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    pub fn is_running(&self) -> bool {
        self.simulator.is_running()
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn display(&self) -> &DisplaySlots {
        &self.display
    }

    pub fn log(&self) -> &LogRegistry {
        &self.log
    }

    pub fn charts(&self) -> &ChartPresenter {
        &self.charts
    }

    pub fn latest(&self) -> Option<MetricSnapshot> {
        self.latest
    }

    pub fn control(&self) -> Option<&ControlLoop> {
        self.control.as_ref()
    }

    pub fn control_report(&self) -> Option<StateReport> {
        self.control.as_ref().map(ControlLoop::report)
    }

    pub fn pending_overrides(&self) -> usize {
        self.overrides.len()
    }

    pub fn ticks(&self) -> u64 {
        self.simulator.ticks()
    }
}

impl std::fmt::Debug for Dashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dashboard")
            .field("started", &self.started)
            .field("ticks", &self.simulator.ticks())
            .field("log", &self.log)
            .field("control", &self.control_report())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::RecordingDialogs;
    use crate::error::DashboardError;
    use crate::targets::all_target_names;
    use chrono::NaiveTime;
    use sw_core::FixedClock;

    fn dashboard(control: bool) -> Dashboard {
        let mut config = DashboardConfig {
            seed: Some(11),
            ..DashboardConfig::default()
        };
        config.control.enabled = control;
        let clock = FixedClock::new(NaiveTime::from_hms_opt(9, 30, 0).unwrap());
        Dashboard::new(
            config,
            Box::new(StdRandom::seeded(11)),
            Box::new(clock),
            &SurfaceLayout::full(),
        )
        .unwrap()
    }

    #[test]
    fn startup_is_idempotent() {
        let mut dash = dashboard(false);
        assert!(dash.startup(0.0).is_some());
        assert!(dash.startup(0.5).is_none());
        assert_eq!(dash.log().len(), 1);
        assert_eq!(dash.ticks(), 1);
        assert!(!dash.display().energy.is_empty());
        assert_eq!(dash.log().latest().unwrap().timestamp, "9:30:00 AM");
    }

    #[test]
    fn missing_surface_fails_before_anything_renders() {
        let names: Vec<&str> = all_target_names()
            .into_iter()
            .filter(|n| *n != crate::charts::DUST_CHART)
            .collect();
        let host = SurfaceLayout::new(names);
        let result = Dashboard::new(
            DashboardConfig::default(),
            Box::new(StdRandom::seeded(1)),
            Box::new(SystemClock),
            &host,
        );
        match result {
            Err(DashboardError::MissingSurface { surface }) => assert_eq!(surface, "dustChart"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn cleaning_reaches_the_control_loop() {
        let mut dash = dashboard(true);
        dash.startup(0.0);
        let mut dialogs = RecordingDialogs::default();
        dash.start_cleaning(&mut dialogs);
        assert_eq!(dash.pending_overrides(), 1);

        let summary = dash.update(2.0);
        assert_eq!(summary.steps.len(), 1);
        assert_eq!(
            summary.steps[0].applied_override,
            Some(OverrideCommand::ForceClean)
        );
        assert_eq!(dash.pending_overrides(), 0);
        let messages: Vec<&str> = dash.log().entries().map(|e| e.message.as_str()).collect();
        assert!(messages.contains(&"User triggered cleaning."));
        assert!(messages.contains(&"User override: Forced water cleaning."));
    }

    #[test]
    fn declined_reset_queues_nothing() {
        let mut dash = dashboard(true);
        dash.startup(0.0);
        let before = dash.log().len();
        assert!(!dash.reset_system(&mut RecordingDialogs::answering(false)));
        assert_eq!(dash.log().len(), before);
        assert_eq!(dash.pending_overrides(), 0);

        assert!(dash.reset_system(&mut RecordingDialogs::answering(true)));
        assert_eq!(dash.pending_overrides(), 1);
        let summary = dash.update(2.0);
        assert_eq!(summary.steps[0].applied_override, Some(OverrideCommand::Resume));
        assert_eq!(
            dash.log().latest().unwrap().message,
            "User override: Resumed sun tracking."
        );
    }

    #[test]
    fn without_control_loop_overrides_are_dropped() {
        let mut dash = dashboard(false);
        dash.startup(0.0);
        dash.start_cleaning(&mut RecordingDialogs::default());
        assert_eq!(dash.pending_overrides(), 0);
        assert!(dash.control_report().is_none());
        assert_eq!(dash.log().latest().unwrap().message, "User triggered cleaning.");
    }

    #[test]
    fn next_wakeup_picks_the_earlier_timer() {
        let mut dash = dashboard(true);
        assert_eq!(dash.next_wakeup(0.0), None);
        dash.startup(0.0);
        assert_eq!(dash.next_wakeup(0.5), Some(1.5));
        dash.shutdown();
        assert_eq!(dash.next_wakeup(0.5), None);
        assert!(dash.update(100.0).is_empty());
    }
}
