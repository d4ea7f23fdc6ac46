//! Synthetic metric feed.
//!
//! A [`MetricsSimulator`] draws a fresh [`MetricSnapshot`] every tick period,
//! writes it to the metric targets and records a log line. It is driven by the
//! host calling [`MetricsSimulator::poll`] with the elapsed time; nothing runs
//! in the background.

use crate::error::DashboardResult;
use crate::snapshot::{
    ENERGY_MAX_HUNDREDTHS, ENERGY_MIN_HUNDREDTHS, MetricSnapshot, PanelStatus, TILT_MAX_DEG,
    TILT_MIN_DEG,
};
use crate::targets::{MetricsDisplay, render_snapshot};
use sw_control::{SampleClock, SampleConfig};
use sw_core::{LogSink, RandomSource};

/// Seconds between two metric updates.
pub const DEFAULT_TICK_PERIOD_S: f64 = 4.0;

pub struct MetricsSimulator<R> {
    rng: R,
    clock: SampleClock,
    ticks: u64,
}

impl<R: RandomSource> MetricsSimulator<R> {
    pub fn new(rng: R, period_s: f64) -> DashboardResult<Self> {
        let config = SampleConfig::new(period_s)?;
        Ok(Self {
            rng,
            clock: SampleClock::new(config),
            ticks: 0,
        })
    }

    /// Draw energy, then tilt, then status.
    pub fn draw(&mut self) -> MetricSnapshot {
        let energy = self.rng.int_inclusive(
            i64::from(ENERGY_MIN_HUNDREDTHS),
            i64::from(ENERGY_MAX_HUNDREDTHS - 1),
        );
        let tilt = self
            .rng
            .int_inclusive(i64::from(TILT_MIN_DEG), i64::from(TILT_MAX_DEG));
        let status = PanelStatus::ALL[self.rng.index(PanelStatus::ALL.len())];

        // int_inclusive clamps to its bounds, so both conversions are in range.
        MetricSnapshot::from_parts(energy as u32, tilt as u32, status)
    }

    /// One update: draw, render, then log.
    pub fn tick(&mut self, display: &mut dyn MetricsDisplay, log: &mut dyn LogSink) -> MetricSnapshot {
        let snapshot = self.draw();
        render_snapshot(display, &snapshot);
        log.append(&snapshot.log_message());
        self.ticks += 1;
        tracing::trace!(tick = self.ticks, energy = %snapshot.energy_text(), "metrics tick");
        snapshot
    }

    /// Tick once immediately and arm the periodic timer.
    ///
    /// Returns `None` when already running; the timer is not re-armed.
    pub fn start(
        &mut self,
        now_s: f64,
        display: &mut dyn MetricsDisplay,
        log: &mut dyn LogSink,
    ) -> Option<MetricSnapshot> {
        if self.clock.is_running() {
            return None;
        }
        let snapshot = self.tick(display, log);
        self.clock.start(now_s);
        tracing::debug!(
            period_s = self.clock.config.period_s,
            "metrics simulator started"
        );
        Some(snapshot)
    }

    /// Run every tick that fell due by `now_s`.
    pub fn poll(
        &mut self,
        now_s: f64,
        display: &mut dyn MetricsDisplay,
        log: &mut dyn LogSink,
    ) -> Vec<MetricSnapshot> {
        let due = self.clock.poll(now_s);
        due.iter().map(|_| self.tick(display, log)).collect()
    }

    pub fn stop(&mut self) {
        if self.clock.is_running() {
            tracing::debug!(ticks = self.ticks, "metrics simulator stopped");
        }
        self.clock.stop();
    }

    pub fn is_running(&self) -> bool {
        self.clock.is_running()
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn period_s(&self) -> f64 {
        self.clock.config.period_s
    }

    pub fn time_until_next(&self, now_s: f64) -> Option<f64> {
        self.clock.time_until_sample(now_s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::targets::DisplaySlots;
    use sw_core::{MemoryLog, ScriptedRandom, StdRandom};

    #[test]
    fn scripted_draw_produces_expected_text() {
        let rng = ScriptedRandom::new(vec![0.4135, 0.42, 0.3]).unwrap();
        let mut sim = MetricsSimulator::new(rng, DEFAULT_TICK_PERIOD_S).unwrap();
        let mut slots = DisplaySlots::default();
        let mut log = MemoryLog::new();

        let snap = sim.tick(&mut slots, &mut log);
        assert_eq!(snap.energy_hundredths(), 913);
        assert_eq!(slots.energy, "9.13 kWh");
        assert_eq!(slots.tilt, "27°");
        assert_eq!(slots.status, "Optimizing");
        assert_eq!(
            log.last(),
            Some("Metrics updated: Energy=9.13 kWh, Tilt=27°, Status=Optimizing")
        );
    }

    #[test]
    fn extreme_draws_stay_in_range() {
        let rng = ScriptedRandom::new(vec![0.0, 0.0, 0.0, 0.999_999, 0.999_999, 0.999_999]).unwrap();
        let mut sim = MetricsSimulator::new(rng, DEFAULT_TICK_PERIOD_S).unwrap();
        let low = sim.draw();
        assert_eq!(low.energy_text(), "5.00 kWh");
        assert_eq!(low.tilt_deg(), 10);
        assert_eq!(low.status(), PanelStatus::Online);
        let high = sim.draw();
        assert_eq!(high.energy_text(), "14.99 kWh");
        assert_eq!(high.tilt_deg(), 50);
        assert_eq!(high.status(), PanelStatus::Error);
    }

    #[test]
    fn start_ticks_once_and_is_idempotent() {
        let mut sim = MetricsSimulator::new(StdRandom::seeded(3), 4.0).unwrap();
        let mut slots = DisplaySlots::default();
        let mut log = MemoryLog::new();

        assert!(sim.start(0.0, &mut slots, &mut log).is_some());
        assert!(sim.start(1.0, &mut slots, &mut log).is_none());
        assert_eq!(log.len(), 1);
        assert_eq!(sim.time_until_next(1.0), Some(3.0));
    }

    #[test]
    fn poll_follows_the_period() {
        let mut sim = MetricsSimulator::new(StdRandom::seeded(9), 4.0).unwrap();
        let mut slots = DisplaySlots::default();
        let mut log = MemoryLog::new();

        assert!(sim.poll(100.0, &mut slots, &mut log).is_empty());
        sim.start(0.0, &mut slots, &mut log);
        assert!(sim.poll(3.9, &mut slots, &mut log).is_empty());
        assert_eq!(sim.poll(4.0, &mut slots, &mut log).len(), 1);
        assert_eq!(sim.poll(12.5, &mut slots, &mut log).len(), 2);
        assert_eq!(sim.ticks(), 4);
        assert_eq!(log.len(), 4);

        sim.stop();
        assert!(!sim.is_running());
        assert!(sim.poll(100.0, &mut slots, &mut log).is_empty());
    }

    #[test]
    fn display_is_written_before_log() {
        struct Ordered<'a>(&'a std::cell::RefCell<Vec<&'static str>>);
        impl MetricsDisplay for Ordered<'_> {
            fn set_energy(&mut self, _: &str) {
                self.0.borrow_mut().push("energy");
            }
            fn set_tilt(&mut self, _: &str) {
                self.0.borrow_mut().push("tilt");
            }
            fn set_status(&mut self, _: &str) {
                self.0.borrow_mut().push("status");
            }
        }
        impl LogSink for Ordered<'_> {
            fn append(&mut self, _: &str) {
                self.0.borrow_mut().push("log");
            }
        }

        let events = std::cell::RefCell::new(Vec::new());
        let mut display = Ordered(&events);
        let mut log = Ordered(&events);
        let mut sim = MetricsSimulator::new(StdRandom::seeded(1), 4.0).unwrap();
        sim.tick(&mut display, &mut log);
        assert_eq!(*events.borrow(), vec!["energy", "tilt", "status", "log"]);
    }

    #[test]
    fn rejects_bad_period() {
        assert!(MetricsSimulator::new(StdRandom::seeded(1), 0.0).is_err());
        assert!(MetricsSimulator::new(StdRandom::seeded(1), f64::NAN).is_err());
    }
}
