//! Local time-of-day source for log timestamps.

use chrono::{Local, NaiveTime, TimeDelta};
use std::cell::Cell;

/// Source of the current local time of day.
pub trait Clock {
    fn time_of_day(&self) -> NaiveTime;
}

/// Human-readable local time, e.g. `3:04:05 PM`.
pub fn format_time_of_day(t: NaiveTime) -> String {
    t.format("%-I:%M:%S %p").to_string()
}

/// Wall clock in the host's local time zone.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn time_of_day(&self) -> NaiveTime {
        Local::now().time()
    }
}

/// Deterministic clock: returns `start`, then advances by `step` on every read.
#[derive(Debug, Clone)]
pub struct FixedClock {
    next: Cell<NaiveTime>,
    step: TimeDelta,
}

impl FixedClock {
    pub fn new(start: NaiveTime) -> Self {
        Self::stepping(start, TimeDelta::zero())
    }

    pub fn stepping(start: NaiveTime, step: TimeDelta) -> Self {
        Self {
            next: Cell::new(start),
            step,
        }
    }
}

impl Clock for FixedClock {
    fn time_of_day(&self) -> NaiveTime {
        let now = self.next.get();
        // NaiveTime arithmetic wraps at midnight
        self.next.set(now + self.step);
        now
    }
}
