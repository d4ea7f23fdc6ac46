//! Sampled execution for periodic jobs.
//!
//! The dashboard metrics and the decision loop both run on a fixed period.
//! Nothing here owns a thread: the host polls the clock with the current time
//! and runs the job once per returned sample.

use crate::error::{ControlError, ControlResult};
use serde::{Deserialize, Serialize};

/// Upper bound on samples replayed by a single [`SampleClock::poll`].
///
/// A host that stalls longer than this many periods skips the backlog and
/// resynchronises to the current time.
pub const MAX_CATCH_UP: u32 = 8;

/// Sample configuration for a periodic job.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SampleConfig {
    /// Sample period in seconds.
    pub period_s: f64,
}

impl SampleConfig {
    /// Create a new sample configuration.
    ///
    /// # Errors
    ///
    /// Returns error if `period_s` is not a positive finite number.
    pub fn new(period_s: f64) -> ControlResult<Self> {
        if !period_s.is_finite() || period_s <= 0.0 {
            return Err(ControlError::InvalidArg {
                what: "sample period must be positive",
            });
        }
        Ok(Self { period_s })
    }

    /// Get the sample frequency in Hz.
    pub fn frequency(&self) -> f64 {
        1.0 / self.period_s
    }
}

/// Tracks when a periodic job should run next.
///
/// A clock starts disarmed. [`SampleClock::start`] arms it one period after
/// the start time; [`SampleClock::stop`] disarms it again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleClock {
    /// Sample configuration.
    pub config: SampleConfig,
    /// Time of next scheduled sample, `None` while stopped.
    pub next_sample_time: Option<f64>,
}

impl SampleClock {
    pub fn new(config: SampleConfig) -> Self {
        Self {
            config,
            next_sample_time: None,
        }
    }

    /// Arm the clock. The first sample falls due at `now + period`.
    pub fn start(&mut self, now: f64) {
        self.next_sample_time = Some(now + self.config.period_s);
    }

    /// Disarm the clock. Pending samples are dropped.
    pub fn stop(&mut self) {
        self.next_sample_time = None;
    }

    pub fn is_running(&self) -> bool {
        self.next_sample_time.is_some()
    }

    /// Consume every sample due at `now` and return their scheduled times,
    /// oldest first.
    ///
    /// At most [`MAX_CATCH_UP`] samples are returned; past that the schedule
    /// restarts from `now`.
    pub fn poll(&mut self, now: f64) -> Vec<f64> {
        let Some(mut next) = self.next_sample_time else {
            return Vec::new();
        };
        let mut due = Vec::new();
        while now >= next {
            due.push(next);
            next += self.config.period_s;
            if due.len() == MAX_CATCH_UP as usize {
                if now >= next {
                    next = now + self.config.period_s;
                }
                break;
            }
        }
        self.next_sample_time = Some(next);
        due
    }

    /// Time until the next sample, `None` while stopped.
    pub fn time_until_sample(&self, now: f64) -> Option<f64> {
        self.next_sample_time.map(|t| (t - now).max(0.0))
    }
}
