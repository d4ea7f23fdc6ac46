//! Panel control layer for Solarwatch.
//!
//! This crate decides what the panel should be doing: tracking the sun,
//! cleaning itself with the wind or with water, or sitting idle on operator
//! request. It runs alongside the dashboard and writes its notable events into
//! the same log.
//!
//! # Architecture
//!
//! - [`SampleClock`] schedules periodic work against a host-supplied time
//! - [`DecisionManager`] owns the field devices and runs one state-machine step per sample
//! - [`OverrideSource`] feeds operator commands into the next step

pub mod decision;
pub mod error;
pub mod overrides;
pub mod sampled;

pub use decision::{
    DecisionConfig, DecisionManager, Readings, StateReport, StepOutcome, SystemState,
};
pub use error::{ControlError, ControlResult};
pub use overrides::{NoOverrides, OverrideCommand, OverrideQueue, OverrideSource};
pub use sampled::{MAX_CATCH_UP, SampleClock, SampleConfig};
