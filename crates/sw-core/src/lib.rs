//! sw-core: shared foundation for solarwatch.
//!
//! Contains:
//! - units (uom SI types + constructors for panel quantities)
//! - numeric (float helpers, angle wrapping)
//! - random (injectable pseudo-random source)
//! - clock (injectable local time of day)
//! - log (append-only event sink shared by the dashboard and controllers)
//! - error (shared error types)

pub mod clock;
pub mod error;
pub mod log;
pub mod numeric;
pub mod random;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{SwError, SwResult};
pub use log::{LogSink, MemoryLog};
pub use numeric::*;
pub use random::{RandomSource, ScriptedRandom, StdRandom};
