//! Field devices for a single solar panel.
//!
//! The panel is observed through wind, dust and wind-direction sensors and
//! moved by a two-axis actuator (base rotation and top tilt). A cleaning
//! controller uses either the wind (by turning the panel into it) or a small
//! water reservoir.
//!
//! Only simulated devices live here. Hardware drivers plug in behind the
//! [`Sensors`] trait.

pub mod actuator;
pub mod cleaning;
pub mod error;
pub mod sensor;

pub use actuator::{PanelActuator, PanelPose, ServoAxis, SunMove, duty_cycle};
pub use cleaning::CleaningController;
pub use error::{DeviceError, DeviceResult};
pub use sensor::{FixedSensors, SensorRanges, Sensors, SimulatedSensors, dust_from_power};
