//! Panel cleaning: wind-assisted and water-based.
//!
//! Wind cleaning turns the panel into the wind and lays it flat. Water
//! cleaning runs the pump and vibration motor and consumes a fixed volume from
//! a finite reservoir.

use crate::actuator::PanelActuator;
use crate::error::{DeviceError, DeviceResult};
use sw_core::ensure_finite;
use sw_core::units::{Angle, Volume, deg, in_deg, in_liters, liters};
use tracing::{info, warn};

pub const DEFAULT_RESERVOIR_L: f64 = 2.0;
pub const DEFAULT_WATER_PER_CLEAN_L: f64 = 0.125;

// Volumes pass through uom unit conversion; absorb the rounding.
const VOLUME_EPS_L: f64 = 1e-9;

#[derive(Debug, Clone)]
pub struct CleaningController {
    water_l: f64,
    water_per_clean_l: f64,
    water_cleans: u32,
}

impl Default for CleaningController {
    fn default() -> Self {
        Self {
            water_l: DEFAULT_RESERVOIR_L,
            water_per_clean_l: DEFAULT_WATER_PER_CLEAN_L,
            water_cleans: 0,
        }
    }
}

impl CleaningController {
    /// # Errors
    ///
    /// Returns error if `initial_water` is negative or `water_per_clean` is not positive.
    pub fn new(initial_water: Volume, water_per_clean: Volume) -> DeviceResult<Self> {
        let water_l = ensure_finite(in_liters(initial_water), "initial water volume")?;
        let water_per_clean_l = ensure_finite(in_liters(water_per_clean), "water per clean")?;
        if water_l < 0.0 {
            return Err(DeviceError::InvalidArg {
                what: "initial water volume must be non-negative",
            });
        }
        if water_per_clean_l <= 0.0 {
            return Err(DeviceError::InvalidArg {
                what: "water per clean must be positive",
            });
        }
        Ok(Self {
            water_l,
            water_per_clean_l,
            water_cleans: 0,
        })
    }

    pub fn water_remaining(&self) -> Volume {
        liters(self.water_l)
    }

    pub fn water_per_clean(&self) -> Volume {
        liters(self.water_per_clean_l)
    }

    /// Successful water cleanings since construction.
    pub fn water_cleans(&self) -> u32 {
        self.water_cleans
    }

    /// Turn the panel to face `wind_direction` and flatten it so the wind
    /// sweeps across the surface.
    pub fn tilt_for_wind_cleaning(&self, actuator: &mut PanelActuator, wind_direction: Angle) {
        info!(
            wind_direction_deg = in_deg(wind_direction),
            "tilting panel toward wind for cleaning"
        );
        actuator.rotate_base_to(wind_direction);
        actuator.tilt_top_to(deg(0.0));
    }

    /// Run one water cleaning cycle and return the remaining volume.
    ///
    /// # Errors
    ///
    /// [`DeviceError::InsufficientWater`] when the reservoir holds less than
    /// one cycle's worth. The reservoir is left untouched in that case.
    pub fn clean_with_water(&mut self) -> DeviceResult<Volume> {
        if self.water_l + VOLUME_EPS_L < self.water_per_clean_l {
            warn!(
                available_l = self.water_l,
                required_l = self.water_per_clean_l,
                "insufficient water for cleaning"
            );
            return Err(DeviceError::InsufficientWater {
                available_l: self.water_l,
                required_l: self.water_per_clean_l,
            });
        }

        self.water_l = (self.water_l - self.water_per_clean_l).max(0.0);
        self.water_cleans += 1;
        info!(
            used_l = self.water_per_clean_l,
            remaining_l = self.water_l,
            "water cleaning cycle complete"
        );
        Ok(liters(self.water_l))
    }
}
