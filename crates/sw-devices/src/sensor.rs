//! Environmental sensors: wind speed, dust accumulation, wind direction.

use serde::{Deserialize, Serialize};
use sw_core::RandomSource;
use sw_core::numeric::wrap_degrees;
use sw_core::units::{Angle, Power, Ratio, Velocity, deg, in_watts, mps, percent};

/// Readings the decision layer needs from the panel's surroundings.
pub trait Sensors {
    fn wind_speed(&mut self) -> Velocity;

    /// Estimated dust accumulation as a fraction of panel area (0-100+ %).
    fn dust_level(&mut self) -> Ratio;

    /// Direction the wind blows from, in `[0, 360)` degrees.
    fn wind_direction(&mut self) -> Angle;
}

/// Ranges used by [`SimulatedSensors`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorRanges {
    pub wind_speed_max_mps: f64,
    pub dust_max_pct: f64,
    /// Largest change of wind direction between two reads.
    pub direction_step_deg: f64,
}

impl Default for SensorRanges {
    fn default() -> Self {
        Self {
            wind_speed_max_mps: 25.0,
            dust_max_pct: 50.0,
            direction_step_deg: 30.0,
        }
    }
}

/// Randomly generated readings.
///
/// Wind speed and dust are independent uniform draws. Wind direction is a
/// random walk so consecutive reads look like a real vane.
#[derive(Debug, Clone)]
pub struct SimulatedSensors<R> {
    rng: R,
    ranges: SensorRanges,
    last_direction_deg: f64,
}

impl<R: RandomSource> SimulatedSensors<R> {
    pub fn new(rng: R) -> Self {
        Self::with_ranges(rng, SensorRanges::default())
    }

    pub fn with_ranges(rng: R, ranges: SensorRanges) -> Self {
        Self {
            rng,
            ranges,
            last_direction_deg: 0.0,
        }
    }

    pub fn ranges(&self) -> &SensorRanges {
        &self.ranges
    }
}

impl<R: RandomSource> Sensors for SimulatedSensors<R> {
    fn wind_speed(&mut self) -> Velocity {
        mps(self.rng.uniform(0.0, self.ranges.wind_speed_max_mps))
    }

    fn dust_level(&mut self) -> Ratio {
        percent(self.rng.uniform(0.0, self.ranges.dust_max_pct))
    }

    fn wind_direction(&mut self) -> Angle {
        let step = self.ranges.direction_step_deg;
        let delta = self.rng.uniform(-step, step);
        self.last_direction_deg = wrap_degrees(self.last_direction_deg + delta);
        deg(self.last_direction_deg)
    }
}

/// Constant readings, e.g. for bench testing the decision layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FixedSensors {
    pub wind_speed_mps: f64,
    pub dust_pct: f64,
    pub wind_direction_deg: f64,
}

impl Sensors for FixedSensors {
    fn wind_speed(&mut self) -> Velocity {
        mps(self.wind_speed_mps)
    }

    fn dust_level(&mut self) -> Ratio {
        percent(self.dust_pct)
    }

    fn wind_direction(&mut self) -> Angle {
        deg(wrap_degrees(self.wind_direction_deg))
    }
}

/// Indirect dust estimate from measured vs. expected panel output.
///
/// `(1 - actual / expected) * 100`, never negative. Zero expected output
/// (night, sensor fault) reads as a clean panel.
pub fn dust_from_power(actual: Power, expected: Power) -> Ratio {
    let expected_w = in_watts(expected);
    if expected_w == 0.0 {
        return percent(0.0);
    }
    let loss = (1.0 - in_watts(actual) / expected_w) * 100.0;
    percent(loss.max(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sw_core::units::{in_deg, in_mps, in_percent, watts};
    use sw_core::{ScriptedRandom, StdRandom, Tolerances, nearly_equal};

    #[test]
    fn simulated_readings_scale_unit_draws() {
        let rng = ScriptedRandom::new(vec![0.5, 0.2]).unwrap();
        let mut s = SimulatedSensors::new(rng);
        let tol = Tolerances::default();
        assert!(nearly_equal(in_mps(s.wind_speed()), 12.5, tol));
        assert!(nearly_equal(in_percent(s.dust_level()), 10.0, tol));
    }

    #[test]
    fn wind_direction_walks_and_wraps() {
        // 0.0 -> delta -30 from a start of 0 -> 330
        let rng = ScriptedRandom::new(vec![0.0]).unwrap();
        let mut s = SimulatedSensors::new(rng);
        let tol = Tolerances::default();
        assert!(nearly_equal(in_deg(s.wind_direction()), 330.0, tol));
        assert!(nearly_equal(in_deg(s.wind_direction()), 300.0, tol));
    }

    #[test]
    fn wind_direction_step_is_bounded() {
        let mut s = SimulatedSensors::new(StdRandom::seeded(7));
        let mut prev = in_deg(s.wind_direction());
        for _ in 0..200 {
            let next = in_deg(s.wind_direction());
            assert!((0.0..360.0).contains(&next));
            assert!(sw_core::heading_difference(prev, next) <= 30.0 + 1e-9);
            prev = next;
        }
    }

    #[test]
    fn dust_from_power_cases() {
        let tol = Tolerances::default();
        let d = in_percent(dust_from_power(watts(250.0), watts(300.0)));
        assert!(nearly_equal(d, 100.0 / 6.0, tol));
        assert_eq!(in_percent(dust_from_power(watts(250.0), watts(0.0))), 0.0);
        // more output than expected is not negative dust
        assert_eq!(in_percent(dust_from_power(watts(320.0), watts(300.0))), 0.0);
    }
}
