//! Integration test: sensors, actuator and cleaning working together.
//!
//! Scenario: read the simulated wind vane, turn the panel into the wind, then
//! fall back to water cleaning until the reservoir runs dry.

use sw_core::units::{deg, in_deg, in_liters, in_mps, in_percent, liters};
use sw_core::{ScriptedRandom, StdRandom};
use sw_devices::{
    CleaningController, DeviceError, PanelActuator, SensorRanges, Sensors, SimulatedSensors,
    SunMove,
};

#[test]
fn wind_cleaning_follows_sensor_direction() {
    // delta = -30 + 0.75 * 60 = +15 degrees per read
    let rng = ScriptedRandom::new(vec![0.75]).unwrap();
    let mut sensors = SimulatedSensors::new(rng);
    let mut actuator = PanelActuator::new();
    let cleaning = CleaningController::default();

    for expected in [15.0, 30.0, 45.0] {
        let direction = sensors.wind_direction();
        cleaning.tilt_for_wind_cleaning(&mut actuator, direction);
        assert!((actuator.pose().base_deg - expected).abs() < 1e-9);
        assert_eq!(actuator.pose().tilt_deg, 0.0);
    }
}

#[test]
fn reservoir_drains_then_reports_shortage() {
    let mut cleaning = CleaningController::new(liters(0.5), liters(0.125)).unwrap();
    let mut remaining = Vec::new();
    loop {
        match cleaning.clean_with_water() {
            Ok(left) => remaining.push(in_liters(left)),
            Err(DeviceError::InsufficientWater {
                available_l,
                required_l,
            }) => {
                assert!(available_l < required_l);
                break;
            }
            Err(other) => panic!("unexpected error: {other}"),
        }
    }
    assert_eq!(remaining.len(), 4);
    assert!(remaining.windows(2).all(|w| w[1] < w[0]));
}

#[test]
fn custom_ranges_bound_readings() {
    let ranges = SensorRanges {
        wind_speed_max_mps: 10.0,
        dust_max_pct: 5.0,
        direction_step_deg: 1.0,
    };
    let mut sensors = SimulatedSensors::with_ranges(StdRandom::seeded(11), ranges);
    for _ in 0..100 {
        assert!(in_mps(sensors.wind_speed()) < 10.0);
        assert!(in_percent(sensors.dust_level()) < 5.0);
    }
}

#[test]
fn sun_tracking_over_a_day() {
    let mut actuator = PanelActuator::new();
    // Morning: sun in the east, low
    assert_eq!(
        actuator.move_panel_for_sun(deg(90.0), deg(10.0)),
        SunMove::TiltAndBase
    );
    // Mid-morning: small azimuth drift is absorbed by the tilt axis
    assert_eq!(
        actuator.move_panel_for_sun(deg(100.0), deg(35.0)),
        SunMove::TiltOnly
    );
    assert!((in_deg(actuator.base_angle()) - 90.0).abs() < 1e-9);
    // Past zenith from the panel's point of view
    assert_eq!(
        actuator.move_panel_for_sun(deg(100.0), deg(135.0)),
        SunMove::Flipped
    );
    assert!((actuator.pose().tilt_deg - 45.0).abs() < 1e-9);
}
