//! Two-axis panel actuator.
//!
//! - Base actuator: rotation of the whole panel about the vertical axis, `[0, 360)`.
//! - Tilt actuator: elevation of the panel top, `[0, 90]`.
//!
//! For sun tracking the tilt axis does most of the work. The base only turns
//! when the sun has moved far around the horizon or when the required
//! elevation is past vertical.

use serde::{Deserialize, Serialize};
use sw_core::numeric::{heading_difference, wrap_degrees};
use sw_core::units::{Angle, deg, in_deg};
use tracing::{debug, info};

/// Maximum tilt the top actuator supports.
pub const MAX_TILT_DEG: f64 = 90.0;

/// Azimuth error the tilt axis tolerates before the base is turned.
pub const REBASE_THRESHOLD_DEG: f64 = 15.0;

/// Which servo an angle refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServoAxis {
    Base,
    Tilt,
}

/// Current orientation of the panel.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PanelPose {
    pub base_deg: f64,
    pub tilt_deg: f64,
}

/// What [`PanelActuator::move_panel_for_sun`] had to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SunMove {
    /// Sun within reach of the tilt axis and close to the current heading.
    TiltOnly,
    /// Sun within reach of the tilt axis but far around the horizon.
    TiltAndBase,
    /// Sun past vertical: base turned to the opposite azimuth, tilt mirrored.
    Flipped,
}

/// Simulated two-axis actuator. Commands take effect immediately.
#[derive(Debug, Clone)]
pub struct PanelActuator {
    pose: PanelPose,
    moving: bool,
}

impl Default for PanelActuator {
    fn default() -> Self {
        Self::new()
    }
}

impl PanelActuator {
    pub fn new() -> Self {
        Self {
            pose: PanelPose::default(),
            moving: false,
        }
    }

    pub fn pose(&self) -> PanelPose {
        self.pose
    }

    pub fn base_angle(&self) -> Angle {
        deg(self.pose.base_deg)
    }

    pub fn tilt_angle(&self) -> Angle {
        deg(self.pose.tilt_deg)
    }

    /// True between a move command and the next [`PanelActuator::stop`].
    pub fn is_moving(&self) -> bool {
        self.moving
    }

    /// Rotate the base to `target`, wrapped into `[0, 360)`.
    pub fn rotate_base_to(&mut self, target: Angle) {
        let target_deg = wrap_degrees(in_deg(target));
        info!(
            from = self.pose.base_deg,
            to = target_deg,
            "rotating panel base"
        );
        self.pose.base_deg = target_deg;
        self.moving = true;
    }

    /// Tilt the top to `target`, clamped to `[0, 90]`.
    pub fn tilt_top_to(&mut self, target: Angle) {
        let target_deg = in_deg(target).clamp(0.0, MAX_TILT_DEG);
        info!(
            from = self.pose.tilt_deg,
            to = target_deg,
            "tilting panel top"
        );
        self.pose.tilt_deg = target_deg;
        self.moving = true;
    }

    /// Halt both axes (manual override or emergency stop).
    pub fn stop(&mut self) {
        if self.moving {
            debug!("stopping actuators");
        }
        self.moving = false;
    }

    /// Point the panel at the sun.
    ///
    /// `elevation` is clamped to `[0, 180]` (0 = horizon, 90 = zenith, past 90
    /// = behind the panel).
    pub fn move_panel_for_sun(&mut self, azimuth: Angle, elevation: Angle) -> SunMove {
        let azimuth_deg = wrap_degrees(in_deg(azimuth));
        let elevation_deg = in_deg(elevation).clamp(0.0, 180.0);

        if elevation_deg <= MAX_TILT_DEG {
            self.tilt_top_to(deg(elevation_deg));
            if heading_difference(azimuth_deg, self.pose.base_deg) > REBASE_THRESHOLD_DEG {
                self.rotate_base_to(deg(azimuth_deg));
                SunMove::TiltAndBase
            } else {
                SunMove::TiltOnly
            }
        } else {
            let opposite = wrap_degrees(azimuth_deg + 180.0);
            let mirrored = (180.0 - elevation_deg).clamp(0.0, MAX_TILT_DEG);
            self.rotate_base_to(deg(opposite));
            self.tilt_top_to(deg(mirrored));
            SunMove::Flipped
        }
    }
}

/// PWM duty cycle (percent) for a servo angle.
///
/// Base: 0..360 maps onto 2.5..12.5. Tilt: 0..90 maps onto 2.5..7.0.
pub fn duty_cycle(angle: Angle, axis: ServoAxis) -> f64 {
    match axis {
        ServoAxis::Base => 2.5 + wrap_degrees(in_deg(angle)) / 360.0 * 10.0,
        ServoAxis::Tilt => 2.5 + in_deg(angle).clamp(0.0, MAX_TILT_DEG) / MAX_TILT_DEG * 4.5,
    }
}
