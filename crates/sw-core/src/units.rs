// sw-core/src/units.rs

use uom::si::f64::{
    Angle as UomAngle, Power as UomPower, Ratio as UomRatio,
    Velocity as UomVelocity, Volume as UomVolume,
};

// Public canonical unit types (SI, f64)
pub type Angle = UomAngle;
pub type Power = UomPower;
pub type Ratio = UomRatio;
pub type Velocity = UomVelocity;
pub type Volume = UomVolume;

#[inline]
pub fn deg(v: f64) -> Angle {
    use uom::si::angle::degree;
    Angle::new::<degree>(v)
}

#[inline]
pub fn watts(v: f64) -> Power {
    use uom::si::power::watt;
    Power::new::<watt>(v)
}

#[inline]
pub fn percent(v: f64) -> Ratio {
    use uom::si::ratio::percent;
    Ratio::new::<percent>(v)
}

#[inline]
pub fn mps(v: f64) -> Velocity {
    use uom::si::velocity::meter_per_second;
    Velocity::new::<meter_per_second>(v)
}

#[inline]
pub fn liters(v: f64) -> Volume {
    use uom::si::volume::liter;
    Volume::new::<liter>(v)
}

// Accessors back to the display units used on the dashboard.

#[inline]
pub fn in_deg(a: Angle) -> f64 {
    use uom::si::angle::degree;
    a.get::<degree>()
}

#[inline]
pub fn in_watts(p: Power) -> f64 {
    use uom::si::power::watt;
    p.get::<watt>()
}

#[inline]
pub fn in_percent(r: Ratio) -> f64 {
    use uom::si::ratio::percent;
    r.get::<percent>()
}

#[inline]
pub fn in_mps(v: Velocity) -> f64 {
    use uom::si::velocity::meter_per_second;
    v.get::<meter_per_second>()
}

#[inline]
pub fn in_liters(v: Volume) -> f64 {
    use uom::si::volume::liter;
    v.get::<liter>()
}
