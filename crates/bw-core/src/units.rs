// bw-core/src/units.rs

use uom::si::f64::{
    Angle as UomAngle, AngularVelocity as UomAngularVelocity, Force as UomForce,
    Length as UomLength, Mass as UomMass, MassDensity as UomMassDensity, Power as UomPower,
    Time as UomTime, Velocity as UomVelocity,
};

// Public canonical unit types (SI, f64)
pub type Angle = UomAngle;
pub type AngularVelocity = UomAngularVelocity;
pub type Density = UomMassDensity;
pub type Force = UomForce;
pub type Length = UomLength;
pub type Mass = UomMass;
pub type Power = UomPower;
pub type Time = UomTime;
pub type Velocity = UomVelocity;

#[inline]
pub fn deg(v: f64) -> Angle {
    use uom::si::angle::degree;
    Angle::new::<degree>(v)
}

#[inline]
pub fn rad(v: f64) -> Angle {
    use uom::si::angle::radian;
    Angle::new::<radian>(v)
}

#[inline]
pub fn rpm(v: f64) -> AngularVelocity {
    use uom::si::angular_velocity::revolution_per_minute;
    AngularVelocity::new::<revolution_per_minute>(v)
}

#[inline]
pub fn m(v: f64) -> Length {
    use uom::si::length::meter;
    Length::new::<meter>(v)
}

#[inline]
pub fn s(v: f64) -> Time {
    use uom::si::time::second;
    Time::new::<second>(v)
}

#[inline]
pub fn mps(v: f64) -> Velocity {
    use uom::si::velocity::meter_per_second;
    Velocity::new::<meter_per_second>(v)
}

#[inline]
pub fn kg(v: f64) -> Mass {
    use uom::si::mass::kilogram;
    Mass::new::<kilogram>(v)
}

#[inline]
pub fn kg_per_m3(v: f64) -> Density {
    use uom::si::mass_density::kilogram_per_cubic_meter;
    Density::new::<kilogram_per_cubic_meter>(v)
}

/// Angle in radians as a bare number.
#[inline]
pub fn to_rad(a: Angle) -> f64 {
    use uom::si::angle::radian;
    a.get::<radian>()
}

/// Angular velocity in rad/s as a bare number.
#[inline]
pub fn to_rad_per_s(w: AngularVelocity) -> f64 {
    use uom::si::angular_velocity::radian_per_second;
    w.get::<radian_per_second>()
}

#[inline]
pub fn to_kilonewton(f: Force) -> f64 {
    use uom::si::force::kilonewton;
    f.get::<kilonewton>()
}

#[inline]
pub fn to_megawatt(p: Power) -> f64 {
    use uom::si::power::megawatt;
    p.get::<megawatt>()
}

#[inline]
pub fn newton(v: f64) -> Force {
    use uom::si::force::newton;
    Force::new::<newton>(v)
}

#[inline]
pub fn watt(v: f64) -> Power {
    use uom::si::power::watt;
    Power::new::<watt>(v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Tolerances, nearly_equal};

    #[test]
    fn constructors_smoke() {
        let _l = m(89.17);
        let _dt = s(0.15);
        let _v = mps(9.0);
        let _rho = kg_per_m3(1.225);
        let _m = kg(1.0);
        let _a = rad(0.1);
    }

    #[test]
    fn angle_conversions() {
        let tol = Tolerances::default();
        assert!(nearly_equal(to_rad(deg(180.0)), std::f64::consts::PI, tol));
        assert!(nearly_equal(
            to_rad_per_s(rpm(60.0)),
            2.0 * std::f64::consts::PI,
            tol
        ));
    }

    #[test]
    fn load_conversions() {
        let tol = Tolerances::default();
        assert!(nearly_equal(to_kilonewton(newton(736_733.0)), 736.733, tol));
        assert!(nearly_equal(to_megawatt(watt(4.25e6)), 4.25, tol));
    }
}
