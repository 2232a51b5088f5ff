//! Free-stream wind field.

/// Power-law shear profile `V(x) = V0 * (x / H)^exponent`, where `x` is height.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShearProfile {
    pub reference_speed: f64,
    pub hub_height: f64,
    pub exponent: f64,
}

impl ShearProfile {
    pub fn uniform(reference_speed: f64, hub_height: f64) -> Self {
        Self {
            reference_speed,
            hub_height,
            exponent: 0.0,
        }
    }

    /// Wind speed at `height`. A sheared profile is undefined at or below
    /// ground and yields NaN there, which the rotor reports as a fault.
    pub fn speed_at(&self, height: f64) -> f64 {
        if self.exponent == 0.0 {
            return self.reference_speed;
        }
        if height <= 0.0 {
            return f64::NAN;
        }
        self.reference_speed * (height / self.hub_height).powf(self.exponent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_exponent_is_height_independent() {
        let p = ShearProfile::uniform(9.0, 119.0);
        for h in [1.0, 30.0, 119.0, 208.0] {
            assert_eq!(p.speed_at(h), 9.0);
        }
    }

    #[test]
    fn shear_grows_with_height() {
        let p = ShearProfile {
            reference_speed: 9.0,
            hub_height: 119.0,
            exponent: 0.2,
        };
        assert_eq!(p.speed_at(119.0), 9.0);
        assert!(p.speed_at(200.0) > 9.0);
        assert!(p.speed_at(40.0) < 9.0);
        assert!((p.speed_at(238.0) - 9.0 * 2f64.powf(0.2)).abs() < 1e-12);
    }

    #[test]
    fn sheared_profile_is_undefined_below_ground() {
        let p = ShearProfile {
            reference_speed: 9.0,
            hub_height: 119.0,
            exponent: 0.2,
        };
        assert!(p.speed_at(0.0).is_nan());
        assert!(p.speed_at(-1.0).is_nan());
        assert_eq!(ShearProfile::uniform(9.0, 119.0).speed_at(-1.0), 9.0);
    }
}
