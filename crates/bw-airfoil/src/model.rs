//! Polar lookup trait.

/// Aerodynamic coefficients at one angle of attack and thickness.
///
/// `f_stat`, `cl_inv` and `cl_fs` are the static separation function, the
/// inviscid (fully attached) lift and the fully separated lift used by the
/// first-order dynamic-stall model.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PolarCoefficients {
    pub cl: f64,
    pub cd: f64,
    pub cm: f64,
    pub f_stat: f64,
    pub cl_inv: f64,
    pub cl_fs: f64,
}

impl PolarCoefficients {
    pub(crate) fn from_row(row: &[f64; 6]) -> Self {
        Self {
            cl: row[0],
            cd: row[1],
            cm: row[2],
            f_stat: row[3],
            cl_inv: row[4],
            cl_fs: row[5],
        }
    }

    /// Linear blend: `(1 - w) * self + w * other`.
    pub fn lerp(&self, other: &Self, w: f64) -> Self {
        let mix = |a: f64, b: f64| a + w * (b - a);
        Self {
            cl: mix(self.cl, other.cl),
            cd: mix(self.cd, other.cd),
            cm: mix(self.cm, other.cm),
            f_stat: mix(self.f_stat, other.f_stat),
            cl_inv: mix(self.cl_inv, other.cl_inv),
            cl_fs: mix(self.cl_fs, other.cl_fs),
        }
    }

    /// Lift coefficient with a lagged separation state `fs`.
    pub fn dynamic_cl(&self, fs: f64) -> f64 {
        fs * self.cl_inv + (1.0 - fs) * self.cl_fs
    }
}

/// Trait for airfoil coefficient lookup.
///
/// Implementations must be thread-safe (Send + Sync) so blades can be
/// evaluated in parallel. Lookups never fail: angles outside the tabulated
/// range clamp to the end rows.
pub trait PolarModel: Send + Sync {
    /// Coefficients at `aoa_deg` (degrees) for relative thickness `thickness_pct` (%).
    fn coefficients(&self, aoa_deg: f64, thickness_pct: f64) -> PolarCoefficients;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_endpoints() {
        let a = PolarCoefficients {
            cl: 1.0,
            cd: 0.01,
            ..Default::default()
        };
        let b = PolarCoefficients {
            cl: 0.0,
            cd: 0.03,
            ..Default::default()
        };
        assert_eq!(a.lerp(&b, 0.0), a);
        assert_eq!(a.lerp(&b, 1.0), b);
        assert!((a.lerp(&b, 0.5).cd - 0.02).abs() < 1e-15);
    }

    #[test]
    fn dynamic_cl_limits() {
        let c = PolarCoefficients {
            cl_inv: 1.2,
            cl_fs: 0.4,
            ..Default::default()
        };
        assert_eq!(c.dynamic_cl(1.0), 1.2);
        assert_eq!(c.dynamic_cl(0.0), 0.4);
    }
}
