//! Spring-mounted airfoil: one plunge degree of freedom in a steady wind.
//!
//! The airfoil moves normal to the wind with velocity `v`, which tilts the
//! relative inflow by `phi = atan(v / V0)`. With dynamic stall enabled the
//! separation function `fs` is a third state relaxing toward its static
//! value with time constant `4c / V_rel`.

use std::sync::Arc;

use bw_airfoil::PolarModel;

use crate::error::{SimError, SimResult};
use crate::model::TransientModel;
use crate::sim::{SimOptions, SimRecord, run_sim};

#[derive(Clone, Debug, PartialEq)]
pub struct SpringAirfoilParams {
    /// Mass (kg)
    pub mass: f64,
    /// Spring stiffness (N/m)
    pub stiffness: f64,
    /// Chord (m)
    pub chord: f64,
    /// Span (m)
    pub span: f64,
    pub wind_speed: f64,
    pub air_density: f64,
    /// Geometric angle of attack (rad)
    pub geometric_aoa_rad: f64,
    pub dynamic_stall_enabled: bool,
    /// Initial displacement (m)
    pub initial_displacement: f64,
    /// Thickness passed to the polar lookup.
    pub thickness_pct: f64,
}

impl Default for SpringAirfoilParams {
    fn default() -> Self {
        Self {
            mass: 1.0,
            stiffness: 61.7,
            chord: 0.2,
            span: 1.0,
            wind_speed: 2.0,
            air_density: 1.225,
            geometric_aoa_rad: 0.0,
            dynamic_stall_enabled: false,
            initial_displacement: 0.02,
            thickness_pct: 24.1,
        }
    }
}

impl SpringAirfoilParams {
    pub fn validate(&self) -> SimResult<()> {
        for (v, what) in [
            (self.mass, "mass must be positive"),
            (self.stiffness, "stiffness must be positive"),
            (self.chord, "chord must be positive"),
            (self.span, "span must be positive"),
            (self.wind_speed, "wind speed must be positive"),
            (self.air_density, "air density must be positive"),
        ] {
            if !(v.is_finite() && v > 0.0) {
                return Err(SimError::InvalidArg { what });
            }
        }
        if !self.geometric_aoa_rad.is_finite() || !self.initial_displacement.is_finite() {
            return Err(SimError::InvalidArg {
                what: "angle of attack and initial displacement must be finite",
            });
        }
        Ok(())
    }
}

/// Displacement, velocity and separation function.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SpringState {
    pub x: f64,
    pub v: f64,
    /// Constant zero when dynamic stall is disabled.
    pub fs: f64,
}

pub struct SpringAirfoil {
    params: SpringAirfoilParams,
    polars: Arc<dyn PolarModel>,
}

impl SpringAirfoil {
    pub fn new(params: SpringAirfoilParams, polars: Arc<dyn PolarModel>) -> SimResult<Self> {
        params.validate()?;
        Ok(Self { params, polars })
    }

    pub fn params(&self) -> &SpringAirfoilParams {
        &self.params
    }

    /// Aerodynamic force on the airfoil along the plunge axis.
    pub fn aero_force(&self, state: &SpringState) -> f64 {
        let p = &self.params;
        let phi = (state.v / p.wind_speed).atan();
        let aoa_deg = (p.geometric_aoa_rad + phi).to_degrees();
        let coeffs = self.polars.coefficients(aoa_deg, p.thickness_pct);
        let cl = if p.dynamic_stall_enabled {
            coeffs.dynamic_cl(state.fs)
        } else {
            coeffs.cl
        };
        let vrel_sq = state.v * state.v + p.wind_speed * p.wind_speed;
        0.5 * p.air_density * vrel_sq * p.chord * p.span * cl * phi.cos()
    }
}

impl TransientModel for SpringAirfoil {
    type State = SpringState;

    fn initial_state(&self) -> SpringState {
        SpringState {
            x: self.params.initial_displacement,
            v: 0.0,
            fs: 0.0,
        }
    }

    fn rhs(&mut self, _t: f64, x: &SpringState) -> SimResult<SpringState> {
        let p = &self.params;
        let force = self.aero_force(x);
        let accel = (-p.stiffness * x.x - force) / p.mass;
        let fs_rate = if p.dynamic_stall_enabled {
            let phi = (x.v / p.wind_speed).atan();
            let aoa_deg = (p.geometric_aoa_rad + phi).to_degrees();
            let f_stat = self.polars.coefficients(aoa_deg, p.thickness_pct).f_stat;
            let vrel = x.v.hypot(p.wind_speed);
            (f_stat - x.fs) * vrel / (4.0 * p.chord)
        } else {
            0.0
        };
        for (what, v) in [("acceleration", accel), ("separation rate", fs_rate)] {
            if !v.is_finite() {
                return Err(SimError::NonPhysical { what });
            }
        }
        Ok(SpringState {
            x: x.v,
            v: accel,
            fs: fs_rate,
        })
    }

    fn add(&self, a: &SpringState, b: &SpringState) -> SpringState {
        SpringState {
            x: a.x + b.x,
            v: a.v + b.v,
            fs: a.fs + b.fs,
        }
    }

    fn scale(&self, a: &SpringState, s: f64) -> SpringState {
        SpringState {
            x: a.x * s,
            v: a.v * s,
            fs: a.fs * s,
        }
    }
}

/// Integrate the spring-mounted airfoil with RK4 on `points` samples over `[0, t_end]`.
pub fn run_spring_airfoil(
    params: SpringAirfoilParams,
    polars: Arc<dyn PolarModel>,
    t_end: f64,
    points: usize,
) -> SimResult<SimRecord<SpringState>> {
    if points < 2 {
        return Err(SimError::InvalidArg {
            what: "at least two output points are required",
        });
    }
    let mut model = SpringAirfoil::new(params, polars)?;
    let span = tracing::info_span!("spring_airfoil", t_end, points);
    let _enter = span.enter();
    let record = run_sim(&mut model, &SimOptions::uniform(t_end, points))?;
    tracing::debug!(
        final_x = record.x.last().map(|s| s.x).unwrap_or_default(),
        "spring airfoil run finished"
    );
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bw_airfoil::PolarCoefficients;
    use std::f64::consts::PI;

    struct Symmetric;

    impl PolarModel for Symmetric {
        fn coefficients(&self, aoa_deg: f64, _thickness_pct: f64) -> PolarCoefficients {
            let a = aoa_deg.to_radians();
            let f_stat = 1.0 / (1.0 + ((aoa_deg.abs() - 14.0) / 2.0).exp());
            let cl_inv = 2.0 * PI * a.sin();
            let cl_fs = 0.5 * (2.0 * a).sin();
            PolarCoefficients {
                cl: f_stat * cl_inv + (1.0 - f_stat) * cl_fs,
                cd: 0.01,
                cm: 0.0,
                f_stat,
                cl_inv,
                cl_fs,
            }
        }
    }

    #[test]
    fn rejects_non_positive_mass() {
        let params = SpringAirfoilParams {
            mass: 0.0,
            ..Default::default()
        };
        assert!(SpringAirfoil::new(params, Arc::new(Symmetric)).is_err());
    }

    #[test]
    fn attached_flow_damps_oscillation() {
        let rec = run_spring_airfoil(SpringAirfoilParams::default(), Arc::new(Symmetric), 40.0, 1000)
            .unwrap();
        assert_eq!(rec.t.len(), 1000);
        let tail_peak = rec.x[900..].iter().map(|s| s.x.abs()).fold(0.0, f64::max);
        assert!(tail_peak < 1e-5);
        assert!(rec.x.iter().all(|s| s.x.is_finite() && s.v.is_finite()));
    }

    #[test]
    fn dynamic_stall_state_tracks_static_value() {
        let params = SpringAirfoilParams {
            dynamic_stall_enabled: true,
            ..Default::default()
        };
        let rec = run_spring_airfoil(params, Arc::new(Symmetric), 40.0, 1000).unwrap();
        let last = rec.x.last().unwrap();
        let f_stat_at_rest = Symmetric.coefficients(0.0, 24.1).f_stat;
        assert!((last.fs - f_stat_at_rest).abs() < 1e-4);
    }

    #[test]
    fn force_vanishes_at_rest_for_symmetric_airfoil() {
        let model = SpringAirfoil::new(SpringAirfoilParams::default(), Arc::new(Symmetric)).unwrap();
        assert_eq!(model.aero_force(&SpringState::default()), 0.0);
    }
}
