//! Blade-element momentum time march.
//!
//! Each step reads only the previous step's induced velocity and separation
//! state, so blades are advanced in parallel and results do not depend on
//! the number of worker threads.

use std::f64::consts::{PI, TAU};
use std::sync::Arc;

use bw_airfoil::PolarModel;
use bw_core::trapezoid;
use nalgebra::Vector3;
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::error::{FaultLocation, SimError, SimResult};
use crate::frames::{BladeFrame, RotorFrames};
use crate::geometry::{BladeElement, BladeGeometry};
use crate::history::{BemHistory, ElementState, RotorSample};
use crate::inflow::ShearProfile;
use crate::pitch::PitchSchedule;
use crate::stall::update_separation;
use crate::wake::{
    DynamicWakeFilter, MAX_FILTER_INDUCTION, MomentumInputs, prandtl_factor,
    quasi_steady_induction,
};

pub const DEFAULT_SHEAR_EXPONENT: f64 = 0.2;
pub const DEFAULT_WAKE_GAIN: f64 = 0.6;

/// Immutable run configuration. Angles in radians, SI units elsewhere.
#[derive(Clone, Debug, PartialEq)]
pub struct BemConfig {
    pub blades: usize,
    pub rotor_radius: f64,
    pub hub_height: f64,
    pub shaft_length: f64,
    /// Rotor speed (rad/s), constant.
    pub rotor_speed: f64,
    pub tilt_rad: f64,
    pub yaw_rad: f64,
    pub cone_rad: f64,

    /// Reference wind speed at hub height (m/s).
    pub wind_speed: f64,
    pub air_density: f64,
    pub wind_shear_enabled: bool,
    pub shear_exponent: f64,

    pub dt: f64,
    /// Number of stored steps including the initial condition.
    pub steps: usize,

    pub dynamic_stall_enabled: bool,
    pub dynamic_wake_filter_enabled: bool,
    pub dynamic_wake_gain: f64,

    pub pitch_control_enabled: bool,
    pub pitch: PitchSchedule,
}

impl Default for BemConfig {
    /// DTU 10 MW rotor at 9 m/s with every unsteady model switched on.
    fn default() -> Self {
        Self {
            blades: 3,
            rotor_radius: 89.17,
            hub_height: 119.0,
            shaft_length: 7.1,
            rotor_speed: 0.757,
            tilt_rad: 0.0,
            yaw_rad: 0.0,
            cone_rad: 0.0,
            wind_speed: 9.0,
            air_density: 1.225,
            wind_shear_enabled: false,
            shear_exponent: DEFAULT_SHEAR_EXPONENT,
            dt: 0.15,
            steps: 1200,
            dynamic_stall_enabled: true,
            dynamic_wake_filter_enabled: true,
            dynamic_wake_gain: DEFAULT_WAKE_GAIN,
            pitch_control_enabled: false,
            pitch: PitchSchedule::Window {
                start_s: 100.0,
                end_s: 150.0,
                pitch_rad: 2f64.to_radians(),
            },
        }
    }
}

impl BemConfig {
    pub fn validate(&self) -> SimResult<()> {
        let positive = |v: f64, what: &'static str| {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(SimError::InvalidArg { what })
            }
        };
        if self.blades == 0 {
            return Err(SimError::InvalidArg {
                what: "blade count must be at least 1",
            });
        }
        if self.steps == 0 {
            return Err(SimError::InvalidArg {
                what: "step count must be at least 1",
            });
        }
        positive(self.rotor_radius, "rotor radius must be positive")?;
        positive(self.hub_height, "hub height must be positive")?;
        positive(self.wind_speed, "wind speed must be positive")?;
        positive(self.air_density, "air density must be positive")?;
        positive(self.dt, "time step must be positive")?;
        for (v, what) in [
            (self.shaft_length, "shaft length must be finite"),
            (self.rotor_speed, "rotor speed must be finite"),
            (self.tilt_rad, "tilt must be finite"),
            (self.yaw_rad, "yaw must be finite"),
            (self.cone_rad, "cone must be finite"),
            (self.shear_exponent, "shear exponent must be finite"),
            (self.dynamic_wake_gain, "dynamic wake gain must be finite"),
        ] {
            if !v.is_finite() {
                return Err(SimError::InvalidArg { what });
            }
        }
        self.pitch.validate()
    }

    /// Shear exponent in effect: zero when shear is switched off.
    pub fn effective_shear_exponent(&self) -> f64 {
        if self.wind_shear_enabled {
            self.shear_exponent
        } else {
            0.0
        }
    }

    pub fn rotor_area(&self) -> f64 {
        PI * self.rotor_radius * self.rotor_radius
    }

    /// Pitch applied at simulated time `t`.
    pub fn pitch_at(&self, t: f64) -> f64 {
        if self.pitch_control_enabled {
            self.pitch.pitch_at(t)
        } else {
            0.0
        }
    }
}

/// Progress callback payload.
#[derive(Clone, Copy, Debug)]
pub struct BemProgress {
    pub step: usize,
    pub total_steps: usize,
    pub time_s: f64,
    pub thrust: f64,
    pub power: f64,
}

/// Explicit time march of a rigid rotor in a steady, optionally sheared, wind.
pub struct BemSimulator {
    config: BemConfig,
    geometry: BladeGeometry,
    polars: Arc<dyn PolarModel>,
    frames: RotorFrames,
    shear: ShearProfile,
    wake: DynamicWakeFilter,
    history: BemHistory,
    next_step: usize,
    cap_reported: bool,
}

impl BemSimulator {
    pub fn new(
        config: BemConfig,
        geometry: BladeGeometry,
        polars: Arc<dyn PolarModel>,
    ) -> SimResult<Self> {
        config.validate()?;
        if geometry.tip_radius() > config.rotor_radius + 1e-9 {
            return Err(SimError::InvalidArg {
                what: "outermost blade station lies beyond the rotor radius",
            });
        }

        let frames = RotorFrames::new(
            config.tilt_rad,
            config.yaw_rad,
            config.cone_rad,
            config.hub_height,
            config.shaft_length,
        );
        let shear = ShearProfile {
            reference_speed: config.wind_speed,
            hub_height: config.hub_height,
            exponent: config.effective_shear_exponent(),
        };
        let wake = DynamicWakeFilter {
            gain: config.dynamic_wake_gain,
            rotor_radius: config.rotor_radius,
            wind_speed: config.wind_speed,
            dt: config.dt,
        };

        let mut history = BemHistory::new(config.steps, config.blades, geometry.radii().to_vec());
        for blade in 0..config.blades {
            history
                .azimuth
                .set(0, blade, blade as f64 * TAU / config.blades as f64);
        }
        history.rotor[0].pitch_rad = config.pitch_at(0.0);

        Ok(Self {
            config,
            geometry,
            polars,
            frames,
            shear,
            wake,
            history,
            next_step: 1,
            cap_reported: false,
        })
    }

    pub fn config(&self) -> &BemConfig {
        &self.config
    }

    pub fn geometry(&self) -> &BladeGeometry {
        &self.geometry
    }

    pub fn history(&self) -> &BemHistory {
        &self.history
    }

    pub fn into_history(self) -> BemHistory {
        self.history
    }

    /// Index of the next step to compute.
    pub fn current_step(&self) -> usize {
        self.next_step
    }

    pub fn is_finished(&self) -> bool {
        self.next_step >= self.config.steps
    }

    /// Advance one step. Returns `false` once every step has been computed.
    pub fn step(&mut self) -> SimResult<bool> {
        if self.is_finished() {
            return Ok(false);
        }
        let n = self.next_step;
        let cfg = &self.config;
        let time_s = n as f64 * cfg.dt;
        let pitch = cfg.pitch_at(time_s);

        let theta_prev = self.history.azimuth.get(n - 1, 0);
        let theta = theta_prev + cfg.rotor_speed * cfg.dt;
        for blade in 0..cfg.blades {
            self.history
                .azimuth
                .set(n, blade, theta + blade as f64 * TAU / cfg.blades as f64);
        }
        let azimuths = self.history.azimuth.row(n).to_vec();

        let ctx = StepContext {
            config: cfg,
            geometry: &self.geometry,
            polars: self.polars.as_ref(),
            frames: &self.frames,
            shear: &self.shear,
            wake: &self.wake,
            step: n,
            pitch,
        };
        let n_elements = self.geometry.len();
        let (prev, cur) = self.history.elements.step_pair_mut(n);
        let outcomes: Vec<SimResult<usize>> = cur
            .par_chunks_mut(n_elements)
            .zip(prev.par_chunks(n_elements))
            .zip(azimuths.par_iter())
            .enumerate()
            .map(|(blade, ((cur, prev), azimuth))| ctx.advance_blade(blade, *azimuth, prev, cur))
            .collect();
        // first fault in blade order
        let mut capped = 0;
        for outcome in outcomes {
            capped += outcome?;
        }
        if capped > 0 && !self.cap_reported {
            warn!(
                step = n,
                elements = capped,
                cap = MAX_FILTER_INDUCTION,
                "axial induction capped in dynamic-wake time constant"
            );
            self.cap_reported = true;
        }

        let sample = self.integrate_loads(n, time_s, pitch)?;
        if (theta / TAU).floor() > (theta_prev / TAU).floor() {
            debug!(
                step = n,
                time_s,
                revolution = (theta / TAU).floor() as u64,
                thrust_kn = sample.thrust / 1e3,
                power_mw = sample.power / 1e6,
                "completed revolution"
            );
        }
        self.history.rotor[n] = sample;
        self.next_step += 1;
        Ok(true)
    }

    pub fn run(&mut self) -> SimResult<()> {
        self.run_with_progress(usize::MAX, &mut |_| {})
    }

    /// Run to completion, calling `on_progress` every `report_every` steps and
    /// after the last step.
    pub fn run_with_progress(
        &mut self,
        report_every: usize,
        on_progress: &mut dyn FnMut(BemProgress),
    ) -> SimResult<()> {
        let span = tracing::info_span!(
            "bem_run",
            blades = self.config.blades,
            elements = self.geometry.len(),
            steps = self.config.steps
        );
        let _enter = span.enter();
        let report_every = report_every.max(1);
        let total_steps = self.config.steps;

        while self.step()? {
            let n = self.next_step - 1;
            if n % report_every == 0 || n + 1 == total_steps {
                let sample = self.history.rotor[n];
                on_progress(BemProgress {
                    step: n,
                    total_steps,
                    time_s: sample.time_s,
                    thrust: sample.thrust,
                    power: sample.power,
                });
            }
        }

        if let Some(last) = self.history.rotor.last() {
            info!(
                time_s = last.time_s,
                thrust_kn = last.thrust / 1e3,
                power_mw = last.power / 1e6,
                "bem run finished"
            );
        }
        Ok(())
    }

    fn integrate_loads(&mut self, n: usize, time_s: f64, pitch: f64) -> SimResult<RotorSample> {
        let cfg = &self.config;
        let radii = self.geometry.radii();
        let mut thrust = 0.0;
        let mut torque = 0.0;
        for blade in 0..cfg.blades {
            let slab = self.history.elements.blade(n, blade);
            let pn: Vec<f64> = slab.iter().map(|e| e.pn).collect();
            let pt_r: Vec<f64> = slab.iter().zip(radii).map(|(e, r)| e.pt * r).collect();
            let blade_thrust = trapezoid(radii, &pn)?;
            self.history.blade_thrust.set(n, blade, blade_thrust);
            thrust += blade_thrust;
            torque += trapezoid(radii, &pt_r)?;
        }
        let power = cfg.rotor_speed * torque;
        let rotor_fault = |quantity, value: f64| {
            if value.is_finite() {
                Ok(value)
            } else {
                Err(SimError::NumericalFault {
                    step: n,
                    location: FaultLocation::Rotor,
                    quantity,
                    value,
                })
            }
        };
        let thrust = rotor_fault("rotor thrust", thrust)?;
        let power = rotor_fault("rotor power", power)?;

        let dyn_force = 0.5 * cfg.air_density * cfg.wind_speed.powi(2) * cfg.rotor_area();
        Ok(RotorSample {
            time_s,
            pitch_rad: pitch,
            thrust,
            power,
            ct: thrust / dyn_force,
            cp: power / (dyn_force * cfg.wind_speed),
        })
    }
}

/// Read-only inputs shared by every blade within one step.
struct StepContext<'a> {
    config: &'a BemConfig,
    geometry: &'a BladeGeometry,
    polars: &'a dyn PolarModel,
    frames: &'a RotorFrames,
    shear: &'a ShearProfile,
    wake: &'a DynamicWakeFilter,
    step: usize,
    pitch: f64,
}

impl StepContext<'_> {
    /// Returns the number of elements whose wake time constant was capped.
    fn advance_blade(
        &self,
        blade: usize,
        azimuth: f64,
        prev: &[ElementState],
        cur: &mut [ElementState],
    ) -> SimResult<usize> {
        let frame = self.frames.blade(azimuth);
        let mut capped = 0;
        for (k, (element, (prev, cur))) in self
            .geometry
            .elements()
            .iter()
            .zip(prev.iter().zip(cur.iter_mut()))
            .enumerate()
        {
            let (state, was_capped) = self.advance_element(blade, k, element, &frame, prev)?;
            *cur = state;
            capped += usize::from(was_capped);
        }
        Ok(capped)
    }

    fn advance_element(
        &self,
        blade: usize,
        k: usize,
        element: &BladeElement,
        frame: &BladeFrame,
        prev: &ElementState,
    ) -> SimResult<(ElementState, bool)> {
        let cfg = self.config;
        let finite = |quantity: &'static str, value: f64| {
            if value.is_finite() {
                Ok(value)
            } else {
                Err(SimError::NumericalFault {
                    step: self.step,
                    location: FaultLocation::Element {
                        blade,
                        element: k,
                    },
                    quantity,
                    value,
                })
            }
        };

        let position = self.frames.position(frame, element.r);
        let wind_speed = finite("free-stream speed", self.shear.speed_at(position.x))?;
        let v0 = frame.a14 * Vector3::new(0.0, 0.0, wind_speed);

        let vy = v0.y + prev.induced[0] - cfg.rotor_speed * element.r * cfg.cone_rad.cos();
        let vz = v0.z + prev.induced[1];
        let vrel = vy.hypot(vz);
        let phi = finite("inflow angle", vz.atan2(-vy))?;
        let aoa_deg = phi.to_degrees() - (element.twist_deg + self.pitch.to_degrees());

        let coeffs = self.polars.coefficients(aoa_deg, element.thickness_pct);
        let (fs, cl) = if cfg.dynamic_stall_enabled {
            let fs = update_separation(prev.fs, coeffs.f_stat, element.chord, vrel, cfg.dt);
            (fs, coeffs.f_stat * coeffs.cl_inv + (1.0 - fs) * coeffs.cl_fs)
        } else {
            (coeffs.f_stat, coeffs.cl)
        };
        let fs = finite("separation function", fs)?;
        let cl = finite("lift coefficient", cl)?;

        let force_scale = 0.5 * cfg.air_density * vrel * vrel * element.chord;
        let lift = force_scale * cl;
        let drag = force_scale * coeffs.cd;
        let (sin_phi, cos_phi) = phi.sin_cos();
        let (pn, pt) = if k == self.geometry.tip_index() {
            (0.0, 0.0)
        } else {
            (
                finite("normal load", lift * cos_phi + drag * sin_phi)?,
                finite("tangential load", lift * sin_phi - drag * cos_phi)?,
            )
        };

        let prandtl = prandtl_factor(cfg.blades, cfg.rotor_radius, element.r, phi);
        let induction_factor = -prev.induced[1] / cfg.wind_speed;
        let quasi_steady = quasi_steady_induction(&MomentumInputs {
            blades: cfg.blades,
            density: cfg.air_density,
            r: element.r,
            prandtl,
            lift,
            phi,
            v0y: v0.y,
            v0z: v0.z,
            induction_factor,
            wz_prev: prev.induced[1],
        })
        .ok_or(SimError::NumericalFault {
            step: self.step,
            location: FaultLocation::Element { blade, element: k },
            quantity: "momentum balance denominator",
            value: 0.0,
        })?;
        finite("quasi-steady induction (y)", quasi_steady[0])?;
        finite("quasi-steady induction (z)", quasi_steady[1])?;

        let (intermediate, induced, capped) = if cfg.dynamic_wake_filter_enabled {
            let out = self.wake.update(
                induction_factor,
                element.r,
                quasi_steady,
                prev.quasi_steady,
                prev.intermediate,
                prev.induced,
            );
            (out.intermediate, out.induced, out.capped)
        } else {
            (quasi_steady, quasi_steady, false)
        };
        finite("induced velocity (y)", induced[0])?;
        finite("induced velocity (z)", induced[1])?;

        Ok((
            ElementState {
                position,
                wind_speed,
                phi,
                aoa_deg,
                cl,
                fs,
                prandtl,
                pn,
                pt,
                quasi_steady,
                intermediate,
                induced,
            },
            capped,
        ))
    }
}
