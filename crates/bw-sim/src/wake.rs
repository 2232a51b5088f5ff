//! Momentum-theory induction and the dynamic-wake filter.

use std::f64::consts::PI;

use nalgebra::Vector2;

/// Axial induction above which the Glauert correction applies.
pub const GLAUERT_THRESHOLD: f64 = 0.33;

/// Upper limit on the induction used in the wake time constant. This is the
/// textbook limit for the `tau1` fit, which is only calibrated up to 0.5; it
/// also keeps `1 - 1.3a` away from its zero just above 0.77.
pub const MAX_FILTER_INDUCTION: f64 = 0.5;

/// Smallest accepted momentum-balance denominator.
pub const MIN_MOMENTUM_DENOMINATOR: f64 = 1e-9;

/// Induced velocity in the blade frame: index 0 is in-plane (`W_y`), index 1
/// out-of-plane (`W_z`).
pub type Induction = Vector2<f64>;

/// Prandtl tip-loss factor, in `(0, 1]`.
pub fn prandtl_factor(blades: usize, tip_radius: f64, r: f64, phi: f64) -> f64 {
    let sin_phi = phi.abs().sin();
    if sin_phi <= 0.01 || tip_radius - r <= 0.005 {
        return 1.0;
    }
    let exponent = -(blades as f64 / 2.0) * (tip_radius - r) / (r * sin_phi);
    (2.0 / PI * exponent.exp().acos()).min(1.0)
}

/// Glauert high-induction correction factor.
pub fn glauert_factor(a: f64) -> f64 {
    if a <= GLAUERT_THRESHOLD {
        1.0
    } else {
        0.25 * (5.0 - 3.0 * a)
    }
}

/// Inputs of the quasi-steady momentum balance for one element.
#[derive(Clone, Copy, Debug)]
pub struct MomentumInputs {
    pub blades: usize,
    pub density: f64,
    pub r: f64,
    pub prandtl: f64,
    /// Lift per unit length (N/m)
    pub lift: f64,
    pub phi: f64,
    /// Free-stream components in the blade frame.
    pub v0y: f64,
    pub v0z: f64,
    /// Axial induction factor from the previous step.
    pub induction_factor: f64,
    /// Out-of-plane induced velocity from the previous step.
    pub wz_prev: f64,
}

/// Quasi-steady induced velocity, or `None` when the momentum denominator vanishes.
pub fn quasi_steady_induction(m: &MomentumInputs) -> Option<Induction> {
    let fg = glauert_factor(m.induction_factor);
    let wake_speed = (m.v0y.powi(2) + (m.v0z + fg * m.wz_prev).powi(2)).sqrt();
    let denominator = 4.0 * PI * m.density * m.r * m.prandtl * wake_speed;
    if !(denominator.abs() >= MIN_MOMENTUM_DENOMINATOR) {
        return None;
    }
    let scale = -(m.blades as f64) * m.lift / denominator;
    Some(Induction::new(scale * m.phi.sin(), scale * m.phi.cos()))
}

/// Two cascaded first-order lags: a lead-lag stage with time constant `tau1`
/// followed by a plain lag with `tau2`.
#[derive(Clone, Copy, Debug)]
pub struct DynamicWakeFilter {
    pub gain: f64,
    pub rotor_radius: f64,
    pub wind_speed: f64,
    pub dt: f64,
}

/// Output of one filter update.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FilteredInduction {
    pub intermediate: Induction,
    pub induced: Induction,
    /// True when the induction factor was capped for the time constant.
    pub capped: bool,
}

impl DynamicWakeFilter {
    pub fn time_constants(&self, induction_factor: f64, r: f64) -> (f64, f64) {
        let a = induction_factor.min(MAX_FILTER_INDUCTION);
        let tau1 = 1.1 / (1.0 - 1.3 * a) * self.rotor_radius / self.wind_speed;
        let tau2 = (0.39 - 0.26 * (r / self.rotor_radius).powi(2)) * tau1;
        (tau1, tau2)
    }

    pub fn update(
        &self,
        induction_factor: f64,
        r: f64,
        qs: Induction,
        qs_prev: Induction,
        intermediate_prev: Induction,
        induced_prev: Induction,
    ) -> FilteredInduction {
        let (tau1, tau2) = self.time_constants(induction_factor, r);
        let lead = qs + (qs - qs_prev) * (self.gain * tau1 / self.dt);
        let intermediate = lead + (intermediate_prev - lead) * (-self.dt / tau1).exp();
        let induced = intermediate + (induced_prev - intermediate) * (-self.dt / tau2).exp();
        FilteredInduction {
            intermediate,
            induced,
            capped: induction_factor > MAX_FILTER_INDUCTION,
        }
    }
}
