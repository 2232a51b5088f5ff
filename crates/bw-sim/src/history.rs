//! Dense time history of a BEM run.
//!
//! Per-element state is stored step-major, then blade, then element, so one
//! step is a contiguous slab and one blade within it is a contiguous chunk.

use nalgebra::Vector3;

use crate::wake::Induction;

/// Dense `(step, blade, element)` grid.
#[derive(Clone, Debug)]
pub struct Field3<T> {
    steps: usize,
    blades: usize,
    elements: usize,
    data: Vec<T>,
}

impl<T: Clone + Default> Field3<T> {
    pub fn new(steps: usize, blades: usize, elements: usize) -> Self {
        Self {
            steps,
            blades,
            elements,
            data: vec![T::default(); steps * blades * elements],
        }
    }
}

impl<T> Field3<T> {
    pub fn dims(&self) -> (usize, usize, usize) {
        (self.steps, self.blades, self.elements)
    }

    fn stride(&self) -> usize {
        self.blades * self.elements
    }

    fn offset(&self, step: usize, blade: usize, element: usize) -> usize {
        debug_assert!(step < self.steps && blade < self.blades && element < self.elements);
        (step * self.blades + blade) * self.elements + element
    }

    pub fn get(&self, step: usize, blade: usize, element: usize) -> &T {
        &self.data[self.offset(step, blade, element)]
    }

    /// All blades of one step.
    pub fn step(&self, step: usize) -> &[T] {
        let stride = self.stride();
        &self.data[step * stride..(step + 1) * stride]
    }

    /// One blade of one step, ordered by element.
    pub fn blade(&self, step: usize, blade: usize) -> &[T] {
        let start = self.offset(step, blade, 0);
        &self.data[start..start + self.elements]
    }

    /// Step `step - 1` read-only alongside step `step` writable.
    pub fn step_pair_mut(&mut self, step: usize) -> (&[T], &mut [T]) {
        debug_assert!(step >= 1 && step < self.steps);
        let stride = self.stride();
        let (before, after) = self.data.split_at_mut(step * stride);
        (&before[(step - 1) * stride..], &mut after[..stride])
    }
}

/// Dense `(step, blade)` grid.
#[derive(Clone, Debug)]
pub struct Field2 {
    blades: usize,
    data: Vec<f64>,
}

impl Field2 {
    pub fn new(steps: usize, blades: usize) -> Self {
        Self {
            blades,
            data: vec![0.0; steps * blades],
        }
    }

    pub fn get(&self, step: usize, blade: usize) -> f64 {
        self.data[step * self.blades + blade]
    }

    pub fn set(&mut self, step: usize, blade: usize, value: f64) {
        self.data[step * self.blades + blade] = value;
    }

    pub fn row(&self, step: usize) -> &[f64] {
        &self.data[step * self.blades..(step + 1) * self.blades]
    }

    pub fn column(&self, blade: usize) -> Vec<f64> {
        self.data
            .chunks(self.blades)
            .map(|row| row[blade])
            .collect()
    }
}

/// State of one blade element at one step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ElementState {
    /// Position in the ground frame (m), x is height.
    pub position: Vector3<f64>,
    /// Free-stream speed at the element (m/s).
    pub wind_speed: f64,
    /// Inflow angle (rad).
    pub phi: f64,
    pub aoa_deg: f64,
    /// Lift coefficient actually used for the loads.
    pub cl: f64,
    /// Dynamic-stall separation function.
    pub fs: f64,
    pub prandtl: f64,
    /// Normal and tangential load per unit length (N/m).
    pub pn: f64,
    pub pt: f64,
    pub quasi_steady: Induction,
    pub intermediate: Induction,
    pub induced: Induction,
}

impl Default for ElementState {
    fn default() -> Self {
        Self {
            position: Vector3::zeros(),
            wind_speed: 0.0,
            phi: 0.0,
            aoa_deg: 0.0,
            cl: 0.0,
            fs: 0.0,
            prandtl: 1.0,
            pn: 0.0,
            pt: 0.0,
            quasi_steady: Induction::zeros(),
            intermediate: Induction::zeros(),
            induced: Induction::zeros(),
        }
    }
}

/// Rotor-level outputs of one step.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RotorSample {
    pub time_s: f64,
    pub pitch_rad: f64,
    /// Thrust (N)
    pub thrust: f64,
    /// Aerodynamic power (W)
    pub power: f64,
    pub ct: f64,
    pub cp: f64,
}

/// Full time history of a BEM run. Step 0 is the initial condition.
#[derive(Clone, Debug)]
pub struct BemHistory {
    pub radii: Vec<f64>,
    pub elements: Field3<ElementState>,
    /// Blade azimuth (rad), unwrapped.
    pub azimuth: Field2,
    pub blade_thrust: Field2,
    pub rotor: Vec<RotorSample>,
}

impl BemHistory {
    pub fn new(steps: usize, blades: usize, radii: Vec<f64>) -> Self {
        let n_elements = radii.len();
        Self {
            elements: Field3::new(steps, blades, n_elements),
            azimuth: Field2::new(steps, blades),
            blade_thrust: Field2::new(steps, blades),
            rotor: vec![RotorSample::default(); steps],
            radii,
        }
    }

    pub fn steps(&self) -> usize {
        self.rotor.len()
    }

    pub fn blades(&self) -> usize {
        self.elements.dims().1
    }

    pub fn n_elements(&self) -> usize {
        self.radii.len()
    }

    pub fn time(&self) -> Vec<f64> {
        self.rotor.iter().map(|s| s.time_s).collect()
    }

    pub fn thrust(&self) -> Vec<f64> {
        self.rotor.iter().map(|s| s.thrust).collect()
    }

    pub fn power(&self) -> Vec<f64> {
        self.rotor.iter().map(|s| s.power).collect()
    }

    /// Time series of one quantity at one element.
    pub fn element_series(
        &self,
        blade: usize,
        element: usize,
        f: impl Fn(&ElementState) -> f64,
    ) -> Vec<f64> {
        (0..self.steps())
            .map(|n| f(self.elements.get(n, blade, element)))
            .collect()
    }

    /// Radial distribution of one quantity along a blade at one step.
    pub fn blade_distribution(
        &self,
        step: usize,
        blade: usize,
        f: impl Fn(&ElementState) -> f64,
    ) -> Vec<f64> {
        self.elements.blade(step, blade).iter().map(f).collect()
    }
}
