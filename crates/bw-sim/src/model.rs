//! Continuous-time models advanced by the fixed-step integrators.

use crate::error::SimResult;

/// A system `dx/dt = f(t, x)` over a small vector-like state.
///
/// The BEM rotor is a discrete recurrence and does not implement this; the
/// spring-mounted airfoil does.
pub trait TransientModel {
    type State: Clone;

    fn initial_state(&self) -> Self::State;

    /// State derivative at `(t, x)`. Non-finite derivatives are errors.
    fn rhs(&mut self, t: f64, x: &Self::State) -> SimResult<Self::State>;

    /// `a + b`
    fn add(&self, a: &Self::State, b: &Self::State) -> Self::State;

    /// `s * a`
    fn scale(&self, a: &Self::State, s: f64) -> Self::State;
}
