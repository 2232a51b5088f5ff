//! Time-domain aerodynamics for bladewake.
//!
//! Provides:
//! - Blade-element momentum time march of a multi-bladed rotor with wind
//!   shear, pitch schedule, dynamic stall and dynamic-wake filtering
//! - Spring-mounted airfoil model with optional dynamic stall
//! - `TransientModel` trait with fixed-step RK4 and forward-Euler integrators

pub mod aeroelastic;
pub mod bem;
pub mod error;
pub mod frames;
pub mod geometry;
pub mod history;
pub mod inflow;
pub mod integrator;
pub mod model;
pub mod pitch;
pub mod sim;
pub mod stall;
pub mod wake;

pub use aeroelastic::{SpringAirfoil, SpringAirfoilParams, SpringState, run_spring_airfoil};
pub use bem::{BemConfig, BemProgress, BemSimulator};
pub use error::{FaultLocation, SimError, SimResult};
pub use geometry::{BladeElement, BladeGeometry};
pub use history::{BemHistory, ElementState, Field2, Field3, RotorSample};
pub use integrator::{ForwardEuler, Integrator, RK4};
pub use model::TransientModel;
pub use pitch::PitchSchedule;
pub use sim::{IntegratorType, SimOptions, SimProgress, SimRecord, run_sim, run_sim_with_progress};
