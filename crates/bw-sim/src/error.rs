//! Error types for simulation operations.

use std::fmt;

use thiserror::Error;

/// Where a numerical fault was detected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FaultLocation {
    Element { blade: usize, element: usize },
    Rotor,
}

impl fmt::Display for FaultLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FaultLocation::Element { blade, element } => {
                write!(f, "blade {blade}, element {element}")
            }
            FaultLocation::Rotor => write!(f, "rotor"),
        }
    }
}

/// Errors encountered during a time march.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Non-physical condition: {what}")]
    NonPhysical { what: &'static str },

    /// A state quantity left the finite range. Every later step is invalid.
    #[error("Numerical fault at step {step} ({location}): {quantity} = {value}")]
    NumericalFault {
        step: usize,
        location: FaultLocation,
        quantity: &'static str,
        value: f64,
    },

    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A blade table row that does not parse into four numbers.
    #[error("Blade table parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Invalid blade geometry: {source}")]
    Geometry {
        #[source]
        source: bw_core::BwError,
    },

    #[error("Backend error: {message}")]
    Backend { message: String },
}

pub type SimResult<T> = Result<T, SimError>;

impl From<bw_core::BwError> for SimError {
    fn from(e: bw_core::BwError) -> Self {
        SimError::Backend {
            message: e.to_string(),
        }
    }
}

impl From<bw_airfoil::AirfoilError> for SimError {
    fn from(e: bw_airfoil::AirfoilError) -> Self {
        SimError::Backend {
            message: e.to_string(),
        }
    }
}
