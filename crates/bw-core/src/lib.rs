//! bw-core: shared foundation for bladewake.
//!
//! Contains:
//! - units (uom SI types + constructors used at the configuration boundary)
//! - numeric (Real, tolerances, interpolation, quadrature)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod units;

pub use error::{BwError, BwResult};
pub use numeric::*;
pub use units::*;
