//! bw-airfoil: tabulated airfoil polars for bladewake.
//!
//! Provides:
//! - `PolarTable`: one airfoil polar (cl, cd, cm and the dynamic-stall
//!   columns f_stat, cl_inv, cl_fs) tabulated against angle of attack
//! - `PolarSet`: a family of tables tagged by relative thickness
//! - `PolarModel` trait, the lookup seam used by the simulators
//!
//! # Example
//!
//! ```no_run
//! use bw_airfoil::{PolarModel, PolarSet, PolarTable};
//!
//! let set = PolarSet::new(vec![
//!     (24.1, PolarTable::load("polars/ffa-w3-241.txt").unwrap()),
//!     (30.1, PolarTable::load("polars/ffa-w3-301.txt").unwrap()),
//! ])
//! .unwrap();
//! let c = set.coefficients(6.0, 27.0);
//! println!("cl = {:.3}, cd = {:.4}", c.cl, c.cd);
//! ```

pub mod error;
pub mod model;
pub mod set;
pub mod table;

pub use error::{AirfoilError, AirfoilResult};
pub use model::{PolarCoefficients, PolarModel};
pub use set::PolarSet;
pub use table::PolarTable;
