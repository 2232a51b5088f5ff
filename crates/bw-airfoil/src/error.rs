//! Airfoil polar errors.

use bw_core::BwError;
use thiserror::Error;

/// Result type for polar operations.
pub type AirfoilResult<T> = Result<T, AirfoilError>;

/// Errors raised while reading or assembling airfoil polars.
#[derive(Error, Debug)]
pub enum AirfoilError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A row that does not parse into the expected columns.
    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Invalid polar table: {what}")]
    InvalidTable { what: &'static str },

    #[error("Invalid polar set: {what}")]
    InvalidSet { what: &'static str },

    #[error(transparent)]
    Core(#[from] BwError),
}
