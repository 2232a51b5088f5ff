//! Error types for the bw-app service layer.

use std::path::PathBuf;

/// Application error type wrapping the backend crates' errors behind one
/// interface for the frontends.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Project error: {0}")]
    Project(String),

    #[error("Failed to read project file: {path}")]
    ProjectFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write project file: {path}")]
    ProjectFileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Project validation failed: {0}")]
    Validation(String),

    #[error("Study not found: {0}")]
    StudyNotFound(String),

    #[error("Study compilation failed: {0}")]
    Compile(String),

    #[error("Simulation error: {0}")]
    Simulation(String),

    #[error("Results error: {0}")]
    Results(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for bw-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl From<bw_project::ProjectError> for AppError {
    fn from(err: bw_project::ProjectError) -> Self {
        match err {
            bw_project::ProjectError::Validation(v) => AppError::Validation(v.to_string()),
            other => AppError::Project(other.to_string()),
        }
    }
}

impl From<bw_project::ValidationError> for AppError {
    fn from(err: bw_project::ValidationError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<bw_airfoil::AirfoilError> for AppError {
    fn from(err: bw_airfoil::AirfoilError) -> Self {
        AppError::Compile(err.to_string())
    }
}

impl From<bw_sim::SimError> for AppError {
    fn from(err: bw_sim::SimError) -> Self {
        AppError::Simulation(err.to_string())
    }
}

impl From<bw_results::ResultsError> for AppError {
    fn from(err: bw_results::ResultsError) -> Self {
        AppError::Results(err.to_string())
    }
}
