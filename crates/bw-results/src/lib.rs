//! bw-results: run cache and timeseries storage.

pub mod hash;
pub mod store;
pub mod types;

pub use hash::{compute_run_id, digest_bytes};
pub use store::RunStore;
pub use types::*;

pub type ResultsResult<T> = Result<T, ResultsError>;

#[derive(thiserror::Error, Debug)]
pub enum ResultsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Run not found: {run_id}")]
    RunNotFound { run_id: String },

    #[error("Invalid path: {message}")]
    InvalidPath { message: String },
}

/// RFC 3339 timestamp for manifests.
pub fn now_timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}
