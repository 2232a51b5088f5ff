//! Shared application service layer for bladewake.
//!
//! Centralizes project loading, study compilation, run execution with
//! caching, and result querying so the CLI stays a thin frontend.

pub mod compile;
pub mod error;
pub mod progress;
pub mod project_service;
pub mod query;
pub mod run_service;

pub use compile::{CompiledBem, CompiledSpring, compile_bem, compile_spring, inputs_digest};
pub use error::{AppError, AppResult};
pub use progress::{RunProgressEvent, RunStage, TransientProgress};
pub use project_service::{
    StudySummary, get_study, list_studies, load_project, save_project, validate_project,
};
pub use query::{
    RunSummary, extract_airfoil_series, extract_element_series, extract_rotor_series,
    get_run_summary,
};
pub use run_service::{
    RunOptions, RunRequest, RunResponse, RunTimingSummary, ensure_run, ensure_run_with_progress,
    list_runs, load_run,
};
