//! Shared application service layer for antennaflow.
//!
//! This crate is the single entry point for frontends: it validates operator
//! input, drives the geometry model and the Yagi grid search, and manages
//! design files and the run cache.

pub mod compute;
pub mod error;
pub mod progress;
pub mod project_service;
pub mod run_service;
pub mod sweep;

// Re-export key types for convenience
pub use compute::{
    Calculator, YagiBuild, compute_dipole, compute_monopole, compute_yagi, optimize_and_build_yagi,
    optimize_yagi,
};
pub use error::{AppError, AppResult};
pub use progress::{RunProgressEvent, RunStage};
pub use project_service::{
    DesignSummary, get_design, list_designs, load_project, save_project, validate_project,
};
pub use run_service::{
    ENGINE_VERSION, RunOptions, RunRequest, RunResponse, RunTimingSummary, ensure_all_runs,
    ensure_run, ensure_run_with_progress, evaluate_design, list_runs, load_run,
};
pub use sweep::{BandSweepEntry, sweep_bands};
