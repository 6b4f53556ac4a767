//! Error types for the af-app service layer.

use std::path::PathBuf;

/// Application error type that wraps errors from the backend crates and gives
/// every frontend one error surface.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Project error: {0}")]
    Project(String),

    #[error("Failed to read project file: {path}")]
    ProjectFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Project validation failed: {0}")]
    Validation(String),

    #[error("Design not found: {0}")]
    DesignNotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Model error: {0}")]
    Model(String),

    #[error("Optimizer error: {0}")]
    Search(String),

    #[error("Results error: {0}")]
    Results(String),

    #[error("Run not found: {0}")]
    RunNotFound(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for af-app operations.
pub type AppResult<T> = Result<T, AppError>;

// Conversions from backend error types
impl From<af_project::ProjectError> for AppError {
    fn from(err: af_project::ProjectError) -> Self {
        match err {
            af_project::ProjectError::Validation(e) => AppError::Validation(e.to_string()),
            other => AppError::Project(other.to_string()),
        }
    }
}

impl From<af_core::AfError> for AppError {
    fn from(err: af_core::AfError) -> Self {
        AppError::Model(err.to_string())
    }
}

impl From<af_model::ModelError> for AppError {
    fn from(err: af_model::ModelError) -> Self {
        AppError::Model(err.to_string())
    }
}

impl From<af_optimize::SearchError> for AppError {
    fn from(err: af_optimize::SearchError) -> Self {
        match err {
            af_optimize::SearchError::InvalidConfig { what } => AppError::InvalidInput(what),
            af_optimize::SearchError::Model(e) => e.into(),
        }
    }
}

impl From<af_results::ResultsError> for AppError {
    fn from(err: af_results::ResultsError) -> Self {
        match err {
            af_results::ResultsError::RunNotFound { run_id } => AppError::RunNotFound(run_id),
            other => AppError::Results(other.to_string()),
        }
    }
}
