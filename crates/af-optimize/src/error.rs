//! Error types for the grid search.

use af_core::error::AfError;
use af_model::ModelError;
use thiserror::Error;

/// Errors that can occur while configuring or running a search.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SearchError {
    #[error("Invalid search configuration: {what}")]
    InvalidConfig { what: String },

    #[error("Model error: {0}")]
    Model(#[from] ModelError),
}

pub type SearchResult<T> = Result<T, SearchError>;

impl From<AfError> for SearchError {
    fn from(e: AfError) -> Self {
        SearchError::Model(e.into())
    }
}

impl From<SearchError> for AfError {
    fn from(e: SearchError) -> Self {
        match e {
            SearchError::InvalidConfig { what: _ } => AfError::InvalidArg {
                what: "search configuration",
            },
            SearchError::Model(m) => m.into(),
        }
    }
}
