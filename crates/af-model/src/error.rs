//! Error types for model evaluation.

use af_core::error::AfError;
use thiserror::Error;

/// Errors that can occur while evaluating a geometry or estimator.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("Non-physical value: {what}")]
    NonPhysical { what: &'static str },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// A precondition the caller should have checked did not hold.
    #[error("Invariant violated: {what} (value={value})")]
    Invariant { what: &'static str, value: f64 },
}

pub type ModelResult<T> = Result<T, ModelError>;

impl From<AfError> for ModelError {
    fn from(e: AfError) -> Self {
        match e {
            AfError::NonFinite { what, .. } => ModelError::NonPhysical { what },
            AfError::InvalidArg { what } => ModelError::InvalidArg { what },
            AfError::LogDomain { what, value } => ModelError::Invariant { what, value },
            AfError::Invariant { what } => ModelError::Invariant {
                what,
                value: f64::NAN,
            },
        }
    }
}

impl From<ModelError> for AfError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::NonPhysical { what } => AfError::InvalidArg { what },
            ModelError::InvalidArg { what } => AfError::InvalidArg { what },
            ModelError::Invariant { what, .. } => AfError::Invariant { what },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ModelError::NonPhysical { what: "length" };
        assert!(err.to_string().contains("length"));
    }

    #[test]
    fn log_domain_becomes_invariant() {
        let err: ModelError = AfError::LogDomain {
            what: "wavelength/diameter",
            value: -1.0,
        }
        .into();
        assert!(matches!(err, ModelError::Invariant { .. }));

        let back: AfError = err.into();
        assert!(matches!(back, AfError::Invariant { .. }));
    }
}
