use crate::AfError;

/// Floating point type used throughout system
pub type Real = f64;

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, AfError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(AfError::NonFinite { what, value: v })
    }
}

pub fn ensure_positive(v: Real, what: &'static str) -> Result<Real, AfError> {
    let v = ensure_finite(v, what)?;
    if v > 0.0 {
        Ok(v)
    } else {
        Err(AfError::InvalidArg { what })
    }
}

/// Base-10 logarithm that refuses non-positive or non-finite input.
pub fn checked_log10(ratio: Real, what: &'static str) -> Result<Real, AfError> {
    if ratio.is_finite() && ratio > 0.0 {
        Ok(ratio.log10())
    } else {
        Err(AfError::LogDomain { what, value: ratio })
    }
}

/// Natural logarithm that refuses non-positive or non-finite input.
pub fn checked_ln(ratio: Real, what: &'static str) -> Result<Real, AfError> {
    if ratio.is_finite() && ratio > 0.0 {
        Ok(ratio.ln())
    } else {
        Err(AfError::LogDomain { what, value: ratio })
    }
}
