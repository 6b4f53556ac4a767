//! Common utilities for model calculations.

use crate::error::{ModelError, ModelResult};
use af_core::numeric::ensure_finite;

/// Lower bound reported by the impedance estimator (ohms)
pub const IMPEDANCE_FLOOR_OHMS: f64 = 20.0;

/// Upper bound reported by the impedance estimator (ohms)
pub const IMPEDANCE_CEILING_OHMS: f64 = 100.0;

/// Ensure a value is finite, returning ModelError if not.
pub fn check_finite(value: f64, what: &'static str) -> ModelResult<()> {
    ensure_finite(value, what).map_err(|_| ModelError::NonPhysical { what })?;
    Ok(())
}

/// Clamp a value between min and max.
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}
