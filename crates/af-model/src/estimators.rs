//! Empirical impedance, gain and SWR estimators for Yagi-Uda arrays.
//!
//! These are closed-form heuristics tuned to steer a search toward a 50 ohm feed,
//! not the output of any field solver.

use crate::common::{IMPEDANCE_CEILING_OHMS, IMPEDANCE_FLOOR_OHMS, check_finite, clamp};
use crate::error::ModelResult;
use crate::geometry::CorrectionMode;
use af_core::numeric::checked_ln;

/// Feed impedance the SWR is measured against.
pub const DEFAULT_TARGET_IMPEDANCE_OHMS: f64 = 50.0;

const Z_REFERENCE_OHMS: f64 = 50.0;
/// `ln(wavelength / radius)` at which the diameter correction vanishes (about 5000:1).
const THIN_WIRE_LOG_RATIO: f64 = 8.5;
const Z_RADIUS_SWING_OHMS: f64 = 10.0;
const ACTIVE_RATIO_REF: f64 = 0.47;
const SPACING_RATIO_REF: f64 = 0.18;

const DIPOLE_GAIN_DBI: f64 = 2.15;
const GAIN_PER_ELEMENT_DB: f64 = 0.8;
const SPACING_PENALTY: f64 = 10.0;
const GAIN_FLOOR_DBI: f64 = 3.0;

/// Unshortened element lengths and boom spacing, in meters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementLengths {
    pub reflector_m: f64,
    pub active_m: f64,
    pub director_m: f64,
    pub spacing_m: f64,
}

/// Feed-point impedance estimate, clamped to `[20, 100]` ohms.
///
/// Only the active length and spacing move the estimate; reflector and director
/// lengths are carried for completeness. In [`CorrectionMode::DiameterCorrected`]
/// thicker conductors (smaller `ln(wavelength/radius)`) raise the base above 50 ohms.
pub fn estimate_impedance(
    mode: CorrectionMode,
    lengths: &ElementLengths,
    wavelength_m: f64,
    radius_m: f64,
) -> ModelResult<f64> {
    let z_base = match mode {
        CorrectionMode::ThinWire => Z_REFERENCE_OHMS,
        CorrectionMode::DiameterCorrected => {
            let log_factor = checked_ln(wavelength_m / radius_m, "wavelength/radius ratio")?;
            Z_REFERENCE_OHMS
                + Z_RADIUS_SWING_OHMS * (THIN_WIRE_LOG_RATIO - log_factor) / THIN_WIRE_LOG_RATIO
        }
    };

    let active_ratio = lengths.active_m / wavelength_m;
    let spacing_ratio = lengths.spacing_m / wavelength_m;
    let z = z_base + 20.0 * (active_ratio - ACTIVE_RATIO_REF)
        - 10.0 * (spacing_ratio - SPACING_RATIO_REF);
    check_finite(z, "impedance")?;

    Ok(clamp(z.abs(), IMPEDANCE_FLOOR_OHMS, IMPEDANCE_CEILING_OHMS))
}

/// Forward gain estimate in dBi, floored at 3 dBi.
///
/// Each element beyond the first adds 0.8 dB; spacing away from 0.18 wavelength
/// costs a quadratic penalty.
pub fn estimate_gain(element_count: usize, spacing_factor: f64) -> f64 {
    let growth = GAIN_PER_ELEMENT_DB * (element_count as f64 - 1.0);
    let penalty = SPACING_PENALTY * (spacing_factor - SPACING_RATIO_REF).powi(2);
    (DIPOLE_GAIN_DBI + growth - penalty).max(GAIN_FLOOR_DBI)
}

/// Standing-wave ratio of `impedance_ohms` against a real `target_ohms`.
///
/// Always at least 1. The impedance must be non-zero.
pub fn estimate_swr(impedance_ohms: f64, target_ohms: f64) -> f64 {
    let z = impedance_ohms.abs();
    if z < target_ohms {
        target_ohms / z
    } else {
        z / target_ohms
    }
}
