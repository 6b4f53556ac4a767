//! Resonant element geometry from frequency and conductor diameter.
//!
//! Element lengths are the free-space fraction of a wavelength multiplied by a
//! shortening factor `k`. Spacings along the boom are never shortened.

use crate::common::check_finite;
use crate::error::{ModelError, ModelResult};
use af_core::numeric::checked_log10;
use af_core::units::{Frequency, Length, m, wavelength};

/// Fixed shortening factor used when conductor thickness is ignored.
pub const THIN_WIRE_SHORTENING: f64 = 0.95;

const K_INTERCEPT: f64 = 0.985;
const K_SLOPE: f64 = 0.005;

/// Per-director taper step; director `i` is scaled by `1 - TAPER * (i + 1)`.
const DIRECTOR_TAPER: f64 = 0.015;

/// Largest element count for which the taper keeps every director positive.
pub const MAX_YAGI_ELEMENTS: usize = 68;

const MONOPOLE_IMPEDANCE_OHMS: f64 = 36.5;
const MONOPOLE_GAIN_DBI: f64 = 5.0;
const DIPOLE_IMPEDANCE_OHMS: f64 = 73.0;
const DIPOLE_GAIN_DBI: f64 = 2.15;

const YAGI_NOMINAL_IMPEDANCE_OHMS: f64 = 50.0;
const YAGI_BASE_GAIN_DBI: f64 = 7.0;
const YAGI_GAIN_PER_DIRECTOR_DB: f64 = 0.8;

/// How conductor thickness enters the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CorrectionMode {
    /// `k = 0.985 - 0.005 * log10(wavelength / diameter)`, and a radius term in the
    /// impedance estimate.
    #[default]
    DiameterCorrected,
    /// Fixed `k = 0.95`, impedance base pinned at 50 ohms.
    ThinWire,
}

/// Length factors for a Yagi-Uda array, all in units of wavelength except
/// `reflector_factor`, which scales the shortened active element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YagiFactors {
    pub active_factor: f64,
    pub reflector_factor: f64,
    pub director_base_factor: f64,
    pub ref_active_spacing_factor: f64,
    pub active_director_spacing_factor: f64,
}

impl Default for YagiFactors {
    fn default() -> Self {
        Self {
            active_factor: 0.48,
            reflector_factor: 1.03,
            director_base_factor: 0.46,
            ref_active_spacing_factor: 0.20,
            active_director_spacing_factor: 0.18,
        }
    }
}

/// A single resonant element (monopole or dipole) with its nominal figures.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementDesign {
    pub wavelength: Length,
    pub shortening_factor: f64,
    pub length: Length,
    pub impedance_ohms: f64,
    pub gain_dbi: f64,
}

/// Physical layout of a Yagi-Uda array.
#[derive(Debug, Clone, PartialEq)]
pub struct YagiGeometry {
    pub wavelength: Length,
    pub shortening_factor: f64,
    pub reflector_length: Length,
    pub active_length: Length,
    /// Ordered from the director nearest the active element outward.
    pub director_lengths: Vec<Length>,
    pub ref_active_spacing: Length,
    pub active_director_spacing: Length,
}

impl YagiGeometry {
    pub fn director_count(&self) -> usize {
        self.director_lengths.len()
    }

    /// Reflector + active element + directors.
    pub fn element_count(&self) -> usize {
        self.director_count() + 2
    }

    pub fn nominal_impedance_ohms(&self) -> f64 {
        YAGI_NOMINAL_IMPEDANCE_OHMS
    }

    pub fn nominal_gain_dbi(&self) -> f64 {
        YAGI_BASE_GAIN_DBI + YAGI_GAIN_PER_DIRECTOR_DB * self.director_count() as f64
    }
}

/// Geometry model configured with a [`CorrectionMode`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GeometryModel {
    pub mode: CorrectionMode,
}

impl GeometryModel {
    pub fn new(mode: CorrectionMode) -> Self {
        Self { mode }
    }

    pub fn thin_wire() -> Self {
        Self::new(CorrectionMode::ThinWire)
    }

    /// Shortening factor `k` for a wavelength and conductor diameter.
    ///
    /// In thin-wire mode the diameter is ignored.
    pub fn shortening_factor(&self, wavelength: Length, diameter: Length) -> ModelResult<f64> {
        match self.mode {
            CorrectionMode::ThinWire => Ok(THIN_WIRE_SHORTENING),
            CorrectionMode::DiameterCorrected => {
                let ratio = wavelength.value / diameter.value;
                let log_ratio = checked_log10(ratio, "wavelength/diameter ratio")?;
                Ok(K_INTERCEPT - K_SLOPE * log_ratio)
            }
        }
    }

    /// Quarter-wave monopole.
    pub fn monopole(&self, frequency: Frequency, diameter: Length) -> ModelResult<ElementDesign> {
        self.resonant_element(
            frequency,
            diameter,
            0.25,
            MONOPOLE_IMPEDANCE_OHMS,
            MONOPOLE_GAIN_DBI,
        )
    }

    /// Half-wave dipole (total tip-to-tip length).
    pub fn dipole(&self, frequency: Frequency, diameter: Length) -> ModelResult<ElementDesign> {
        self.resonant_element(
            frequency,
            diameter,
            0.5,
            DIPOLE_IMPEDANCE_OHMS,
            DIPOLE_GAIN_DBI,
        )
    }

    fn resonant_element(
        &self,
        frequency: Frequency,
        diameter: Length,
        fraction: f64,
        impedance_ohms: f64,
        gain_dbi: f64,
    ) -> ModelResult<ElementDesign> {
        let lam = wavelength(frequency);
        let k = self.shortening_factor(lam, diameter)?;
        let length = fraction * lam.value * k;
        check_finite(length, "element length")?;

        Ok(ElementDesign {
            wavelength: lam,
            shortening_factor: k,
            length: m(length),
            impedance_ohms,
            gain_dbi,
        })
    }

    /// Yagi-Uda layout for `element_count` elements.
    ///
    /// Counts below 2 must be rejected by the caller; here they simply produce no
    /// directors. Counts above [`MAX_YAGI_ELEMENTS`] are an error.
    pub fn yagi(
        &self,
        frequency: Frequency,
        element_count: usize,
        diameter: Length,
        factors: &YagiFactors,
    ) -> ModelResult<YagiGeometry> {
        if element_count > MAX_YAGI_ELEMENTS {
            return Err(ModelError::InvalidArg {
                what: "element count",
            });
        }
        let lam = wavelength(frequency);
        let lam_m = lam.value;
        let k = self.shortening_factor(lam, diameter)?;

        let active = factors.active_factor * lam_m * k;
        let reflector = factors.reflector_factor * active;
        let director_base = factors.director_base_factor * lam_m * k;
        check_finite(active, "active element length")?;
        check_finite(director_base, "director base length")?;

        let director_lengths = (0..element_count.saturating_sub(2))
            .map(|i| m(director_base * (1.0 - DIRECTOR_TAPER * (i + 1) as f64)))
            .collect();

        Ok(YagiGeometry {
            wavelength: lam,
            shortening_factor: k,
            reflector_length: m(reflector),
            active_length: m(active),
            director_lengths,
            ref_active_spacing: m(factors.ref_active_spacing_factor * lam_m),
            active_director_spacing: m(factors.active_director_spacing_factor * lam_m),
        })
    }
}
