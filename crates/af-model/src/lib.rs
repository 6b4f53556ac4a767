//! af-model: closed-form antenna geometry and performance models.
//!
//! Provides:
//! - the shortening-factor geometry model for monopoles, dipoles and Yagi-Uda arrays
//! - impedance, gain and SWR estimators
//! - the amateur band plan used to pick design frequencies
//!
//! Everything here is a deterministic function of its inputs. Callers validate
//! frequency, diameter and element count before calling in; the model only guards
//! its logarithms and the director taper, reporting a broken precondition as
//! [`ModelError::Invariant`] or [`ModelError::InvalidArg`].
//!
//! # Example
//!
//! ```
//! use af_core::units::{mhz, mm};
//! use af_model::{CorrectionMode, GeometryModel};
//!
//! let model = GeometryModel::new(CorrectionMode::DiameterCorrected);
//! let dipole = model.dipole(mhz(145.0), mm(4.0)).unwrap();
//! assert!((dipole.length.value - 1.0042).abs() < 1e-3);
//! ```

pub mod bands;
pub mod common;
pub mod error;
pub mod estimators;
pub mod geometry;

// Re-exports
pub use bands::{BANDS, Band, band_containing, default_band, find_band};
pub use error::{ModelError, ModelResult};
pub use estimators::{
    DEFAULT_TARGET_IMPEDANCE_OHMS, ElementLengths, estimate_gain, estimate_impedance,
    estimate_swr,
};
pub use geometry::{
    CorrectionMode, ElementDesign, GeometryModel, MAX_YAGI_ELEMENTS, THIN_WIRE_SHORTENING,
    YagiFactors, YagiGeometry,
};
