//! af-core: stable foundation for antennaflow.
//!
//! Contains:
//! - units (uom SI types + constructors, speed of light, wavelength)
//! - numeric (Real + finite, positive and log-domain guards)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{AfError, AfResult};
pub use numeric::*;
pub use units::*;
