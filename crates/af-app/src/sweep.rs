//! One Yagi optimization per amateur band.

use af_model::BANDS;
use af_results::OptimizationRecord;
use rayon::prelude::*;
use serde::Serialize;
use tracing::info;

use crate::compute::Calculator;
use crate::error::AppResult;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BandSweepEntry {
    pub band: String,
    pub label: String,
    pub center_mhz: f64,
    /// `None` when the element count is too small to optimize.
    pub optimization: Option<OptimizationRecord>,
}

/// Optimize at the center of every band in the band plan.
///
/// Bands run in parallel; the result keeps band-plan order.
pub fn sweep_bands(
    calculator: &Calculator,
    element_count: usize,
    step: f64,
    diameter_m: f64,
) -> AppResult<Vec<BandSweepEntry>> {
    let entries = BANDS
        .par_iter()
        .map(|band| {
            let optimization =
                calculator.optimize_yagi(band.center_mhz, element_count, step, diameter_m)?;
            Ok(BandSweepEntry {
                band: band.name.to_string(),
                label: band.label(),
                center_mhz: band.center_mhz,
                optimization,
            })
        })
        .collect::<AppResult<Vec<_>>>()?;

    info!(
        bands = entries.len(),
        element_count, "band sweep finished"
    );
    Ok(entries)
}
