//! Calculator entry points.
//!
//! Inputs arrive in operator units (MHz, meters, wavelengths) and are checked here
//! before the model sees them. Outputs are plain [`ResultRecord`] values in SI units.

use af_core::units::{Frequency, Length, m, mhz};
use af_model::{
    CorrectionMode, DEFAULT_TARGET_IMPEDANCE_OHMS, ElementDesign, GeometryModel,
    MAX_YAGI_ELEMENTS, YagiFactors, YagiGeometry,
};
use af_optimize::{SearchConfig, SearchOutcome, SearchProgress, SearchRequest, SwrPenaltyScore};
use af_results::{AntennaKind, OptimizationRecord, ResultRecord, YagiElementsRecord};
use tracing::{debug, info};

use crate::error::{AppError, AppResult};

/// Reflector + active element.
pub const MIN_YAGI_ELEMENTS: usize = 2;

/// An optimized Yagi fed back through the direct calculation.
#[derive(Debug, Clone, PartialEq)]
pub struct YagiBuild {
    pub optimization: OptimizationRecord,
    pub record: ResultRecord,
}

/// Model settings shared by every entry point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Calculator {
    pub mode: CorrectionMode,
    /// Reference impedance for SWR during optimization.
    pub target_impedance_ohms: f64,
}

impl Default for Calculator {
    fn default() -> Self {
        Self {
            mode: CorrectionMode::default(),
            target_impedance_ohms: DEFAULT_TARGET_IMPEDANCE_OHMS,
        }
    }
}

impl Calculator {
    pub fn new(mode: CorrectionMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn with_target_impedance(mut self, ohms: f64) -> Self {
        self.target_impedance_ohms = ohms;
        self
    }

    fn model(&self) -> GeometryModel {
        GeometryModel::new(self.mode)
    }

    /// Quarter-wave monopole.
    pub fn monopole(&self, frequency_mhz: f64, diameter_m: f64) -> AppResult<ResultRecord> {
        let (frequency, diameter) = validate_inputs(frequency_mhz, diameter_m)?;
        let design = self.model().monopole(frequency, diameter)?;
        Ok(self.element_record(
            AntennaKind::Monopole,
            "Quarter-wave monopole",
            frequency,
            diameter,
            &design,
        ))
    }

    /// Half-wave dipole.
    pub fn dipole(&self, frequency_mhz: f64, diameter_m: f64) -> AppResult<ResultRecord> {
        let (frequency, diameter) = validate_inputs(frequency_mhz, diameter_m)?;
        let design = self.model().dipole(frequency, diameter)?;
        Ok(self.element_record(
            AntennaKind::Dipole,
            "Half-wave dipole",
            frequency,
            diameter,
            &design,
        ))
    }

    /// Direct Yagi-Uda layout from length factors (defaults when `None`).
    pub fn yagi(
        &self,
        frequency_mhz: f64,
        element_count: usize,
        diameter_m: f64,
        factors: Option<YagiFactors>,
    ) -> AppResult<ResultRecord> {
        let (frequency, diameter) = validate_inputs(frequency_mhz, diameter_m)?;
        if element_count < MIN_YAGI_ELEMENTS {
            return Err(AppError::InvalidInput(format!(
                "a Yagi needs at least {} elements, got {}",
                MIN_YAGI_ELEMENTS, element_count
            )));
        }
        check_max_elements(element_count)?;
        let factors = factors.unwrap_or_default();
        validate_factors(&factors)?;

        let geometry = self
            .model()
            .yagi(frequency, element_count, diameter, &factors)?;
        Ok(self.yagi_record(frequency, diameter, &geometry))
    }

    /// Grid search for the best Yagi factors.
    ///
    /// `Ok(None)` means the element count leaves no room for a director.
    pub fn optimize_yagi(
        &self,
        frequency_mhz: f64,
        element_count: usize,
        step: f64,
        diameter_m: f64,
    ) -> AppResult<Option<OptimizationRecord>> {
        self.optimize_yagi_with_progress(frequency_mhz, element_count, step, diameter_m, None)
    }

    pub fn optimize_yagi_with_progress(
        &self,
        frequency_mhz: f64,
        element_count: usize,
        step: f64,
        diameter_m: f64,
        progress_cb: Option<&mut dyn FnMut(SearchProgress)>,
    ) -> AppResult<Option<OptimizationRecord>> {
        let (frequency, diameter) = validate_inputs(frequency_mhz, diameter_m)?;
        check_max_elements(element_count)?;
        let config = self.search_config(step)?;
        let request = SearchRequest {
            frequency,
            element_count,
            diameter,
        };

        let outcome = af_optimize::optimize_with_progress(
            &request,
            &config,
            &SwrPenaltyScore::default(),
            progress_cb,
        )?;

        match outcome {
            Some(outcome) => Ok(Some(optimization_record(
                frequency,
                element_count,
                step,
                &outcome,
            ))),
            None => {
                info!(
                    frequency_mhz,
                    element_count, "no feasible yagi for this element count"
                );
                Ok(None)
            }
        }
    }

    /// Optimize, then lay out the winner with the direct calculation.
    pub fn optimize_and_build_yagi(
        &self,
        frequency_mhz: f64,
        element_count: usize,
        step: f64,
        diameter_m: f64,
    ) -> AppResult<Option<YagiBuild>> {
        let Some(optimization) =
            self.optimize_yagi(frequency_mhz, element_count, step, diameter_m)?
        else {
            return Ok(None);
        };
        let record = self.build_from_optimization(&optimization, diameter_m)?;
        Ok(Some(YagiBuild {
            optimization,
            record,
        }))
    }

    /// Direct Yagi layout using the winning lengths as factors.
    ///
    /// The reflector keeps its default factor; the single optimized spacing is
    /// used for both gaps.
    pub fn build_from_optimization(
        &self,
        optimization: &OptimizationRecord,
        diameter_m: f64,
    ) -> AppResult<ResultRecord> {
        let lam = optimization.wavelength_m;
        let spacing_factor = optimization.spacing_m / lam;
        let factors = YagiFactors {
            active_factor: optimization.active_length_m / lam,
            director_base_factor: optimization.director_length_m / lam,
            ref_active_spacing_factor: spacing_factor,
            active_director_spacing_factor: spacing_factor,
            ..YagiFactors::default()
        };
        debug!(?factors, "building optimized yagi");
        self.yagi(
            optimization.frequency_hz / 1e6,
            optimization.element_count,
            diameter_m,
            Some(factors),
        )
    }

    fn search_config(&self, step: f64) -> AppResult<SearchConfig> {
        let config = SearchConfig {
            mode: self.mode,
            target_impedance_ohms: self.target_impedance_ohms,
            ..SearchConfig::with_step(step)
        };
        config.validate()?;
        Ok(config)
    }

    fn element_record(
        &self,
        kind: AntennaKind,
        title: &str,
        frequency: Frequency,
        diameter: Length,
        design: &ElementDesign,
    ) -> ResultRecord {
        ResultRecord {
            kind,
            frequency_hz: frequency.value,
            wavelength_m: design.wavelength.value,
            length_m: Some(design.length.value),
            shortening_factor: design.shortening_factor,
            impedance_ohms: design.impedance_ohms,
            gain_dbi: design.gain_dbi,
            description: self.describe(title, design.shortening_factor, diameter),
            elements: None,
        }
    }

    fn yagi_record(
        &self,
        frequency: Frequency,
        diameter: Length,
        geometry: &YagiGeometry,
    ) -> ResultRecord {
        let title = format!(
            "{}-element Yagi-Uda, {} director{}",
            geometry.element_count(),
            geometry.director_count(),
            if geometry.director_count() == 1 { "" } else { "s" }
        );
        ResultRecord {
            kind: AntennaKind::YagiUda,
            frequency_hz: frequency.value,
            wavelength_m: geometry.wavelength.value,
            length_m: None,
            shortening_factor: geometry.shortening_factor,
            impedance_ohms: geometry.nominal_impedance_ohms(),
            gain_dbi: geometry.nominal_gain_dbi(),
            description: self.describe(&title, geometry.shortening_factor, diameter),
            elements: Some(YagiElementsRecord {
                reflector_length_m: geometry.reflector_length.value,
                active_length_m: geometry.active_length.value,
                director_lengths_m: geometry.director_lengths.iter().map(|l| l.value).collect(),
                ref_active_spacing_m: geometry.ref_active_spacing.value,
                active_director_spacing_m: geometry.active_director_spacing.value,
            }),
        }
    }

    fn describe(&self, title: &str, k: f64, diameter: Length) -> String {
        match self.mode {
            CorrectionMode::DiameterCorrected => format!(
                "{} (k={:.3}, diameter {:.1} mm)",
                title,
                k,
                diameter.value * 1000.0
            ),
            CorrectionMode::ThinWire => format!("{} (thin wire, k={:.3})", title, k),
        }
    }
}

/// Quarter-wave monopole with the default model.
pub fn compute_monopole(frequency_mhz: f64, diameter_m: f64) -> AppResult<ResultRecord> {
    Calculator::default().monopole(frequency_mhz, diameter_m)
}

/// Half-wave dipole with the default model.
pub fn compute_dipole(frequency_mhz: f64, diameter_m: f64) -> AppResult<ResultRecord> {
    Calculator::default().dipole(frequency_mhz, diameter_m)
}

pub fn compute_yagi(
    frequency_mhz: f64,
    element_count: usize,
    diameter_m: f64,
    factors: Option<YagiFactors>,
) -> AppResult<ResultRecord> {
    Calculator::default().yagi(frequency_mhz, element_count, diameter_m, factors)
}

pub fn optimize_yagi(
    frequency_mhz: f64,
    element_count: usize,
    step: f64,
    diameter_m: f64,
) -> AppResult<Option<OptimizationRecord>> {
    Calculator::default().optimize_yagi(frequency_mhz, element_count, step, diameter_m)
}

pub fn optimize_and_build_yagi(
    frequency_mhz: f64,
    element_count: usize,
    step: f64,
    diameter_m: f64,
) -> AppResult<Option<YagiBuild>> {
    Calculator::default().optimize_and_build_yagi(frequency_mhz, element_count, step, diameter_m)
}

fn validate_inputs(frequency_mhz: f64, diameter_m: f64) -> AppResult<(Frequency, Length)> {
    if !frequency_mhz.is_finite() || frequency_mhz <= 0.0 {
        return Err(AppError::InvalidInput(format!(
            "frequency must be a positive number of MHz, got {}",
            frequency_mhz
        )));
    }
    if !diameter_m.is_finite() || diameter_m <= 0.0 {
        return Err(AppError::InvalidInput(format!(
            "conductor diameter must be a positive number of meters, got {}",
            diameter_m
        )));
    }
    Ok((mhz(frequency_mhz), m(diameter_m)))
}

fn check_max_elements(element_count: usize) -> AppResult<()> {
    if element_count > MAX_YAGI_ELEMENTS {
        return Err(AppError::InvalidInput(format!(
            "a Yagi can have at most {} elements, got {}",
            MAX_YAGI_ELEMENTS, element_count
        )));
    }
    Ok(())
}

fn validate_factors(factors: &YagiFactors) -> AppResult<()> {
    let fields = [
        ("active", factors.active_factor),
        ("reflector", factors.reflector_factor),
        ("director base", factors.director_base_factor),
        ("reflector-active spacing", factors.ref_active_spacing_factor),
        ("active-director spacing", factors.active_director_spacing_factor),
    ];
    for (name, value) in fields {
        if !value.is_finite() || value <= 0.0 {
            return Err(AppError::InvalidInput(format!(
                "{} factor must be positive, got {}",
                name, value
            )));
        }
    }
    Ok(())
}

fn optimization_record(
    frequency: Frequency,
    element_count: usize,
    step: f64,
    outcome: &SearchOutcome,
) -> OptimizationRecord {
    let best = &outcome.best;
    OptimizationRecord {
        frequency_hz: frequency.value,
        element_count,
        step,
        wavelength_m: outcome.wavelength.value,
        reflector_length_m: best.lengths.reflector_m,
        active_length_m: best.lengths.active_m,
        director_length_m: best.lengths.director_m,
        spacing_m: best.lengths.spacing_m,
        impedance_ohms: best.estimate.impedance_ohms,
        gain_dbi: best.estimate.gain_dbi,
        swr: best.estimate.swr,
        score: best.estimate.score,
        evaluations: outcome.evaluations,
        scoring: outcome.scoring.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptions_report_k_and_diameter() {
        let dipole = compute_dipole(145.0, 0.004).unwrap();
        assert_eq!(dipole.description, "Half-wave dipole (k=0.971, diameter 4.0 mm)");

        let thin = Calculator::new(CorrectionMode::ThinWire)
            .monopole(145.0, 0.004)
            .unwrap();
        assert_eq!(thin.description, "Quarter-wave monopole (thin wire, k=0.950)");

        let yagi = compute_yagi(145.0, 3, 0.004, None).unwrap();
        assert!(yagi.description.starts_with("3-element Yagi-Uda, 1 director ("));
    }

    #[test]
    fn bad_factor_is_rejected() {
        let factors = YagiFactors {
            director_base_factor: 0.0,
            ..YagiFactors::default()
        };
        let err = compute_yagi(145.0, 4, 0.004, Some(factors)).unwrap_err();
        assert!(err.to_string().contains("director base"));
    }
}
