//! Grid search driver.

use crate::error::{SearchError, SearchResult};
use crate::grid::{Factor, FactorGrid, GridPoint, GridSpace};
use crate::objective::{PerformanceEstimate, ScoringFunction, SwrPenaltyScore};
use af_core::numeric::ensure_positive;
use af_core::units::{Frequency, Length, wavelength};
use af_model::{
    CorrectionMode, DEFAULT_TARGET_IMPEDANCE_OHMS, ElementLengths, estimate_gain,
    estimate_impedance, estimate_swr,
};
use tracing::{debug, info};

/// Reflector + active element + at least one director.
pub const MIN_OPTIMIZE_ELEMENTS: usize = 3;

/// Smallest accepted grid step, in wavelengths.
pub const MIN_STEP: f64 = 0.001;

/// Largest accepted grid step, in wavelengths.
pub const MAX_STEP: f64 = 0.1;

const DEFAULT_STEP: f64 = 0.005;
const DEFAULT_HALF_WIDTH_STEPS: usize = 2;
const PROGRESS_STRIDE: usize = 25;

/// Grid centers, in wavelengths.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FactorCenters {
    pub reflector: f64,
    pub active: f64,
    pub director: f64,
    pub spacing: f64,
}

impl Default for FactorCenters {
    fn default() -> Self {
        Self {
            reflector: 0.50 * 1.03,
            active: 0.50,
            director: 0.46,
            spacing: 0.18,
        }
    }
}

impl FactorCenters {
    pub fn get(&self, factor: Factor) -> f64 {
        match factor {
            Factor::Reflector => self.reflector,
            Factor::Active => self.active,
            Factor::Director => self.director,
            Factor::Spacing => self.spacing,
        }
    }
}

/// Search tuning. The grid always has `2 * half_width_steps + 1` points per
/// factor; `step` only changes their spacing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchConfig {
    pub step: f64,
    pub half_width_steps: usize,
    pub centers: FactorCenters,
    pub target_impedance_ohms: f64,
    pub mode: CorrectionMode,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            step: DEFAULT_STEP,
            half_width_steps: DEFAULT_HALF_WIDTH_STEPS,
            centers: FactorCenters::default(),
            target_impedance_ohms: DEFAULT_TARGET_IMPEDANCE_OHMS,
            mode: CorrectionMode::default(),
        }
    }
}

impl SearchConfig {
    pub fn with_step(step: f64) -> Self {
        Self {
            step,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> SearchResult<()> {
        if !self.step.is_finite() || !(MIN_STEP..=MAX_STEP).contains(&self.step) {
            return Err(SearchError::InvalidConfig {
                what: format!(
                    "step {} outside [{}, {}] wavelengths",
                    self.step, MIN_STEP, MAX_STEP
                ),
            });
        }
        if !self.target_impedance_ohms.is_finite() || self.target_impedance_ohms <= 0.0 {
            return Err(SearchError::InvalidConfig {
                what: format!(
                    "target impedance {} ohms must be positive",
                    self.target_impedance_ohms
                ),
            });
        }
        Ok(())
    }

    /// Reflector, active, director, spacing, in that enumeration order.
    pub fn grid_space(&self) -> SearchResult<GridSpace> {
        self.validate()?;
        let dims = [
            Factor::Reflector,
            Factor::Active,
            Factor::Director,
            Factor::Spacing,
        ]
        .into_iter()
        .map(|f| FactorGrid::centered(f, self.centers.get(f), self.step, self.half_width_steps))
        .collect();
        GridSpace::new(dims)
    }
}

/// What to optimize for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchRequest {
    pub frequency: Frequency,
    pub element_count: usize,
    pub diameter: Length,
}

/// One evaluated grid point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    /// Position in enumeration order.
    pub index: usize,
    pub reflector_factor: f64,
    pub active_factor: f64,
    pub director_factor: f64,
    pub spacing_factor: f64,
    /// Unshortened `factor * wavelength` lengths.
    pub lengths: ElementLengths,
    pub estimate: PerformanceEstimate,
}

/// The best point of a completed search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    pub best: Candidate,
    pub wavelength: Length,
    pub evaluations: usize,
    pub scoring: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchProgress {
    pub evaluated: usize,
    pub total: usize,
    pub best_score: f64,
}

impl SearchProgress {
    pub fn fraction_complete(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            self.evaluated as f64 / self.total as f64
        }
    }
}

/// Scores individual grid points for one request.
///
/// Factors absent from a point are pinned at their configured center.
pub struct Evaluator<'a> {
    wavelength: Length,
    radius_m: f64,
    element_count: usize,
    config: SearchConfig,
    scoring: &'a dyn ScoringFunction,
}

impl<'a> Evaluator<'a> {
    pub fn new(
        request: &SearchRequest,
        config: &SearchConfig,
        scoring: &'a dyn ScoringFunction,
    ) -> SearchResult<Self> {
        let lam = wavelength(request.frequency);
        ensure_positive(lam.value, "wavelength")?;
        let radius_m = ensure_positive(request.diameter.value, "conductor diameter")? / 2.0;

        Ok(Self {
            wavelength: lam,
            radius_m,
            element_count: request.element_count,
            config: *config,
            scoring,
        })
    }

    pub fn wavelength(&self) -> Length {
        self.wavelength
    }

    pub fn evaluate(&self, point: &GridPoint) -> SearchResult<Candidate> {
        let factor = |f: Factor| point.value(f).unwrap_or(self.config.centers.get(f));
        let reflector_factor = factor(Factor::Reflector);
        let active_factor = factor(Factor::Active);
        let director_factor = factor(Factor::Director);
        let spacing_factor = factor(Factor::Spacing);

        let lam = self.wavelength.value;
        let lengths = ElementLengths {
            reflector_m: reflector_factor * lam,
            active_m: active_factor * lam,
            director_m: director_factor * lam,
            spacing_m: spacing_factor * lam,
        };

        let impedance_ohms = estimate_impedance(self.config.mode, &lengths, lam, self.radius_m)?;
        let swr = estimate_swr(impedance_ohms, self.config.target_impedance_ohms);
        let gain_dbi = estimate_gain(self.element_count, spacing_factor);
        let score = self.scoring.score(gain_dbi, swr);

        Ok(Candidate {
            index: point.index,
            reflector_factor,
            active_factor,
            director_factor,
            spacing_factor,
            lengths,
            estimate: PerformanceEstimate {
                impedance_ohms,
                gain_dbi,
                swr,
                score,
            },
        })
    }
}

/// Run the search with the default [`SwrPenaltyScore`].
///
/// Returns `Ok(None)` when the request has fewer than [`MIN_OPTIMIZE_ELEMENTS`].
pub fn optimize(
    request: &SearchRequest,
    config: &SearchConfig,
) -> SearchResult<Option<SearchOutcome>> {
    optimize_with_progress(request, config, &SwrPenaltyScore::default(), None)
}

pub fn optimize_with_scoring(
    request: &SearchRequest,
    config: &SearchConfig,
    scoring: &dyn ScoringFunction,
) -> SearchResult<Option<SearchOutcome>> {
    optimize_with_progress(request, config, scoring, None)
}

/// Run the search and stream progress every few evaluations.
///
/// Every grid point is evaluated. A point replaces the current best only when its
/// score is strictly greater, so among equal scores the earliest point wins.
pub fn optimize_with_progress(
    request: &SearchRequest,
    config: &SearchConfig,
    scoring: &dyn ScoringFunction,
    mut progress_cb: Option<&mut dyn FnMut(SearchProgress)>,
) -> SearchResult<Option<SearchOutcome>> {
    if request.element_count < MIN_OPTIMIZE_ELEMENTS {
        info!(
            element_count = request.element_count,
            minimum = MIN_OPTIMIZE_ELEMENTS,
            "yagi search infeasible: no room for a director"
        );
        return Ok(None);
    }

    let space = config.grid_space()?;
    let evaluator = Evaluator::new(request, config, scoring)?;
    let total = space.len();
    debug!(
        points = total,
        step = config.step,
        wavelength_m = evaluator.wavelength().value,
        scoring = scoring.name(),
        "starting yagi grid search"
    );

    let mut best: Option<Candidate> = None;
    for point in space.points() {
        let candidate = evaluator.evaluate(&point)?;
        let improves = match &best {
            None => true,
            Some(current) => candidate.estimate.score > current.estimate.score,
        };
        if improves {
            best = Some(candidate);
        }

        let evaluated = point.index + 1;
        if evaluated % PROGRESS_STRIDE == 0 || evaluated == total {
            if let Some(cb) = progress_cb.as_deref_mut() {
                cb(SearchProgress {
                    evaluated,
                    total,
                    best_score: best.map_or(f64::NEG_INFINITY, |b| b.estimate.score),
                });
            }
        }
    }

    let Some(best) = best else {
        return Ok(None);
    };

    info!(
        evaluations = total,
        best_index = best.index,
        score = best.estimate.score,
        gain_dbi = best.estimate.gain_dbi,
        swr = best.estimate.swr,
        "yagi grid search finished"
    );

    Ok(Some(SearchOutcome {
        best,
        wavelength: evaluator.wavelength(),
        evaluations: total,
        scoring: scoring.name().to_string(),
    }))
}
