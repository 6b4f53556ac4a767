//! Exhaustive grid search over Yagi-Uda length and spacing factors.
//!
//! The search space is a cartesian product of named one-dimensional factor grids.
//! Every point is evaluated with the estimators from `af-model` and ranked by a
//! [`ScoringFunction`]; the first point reaching the maximum score wins.

pub mod error;
pub mod grid;
pub mod objective;
pub mod search;

pub use error::{SearchError, SearchResult};
pub use grid::{Factor, FactorGrid, GridPoint, GridPoints, GridSpace};
pub use objective::{PerformanceEstimate, ScoringFunction, SwrPenaltyScore};
pub use search::{
    Candidate, Evaluator, FactorCenters, MAX_STEP, MIN_OPTIMIZE_ELEMENTS, MIN_STEP, SearchConfig,
    SearchOutcome, SearchProgress, SearchRequest, optimize, optimize_with_progress,
    optimize_with_scoring,
};
