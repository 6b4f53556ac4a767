//! Scoring of evaluated grid points.

/// Estimated performance of one candidate geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerformanceEstimate {
    /// Clamped to `[20, 100]` ohms.
    pub impedance_ohms: f64,
    pub gain_dbi: f64,
    /// Never below 1.
    pub swr: f64,
    /// Unbounded; may be negative.
    pub score: f64,
}

/// Collapses gain and SWR into one comparable number; higher is better.
///
/// Implementations must be pure: the search relies on identical inputs producing
/// identical scores.
pub trait ScoringFunction: Send + Sync {
    fn name(&self) -> &str;

    fn score(&self, gain_dbi: f64, swr: f64) -> f64;
}

/// `gain - (steep * max(0, swr - threshold) + linear * (swr - 1))`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwrPenaltyScore {
    pub swr_threshold: f64,
    pub steep_penalty: f64,
    pub linear_penalty: f64,
}

impl Default for SwrPenaltyScore {
    fn default() -> Self {
        Self {
            swr_threshold: 1.5,
            steep_penalty: 10.0,
            linear_penalty: 0.5,
        }
    }
}

impl ScoringFunction for SwrPenaltyScore {
    fn name(&self) -> &str {
        "swr-penalty"
    }

    fn score(&self, gain_dbi: f64, swr: f64) -> f64 {
        let penalty = self.steep_penalty * (swr - self.swr_threshold).max(0.0)
            + self.linear_penalty * (swr - 1.0);
        gain_dbi - penalty
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perfect_match_costs_nothing() {
        let s = SwrPenaltyScore::default();
        assert_eq!(s.score(3.75, 1.0), 3.75);
    }

    #[test]
    fn mild_mismatch_is_linear() {
        let s = SwrPenaltyScore::default();
        assert!((s.score(4.0, 1.4) - 3.8).abs() < 1e-12);
    }

    #[test]
    fn mismatch_past_threshold_is_steep() {
        let s = SwrPenaltyScore::default();
        // 10 * 0.5 + 0.5 * 1.0
        assert!((s.score(5.0, 2.0) - (5.0 - 5.5)).abs() < 1e-12);
        assert!(s.score(5.0, 2.0) < 0.0);
    }
}
