//! Heuristic confidence scoring.
//!
//! Blends the combined win probability with a bonus for legs showing a
//! meaningful positive edge. The weighting is policy, not law: observed
//! variants of this engine disagreed on the exact formula, so every term
//! is a named configuration knob and the adopted defaults are recorded
//! in DESIGN.md.

use serde::Deserialize;

use crate::types::Leg;

use super::clamp01;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Confidence formula weights.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ConfidenceConfig {
    /// Weight on the combined win probability.
    pub probability_weight: f64,
    /// Bonus per leg whose edge clears the positive-edge threshold.
    pub edge_bonus_per_leg: f64,
    /// Ceiling on the total edge bonus.
    pub edge_bonus_cap: f64,
    /// Minimum edge for a leg to count toward the bonus.
    pub positive_edge_threshold: f64,
}

impl Default for ConfidenceConfig {
    fn default() -> Self {
        Self {
            probability_weight: 0.7,
            edge_bonus_per_leg: 0.05,
            edge_bonus_cap: 0.3,
            positive_edge_threshold: 0.03,
        }
    }
}

// ---------------------------------------------------------------------------
// Scorer
// ---------------------------------------------------------------------------

pub struct ConfidenceScorer {
    config: ConfidenceConfig,
}

impl ConfidenceScorer {
    pub fn new(config: ConfidenceConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ConfidenceConfig {
        &self.config
    }

    /// Score a slip in [0,1]:
    /// `clamp01(w * p + min(cap, per_leg * strong_edge_count))`.
    pub fn score(&self, combined_probability: f64, legs: &[Leg]) -> f64 {
        if !combined_probability.is_finite() {
            return 0.0;
        }
        let strong_edges = legs
            .iter()
            .filter(|l| matches!(l.edge, Some(e) if e > self.config.positive_edge_threshold))
            .count();
        let bonus = (self.config.edge_bonus_per_leg * strong_edges as f64)
            .min(self.config.edge_bonus_cap);
        clamp01(self.config.probability_weight * combined_probability + bonus)
    }
}

impl Default for ConfidenceScorer {
    fn default() -> Self {
        Self::new(ConfidenceConfig::default())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::OddsConverter;

    fn leg_with_edge(edge: Option<f64>) -> Leg {
        let quote = OddsConverter::from_line(-110).unwrap();
        Leg {
            label: "test".to_string(),
            fair_probability: edge.map(|e| quote.implied_probability + e),
            edge,
            competitor_line: None,
            quote,
        }
    }

    #[test]
    fn test_probability_term_alone() {
        let scorer = ConfidenceScorer::default();
        let legs = vec![leg_with_edge(None)];
        assert!((scorer.score(0.5, &legs) - 0.35).abs() < 1e-10);
    }

    #[test]
    fn test_strong_edge_adds_bonus() {
        let scorer = ConfidenceScorer::default();
        let legs = vec![leg_with_edge(Some(0.05))];
        // 0.7 * 0.5 + 0.05
        assert!((scorer.score(0.5, &legs) - 0.40).abs() < 1e-10);
    }

    #[test]
    fn test_edge_at_threshold_does_not_count() {
        let scorer = ConfidenceScorer::default();
        let legs = vec![leg_with_edge(Some(0.03))];
        assert!((scorer.score(0.5, &legs) - 0.35).abs() < 1e-10);
    }

    #[test]
    fn test_negative_edge_does_not_count() {
        let scorer = ConfidenceScorer::default();
        let legs = vec![leg_with_edge(Some(-0.10))];
        assert!((scorer.score(0.5, &legs) - 0.35).abs() < 1e-10);
    }

    #[test]
    fn test_bonus_capped() {
        let scorer = ConfidenceScorer::default();
        // 10 strong legs would be a 0.5 bonus; cap holds it at 0.3.
        let legs: Vec<Leg> = (0..10).map(|_| leg_with_edge(Some(0.08))).collect();
        assert!((scorer.score(0.2, &legs) - (0.7 * 0.2 + 0.3)).abs() < 1e-10);
    }

    #[test]
    fn test_score_clamped_to_unit_interval() {
        let scorer = ConfidenceScorer::default();
        let legs: Vec<Leg> = (0..10).map(|_| leg_with_edge(Some(0.08))).collect();
        let score = scorer.score(1.0, &legs);
        assert!(score <= 1.0);
        assert!(scorer.score(0.0, &[]) >= 0.0);
    }

    #[test]
    fn test_non_finite_probability_scores_zero() {
        let scorer = ConfidenceScorer::default();
        assert_eq!(scorer.score(f64::NAN, &[]), 0.0);
    }

    #[test]
    fn test_custom_weights() {
        let scorer = ConfidenceScorer::new(ConfidenceConfig {
            probability_weight: 0.6,
            edge_bonus_per_leg: 0.1,
            edge_bonus_cap: 0.2,
            positive_edge_threshold: 0.01,
        });
        let legs = vec![leg_with_edge(Some(0.02)), leg_with_edge(Some(0.05))];
        // 0.6 * 0.5 + min(0.2, 0.2) = 0.5
        assert!((scorer.score(0.5, &legs) - 0.5).abs() < 1e-10);
    }

    #[test]
    fn test_confidence_config_default() {
        let config = ConfidenceConfig::default();
        assert_eq!(config.probability_weight, 0.7);
        assert_eq!(config.edge_bonus_per_leg, 0.05);
        assert_eq!(config.edge_bonus_cap, 0.3);
        assert_eq!(config.positive_edge_threshold, 0.03);
    }
}
