//! Parlay aggregation.
//!
//! Combines per-leg quotes into the parlay-level probability, decimal
//! odds, profit, expected value, and Kelly fraction. Probability and
//! decimal odds are both multiplicative, but their empty-set values
//! differ on purpose: an empty slip has probability 0 (an empty product
//! must not report certainty) while its decimal odds stay at the
//! multiplicative identity 1.

use crate::types::{Leg, ParlaySummary};

use super::staking::StakingAdvisor;

pub struct ParlayAggregator;

impl ParlayAggregator {
    /// Combine the current legs at the given stake.
    ///
    /// Deterministic and idempotent: identical inputs produce
    /// bit-identical output. Callers with zero legs should short-circuit
    /// to placeholder display; the numbers returned here are still
    /// well-defined for that case.
    pub fn combine(legs: &[Leg], stake: f64) -> ParlaySummary {
        let stake = if stake.is_finite() && stake > 0.0 {
            stake
        } else {
            0.0
        };

        let combined_probability = if legs.is_empty() {
            0.0
        } else {
            legs.iter().map(Leg::win_probability).product()
        };
        let combined_decimal_odds: f64 = legs.iter().map(|l| l.quote.decimal_odds).product();

        let profit = stake * (combined_decimal_odds - 1.0);
        let expected_value =
            combined_probability * profit - (1.0 - combined_probability) * stake;

        ParlaySummary {
            combined_probability,
            combined_decimal_odds,
            stake,
            profit,
            expected_value,
            kelly_fraction: StakingAdvisor::kelly_fraction(
                combined_probability,
                combined_decimal_odds,
            ),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::OddsConverter;

    fn leg(line: i64, fair: Option<f64>) -> Leg {
        let quote = OddsConverter::from_line(line).unwrap();
        Leg {
            label: format!("{line}"),
            edge: fair.map(|f| f - quote.implied_probability),
            fair_probability: fair,
            competitor_line: None,
            quote,
        }
    }

    #[test]
    fn test_empty_slip_asymmetry() {
        // Probability 0 but decimal odds 1: the documented empty-set rule.
        let summary = ParlayAggregator::combine(&[], 20.0);
        assert_eq!(summary.combined_probability, 0.0);
        assert_eq!(summary.combined_decimal_odds, 1.0);
        assert_eq!(summary.profit, 0.0);
        assert_eq!(summary.kelly_fraction, 0.0);
    }

    #[test]
    fn test_probability_is_product_of_win_probabilities() {
        let legs = vec![leg(-110, None), leg(145, Some(0.45))];
        let summary = ParlayAggregator::combine(&legs, 10.0);
        let expected: f64 = legs.iter().map(Leg::win_probability).product();
        assert!((summary.combined_probability - expected).abs() < 1e-12);
    }

    #[test]
    fn test_decimal_odds_is_product_of_leg_decimals() {
        let legs = vec![leg(-110, None), leg(145, Some(0.45)), leg(200, None)];
        let summary = ParlayAggregator::combine(&legs, 10.0);
        let expected: f64 = legs.iter().map(|l| l.quote.decimal_odds).product();
        assert!((summary.combined_decimal_odds - expected).abs() < 1e-12);
    }

    #[test]
    fn test_two_leg_reference_scenario() {
        // -110 and +145, $20 stake: the worked example every variant of
        // this engine must reproduce.
        let legs = vec![leg(-110, None), leg(145, None)];
        let summary = ParlayAggregator::combine(&legs, 20.0);

        assert!((summary.combined_probability - 0.2138).abs() < 5e-4);
        assert!((summary.combined_decimal_odds - 4.677).abs() < 5e-3);
        assert!((summary.profit - 73.55).abs() < 0.05);
        // A parlay priced purely off implied probabilities is break-even
        // by construction; only float residue remains.
        assert!(summary.expected_value.abs() < 0.01);
    }

    #[test]
    fn test_fair_probability_preferred_over_implied() {
        let with_fair = vec![leg(-110, Some(0.60))];
        let without = vec![leg(-110, None)];
        let a = ParlayAggregator::combine(&with_fair, 10.0);
        let b = ParlayAggregator::combine(&without, 10.0);
        assert!((a.combined_probability - 0.60).abs() < 1e-12);
        assert!(a.combined_probability > b.combined_probability);
    }

    #[test]
    fn test_negative_or_non_finite_stake_treated_as_zero() {
        let legs = vec![leg(-110, None)];
        let summary = ParlayAggregator::combine(&legs, -5.0);
        assert_eq!(summary.stake, 0.0);
        assert_eq!(summary.profit, 0.0);
        let summary = ParlayAggregator::combine(&legs, f64::NAN);
        assert_eq!(summary.stake, 0.0);
    }

    #[test]
    fn test_recomputation_is_idempotent() {
        let legs = vec![leg(-110, None), leg(145, Some(0.42))];
        let first = ParlayAggregator::combine(&legs, 20.0);
        let second = ParlayAggregator::combine(&legs, 20.0);
        assert_eq!(first, second);
    }
}
