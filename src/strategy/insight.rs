//! Natural-language insight generation.
//!
//! Produces a short, bounded list of plain-English takeaways from the
//! analyzed legs and parlay summary. The final element is always the
//! overall-EV message: the list is truncated to `max_insights - 1`
//! before that line is appended, so truncation can never drop it.

use serde::Deserialize;

use crate::types::{Leg, ParlaySummary};

/// Hard ceiling on the insight list, regardless of configuration.
const MAX_INSIGHTS: usize = 6;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InsightConfig {
    /// Insight list cap (verbose mode raises this, up to 6).
    pub max_insights: usize,
    /// Absolute per-leg edge beyond which a value / weak-price line is
    /// emitted.
    pub edge_callout_threshold: f64,
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            max_insights: 4,
            edge_callout_threshold: 0.03,
        }
    }
}

// ---------------------------------------------------------------------------
// Generator
// ---------------------------------------------------------------------------

pub struct InsightGenerator {
    config: InsightConfig,
}

impl InsightGenerator {
    pub fn new(config: InsightConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &InsightConfig {
        &self.config
    }

    /// Generate the insight list for one analysis pass.
    ///
    /// Order: per-leg edge callouts, then the risk/reward caution, then
    /// the mandatory overall-EV line.
    pub fn generate(&self, legs: &[Leg], summary: &ParlaySummary) -> Vec<String> {
        let cap = self.config.max_insights.clamp(1, MAX_INSIGHTS);
        let threshold = self.config.edge_callout_threshold;

        let mut tips: Vec<String> = Vec::new();
        for leg in legs {
            match leg.edge {
                Some(edge) if edge > threshold => {
                    tips.push(format!(
                        "Value on {}: edge {:.1}% ✅",
                        leg.label,
                        edge * 100.0
                    ));
                }
                Some(edge) if edge < -threshold => {
                    tips.push(format!(
                        "Weak price on {}: edge {:.1}% ❌",
                        leg.label,
                        edge * 100.0
                    ));
                }
                _ => {}
            }
        }

        if summary.combined_decimal_odds >= 2.0 && summary.combined_probability < 0.5 {
            tips.push(
                "Risk/Reward: long odds with a sub-50% win chance; consider a smaller stake."
                    .to_string(),
            );
        }

        // Reserve the last slot for the EV line before truncating.
        tips.truncate(cap - 1);
        tips.push(self.ev_message(summary));
        tips
    }

    fn ev_message(&self, summary: &ParlaySummary) -> String {
        if summary.expected_value >= 0.0 {
            format!(
                "Positive EV overall: +${:.2} on ${:.2} staked",
                summary.expected_value, summary.stake
            )
        } else {
            format!(
                "Negative EV overall: -${:.2}; shop prices or trim legs.",
                summary.expected_value.abs()
            )
        }
    }
}

impl Default for InsightGenerator {
    fn default() -> Self {
        Self::new(InsightConfig::default())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::OddsConverter;
    use crate::strategy::parlay::ParlayAggregator;

    fn leg(line: i64, label: &str, edge: Option<f64>) -> Leg {
        let quote = OddsConverter::from_line(line).unwrap();
        Leg {
            label: label.to_string(),
            fair_probability: edge.map(|e| quote.implied_probability + e),
            edge,
            competitor_line: None,
            quote,
        }
    }

    fn summary_for(legs: &[Leg], stake: f64) -> ParlaySummary {
        ParlayAggregator::combine(legs, stake)
    }

    #[test]
    fn test_ev_message_is_always_last() {
        let legs = vec![leg(-110, "Lakers", Some(0.06)), leg(145, "Celtics", Some(-0.05))];
        let summary = summary_for(&legs, 20.0);
        let tips = InsightGenerator::default().generate(&legs, &summary);
        assert!(tips.last().unwrap().contains("EV overall"));
    }

    #[test]
    fn test_value_and_weak_price_callouts() {
        let legs = vec![leg(-110, "Lakers", Some(0.06)), leg(145, "Celtics", Some(-0.05))];
        let summary = summary_for(&legs, 20.0);
        let tips = InsightGenerator::default().generate(&legs, &summary);
        assert!(tips.iter().any(|t| t.starts_with("Value on Lakers")));
        assert!(tips.iter().any(|t| t.starts_with("Weak price on Celtics")));
    }

    #[test]
    fn test_small_edges_stay_quiet() {
        let legs = vec![leg(-110, "Lakers", Some(0.02)), leg(145, "Celtics", Some(-0.01))];
        let summary = summary_for(&legs, 20.0);
        let tips = InsightGenerator::default().generate(&legs, &summary);
        assert!(!tips.iter().any(|t| t.contains("Value on")));
        assert!(!tips.iter().any(|t| t.contains("Weak price")));
    }

    #[test]
    fn test_risk_reward_caution_on_long_odds() {
        // Two-leg parlay: decimal ~4.68, probability ~21%.
        let legs = vec![leg(-110, "A", None), leg(145, "B", None)];
        let summary = summary_for(&legs, 20.0);
        let tips = InsightGenerator::default().generate(&legs, &summary);
        assert!(tips.iter().any(|t| t.starts_with("Risk/Reward")));
    }

    #[test]
    fn test_no_caution_on_heavy_favorite() {
        // Single -350 favorite: decimal ~1.29, probability ~78%.
        let legs = vec![leg(-350, "A", None)];
        let summary = summary_for(&legs, 20.0);
        let tips = InsightGenerator::default().generate(&legs, &summary);
        assert!(!tips.iter().any(|t| t.starts_with("Risk/Reward")));
    }

    #[test]
    fn test_truncation_protects_ev_message() {
        // Six strong-edge legs would produce 6 callouts plus a caution;
        // with the default cap of 4 only 3 survive and EV still lands last.
        let legs: Vec<Leg> = (0..6)
            .map(|i| leg(-110, &format!("Leg {i}"), Some(0.08)))
            .collect();
        let summary = summary_for(&legs, 20.0);
        let tips = InsightGenerator::default().generate(&legs, &summary);
        assert_eq!(tips.len(), 4);
        assert!(tips.last().unwrap().contains("EV overall"));
        assert!(tips[0].starts_with("Value on Leg 0"));
    }

    #[test]
    fn test_verbose_mode_allows_more() {
        let generator = InsightGenerator::new(InsightConfig {
            max_insights: 6,
            ..InsightConfig::default()
        });
        let legs: Vec<Leg> = (0..6)
            .map(|i| leg(-110, &format!("Leg {i}"), Some(0.08)))
            .collect();
        let summary = summary_for(&legs, 20.0);
        let tips = generator.generate(&legs, &summary);
        assert_eq!(tips.len(), 6);
        assert!(tips.last().unwrap().contains("EV overall"));
    }

    #[test]
    fn test_config_cap_cannot_exceed_hard_limit() {
        let generator = InsightGenerator::new(InsightConfig {
            max_insights: 50,
            ..InsightConfig::default()
        });
        let legs: Vec<Leg> = (0..10)
            .map(|i| leg(-110, &format!("Leg {i}"), Some(0.08)))
            .collect();
        let summary = summary_for(&legs, 20.0);
        let tips = generator.generate(&legs, &summary);
        assert!(tips.len() <= 6);
    }

    #[test]
    fn test_positive_and_negative_ev_phrasing() {
        let generator = InsightGenerator::default();

        // Fair probability below the vigged implied price: clearly -EV.
        let losing = vec![leg(-110, "A", Some(-0.08))];
        let tips = generator.generate(&losing, &summary_for(&losing, 20.0));
        assert!(tips.last().unwrap().starts_with("Negative EV overall"));

        let winning = vec![leg(100, "A", Some(0.10))];
        let tips = generator.generate(&winning, &summary_for(&winning, 20.0));
        assert!(tips.last().unwrap().starts_with("Positive EV overall"));
    }

    #[test]
    fn test_ev_message_present_even_with_no_legs_worth_mentioning() {
        let legs = vec![leg(-350, "A", None)];
        let summary = summary_for(&legs, 10.0);
        let tips = InsightGenerator::default().generate(&legs, &summary);
        assert_eq!(tips.len(), 1);
        assert!(tips[0].contains("EV overall"));
    }
}
