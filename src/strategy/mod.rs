//! Strategy engine — leg building, parlay aggregation, staking,
//! confidence, and insight generation.

pub mod confidence;
pub mod insight;
pub mod parlay;
pub mod staking;

use tracing::{debug, info};

use crate::pricing::{devig_two_way, OddsConverter};
use crate::session::SlipSession;
use crate::types::{Leg, ParlaySummary, SlipReport};

use confidence::ConfidenceScorer;
use insight::InsightGenerator;
use parlay::ParlayAggregator;
use staking::StakingAdvisor;

/// Clamp to the unit interval.
pub(crate) fn clamp01(x: f64) -> f64 {
    x.clamp(0.0, 1.0)
}

// ---------------------------------------------------------------------------
// Analyzer
// ---------------------------------------------------------------------------

/// Pipelines leg building → parlay aggregation → confidence scoring →
/// insight generation for one analysis pass over a session.
///
/// Instantiate once from configuration; `analyze` is a pure function of
/// the session it is handed, so recomputation on every edit is safe and
/// idempotent.
pub struct SlipAnalyzer {
    staking: StakingAdvisor,
    confidence: ConfidenceScorer,
    insights: InsightGenerator,
}

impl SlipAnalyzer {
    pub fn new(
        staking: StakingAdvisor,
        confidence: ConfidenceScorer,
        insights: InsightGenerator,
    ) -> Self {
        Self {
            staking,
            confidence,
            insights,
        }
    }

    /// Build legs from the session's parallel odds/competitor/teams arrays.
    ///
    /// An unparseable odds token skips that leg only; a degenerate
    /// competitor pair falls back to the single-sided implied probability.
    pub fn build_legs(session: &SlipSession) -> Vec<Leg> {
        let mut legs = Vec::new();
        for (i, token) in session.odds.iter().enumerate() {
            let Some(quote) = OddsConverter::to_quote(token) else {
                debug!(index = i, token = %token, "Skipping invalid odds token");
                continue;
            };

            let competitor_line = session.competitor.get(i).copied().flatten();
            let (fair_probability, edge) = match competitor_line {
                Some(comp) => match devig_two_way(quote.american_line, comp) {
                    Some(pair) => {
                        let edge = pair.fair_a - quote.implied_probability;
                        (Some(pair.fair_a), Some(edge))
                    }
                    None => {
                        debug!(
                            index = i,
                            line = quote.american_line,
                            competitor = comp,
                            "De-vig failed, using single-sided implied probability"
                        );
                        (None, None)
                    }
                },
                None => (None, None),
            };

            let label = session
                .teams
                .get(i)
                .map(|t| t.trim())
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| format!("Leg {}", i + 1));

            legs.push(Leg {
                label,
                quote,
                competitor_line,
                fair_probability,
                edge,
            });
        }
        legs
    }

    /// Run a full analysis pass. Never fails: zero usable legs produce the
    /// neutral placeholder report with a single guidance insight.
    pub fn analyze(&self, session: &SlipSession) -> SlipReport {
        let legs = Self::build_legs(session);

        if legs.is_empty() {
            info!(odds_tokens = session.odds.len(), "No usable legs, returning placeholder");
            return Self::placeholder_report(session.stake);
        }

        let summary = ParlayAggregator::combine(&legs, session.stake);
        let confidence = self
            .confidence
            .score(summary.combined_probability, &legs);
        let insights = self.insights.generate(&legs, &summary);
        let recommended_stake_fraction = self.staking.recommended_fraction(
            summary.combined_probability,
            summary.combined_decimal_odds,
        );

        info!(
            legs = legs.len(),
            probability = format!("{:.1}%", summary.combined_probability * 100.0),
            decimal = format!("{:.2}", summary.combined_decimal_odds),
            ev = format!("${:.2}", summary.expected_value),
            confidence = format!("{:.0}%", confidence * 100.0),
            "Slip analyzed"
        );

        SlipReport {
            legs,
            summary,
            confidence,
            insights,
            recommended_stake_fraction,
            degenerate: false,
        }
    }

    /// The neutral report for a slip with no usable legs. Probability is
    /// the 0 sentinel and decimal odds the identity 1; the presentation
    /// layer renders profit/EV as undefined.
    fn placeholder_report(stake: f64) -> SlipReport {
        SlipReport {
            legs: Vec::new(),
            summary: ParlaySummary {
                combined_probability: 0.0,
                combined_decimal_odds: 1.0,
                stake: if stake.is_finite() && stake > 0.0 { stake } else { 0.0 },
                profit: 0.0,
                expected_value: 0.0,
                kelly_fraction: 0.0,
            },
            confidence: 0.0,
            insights: vec![
                "Add at least one odds value to compute probabilities.".to_string(),
            ],
            recommended_stake_fraction: 0.0,
            degenerate: true,
        }
    }
}

impl Default for SlipAnalyzer {
    fn default() -> Self {
        Self::new(
            StakingAdvisor::default(),
            ConfidenceScorer::default(),
            InsightGenerator::default(),
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
