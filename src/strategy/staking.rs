//! Kelly criterion stake sizing.
//!
//! Computes the raw Kelly fraction for the combined parlay bet and the
//! conservative advisory fraction actually shown to the user (half-Kelly
//! by default, via a configurable divisor).

use serde::Deserialize;

use super::clamp01;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Staking configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StakingConfig {
    /// Divisor applied to the raw Kelly fraction for the displayed
    /// recommendation (2.0 = half-Kelly).
    pub kelly_divisor: f64,
}

impl Default for StakingConfig {
    fn default() -> Self {
        Self { kelly_divisor: 2.0 }
    }
}

// ---------------------------------------------------------------------------
// Advisor
// ---------------------------------------------------------------------------

pub struct StakingAdvisor {
    config: StakingConfig,
}

impl StakingAdvisor {
    pub fn new(config: StakingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StakingConfig {
        &self.config
    }

    /// Raw Kelly fraction, clamped to [0,1].
    ///
    /// Kelly formula: f* = (bp - q) / b, with b the net decimal odds.
    /// Returns 0 when b <= 0 (no positive-odds edge to size) or when
    /// either input is non-finite.
    pub fn kelly_fraction(prob: f64, decimal_odds: f64) -> f64 {
        if !prob.is_finite() || !decimal_odds.is_finite() {
            return 0.0;
        }
        let b = decimal_odds - 1.0;
        if b <= 0.0 {
            return 0.0;
        }
        clamp01((b * prob - (1.0 - prob)) / b)
    }

    /// The advisory fraction shown to the user: raw Kelly over the
    /// configured divisor.
    pub fn recommended_fraction(&self, prob: f64, decimal_odds: f64) -> f64 {
        if self.config.kelly_divisor <= 0.0 {
            return 0.0;
        }
        Self::kelly_fraction(prob, decimal_odds) / self.config.kelly_divisor
    }
}

impl Default for StakingAdvisor {
    fn default() -> Self {
        Self::new(StakingConfig::default())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
