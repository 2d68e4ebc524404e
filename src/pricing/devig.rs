//! Two-way de-vigging.
//!
//! Removes the bookmaker margin from a pair of opposing quotes by
//! normalising their implied probabilities to sum to 1. A degenerate
//! pair returns `None` and the caller falls back to the single-sided
//! implied probability for that leg.

use tracing::debug;

use super::converter::OddsConverter;

/// De-vigged fair probabilities for a two-way market.
/// `fair_a + fair_b == 1` by construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FairPair {
    pub fair_a: f64,
    pub fair_b: f64,
}

/// De-vig a two-way market given both American lines.
///
/// Returns `None` when either line is invalid or the implied sum is not
/// positive (nothing to normalise against).
pub fn devig_two_way(line_a: i64, line_b: i64) -> Option<FairPair> {
    let a = OddsConverter::from_line(line_a)?;
    let b = OddsConverter::from_line(line_b)?;

    let sum = a.implied_probability + b.implied_probability;
    if sum <= 0.0 {
        debug!(line_a, line_b, sum, "Degenerate two-way pair, skipping de-vig");
        return None;
    }

    Some(FairPair {
        fair_a: a.implied_probability / sum,
        fair_b: b.implied_probability / sum,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symmetric_pair_is_even() {
        // -110 / -110 is the canonical vigged coin flip.
        let pair = devig_two_way(-110, -110).unwrap();
        assert!((pair.fair_a - 0.5).abs() < 1e-10);
        assert!((pair.fair_b - 0.5).abs() < 1e-10);
    }

    #[test]
    fn test_fair_pair_sums_to_one() {
        for (a, b) in [(-110, -110), (-120, 110), (145, -165), (-350, 280), (100, -100)] {
            let pair = devig_two_way(a, b).unwrap();
            assert!(
                (pair.fair_a + pair.fair_b - 1.0).abs() < 1e-12,
                "pair ({a}, {b}) does not normalise"
            );
        }
    }

    #[test]
    fn test_favorite_keeps_higher_fair_probability() {
        let pair = devig_two_way(-150, 130).unwrap();
        assert!(pair.fair_a > pair.fair_b);
        assert!(pair.fair_a > 0.5);
    }

    #[test]
    fn test_devig_strips_margin() {
        // Raw implieds for -110/-110 sum to ~1.048; fair must shrink both.
        let raw = OddsConverter::from_line(-110).unwrap().implied_probability;
        let pair = devig_two_way(-110, -110).unwrap();
        assert!(pair.fair_a < raw);
    }

    #[test]
    fn test_invalid_line_returns_none() {
        assert!(devig_two_way(0, -110).is_none());
        assert!(devig_two_way(-110, 0).is_none());
    }
}
