//! American odds conversion.
//!
//! Turns raw odds tokens ("+145", "- 110") into `OddsQuote`s carrying the
//! implied probability and decimal odds. Invalid tokens convert to `None`
//! so batch callers can skip bad legs without aborting.

use crate::types::OddsQuote;

pub struct OddsConverter;

impl OddsConverter {
    /// Convert a raw odds token to a quote.
    ///
    /// Whitespace is stripped anywhere in the token (recognized text often
    /// splits the sign from the digits). Returns `None` for anything that
    /// is not a nonzero integer line.
    pub fn to_quote(token: &str) -> Option<OddsQuote> {
        let cleaned: String = token.chars().filter(|c| !c.is_whitespace()).collect();
        if cleaned.is_empty() {
            return None;
        }
        // i64 parsing accepts an optional leading sign, so "+145" is fine
        // and double-signed junk like "+-110" is not.
        let line: i64 = cleaned.parse().ok()?;
        Self::from_line(line)
    }

    /// Convert an already-numeric American line to a quote.
    /// A zero line carries no information and converts to `None`.
    pub fn from_line(line: i64) -> Option<OddsQuote> {
        if line == 0 {
            return None;
        }
        let magnitude = line.unsigned_abs() as f64;
        let (implied, decimal) = if line > 0 {
            (100.0 / (magnitude + 100.0), 1.0 + magnitude / 100.0)
        } else {
            (magnitude / (magnitude + 100.0), 1.0 + 100.0 / magnitude)
        };
        Some(OddsQuote {
            american_line: line,
            implied_probability: implied,
            decimal_odds: decimal,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
