//! Shared types for the SLIPSCAN engine.
//!
//! These types form the data model used across all modules.
//! They are designed to be stable so that pricing, parser, strategy,
//! and dashboard modules can depend on them without circular references.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Odds quote
// ---------------------------------------------------------------------------

/// A single American-odds quote with its derived representations.
///
/// Built by `pricing::converter`; never mutated after creation.
/// `american_line` is always nonzero, `implied_probability` lies in (0,1),
/// and `decimal_odds` is at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OddsQuote {
    pub american_line: i64,
    pub implied_probability: f64,
    pub decimal_odds: f64,
}

impl fmt::Display for OddsQuote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (implied {:.1}%, decimal {:.2})",
            self.signed_line(),
            self.implied_probability * 100.0,
            self.decimal_odds,
        )
    }
}

impl OddsQuote {
    /// The line with an explicit sign, as sportsbooks print it (`+145`, `-110`).
    pub fn signed_line(&self) -> String {
        if self.american_line > 0 {
            format!("+{}", self.american_line)
        } else {
            format!("{}", self.american_line)
        }
    }

    /// Net profit per unit staked (decimal odds minus the returned stake).
    pub fn net_odds(&self) -> f64 {
        self.decimal_odds - 1.0
    }
}

// ---------------------------------------------------------------------------
// Leg
// ---------------------------------------------------------------------------

/// One leg of a slip: the quote the user holds, plus the optional
/// competitor-book line used to de-vig a fair probability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Leg {
    /// Team/player label, or "Leg N" when no label was captured.
    pub label: String,
    pub quote: OddsQuote,
    /// The other book's line for the same outcome, if the user supplied one.
    pub competitor_line: Option<i64>,
    /// De-vigged fair probability (None when no valid two-way pair existed).
    pub fair_probability: Option<f64>,
    /// fair_probability - implied_probability (None when fair is None).
    pub edge: Option<f64>,
}

impl fmt::Display for Leg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.label, self.quote.signed_line())?;
        if let Some(edge) = self.edge {
            write!(f, " (edge {:+.1}%)", edge * 100.0)?;
        }
        Ok(())
    }
}

impl Leg {
    /// The probability used for parlay math: fair when available,
    /// otherwise the single-sided implied probability.
    pub fn win_probability(&self) -> f64 {
        self.fair_probability
            .unwrap_or(self.quote.implied_probability)
    }
}

// ---------------------------------------------------------------------------
// Parlay summary
// ---------------------------------------------------------------------------

/// Combined metrics for the current set of legs at a given stake.
/// Fully derived; recomputed on every change, never cached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParlaySummary {
    /// Product of per-leg win probabilities. Exactly 0 for an empty slip.
    pub combined_probability: f64,
    /// Product of per-leg decimal odds. Exactly 1 for an empty slip.
    pub combined_decimal_odds: f64,
    pub stake: f64,
    pub profit: f64,
    pub expected_value: f64,
    /// Raw Kelly fraction for the combined bet.
    pub kelly_fraction: f64,
}

impl fmt::Display for ParlaySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "p={:.1}% dec={:.2} stake=${:.2} profit=${:.2} EV=${:.2} kelly={:.1}%",
            self.combined_probability * 100.0,
            self.combined_decimal_odds,
            self.stake,
            self.profit,
            self.expected_value,
            self.kelly_fraction * 100.0,
        )
    }
}

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// League detected in slip text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum League {
    Mlb,
    Nba,
    Nfl,
    Nhl,
    Ncaab,
    Unknown,
}

impl League {
    /// All known leagues (useful for iteration).
    pub const ALL: &'static [League] = &[
        League::Mlb,
        League::Nba,
        League::Nfl,
        League::Nhl,
        League::Ncaab,
        League::Unknown,
    ];
}

impl fmt::Display for League {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            League::Mlb => write!(f, "MLB"),
            League::Nba => write!(f, "NBA"),
            League::Nfl => write!(f, "NFL"),
            League::Nhl => write!(f, "NHL"),
            League::Ncaab => write!(f, "NCAAB"),
            League::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Market type detected in slip text.
///
/// `TotalProp` is the classification when an explicit Total/Over/Under
/// keyword matched; `PropTotal` is the weaker fallback used when only a
/// numeric Over/Under prop token was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarketKind {
    Moneyline,
    Spread,
    TotalProp,
    PropTotal,
    Unknown,
}

impl fmt::Display for MarketKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarketKind::Moneyline => write!(f, "Moneyline"),
            MarketKind::Spread => write!(f, "Spread"),
            MarketKind::TotalProp => write!(f, "Total/Prop"),
            MarketKind::PropTotal => write!(f, "Prop/Total"),
            MarketKind::Unknown => write!(f, "Unknown"),
        }
    }
}

// ---------------------------------------------------------------------------
// Parsed slip
// ---------------------------------------------------------------------------

/// Result of classifying a raw text blob. Created fresh per
/// recognition/paste event; user edits afterwards live on the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedSlip {
    /// Sportsbook brand name, or "Unknown".
    pub book: String,
    pub league: League,
    pub market: MarketKind,
    /// Ordered, deduplicated team/player candidates.
    pub teams: Vec<String>,
    /// Ordered, deduplicated odds tokens ("-110", "+145").
    pub odds: Vec<String>,
}

impl ParsedSlip {
    /// An empty classification (used for blank input).
    pub fn unknown() -> Self {
        ParsedSlip {
            book: "Unknown".to_string(),
            league: League::Unknown,
            market: MarketKind::Unknown,
            teams: Vec::new(),
            odds: Vec::new(),
        }
    }
}

impl fmt::Display for ParsedSlip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} ({} team(s), {} odds)",
            self.book,
            self.league,
            self.market,
            self.teams.len(),
            self.odds.len(),
        )
    }
}

// ---------------------------------------------------------------------------
// Share payload
// ---------------------------------------------------------------------------

/// The tuple encoded into a shareable URL token.
///
/// `league` and `market` travel as display strings so that hand-edited
/// values round-trip unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SharePayload {
    pub title: String,
    pub book: String,
    pub league: String,
    pub market: String,
    pub teams: Vec<String>,
    pub odds: Vec<String>,
    pub competitor: Vec<Option<i64>>,
}

// ---------------------------------------------------------------------------
// Slip report
// ---------------------------------------------------------------------------

/// Everything the engine hands the presentation layer for one analysis pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlipReport {
    pub legs: Vec<Leg>,
    pub summary: ParlaySummary,
    /// Heuristic confidence in [0,1].
    pub confidence: f64,
    /// Bounded natural-language insight list; the final element is always
    /// the overall-EV message (or the single guidance line when degenerate).
    pub insights: Vec<String>,
    /// Advisory stake fraction (half-Kelly by default).
    pub recommended_stake_fraction: f64,
    /// True when zero usable legs survived filtering; metrics are the
    /// neutral placeholders and must be displayed as such.
    pub degenerate: bool,
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Domain-specific error taxonomy for SLIPSCAN.
///
/// Math-layer functions signal failure via `None`/sentinel returns so the
/// aggregation layer can filter permissively; these variants exist for the
/// boundaries that report errors outward (share decoding, the API layer).
#[derive(Debug, thiserror::Error)]
pub enum SlipError {
    #[error("Invalid odds token: {0:?}")]
    InvalidOdds(String),

    #[error("Degenerate two-way pair ({line_a}, {line_b})")]
    DevigFailure { line_a: i64, line_b: i64 },

    #[error("No usable legs after filtering")]
    InsufficientLegs,

    #[error("Malformed share token")]
    DecodeFailure,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
