//! Session-scoped slip state.
//!
//! One `SlipSession` per recognition/paste event: the parser fills it,
//! the user edits the odds/teams/competitor arrays and stake through the
//! UI, and every recompute passes it by reference into the pure analysis
//! functions. There is no process-wide slip state anywhere in the crate.

use serde::{Deserialize, Serialize};

use crate::types::{ParsedSlip, SharePayload};

/// Editable per-slip state. Single-writer (the UI), re-read synchronously
/// on each recomputation trigger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlipSession {
    pub title: String,
    pub book: String,
    pub league: String,
    pub market: String,
    pub teams: Vec<String>,
    /// Raw odds tokens as entered/recognized ("-110", "+145").
    pub odds: Vec<String>,
    /// Competitor-book lines, index-aligned with `odds`.
    pub competitor: Vec<Option<i64>>,
    pub stake: f64,
}

impl SlipSession {
    pub fn new() -> Self {
        Self {
            title: String::new(),
            book: "Unknown".to_string(),
            league: "Unknown".to_string(),
            market: "Unknown".to_string(),
            teams: Vec::new(),
            odds: Vec::new(),
            competitor: Vec::new(),
            stake: 0.0,
        }
    }

    /// Load a fresh classification, replacing all editable fields and
    /// deriving the default "<league> <market>" title.
    pub fn apply_parsed(&mut self, parsed: &ParsedSlip) {
        self.book = parsed.book.clone();
        self.league = parsed.league.to_string();
        self.market = parsed.market.to_string();
        self.teams = parsed.teams.clone();
        self.odds = parsed.odds.clone();
        self.competitor = vec![None; parsed.odds.len()];
        self.title = format!("{} {}", self.league, self.market).trim().to_string();
    }

    pub fn from_parsed(parsed: &ParsedSlip) -> Self {
        let mut session = Self::new();
        session.apply_parsed(parsed);
        session
    }

    /// Keep `competitor` index-aligned with `odds` after edits.
    pub fn align_competitor(&mut self) {
        self.competitor.resize(self.odds.len(), None);
    }

    /// The shareable tuple for this session.
    pub fn to_share_payload(&self) -> SharePayload {
        SharePayload {
            title: self.title.trim().to_string(),
            book: self.book.trim().to_string(),
            league: self.league.trim().to_string(),
            market: self.market.trim().to_string(),
            teams: self.teams.clone(),
            odds: self.odds.clone(),
            competitor: self.competitor.clone(),
        }
    }

    /// Restore a session from a decoded share payload. Blank fields fall
    /// back to "Unknown" the way a fresh parse would.
    pub fn from_share_payload(payload: &SharePayload) -> Self {
        let or_unknown = |s: &str| {
            if s.trim().is_empty() {
                "Unknown".to_string()
            } else {
                s.to_string()
            }
        };
        let mut session = Self {
            title: payload.title.clone(),
            book: or_unknown(&payload.book),
            league: or_unknown(&payload.league),
            market: or_unknown(&payload.market),
            teams: payload.teams.clone(),
            odds: payload.odds.clone(),
            competitor: payload.competitor.clone(),
            stake: 0.0,
        };
        session.align_competitor();
        session
    }
}

impl Default for SlipSession {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
