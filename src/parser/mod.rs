//! Slip text classification.
//!
//! Turns a raw recognized/pasted text blob into a `ParsedSlip` using
//! ordered heuristic rules. Each classification is an explicit list of
//! (label, pattern) rules evaluated first-match-wins. The order is the
//! tie-break contract, since noisy slip text routinely mentions several
//! brands, leagues, and market keywords at once.
//!
//! Parsing is a pure function of the text: no external state, no I/O.

use regex::Regex;
use serde::Deserialize;
use tracing::debug;

use crate::types::{League, MarketKind, ParsedSlip};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Extraction limits. Observed app variants disagreed on the caps, so they
/// are configuration rather than constants.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Maximum distinct odds tokens kept per slip.
    pub max_odds_tokens: usize,
    /// Maximum distinct team/player candidates kept per slip.
    pub max_team_candidates: usize,
    /// Stricter variant: cap team candidates at the odds-token count
    /// instead of `max_team_candidates`.
    pub cap_teams_to_odds: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_odds_tokens: 20,
            max_team_candidates: 12,
            cap_teams_to_odds: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Parser
// ---------------------------------------------------------------------------

/// Heuristic slip-text classifier. Compile once, reuse per parse.
pub struct SlipTextParser {
    config: ParserConfig,
    book_rules: Vec<(&'static str, Regex)>,
    league_rules: Vec<(League, Regex)>,
    moneyline_re: Regex,
    spread_re: Regex,
    total_re: Regex,
    prop_re: Regex,
    odds_re: Regex,
    team_re: Regex,
}

impl SlipTextParser {
    pub fn new(config: ParserConfig) -> Self {
        // Book priority order is fixed: first match wins.
        let book_rules = vec![
            ("FanDuel", Regex::new(r"(?i)fanduel").unwrap()),
            ("DraftKings", Regex::new(r"(?i)draft\s?kings").unwrap()),
            ("BetMGM", Regex::new(r"(?i)bet\s?mgm").unwrap()),
            ("Caesars", Regex::new(r"(?i)caesars").unwrap()),
            ("Hard Rock", Regex::new(r"(?i)hard\s?rock").unwrap()),
            ("BetRivers", Regex::new(r"(?i)betrivers").unwrap()),
            ("PointsBet", Regex::new(r"(?i)pointsbet").unwrap()),
        ];

        // League priority: MLB > NBA > NFL (college football folds into
        // NFL handling) > NHL > NCAAB.
        let league_rules = vec![
            (League::Mlb, Regex::new(r"(?i)MLB").unwrap()),
            (League::Nba, Regex::new(r"(?i)NBA").unwrap()),
            (League::Nfl, Regex::new(r"(?i)NFL|NCAAF").unwrap()),
            (League::Nhl, Regex::new(r"(?i)NHL").unwrap()),
            (League::Ncaab, Regex::new(r"(?i)NCAAB").unwrap()),
        ];

        Self {
            config,
            book_rules,
            league_rules,
            moneyline_re: Regex::new(r"(?i)\bMoneyline\b|ML\b").unwrap(),
            spread_re: Regex::new(r"(?i)\bSpread\b|pts|point|handicap").unwrap(),
            total_re: Regex::new(r"(?i)\bTotal\b|Over|Under").unwrap(),
            prop_re: Regex::new(r"(?i)\b(Over|Under)\s?\d+(\.\d+)?").unwrap(),
            // Sign-prefixed 2-4 digit lines; recognized text may split the
            // sign from the digits with a space.
            odds_re: Regex::new(r"[+\-]\s?\d{2,4}").unwrap(),
            // One or two consecutive capitalized words.
            team_re: Regex::new(r"\b[A-Z][a-z]+(?:\s[A-Z][a-z]+)?\b").unwrap(),
        }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Classify a raw text blob into book, league, market, team candidates
    /// and odds tokens.
    pub fn parse(&self, raw_text: &str) -> ParsedSlip {
        if raw_text.trim().is_empty() {
            return ParsedSlip::unknown();
        }

        let book = self.detect_book(raw_text);
        let league = self.detect_league(raw_text);
        let odds = self.extract_odds(raw_text);
        let market = self.detect_market(raw_text);
        let teams = self.extract_teams(raw_text, odds.len());

        let parsed = ParsedSlip {
            book: book.to_string(),
            league,
            market,
            teams,
            odds,
        };
        debug!(
            book = %parsed.book,
            league = %parsed.league,
            market = %parsed.market,
            teams = parsed.teams.len(),
            odds = parsed.odds.len(),
            "Slip text classified"
        );
        parsed
    }

    fn detect_book(&self, text: &str) -> &'static str {
        for (name, re) in &self.book_rules {
            if re.is_match(text) {
                return name;
            }
        }
        "Unknown"
    }

    fn detect_league(&self, text: &str) -> League {
        for (league, re) in &self.league_rules {
            if re.is_match(text) {
                return *league;
            }
        }
        League::Unknown
    }

    fn detect_market(&self, text: &str) -> MarketKind {
        if self.moneyline_re.is_match(text) {
            MarketKind::Moneyline
        } else if self.spread_re.is_match(text) {
            MarketKind::Spread
        } else if self.total_re.is_match(text) {
            MarketKind::TotalProp
        } else if self.prop_re.is_match(text) {
            MarketKind::PropTotal
        } else {
            MarketKind::Unknown
        }
    }

    /// Extract sign-prefixed odds tokens, whitespace-normalised, deduped
    /// preserving first-seen order, capped at `max_odds_tokens`.
    fn extract_odds(&self, text: &str) -> Vec<String> {
        let mut seen = Vec::new();
        for m in self.odds_re.find_iter(text) {
            let token: String = m.as_str().chars().filter(|c| !c.is_whitespace()).collect();
            if !seen.contains(&token) {
                seen.push(token);
            }
            if seen.len() == self.config.max_odds_tokens {
                break;
            }
        }
        seen
    }

    /// Extract capitalized-word team/player candidates, deduped preserving
    /// order. The cap is either the configured maximum or (in the strict
    /// variant) the odds-token count.
    fn extract_teams(&self, text: &str, odds_count: usize) -> Vec<String> {
        let cap = if self.config.cap_teams_to_odds {
            odds_count
        } else {
            self.config.max_team_candidates
        };

        let mut seen = Vec::new();
        for m in self.team_re.find_iter(text) {
            if seen.len() == cap {
                break;
            }
            let candidate = m.as_str().to_string();
            if !seen.contains(&candidate) {
                seen.push(candidate);
            }
        }
        seen
    }
}

impl Default for SlipTextParser {
    fn default() -> Self {
        Self::new(ParserConfig::default())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
