//! Dashboard API route handlers.
//!
//! All endpoints return JSON. The shared state is the configured engine:
//! a compiled parser plus an analyzer. Handlers are thin adapters over
//! the synchronous core; no slip state lives on the server.

use axum::{extract::Path, extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::config::AppConfig;
use crate::parser::SlipTextParser;
use crate::session::SlipSession;
use crate::share;
use crate::strategy::confidence::ConfidenceScorer;
use crate::strategy::insight::InsightGenerator;
use crate::strategy::staking::StakingAdvisor;
use crate::strategy::SlipAnalyzer;
use crate::types::{ParsedSlip, SharePayload, SlipReport};

// ---------------------------------------------------------------------------
// Shared state
// ---------------------------------------------------------------------------

/// Immutable engine configuration shared by all route handlers.
pub struct EngineState {
    pub parser: SlipTextParser,
    pub analyzer: SlipAnalyzer,
}

impl EngineState {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            parser: SlipTextParser::new(config.parser.clone()),
            analyzer: SlipAnalyzer::new(
                StakingAdvisor::new(config.staking.clone()),
                ConfidenceScorer::new(config.confidence.clone()),
                InsightGenerator::new(config.insights.clone()),
            ),
        }
    }
}

pub type AppState = Arc<EngineState>;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct ParseRequest {
    pub text: String,
}

/// Analysis request. `text` (when present) is classified first; explicit
/// arrays then override whatever the parser extracted, which is how the
/// UI submits user edits.
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub odds: Option<Vec<String>>,
    #[serde(default)]
    pub teams: Option<Vec<String>>,
    #[serde(default)]
    pub competitor: Option<Vec<Option<i64>>>,
    #[serde(default)]
    pub stake: f64,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    /// Present only when `text` was supplied.
    pub parsed: Option<ParsedSlip>,
    pub report: SlipReport,
    /// RFC 3339 timestamp of this analysis pass.
    pub generated_at: String,
}

#[derive(Debug, Serialize)]
pub struct ShareTokenResponse {
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

// ---------------------------------------------------------------------------
// Route handlers
// ---------------------------------------------------------------------------

/// POST /api/parse
pub async fn parse_slip(
    State(state): State<AppState>,
    Json(req): Json<ParseRequest>,
) -> Json<ParsedSlip> {
    Json(state.parser.parse(&req.text))
}

/// POST /api/analyze
pub async fn analyze_slip(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeRequest>,
) -> Json<AnalyzeResponse> {
    let (parsed, mut session) = match req.text.as_deref().filter(|t| !t.trim().is_empty()) {
        Some(text) => {
            let parsed = state.parser.parse(text);
            let session = SlipSession::from_parsed(&parsed);
            (Some(parsed), session)
        }
        None => (None, SlipSession::new()),
    };

    if let Some(odds) = req.odds {
        session.odds = odds;
    }
    if let Some(teams) = req.teams {
        session.teams = teams;
    }
    if let Some(competitor) = req.competitor {
        session.competitor = competitor;
    }
    session.stake = req.stake;
    session.align_competitor();

    let report = state.analyzer.analyze(&session);
    Json(AnalyzeResponse {
        parsed,
        report,
        generated_at: chrono::Utc::now().to_rfc3339(),
    })
}

/// POST /api/share
pub async fn encode_share_token(Json(payload): Json<SharePayload>) -> Json<ShareTokenResponse> {
    Json(ShareTokenResponse {
        token: share::encode_share(&payload),
    })
}

/// GET /api/share/{token}
pub async fn decode_share_token(
    Path(token): Path<String>,
) -> Result<Json<SharePayload>, (StatusCode, Json<ErrorResponse>)> {
    share::decode_share(&token).map(Json).map_err(|e| {
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorResponse {
                error: format!("{e}. Check that the link was copied completely."),
            }),
        )
    })
}

/// GET /health
pub async fn health() -> StatusCode {
    StatusCode::OK
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn test_state() -> AppState {
        Arc::new(EngineState::from_config(&AppConfig::default()))
    }

    #[tokio::test]
    async fn test_parse_handler() {
        let Json(parsed) = parse_slip(
            State(test_state()),
            Json(ParseRequest {
                text: "FanDuel NHL Spread Bruins -105".to_string(),
            }),
        )
        .await;
        assert_eq!(parsed.book, "FanDuel");
        assert_eq!(parsed.odds, vec!["-105"]);
    }

    #[tokio::test]
    async fn test_analyze_handler_without_text() {
        let Json(resp) = analyze_slip(
            State(test_state()),
            Json(AnalyzeRequest {
                text: None,
                odds: Some(vec!["-110".to_string(), "+145".to_string()]),
                teams: None,
                competitor: None,
                stake: 20.0,
            }),
        )
        .await;
        assert!(resp.parsed.is_none());
        assert_eq!(resp.report.legs.len(), 2);
        assert!((resp.report.summary.stake - 20.0).abs() < 1e-10);
    }

    #[tokio::test]
    async fn test_analyze_handler_competitor_misalignment_tolerated() {
        // Shorter competitor array than odds: realigned, not an error.
        let Json(resp) = analyze_slip(
            State(test_state()),
            Json(AnalyzeRequest {
                text: None,
                odds: Some(vec!["-110".to_string(), "+145".to_string()]),
                teams: None,
                competitor: Some(vec![Some(-110)]),
                stake: 10.0,
            }),
        )
        .await;
        assert_eq!(resp.report.legs.len(), 2);
        assert!(resp.report.legs[0].fair_probability.is_some());
        assert!(resp.report.legs[1].fair_probability.is_none());
    }

    #[tokio::test]
    async fn test_decode_handler_maps_failure_to_422() {
        let result = decode_share_token(Path("garbage!!".to_string())).await;
        let err = result.err().unwrap();
        assert_eq!(err.0, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(err.1 .0.error.contains("share token"));
    }

    #[tokio::test]
    async fn test_encode_then_decode_handlers() {
        let payload = SharePayload {
            title: "t".to_string(),
            book: "Caesars".to_string(),
            league: "MLB".to_string(),
            market: "Spread".to_string(),
            teams: vec![],
            odds: vec!["-115".to_string()],
            competitor: vec![None],
        };
        let Json(resp) = encode_share_token(Json(payload.clone())).await;
        let Json(decoded) = decode_share_token(Path(resp.token)).await.unwrap();
        assert_eq!(decoded, payload);
    }
}
