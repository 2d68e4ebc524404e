//! Dashboard — Axum web server exposing the analysis engine.
//!
//! Serves a JSON API and a self-contained HTML shell.
//! CORS enabled for local development. The engine state is immutable
//! configuration (parser + analyzer); slips themselves are never stored
//! server-side.

pub mod routes;

use anyhow::Result;
use axum::{
    http::{header, HeaderValue, Method},
    response::Html,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tracing::info;
use tower_http::cors::CorsLayer;

use routes::{AppState, EngineState};

/// The embedded page shell (compiled into the binary).
const DASHBOARD_HTML: &str = include_str!("templates/index.html");

/// Start the dashboard web server.
///
/// This spawns a background task — it doesn't block.
pub fn spawn_dashboard(state: AppState, port: u16) -> Result<()> {
    let app = build_router(state);

    tokio::spawn(async move {
        let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
        info!(port, "Dashboard server starting on http://localhost:{port}");

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .expect("Failed to bind dashboard port");

        axum::serve(listener, app)
            .await
            .expect("Dashboard server error");
    });

    Ok(())
}

/// Build the Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin("*".parse::<HeaderValue>().unwrap())
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        // API routes
        .route("/api/parse", post(routes::parse_slip))
        .route("/api/analyze", post(routes::analyze_slip))
        .route("/api/share", post(routes::encode_share_token))
        .route("/api/share/:token", get(routes::decode_share_token))
        .route("/health", get(routes::health))
        // Page shell
        .route("/", get(serve_dashboard))
        .layer(cors)
        .with_state(state)
}

/// Serve the embedded HTML shell.
async fn serve_dashboard() -> Html<&'static str> {
    Html(DASHBOARD_HTML)
}

/// Build the shared engine state from configuration.
pub fn engine_state(config: &crate::config::AppConfig) -> AppState {
    Arc::new(EngineState::from_config(config))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
