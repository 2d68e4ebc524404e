//! SLIPSCAN — Sportsbook Slip Analysis Engine
//!
//! Entry point. Loads configuration, initialises structured logging,
//! then either analyzes a slip-text file once (when a path argument is
//! given) or serves the dashboard API until Ctrl-C.

use anyhow::{Context, Result};
use tracing::info;

use slipscan::config::AppConfig;
use slipscan::dashboard;
use slipscan::dashboard::routes::EngineState;
use slipscan::session::SlipSession;

const BANNER: &str = r#"
 ____  _     ___ ____  ____   ____    _    _   _
/ ___|| |   |_ _|  _ \/ ___| / ___|  / \  | \ | |
\___ \| |    | || |_) \___ \| |     / _ \ |  \| |
 ___) | |___ | ||  __/ ___) | |___ / ___ \| |\  |
|____/|_____|___|_|   |____/ \____/_/   \_\_| \_|

  Sportsbook Slip Analysis Engine
  v0.1.0
"#;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (non-fatal if missing)
    let _ = dotenv::dotenv();

    let cfg = AppConfig::load_or_default("config.toml")?;

    init_logging();

    println!("{BANNER}");

    // One-shot mode: analyze a text file and print the report as JSON.
    if let Some(path) = std::env::args().nth(1) {
        return analyze_file(&cfg, &path);
    }

    if !cfg.dashboard.enabled {
        info!("Dashboard disabled in config and no input file given; nothing to do.");
        return Ok(());
    }

    let state = dashboard::engine_state(&cfg);
    dashboard::spawn_dashboard(state, cfg.dashboard.port)?;

    info!(port = cfg.dashboard.port, "SLIPSCAN running. Press Ctrl+C to stop.");
    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for shutdown signal")?;
    info!("Shutdown signal received.");

    Ok(())
}

/// Parse and analyze a slip-text file once, printing the parsed fields
/// and the full report to stdout.
fn analyze_file(cfg: &AppConfig, path: &str) -> Result<()> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read slip text from {path}"))?;

    let engine = EngineState::from_config(cfg);
    let parsed = engine.parser.parse(&text);
    info!(%parsed, "Slip text parsed");

    let session = SlipSession::from_parsed(&parsed);
    let report = engine.analyzer.analyze(&session);

    let out = serde_json::json!({ "parsed": parsed, "report": report });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

/// Initialise the `tracing` subscriber.
fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("slipscan=info"));

    let json_logging = std::env::var("SLIPSCAN_LOG_JSON").is_ok();

    if json_logging {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .init();
    } else {
        fmt().with_env_filter(env_filter).with_target(true).init();
    }
}
