//! Repurpose API server
//!
//! Run with: cargo run -p repurpose-web

use tracing::info;
use tracing_subscriber::EnvFilter;

use repurpose_common::config::EngineConfig;
use repurpose_web::{router::build_router, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialise structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("repurpose=debug,info")),
        )
        .init();

    info!("Repurpose starting up...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let config = EngineConfig::load()?;
    info!(
        api_url = %config.clinical.api_url,
        timeout_secs = config.clinical.timeout_secs,
        "Configuration loaded"
    );

    let state = AppState::from_config(&config)?;
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&config.server.bind).await?;
    info!("API listening on http://{}", config.server.bind);
    info!("   Health:       GET  /");
    info!("   JSON report:  POST /analyze-drug?drug_name=<name>");
    info!("   PDF report:   POST /generate-pdf");

    axum::serve(listener, app).await?;

    Ok(())
}
