use anyhow::Result;
use clap::Parser;
use std::net::SocketAddr;
use std::time::Duration;
use tracing::{info, warn};

mod analytics;
mod config;
mod dashboard;
mod prediction;
mod roster;

use config::{Command, Config, ServeConfig};
use dashboard::AppState;
use prediction::PredictionClient;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing / logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    match Config::parse().command {
        Command::Serve(cfg) => {
            cfg.validate()?;
            serve(cfg).await
        }
        Command::Analyze(cfg) => {
            cfg.validate()?;
            analytics::run(&cfg).await
        }
    }
}

async fn serve(config: ServeConfig) -> Result<()> {
    let predictor = PredictionClient::new(
        &config.api_url,
        Duration::from_secs(config.predict_timeout_secs),
        Duration::from_secs(config.probe_timeout_secs),
    )?;

    if predictor.check_connection().await {
        info!("🟢 Prediction API reachable at {}", config.api_url);
    } else {
        warn!(
            "🔴 Prediction API unreachable at {} – fallback model will answer",
            config.api_url
        );
    }

    let app = dashboard::router(AppState { predictor });
    let addr: SocketAddr = config.listen_addr.parse()?;
    info!("Web UI listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Blocks until shutdown
    axum::serve(listener, app).await?;

    Ok(())
}
