//! Sentiment service binary entrypoint.
//! Boots the Axum HTTP server with analyzers loaded from the environment.

use std::net::SocketAddr;

use anyhow::Context as _;
use tracing::info;

use sentiment_ensemble::{api, debug};

const ENV_BIND_ADDR: &str = "SENTIMENT_BIND_ADDR";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8000";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; no-op when absent.
    // This enables SENTIMENT_LEXICON_PATH / ENSEMBLE_CONFIG_PATH from .env.
    let _ = dotenvy::dotenv();

    // Initialize dev tracing early (no-op in production).
    debug::init_dev_tracing();

    let state = api::AppState::from_env().context("failed to initialize analyzers")?;
    let router = api::create_router(state);

    let addr: SocketAddr = std::env::var(ENV_BIND_ADDR)
        .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
        .parse()
        .with_context(|| format!("{ENV_BIND_ADDR} is not a socket address"))?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(target: "sentiment", %addr, "listening");

    axum::serve(listener, router).await?;
    Ok(())
}
