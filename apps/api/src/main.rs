mod chat;
mod companies;
mod config;
mod errors;
mod insights;
mod llm_client;
mod models;
mod navigation;
mod routes;
mod sessions;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::companies::JsonCompanyProvider;
use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CorpIntel API v{}", env!("CARGO_PKG_VERSION"));

    // Company records are read once at startup
    let companies = JsonCompanyProvider::from_path(&config.company_data_path)?;

    // Initialize LLM client
    let llm = LlmClient::new(
        config.anthropic_api_key.clone(),
        config.llm_timeout,
        config.llm_max_attempts,
    )?;
    info!(
        "LLM client initialized (model: {}, timeout: {:?}, attempts: {})",
        llm_client::MODEL,
        config.llm_timeout,
        config.llm_max_attempts
    );

    let state = AppState::new(Arc::new(companies), Arc::new(llm));
    state.sessions.spawn_sweeper(config.session_ttl);
    info!("Idle dashboard sessions expire after {:?}", config.session_ttl);

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the dashboard host is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
