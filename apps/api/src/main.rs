mod auth;
mod config;
mod errors;
mod github;
mod interpret;
mod llm_client;
mod models;
mod portfolio;
mod routes;
mod state;
mod store;
#[cfg(test)]
mod testing;

use anyhow::{Context, Result};
use axum::http::{header, HeaderValue, Method};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::github::GitHubClient;
use crate::llm_client::GroqClient;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::PgPortfolioStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("portfolio_api={}", &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Portfolio API v{}", env!("CARGO_PKG_VERSION"));

    let store = PgPortfolioStore::connect(&config.database_url).await?;

    let llm = GroqClient::new(
        config.groq_api_url.clone(),
        config.groq_api_key.clone(),
        config.llm_timeout,
    );
    info!(
        "LLM client initialized (model: {}, timeout: {}s)",
        config.llm_model,
        config.llm_timeout.as_secs()
    );

    let github = GitHubClient::new(config.github_api_url.clone());

    let cors = build_cors(&config.cors_origin)?;

    let state = AppState {
        llm: Arc::new(llm),
        github: Arc::new(github),
        store: Arc::new(store),
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Allows the single configured frontend origin, with credentials.
fn build_cors(origin: &str) -> Result<CorsLayer> {
    let origin: HeaderValue = origin
        .parse()
        .with_context(|| format!("CORS_ORIGIN is not a valid header value: {origin}"))?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT]))
}
