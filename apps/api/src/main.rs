mod analysis;
mod chat;
mod config;
mod errors;
mod llm_client;
mod patterns;
mod routes;
mod state;
mod text;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::classifier::Classifier;
use crate::config::Config;
use crate::llm_client::{ChatModel, LlmClient};
use crate::patterns::PatternStore;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on unparseable env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Arc Athena copilot v{}", env!("CARGO_PKG_VERSION"));

    // Pattern store must load cleanly before we serve anything
    let patterns = PatternStore::load(&config.patterns_path).with_context(|| {
        format!(
            "Failed to load pattern store from {}",
            config.patterns_path.display()
        )
    })?;
    info!(
        "Pattern store loaded: {} sectors, {} fragments",
        patterns.entries().len(),
        patterns.fragments().count()
    );

    let classifier = Classifier::new().context("Failed to compile JD classifier rules")?;

    // Initialize LLM client (optional)
    let llm: Option<Arc<dyn ChatModel>> = match &config.openai_api_key {
        Some(api_key) => {
            let client = LlmClient::new(api_key.clone(), config.llm_timeout)?;
            info!("LLM client initialized (model: {})", llm_client::MODEL);
            Some(Arc::new(client))
        }
        None => {
            warn!("OPENAI_API_KEY not set: JD analysis runs fallback-only, chat is disabled");
            None
        }
    };

    // Build app state
    let state = AppState {
        config: config.clone(),
        patterns: Arc::new(patterns),
        classifier: Arc::new(classifier),
        llm,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
