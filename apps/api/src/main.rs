mod catalog;
mod config;
mod engine;
mod errors;
mod llm_client;
mod models;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::catalog::load_catalog;
use crate::config::Config;
use crate::llm_client::{LlmClient, TextGenerator};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Pathway API v{}", env!("CARGO_PKG_VERSION"));

    // Load the career dataset and institutions once; never re-read per request
    let catalog = load_catalog(&config)?;
    info!(
        "Catalog ready: {} careers, {} institutions",
        catalog.dataset.len(),
        catalog.institutions.len()
    );

    // Initialize the evaluation generator (optional)
    let generator: Option<Arc<dyn TextGenerator>> = match &config.anthropic_api_key {
        Some(key) => {
            let llm = LlmClient::new(key.clone())?;
            info!("LLM client initialized (model: {})", llm_client::MODEL);
            Some(Arc::new(llm) as Arc<dyn TextGenerator>)
        }
        None => {
            warn!("ANTHROPIC_API_KEY not set; written evaluations and institution matches disabled");
            None
        }
    };

    info!(
        "Quiz mode: {:?}, top {} careers, generation timeout {}s",
        config.quiz_mode,
        config.top_career_matches,
        config.generation_timeout.as_secs()
    );

    // Build app state
    let state = AppState {
        catalog: Arc::new(catalog),
        generator,
        quiz_mode: config.quiz_mode,
        top_career_matches: config.top_career_matches,
        generation_timeout: config.generation_timeout,
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
