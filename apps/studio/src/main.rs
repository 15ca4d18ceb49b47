mod assistant;
mod config;
mod editor;
mod errors;
mod export;
mod models;
mod persistence;
mod render;
mod routes;
mod state;
mod templates;
mod validation;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::assistant::AssistantClient;
use crate::config::Config;
use crate::editor::SessionStore;
use crate::export::{ExportOptions, PdfExporter};
use crate::persistence::HttpResumeRepository;
use crate::routes::build_router;
use crate::state::AppState;

const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume Studio v{}", env!("CARGO_PKG_VERSION"));

    let resumes = Arc::new(HttpResumeRepository::new(&config.resume_api_url));
    info!("Resume API client initialized ({})", config.resume_api_url);

    let assistant = AssistantClient::new(&config.assistant_api_url, config.assistant_timeout);
    info!(
        "Assistant client initialized (timeout: {}s)",
        assistant.timeout().as_secs()
    );

    // Font database loading is slow; do it once, off the async runtime.
    let font_dir = config.font_dir.clone();
    let options = ExportOptions::new(config.export_supersample);
    let exporter = tokio::task::spawn_blocking(move || {
        PdfExporter::with_system_fonts(font_dir.as_deref(), options)
    })
    .await?;
    info!("PDF exporter initialized (supersample: {}x)", config.export_supersample);

    let sessions = SessionStore::with_idle_ttl(config.session_idle_ttl);
    sessions.clone().start_eviction_task(SWEEP_INTERVAL);
    info!(
        "Session store initialized (idle ttl: {}s)",
        sessions.idle_ttl().as_secs()
    );

    let state = AppState {
        sessions,
        resumes,
        assistant,
        exporter,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
