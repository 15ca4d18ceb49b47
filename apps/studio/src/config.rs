use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::assistant::DEFAULT_TIMEOUT;
use crate::editor::store::DEFAULT_IDLE_TTL;
use crate::export::MIN_SUPERSAMPLE;

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub resume_api_url: String,
    pub assistant_api_url: String,
    pub port: u16,
    pub rust_log: String,
    pub assistant_timeout: Duration,
    /// Editor sessions untouched for this long are dropped.
    pub session_idle_ttl: Duration,
    pub export_supersample: f32,
    /// Extra fonts for rasterization, on top of the system fonts.
    pub font_dir: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            resume_api_url: require_env("RESUME_API_URL")?,
            assistant_api_url: require_env("ASSISTANT_API_URL")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            assistant_timeout: match std::env::var("ASSISTANT_TIMEOUT_SECS") {
                Ok(secs) => Duration::from_secs(
                    secs.parse::<u64>()
                        .context("ASSISTANT_TIMEOUT_SECS must be a whole number of seconds")?,
                ),
                Err(_) => DEFAULT_TIMEOUT,
            },
            session_idle_ttl: match std::env::var("SESSION_IDLE_SECS") {
                Ok(secs) => Duration::from_secs(
                    secs.parse::<u64>()
                        .context("SESSION_IDLE_SECS must be a whole number of seconds")?
                        .max(1),
                ),
                Err(_) => DEFAULT_IDLE_TTL,
            },
            export_supersample: match std::env::var("EXPORT_SUPERSAMPLE") {
                Ok(scale) => scale
                    .parse::<f32>()
                    .context("EXPORT_SUPERSAMPLE must be a number")?
                    .max(MIN_SUPERSAMPLE),
                Err(_) => MIN_SUPERSAMPLE,
            },
            font_dir: std::env::var("FONT_DIR").ok().filter(|d| !d.is_empty()).map(PathBuf::from),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
