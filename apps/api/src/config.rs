use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};

use crate::models::quiz::QuizMode;

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub career_dataset_path: PathBuf,
    pub institutions_path: PathBuf,
    /// Without a key the service still ranks careers but skips the written evaluation.
    pub anthropic_api_key: Option<String>,
    pub quiz_mode: QuizMode,
    pub top_career_matches: usize,
    pub generation_timeout: Duration,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            career_dataset_path: require_env("CAREER_DATASET_PATH")?.into(),
            institutions_path: require_env("INSTITUTIONS_PATH")?.into(),
            anthropic_api_key: std::env::var("ANTHROPIC_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty()),
            quiz_mode: std::env::var("QUIZ_MODE")
                .unwrap_or_else(|_| "aptitude".to_string())
                .parse::<QuizMode>()
                .map_err(|e| anyhow!(e))
                .context("QUIZ_MODE must be 'aptitude' or 'dimensions'")?,
            top_career_matches: std::env::var("TOP_CAREER_MATCHES")
                .unwrap_or_else(|_| "5".to_string())
                .parse::<usize>()
                .context("TOP_CAREER_MATCHES must be a positive integer")?,
            generation_timeout: Duration::from_secs(
                std::env::var("GENERATION_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "60".to_string())
                    .parse::<u64>()
                    .context("GENERATION_TIMEOUT_SECS must be a number of seconds")?,
            ),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
