use std::sync::Arc;
use std::time::Duration;

use crate::catalog::Catalog;
use crate::llm_client::TextGenerator;
use crate::models::quiz::QuizMode;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Career dataset and institutions, loaded once at startup. Read-only.
    pub catalog: Arc<Catalog>,
    /// Source of the written evaluation. `None` when no API key is configured.
    pub generator: Option<Arc<dyn TextGenerator>>,
    pub quiz_mode: QuizMode,
    pub top_career_matches: usize,
    pub generation_timeout: Duration,
}
