//! Axum route handlers for the Recommendation API.

use std::time::Duration;

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::engine::aggregator::percentages;
use crate::engine::matcher::top_matches;
use crate::engine::orchestrator::{
    orchestrate, profile_and_rank, ModelText, PipelineInput, RecommendationOutcome,
};
use crate::engine::prompts::{build_evaluation_prompt, EVALUATION_SYSTEM};
use crate::errors::AppError;
use crate::llm_client::prompts::with_output_rules;
use crate::llm_client::TextGenerator;
use crate::models::quiz::{AnsweredOption, QuizMode};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RecommendationRequest {
    pub answers: Vec<AnsweredOption>,
    /// Overrides the deployment's quiz mode for this submission.
    #[serde(default)]
    pub mode: Option<QuizMode>,
    /// Pre-generated model text; when present the generator is not called.
    #[serde(default)]
    pub evaluation_text: Option<String>,
    #[serde(default = "default_generate")]
    pub generate_evaluation: bool,
}

fn default_generate() -> bool {
    true
}

#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub recommendation_id: Uuid,
    pub generated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub outcome: RecommendationOutcome,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/recommendations
///
/// Scores the submitted answers, ranks careers, and (when a generator is configured)
/// asks for a written evaluation used to pick institutions.
pub async fn handle_recommend(
    State(state): State<AppState>,
    Json(request): Json<RecommendationRequest>,
) -> Result<Json<RecommendationResponse>, AppError> {
    if request.answers.is_empty() {
        return Err(AppError::Validation("answers cannot be empty".to_string()));
    }

    let mode = request.mode.unwrap_or(state.quiz_mode);
    let catalog = &state.catalog;
    let recommendation_id = Uuid::new_v4();
    info!(
        "Recommendation {recommendation_id}: {} answers, {:?} quiz",
        request.answers.len(),
        mode
    );

    let model_text = match (request.evaluation_text, state.generator.as_deref()) {
        (Some(text), _) => ModelText::Text(text),
        (None, Some(generator)) if request.generate_evaluation => {
            let (profile, _, ranked) = profile_and_rank(&request.answers, mode, &catalog.dataset);
            let prompt = build_evaluation_prompt(
                &profile,
                &percentages(&profile),
                &top_matches(&ranked, state.top_career_matches),
            );
            request_evaluation(generator, &prompt, state.generation_timeout).await
        }
        _ => ModelText::Absent,
    };

    let outcome = orchestrate(
        PipelineInput {
            answers: &request.answers,
            mode,
            dataset: &catalog.dataset,
            institutions: Some(&catalog.institutions),
            top_n: state.top_career_matches,
        },
        model_text,
    );

    Ok(Json(RecommendationResponse {
        recommendation_id,
        generated_at: Utc::now(),
        outcome,
    }))
}

/// Calls the generator under a deadline. The reply stays undecoded until the
/// normalizer sees it; errors and timeouts become `ModelText::Failed`.
pub async fn request_evaluation(
    generator: &dyn TextGenerator,
    prompt: &str,
    timeout: Duration,
) -> ModelText {
    let system = with_output_rules(EVALUATION_SYSTEM);

    match tokio::time::timeout(timeout, generator.generate(prompt, &system)).await {
        Ok(Ok(bytes)) => ModelText::Raw(bytes),
        Ok(Err(e)) => ModelText::Failed(e.to_string()),
        Err(_) => ModelText::Failed(format!(
            "generation timed out after {}s",
            timeout.as_secs()
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::LlmError;
    use async_trait::async_trait;

    struct FixedGenerator(&'static str);

    #[async_trait]
    impl TextGenerator for FixedGenerator {
        async fn generate(&self, _prompt: &str, _system: &str) -> Result<Vec<u8>, LlmError> {
            Ok(self.0.as_bytes().to_vec())
        }
    }

    struct FailingGenerator;

    #[async_trait]
    impl TextGenerator for FailingGenerator {
        async fn generate(&self, _prompt: &str, _system: &str) -> Result<Vec<u8>, LlmError> {
            Err(LlmError::EmptyContent)
        }
    }

    struct StalledGenerator;

    #[async_trait]
    impl TextGenerator for StalledGenerator {
        async fn generate(&self, _prompt: &str, _system: &str) -> Result<Vec<u8>, LlmError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(b"CAREER: too late".to_vec())
        }
    }

    #[tokio::test]
    async fn test_request_evaluation_returns_text() {
        let text = request_evaluation(
            &FixedGenerator("CAREER: Nurse"),
            "prompt",
            Duration::from_secs(5),
        )
        .await;
        assert_eq!(text, ModelText::Raw(b"CAREER: Nurse".to_vec()));
    }

    #[tokio::test]
    async fn test_request_evaluation_maps_errors_to_failed() {
        let text = request_evaluation(&FailingGenerator, "prompt", Duration::from_secs(5)).await;
        assert!(matches!(text, ModelText::Failed(reason) if reason.contains("empty content")));
    }

    #[tokio::test(start_paused = true)]
    async fn test_request_evaluation_times_out() {
        let text = request_evaluation(&StalledGenerator, "prompt", Duration::from_secs(30)).await;
        assert!(matches!(text, ModelText::Failed(reason) if reason.contains("timed out after 30s")));
    }

    #[test]
    fn test_request_defaults() {
        let request: RecommendationRequest = serde_json::from_str(
            r#"{"answers": [{"question_id": "q1", "category": "social", "score": 2}]}"#,
        )
        .unwrap();
        assert!(request.generate_evaluation);
        assert!(request.mode.is_none());
        assert!(request.evaluation_text.is_none());
        assert!(request.answers[0].option_text.is_empty());
    }
}
