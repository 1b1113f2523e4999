pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::engine::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/recommendations",
            post(handlers::handle_recommend),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::catalog::{dataset::read_dataset, institutions::read_institutions, Catalog};
    use crate::llm_client::{LlmError, TextGenerator};
    use crate::models::quiz::QuizMode;

    const DATASET_CSV: &str = "\
career_id,career_title,analytical_threshold,analytical_weight,creative_threshold,social_threshold
swe,Software Engineer,5,2,,
writer,Writer,,,5,
counsellor,School Counsellor,,,,3
";

    const INSTITUTIONS_JSON: &str = r#"[
        {"name": "A", "type": "government", "career_tags": ["Engineer"]},
        {"name": "B", "type": "government", "ranking_score": 5, "career_tags": ["Engineer"]},
        {"name": "C", "type": "private", "ranking_score": 1, "course_tags": ["Software Development"]},
        {"name": "D", "type": "international", "ranking_score": 2, "career_tags": ["Journalism"]}
    ]"#;

    struct ScriptedGenerator(&'static str);

    #[async_trait]
    impl TextGenerator for ScriptedGenerator {
        async fn generate(&self, prompt: &str, _system: &str) -> Result<Vec<u8>, LlmError> {
            assert!(prompt.contains("Software Engineer"));
            Ok(self.0.as_bytes().to_vec())
        }
    }

    fn state(generator: Option<Arc<dyn TextGenerator>>) -> AppState {
        AppState {
            catalog: Arc::new(Catalog {
                dataset: read_dataset(DATASET_CSV.as_bytes()).unwrap(),
                institutions: read_institutions(INSTITUTIONS_JSON.as_bytes()).unwrap(),
            }),
            generator,
            quiz_mode: QuizMode::Aptitude,
            top_career_matches: 2,
            generation_timeout: Duration::from_secs(5),
        }
    }

    async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn answers() -> Value {
        json!([
            {"question_id": "q1", "category": "analytical", "option_text": "I like puzzles", "score": 4},
            {"question_id": "q2", "category": "creative", "option_text": "Sometimes", "score": 1},
            {"question_id": "q3", "category": "analytical", "option_text": "Always", "score": 3}
        ])
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let response = build_router(state(None))
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_recommendation_with_generator() {
        let generator: Arc<dyn TextGenerator> = Arc::new(ScriptedGenerator(
            "<think>they like logic</think>CAREER: **Software Engineer**\nSTRENGTHS: logic, curiosity\nAREAS: \nSTEPS: build a project",
        ));
        let (status, body) = post_json(
            build_router(state(Some(generator))),
            "/api/v1/recommendations",
            json!({ "answers": answers() }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(body["recommendation_id"].is_string());
        assert_eq!(body["profile"]["scores"]["analytical"], 7);
        assert_eq!(body["percentages"]["analytical"], 88);
        assert_eq!(body["percentages"]["creative"], 12);
        assert_eq!(body["matches"].as_array().unwrap().len(), 2);
        assert_eq!(body["matches"][0]["career_id"], "swe");
        assert_eq!(body["evaluation"]["career_path"], "**Software Engineer**");
        assert_eq!(body["career_label"], "Software Engineer");
        assert_eq!(body["evaluation_degraded"], false);

        let government: Vec<&str> = body["institutions"]["government"]
            .as_array()
            .unwrap()
            .iter()
            .map(|i| i["name"].as_str().unwrap())
            .collect();
        assert_eq!(government, vec!["B", "A"]);
        assert_eq!(body["institutions"]["private"][0]["name"], "C");
        assert!(body["institutions"]["international"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_recommendation_without_generator_has_empty_bundle() {
        let (status, body) = post_json(
            build_router(state(None)),
            "/api/v1/recommendations",
            json!({ "answers": answers() }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["evaluation"]["career_path"], "");
        assert!(body["institutions"]["government"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_supplied_evaluation_text_is_used() {
        let (status, body) = post_json(
            build_router(state(None)),
            "/api/v1/recommendations",
            json!({
                "answers": answers(),
                "evaluation_text": "CAREER: Recommended Career Path: Journalism"
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["career_label"], "Journalism");
        assert_eq!(body["institutions"]["international"][0]["name"], "D");
    }

    #[tokio::test]
    async fn test_blank_evaluation_text_degrades() {
        let (status, body) = post_json(
            build_router(state(None)),
            "/api/v1/recommendations",
            json!({ "answers": answers(), "evaluation_text": "" }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["evaluation_degraded"], true);
        assert_eq!(body["evaluation"]["next_steps"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_categories_reported_not_rejected() {
        let (status, body) = post_json(
            build_router(state(None)),
            "/api/v1/recommendations",
            json!({
                "answers": [
                    {"question_id": "q1", "category": "values", "score": 3},
                    {"question_id": "q2", "category": "social", "score": 3}
                ]
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["skipped_answers"][0]["kind"], "unknown_category");
        assert_eq!(body["matches"][0]["career_id"], "counsellor");
    }

    #[tokio::test]
    async fn test_mode_override_per_request() {
        let (status, body) = post_json(
            build_router(state(None)),
            "/api/v1/recommendations",
            json!({
                "mode": "dimensions",
                "answers": [{"question_id": "q1", "category": "values", "score": 3}]
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["profile"]["mode"], "dimensions");
        assert_eq!(body["percentages"]["values"], 100);
        assert!(body["skipped_answers"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_answers_rejected() {
        let (status, body) = post_json(
            build_router(state(None)),
            "/api/v1/recommendations",
            json!({ "answers": [] }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }
}
