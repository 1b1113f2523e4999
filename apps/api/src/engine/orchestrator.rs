//! Recommendation Orchestrator — aggregate → match → normalize → recommend institutions.
//!
//! Purely sequencing: every stage is a synchronous function over borrowed inputs.
//! The text-generation outcome arrives as a `ModelText` so a failed or timed-out
//! generation degrades to the normalizer fallback instead of failing the request.

use serde::Serialize;
use tracing::{info, warn};

use crate::engine::aggregator::{aggregate_answers, percentages, ValidationError};
use crate::engine::institutions::recommend_institutions;
use crate::engine::matcher::match_careers;
use crate::engine::normalizer::{clean_career_label, normalize, normalize_bytes};
use crate::models::career::{CareerDatasetEntry, MatchResult};
use crate::models::evaluation::ParsedEvaluation;
use crate::models::institution::{InstitutionRecord, RecommendationBundle};
use crate::models::quiz::{AnsweredOption, PercentageProfile, QuizMode, ScoreProfile};

/// What the text-generation collaborator produced for this request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelText {
    /// No generation was requested or configured.
    Absent,
    /// Text supplied by the caller.
    Text(String),
    /// Undecoded reply from the generator.
    Raw(Vec<u8>),
    /// Generation errored or timed out.
    Failed(String),
}

/// Everything one pipeline run produces.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationOutcome {
    pub profile: ScoreProfile,
    pub percentages: PercentageProfile,
    /// Full ranking; `matches` is the top-N slice of it.
    #[serde(skip)]
    pub ranked: Vec<MatchResult>,
    pub matches: Vec<MatchResult>,
    pub evaluation: ParsedEvaluation,
    /// `evaluation.career_path` cleaned for display; also the institution search key.
    pub career_label: String,
    pub evaluation_degraded: bool,
    pub institutions: RecommendationBundle,
    pub skipped_answers: Vec<ValidationError>,
}

/// Inputs of one pipeline run. Borrowed; nothing is retained after `orchestrate` returns.
pub struct PipelineInput<'a> {
    pub answers: &'a [AnsweredOption],
    pub mode: QuizMode,
    pub dataset: &'a [CareerDatasetEntry],
    pub institutions: Option<&'a [InstitutionRecord]>,
    pub top_n: usize,
}

/// Stage 1+2 only: profile and ranking. Used to build the generation prompt
/// before the model text exists.
pub fn profile_and_rank(
    answers: &[AnsweredOption],
    mode: QuizMode,
    dataset: &[CareerDatasetEntry],
) -> (ScoreProfile, Vec<ValidationError>, Vec<MatchResult>) {
    let aggregation = aggregate_answers(answers, mode);
    let ranked = match_careers(&aggregation.profile, dataset);
    (aggregation.profile, aggregation.skipped, ranked)
}

/// Runs the full pipeline for one submission.
pub fn orchestrate(input: PipelineInput<'_>, model_text: ModelText) -> RecommendationOutcome {
    let (profile, skipped_answers, ranked) =
        profile_and_rank(input.answers, input.mode, input.dataset);
    let percentages = percentages(&profile);
    let matches: Vec<MatchResult> = ranked.iter().take(input.top_n).cloned().collect();

    let evaluation = match model_text {
        ModelText::Absent => ParsedEvaluation::default(),
        ModelText::Text(raw) => normalize(&raw),
        ModelText::Raw(bytes) => normalize_bytes(&bytes),
        ModelText::Failed(reason) => {
            warn!("Career evaluation unavailable: {reason}");
            ParsedEvaluation::fallback()
        }
    };
    let evaluation_degraded = evaluation.is_fallback();
    let career_label = clean_career_label(&evaluation.career_path);

    let institutions = match input.institutions {
        Some(records) => recommend_institutions(&career_label, records),
        None => RecommendationBundle::default(),
    };

    info!(
        "Recommendation ready: {} matches, career '{}', {} institutions, {} skipped answers",
        matches.len(),
        career_label,
        institutions.len(),
        skipped_answers.len()
    );

    RecommendationOutcome {
        profile,
        percentages,
        ranked,
        matches,
        evaluation,
        career_label,
        evaluation_degraded,
        institutions,
        skipped_answers,
    }
}
