#![allow(dead_code)]

//! Score Aggregator — folds answered quiz options into a per-axis score profile.
//!
//! Answers that do not fit the active quiz mode are skipped and reported, never fatal.

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::engine::round_percent;
use crate::models::quiz::{AnsweredOption, Axis, PercentageProfile, QuizMode, ScoreProfile};

/// Why a single answer was left out of the profile.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationError {
    #[error("answer {question_id}: category '{category}' is not part of the {mode:?} quiz")]
    UnknownCategory {
        question_id: String,
        category: String,
        mode: QuizMode,
    },

    #[error("answer {question_id}: negative score {score}")]
    NegativeScore { question_id: String, score: i32 },
}

/// Profile plus the answers that were dropped while building it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Aggregation {
    pub profile: ScoreProfile,
    pub skipped: Vec<ValidationError>,
}

/// Checks one answer against the mode and returns the axis and score it contributes.
pub fn validate_answer(
    answer: &AnsweredOption,
    mode: QuizMode,
) -> Result<(Axis, u32), ValidationError> {
    let axis = mode
        .axis(&answer.category)
        .ok_or_else(|| ValidationError::UnknownCategory {
            question_id: answer.question_id.clone(),
            category: answer.category.clone(),
            mode,
        })?;

    let score = u32::try_from(answer.score).map_err(|_| ValidationError::NegativeScore {
        question_id: answer.question_id.clone(),
        score: answer.score,
    })?;

    Ok((axis, score))
}

/// Sums scores per axis, skipping (and logging) invalid answers.
pub fn aggregate_answers(answers: &[AnsweredOption], mode: QuizMode) -> Aggregation {
    let mut profile = ScoreProfile::new(mode);
    let mut skipped = Vec::new();

    for answer in answers {
        match validate_answer(answer, mode) {
            Ok((axis, score)) => {
                let slot = profile.scores.entry(axis).or_insert(0);
                *slot = slot.saturating_add(score);
            }
            Err(e) => {
                warn!("Skipping quiz answer: {e}");
                skipped.push(e);
            }
        }
    }

    debug!(
        "Aggregated {} answers ({} skipped) into {:?} profile",
        answers.len(),
        skipped.len(),
        mode
    );

    Aggregation { profile, skipped }
}

/// Convenience wrapper when the caller does not need the skip diagnostics.
pub fn aggregate(answers: &[AnsweredOption], mode: QuizMode) -> ScoreProfile {
    aggregate_answers(answers, mode).profile
}

/// Converts raw scores into whole-number shares of the total.
/// A profile with no points maps every axis to 0.
pub fn percentages(profile: &ScoreProfile) -> PercentageProfile {
    let total = profile.total();

    profile
        .scores
        .iter()
        .map(|(&axis, &raw)| {
            let pct = if total == 0 {
                0
            } else {
                round_percent(f64::from(raw), total as f64) as u32
            };
            (axis, pct)
        })
        .collect()
}
