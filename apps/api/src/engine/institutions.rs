//! Institution Recommender — ranks institutions for a career label.
//!
//! Algorithm:
//! 1. Clean the label; an empty or fallback label short-circuits to an empty bundle
//! 2. Tokenize on whitespace / commas / ampersands, dropping tokens of ≤ 2 chars
//! 3. Keep active institutions whose career or course tags contain any token (case-insensitive)
//! 4. Group by class, sort ascending by ranking score (unranked last), keep the top 3

use std::cmp::Ordering;
use std::collections::HashSet;

use tracing::debug;

use crate::engine::normalizer::clean_career_label;
use crate::models::evaluation::FALLBACK_CAREER_PATH;
use crate::models::institution::{InstitutionRecord, RecommendationBundle, INSTITUTION_TYPES};

/// Institutions kept per class.
pub const MAX_PER_GROUP: usize = 3;
const MIN_TOKEN_CHARS: usize = 3;
/// Rank used for institutions without a ranking score.
const UNRANKED: f64 = f64::MAX;

/// Splits a cleaned label into lowercase search tokens, first occurrence order.
pub fn tokenize_label(label: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    label
        .split(|c: char| c.is_whitespace() || c == ',' || c == '&')
        .filter(|token| token.chars().count() >= MIN_TOKEN_CHARS)
        .map(str::to_lowercase)
        .filter(|token| seen.insert(token.clone()))
        .collect()
}

fn matches_any_token(institution: &InstitutionRecord, tokens: &[String]) -> bool {
    institution
        .career_tags
        .iter()
        .chain(institution.course_tags.iter())
        .map(|tag| tag.to_lowercase())
        .any(|tag| tokens.iter().any(|token| tag.contains(token.as_str())))
}

fn rank_of(institution: &InstitutionRecord) -> f64 {
    match institution.ranking_score {
        Some(score) if !score.is_nan() => score,
        _ => UNRANKED,
    }
}

/// Builds the per-class recommendation bundle for a (possibly uncleaned) career label.
pub fn recommend_institutions(
    career_label: &str,
    institutions: &[InstitutionRecord],
) -> RecommendationBundle {
    let label = clean_career_label(career_label);
    if label.is_empty() || label == FALLBACK_CAREER_PATH {
        debug!("No usable career label, skipping institution search");
        return RecommendationBundle::default();
    }

    let tokens = tokenize_label(&label);
    if tokens.is_empty() {
        debug!("Career label '{label}' has no searchable tokens");
        return RecommendationBundle::default();
    }

    let mut bundle = RecommendationBundle::default();
    for institution in institutions
        .iter()
        .filter(|i| i.is_active && matches_any_token(i, &tokens))
    {
        bundle.group_mut(institution.kind).push(institution.clone());
    }

    for kind in INSTITUTION_TYPES {
        let group = bundle.group_mut(kind);
        // stable: equal ranks keep input order
        group.sort_by(|a, b| rank_of(a).partial_cmp(&rank_of(b)).unwrap_or(Ordering::Equal));
        group.truncate(MAX_PER_GROUP);
    }

    debug!(
        "Institution search for '{label}' ({} tokens) → {} recommendations",
        tokens.len(),
        bundle.len()
    );

    bundle
}
