//! Threshold-Weighted Matcher — scores a profile against every career in the dataset.
//!
//! Algorithm, per entry:
//! 1. For each axis in the profile that the entry has a threshold for,
//!    add the axis weight (default 1.0) to `total_possible`.
//! 2. If the profile meets the threshold, add the same weight to `total_achieved`.
//! 3. match_percentage = round(total_achieved / total_possible × 100), or 0 when nothing was evaluated.
//!
//! The full ranking is returned; callers slice with `top_matches`.

use std::cmp::Ordering;

use tracing::debug;

use crate::engine::round_percent;
use crate::models::career::{CareerDatasetEntry, MatchResult};
use crate::models::quiz::ScoreProfile;

const DEFAULT_WEIGHT: f64 = 1.0;

/// Scores a single dataset entry against the profile.
pub fn score_entry(profile: &ScoreProfile, entry: &CareerDatasetEntry) -> f64 {
    let evaluated: Vec<(f64, bool)> = profile
        .scores
        .iter()
        .filter_map(|(axis, &value)| {
            let threshold = *entry.thresholds.get(axis)?;
            let weight = entry.weights.get(axis).copied().unwrap_or(DEFAULT_WEIGHT);
            Some((weight, f64::from(value) >= threshold))
        })
        .collect();

    // Weights are rescaled by a power of two (exact) so sums of huge finite
    // weights cannot overflow to infinity.
    let largest = evaluated
        .iter()
        .map(|(weight, _)| weight.abs())
        .fold(0.0_f64, f64::max);
    if largest == 0.0 || !largest.is_finite() {
        return 0.0;
    }
    let scale = 2.0_f64.powi(largest.log2().floor() as i32);

    let mut total_possible = 0.0_f64;
    let mut total_achieved = 0.0_f64;
    for &(weight, achieved) in &evaluated {
        let weight = weight / scale;
        total_possible += weight;
        if achieved {
            total_achieved += weight;
        }
    }

    if total_possible <= 0.0 {
        return 0.0;
    }
    let percentage = round_percent(total_achieved, total_possible);
    if percentage.is_finite() {
        percentage.clamp(0.0, 100.0)
    } else {
        0.0
    }
}

/// Ranks every entry, highest match first. Equal scores keep dataset order.
pub fn match_careers(profile: &ScoreProfile, dataset: &[CareerDatasetEntry]) -> Vec<MatchResult> {
    if dataset.is_empty() {
        debug!("Career dataset is empty, nothing to match");
        return Vec::new();
    }

    let mut results: Vec<MatchResult> = dataset
        .iter()
        .map(|entry| MatchResult {
            career_id: entry.career_id.clone(),
            career_title: entry.career_title.clone(),
            match_percentage: score_entry(profile, entry),
        })
        .collect();

    // sort_by is stable, so ties stay in curation order
    results.sort_by(|a, b| {
        b.match_percentage
            .partial_cmp(&a.match_percentage)
            .unwrap_or(Ordering::Equal)
    });

    debug!(
        "Matched profile against {} careers (best: {:.0}%)",
        results.len(),
        results[0].match_percentage
    );

    results
}

/// First `n` results of a ranking.
pub fn top_matches(results: &[MatchResult], n: usize) -> Vec<MatchResult> {
    results.iter().take(n).cloned().collect()
}
