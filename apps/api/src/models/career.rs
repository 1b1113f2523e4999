use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::quiz::Axis;

/// One row of the career dataset. Thresholds and weights are sparse:
/// an axis without a threshold is not evaluated for this career.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerDatasetEntry {
    pub career_id: String,
    pub career_title: String,
    #[serde(default)]
    pub thresholds: BTreeMap<Axis, f64>,
    #[serde(default)]
    pub weights: BTreeMap<Axis, f64>,
}

/// A career scored against one profile. Derived, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub career_id: String,
    pub career_title: String,
    pub match_percentage: f64, // 0 – 100, whole numbers
}
