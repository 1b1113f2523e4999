use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstitutionType {
    Government,
    Private,
    International,
}

/// Group order in a `RecommendationBundle`.
pub const INSTITUTION_TYPES: [InstitutionType; 3] = [
    InstitutionType::Government,
    InstitutionType::Private,
    InstitutionType::International,
];

/// An institution as supplied by the institution source. Read-only to the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstitutionRecord {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: InstitutionType,
    #[serde(default)]
    pub ranking_score: Option<f64>,
    #[serde(default)]
    pub career_tags: Vec<String>,
    #[serde(default)]
    pub course_tags: Vec<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

/// Top institutions per class, at most three each.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecommendationBundle {
    pub government: Vec<InstitutionRecord>,
    pub private: Vec<InstitutionRecord>,
    pub international: Vec<InstitutionRecord>,
}

impl RecommendationBundle {
    pub fn group(&self, kind: InstitutionType) -> &[InstitutionRecord] {
        match kind {
            InstitutionType::Government => &self.government,
            InstitutionType::Private => &self.private,
            InstitutionType::International => &self.international,
        }
    }

    pub(crate) fn group_mut(&mut self, kind: InstitutionType) -> &mut Vec<InstitutionRecord> {
        match kind {
            InstitutionType::Government => &mut self.government,
            InstitutionType::Private => &mut self.private,
            InstitutionType::International => &mut self.international,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn len(&self) -> usize {
        INSTITUTION_TYPES
            .iter()
            .map(|&kind| self.group(kind).len())
            .sum()
    }
}
