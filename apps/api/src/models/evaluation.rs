use serde::{Deserialize, Serialize};

/// Career path shown when the model text could not be parsed.
pub const FALLBACK_CAREER_PATH: &str = "Career analysis temporarily unavailable";
const FALLBACK_STRENGTH: &str = "Unable to analyze strengths at this time";
const FALLBACK_AREA: &str = "Unable to analyze development areas at this time";
const FALLBACK_STEP: &str = "Please retake the assessment or try again later";

/// Structured view of one block of model text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedEvaluation {
    pub career_path: String,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub development_areas: Vec<String>,
    #[serde(default)]
    pub next_steps: Vec<String>,
}

impl ParsedEvaluation {
    /// The sentinel record returned instead of a parse failure.
    pub fn fallback() -> Self {
        Self {
            career_path: FALLBACK_CAREER_PATH.to_string(),
            strengths: vec![FALLBACK_STRENGTH.to_string()],
            development_areas: vec![FALLBACK_AREA.to_string()],
            next_steps: vec![FALLBACK_STEP.to_string()],
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.career_path == FALLBACK_CAREER_PATH
    }
}
