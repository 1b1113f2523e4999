// Prompts for the career evaluation call.
// The output format here is what `normalizer` parses; keep the two in sync.

use crate::models::career::MatchResult;
use crate::models::quiz::{PercentageProfile, ScoreProfile};

pub const EVALUATION_SYSTEM: &str = "You are a career guidance counsellor for secondary and \
    university students. You give short, encouraging, concrete advice. \
    Answer ONLY in the four-line format requested. Do not add headings, \
    markdown, or any other text.";

pub const EVALUATION_PROMPT_TEMPLATE: &str = "\
A student completed a career aptitude quiz ({mode} variant).

Score distribution (share of total points):
{percentages}

Strongest area: {dominant}

Best matching careers from our dataset:
{matches}

Recommend ONE career path for this student and respond with exactly these four lines:
CAREER: <single career title>
STRENGTHS: <comma-separated list>
AREAS: <comma-separated development areas>
STEPS: <comma-separated concrete next steps>";

/// Renders the evaluation prompt for one student.
pub fn build_evaluation_prompt(
    profile: &ScoreProfile,
    percentages: &PercentageProfile,
    top_matches: &[MatchResult],
) -> String {
    let percentages_block = percentages
        .iter()
        .map(|(axis, pct)| format!("- {axis}: {pct}%"))
        .collect::<Vec<_>>()
        .join("\n");

    let matches_block = if top_matches.is_empty() {
        "- (no dataset matches available)".to_string()
    } else {
        top_matches
            .iter()
            .map(|m| format!("- {} ({:.0}% match)", m.career_title, m.match_percentage))
            .collect::<Vec<_>>()
            .join("\n")
    };

    let dominant = profile
        .dominant_axis()
        .map(|axis| axis.to_string())
        .unwrap_or_else(|| "undetermined".to_string());

    EVALUATION_PROMPT_TEMPLATE
        .replace("{mode}", profile.mode.as_str())
        .replace("{percentages}", &percentages_block)
        .replace("{dominant}", &dominant)
        .replace("{matches}", &matches_block)
}
