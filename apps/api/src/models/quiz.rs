use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One scored dimension of a quiz. The two quiz variants use disjoint axis sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    Analytical,
    Creative,
    Social,
    Structured,
    Personality,
    Skills,
    Interests,
    Values,
}

impl Axis {
    pub fn as_str(&self) -> &'static str {
        match self {
            Axis::Analytical => "analytical",
            Axis::Creative => "creative",
            Axis::Social => "social",
            Axis::Structured => "structured",
            Axis::Personality => "personality",
            Axis::Skills => "skills",
            Axis::Interests => "interests",
            Axis::Values => "values",
        }
    }

    /// Case-insensitive lookup by name. Surrounding whitespace is ignored.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim().to_ascii_lowercase();
        ALL_AXES.iter().copied().find(|axis| axis.as_str() == name)
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub const ALL_AXES: [Axis; 8] = [
    Axis::Analytical,
    Axis::Creative,
    Axis::Social,
    Axis::Structured,
    Axis::Personality,
    Axis::Skills,
    Axis::Interests,
    Axis::Values,
];

/// Which axis set a deployment scores against. Never mixed within one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuizMode {
    /// analytical / creative / social / structured
    #[default]
    Aptitude,
    /// personality / skills / interests / values
    Dimensions,
}

impl QuizMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuizMode::Aptitude => "aptitude",
            QuizMode::Dimensions => "dimensions",
        }
    }

    pub fn axes(&self) -> &'static [Axis] {
        match self {
            QuizMode::Aptitude => &[Axis::Analytical, Axis::Creative, Axis::Social, Axis::Structured],
            QuizMode::Dimensions => &[Axis::Personality, Axis::Skills, Axis::Interests, Axis::Values],
        }
    }

    /// Resolves a raw category string to an axis of this mode.
    pub fn axis(&self, category: &str) -> Option<Axis> {
        Axis::from_name(category).filter(|axis| self.axes().contains(axis))
    }
}

impl FromStr for QuizMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "aptitude" => Ok(QuizMode::Aptitude),
            "dimensions" => Ok(QuizMode::Dimensions),
            other => Err(format!(
                "unknown quiz mode '{other}' (expected 'aptitude' or 'dimensions')"
            )),
        }
    }
}

/// A single answered quiz option, as handed over by quiz intake.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnsweredOption {
    pub question_id: String,
    pub category: String,
    #[serde(default)]
    pub option_text: String,
    pub score: i32,
}

/// Accumulated score per axis. Every axis of the mode is always present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreProfile {
    pub mode: QuizMode,
    pub scores: BTreeMap<Axis, u32>,
}

impl ScoreProfile {
    pub fn new(mode: QuizMode) -> Self {
        Self {
            mode,
            scores: mode.axes().iter().map(|&axis| (axis, 0)).collect(),
        }
    }

    /// Builds a profile from explicit values; axes not listed (or not in the mode) stay 0.
    #[cfg(test)]
    pub fn from_scores(mode: QuizMode, values: &[(Axis, u32)]) -> Self {
        let mut profile = Self::new(mode);
        for &(axis, value) in values {
            if let Some(slot) = profile.scores.get_mut(&axis) {
                *slot = value;
            }
        }
        profile
    }

    pub fn get(&self, axis: Axis) -> u32 {
        self.scores.get(&axis).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.scores.values().map(|&v| u64::from(v)).sum()
    }

    /// Highest-scoring axis, first in mode order on ties. `None` when nothing was scored.
    pub fn dominant_axis(&self) -> Option<Axis> {
        if self.total() == 0 {
            return None;
        }
        let mut best: Option<(Axis, u32)> = None;
        for &axis in self.mode.axes() {
            let value = self.get(axis);
            match best {
                Some((_, top)) if top >= value => {}
                _ => best = Some((axis, value)),
            }
        }
        best.map(|(axis, _)| axis)
    }
}

/// Share of the total per axis, rounded to whole percent.
pub type PercentageProfile = BTreeMap<Axis, u32>;
