// Recommendation Matching Engine
// Implements: score aggregation, threshold matching, model-text normalization,
// institution recommendation, and the orchestrator that sequences them.
// Every stage is a pure function over its inputs; only `handlers` does I/O.

pub mod aggregator;
pub mod handlers;
pub mod institutions;
pub mod matcher;
pub mod normalizer;
pub mod orchestrator;
pub mod prompts;

/// `part / whole × 100`, rounded half-to-even to a whole percent.
/// Callers guarantee `whole > 0`.
pub(crate) fn round_percent(part: f64, whole: f64) -> f64 {
    (part / whole * 100.0).round_ties_even()
}
