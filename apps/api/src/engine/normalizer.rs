//! Response Normalizer — turns free-form model output into a `ParsedEvaluation`.
//!
//! The model is asked for four labelled lines (CAREER / STRENGTHS / AREAS / STEPS)
//! but nothing about its output is guaranteed. Parsing never fails outward:
//! unusable input resolves to `ParsedEvaluation::fallback()`.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use tracing::warn;

use crate::models::evaluation::ParsedEvaluation;

/// Inline deliberation the model sometimes emits before answering.
static REASONING_BLOCK: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<think>.*?</think>").unwrap());
/// An opening tag that never closed, e.g. a reply cut off at the token limit.
static UNCLOSED_REASONING: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<think>.*").unwrap());

static CAREER_LINE: Lazy<Regex> = Lazy::new(|| labelled_line("CAREER"));
static STRENGTHS_LINE: Lazy<Regex> = Lazy::new(|| labelled_line("STRENGTHS"));
static AREAS_LINE: Lazy<Regex> = Lazy::new(|| labelled_line("AREAS"));
static STEPS_LINE: Lazy<Regex> = Lazy::new(|| labelled_line("STEPS"));

const CAREER_PATH_PREFIX: &str = "recommended career path:";
const BULLET_CHARS: &[char] = &['-', '*', '•', '–', '—', '·'];

fn labelled_line(label: &str) -> Regex {
    // [ \t]* rather than \s* so an empty section cannot swallow the next line
    Regex::new(&format!(r"(?m)^[ \t]*{label}:[ \t]*(.*?)[ \t\r]*$")).unwrap()
}

/// Why a block of text could not be turned into an evaluation.
/// Internal only: every variant resolves to the fallback record.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseDegradation {
    #[error("model text is empty")]
    EmptyInput,

    #[error("model text contained only reasoning")]
    OnlyReasoning,

    #[error("model text is not valid UTF-8: {0}")]
    InvalidEncoding(String),
}

/// Parses raw model text. Never fails; degrades to the fallback record.
pub fn normalize(raw_text: &str) -> ParsedEvaluation {
    try_normalize(raw_text).unwrap_or_else(|reason| {
        warn!("Model response degraded to fallback: {reason}");
        ParsedEvaluation::fallback()
    })
}

/// Byte-level entry point for text whose encoding has not been checked.
pub fn normalize_bytes(raw: &[u8]) -> ParsedEvaluation {
    match std::str::from_utf8(raw) {
        Ok(text) => normalize(text),
        Err(e) => {
            let reason = ParseDegradation::InvalidEncoding(e.to_string());
            warn!("Model response degraded to fallback: {reason}");
            ParsedEvaluation::fallback()
        }
    }
}

/// Strict variant of [`normalize`] that reports why the text was unusable.
pub fn try_normalize(raw_text: &str) -> Result<ParsedEvaluation, ParseDegradation> {
    if raw_text.trim().is_empty() {
        return Err(ParseDegradation::EmptyInput);
    }

    let text = strip_reasoning(raw_text);
    if text.trim().is_empty() {
        return Err(ParseDegradation::OnlyReasoning);
    }

    Ok(ParsedEvaluation {
        career_path: capture(&CAREER_LINE, &text)
            .map(|s| s.trim().to_string())
            .unwrap_or_default(),
        strengths: capture(&STRENGTHS_LINE, &text)
            .map(split_list)
            .unwrap_or_default(),
        development_areas: capture(&AREAS_LINE, &text)
            .map(split_list)
            .unwrap_or_default(),
        next_steps: capture(&STEPS_LINE, &text)
            .map(split_list)
            .unwrap_or_default(),
    })
}

/// Removes every complete `<think>…</think>` block, then anything from an
/// unclosed `<think>` to the end. A stray `</think>` is left alone.
pub fn strip_reasoning(text: &str) -> String {
    let closed = REASONING_BLOCK.replace_all(text, "");
    UNCLOSED_REASONING.replace(&closed, "").into_owned()
}

fn capture<'t>(pattern: &Regex, text: &'t str) -> Option<&'t str> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(str::to_string)
        .collect()
}

/// Normalizes a career label for display and keyword matching.
///
/// Removes `**` emphasis, leading bullets/dashes and a "Recommended Career Path:"
/// prefix, then trims. Applied until nothing changes, so it is idempotent.
pub fn clean_career_label(label: &str) -> String {
    let mut current = label.to_string();
    loop {
        let next = clean_once(&current);
        if next == current {
            return next;
        }
        current = next;
    }
}

fn clean_once(label: &str) -> String {
    let mut text = label.replace("**", "");
    text = text.trim().trim_start_matches(BULLET_CHARS).trim().to_string();

    let has_prefix = text
        .get(..CAREER_PATH_PREFIX.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(CAREER_PATH_PREFIX));
    if has_prefix {
        text = text[CAREER_PATH_PREFIX.len()..].to_string();
    }

    text.trim().to_string()
}
