// Cross-cutting prompt fragments shared by every generation call.
// Feature-specific prompts live next to the feature (see engine/prompts.rs).

/// Keeps model output parseable line-by-line.
pub const PLAIN_TEXT_INSTRUCTION: &str = "Respond in plain text only. \
    Do NOT wrap the answer in code fences. \
    Do NOT include your reasoning, apologies, or any preamble.";

/// Appends the shared output rules to a feature's system prompt.
pub fn with_output_rules(system: &str) -> String {
    format!("{system}\n\n{PLAIN_TEXT_INSTRUCTION}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_rules_appended_after_system() {
        let system = with_output_rules("You are a counsellor.");
        assert!(system.starts_with("You are a counsellor."));
        assert!(system.ends_with(PLAIN_TEXT_INSTRUCTION));
    }
}
