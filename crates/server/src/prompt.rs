//! Prompt assembly for the summarization task

use sumprep_prep::output_schema;

/// System preamble, shared with the fine-tuning format so serving prompts
/// match what the model was trained on.
pub const SYSTEM_PROMPT: &str = sumprep_prep::SYSTEM_MESSAGE;

/// Build the user prompt around the text to summarize. The schema is
/// embedded compactly and the prompt ends with an opening fence for the
/// model to complete.
pub fn build_user_prompt(text: &str) -> String {
    let schema =
        serde_json::to_string(&output_schema()).expect("schema serialization cannot fail");
    [
        "## Text:",
        text.trim(),
        "",
        "## Output Scheme:",
        &schema,
        "",
        "## Summary Result:",
        "```json",
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_shape() {
        let prompt = build_user_prompt("  An article about turbines.  ");

        assert!(prompt.starts_with("## Text:\nAn article about turbines.\n"));
        assert!(prompt.contains("## Output Scheme:"));
        assert!(prompt.contains("summarized_text"));
        assert!(prompt.ends_with("## Summary Result:\n```json"));
    }
}
