//! Prompt templates for the weather summary.

use crate::types::ChatMessage;

/// Default chat model.
pub const MODEL_ID: &str = "gpt-4o-mini";

/// Fixed system instruction.
pub const SYSTEM_PROMPT: &str = "You are a concise weather and clothing assistant.";

/// Render the user request for a location and its serialized observation.
pub fn summary_request(display: &str, observation_json: &str) -> String {
    format!(
        "Summarize today's weather for {}. \
Use this observation data: {}. \
Give a short headline, current temp in Celsius, wind, and a quick clothing tip.",
        display, observation_json
    )
}

/// Build the two-message summary prompt: system instruction, then the
/// templated user request.
pub fn build_summary_prompt(display: &str, observation_json: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(SYSTEM_PROMPT),
        ChatMessage::user(summary_request(display, observation_json)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ChatRole;

    #[test]
    fn test_summary_request_embeds_inputs() {
        let text = summary_request("Dali, Yunnan, China", r#"{"temperature":21}"#);
        assert_eq!(
            text,
            "Summarize today's weather for Dali, Yunnan, China. \
Use this observation data: {\"temperature\":21}. \
Give a short headline, current temp in Celsius, wind, and a quick clothing tip."
        );
    }

    #[test]
    fn test_prompt_has_system_then_user() {
        let prompt = build_summary_prompt("Lima, Peru", "{}");
        assert_eq!(prompt.len(), 2);
        assert_eq!(prompt[0].role, ChatRole::System);
        assert_eq!(prompt[0].content, SYSTEM_PROMPT);
        assert_eq!(prompt[1].role, ChatRole::User);
        assert!(prompt[1].content.contains("Lima, Peru"));
    }
}
