//! Flat text extraction from chat-completion results.

use crate::types::{ChatResponse, MessageContent};

/// Extract the reply text from a chat-completion result.
///
/// Total: every absent or unexpected shape yields an empty string.
///
/// 1. No response, or no choices: `""`.
/// 2. The first choice's message body is used.
/// 3. Plain string content is trimmed and returned.
/// 4. Part-list content concatenates the `text` of every part tagged
///    `"text"`, in order, then trims.
/// 5. Anything else: `""`.
pub fn extract_text(response: Option<&ChatResponse>) -> String {
    let Some(response) = response else {
        return String::new();
    };
    let Some(choice) = response.choices.first() else {
        return String::new();
    };
    let Some(content) = choice.message.as_ref().and_then(|m| m.content.as_ref()) else {
        return String::new();
    };

    match content {
        MessageContent::Text(text) => text.trim().to_string(),
        MessageContent::Parts(parts) => parts
            .iter()
            .filter(|part| part.is_text())
            .filter_map(|part| part.text.as_deref())
            .collect::<String>()
            .trim()
            .to_string(),
        MessageContent::Unsupported(_) => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Choice, ContentPart, ResponseMessage};
    use serde_json::json;

    #[test]
    fn test_extract_text_string() {
        let response = ChatResponse::from_text("Sunny day");
        assert_eq!(extract_text(Some(&response)), "Sunny day");
    }

    #[test]
    fn test_extract_text_trims_whitespace() {
        let response = ChatResponse::from_text("\n  Light rain later.  \n");
        assert_eq!(extract_text(Some(&response)), "Light rain later.");
    }

    #[test]
    fn test_extract_text_list() {
        let response = ChatResponse::from_content(MessageContent::Parts(vec![
            ContentPart::text("Hello "),
            ContentPart::text("world"),
        ]));
        assert_eq!(extract_text(Some(&response)), "Hello world");
    }

    #[test]
    fn test_extract_text_skips_non_text_parts() {
        let response = ChatResponse::from_content(MessageContent::Parts(vec![
            ContentPart::text(" Warm"),
            ContentPart {
                kind: Some("refusal".to_string()),
                text: Some("ignored".to_string()),
            },
            ContentPart {
                kind: None,
                text: Some("untagged".to_string()),
            },
            ContentPart::text(", dry "),
        ]));
        assert_eq!(extract_text(Some(&response)), "Warm, dry");
    }

    #[test]
    fn test_extract_text_missing() {
        assert_eq!(extract_text(None), "");
    }

    #[test]
    fn test_extract_text_no_choices() {
        assert_eq!(extract_text(Some(&ChatResponse::default())), "");
    }

    #[test]
    fn test_extract_text_missing_message_or_content() {
        let response = ChatResponse {
            choices: vec![Choice::default()],
            ..Default::default()
        };
        assert_eq!(extract_text(Some(&response)), "");

        let response = ChatResponse {
            choices: vec![Choice {
                message: Some(ResponseMessage::default()),
                ..Default::default()
            }],
            ..Default::default()
        };
        assert_eq!(extract_text(Some(&response)), "");
    }

    #[test]
    fn test_extract_text_unsupported_shape() {
        let response = ChatResponse::from_content(MessageContent::Unsupported(json!({ "a": 1 })));
        assert_eq!(extract_text(Some(&response)), "");
    }

    #[test]
    fn test_extract_text_uses_first_choice_only() {
        let mut response = ChatResponse::from_text("first");
        response
            .choices
            .extend(ChatResponse::from_text("second").choices);
        assert_eq!(extract_text(Some(&response)), "first");
    }

    fn decode(value: serde_json::Value) -> ChatResponse {
        serde_json::from_value(value).unwrap_or_default()
    }

    #[test]
    fn test_extract_text_with_mistyped_id() {
        let response = decode(json!({ "id": 123, "choices": [{ "message": { "content": "Sunny" } }] }));
        assert_eq!(extract_text(Some(&response)), "Sunny");
    }

    #[test]
    fn test_extract_text_ignores_part_with_non_string_text() {
        let response = decode(json!({ "choices": [{ "message": { "content": [
            { "type": "text", "text": "Hello" },
            { "type": "annotation", "text": { "ref": 1 } }
        ] } }] }));
        assert_eq!(extract_text(Some(&response)), "Hello");
    }

    #[test]
    fn test_extract_text_ignores_non_object_part() {
        let response = decode(json!({ "choices": [{ "message": { "content": [
            { "type": "text", "text": "Hello" },
            "stray"
        ] } }] }));
        assert_eq!(extract_text(Some(&response)), "Hello");
    }

    #[test]
    fn test_extract_text_from_decoded_json() {
        let response: ChatResponse = serde_json::from_value(json!({
            "choices": [{ "message": { "content": [
                { "type": "text", "text": "Hello " },
                { "type": "text", "text": "world" }
            ] } }]
        }))
        .unwrap();
        assert_eq!(extract_text(Some(&response)), "Hello world");
    }
}
