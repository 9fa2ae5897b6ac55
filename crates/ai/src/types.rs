//! Chat-completion request and response types.
//!
//! Request types serialize to the OpenAI-compatible wire format. Response
//! types decode leniently: the message body is normalized into the closed
//! [`MessageContent`] sum type right after decoding so extraction never has
//! to probe attributes.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// ============================================================================
// Request Types
// ============================================================================

/// Message role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

impl std::fmt::Display for ChatRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChatRole::System => write!(f, "system"),
            ChatRole::User => write!(f, "user"),
            ChatRole::Assistant => write!(f, "assistant"),
        }
    }
}

/// A single prompt message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }
}

/// Body of a chat-completions request.
#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [ChatMessage],
}

// ============================================================================
// Response Types
// ============================================================================

/// A decoded chat-completion result.
///
/// Every field decodes leniently: a value of the wrong type becomes `None`
/// (or an empty/default entry) instead of failing the whole response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<String>,

    #[serde(default, deserialize_with = "lenient")]
    pub model: Option<String>,

    /// Candidate outputs; `null` or a non-list decodes as empty. A candidate
    /// that is not an object keeps its position as an empty choice.
    #[serde(default, deserialize_with = "lenient_choices")]
    pub choices: Vec<Choice>,
}

impl ChatResponse {
    /// Response with a single plain-text choice.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self::from_content(MessageContent::Text(text.into()))
    }

    /// Response with a single choice carrying `content`.
    pub fn from_content(content: MessageContent) -> Self {
        Self {
            id: None,
            model: None,
            choices: vec![Choice {
                index: Some(0),
                message: Some(ResponseMessage {
                    role: Some("assistant".to_string()),
                    content: Some(content),
                }),
                finish_reason: Some("stop".to_string()),
            }],
        }
    }
}

/// One candidate output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    #[serde(default, deserialize_with = "lenient")]
    pub index: Option<u32>,

    #[serde(default, deserialize_with = "lenient")]
    pub message: Option<ResponseMessage>,

    #[serde(default, deserialize_with = "lenient")]
    pub finish_reason: Option<String>,
}

/// The message body of a choice.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseMessage {
    #[serde(default, deserialize_with = "lenient")]
    pub role: Option<String>,

    #[serde(default)]
    pub content: Option<MessageContent>,
}

/// Message content: a plain string or a list of typed parts.
///
/// List elements that are not objects are dropped while decoding. Any other
/// JSON shape lands in `Unsupported` instead of failing the whole decode.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
    Unsupported(Value),
}

impl<'de> Deserialize<'de> for MessageContent {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(text) => MessageContent::Text(text),
            Value::Array(items) => MessageContent::Parts(
                items
                    .into_iter()
                    .filter(Value::is_object)
                    .filter_map(|item| serde_json::from_value::<ContentPart>(item).ok())
                    .collect(),
            ),
            other => MessageContent::Unsupported(other),
        })
    }
}

/// A typed content part. Only parts tagged `"text"` carry prose.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentPart {
    #[serde(rename = "type", default, deserialize_with = "lenient")]
    pub kind: Option<String>,

    #[serde(default, deserialize_with = "lenient")]
    pub text: Option<String>,
}

impl ContentPart {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            kind: Some("text".to_string()),
            text: Some(text.into()),
        }
    }

    pub fn is_text(&self) -> bool {
        self.kind.as_deref() == Some("text")
    }
}

/// Decode `T` if the value has the right shape, `None` otherwise.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

fn lenient_choices<'de, D>(deserializer: D) -> Result<Vec<Choice>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(items
            .into_iter()
            .map(|item| serde_json::from_value::<Choice>(item).unwrap_or_default())
            .collect()),
        _ => Ok(Vec::new()),
    }
}

// ============================================================================
// Tests
// ============================================================================
