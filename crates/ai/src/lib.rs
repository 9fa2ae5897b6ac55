//! Chat-completion access for the weather briefing.
//!
//! - `chat`: OpenAI-compatible client run under the shared retry policy
//! - `types`: request DTOs and leniently decoded responses
//! - `extract`: flat text extraction from a completion
//! - `prompt_template`: the weather summary prompt
//! - `error`: chat failure vocabulary and its mapping onto core errors

pub mod chat;
pub mod error;
pub mod extract;
pub mod prompt_template;
pub mod types;

pub use chat::{ChatClientTrait, ChatExecutor, FakeChatClient, LOG_LABEL, OPENAI_BASE_URL};
pub use error::{ChatApiError, CHAT_TARGET};
pub use extract::extract_text;
pub use prompt_template::{build_summary_prompt, summary_request, MODEL_ID, SYSTEM_PROMPT};
pub use types::{
    ChatMessage, ChatRequest, ChatResponse, ChatRole, Choice, ContentPart, MessageContent,
    ResponseMessage,
};
