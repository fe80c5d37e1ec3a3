//! Message types for the chat relay and the OpenAI Chat Completions API.
//!
//! API Reference: https://platform.openai.com/docs/api-reference/chat/create

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// =============================================================================
// Conversation History
// =============================================================================

/// Speaker role of a history turn as sent by the front end
///
/// Only `"user"` and `"assistant"` (exact, lowercase) are recognised; any
/// other value, including a missing or non-string role, becomes `Other` and
/// the turn is skipped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryRole {
    User,
    Assistant,
    #[default]
    #[serde(other)]
    Other,
}

fn deserialize_history_role<'de, D>(deserializer: D) -> Result<HistoryRole, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value.as_str() {
        Some("user") => HistoryRole::User,
        Some("assistant") => HistoryRole::Assistant,
        _ => HistoryRole::Other,
    })
}

/// One prior turn of the conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryTurn {
    #[serde(default, deserialize_with = "deserialize_history_role")]
    pub role: HistoryRole,
    #[serde(default)]
    pub text: String,
}

impl HistoryTurn {
    pub fn new(role: HistoryRole, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
        }
    }
}

// =============================================================================
// Request Types
// =============================================================================

/// Role of a message in the completion request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

/// A message in the completion request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
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

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// Body of `POST /chat/completions`.
#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [ChatMessage],
    pub max_tokens: u32,
    pub temperature: f32,
}

// =============================================================================
// Response Types
// =============================================================================

/// Chat completion response (only the fields the relay reads).
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    pub message: AssistantMessage,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssistantMessage {
    /// Null when the model returned only tool calls or was filtered.
    #[serde(default)]
    pub content: Option<String>,
}

/// OpenAI API error response.
#[derive(Debug, Clone, Deserialize)]
pub struct OpenAIErrorResponse {
    pub error: OpenAIError,
}

/// OpenAI API error details.
#[derive(Debug, Clone, Deserialize)]
pub struct OpenAIError {
    /// Human-readable error message.
    pub message: String,

    /// Error type identifier.
    #[serde(rename = "type", default)]
    pub error_type: Option<String>,

    /// Error code (if applicable).
    #[serde(default)]
    pub code: Option<String>,
}
