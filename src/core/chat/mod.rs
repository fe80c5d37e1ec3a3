//! Chat relay: prompt assembly and the chat completion provider.
//!
//! The relay keeps no conversation state. Each request carries the prior
//! turns, which are folded into a fresh message list behind a fixed system
//! instruction and sent to the completion provider in one call.
//!
//! - [`messages`]: history turns and OpenAI wire types
//! - [`prompt`]: the system instruction and message-list assembly
//! - [`openai`]: the OpenAI chat completions client

use async_trait::async_trait;
use thiserror::Error;

pub mod messages;
pub mod openai;
pub mod prompt;

pub use messages::{ChatMessage, ChatRole, HistoryRole, HistoryTurn};
pub use openai::OpenAIChatClient;
pub use prompt::{SYSTEM_PROMPT, build_messages};

/// Errors from the chat completion provider
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("OpenAI API key not configured in server environment")]
    MissingApiKey,

    #[error("Chat completion request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("OpenAI API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Invalid chat completion response: {0}")]
    InvalidResponse(String),
}

/// A provider that turns an assembled message list into one generated reply
#[async_trait]
pub trait ChatCompletionProvider: Send + Sync {
    /// Generate the assistant reply for `messages`
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, ChatError>;

    /// Provider name used in logs
    fn provider_name(&self) -> &'static str;
}
