//! OpenAI chat completions client.
//!
//! - Endpoint: `POST {base_url}/chat/completions`
//! - Auth: `Authorization: Bearer <OPENAI_API_KEY>`
//! - Parameters: model, max_tokens and temperature are fixed per process

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, error};
use zeroize::Zeroizing;

use super::messages::{
    ChatCompletionRequest, ChatCompletionResponse, ChatMessage, OpenAIErrorResponse,
};
use super::{ChatCompletionProvider, ChatError};
use crate::config::ServerConfig;

/// Chat completion provider backed by the OpenAI API
pub struct OpenAIChatClient {
    http_client: Client,
    api_key: Option<Zeroizing<String>>,
    url: String,
    model: String,
    max_tokens: u32,
    temperature: f32,
}

impl OpenAIChatClient {
    /// Create a client from the server configuration
    ///
    /// A missing API key is not an error here; `complete` reports it on use.
    pub fn new(config: &ServerConfig) -> Result<Self, ChatError> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.chat_timeout_seconds))
            .pool_max_idle_per_host(4)
            .build()?;

        Ok(Self {
            http_client,
            api_key: config.openai_api_key.clone().map(Zeroizing::new),
            url: config.chat_completions_url(),
            model: config.chat_model.clone(),
            max_tokens: config.chat_max_tokens,
            temperature: config.chat_temperature,
        })
    }

    fn parse_response(body: &str) -> Result<String, ChatError> {
        let response: ChatCompletionResponse = serde_json::from_str(body)
            .map_err(|e| ChatError::InvalidResponse(format!("Failed to parse response: {e}")))?;

        response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ChatError::InvalidResponse("response contained no choices".to_string()))?
            .message
            .content
            .ok_or_else(|| {
                ChatError::InvalidResponse("first choice has no message content".to_string())
            })
    }
}

#[async_trait]
impl ChatCompletionProvider for OpenAIChatClient {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, ChatError> {
        let api_key = self.api_key.as_ref().ok_or(ChatError::MissingApiKey)?;

        let request = ChatCompletionRequest {
            model: &self.model,
            messages,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        debug!(
            model = %self.model,
            message_count = messages.len(),
            "Sending chat completion request"
        );

        let response = self
            .http_client
            .post(&self.url)
            .bearer_auth(api_key.as_str())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let response_text = response.text().await?;

        if !status.is_success() {
            let message = match serde_json::from_str::<OpenAIErrorResponse>(&response_text) {
                Ok(error_response) => error_response.error.message,
                Err(_) => response_text,
            };
            error!(status = status.as_u16(), "OpenAI API returned an error: {}", message);
            return Err(ChatError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Self::parse_response(&response_text)
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }
}
