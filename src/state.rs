use std::sync::Arc;

use tracing::{info, warn};

use crate::config::{ServerConfig, missing_call_settings};
use crate::core::{
    ChatCompletionProvider, ElevenLabsCallClient, OpenAIChatClient, OutboundCallProvider,
};

/// Shared, read-only application state
///
/// Holds the configuration loaded at startup and one client per provider.
/// Nothing here is mutated after construction, so handlers share it through
/// an `Arc` without locking.
pub struct AppState {
    pub config: ServerConfig,
    pub chat: Arc<dyn ChatCompletionProvider>,
    pub calls: Arc<dyn OutboundCallProvider>,
}

impl AppState {
    /// Build the state with the real OpenAI and ElevenLabs clients
    pub fn new(config: ServerConfig) -> anyhow::Result<Arc<Self>> {
        let chat = Arc::new(OpenAIChatClient::new(&config)?);
        let calls = Arc::new(ElevenLabsCallClient::new(&config)?);

        if config.openai_api_key.is_none() {
            warn!("OPENAI_API_KEY is not set; /chat requests will fail");
        }
        let missing = missing_call_settings(&config);
        if !missing.is_empty() {
            warn!(
                "Outbound call settings not configured: {}; /call requests will be rejected upstream",
                missing.join(", ")
            );
        }

        info!(
            chat_provider = chat.provider_name(),
            call_provider = calls.provider_name(),
            "Providers initialized"
        );

        Ok(Self::with_providers(config, chat, calls))
    }

    /// Build the state around caller-supplied providers
    pub fn with_providers(
        config: ServerConfig,
        chat: Arc<dyn ChatCompletionProvider>,
        calls: Arc<dyn OutboundCallProvider>,
    ) -> Arc<Self> {
        Arc::new(Self {
            config,
            chat,
            calls,
        })
    }
}
