//! ElevenLabs Conversational AI outbound-call client (Twilio numbers).
//!
//! - Endpoint: `POST {base_url}/v1/convai/twilio/outbound-call`
//! - Auth: `xi-api-key` header
//! - Every request is bounded by `call_timeout_seconds`

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};
use zeroize::Zeroizing;

use super::messages::OutboundCallRequest;
use super::{CallError, OutboundCallProvider};
use crate::config::ServerConfig;

/// Outbound call provider backed by the ElevenLabs API
pub struct ElevenLabsCallClient {
    http_client: Client,
    api_key: Option<Zeroizing<String>>,
    url: String,
    timeout: Duration,
}

impl ElevenLabsCallClient {
    pub fn new(config: &ServerConfig) -> Result<Self, reqwest::Error> {
        let http_client = Client::builder().pool_max_idle_per_host(4).build()?;

        Ok(Self {
            http_client,
            api_key: config.elevenlabs_api_key.clone().map(Zeroizing::new),
            url: config.outbound_call_url(),
            timeout: Duration::from_secs(config.call_timeout_seconds),
        })
    }

    fn transport_error(&self, error: reqwest::Error) -> CallError {
        if error.is_timeout() {
            CallError::Transport(format!(
                "Outbound call request timed out after {}s: {error}",
                self.timeout.as_secs()
            ))
        } else {
            CallError::Transport(error.to_string())
        }
    }
}

#[async_trait]
impl OutboundCallProvider for ElevenLabsCallClient {
    async fn place_call(&self, request: &OutboundCallRequest) -> Result<Value, CallError> {
        let mut builder = self
            .http_client
            .post(&self.url)
            .timeout(self.timeout)
            .json(request);

        // Without a key the header is left off and the provider rejects the call.
        if let Some(api_key) = &self.api_key {
            builder = builder.header("xi-api-key", api_key.as_str());
        }

        debug!(url = %self.url, "Sending outbound call request");

        let response = builder.send().await.map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            warn!(
                status = status.as_u16(),
                "Outbound call API returned non-success status"
            );
            return Err(CallError::UpstreamStatus {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            CallError::Transport(format!("Invalid JSON in outbound call response: {e}"))
        })
    }

    fn provider_name(&self) -> &'static str {
        "elevenlabs"
    }
}
