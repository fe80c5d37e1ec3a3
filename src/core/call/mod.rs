//! Call dispatcher: dynamic-variable mapping and the outbound call provider.
//!
//! A call request carries a destination number and a loose set of named
//! fields. The fields are mapped onto the fixed [`DynamicVariables`] slots
//! (with default literals for anything absent), wrapped in the provider's
//! client-data envelope and posted to the outbound-call endpoint.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::config::ServerConfig;

pub mod elevenlabs;
pub mod messages;
pub mod variables;

pub use elevenlabs::ElevenLabsCallClient;
pub use messages::{ConversationInitiationClientData, OutboundCallRequest, extract_call_id};
pub use variables::{CallFields, DynamicVariables};

/// Errors from the outbound call provider
#[derive(Debug, Error)]
pub enum CallError {
    /// The provider answered with a non-success status
    #[error("Outbound call API returned status {status}: {body}")]
    UpstreamStatus { status: u16, body: String },

    /// The request never produced a usable response (connect, timeout, decode)
    #[error("{0}")]
    Transport(String),
}

/// A provider that places outbound calls
#[async_trait]
pub trait OutboundCallProvider: Send + Sync {
    /// Place the call and return the provider's JSON response body
    async fn place_call(&self, request: &OutboundCallRequest) -> Result<Value, CallError>;

    /// Provider name used in logs
    fn provider_name(&self) -> &'static str;
}

/// Build the outbound-call payload for one request
///
/// `system_prompt` is only attached when `forward_system_prompt` is enabled
/// and the prompt is not blank.
pub fn build_outbound_call(
    config: &ServerConfig,
    to_number: &str,
    system_prompt: &str,
    fields: &CallFields,
) -> OutboundCallRequest {
    let mut client_data = ConversationInitiationClientData::new(DynamicVariables::from(fields));
    if config.forward_system_prompt && !system_prompt.trim().is_empty() {
        client_data = client_data.with_prompt_override(system_prompt);
    }

    OutboundCallRequest {
        agent_id: config.agent_id.clone(),
        agent_phone_number_id: config.phone_number_id.clone(),
        to_number: to_number.to_string(),
        conversation_initiation_client_data: client_data,
    }
}
