//! Message types for the ElevenLabs Twilio outbound-call API.
//!
//! API Reference: https://elevenlabs.io/docs/api-reference/twilio/outbound-call

use serde::Serialize;
use serde_json::Value;

use super::variables::DynamicVariables;

/// Value of the `type` tag on the client-data envelope.
pub const CLIENT_DATA_TYPE: &str = "conversation_initiation_client_data";

/// Upstream keys that may carry the call identifier, in order of preference.
pub const CALL_ID_KEYS: [&str; 2] = ["callSid", "conversation_id"];

/// Body of `POST /v1/convai/twilio/outbound-call`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutboundCallRequest {
    pub agent_id: Option<String>,
    pub agent_phone_number_id: Option<String>,
    pub to_number: String,
    pub conversation_initiation_client_data: ConversationInitiationClientData,
}

/// Per-call data handed to the agent when the conversation starts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversationInitiationClientData {
    #[serde(rename = "type")]
    pub data_type: &'static str,
    pub dynamic_variables: DynamicVariables,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_config_override: Option<ConversationConfigOverride>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversationConfigOverride {
    pub agent: AgentOverride,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentOverride {
    pub prompt: PromptOverride,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PromptOverride {
    pub prompt: String,
}

impl ConversationInitiationClientData {
    pub fn new(dynamic_variables: DynamicVariables) -> Self {
        Self {
            data_type: CLIENT_DATA_TYPE,
            dynamic_variables,
            conversation_config_override: None,
        }
    }

    /// Replace the agent's configured prompt for this call only
    pub fn with_prompt_override(mut self, prompt: impl Into<String>) -> Self {
        self.conversation_config_override = Some(ConversationConfigOverride {
            agent: AgentOverride {
                prompt: PromptOverride {
                    prompt: prompt.into(),
                },
            },
        });
        self
    }
}

/// Pick the call identifier out of an upstream response body
///
/// Returns the first non-empty string among [`CALL_ID_KEYS`].
pub fn extract_call_id(body: &Value) -> Option<String> {
    CALL_ID_KEYS
        .iter()
        .filter_map(|key| body.get(key).and_then(Value::as_str))
        .find(|id| !id.is_empty())
        .map(str::to_string)
}
