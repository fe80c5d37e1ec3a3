use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, info};

use crate::core::call::{CallFields, build_outbound_call, extract_call_id};
use crate::errors::app_error::AppResult;
use crate::state::AppState;
use crate::utils::mask_phone_number;

/// Request body for `POST /call`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallRequest {
    /// Destination number, passed to the provider unchanged
    pub to_number: String,
    /// Only sent upstream when `forward_system_prompt` is enabled
    #[serde(default)]
    pub system_prompt: String,
    #[serde(default)]
    pub fields: CallFields,
}

/// Success body for `POST /call`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallResponse {
    pub ok: bool,
    /// `callSid`, else `conversation_id`, else null
    pub call_id: Option<String>,
    /// Full upstream response body
    pub response: Value,
}

/// Dispatch an outbound call through the telephony provider
///
/// # Responses
/// - 200 `{"ok": true, "call_id": "...", "response": {...}}`
/// - 422 `{"detail": "..."}` for a malformed body
/// - 502 `{"detail": {"status": 500, "body": "..."}}` when the provider rejects the call
/// - 502 `{"detail": "..."}` when the provider cannot be reached or times out
pub async fn call_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CallRequest>, JsonRejection>,
) -> AppResult<Json<CallResponse>> {
    let Json(request) = payload?;

    info!(
        to_number = %mask_phone_number(&request.to_number),
        system_prompt_len = request.system_prompt.len(),
        "Outbound call requested"
    );

    let outbound = build_outbound_call(
        &state.config,
        &request.to_number,
        &request.system_prompt,
        &request.fields,
    );
    debug!(
        dynamic_variables = ?outbound.conversation_initiation_client_data.dynamic_variables,
        "Outbound call payload built"
    );

    let body = state.calls.place_call(&outbound).await.map_err(|e| {
        error!(
            provider = state.calls.provider_name(),
            "Outbound call failed: {}", e
        );
        e
    })?;

    let call_id = extract_call_id(&body);
    info!(call_id = ?call_id, "Outbound call accepted");

    Ok(Json(CallResponse {
        ok: true,
        call_id,
        response: body,
    }))
}
