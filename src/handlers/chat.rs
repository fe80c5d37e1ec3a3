use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};

use crate::core::chat::{HistoryTurn, build_messages};
use crate::errors::app_error::AppResult;
use crate::state::AppState;

/// Request body for `POST /chat`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// The user's current message
    pub message: String,
    /// Prior turns, oldest first
    #[serde(default)]
    pub conversation_history: Vec<HistoryTurn>,
}

/// Success body for `POST /chat`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub ok: bool,
    /// The assistant's reply
    pub response: String,
}

/// Relay one chat turn to the completion provider
///
/// # Responses
/// - 200 `{"ok": true, "response": "..."}`
/// - 422 `{"detail": "..."}` for a malformed body
/// - 500 `{"detail": "..."}` for any provider failure
pub async fn chat_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> AppResult<Json<ChatResponse>> {
    let Json(request) = payload?;

    info!(
        history_len = request.conversation_history.len(),
        "Chat request received"
    );

    let messages = build_messages(&request.conversation_history, &request.message);

    let reply = state.chat.complete(&messages).await.map_err(|e| {
        error!(
            provider = state.chat.provider_name(),
            "Chat completion failed: {}", e
        );
        e
    })?;

    Ok(Json(ChatResponse {
        ok: true,
        response: reply,
    }))
}
