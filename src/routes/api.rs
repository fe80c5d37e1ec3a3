use axum::{Router, routing::post};
use tower_http::trace::TraceLayer;

use crate::handlers::{call, chat};
use crate::state::AppState;
use std::sync::Arc;

/// Create the API router with the relay routes
pub fn create_api_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/chat", post(chat::chat_handler))
        .route("/call", post(call::call_handler))
        .layer(TraceLayer::new_for_http())
}
