//! Route configuration
//!
//! - `api`: the relay endpoints (`/chat`, `/call`)
//! - [`create_app`]: public health check + API routes with CORS and
//!   security headers, ready to serve

pub mod api;

use std::sync::Arc;

use axum::{Router, routing::get};
use http::{HeaderValue, header};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::handlers::api::health_check;
use crate::middleware::cors_layer;
use crate::state::AppState;

/// Assemble the full application router
///
/// Rate limiting is applied by the binary on top of this router since it
/// needs the peer address from `into_make_service_with_connect_info`.
pub fn create_app(state: Arc<AppState>) -> Router {
    let cors = cors_layer(state.config.cors_allowed_origins.as_deref());

    let security_headers = tower::ServiceBuilder::new()
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ));

    Router::new()
        .route("/", get(health_check))
        .merge(api::create_api_router())
        .with_state(state)
        .layer(cors)
        .layer(security_headers)
}
