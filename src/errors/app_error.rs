use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::core::call::CallError;
use crate::core::chat::ChatError;

/// Errors returned by the HTTP handlers
///
/// Every variant renders as a JSON body with a single `detail` key:
/// - `InvalidRequest` → 422 `{"detail": "..."}`
/// - `Internal` → 500 `{"detail": "..."}`
/// - `UpstreamStatus` → 502 `{"detail": {"status": 500, "body": "..."}}`
/// - `Gateway` → 502 `{"detail": "..."}`
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("{0}")]
    Internal(String),

    #[error("Upstream returned status {status}: {body}")]
    UpstreamStatus { status: u16, body: String },

    #[error("{0}")]
    Gateway(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidRequest(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::UpstreamStatus { .. } | AppError::Gateway(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match self {
            AppError::UpstreamStatus { status, body } => json!({
                "detail": {
                    "status": status,
                    "body": body,
                }
            }),
            AppError::InvalidRequest(detail)
            | AppError::Internal(detail)
            | AppError::Gateway(detail) => json!({ "detail": detail }),
        };

        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidRequest(rejection.body_text())
    }
}

/// Every chat failure is reported as an internal error carrying the error text.
impl From<ChatError> for AppError {
    fn from(error: ChatError) -> Self {
        AppError::Internal(error.to_string())
    }
}

impl From<CallError> for AppError {
    fn from(error: CallError) -> Self {
        match error {
            CallError::UpstreamStatus { status, body } => AppError::UpstreamStatus { status, body },
            CallError::Transport(message) => AppError::Gateway(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_internal_error_response() {
        let response = AppError::Internal("boom".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await, json!({"detail": "boom"}));
    }

    #[tokio::test]
    async fn test_upstream_status_response_keeps_status_and_body() {
        let response = AppError::UpstreamStatus {
            status: 404,
            body: r#"{"detail":"agent not found"}"#.to_string(),
        }
        .into_response();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(
            body_json(response).await,
            json!({"detail": {"status": 404, "body": r#"{"detail":"agent not found"}"#}})
        );
    }

    #[tokio::test]
    async fn test_gateway_error_response() {
        let response = AppError::Gateway("connection refused".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(
            body_json(response).await,
            json!({"detail": "connection refused"})
        );
    }

    #[test]
    fn test_invalid_request_status() {
        let error = AppError::InvalidRequest("missing field `message`".to_string());
        assert_eq!(error.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_from_chat_error_is_internal() {
        let error: AppError = ChatError::MissingApiKey.into();
        assert!(matches!(error, AppError::Internal(_)));
        assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_from_call_error_maps_to_gateway_shapes() {
        let status: AppError = CallError::UpstreamStatus {
            status: 500,
            body: "oops".to_string(),
        }
        .into();
        assert!(matches!(
            status,
            AppError::UpstreamStatus { status: 500, .. }
        ));

        let transport: AppError = CallError::Transport("timed out".to_string()).into();
        assert!(matches!(transport, AppError::Gateway(ref m) if m == "timed out"));
    }
}
