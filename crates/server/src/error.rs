use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use crypto_dashboard_core::errors::CoreError;
use serde_json::json;

/// Message returned for upstream failures that carry no usable status.
pub const MARKET_FETCH_FAILED: &str = "Failed to fetch market data";

/// Error returned by request handlers; renders as `{ "error": "..." }`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(msg) => ApiError::bad_request(msg),
            CoreError::UpstreamStatus { status, message } => {
                tracing::warn!(status, %message, "upstream market API returned an error status");
                let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
                ApiError::new(status, MARKET_FETCH_FAILED)
            }
            err @ (CoreError::Network(_) | CoreError::Api { .. }) => {
                tracing::error!(error = %err, "market data request failed");
                ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, MARKET_FETCH_FAILED)
            }
            err @ (CoreError::FileIO(_)
            | CoreError::Serialization(_)
            | CoreError::Deserialization(_)) => {
                tracing::error!(error = %err, "failed to save watchlist");
                ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Failed to save watchlist")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}
