use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use review_core::LedgerError;
use review_sources::SourceError;
use serde_json::json;
use tracing::error;

/// Client-facing failure. Always serializes to
/// `{"status": "error", "message": ..., "error"?: ...}`.
pub struct ApiError {
    status: StatusCode,
    message: String,
    detail: Option<String>,
}

impl ApiError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
            detail: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
            detail: None,
        }
    }

    pub fn internal(message: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
            detail: Some(detail.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(message = %self.message, detail = ?self.detail, "request failed");
        }
        let mut body = json!({
            "status": "error",
            "message": self.message,
        });
        if let Some(detail) = self.detail {
            body["error"] = json!(detail);
        }
        (self.status, Json(body)).into_response()
    }
}

impl From<SourceError> for ApiError {
    fn from(e: SourceError) -> Self {
        // Source failures are never retried; they surface verbatim
        ApiError::internal("Failed to fetch reviews", e.to_string())
    }
}

impl From<LedgerError> for ApiError {
    fn from(e: LedgerError) -> Self {
        match e {
            LedgerError::ReviewNotFound => ApiError::not_found("Review not found"),
            LedgerError::AlreadyApproved => ApiError::bad_request("Review already approved"),
            LedgerError::NoLedger => ApiError::not_found("No approved reviews found"),
            LedgerError::NotInLedger => ApiError::not_found("Review not found in approved list"),
            LedgerError::Io(io) => {
                ApiError::internal("Failed to update approved reviews", io.to_string())
            }
            LedgerError::Corrupt(parse) => {
                ApiError::internal("Failed to read approved reviews", parse.to_string())
            }
        }
    }
}
