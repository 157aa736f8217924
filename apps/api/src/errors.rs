use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::blob::BlobError;
use crate::llm_client::LlmError;
use crate::routes::envelope::ResponseEnvelope;
use crate::store::StoreError;

/// Application-level error type.
/// Every handler returns `Result<_, AppError>`; the router turns the error into
/// a response envelope, and the HTTP front end into an axum `Response`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Model error: {0}")]
    Llm(#[from] LlmError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Blob store error: {0}")]
    Blob(#[from] BlobError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Llm(_)
            | AppError::Store(_)
            | AppError::Blob(_)
            | AppError::Serialization(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client errors carry `{"error": msg}`. Server errors carry a generic
    /// `error` plus the underlying failure text in `message`.
    pub fn into_envelope(self) -> ResponseEnvelope {
        let status = self.status();
        let body = if status.is_server_error() {
            tracing::error!("Request failed: {self:?}");
            json!({
                "error": "Internal server error",
                "message": self.to_string()
            })
        } else {
            json!({ "error": self.to_string() })
        };
        ResponseEnvelope::json(status, &body)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.into_envelope().into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn body(envelope: &ResponseEnvelope) -> Value {
        serde_json::from_str(&envelope.body).unwrap()
    }

    #[test]
    fn test_validation_maps_to_400_with_error_field() {
        let envelope = AppError::Validation("User ID required".into()).into_envelope();
        assert_eq!(envelope.status_code, 400);
        assert_eq!(body(&envelope), json!({"error": "User ID required"}));
    }

    #[test]
    fn test_not_found_and_method_not_allowed() {
        let not_found = AppError::NotFound("Not found".into()).into_envelope();
        assert_eq!(not_found.status_code, 404);

        let not_allowed = AppError::MethodNotAllowed.into_envelope();
        assert_eq!(not_allowed.status_code, 405);
        assert_eq!(body(&not_allowed)["error"], "Method not allowed");
    }

    #[test]
    fn test_server_errors_expose_message() {
        let err = AppError::Llm(LlmError::Api {
            status: 403,
            message: "AccessDeniedException".into(),
        });
        let envelope = err.into_envelope();
        assert_eq!(envelope.status_code, 500);
        let body = body(&envelope);
        assert_eq!(body["error"], "Internal server error");
        assert!(body["message"]
            .as_str()
            .unwrap()
            .contains("AccessDeniedException"));
    }

    #[test]
    fn test_error_envelope_carries_cors_headers() {
        let envelope = AppError::MethodNotAllowed.into_envelope();
        assert_eq!(envelope.headers["Access-Control-Allow-Origin"], "*");
        assert_eq!(envelope.headers["Content-Type"], "application/json");
    }
}
