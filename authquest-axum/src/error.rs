use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use authquest_core::Error;

/// Wraps a core error so it can become an HTTP response.
///
/// Domain errors map to 400 (401 for session problems) with their own
/// message. Infrastructure errors map to 500 with a generic message; the
/// detail is logged and never sent to the client. A request body that fails
/// to deserialize maps to 400 with the deserializer's message, never to
/// axum's plain-text 422.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Auth(#[from] Error),

    #[error("{0}")]
    MalformedBody(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::MalformedBody(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::Auth(error) if error.is_infrastructure() => {
                tracing::error!(error = %error, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            ApiError::Auth(error) if error.is_unauthorized() => {
                (StatusCode::UNAUTHORIZED, error.to_string())
            }
            ApiError::Auth(error) => (StatusCode::BAD_REQUEST, error.to_string()),
        };

        let body = Json(json!({
            "success": false,
            "message": message,
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
