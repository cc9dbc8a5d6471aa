//! Error-to-response mapping at the handler boundary.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::error;

use atelier_core::attachment::AttachmentError;
use atelier_shared::AppError;

/// Result alias for route handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// Wrapper turning [`AppError`] into a JSON error response.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(e: AppError) -> Self {
        Self(e)
    }
}

impl From<AttachmentError> for ApiError {
    fn from(e: AttachmentError) -> Self {
        if e.is_rejected_input() {
            Self(AppError::Validation(e.to_string()))
        } else {
            Self(AppError::Storage(e.to_string()))
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            error!(error = %self.0, "request failed");
        }
        let body = Json(json!({
            "error": self.0.error_code(),
            "message": self.0.to_string(),
        }));
        (status, body).into_response()
    }
}

/// Shorthand for a 400 validation failure.
pub fn validation(message: impl Into<String>) -> ApiError {
    ApiError(AppError::Validation(message.into()))
}

/// Shorthand for a 404 on a missing resource.
pub fn not_found(resource: impl Into<String>) -> ApiError {
    ApiError(AppError::NotFound(resource.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let resp = ApiError(AppError::NotFound("script".into())).into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let resp = validation("title is required").into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = ApiError(AppError::Database("down".into())).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_rejected_attachment_input_is_400() {
        let err: ApiError = AttachmentError::EmptyFile("image".into()).into();
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
