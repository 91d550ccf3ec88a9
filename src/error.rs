//! Error handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::scoring::attribution::AttributionError;
use crate::scoring::schema::InvalidFeature;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug)]
pub enum AppError {
    // Auth errors
    Unauthorized,

    // Client input errors
    InvalidFeatureValue(String),

    // Attribution errors (request-scoped; the predict path is unaffected)
    ExplanationFailed(String),

    // Generic errors
    InternalError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "Unauthorized: invalid or missing API token".to_string(),
            ),
            AppError::InvalidFeatureValue(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::ExplanationFailed(msg) => {
                tracing::error!("Explanation failed: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Explanation failed: {}", msg),
                )
            }
            AppError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}

impl From<InvalidFeature> for AppError {
    fn from(err: InvalidFeature) -> Self {
        AppError::InvalidFeatureValue(err.to_string())
    }
}

impl From<AttributionError> for AppError {
    fn from(err: AttributionError) -> Self {
        AppError::ExplanationFailed(err.to_string())
    }
}
