use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum AdhanError {
    #[error("HTTP request error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    DatabaseError(#[from] SqlxError),

    #[error("Upstream error with status: {0}")]
    UpstreamStatus(StatusCode),

    #[error("Timings provider answered with code {0}")]
    UpstreamCode(i64),

    #[error("Timings missing from provider response")]
    MissingTimings,

    #[error("Stored settings are corrupt: {0}")]
    CorruptSettings(String),

    #[error("Push credentials are not configured")]
    PushNotConfigured,

    #[error("VAPID key pair is unusable: {0}")]
    InvalidVapidKey(String),

    #[error("Invalid push subscription: {0}")]
    InvalidSubscription(String),

    #[error("Push delivery failed: {0}")]
    PushDelivery(String),

    #[error("Ractor error: {0}")]
    RactorError(String),

    #[error("Location has not been set")]
    LocationNotSet,

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl IntoResponse for AdhanError {
    fn into_response(self) -> axum::response::Response {
        let (status, code, message) = match self {
            AdhanError::DatabaseError(_)
            | AdhanError::CorruptSettings(_)
            | AdhanError::RactorError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal server error occurred.".to_string(),
            ),
            AdhanError::Reqwest(_)
            | AdhanError::Json(_)
            | AdhanError::UpstreamStatus(_)
            | AdhanError::UpstreamCode(_)
            | AdhanError::MissingTimings => (
                StatusCode::BAD_GATEWAY,
                "BAD_GATEWAY",
                "Timings provider is unavailable.".to_string(),
            ),
            AdhanError::PushNotConfigured | AdhanError::InvalidVapidKey(_) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "PUSH_NOT_CONFIGURED",
                "Push notifications are not configured on this server.".to_string(),
            ),
            AdhanError::PushDelivery(_) => (
                StatusCode::BAD_GATEWAY,
                "PUSH_DELIVERY",
                "Push service rejected the notification.".to_string(),
            ),
            AdhanError::LocationNotSet => (
                StatusCode::CONFLICT,
                "LOCATION_NOT_SET",
                "Set a location first.".to_string(),
            ),
            AdhanError::InvalidSubscription(msg) => {
                (StatusCode::BAD_REQUEST, "INVALID_SUBSCRIPTION", msg)
            }
            AdhanError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, "INVALID_INPUT", msg),
        };
        let body = ApiErrorBody {
            code: code.to_string(),
            message,
        };
        (status, Json(ApiErrorResponse { error: body })).into_response()
    }
}

/// Standardized API error response body
#[derive(Serialize)]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}
