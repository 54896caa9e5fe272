use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Request-level failures surfaced to the webhook caller.
#[derive(Debug, Error)]
pub enum WebhookError {
    #[error("invalid update payload: {0}")]
    MalformedInput(#[from] serde_json::Error),
    #[error("unreadable request body: {0}")]
    UnreadableBody(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for WebhookError {
    fn into_response(self) -> Response {
        let status = match self {
            WebhookError::MalformedInput(_) | WebhookError::UnreadableBody(_) => {
                StatusCode::BAD_REQUEST
            }
        };
        (
            status,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
