use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::projection::{MissingFieldError, UnexpectedShapeError};

/// Everything a request handler can fail with.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid or missing token")]
    Unauthorized,

    #[error("{0}")]
    BadRequest(String),

    #[error("sports data fetch failed: {0:#}")]
    Fetch(anyhow::Error),

    #[error("embedding failed: {0:#}")]
    Embedding(anyhow::Error),

    #[error("vector index query failed: {0:#}")]
    IndexQuery(anyhow::Error),

    #[error(transparent)]
    MissingField(#[from] MissingFieldError),

    #[error(transparent)]
    UnexpectedShape(#[from] UnexpectedShapeError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Fetch(_) | ApiError::Embedding(_) | ApiError::IndexQuery(_) => {
                StatusCode::BAD_GATEWAY
            }
            ApiError::MissingField(_) | ApiError::UnexpectedShape(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{self}");
        }
        let body = serde_json::json!({ "detail": self.to_string() });
        (status, Json(body)).into_response()
    }
}
