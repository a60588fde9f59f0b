use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::favorites::FavoritesError;
use crate::upstream::UpstreamError;

/// Every failure a handler can answer with, rendered as `{"error": "..."}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{message}")]
    Upstream { status: StatusCode, message: String },

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// Logs an upstream failure and maps it to a generic `message`. When
    /// `propagate_status` is set and the upstream answered with an error
    /// status, that status is forwarded instead of 500.
    pub fn upstream(message: &str, err: UpstreamError, propagate_status: bool) -> Self {
        let upstream_status = err.status();
        match &err {
            UpstreamError::Status { status, body } => {
                error!("{}: upstream status {}: {}", message, status, body)
            }
            other => error!("{}: {}", message, other),
        }

        let status = match upstream_status {
            Some(s) if propagate_status && (s.is_client_error() || s.is_server_error()) => s,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        ApiError::Upstream {
            status,
            message: message.to_string(),
        }
    }

    /// Maps a favorites store failure; storage problems become `message`.
    pub fn favorites(message: &str, err: FavoritesError) -> Self {
        match err {
            FavoritesError::MissingId => ApiError::BadRequest(err.to_string()),
            FavoritesError::NotFound(_) => ApiError::NotFound(err.to_string()),
            FavoritesError::Storage(e) => {
                error!("{}: {:#}", message, e);
                ApiError::Internal(message.to_string())
            }
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Upstream { status, .. } => *status,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
