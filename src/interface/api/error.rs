//! Mapping of handler failures onto HTTP responses

use crate::domain::shared::DomainError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use thiserror::Error;
use tracing::{error, warn};

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Missing query parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Unauthorized")]
    Unauthorized,

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingParameter(_) | ApiError::Domain(DomainError::MissingParameter(_)) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Unauthorized | ApiError::Domain(DomainError::Unauthorized(_)) => {
                StatusCode::UNAUTHORIZED
            }
            ApiError::Domain(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Credential failures carry no body
        if status == StatusCode::UNAUTHORIZED {
            return status.into_response();
        }

        if status.is_server_error() {
            error!("Webhook failed: {}", self);
        } else {
            warn!("Rejected webhook: {}", self);
        }

        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}
