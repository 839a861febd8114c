//! Error handling

use axum::{
    response::{IntoResponse, Response},
    http::StatusCode,
    Json,
};
use serde_json::json;
use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    // Resource errors
    #[error("{0}")]
    NotFound(String),

    // Validation errors
    #[error("{0}")]
    ValidationError(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_client_error() {
            tracing::debug!("Request rejected ({}): {}", status.as_u16(), self);
        }

        let body = Json(json!({
            "error": self.to_string(),
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}

/// Failures building the application before it serves traffic
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid classification policy: {0}")]
    Policy(#[from] crate::detector::PolicyError),

    #[error("failed to build WHOIS client: {0}")]
    HttpClient(#[from] reqwest::Error),
}
