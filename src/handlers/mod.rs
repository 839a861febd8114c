//! HTTP handlers

use crate::AppError;

pub mod health;
pub mod domain;
pub mod shots;

/// Fallback for unknown routes
pub async fn not_found() -> AppError {
    AppError::NotFound("Not Found".to_string())
}
