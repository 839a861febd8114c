//! Health check handler

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    allowed_domains: usize,
    shot_records: usize,
    timestamp: i64,
}

pub async fn check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        allowed_domains: state.classifier.policy().allow_list.len(),
        shot_records: state.shots.len(),
        timestamp: chrono::Utc::now().timestamp(),
    })
}
