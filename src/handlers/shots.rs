//! Shot records handlers

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::models::Shot;
use crate::{AppError, AppResult, AppState};

/// List all shots
pub async fn list(State(state): State<AppState>) -> Json<Vec<Shot>> {
    Json(state.shots.all())
}

/// Shots for one player
pub async fn by_player(
    State(state): State<AppState>,
    Path(player_id): Path<String>,
) -> AppResult<Json<Vec<Shot>>> {
    let shots = state.shots.by_player(&player_id);
    if shots.is_empty() {
        return Err(AppError::NotFound("No shots found for this player".to_string()));
    }
    Ok(Json(shots))
}

/// Add a shot. The body is parsed by hand so every malformed payload is a 400.
pub async fn create(
    State(state): State<AppState>,
    body: Bytes,
) -> AppResult<(StatusCode, Json<Shot>)> {
    let shot: Shot = serde_json::from_slice(&body).map_err(|e| {
        tracing::debug!("Rejected shot body: {}", e);
        AppError::ValidationError("Invalid request body".to_string())
    })?;

    shot.validate().map_err(|e| {
        tracing::debug!("Rejected shot: {}", e);
        AppError::ValidationError("Invalid request body".to_string())
    })?;

    let shot = state.shots.insert(shot);
    tracing::info!("Shot {} recorded for player {}", shot.id, shot.player_id);

    Ok((StatusCode::CREATED, Json(shot)))
}
