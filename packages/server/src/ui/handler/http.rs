//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode};

use crate::{
    infrastructure::dto::{
        http::{GameSnapshotDto, ResultsDto},
        store::StoredParticipantRecord,
    },
    ui::state::AppState,
};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Current game snapshot (phase, connected participants and their picks)
pub async fn get_game(State(state): State<Arc<AppState>>) -> Json<GameSnapshotDto> {
    let game = state.game_service.snapshot().await;
    Json(GameSnapshotDto::from(&game))
}

/// Current tabulation of the pick log (does not finish the game)
pub async fn get_results(State(state): State<Arc<AppState>>) -> Json<ResultsDto> {
    let standings = state.game_service.standings().await;
    Json(standings.iter().map(Into::into).collect())
}

/// Debug endpoint returning the stored participant roster as persisted
pub async fn debug_store(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<StoredParticipantRecord>>, StatusCode> {
    match state.game_service.stored_participants().await {
        Ok(records) => Ok(Json(records.iter().map(Into::into).collect())),
        Err(e) => {
            tracing::error!("Failed to load stored participants: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
