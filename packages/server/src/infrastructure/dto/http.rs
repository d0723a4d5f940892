//! HTTP API response DTOs.

use serde::Serialize;

use super::websocket::StandingDto;

/// Current game snapshot returned by `GET /api/game`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshotDto {
    pub phase: String,
    pub max_picks: usize,
    pub participants: Vec<ParticipantDto>,
    pub total_picks: usize,
    pub users_done: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParticipantDto {
    pub name: String,
    pub picks: Vec<String>,
}

/// Response of `GET /api/results`
pub type ResultsDto = Vec<StandingDto>;
