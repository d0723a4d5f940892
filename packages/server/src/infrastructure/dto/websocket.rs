//! WebSocket frame DTOs.
//!
//! Inbound frames look like `{"command": "pickName", "data": "bob"}` and
//! outbound frames like `{"event": "updatePicks", "data": ["bob"]}`.
//! Commands and events without a payload omit `data`.

use serde::{Deserialize, Serialize};

/// Command frame sent by a client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", content = "data", rename_all = "camelCase")]
pub enum ClientCommand {
    JoinGame(String),
    StartGame,
    StopGame,
    PickName(String),
    CalculateResults,
    ResetGame,
}

/// Event frame sent to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ServerMessage {
    GameState(String),
    Joined(JoinedPayload),
    UpdatePicks(Vec<String>),
    UserList(Vec<String>),
    GlobalLog(GlobalLogPayload),
    GameStarted,
    GameReset,
    GameFinished(Vec<StandingDto>),
    AdminUpdate(AdminUpdatePayload),
    Error(String),
    ResultError(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinedPayload {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalLogPayload {
    pub time: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandingDto {
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUpdatePayload {
    pub total_picks: usize,
    pub users_done: usize,
}
