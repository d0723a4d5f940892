//! Server state shared by the handlers.

use std::sync::Arc;

use crate::usecase::GameService;

use super::signal::FatalSignal;

/// Shared application state
pub struct AppState {
    /// GameService（コマンドの直列化と配信）
    pub game_service: Arc<GameService>,
    /// 致命的なエラーでサーバーを停止させるためのシグナル
    pub fatal: FatalSignal,
}
