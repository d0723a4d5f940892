//! ゲームセッションが受け付けるコマンド

use super::value_object::PlayerName;

/// 接続から転送される名前付きコマンド
///
/// `connect` / `disconnect` は接続のライフサイクルで表現されるため、ここには含まない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameCommand {
    JoinGame(PlayerName),
    StartGame,
    StopGame,
    PickName(PlayerName),
    CalculateResults,
    ResetGame,
}

impl GameCommand {
    /// ワイヤ上のコマンド名（ログ用）
    pub fn name(&self) -> &'static str {
        match self {
            GameCommand::JoinGame(_) => "joinGame",
            GameCommand::StartGame => "startGame",
            GameCommand::StopGame => "stopGame",
            GameCommand::PickName(_) => "pickName",
            GameCommand::CalculateResults => "calculateResults",
            GameCommand::ResetGame => "resetGame",
        }
    }
}
