//! ゲームイベントと配信先

use super::{
    entity::{Progress, Standing},
    value_object::{ConnectionId, GamePhase, PlayerName},
};

/// ゲームセッションが発行するイベント
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    GameState(GamePhase),
    Joined { name: PlayerName },
    UpdatePicks(Vec<PlayerName>),
    UserList(Vec<PlayerName>),
    GlobalLog { time: String, message: String },
    GameStarted,
    GameReset,
    GameFinished(Vec<Standing>),
    AdminUpdate(Progress),
    Error(String),
    ResultError(String),
}

/// イベントの配信先
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// 指定した接続のみ
    One(ConnectionId),
    /// 開いている全ての接続（join 済みかどうかは問わない）
    All,
}

/// コマンドが生成する配信指示
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outbound {
    pub target: Target,
    pub event: GameEvent,
}

impl Outbound {
    pub fn to(connection_id: &ConnectionId, event: GameEvent) -> Self {
        Self {
            target: Target::One(connection_id.clone()),
            event,
        }
    }

    pub fn all(event: GameEvent) -> Self {
        Self {
            target: Target::All,
            event,
        }
    }
}
