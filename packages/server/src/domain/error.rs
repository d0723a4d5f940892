//! ドメインエラー

use thiserror::Error;

/// 値オブジェクトの生成エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    #[error("connection id must not be empty")]
    EmptyConnectionId,

    #[error("player name must not be blank")]
    BlankPlayerName,
}

/// ゲームのルールで pick が拒否される理由
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PickRejection {
    /// pick は STARTED の間だけ受け付ける
    #[error("game is not started")]
    NotStarted,

    /// join していない接続
    #[error("connection '{0}' has not joined")]
    UnknownConnection(String),

    /// picks がすでに上限に達している
    #[error("Max picks reached")]
    LimitReached,
}

/// `ParticipantStore` の永続化エラー
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("store serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("store contains an invalid record: {0}")]
    InvalidRecord(#[from] ValueObjectError),
}

/// `MessagePusher` の配信エラー
#[derive(Debug, Error)]
pub enum MessagePushError {
    #[error("client '{0}' not found")]
    ClientNotFound(String),

    #[error("failed to push message: {0}")]
    PushFailed(String),

    #[error("failed to encode message: {0}")]
    Encode(#[from] serde_json::Error),
}
