//! MessagePusher trait 定義
//!
//! ゲームイベントを接続中のクライアントへ届けるためのインターフェース。
//! 具体的な実装（WebSocket）は Infrastructure 層が提供します。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{ConnectionId, GameEvent, MessagePushError};

/// クライアントごとの送信チャンネル（エンコード済みのメッセージを流す）
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// メッセージ通知 trait
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// 接続を登録
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel);

    /// 接続の登録を解除
    async fn unregister_client(&self, connection_id: &ConnectionId);

    /// 特定の接続にイベントを送信
    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        event: &GameEvent,
    ) -> Result<(), MessagePushError>;

    /// 登録されている全ての接続にイベントを送信（一部の送信失敗は許容）
    async fn broadcast(&self, event: &GameEvent) -> Result<(), MessagePushError>;
}
