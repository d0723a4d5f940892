//! UseCase: コマンドの直列化と配信
//!
//! 全てのコマンド（接続・切断を含む）は 1 つの Mutex の下で順番に処理されます。
//! 状態の更新・永続化・イベントの配信までをロックを保持したまま行うため、
//! クライアントが受け取るイベントの順序はコマンドの処理順と一致します。

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domain::{
    ConnectionId, Game, GameCommand, MessagePusher, Outbound, PusherChannel, Standing,
    StoredParticipant, Target,
};

use super::{error::SessionError, game_session::GameSession};

/// ゲームサービス
pub struct GameService {
    /// ゲームセッション（唯一の状態の持ち主）
    session: Mutex<GameSession>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl GameService {
    /// 新しい GameService を作成
    pub fn new(session: GameSession, message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self {
            session: Mutex::new(session),
            message_pusher,
        }
    }

    /// 新しい接続を登録し、現在の状態を通知する
    pub async fn connect(&self, connection_id: ConnectionId, sender: PusherChannel) {
        let session = self.session.lock().await;
        self.message_pusher
            .register_client(connection_id.clone(), sender)
            .await;
        let outbound = session.connect(&connection_id);
        self.deliver(outbound).await;
    }

    /// 接続を解除し、参加者だった場合は残りの接続に通知する
    pub async fn disconnect(&self, connection_id: &ConnectionId) {
        let mut session = self.session.lock().await;
        self.message_pusher.unregister_client(connection_id).await;
        let outbound = session.disconnect(connection_id);
        self.deliver(outbound).await;
    }

    /// コマンドを実行し、結果のイベントを配信する
    ///
    /// # Errors
    ///
    /// 永続化に失敗した場合は `SessionError::Persistence` を返す（イベントは配信しない）
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        command: GameCommand,
    ) -> Result<(), SessionError> {
        let mut session = self.session.lock().await;
        tracing::debug!("Executing '{}' from '{}'", command.name(), connection_id);
        let outbound = session.handle(connection_id, command).await?;
        self.deliver(outbound).await;
        Ok(())
    }

    /// 現在のゲーム状態のスナップショット
    pub async fn snapshot(&self) -> Game {
        self.session.lock().await.game().clone()
    }

    /// 現在の pick ログの集計
    pub async fn standings(&self) -> Vec<Standing> {
        self.session.lock().await.standings()
    }

    /// 参加者ストアの内容
    pub async fn stored_participants(&self) -> Result<Vec<StoredParticipant>, SessionError> {
        let session = self.session.lock().await;
        Ok(session.stored_participants().await?)
    }

    async fn deliver(&self, outbound: Vec<Outbound>) {
        for Outbound { target, event } in outbound {
            let result = match &target {
                Target::One(connection_id) => {
                    self.message_pusher.push_to(connection_id, &event).await
                }
                Target::All => self.message_pusher.broadcast(&event).await,
            };
            // 1 つの接続への配信失敗でコマンド全体は失敗させない
            if let Err(e) = result {
                tracing::warn!("Failed to deliver {:?} to {:?}: {}", event, target, e);
            }
        }
    }
}
