//! Repository trait 定義
//!
//! ドメイン層が必要とする参加者ストアのインターフェースを定義します。
//! 具体的な実装（JSON ファイル、インメモリ）は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;

use super::{PlayerName, StoreError, StoredParticipant};

/// 参加者ストア trait
///
/// 名前をキーに、これまでに join した全参加者とその picks を永続化する。
/// 各操作は永続化が完了してから返る（バッチ処理なし）。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ParticipantStore: Send + Sync {
    /// 保存済みの全参加者を取得（ストアが存在しない場合は空）
    async fn load(&self) -> Result<Vec<StoredParticipant>, StoreError>;

    /// 名前に対応するレコードを取得し、存在しなければ空の picks で作成して永続化する
    async fn upsert_on_join(&self, name: &PlayerName) -> Result<StoredParticipant, StoreError>;

    /// 名前に対応するレコードの picks を上書きして永続化する（レコードがなければ何もしない）
    async fn update_picks(&self, name: &PlayerName, picks: &[PlayerName])
    -> Result<(), StoreError>;

    /// 全レコードを削除し、空のコレクションを永続化する
    async fn clear_all(&self) -> Result<(), StoreError>;
}
