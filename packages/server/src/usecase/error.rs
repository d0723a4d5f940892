//! UseCase 層のエラー型

use thiserror::Error;

use crate::domain::StoreError;

/// ゲームセッションのエラー
///
/// ルール違反はエラーにならない（無視されるかイベントとして通知される）。
/// ここに来るのは永続化の失敗のみで、呼び出し側では致命的なエラーとして扱う。
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to persist game state: {0}")]
    Persistence(#[from] StoreError),
}
