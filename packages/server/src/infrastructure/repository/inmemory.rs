//! InMemory ParticipantStore 実装
//!
//! ドメイン層が定義する ParticipantStore trait の具体的な実装。
//! `Roster` をそのままインメモリ DB として使用します。プロセスを再起動すると内容は失われます。

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ParticipantStore, PlayerName, Roster, StoreError, StoredParticipant};

/// インメモリ ParticipantStore 実装
#[derive(Debug, Default)]
pub struct InMemoryParticipantStore {
    roster: Mutex<Roster>,
}

impl InMemoryParticipantStore {
    /// 空の InMemoryParticipantStore を作成
    pub fn new() -> Self {
        Self::default()
    }

    /// 既存のレコードを持つ InMemoryParticipantStore を作成
    pub fn with_records(records: Vec<StoredParticipant>) -> Self {
        Self {
            roster: Mutex::new(Roster::from_records(records)),
        }
    }
}

#[async_trait]
impl ParticipantStore for InMemoryParticipantStore {
    async fn load(&self) -> Result<Vec<StoredParticipant>, StoreError> {
        let roster = self.roster.lock().await;
        Ok(roster.records().to_vec())
    }

    async fn upsert_on_join(&self, name: &PlayerName) -> Result<StoredParticipant, StoreError> {
        let mut roster = self.roster.lock().await;
        let (record, _created) = roster.upsert(name);
        Ok(record)
    }

    async fn update_picks(
        &self,
        name: &PlayerName,
        picks: &[PlayerName],
    ) -> Result<(), StoreError> {
        let mut roster = self.roster.lock().await;
        if !roster.update_picks(name, picks) {
            tracing::debug!("No stored participant named '{}', skipping update", name);
        }
        Ok(())
    }

    async fn clear_all(&self) -> Result<(), StoreError> {
        let mut roster = self.roster.lock().await;
        roster.clear();
        Ok(())
    }
}
