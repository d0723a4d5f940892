//! JSON ファイル ParticipantStore 実装
//!
//! 参加者の一覧を 1 つの JSON 配列ファイルとして保存します。
//! 起動時にファイルを読み込み、以降は変更のたびにファイル全体を書き直します。
//!
//! ```text
//! JSON → StoredParticipantRecord (DTO) → StoredParticipant (ドメインモデル)
//! ```
//!
//! 書き込みは一時ファイルに書いてから rename するため、途中で落ちても
//! 前回の内容か今回の内容のどちらかが残ります。

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{
    domain::{ParticipantStore, PlayerName, Roster, StoreError, StoredParticipant},
    infrastructure::dto::store::StoredParticipantRecord,
};

/// JSON ファイル ParticipantStore 実装
#[derive(Debug)]
pub struct JsonFileParticipantStore {
    /// 保存先のファイルパス
    path: PathBuf,
    /// ファイル内容のキャッシュ（書き込み成功後にのみ更新）
    roster: Mutex<Roster>,
}

impl JsonFileParticipantStore {
    /// ファイルを読み込んで JsonFileParticipantStore を作成
    ///
    /// ファイルが存在しない場合は空のストアとして扱います（エラーにしない）。
    /// ファイルは存在するが読み込めない・パースできない場合はエラーを返します。
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let records = read_records(&path).await?;
        tracing::info!(
            "Loaded {} stored participant(s) from {}",
            records.len(),
            path.display()
        );

        Ok(Self {
            path,
            roster: Mutex::new(Roster::from_records(records)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// ロスター全体をファイルに書き出す
    async fn persist(&self, roster: &Roster) -> Result<(), StoreError> {
        let records: Vec<StoredParticipantRecord> =
            roster.records().iter().map(Into::into).collect();
        let json = serde_json::to_string_pretty(&records)?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }

        let tmp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, json).await?;
        tokio::fs::rename(&tmp_path, &self.path).await?;

        tracing::debug!(
            "Persisted {} participant(s) to {}",
            records.len(),
            self.path.display()
        );
        Ok(())
    }
}

async fn read_records(path: &Path) -> Result<Vec<StoredParticipant>, StoreError> {
    let text = match tokio::fs::read_to_string(path).await {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }

    let records: Vec<StoredParticipantRecord> = serde_json::from_str(&text)?;
    records
        .into_iter()
        .map(|r| StoredParticipant::try_from(r).map_err(StoreError::from))
        .collect()
}

#[async_trait]
impl ParticipantStore for JsonFileParticipantStore {
    async fn load(&self) -> Result<Vec<StoredParticipant>, StoreError> {
        let roster = self.roster.lock().await;
        Ok(roster.records().to_vec())
    }

    async fn upsert_on_join(&self, name: &PlayerName) -> Result<StoredParticipant, StoreError> {
        let mut roster = self.roster.lock().await;
        let mut next = roster.clone();
        let (record, created) = next.upsert(name);
        if created {
            self.persist(&next).await?;
            *roster = next;
            tracing::info!("Stored new participant '{}'", name);
        }
        Ok(record)
    }

    async fn update_picks(
        &self,
        name: &PlayerName,
        picks: &[PlayerName],
    ) -> Result<(), StoreError> {
        let mut roster = self.roster.lock().await;
        let mut next = roster.clone();
        if !next.update_picks(name, picks) {
            tracing::debug!("No stored participant named '{}', skipping update", name);
            return Ok(());
        }
        self.persist(&next).await?;
        *roster = next;
        Ok(())
    }

    async fn clear_all(&self) -> Result<(), StoreError> {
        let mut roster = self.roster.lock().await;
        let empty = Roster::new();
        self.persist(&empty).await?;
        *roster = empty;
        tracing::info!("Cleared all stored participants");
        Ok(())
    }
}
