//! エンティティ

use serde::Serialize;

use super::value_object::{ConnectionId, PlayerName};

/// 接続中の参加者（接続ごとに 1 つ）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Participant {
    pub connection_id: ConnectionId,
    pub name: PlayerName,
    /// これまでに pick した名前（pick 順）
    pub picks: Vec<PlayerName>,
}

impl Participant {
    pub fn new(connection_id: ConnectionId, name: PlayerName, picks: Vec<PlayerName>) -> Self {
        Self {
            connection_id,
            name,
            picks,
        }
    }

    pub fn pick_count(&self) -> usize {
        self.picks.len()
    }
}

/// 永続化される参加者レコード（名前がキー）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredParticipant {
    pub name: PlayerName,
    pub picks: Vec<PlayerName>,
}

impl StoredParticipant {
    pub fn new(name: PlayerName) -> Self {
        Self {
            name,
            picks: Vec::new(),
        }
    }
}

/// 成功した pick 1 件（全体の pick ログに追記される）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PickRecord {
    pub picker: PlayerName,
    pub picked: PlayerName,
}

/// 名前ごとの集計結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Standing {
    pub name: PlayerName,
    pub count: usize,
}

/// 管理画面向けの進捗
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub total_picks: usize,
    pub users_done: usize,
}

/// 保存済み参加者のコレクション（追加順）
///
/// 全ての `ParticipantStore` 実装が共有する upsert / update / clear のルールを持つ。
/// 名前は Roster 内で一意。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    records: Vec<StoredParticipant>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// 読み込んだレコードから作成する（同じ名前の 2 件目以降は捨てる）
    pub fn from_records(records: Vec<StoredParticipant>) -> Self {
        let mut roster = Self::new();
        for record in records {
            if roster.find(&record.name).is_none() {
                roster.records.push(record);
            }
        }
        roster
    }

    pub fn records(&self) -> &[StoredParticipant] {
        &self.records
    }

    pub fn find(&self, name: &PlayerName) -> Option<&StoredParticipant> {
        self.records.iter().find(|r| &r.name == name)
    }

    /// `name` のレコードを返し、なければ空の picks で作成する
    ///
    /// 作成した場合はフラグが `true`（呼び出し側で永続化すること）
    pub fn upsert(&mut self, name: &PlayerName) -> (StoredParticipant, bool) {
        if let Some(existing) = self.find(name) {
            return (existing.clone(), false);
        }
        let record = StoredParticipant::new(name.clone());
        self.records.push(record.clone());
        (record, true)
    }

    /// `name` の picks を上書きする（レコードがなければ `false`）
    pub fn update_picks(&mut self, name: &PlayerName, picks: &[PlayerName]) -> bool {
        match self.records.iter_mut().find(|r| &r.name == name) {
            Some(record) => {
                record.picks = picks.to_vec();
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
