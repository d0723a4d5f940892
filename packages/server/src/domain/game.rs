//! ゲームの状態機械
//!
//! 単一ゲームのメモリ上の状態（フェーズ、接続中の参加者、全体の pick ログ）のみを扱います。
//! 永続化とイベント発行は UseCase 層が担当します。

use super::{
    entity::{Participant, PickRecord, Progress, Standing},
    error::PickRejection,
    value_object::{ConnectionId, GamePhase, PlayerName},
};

/// 参加者 1 人あたりの pick 数のデフォルト
pub const DEFAULT_MAX_PICKS: usize = 3;

#[derive(Debug, Clone)]
pub struct Game {
    phase: GamePhase,
    /// 接続中の参加者（join 順）
    participants: Vec<Participant>,
    pick_log: Vec<PickRecord>,
    max_picks: usize,
}

impl Default for Game {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_PICKS)
    }
}

impl Game {
    pub fn new(max_picks: usize) -> Self {
        Self {
            phase: GamePhase::Waiting,
            participants: Vec::new(),
            pick_log: Vec::new(),
            max_picks,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn max_picks(&self) -> usize {
        self.max_picks
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn pick_log(&self) -> &[PickRecord] {
        &self.pick_log
    }

    /// 接続中の参加者名（join 順、重複はそのまま）
    pub fn connected_names(&self) -> Vec<PlayerName> {
        self.participants.iter().map(|p| p.name.clone()).collect()
    }

    pub fn find_participant(&self, connection_id: &ConnectionId) -> Option<&Participant> {
        self.participants
            .iter()
            .find(|p| &p.connection_id == connection_id)
    }

    /// 参加者を追加する（同じ接続での再 join はその位置で置き換える）
    pub fn add_participant(&mut self, participant: Participant) {
        match self
            .participants
            .iter_mut()
            .find(|p| p.connection_id == participant.connection_id)
        {
            Some(existing) => *existing = participant,
            None => self.participants.push(participant),
        }
    }

    pub fn remove_participant(&mut self, connection_id: &ConnectionId) -> Option<Participant> {
        let index = self
            .participants
            .iter()
            .position(|p| &p.connection_id == connection_id)?;
        Some(self.participants.remove(index))
    }

    /// STARTED にする（現在のフェーズで許されない場合は `false`）
    pub fn start(&mut self) -> bool {
        if !self.phase.can_start() {
            return false;
        }
        self.phase = GamePhase::Started;
        true
    }

    /// WAITING に戻す（参加者と picks はそのまま）
    pub fn pause(&mut self) -> bool {
        if !self.phase.can_pause() {
            return false;
        }
        self.phase = GamePhase::Waiting;
        true
    }

    /// `connection_id` が今 pick できるかを確認する
    ///
    /// 成功時は pick 後の picks を返す（状態は変更しない）
    pub fn check_pick(
        &self,
        connection_id: &ConnectionId,
        picked: &PlayerName,
    ) -> Result<(PlayerName, Vec<PlayerName>), PickRejection> {
        if self.phase != GamePhase::Started {
            return Err(PickRejection::NotStarted);
        }
        let participant = self
            .find_participant(connection_id)
            .ok_or_else(|| PickRejection::UnknownConnection(connection_id.to_string()))?;
        if participant.pick_count() >= self.max_picks {
            return Err(PickRejection::LimitReached);
        }

        let mut picks = participant.picks.clone();
        picks.push(picked.clone());
        Ok((participant.name.clone(), picks))
    }

    /// `check_pick` で受理された pick を反映する
    pub fn record_pick(
        &mut self,
        connection_id: &ConnectionId,
        picked: PlayerName,
    ) -> Result<&Participant, PickRejection> {
        self.check_pick(connection_id, &picked)?;
        let participant = self
            .participants
            .iter_mut()
            .find(|p| &p.connection_id == connection_id)
            .ok_or_else(|| PickRejection::UnknownConnection(connection_id.to_string()))?;

        participant.picks.push(picked.clone());
        self.pick_log.push(PickRecord {
            picker: participant.name.clone(),
            picked,
        });
        Ok(participant)
    }

    pub fn progress(&self) -> Progress {
        Progress {
            total_picks: self.pick_log.len(),
            users_done: self
                .participants
                .iter()
                .filter(|p| p.pick_count() >= self.max_picks)
                .count(),
        }
    }

    /// picks が上限に達していない参加者 `(名前, pick 数)`
    pub fn pending_participants(&self) -> Vec<(PlayerName, usize)> {
        self.participants
            .iter()
            .filter(|p| p.pick_count() < self.max_picks)
            .map(|p| (p.name.clone(), p.pick_count()))
            .collect()
    }

    /// 集計して FINISHED にする
    ///
    /// picks が揃っていない参加者がいる場合はその一覧を返し、フェーズは変更しない。
    pub fn finish(&mut self) -> Result<Vec<Standing>, Vec<(PlayerName, usize)>> {
        let pending = self.pending_participants();
        if !pending.is_empty() {
            return Err(pending);
        }
        self.phase = GamePhase::Finished;
        Ok(tabulate(&self.pick_log))
    }

    /// 参加者と pick ログを消して WAITING に戻す
    pub fn reset(&mut self) {
        self.participants.clear();
        self.pick_log.clear();
        self.phase = GamePhase::Waiting;
    }
}

/// pick された名前ごとに集計し、多い順に並べる
///
/// 同数の場合はログに最初に現れた順を保つ。
pub fn tabulate(pick_log: &[PickRecord]) -> Vec<Standing> {
    let mut standings: Vec<Standing> = Vec::new();
    for record in pick_log {
        match standings.iter_mut().find(|s| s.name == record.picked) {
            Some(standing) => standing.count += 1,
            None => standings.push(Standing {
                name: record.picked.clone(),
                count: 1,
            }),
        }
    }
    // sort_by は安定ソート
    standings.sort_by(|a, b| b.count.cmp(&a.count));
    standings
}
