//! UseCase: ゲームセッション
//!
//! 接続中の参加者・フェーズ・pick ログを持つ `Game` と、参加者ストアを束ねて
//! コマンドを処理します。ネットワーク I/O は行わず、各コマンドは
//! 「誰に何を送るか」（`Outbound`）のリストを返します。
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - 各コマンドの状態遷移と、返される送信指示（対象・順序・内容）
//! - 永続化の呼び出し回数（mockall）と、永続化失敗時に状態が変わらないこと
//!
//! ### どのような状況を想定しているか
//! - 正常系：join → start → pick → calculateResults
//! - 異常系：開始前の pick、上限超過の pick、picks 未完了での結果計算
//! - エッジケース：切断 → 同名で再 join（picks の復元）、reset 後の再 join

use std::sync::Arc;

use namepick_shared::time::{Clock, SystemClock, timestamp_to_local_time};

use crate::domain::{
    ConnectionId, Game, GameCommand, GameEvent, Outbound, Participant, ParticipantStore,
    PickRejection, PlayerName, Standing, StoreError, StoredParticipant, tabulate,
};

/// ゲームセッション
pub struct GameSession {
    /// ゲームの状態（フェーズ、接続中の参加者、pick ログ）
    game: Game,
    /// 参加者ストア（永続化の抽象化）
    store: Arc<dyn ParticipantStore>,
    /// ログの時刻表示に使う時計
    clock: Arc<dyn Clock>,
}

impl GameSession {
    /// 新しい GameSession を作成
    pub fn new(store: Arc<dyn ParticipantStore>, max_picks: usize) -> Self {
        Self::with_clock(store, Arc::new(SystemClock), max_picks)
    }

    /// 時計を指定して GameSession を作成
    pub fn with_clock(
        store: Arc<dyn ParticipantStore>,
        clock: Arc<dyn Clock>,
        max_picks: usize,
    ) -> Self {
        Self {
            game: Game::new(max_picks),
            store,
            clock,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// 現在の pick ログの集計（フェーズは変更しない）
    pub fn standings(&self) -> Vec<Standing> {
        tabulate(self.game.pick_log())
    }

    /// 参加者ストアの内容
    pub async fn stored_participants(&self) -> Result<Vec<StoredParticipant>, StoreError> {
        self.store.load().await
    }

    /// コマンドを処理する
    pub async fn handle(
        &mut self,
        connection_id: &ConnectionId,
        command: GameCommand,
    ) -> Result<Vec<Outbound>, StoreError> {
        match command {
            GameCommand::JoinGame(name) => self.join(connection_id, name).await,
            GameCommand::StartGame => Ok(self.start_game()),
            GameCommand::StopGame => Ok(self.stop_game()),
            GameCommand::PickName(picked) => self.pick(connection_id, picked).await,
            GameCommand::CalculateResults => Ok(self.calculate_results()),
            GameCommand::ResetGame => self.reset_game().await,
        }
    }

    /// 新しい接続: 現在のフェーズを本人に、参加者リストを全員に送る
    pub fn connect(&self, connection_id: &ConnectionId) -> Vec<Outbound> {
        vec![
            Outbound::to(connection_id, self.game_state()),
            self.user_list(),
        ]
    }

    /// 切断: 参加していた接続であれば参加者リストを全員に送る
    pub fn disconnect(&mut self, connection_id: &ConnectionId) -> Vec<Outbound> {
        match self.game.remove_participant(connection_id) {
            Some(participant) => {
                tracing::info!(
                    "Participant '{}' ({}) left the game",
                    participant.name,
                    connection_id
                );
                vec![self.user_list()]
            }
            None => Vec::new(),
        }
    }

    /// 参加: 保存済みの picks を引き継いで接続中の参加者に追加する
    pub async fn join(
        &mut self,
        connection_id: &ConnectionId,
        name: PlayerName,
    ) -> Result<Vec<Outbound>, StoreError> {
        let stored = self.store.upsert_on_join(&name).await?;
        let mut picks = stored.picks;
        // 以前の実行でより大きな上限が使われていた場合は上限までに切り詰める
        if picks.len() > self.game.max_picks() {
            tracing::warn!(
                "'{}' has {} stored pick(s); keeping the first {}",
                name,
                picks.len(),
                self.game.max_picks()
            );
            picks.truncate(self.game.max_picks());
        }
        self.game.add_participant(Participant::new(
            connection_id.clone(),
            name.clone(),
            picks.clone(),
        ));
        tracing::info!(
            "Participant '{}' ({}) joined with {} pick(s)",
            name,
            connection_id,
            picks.len()
        );

        let mut outbound = vec![
            Outbound::to(connection_id, GameEvent::Joined { name: name.clone() }),
            Outbound::to(connection_id, self.game_state()),
        ];
        if !picks.is_empty() {
            outbound.push(Outbound::to(connection_id, GameEvent::UpdatePicks(picks)));
        }
        outbound.push(self.log(format!("{} has joined the game", name)));
        outbound.push(self.user_list());
        Ok(outbound)
    }

    /// ゲーム開始（開始済みでも再送する）
    pub fn start_game(&mut self) -> Vec<Outbound> {
        if !self.game.start() {
            tracing::warn!("startGame ignored in phase {}", self.game.phase());
            return Vec::new();
        }
        tracing::info!("Game started");
        vec![
            self.log("🎮 Game has started! Pick your names now"),
            Outbound::all(GameEvent::GameStarted),
            Outbound::all(self.game_state()),
        ]
    }

    /// 一時停止（参加者と picks はそのまま）
    pub fn stop_game(&mut self) -> Vec<Outbound> {
        if !self.game.pause() {
            tracing::warn!("stopGame ignored in phase {}", self.game.phase());
            return Vec::new();
        }
        tracing::info!("Game paused");
        vec![
            self.log("⏸️ Game has been paused"),
            Outbound::all(self.game_state()),
        ]
    }

    /// pick: 永続化が成功してからメモリ上の状態を更新する
    pub async fn pick(
        &mut self,
        connection_id: &ConnectionId,
        picked: PlayerName,
    ) -> Result<Vec<Outbound>, StoreError> {
        let (picker, picks) = match self.game.check_pick(connection_id, &picked) {
            Ok(accepted) => accepted,
            Err(PickRejection::LimitReached) => {
                tracing::debug!("Connection '{}' already reached max picks", connection_id);
                return Ok(vec![Outbound::to(
                    connection_id,
                    GameEvent::Error(PickRejection::LimitReached.to_string()),
                )]);
            }
            Err(rejection) => {
                tracing::debug!("pickName from '{}' ignored: {}", connection_id, rejection);
                return Ok(Vec::new());
            }
        };

        self.store.update_picks(&picker, &picks).await?;
        if let Err(rejection) = self.game.record_pick(connection_id, picked.clone()) {
            tracing::warn!("pickName from '{}' dropped: {}", connection_id, rejection);
            return Ok(Vec::new());
        }
        tracing::info!("'{}' picked '{}'", picker, picked);

        Ok(vec![
            Outbound::to(connection_id, GameEvent::UpdatePicks(picks)),
            self.log(format!("{} picked {}", picker, picked)),
            Outbound::all(GameEvent::AdminUpdate(self.game.progress())),
        ])
    }

    /// 結果計算: 全員の picks が揃っていれば集計して FINISHED にする
    ///
    /// picks が揃っていない参加者がいればフェーズに関係なく resultError を送る。
    /// FINISHED への遷移は STARTED の間だけ。
    pub fn calculate_results(&mut self) -> Vec<Outbound> {
        if !self.game.phase().can_finish() {
            let pending = self.game.pending_participants();
            if pending.is_empty() {
                tracing::warn!("calculateResults ignored in phase {}", self.game.phase());
                return Vec::new();
            }
            return vec![self.result_error(&pending)];
        }

        match self.game.finish() {
            Ok(standings) => {
                tracing::info!("Results calculated for {} name(s)", standings.len());
                vec![
                    self.log("🏆 Results are ready!"),
                    Outbound::all(GameEvent::GameFinished(standings)),
                    Outbound::all(self.game_state()),
                ]
            }
            Err(pending) => vec![self.result_error(&pending)],
        }
    }

    /// リセット: ストアを空にしてから、参加者・pick ログを消して WAITING に戻す
    pub async fn reset_game(&mut self) -> Result<Vec<Outbound>, StoreError> {
        self.store.clear_all().await?;
        self.game.reset();
        tracing::info!("Game reset");
        Ok(vec![
            Outbound::all(GameEvent::GameReset),
            Outbound::all(self.game_state()),
        ])
    }

    fn result_error(&self, pending: &[(PlayerName, usize)]) -> Outbound {
        let max_picks = self.game.max_picks();
        let pending = pending
            .iter()
            .map(|(name, count)| format!("{} ({}/{})", name, count, max_picks))
            .collect::<Vec<_>>()
            .join(", ");
        tracing::info!("Results requested while pending: {}", pending);
        Outbound::all(GameEvent::ResultError(format!(
            "Not all users have picked {} names. Pending: {}",
            max_picks, pending
        )))
    }

    fn game_state(&self) -> GameEvent {
        GameEvent::GameState(self.game.phase())
    }

    fn user_list(&self) -> Outbound {
        Outbound::all(GameEvent::UserList(self.game.connected_names()))
    }

    fn log(&self, message: impl Into<String>) -> Outbound {
        Outbound::all(GameEvent::GlobalLog {
            time: timestamp_to_local_time(self.clock.now_millis()),
            message: message.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{GamePhase, MockParticipantStore, Progress, Target},
        infrastructure::repository::InMemoryParticipantStore,
    };
    use namepick_shared::time::FixedClock;

    const NOW: i64 = 1_700_000_000_000;

    fn name(s: &str) -> PlayerName {
        PlayerName::new(s.to_string()).unwrap()
    }

    fn names(list: &[&str]) -> Vec<PlayerName> {
        list.iter().map(|s| name(s)).collect()
    }

    fn conn(s: &str) -> ConnectionId {
        ConnectionId::new(s.to_string()).unwrap()
    }

    fn create_session_with_store(store: Arc<dyn ParticipantStore>) -> GameSession {
        GameSession::with_clock(store, Arc::new(FixedClock::new(NOW)), 3)
    }

    fn create_session() -> (GameSession, Arc<InMemoryParticipantStore>) {
        let store = Arc::new(InMemoryParticipantStore::new());
        (create_session_with_store(store.clone()), store)
    }

    fn log_event(message: &str) -> GameEvent {
        GameEvent::GlobalLog {
            time: timestamp_to_local_time(NOW),
            message: message.to_string(),
        }
    }

    /// 送信指示からイベントだけを取り出す
    fn events(outbound: &[Outbound]) -> Vec<GameEvent> {
        outbound.iter().map(|o| o.event.clone()).collect()
    }

    async fn join(session: &mut GameSession, id: &str, player: &str) -> Vec<Outbound> {
        session.join(&conn(id), name(player)).await.unwrap()
    }

    async fn pick(session: &mut GameSession, id: &str, target: &str) -> Vec<Outbound> {
        session.pick(&conn(id), name(target)).await.unwrap()
    }

    #[tokio::test]
    async fn test_connect_sends_phase_to_newcomer_and_user_list_to_all() {
        // テスト項目: 接続時に本人へフェーズ、全員へ参加者リストが送られる
        // given (前提条件):
        let (mut session, _store) = create_session();
        join(&mut session, "c1", "alice").await;

        // when (操作):
        let outbound = session.connect(&conn("c2"));

        // then (期待する結果):
        assert_eq!(
            outbound,
            vec![
                Outbound::to(&conn("c2"), GameEvent::GameState(GamePhase::Waiting)),
                Outbound::all(GameEvent::UserList(names(&["alice"]))),
            ]
        );
    }

    #[tokio::test]
    async fn test_join_new_participant() {
        // テスト項目: 新規参加者の join で joined / gameState / ログ / 参加者リストが送られる
        // given (前提条件):
        let (mut session, store) = create_session();

        // when (操作):
        let outbound = join(&mut session, "c1", "alice").await;

        // then (期待する結果): picks が空なので updatePicks は送られない
        assert_eq!(
            outbound,
            vec![
                Outbound::to(&conn("c1"), GameEvent::Joined { name: name("alice") }),
                Outbound::to(&conn("c1"), GameEvent::GameState(GamePhase::Waiting)),
                Outbound::all(log_event("alice has joined the game")),
                Outbound::all(GameEvent::UserList(names(&["alice"]))),
            ]
        );
        assert_eq!(store.load().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_user_list_tracks_joins_and_disconnects_in_order() {
        // テスト項目: 参加者リストは常に接続中の名前を join 順に持つ
        // given (前提条件):
        let (mut session, _store) = create_session();
        join(&mut session, "c1", "carol").await;
        join(&mut session, "c2", "alice").await;
        join(&mut session, "c3", "bob").await;

        // when (操作):
        let outbound = session.disconnect(&conn("c2"));

        // then (期待する結果):
        assert_eq!(
            outbound,
            vec![Outbound::all(GameEvent::UserList(names(&["carol", "bob"])))]
        );

        let outbound = join(&mut session, "c4", "alice").await;
        assert_eq!(
            outbound.last(),
            Some(&Outbound::all(GameEvent::UserList(names(&[
                "carol", "bob", "alice"
            ]))))
        );
    }

    #[tokio::test]
    async fn test_disconnect_unknown_connection_emits_nothing() {
        // テスト項目: join していない接続の切断では何も送られない
        // given (前提条件):
        let (mut session, _store) = create_session();

        // when (操作):
        let outbound = session.disconnect(&conn("c1"));

        // then (期待する結果):
        assert!(outbound.is_empty());
    }

    #[tokio::test]
    async fn test_start_and_stop_game() {
        // テスト項目: start / stop でフェーズが変わり、全員に通知される
        // given (前提条件):
        let (mut session, _store) = create_session();

        // when (操作):
        let started = session.start_game();
        let started_again = session.start_game();
        let stopped = session.stop_game();

        // then (期待する結果):
        assert_eq!(
            events(&started),
            vec![
                log_event("🎮 Game has started! Pick your names now"),
                GameEvent::GameStarted,
                GameEvent::GameState(GamePhase::Started),
            ]
        );
        assert_eq!(started, started_again);
        assert_eq!(
            events(&stopped),
            vec![
                log_event("⏸️ Game has been paused"),
                GameEvent::GameState(GamePhase::Waiting),
            ]
        );
        assert!(started.iter().all(|o| o.target == Target::All));
        assert_eq!(session.game().phase(), GamePhase::Waiting);
    }

    #[tokio::test]
    async fn test_pick_success() {
        // テスト項目: pick で本人に picks、全員にログと進捗が送られる
        // given (前提条件):
        let (mut session, store) = create_session();
        join(&mut session, "c1", "alice").await;
        join(&mut session, "c2", "bob").await;
        session.start_game();

        // when (操作):
        let outbound = pick(&mut session, "c1", "bob").await;

        // then (期待する結果):
        assert_eq!(
            outbound,
            vec![
                Outbound::to(&conn("c1"), GameEvent::UpdatePicks(names(&["bob"]))),
                Outbound::all(log_event("alice picked bob")),
                Outbound::all(GameEvent::AdminUpdate(Progress {
                    total_picks: 1,
                    users_done: 0
                })),
            ]
        );
        let stored = store.load().await.unwrap();
        assert_eq!(stored[0].picks, names(&["bob"]));
    }

    #[tokio::test]
    async fn test_fourth_pick_yields_error_and_keeps_picks() {
        // テスト項目: 4 回目の pick はエラーイベントになり、picks は変わらない
        // given (前提条件):
        let (mut session, _store) = create_session();
        join(&mut session, "c1", "alice").await;
        session.start_game();
        for target in ["bob", "carol", "dave"] {
            pick(&mut session, "c1", target).await;
        }

        // when (操作):
        let outbound = pick(&mut session, "c1", "erin").await;

        // then (期待する結果):
        assert_eq!(
            outbound,
            vec![Outbound::to(
                &conn("c1"),
                GameEvent::Error("Max picks reached".to_string())
            )]
        );
        let participant = session.game().find_participant(&conn("c1")).unwrap();
        assert_eq!(participant.picks, names(&["bob", "carol", "dave"]));
        assert_eq!(session.game().pick_log().len(), 3);
    }

    #[tokio::test]
    async fn test_pick_outside_started_has_no_effect() {
        // テスト項目: STARTED 以外での pick はイベントもログも永続化も発生しない
        // given (前提条件):
        let mut store = MockParticipantStore::new();
        store
            .expect_upsert_on_join()
            .returning(|n| Ok(StoredParticipant::new(n.clone())));
        store.expect_update_picks().times(0);
        let mut session = create_session_with_store(Arc::new(store));
        join(&mut session, "c1", "alice").await;

        // when (操作): WAITING 中と、一時停止中
        let while_waiting = pick(&mut session, "c1", "bob").await;
        session.start_game();
        session.stop_game();
        let while_paused = pick(&mut session, "c1", "bob").await;

        // then (期待する結果):
        assert!(while_waiting.is_empty());
        assert!(while_paused.is_empty());
        assert!(session.game().pick_log().is_empty());
    }

    #[tokio::test]
    async fn test_pick_from_unknown_connection_is_silent() {
        // テスト項目: join していない接続からの pick は無視される
        // given (前提条件):
        let (mut session, _store) = create_session();
        session.start_game();

        // when (操作):
        let outbound = pick(&mut session, "ghost", "bob").await;

        // then (期待する結果):
        assert!(outbound.is_empty());
        assert!(session.game().pick_log().is_empty());
    }

    #[tokio::test]
    async fn test_pick_persist_failure_leaves_state_unchanged() {
        // テスト項目: 永続化に失敗した pick はエラーを返し、メモリ上の状態も変わらない
        // given (前提条件):
        let mut store = MockParticipantStore::new();
        store
            .expect_upsert_on_join()
            .returning(|n| Ok(StoredParticipant::new(n.clone())));
        store.expect_update_picks().times(1).returning(|_, _| {
            Err(StoreError::Io(std::io::Error::other("disk full")))
        });
        let mut session = create_session_with_store(Arc::new(store));
        join(&mut session, "c1", "alice").await;
        session.start_game();

        // when (操作):
        let result = session.pick(&conn("c1"), name("bob")).await;

        // then (期待する結果):
        assert!(matches!(result, Err(StoreError::Io(_))));
        assert!(session.game().pick_log().is_empty());
        assert!(
            session
                .game()
                .find_participant(&conn("c1"))
                .unwrap()
                .picks
                .is_empty()
        );
    }

    #[tokio::test]
    async fn test_each_pick_writes_once() {
        // テスト項目: 成功した pick 1 回につき 1 回だけ永続化される
        // given (前提条件):
        let mut store = MockParticipantStore::new();
        store
            .expect_upsert_on_join()
            .times(1)
            .returning(|n| Ok(StoredParticipant::new(n.clone())));
        store
            .expect_update_picks()
            .withf(|n, picks| n.as_str() == "alice" && !picks.is_empty())
            .times(3)
            .returning(|_, _| Ok(()));
        let mut session = create_session_with_store(Arc::new(store));
        join(&mut session, "c1", "alice").await;
        session.start_game();

        // when (操作): 上限を超える 4 回目は永続化されない
        for target in ["bob", "carol", "dave", "erin"] {
            pick(&mut session, "c1", target).await;
        }

        // then (期待する結果): times の検証は drop 時に行われる
        assert_eq!(session.game().pick_log().len(), 3);
    }

    #[tokio::test]
    async fn test_rejoin_restores_persisted_picks() {
        // テスト項目: 切断後に同じ名前で再 join すると picks が復元される
        // given (前提条件):
        let (mut session, _store) = create_session();
        join(&mut session, "c1", "alice").await;
        session.start_game();
        pick(&mut session, "c1", "bob").await;
        let last_picks = pick(&mut session, "c1", "carol").await;
        session.disconnect(&conn("c1"));

        // when (操作): 新しい接続 ID で再 join
        let outbound = join(&mut session, "c2", "alice").await;

        // then (期待する結果):
        let restored = Outbound::to(&conn("c2"), GameEvent::UpdatePicks(names(&["bob", "carol"])));
        assert!(outbound.contains(&restored));
        assert_eq!(last_picks[0].event, restored.event);
        assert_eq!(
            outbound[1],
            Outbound::to(&conn("c2"), GameEvent::GameState(GamePhase::Started))
        );
    }

    #[tokio::test]
    async fn test_rejoin_with_lower_max_picks_truncates_restored_picks() {
        // テスト項目: 保存済みの picks が現在の上限を超えている場合、上限までに切り詰めて復元される
        // given (前提条件): 上限 3 のセッションで 3 件 pick 済み
        let store = Arc::new(InMemoryParticipantStore::new());
        let mut previous = create_session_with_store(store.clone());
        join(&mut previous, "c1", "alice").await;
        previous.start_game();
        for target in ["a", "b", "c"] {
            pick(&mut previous, "c1", target).await;
        }
        let mut session = GameSession::with_clock(store, Arc::new(FixedClock::new(NOW)), 2);
        join(&mut session, "c0", "bob").await;
        session.start_game();

        // when (操作): 上限 2 のセッションに再 join
        let outbound = join(&mut session, "c2", "alice").await;

        // then (期待する結果):
        let alice = session.game().find_participant(&conn("c2")).unwrap();
        assert_eq!(alice.picks, names(&["a", "b"]));
        assert!(outbound.contains(&Outbound::to(
            &conn("c2"),
            GameEvent::UpdatePicks(names(&["a", "b"]))
        )));
        assert_eq!(
            session.game().progress(),
            Progress {
                total_picks: 0,
                users_done: 1
            }
        );
        let extra = pick(&mut session, "c2", "d").await;
        assert_eq!(
            extra,
            vec![Outbound::to(
                &conn("c2"),
                GameEvent::Error("Max picks reached".to_string())
            )]
        );
    }

    #[tokio::test]
    async fn test_calculate_results_with_pending_participant() {
        // テスト項目: picks 数 {3,3,2} で結果計算すると 2 の参加者を挙げた resultError になり、フェーズは STARTED のまま
        // given (前提条件):
        let (mut session, _store) = create_session();
        join(&mut session, "c1", "A").await;
        join(&mut session, "c2", "B").await;
        join(&mut session, "c3", "C").await;
        session.start_game();
        for target in ["B", "C", "B"] {
            pick(&mut session, "c1", target).await;
        }
        for target in ["A", "C", "A"] {
            pick(&mut session, "c2", target).await;
        }
        pick(&mut session, "c3", "A").await;
        pick(&mut session, "c3", "B").await;

        // when (操作):
        let outbound = session.calculate_results();

        // then (期待する結果):
        assert_eq!(
            outbound,
            vec![Outbound::all(GameEvent::ResultError(
                "Not all users have picked 3 names. Pending: C (2/3)".to_string()
            ))]
        );
        assert_eq!(session.game().phase(), GamePhase::Started);
    }

    #[tokio::test]
    async fn test_calculate_results_success() {
        // テスト項目: 全員の picks が揃うと集計結果が送られ FINISHED になる
        // given (前提条件):
        let (mut session, _store) = create_session();
        join(&mut session, "c1", "A").await;
        join(&mut session, "c2", "B").await;
        session.start_game();
        for target in ["X", "Y", "Z"] {
            pick(&mut session, "c1", target).await;
        }
        for target in ["Y", "X", "W"] {
            pick(&mut session, "c2", target).await;
        }

        // when (操作):
        let outbound = session.calculate_results();

        // then (期待する結果): X と Y は同数で、先に現れた X が先
        let standing = |n: &str, count| Standing {
            name: name(n),
            count,
        };
        assert_eq!(
            events(&outbound),
            vec![
                log_event("🏆 Results are ready!"),
                GameEvent::GameFinished(vec![
                    standing("X", 2),
                    standing("Y", 2),
                    standing("Z", 1),
                    standing("W", 1),
                ]),
                GameEvent::GameState(GamePhase::Finished),
            ]
        );
        assert_eq!(session.game().phase(), GamePhase::Finished);
        assert!(session.start_game().is_empty());
    }

    #[tokio::test]
    async fn test_calculate_results_outside_started_is_ignored() {
        // テスト項目: STARTED 以外で picks 待ちの参加者がいなければ結果計算は無視される
        // given (前提条件):
        let (mut session, _store) = create_session();

        // when (操作):
        let outbound = session.calculate_results();

        // then (期待する結果):
        assert!(outbound.is_empty());
        assert_eq!(session.game().phase(), GamePhase::Waiting);
    }

    #[tokio::test]
    async fn test_calculate_results_while_paused_reports_pending() {
        // テスト項目: 一時停止中でも picks 待ちの参加者がいれば resultError が送られ、フェーズは WAITING のまま
        // given (前提条件):
        let (mut session, _store) = create_session();
        join(&mut session, "c1", "alice").await;
        join(&mut session, "c2", "bob").await;
        session.start_game();
        pick(&mut session, "c1", "bob").await;
        session.stop_game();

        // when (操作):
        let outbound = session.calculate_results();

        // then (期待する結果):
        assert_eq!(
            outbound,
            vec![Outbound::all(GameEvent::ResultError(
                "Not all users have picked 3 names. Pending: alice (1/3), bob (0/3)".to_string()
            ))]
        );
        assert_eq!(session.game().phase(), GamePhase::Waiting);
    }

    #[tokio::test]
    async fn test_calculate_results_while_paused_and_complete_does_not_finish() {
        // テスト項目: 一時停止中に全員の picks が揃っていても FINISHED にはならない
        // given (前提条件):
        let (mut session, _store) = create_session();
        join(&mut session, "c1", "alice").await;
        session.start_game();
        for target in ["a", "b", "c"] {
            pick(&mut session, "c1", target).await;
        }
        session.stop_game();

        // when (操作):
        let outbound = session.calculate_results();

        // then (期待する結果):
        assert!(outbound.is_empty());
        assert_eq!(session.game().phase(), GamePhase::Waiting);
    }

    #[tokio::test]
    async fn test_reset_clears_everything() {
        // テスト項目: reset で参加者・ストア・ログが消え、同じ名前での再 join は空の picks から始まる
        // given (前提条件):
        let (mut session, store) = create_session();
        join(&mut session, "c1", "alice").await;
        session.start_game();
        pick(&mut session, "c1", "bob").await;

        // when (操作):
        let outbound = session.reset_game().await.unwrap();

        // then (期待する結果):
        assert_eq!(
            events(&outbound),
            vec![
                GameEvent::GameReset,
                GameEvent::GameState(GamePhase::Waiting)
            ]
        );
        assert!(session.game().participants().is_empty());
        assert!(session.game().pick_log().is_empty());
        assert!(store.load().await.unwrap().is_empty());

        let rejoin = join(&mut session, "c1", "alice").await;
        assert!(
            !rejoin
                .iter()
                .any(|o| matches!(o.event, GameEvent::UpdatePicks(_)))
        );
        assert!(
            session
                .game()
                .find_participant(&conn("c1"))
                .unwrap()
                .picks
                .is_empty()
        );
    }

    #[tokio::test]
    async fn test_stop_then_start_preserves_picks() {
        // テスト項目: 一時停止と再開で全員の picks が保持される
        // given (前提条件):
        let (mut session, _store) = create_session();
        join(&mut session, "c1", "alice").await;
        join(&mut session, "c2", "bob").await;
        session.start_game();
        pick(&mut session, "c1", "bob").await;
        pick(&mut session, "c2", "alice").await;

        // when (操作):
        session.stop_game();
        session.start_game();
        let outbound = pick(&mut session, "c1", "carol").await;

        // then (期待する結果):
        assert_eq!(
            outbound[0].event,
            GameEvent::UpdatePicks(names(&["bob", "carol"]))
        );
        assert_eq!(session.game().pick_log().len(), 3);
    }

    #[tokio::test]
    async fn test_handle_dispatches_commands() {
        // テスト項目: handle がコマンドを対応する処理に振り分ける
        // given (前提条件):
        let (mut session, _store) = create_session();
        let c1 = conn("c1");

        // when (操作):
        session
            .handle(&c1, GameCommand::JoinGame(name("alice")))
            .await
            .unwrap();
        session.handle(&c1, GameCommand::StartGame).await.unwrap();
        session
            .handle(&c1, GameCommand::PickName(name("bob")))
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(session.game().phase(), GamePhase::Started);
        assert_eq!(session.standings(), vec![Standing {
            name: name("bob"),
            count: 1
        }]);
        assert_eq!(session.stored_participants().await.unwrap().len(), 1);
    }
}
