//! Domain 層
//!
//! 値オブジェクト、エンティティ、ゲームの状態機械、
//! および Infrastructure 層が実装するポート（trait）を定義します。

pub mod command;
pub mod entity;
pub mod error;
pub mod event;
pub mod game;
pub mod message_pusher;
pub mod repository;
pub mod value_object;

pub use command::GameCommand;
pub use entity::{Participant, PickRecord, Progress, Roster, Standing, StoredParticipant};
pub use error::{MessagePushError, PickRejection, StoreError, ValueObjectError};
pub use event::{GameEvent, Outbound, Target};
pub use game::{DEFAULT_MAX_PICKS, Game, tabulate};
pub use message_pusher::{MessagePusher, PusherChannel};
pub use repository::ParticipantStore;
#[cfg(test)]
pub use repository::MockParticipantStore;
pub use value_object::{ConnectionId, GamePhase, PlayerName};
