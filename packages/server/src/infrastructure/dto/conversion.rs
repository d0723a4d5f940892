//! Conversion logic between DTOs and domain models.

use crate::domain::{
    Game, GameCommand, GameEvent, Participant, PlayerName, Standing, StoredParticipant,
    ValueObjectError,
};
use crate::infrastructure::dto::{http, store, websocket as dto};

fn names_to_strings(names: &[PlayerName]) -> Vec<String> {
    names.iter().map(|n| n.as_str().to_string()).collect()
}

// ========================================
// DTO → Domain
// ========================================

impl TryFrom<dto::ClientCommand> for GameCommand {
    type Error = ValueObjectError;

    fn try_from(command: dto::ClientCommand) -> Result<Self, Self::Error> {
        Ok(match command {
            dto::ClientCommand::JoinGame(name) => GameCommand::JoinGame(PlayerName::new(name)?),
            dto::ClientCommand::StartGame => GameCommand::StartGame,
            dto::ClientCommand::StopGame => GameCommand::StopGame,
            dto::ClientCommand::PickName(name) => GameCommand::PickName(PlayerName::new(name)?),
            dto::ClientCommand::CalculateResults => GameCommand::CalculateResults,
            dto::ClientCommand::ResetGame => GameCommand::ResetGame,
        })
    }
}

impl TryFrom<store::StoredParticipantRecord> for StoredParticipant {
    type Error = ValueObjectError;

    fn try_from(record: store::StoredParticipantRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            name: PlayerName::new(record.name)?,
            picks: record
                .picks
                .into_iter()
                .map(PlayerName::new)
                .collect::<Result<_, _>>()?,
        })
    }
}

// ========================================
// Domain → DTO
// ========================================

impl From<&StoredParticipant> for store::StoredParticipantRecord {
    fn from(model: &StoredParticipant) -> Self {
        Self {
            name: model.name.as_str().to_string(),
            picks: names_to_strings(&model.picks),
        }
    }
}

impl From<&Standing> for dto::StandingDto {
    fn from(model: &Standing) -> Self {
        Self {
            name: model.name.as_str().to_string(),
            count: model.count,
        }
    }
}

impl From<&GameEvent> for dto::ServerMessage {
    fn from(event: &GameEvent) -> Self {
        match event {
            GameEvent::GameState(phase) => Self::GameState(phase.as_str().to_string()),
            GameEvent::Joined { name } => Self::Joined(dto::JoinedPayload {
                name: name.as_str().to_string(),
            }),
            GameEvent::UpdatePicks(picks) => Self::UpdatePicks(names_to_strings(picks)),
            GameEvent::UserList(names) => Self::UserList(names_to_strings(names)),
            GameEvent::GlobalLog { time, message } => Self::GlobalLog(dto::GlobalLogPayload {
                time: time.clone(),
                message: message.clone(),
            }),
            GameEvent::GameStarted => Self::GameStarted,
            GameEvent::GameReset => Self::GameReset,
            GameEvent::GameFinished(standings) => {
                Self::GameFinished(standings.iter().map(Into::into).collect())
            }
            GameEvent::AdminUpdate(progress) => Self::AdminUpdate(dto::AdminUpdatePayload {
                total_picks: progress.total_picks,
                users_done: progress.users_done,
            }),
            GameEvent::Error(message) => Self::Error(message.clone()),
            GameEvent::ResultError(message) => Self::ResultError(message.clone()),
        }
    }
}

impl From<&Participant> for http::ParticipantDto {
    fn from(model: &Participant) -> Self {
        Self {
            name: model.name.as_str().to_string(),
            picks: names_to_strings(&model.picks),
        }
    }
}

impl From<&Game> for http::GameSnapshotDto {
    fn from(game: &Game) -> Self {
        let progress = game.progress();
        Self {
            phase: game.phase().as_str().to_string(),
            max_picks: game.max_picks(),
            participants: game.participants().iter().map(Into::into).collect(),
            total_picks: progress.total_picks,
            users_done: progress.users_done,
        }
    }
}
