//! UseCase 層
//!
//! - `GameSession`: コマンドを適用し、送信指示（`Outbound`）のリストを返す
//! - `GameService`: コマンドを直列化し、送信指示を MessagePusher で配信する

mod error;
mod game_service;
mod game_session;

pub use error::SessionError;
pub use game_service::GameService;
pub use game_session::GameSession;
