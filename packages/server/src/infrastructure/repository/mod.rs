//! ParticipantStore 実装
//!
//! - `json_file`: JSON ファイルに永続化する本番用の実装
//! - `inmemory`: プロセス内だけで保持する実装（テスト、`--in-memory` 起動用）

pub mod inmemory;
pub mod json_file;

pub use inmemory::InMemoryParticipantStore;
pub use json_file::JsonFileParticipantStore;
