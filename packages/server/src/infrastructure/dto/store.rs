//! Persisted roster record DTO.
//!
//! The roster file is a JSON array of `{"name": "...", "picks": ["..."]}`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredParticipantRecord {
    pub name: String,
    #[serde(default)]
    pub picks: Vec<String>,
}
