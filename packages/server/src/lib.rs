//! Real-time "pick a name" party game server library.
//!
//! Participants join over WebSocket, pick names from the roster of other
//! participants, and an administrator tabulates which names were picked most.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
