//! Data Transfer Objects (DTOs) for the game server.
//!
//! DTOs are organized by medium:
//! - `websocket`: WebSocket command / event frames
//! - `http`: HTTP API response DTOs
//! - `store`: records of the persisted roster file

pub mod conversion;
pub mod http;
pub mod store;
pub mod websocket;
