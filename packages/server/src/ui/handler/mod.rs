//! HTTP and WebSocket handlers.

mod http;
mod websocket;

pub use http::{debug_store, get_game, get_results, health_check};
pub use websocket::websocket_handler;
