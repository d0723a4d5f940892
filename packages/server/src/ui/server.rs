//! Server execution logic.

use std::sync::Arc;

use axum::{Router, routing::get};
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::usecase::GameService;

use super::{
    handler::{debug_store, get_game, get_results, health_check, websocket_handler},
    signal::{FatalSignal, shutdown_signal},
    state::AppState,
};

/// Errors that stop the server
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("server I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("server stopped after a fatal error: {0}")]
    Fatal(String),
}

/// WebSocket game server
///
/// This struct encapsulates the server configuration and provides methods to run the server.
///
/// # Example
///
/// ```ignore
/// let server = Server::new(game_service);
/// server.run("127.0.0.1".to_string(), 3002).await?;
/// ```
pub struct Server {
    /// GameService（コマンドの直列化と配信のユースケース）
    game_service: Arc<GameService>,
    fatal: FatalSignal,
}

impl Server {
    /// Create a new Server instance
    pub fn new(game_service: Arc<GameService>) -> Self {
        Self {
            game_service,
            fatal: FatalSignal::new(),
        }
    }

    /// Build the router with all endpoints
    pub fn router(&self) -> Router {
        let app_state = Arc::new(AppState {
            game_service: self.game_service.clone(),
            fatal: self.fatal.clone(),
        });

        Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/api/game", get(get_game))
            .route("/api/results", get(get_results))
            .route("/debug/store", get(debug_store))
            .layer(TraceLayer::new_for_http())
            .with_state(app_state)
    }

    /// Run the WebSocket game server
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The port number to bind to (e.g., 3002)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address,
    /// if there's an error during server execution, or if a fatal game error
    /// stopped the server.
    pub async fn run(self, host: String, port: u16) -> Result<(), ServerError> {
        let bind_addr = format!("{}:{}", host, port);
        let listener = TcpListener::bind(&bind_addr).await?;
        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        self.serve(listener).await
    }

    /// Serve on an already bound listener until shutdown
    pub async fn serve(self, listener: TcpListener) -> Result<(), ServerError> {
        let app = self.router();

        tracing::info!("Game server listening on {}", listener.local_addr()?);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal(self.fatal.clone()))
            .await?;

        if let Some(reason) = self.fatal.reason() {
            return Err(ServerError::Fatal(reason));
        }
        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
