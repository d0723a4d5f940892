//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{Stream, StreamExt},
};
use tokio::sync::mpsc;

use crate::{
    domain::{ConnectionId, GameCommand},
    infrastructure::dto::websocket::ClientCommand,
    ui::state::AppState,
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let connection_id = ConnectionId::generate();
    tracing::info!("New client connecting as '{}'", connection_id);
    ws.on_upgrade(move |socket| handle_socket(socket, state, connection_id))
}

/// Spawns a task that receives messages from the rx channel and pushes them to the WebSocket sender.
///
/// # Arguments
///
/// * `rx` - Channel receiver for encoded events addressed to this connection
/// * `sender` - WebSocket sink to send messages to this client
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

/// Parse a text frame into a command. Invalid frames are logged and dropped.
fn parse_command(connection_id: &ConnectionId, text: &str) -> Option<GameCommand> {
    let command = match serde_json::from_str::<ClientCommand>(text) {
        Ok(command) => command,
        Err(e) => {
            tracing::warn!("Invalid frame from '{}': {}", connection_id, e);
            return None;
        }
    };
    match GameCommand::try_from(command) {
        Ok(command) => Some(command),
        Err(e) => {
            tracing::warn!("Rejected command from '{}': {}", connection_id, e);
            None
        }
    }
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, connection_id: ConnectionId) {
    let (sender, receiver) = socket.split();

    // Register the connection before anything is delivered to it
    let (tx, rx) = mpsc::unbounded_channel();
    state.game_service.connect(connection_id.clone(), tx).await;
    tracing::info!("Client '{}' connected", connection_id);

    let mut send_task = pusher_loop(rx, sender);

    receive_commands(receiver, &mut send_task, &state, &connection_id).await;
    send_task.abort();

    state.game_service.disconnect(&connection_id).await;
    tracing::info!("Client '{}' disconnected", connection_id);
}

/// Reads frames and executes commands until the client goes away.
///
/// `closed` resolves when the outgoing side is gone. It is only checked between
/// commands, so a command that has started always runs to completion.
async fn receive_commands<S, F>(
    mut receiver: S,
    mut closed: F,
    state: &AppState,
    connection_id: &ConnectionId,
) where
    S: Stream<Item = Result<Message, axum::Error>> + Unpin,
    F: Future + Unpin,
{
    loop {
        let msg = tokio::select! {
            msg = receiver.next() => msg,
            _ = &mut closed => {
                tracing::debug!("Outgoing stream of '{}' closed", connection_id);
                break;
            }
        };
        let msg = match msg {
            Some(Ok(msg)) => msg,
            Some(Err(e)) => {
                tracing::error!("WebSocket error: {}", e);
                break;
            }
            None => break,
        };

        match msg {
            Message::Text(text) => {
                tracing::debug!(
                    "Received text from '{}': {}",
                    connection_id,
                    text.as_str()
                );
                let Some(command) = parse_command(connection_id, text.as_str()) else {
                    continue;
                };
                if let Err(e) = state.game_service.execute(connection_id, command).await {
                    tracing::error!("{}", e);
                    state.fatal.trigger(e.to_string());
                    break;
                }
            }
            Message::Ping(_) => {
                tracing::debug!("Received ping");
                // Ping/pong is handled automatically by the WebSocket protocol
            }
            Message::Close(_) => {
                tracing::info!("Client '{}' requested close", connection_id);
                break;
            }
            _ => {}
        }
    }
}
