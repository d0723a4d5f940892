//! "Pick a name" party game server.
//!
//! Players join over WebSocket, pick names of other players, and an admin
//! tabulates the most picked names.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin namepick-server
//! cargo run --bin namepick-server -- --host 0.0.0.0 --port 3002 --data-file data/users.json
//! ```

use std::{path::PathBuf, sync::Arc};

use clap::{Parser, builder::TypedValueParser};
use namepick_server::{
    domain::{DEFAULT_MAX_PICKS, ParticipantStore},
    infrastructure::{
        message_pusher::WebSocketMessagePusher,
        repository::{InMemoryParticipantStore, JsonFileParticipantStore},
    },
    ui::Server,
    usecase::{GameService, GameSession},
};
use namepick_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "namepick-server")]
#[command(about = "Real-time \"pick a name\" party game server", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "PORT", default_value = "3002")]
    port: u16,

    /// JSON file where joined participants and their picks are stored
    #[arg(
        short = 'd',
        long,
        env = "NAMEPICK_DATA_FILE",
        default_value = "data/users.json"
    )]
    data_file: PathBuf,

    /// Keep participants in memory only (nothing survives a restart)
    #[arg(long)]
    in_memory: bool,

    /// Number of names each participant has to pick
    #[arg(
        long,
        default_value_t = DEFAULT_MAX_PICKS,
        value_parser = clap::value_parser!(u16).range(1..).map(usize::from)
    )]
    max_picks: usize,

    /// Default log level when RUST_LOG is not set
    #[arg(long, default_value = "debug")]
    log_level: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &args.log_level);

    // Initialize dependencies in order:
    // 1. ParticipantStore
    // 2. MessagePusher
    // 3. GameSession / GameService
    // 4. Server

    // 1. Create ParticipantStore
    let store: Arc<dyn ParticipantStore> = if args.in_memory {
        tracing::warn!("Using in-memory participant store; picks will not survive a restart");
        Arc::new(InMemoryParticipantStore::new())
    } else {
        match JsonFileParticipantStore::open(&args.data_file).await {
            Ok(store) => Arc::new(store),
            Err(e) => {
                tracing::error!(
                    "Failed to open participant store {}: {}",
                    args.data_file.display(),
                    e
                );
                std::process::exit(1);
            }
        }
    };

    // 2. Create MessagePusher (WebSocket implementation)
    let message_pusher = Arc::new(WebSocketMessagePusher::default());

    // 3. Create GameSession and GameService
    let session = GameSession::new(store, args.max_picks);
    let game_service = Arc::new(GameService::new(session, message_pusher));
    tracing::info!("Game session ready (max picks: {})", args.max_picks);

    // 4. Create and run the server
    let server = Server::new(game_service);
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
