use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tictactoe_common::games::tictactoe::TicTacToeSession;
use tokio::sync::Mutex;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeFile,
};

use crate::api_handler::{get_game_state, make_move, reset_game, set_game_mode, set_player_name};
use crate::log;

/// Shared by every request. The lock is held across a whole session call,
/// so a human move and the bot's reply are never interleaved with another
/// request.
#[derive(Clone)]
pub struct WebServerState {
    pub session: Arc<Mutex<TicTacToeSession>>,
}

impl WebServerState {
    pub fn new(session: TicTacToeSession) -> Self {
        Self {
            session: Arc::new(Mutex::new(session)),
        }
    }
}

pub fn build_router(state: WebServerState, static_files_path: &Path) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route_service("/", ServeFile::new(static_files_path.join("index.html")))
        .route("/api/game/state", get(get_game_state))
        .route("/api/game/move", post(make_move))
        .route("/api/game/reset", post(reset_game))
        .route("/api/game/mode", post(set_game_mode))
        .route("/api/player/name", post(set_player_name))
        .layer(cors)
        .with_state(state)
}

pub async fn run_web_server(
    state: WebServerState,
    addr: SocketAddr,
    static_files_path: &Path,
) -> std::io::Result<()> {
    let app = build_router(state, static_files_path);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    log!("Web server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    log!("Shutdown signal received");
}
