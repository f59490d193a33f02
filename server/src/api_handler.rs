use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tictactoe_common::games::tictactoe::{GameError, TicTacToeSnapshot};

use crate::web_server::WebServerState;
use crate::{log, log_warn};

/// Fed to the session for positions that are missing, negative or not
/// integers. It is rejected as an invalid move after the turn check.
const UNPARSEABLE_POSITION: usize = usize::MAX;

#[derive(Debug, Default, Deserialize)]
pub struct MoveRequest {
    #[serde(default)]
    pub position: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ModeRequest {
    #[serde(default)]
    pub mode: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PlayerNameRequest {
    #[serde(default)]
    pub name: Option<Value>,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct GameResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game_state: Option<TicTacToeSnapshot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl GameResponse {
    fn ok(snapshot: TicTacToeSnapshot) -> Self {
        Self {
            success: true,
            game_state: Some(snapshot),
            error: None,
        }
    }

    fn err(error: GameError) -> Self {
        Self {
            success: false,
            game_state: None,
            error: Some(error.to_string()),
        }
    }
}

#[derive(Debug, PartialEq, Serialize)]
pub struct PlayerNameResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub async fn get_game_state(State(state): State<WebServerState>) -> Json<TicTacToeSnapshot> {
    let session = state.session.lock().await;
    Json(session.snapshot())
}

pub async fn make_move(
    State(state): State<WebServerState>,
    Json(request): Json<MoveRequest>,
) -> Json<GameResponse> {
    let position = request
        .position
        .as_ref()
        .and_then(Value::as_u64)
        .and_then(|position| usize::try_from(position).ok())
        .unwrap_or(UNPARSEABLE_POSITION);

    let mut session = state.session.lock().await;
    match session.submit_move(position) {
        Ok(outcome) => {
            let snapshot = session.snapshot();
            log!(
                "Human played {}, bot replied {:?} (moves: {}, game over: {})",
                outcome.human_position,
                outcome.bot_position,
                snapshot.move_count,
                snapshot.game_over
            );
            Json(GameResponse::ok(snapshot))
        }
        Err(e) => {
            log_warn!("Rejected move {:?}: {}", request.position, e);
            Json(GameResponse::err(e))
        }
    }
}

pub async fn reset_game(State(state): State<WebServerState>) -> Json<GameResponse> {
    let mut session = state.session.lock().await;
    session.reset();
    log!("Game reset");
    Json(GameResponse::ok(session.snapshot()))
}

pub async fn set_game_mode(
    State(state): State<WebServerState>,
    Json(request): Json<ModeRequest>,
) -> Json<GameResponse> {
    let mode = request.mode.as_ref().and_then(Value::as_str).unwrap_or("");

    let mut session = state.session.lock().await;
    match session.set_mode(mode) {
        Ok(()) => {
            log!("Mode set to {}, new game started", mode);
            Json(GameResponse::ok(session.snapshot()))
        }
        Err(e) => {
            log_warn!("Rejected mode {:?}: {}", request.mode, e);
            Json(GameResponse::err(e))
        }
    }
}

pub async fn set_player_name(
    State(state): State<WebServerState>,
    Json(request): Json<PlayerNameRequest>,
) -> Json<PlayerNameResponse> {
    let name = request.name.as_ref().and_then(Value::as_str).unwrap_or("");

    let mut session = state.session.lock().await;
    match session.set_player_name(name) {
        Ok(player_name) => {
            log!("Player name set to {}", player_name);
            Json(PlayerNameResponse {
                success: true,
                player_name: Some(player_name.to_string()),
                error: None,
            })
        }
        Err(e) => {
            log_warn!("Rejected player name: {}", e);
            Json(PlayerNameResponse {
                success: false,
                player_name: None,
                error: Some(e.to_string()),
            })
        }
    }
}
