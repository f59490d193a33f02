mod board;
mod bot_controller;
mod error;
mod game_state;
mod session;
mod types;
mod win_detector;

pub use board::{BOARD_SIZE, Board, CENTER, CORNERS, get_available_moves, is_valid_move};
pub use bot_controller::{BotInput, calculate_minimax_move, calculate_move};
pub use error::GameError;
pub use game_state::{
    BOT_MARK, DEFAULT_PLAYER_NAME, HUMAN_MARK, TicTacToeGameState, TicTacToeSnapshot,
};
pub use session::{MoveOutcome, TicTacToeSession};
pub use types::{Difficulty, Mark, WinningLine};
pub use win_detector::{check_win, check_win_with_line, has_won, is_draw, is_full};
