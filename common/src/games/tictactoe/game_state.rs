use serde::Serialize;

use crate::games::RandomSource;
use super::board::{BOARD_SIZE, Board, is_valid_move};
use super::bot_controller::{BotInput, calculate_move};
use super::error::GameError;
use super::types::{Difficulty, Mark};
use super::win_detector::{check_win_with_line, has_won, is_full};

pub const DEFAULT_PLAYER_NAME: &str = "Player";

/// The human always plays X and moves first; the computer plays O.
pub const HUMAN_MARK: Mark = Mark::X;
pub const BOT_MARK: Mark = Mark::O;

#[derive(Debug, Clone)]
pub struct TicTacToeGameState {
    board: Board,
    current_mark: Mark,
    winner: Option<Mark>,
    game_over: bool,
    mode: Difficulty,
    player_name: String,
    move_count: u32,
}

/// Read-only view of the whole session, shaped for the JSON API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TicTacToeSnapshot {
    pub board: [Mark; BOARD_SIZE],
    pub current_player: Mark,
    pub winner: Option<Mark>,
    pub game_over: bool,
    pub mode: Difficulty,
    pub player_name: String,
    pub move_count: u32,
    pub winning_line: Option<[usize; 3]>,
}

impl Default for TicTacToeGameState {
    fn default() -> Self {
        Self::new(Difficulty::default(), DEFAULT_PLAYER_NAME.to_string())
    }
}

impl TicTacToeGameState {
    pub fn new(mode: Difficulty, player_name: String) -> Self {
        Self {
            board: Board::new(),
            current_mark: HUMAN_MARK,
            winner: None,
            game_over: false,
            mode,
            player_name,
            move_count: 0,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_mark(&self) -> Mark {
        self.current_mark
    }

    pub fn winner(&self) -> Option<Mark> {
        self.winner
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn mode(&self) -> Difficulty {
        self.mode
    }

    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    /// Writes the current mark at `position` and advances the turn.
    pub fn place_mark(&mut self, position: usize) -> Result<(), GameError> {
        if self.game_over {
            return Err(GameError::WrongTurn);
        }

        if !is_valid_move(&self.board, position) {
            return Err(GameError::InvalidPosition);
        }

        self.board.set(position, self.current_mark);
        self.move_count += 1;

        self.check_game_over();

        if !self.game_over {
            self.switch_turn();
        }

        Ok(())
    }

    pub fn apply_human_move(&mut self, position: usize) -> Result<(), GameError> {
        if self.current_mark != HUMAN_MARK {
            return Err(GameError::WrongTurn);
        }
        self.place_mark(position)
    }

    /// Lets the configured strategy play O. Returns the chosen cell, or
    /// `None` without touching state when it is not O's turn, the game is
    /// over, or no cell is free.
    pub fn apply_bot_move(&mut self, rng: &mut impl RandomSource) -> Option<usize> {
        if self.current_mark != BOT_MARK || self.game_over {
            return None;
        }

        let input = BotInput::from_game_state(self);
        let position = calculate_move(self.mode, &input, rng)?;
        self.place_mark(position).ok()?;
        Some(position)
    }

    /// Starts a fresh game. Mode and player name are kept.
    pub fn reset(&mut self) {
        self.board = Board::new();
        self.current_mark = HUMAN_MARK;
        self.winner = None;
        self.game_over = false;
        self.move_count = 0;
    }

    pub fn set_mode(&mut self, mode: &str) -> Result<(), GameError> {
        let difficulty = mode.parse::<Difficulty>()?;
        self.set_difficulty(difficulty);
        Ok(())
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.mode = difficulty;
        self.reset();
    }

    pub fn set_player_name(&mut self, name: &str) -> Result<(), GameError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(GameError::EmptyName);
        }
        self.player_name = name.to_string();
        Ok(())
    }

    pub fn to_snapshot(&self) -> TicTacToeSnapshot {
        TicTacToeSnapshot {
            board: *self.board.cells(),
            current_player: self.current_mark,
            winner: self.winner,
            game_over: self.game_over,
            mode: self.mode,
            player_name: self.player_name.clone(),
            move_count: self.move_count,
            winning_line: check_win_with_line(&self.board).map(|line| line.cells),
        }
    }

    fn switch_turn(&mut self) {
        self.current_mark = if self.current_mark == Mark::X {
            Mark::O
        } else {
            Mark::X
        };
    }

    fn check_game_over(&mut self) {
        if has_won(&self.board, self.current_mark) {
            self.winner = Some(self.current_mark);
            self.game_over = true;
            return;
        }

        if is_full(&self.board) {
            self.game_over = true;
        }
    }

    #[cfg(test)]
    pub(crate) fn set_board(&mut self, board: Board, current_mark: Mark) {
        self.board = board;
        self.current_mark = current_mark;
    }
}
