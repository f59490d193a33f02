use crate::games::{RandomSource, SessionRng};
use super::error::GameError;
use super::game_state::{TicTacToeGameState, TicTacToeSnapshot};

/// Outcome of an accepted human move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    pub human_position: usize,
    /// Cell the computer answered with, if the game was still running.
    pub bot_position: Option<usize>,
}

/// The single table: one game state plus the randomness its bot draws from.
///
/// Every public method runs to completion synchronously, so a caller that
/// shares the session only needs one lock around each call.
pub struct TicTacToeSession<R: RandomSource = SessionRng> {
    game_state: TicTacToeGameState,
    rng: R,
}

impl<R: RandomSource> TicTacToeSession<R> {
    pub fn new(game_state: TicTacToeGameState, rng: R) -> Self {
        Self { game_state, rng }
    }

    pub fn game_state(&self) -> &TicTacToeGameState {
        &self.game_state
    }

    pub fn snapshot(&self) -> TicTacToeSnapshot {
        self.game_state.to_snapshot()
    }

    /// Applies the human's move and, if the game goes on, the bot's reply.
    pub fn submit_move(&mut self, position: usize) -> Result<MoveOutcome, GameError> {
        self.game_state.apply_human_move(position)?;

        let bot_position = if self.game_state.is_game_over() {
            None
        } else {
            self.game_state.apply_bot_move(&mut self.rng)
        };

        Ok(MoveOutcome {
            human_position: position,
            bot_position,
        })
    }

    pub fn reset(&mut self) {
        self.game_state.reset();
    }

    pub fn set_mode(&mut self, mode: &str) -> Result<(), GameError> {
        self.game_state.set_mode(mode)
    }

    pub fn set_player_name(&mut self, name: &str) -> Result<&str, GameError> {
        self.game_state.set_player_name(name)?;
        Ok(self.game_state.player_name())
    }
}
