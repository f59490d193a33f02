/// Recoverable rejection of a session operation. State is untouched when
/// one of these is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameError {
    /// Cell is occupied or the index is outside `0..9`.
    InvalidPosition,
    /// Not X's turn, or the game is already over.
    WrongTurn,
    InvalidMode,
    EmptyName,
}

impl std::fmt::Display for GameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameError::InvalidPosition => write!(f, "Invalid move"),
            GameError::WrongTurn => write!(f, "Not your turn"),
            GameError::InvalidMode => write!(f, "Invalid game mode"),
            GameError::EmptyName => write!(f, "Name cannot be empty"),
        }
    }
}

impl std::error::Error for GameError {}
