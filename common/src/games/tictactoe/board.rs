use std::ops::Index;

use super::types::Mark;

pub const BOARD_SIZE: usize = 9;
pub const CENTER: usize = 4;
pub const CORNERS: [usize; 4] = [0, 2, 6, 8];

/// 3x3 grid stored row-major: 0..=2 is the top row, 6..=8 the bottom row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Board {
    cells: [Mark; BOARD_SIZE],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cells(cells: [Mark; BOARD_SIZE]) -> Self {
        Self { cells }
    }

    pub fn cells(&self) -> &[Mark; BOARD_SIZE] {
        &self.cells
    }

    pub fn set(&mut self, position: usize, mark: Mark) {
        self.cells[position] = mark;
    }

    /// Copy of the board with `mark` written at `position`.
    pub fn with_mark(mut self, position: usize, mark: Mark) -> Self {
        self.cells[position] = mark;
        self
    }

    pub fn count(&self, mark: Mark) -> usize {
        self.cells.iter().filter(|&&cell| cell == mark).count()
    }
}

impl Index<usize> for Board {
    type Output = Mark;

    fn index(&self, position: usize) -> &Mark {
        &self.cells[position]
    }
}

pub fn get_available_moves(board: &Board) -> Vec<usize> {
    board
        .cells()
        .iter()
        .enumerate()
        .filter(|&(_, &cell)| cell == Mark::Empty)
        .map(|(position, _)| position)
        .collect()
}

pub fn is_valid_move(board: &Board, position: usize) -> bool {
    position < BOARD_SIZE && board[position] == Mark::Empty
}
