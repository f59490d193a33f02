use crate::games::RandomSource;
use super::board::{Board, CENTER, CORNERS, get_available_moves};
use super::game_state::TicTacToeGameState;
use super::types::{Difficulty, Mark};
use super::win_detector::{has_won, is_full};

/// Probability of taking the positional branch in the medium strategy.
const MEDIUM_POSITIONAL_CHANCE: f64 = 0.7;

pub struct BotInput {
    pub board: Board,
    pub current_mark: Mark,
}

impl BotInput {
    pub fn from_game_state(state: &TicTacToeGameState) -> Self {
        Self {
            board: *state.board(),
            current_mark: state.current_mark(),
        }
    }
}

/// Picks a cell for `input.current_mark`, or `None` when no cell is free.
pub fn calculate_move(
    difficulty: Difficulty,
    input: &BotInput,
    rng: &mut impl RandomSource,
) -> Option<usize> {
    match difficulty {
        Difficulty::Easy => calculate_random_move(input, rng),
        Difficulty::Medium => calculate_heuristic_move(input, rng),
        Difficulty::Hard => calculate_minimax_move(input),
    }
}

fn calculate_random_move(input: &BotInput, rng: &mut impl RandomSource) -> Option<usize> {
    let available_moves = get_available_moves(&input.board);
    pick_random(&available_moves, rng)
}

fn calculate_heuristic_move(input: &BotInput, rng: &mut impl RandomSource) -> Option<usize> {
    let bot_mark = input.current_mark;
    let opponent_mark = bot_mark.opponent()?;
    let available_moves = get_available_moves(&input.board);

    if available_moves.is_empty() {
        return None;
    }

    if let Some(position) = find_winning_move(&input.board, bot_mark, &available_moves) {
        return Some(position);
    }

    if let Some(position) = find_winning_move(&input.board, opponent_mark, &available_moves) {
        return Some(position);
    }

    if rng.random_unit() < MEDIUM_POSITIONAL_CHANCE {
        if available_moves.contains(&CENTER) {
            return Some(CENTER);
        }
        let open_corners: Vec<usize> = available_moves
            .iter()
            .copied()
            .filter(|position| CORNERS.contains(position))
            .collect();
        if let Some(corner) = pick_random(&open_corners, rng) {
            return Some(corner);
        }
    }

    pick_random(&available_moves, rng)
}

/// Full-depth minimax. Ties go to the lowest index.
pub fn calculate_minimax_move(input: &BotInput) -> Option<usize> {
    let bot_mark = input.current_mark;
    let opponent_mark = bot_mark.opponent()?;

    let mut best_move = None;
    let mut best_score = i32::MIN;

    for position in get_available_moves(&input.board) {
        let board = input.board.with_mark(position, bot_mark);
        let score = minimax(board, bot_mark, opponent_mark, false);

        if score > best_score {
            best_score = score;
            best_move = Some(position);
        }
    }

    best_move
}

fn find_winning_move(board: &Board, mark: Mark, moves: &[usize]) -> Option<usize> {
    moves
        .iter()
        .copied()
        .find(|&position| has_won(&board.with_mark(position, mark), mark))
}

fn pick_random(moves: &[usize], rng: &mut impl RandomSource) -> Option<usize> {
    if moves.is_empty() {
        return None;
    }
    Some(moves[rng.random_index(moves.len())])
}

/// Scores `board` from the bot's side: +1 bot wins, -1 opponent wins, 0 draw.
fn minimax(board: Board, bot_mark: Mark, opponent_mark: Mark, is_maximizing: bool) -> i32 {
    if has_won(&board, bot_mark) {
        return 1;
    }
    if has_won(&board, opponent_mark) {
        return -1;
    }
    if is_full(&board) {
        return 0;
    }

    let moves = get_available_moves(&board);

    if is_maximizing {
        moves
            .into_iter()
            .map(|position| {
                minimax(
                    board.with_mark(position, bot_mark),
                    bot_mark,
                    opponent_mark,
                    false,
                )
            })
            .max()
            .unwrap_or(0)
    } else {
        moves
            .into_iter()
            .map(|position| {
                minimax(
                    board.with_mark(position, opponent_mark),
                    bot_mark,
                    opponent_mark,
                    true,
                )
            })
            .min()
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::SessionRng;
    use crate::games::tictactoe::win_detector::check_win;
    use crate::games::tictactoe::Mark::{Empty as E, O, X};

    /// Replays fixed values so a test can pick an exact branch.
    struct ScriptedRng {
        units: Vec<f64>,
        indices: Vec<usize>,
    }

    impl ScriptedRng {
        fn new(units: &[f64], indices: &[usize]) -> Self {
            Self {
                units: units.iter().rev().copied().collect(),
                indices: indices.iter().rev().copied().collect(),
            }
        }
    }

    impl RandomSource for ScriptedRng {
        fn random_unit(&mut self) -> f64 {
            self.units.pop().expect("no scripted unit sample left")
        }

        fn random_index(&mut self, len: usize) -> usize {
            let index = self.indices.pop().expect("no scripted index left");
            assert!(index < len, "scripted index {} out of 0..{}", index, len);
            index
        }
    }

    fn input(cells: [Mark; 9], current_mark: Mark) -> BotInput {
        BotInput {
            board: Board::from_cells(cells),
            current_mark,
        }
    }

    #[test]
    fn test_easy_picks_only_empty_cells() {
        let mut rng = SessionRng::new(3);
        let bot_input = input([X, O, X, E, O, E, X, E, O], O);
        for _ in 0..100 {
            let position = calculate_move(Difficulty::Easy, &bot_input, &mut rng).unwrap();
            assert!([3, 5, 7].contains(&position));
        }
    }

    #[test]
    fn test_easy_uses_index_among_empty_cells() {
        let mut rng = ScriptedRng::new(&[], &[2]);
        let bot_input = input([X, O, X, E, O, E, X, E, O], O);
        assert_eq!(calculate_move(Difficulty::Easy, &bot_input, &mut rng), Some(7));
    }

    #[test]
    fn test_full_board_gives_no_move() {
        let mut rng = SessionRng::new(1);
        let bot_input = input([X, O, X, X, O, O, O, X, X], O);
        for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            assert_eq!(calculate_move(difficulty, &bot_input, &mut rng), None);
        }
    }

    #[test]
    fn test_medium_takes_immediate_win() {
        // O wins on 2; X also threatens on 6 but winning comes first.
        let bot_input = input([O, O, E, X, E, E, E, X, X], O);
        let mut rng = ScriptedRng::new(&[], &[]);
        assert_eq!(calculate_move(Difficulty::Medium, &bot_input, &mut rng), Some(2));
    }

    #[test]
    fn test_medium_blocks_threat() {
        let bot_input = input([X, X, E, E, O, E, E, E, E], O);
        let mut rng = ScriptedRng::new(&[], &[]);
        assert_eq!(calculate_move(Difficulty::Medium, &bot_input, &mut rng), Some(2));
    }

    #[test]
    fn test_medium_picks_lowest_winning_cell() {
        let bot_input = input([O, E, E, E, O, X, O, X, X], O);
        let mut rng = ScriptedRng::new(&[], &[]);
        assert_eq!(calculate_move(Difficulty::Medium, &bot_input, &mut rng), Some(2));
    }

    #[test]
    fn test_medium_prefers_center_on_positional_branch() {
        let bot_input = input([X, E, E, E, E, E, E, E, E], O);
        let mut rng = ScriptedRng::new(&[0.69], &[]);
        assert_eq!(calculate_move(Difficulty::Medium, &bot_input, &mut rng), Some(4));
    }

    #[test]
    fn test_medium_picks_corner_when_center_taken() {
        let bot_input = input([X, E, E, E, X, E, E, E, O], O);
        // Open corners are [2, 6].
        let mut rng = ScriptedRng::new(&[0.1], &[1]);
        assert_eq!(calculate_move(Difficulty::Medium, &bot_input, &mut rng), Some(6));
    }

    #[test]
    fn test_medium_falls_through_without_center_or_corner() {
        let bot_input = input([X, O, X, E, X, E, O, X, O], O);
        let mut rng = ScriptedRng::new(&[0.5], &[1]);
        assert_eq!(calculate_move(Difficulty::Medium, &bot_input, &mut rng), Some(5));
    }

    #[test]
    fn test_medium_random_branch_ignores_center() {
        let bot_input = input([X, E, E, E, E, E, E, E, E], O);
        let mut rng = ScriptedRng::new(&[0.7], &[0]);
        assert_eq!(calculate_move(Difficulty::Medium, &bot_input, &mut rng), Some(1));
    }

    #[test]
    fn test_hard_answers_center_with_first_corner() {
        let bot_input = input([E, E, E, E, X, E, E, E, E], O);
        let position = calculate_minimax_move(&bot_input).unwrap();
        assert_eq!(position, 0);
        assert!(CORNERS.contains(&position));
    }

    #[test]
    fn test_hard_takes_win_over_block() {
        let bot_input = input([X, X, E, O, O, E, X, E, E], O);
        assert_eq!(calculate_minimax_move(&bot_input), Some(5));
    }

    #[test]
    fn test_hard_blocks_when_no_win() {
        let bot_input = input([X, E, E, E, O, E, E, E, X], O);
        // Any edge holds the draw; corners lose to a fork. Lowest edge is 1.
        assert_eq!(calculate_minimax_move(&bot_input), Some(1));
    }

    #[test]
    fn test_minimax_scores_terminal_boards() {
        let won = Board::from_cells([O, O, O, X, X, E, X, E, E]);
        assert_eq!(minimax(won, O, X, true), 1);
        let lost = Board::from_cells([X, X, X, O, O, E, E, E, E]);
        assert_eq!(minimax(lost, O, X, true), -1);
        let drawn = Board::from_cells([X, O, X, X, O, O, O, X, X]);
        assert_eq!(minimax(drawn, O, X, false), 0);
    }

    fn play_out_against_every_reply(board: Board, results: &mut Vec<Option<Mark>>) {
        if check_win(&board).is_some() || is_full(&board) {
            results.push(check_win(&board));
            return;
        }
        for position in get_available_moves(&board) {
            let after_x = board.with_mark(position, X);
            if check_win(&after_x).is_some() || is_full(&after_x) {
                results.push(check_win(&after_x));
                continue;
            }
            let reply = calculate_minimax_move(&BotInput {
                board: after_x,
                current_mark: O,
            })
            .unwrap();
            play_out_against_every_reply(after_x.with_mark(reply, O), results);
        }
    }

    #[test]
    fn test_hard_never_loses_against_any_line() {
        let mut results = Vec::new();
        play_out_against_every_reply(Board::new(), &mut results);
        assert!(!results.is_empty());
        assert!(results.iter().all(|&winner| winner != Some(X)));
    }

    #[test]
    fn test_hard_against_itself_draws() {
        let mut board = Board::new();
        let mut mark = X;
        while check_win(&board).is_none() && !is_full(&board) {
            let position = calculate_minimax_move(&BotInput {
                board,
                current_mark: mark,
            })
            .unwrap();
            board.set(position, mark);
            mark = mark.opponent().unwrap();
        }
        assert_eq!(check_win(&board), None);
    }

    #[test]
    fn test_hard_never_loses_against_random_and_medium() {
        for seed in 0..10 {
            for opponent in [Difficulty::Easy, Difficulty::Medium] {
                let mut rng = SessionRng::new(seed);
                let mut board = Board::new();
                let mut mark = X;
                while check_win(&board).is_none() && !is_full(&board) {
                    let bot_input = BotInput {
                        board,
                        current_mark: mark,
                    };
                    let difficulty = if mark == X { opponent } else { Difficulty::Hard };
                    let position = calculate_move(difficulty, &bot_input, &mut rng).unwrap();
                    board.set(position, mark);
                    mark = mark.opponent().unwrap();
                }
                assert_ne!(check_win(&board), Some(X), "seed {}", seed);
            }
        }
    }
}
