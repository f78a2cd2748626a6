//! Stateless move application: gravity placement followed by a four-axis
//! scan for a winning run.

use super::board::{Board, Cell};
use super::player::Player;

/// The four lines a run can lie on, each as a (row, col) step. The opposite
/// direction is the negated step.
const AXES: [(isize, isize); 4] = [
    (0, 1),  // horizontal
    (1, 0),  // vertical
    (1, -1), // anti-diagonal (/)
    (1, 1),  // diagonal (\)
];

/// Result of a single `apply_move` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    pub board: Board,
    pub placed: bool,
    pub win: bool,
    pub tie: bool,
    /// Landing row, `None` when nothing was placed.
    pub row: Option<usize>,
}

impl MoveOutcome {
    fn rejected(board: Board) -> Self {
        MoveOutcome {
            board,
            placed: false,
            win: false,
            tie: false,
            row: None,
        }
    }
}

/// Lowest empty row in `col`, scanning from the bottom up.
pub fn landing_row(board: &Board, col: usize) -> Option<usize> {
    if col >= board.cols() {
        return None;
    }
    (0..board.rows())
        .rev()
        .find(|&row| board.get(row, col) == Cell::Empty)
}

/// Drop `player`'s token into `column` and report whether it placed, won or
/// tied the game.
///
/// A full or out-of-range column yields `placed == false` with the board
/// returned untouched. The caller is responsible for not calling this on a
/// finished game.
pub fn apply_move(board: &Board, column: usize, player: Player, winning_count: usize) -> MoveOutcome {
    let Some(row) = landing_row(board, column) else {
        return MoveOutcome::rejected(board.clone());
    };

    let mut next = board.clone();
    let cell = player.to_cell();
    next.set(row, column, cell);

    let win = AXES
        .iter()
        .any(|&step| axis_wins(&next, row, column, cell, step, winning_count));
    let tie = !win && next.is_full();

    MoveOutcome {
        board: next,
        placed: true,
        win,
        tie,
        row: Some(row),
    }
}

/// Walk from `(row, col)` in both directions of `step` and compare the run's
/// endpoints against `winning_count`.
fn axis_wins(
    board: &Board,
    row: usize,
    col: usize,
    cell: Cell,
    step: (isize, isize),
    winning_count: usize,
) -> bool {
    let forward = run_end(board, row, col, cell, step);
    let backward = run_end(board, row, col, cell, (-step.0, -step.1));
    let span = winning_count.saturating_sub(1);

    forward.0.abs_diff(backward.0) >= span || forward.1.abs_diff(backward.1) >= span
}

/// Last coordinate of the run of `cell` starting at `(row, col)` and moving
/// by `step`.
fn run_end(board: &Board, row: usize, col: usize, cell: Cell, step: (isize, isize)) -> (isize, isize) {
    let (mut r, mut c) = (row as isize, col as isize);
    while board.in_bounds(r + step.0, c + step.1)
        && board.get((r + step.0) as usize, (c + step.1) as usize) == cell
    {
        r += step.0;
        c += step.1;
    }
    (r, c)
}
