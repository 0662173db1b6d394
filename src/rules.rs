//! Game rules: turn order, legal moves, move application and scoring.
//!
//! Every function here is pure over a [`Board`] value. The side to move is
//! always derived from the mark counts on the board; no external "current
//! player" is consulted.

use crate::board::{Board, Mark, Move};
use crate::constants::{DRAW, LINES, O_WIN, X_WIN};
use crate::error::{Error, Result};

/// Result of a game as read off a board.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    XWins,
    OWins,
    Draw,
    InProgress,
}

/// Count the X and O marks on the board.
pub fn mark_counts(board: &Board) -> (usize, usize) {
    board
        .cells()
        .fold((0, 0), |(x, o), (_, cell)| match cell {
            Some(Mark::X) => (x + 1, o),
            Some(Mark::O) => (x, o + 1),
            None => (x, o),
        })
}

/// The mark of the player to move. X moves first, so X is to move whenever
/// the counts are equal.
///
/// On terminal boards the result is still the count-derived mark, but it has
/// no meaning for play.
pub fn whose_turn(board: &Board) -> Mark {
    let (x, o) = mark_counts(board);
    if x == o { Mark::X } else { Mark::O }
}

/// All empty cells in row-major order.
///
/// The order is part of the engine's contract: the search breaks ties in
/// favour of the first move listed here.
pub fn legal_moves(board: &Board) -> Vec<Move> {
    board
        .cells()
        .filter(|(_, cell)| cell.is_none())
        .map(|(mv, _)| mv)
        .collect()
}

/// Return the board that results from the side to move playing `mv`.
///
/// The input board is never modified. Fails with [`Error::Occupied`] if the
/// target cell already holds a mark.
pub fn apply_move(board: &Board, mv: Move) -> Result<Board> {
    if !board.is_empty_at(mv) {
        return Err(Error::Occupied { mv });
    }
    Ok(board.with_mark(mv, whose_turn(board)))
}

/// Each legal move paired with the board it produces, in row-major order.
pub(crate) fn successors(board: &Board) -> impl Iterator<Item = (Move, Board)> + '_ {
    let mark = whose_turn(board);
    board
        .cells()
        .filter(|(_, cell)| cell.is_none())
        .map(move |(mv, _)| (mv, board.with_mark(mv, mark)))
}

/// The mark holding a completed line, if any.
///
/// Rows and columns are checked before diagonals, but on a reachable board at
/// most one mark can hold a line, so the order is not observable.
pub fn winner(board: &Board) -> Option<Mark> {
    LINES.iter().find_map(|line| line_owner(board, line))
}

fn line_owner(board: &Board, line: &[(usize, usize); 3]) -> Option<Mark> {
    let [a, b, c] = line.map(|(row, col)| board.get(Move::at(row, col)));
    match a {
        Some(mark) if b == a && c == a => Some(mark),
        _ => None,
    }
}

/// True if someone has won or no empty cell remains.
pub fn is_terminal(board: &Board) -> bool {
    winner(board).is_some() || board.is_full()
}

/// Score of a terminal board from X's point of view: +1, -1 or 0.
///
/// A board with no winner scores 0 whether or not it is full, so calling this
/// on a non-terminal board yields 0 rather than a meaningful value.
pub fn utility(board: &Board) -> i32 {
    match winner(board) {
        Some(Mark::X) => X_WIN,
        Some(Mark::O) => O_WIN,
        None => DRAW,
    }
}

pub fn outcome(board: &Board) -> Outcome {
    match winner(board) {
        Some(Mark::X) => Outcome::XWins,
        Some(Mark::O) => Outcome::OWins,
        None if board.is_full() => Outcome::Draw,
        None => Outcome::InProgress,
    }
}

/// Check that a board could arise from legal play.
///
/// X must have as many marks as O or exactly one more, and the two marks
/// cannot both hold completed lines.
pub fn validate(board: &Board) -> Result<()> {
    let (x_count, o_count) = mark_counts(board);
    if x_count != o_count && x_count != o_count + 1 {
        return Err(Error::InvalidPieceCounts { x_count, o_count });
    }

    let mut owners = LINES.iter().filter_map(|line| line_owner(board, line));
    if let Some(first) = owners.next() {
        if owners.any(|other| other != first) {
            return Err(Error::MultipleWinners);
        }
    }

    Ok(())
}
