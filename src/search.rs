//! Minimax search with alpha-beta pruning.
//!
//! X maximizes and O minimizes the [`utility`] of the final board. The search
//! walks the full game tree below the given position; on a 3x3 board this
//! finishes quickly enough that no transposition table is kept.
//!
//! Moves are tried in row-major order and a root move only replaces the
//! current best when it is strictly better, so among equally good moves the
//! first one in that order is returned. Repeated calls on the same board
//! always return the same move.

use tracing::{debug, trace};

use crate::board::{Board, Mark, Move};
use crate::constants::{INFINITY, NEG_INFINITY, O_WIN, X_WIN};
use crate::rules::{is_terminal, successors, utility, whose_turn};

/// Result of a root search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Analysis {
    /// The chosen move, or `None` if the board is terminal.
    pub best: Option<Move>,
    /// Minimax value of the chosen move from X's point of view.
    pub value: Option<i32>,
    /// Number of positions visited, root included.
    pub nodes: u64,
    /// Number of beta and alpha cutoffs taken.
    pub cutoffs: u64,
}

#[derive(Default)]
struct SearchStats {
    nodes: u64,
    cutoffs: u64,
}

/// Return the optimal move for the side to move, or `None` on a terminal board.
pub fn best_move(board: &Board) -> Option<Move> {
    analyze(board).best
}

/// Run the root search and report the chosen move along with search counters.
pub fn analyze(board: &Board) -> Analysis {
    let mut stats = SearchStats::default();
    stats.nodes += 1;

    let (best, value) = root_search(board, &mut stats);

    debug!(
        board = %board.to_compact(),
        best = ?best.map(|mv| mv.to_string()),
        value = ?value,
        nodes = stats.nodes,
        cutoffs = stats.cutoffs,
        "search complete"
    );

    Analysis {
        best,
        value,
        nodes: stats.nodes,
        cutoffs: stats.cutoffs,
    }
}

fn root_search(board: &Board, stats: &mut SearchStats) -> (Option<Move>, Option<i32>) {
    if is_terminal(board) {
        return (None, None);
    }

    let turn = whose_turn(board);
    let mut alpha = NEG_INFINITY;
    let mut beta = INFINITY;
    let mut best = None;

    for (mv, child) in successors(board) {
        match turn {
            Mark::X => {
                let v = min_search(&child, alpha, beta, stats);
                trace!(mv = %mv, v, "root candidate");
                if v == X_WIN {
                    return (Some(mv), Some(v));
                }
                if v > alpha {
                    alpha = v;
                    best = Some((mv, v));
                }
            }
            Mark::O => {
                let v = max_search(&child, alpha, beta, stats);
                trace!(mv = %mv, v, "root candidate");
                if v == O_WIN {
                    return (Some(mv), Some(v));
                }
                if v < beta {
                    beta = v;
                    best = Some((mv, v));
                }
            }
        }
    }

    match best {
        Some((mv, v)) => (Some(mv), Some(v)),
        None => (None, None),
    }
}

/// Value of `board` with X to move, searched inside the window `(alpha, beta)`.
///
/// Returns `utility` for terminal boards. Stops as soon as a reply reaches
/// `beta`, since the minimizing ancestor already has something at least as good.
pub fn max_value(board: &Board, alpha: i32, beta: i32) -> i32 {
    max_search(board, alpha, beta, &mut SearchStats::default())
}

/// Value of `board` with O to move, searched inside the window `(alpha, beta)`.
///
/// Stops as soon as a reply falls to `alpha`.
pub fn min_value(board: &Board, alpha: i32, beta: i32) -> i32 {
    min_search(board, alpha, beta, &mut SearchStats::default())
}

fn max_search(board: &Board, mut alpha: i32, beta: i32, stats: &mut SearchStats) -> i32 {
    stats.nodes += 1;
    if is_terminal(board) {
        return utility(board);
    }

    let mut v = NEG_INFINITY;
    for (_, child) in successors(board) {
        v = v.max(min_search(&child, alpha, beta, stats));
        if v >= beta {
            stats.cutoffs += 1;
            return v;
        }
        alpha = alpha.max(v);
    }
    v
}

fn min_search(board: &Board, alpha: i32, mut beta: i32, stats: &mut SearchStats) -> i32 {
    stats.nodes += 1;
    if is_terminal(board) {
        return utility(board);
    }

    let mut v = INFINITY;
    for (_, child) in successors(board) {
        v = v.min(max_search(&child, alpha, beta, stats));
        if v <= alpha {
            stats.cutoffs += 1;
            return v;
        }
        beta = beta.min(v);
    }
    v
}

/// Full minimax value of a position from X's point of view.
pub fn evaluate(board: &Board) -> i32 {
    if is_terminal(board) {
        return utility(board);
    }
    match whose_turn(board) {
        Mark::X => max_value(board, NEG_INFINITY, INFINITY),
        Mark::O => min_value(board, NEG_INFINITY, INFINITY),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{apply_move, legal_moves};

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    fn mv(row: usize, col: usize) -> Move {
        Move::new(row, col).unwrap()
    }

    /// Plain minimax without pruning, for cross-checking values.
    fn plain_minimax(b: &Board) -> i32 {
        if is_terminal(b) {
            return utility(b);
        }
        let values = legal_moves(b)
            .into_iter()
            .map(|m| plain_minimax(&apply_move(b, m).unwrap()));
        match whose_turn(b) {
            Mark::X => values.max().unwrap(),
            Mark::O => values.min().unwrap(),
        }
    }

    #[test]
    fn test_terminal_board_has_no_move() {
        assert_eq!(best_move(&board("XXX/OO./...")), None);
        assert_eq!(best_move(&board("XOX/XOO/OXX")), None);
        let analysis = analyze(&board("XOX/XOO/OXX"));
        assert_eq!(analysis.value, None);
        assert_eq!(analysis.nodes, 1);
    }

    #[test]
    fn test_single_candidate_is_returned() {
        // One empty cell, X to move, the move draws
        let b = board("XOX/XOO/OX.");
        assert_eq!(best_move(&b), Some(mv(2, 2)));
    }

    #[test]
    fn test_first_move_recorded_when_every_move_loses() {
        // X has two open threats; every O reply loses
        let b = board("XX./XO./..O");
        assert_eq!(whose_turn(&b), Mark::O);
        let analysis = analyze(&b);
        assert_eq!(analysis.best, Some(mv(0, 2)));
        assert_eq!(analysis.value, Some(1));
    }

    #[test]
    fn test_x_to_move_wins_on_top_row() {
        // Equal counts, so X is to move and completes row 0
        let b = board("XX./OO./...");
        assert_eq!(whose_turn(&b), Mark::X);
        assert_eq!(best_move(&b), Some(mv(0, 2)));
    }

    #[test]
    fn test_o_completes_row_instead_of_blocking() {
        let b = board("XX./OO./X..");
        assert_eq!(whose_turn(&b), Mark::O);
        assert_eq!(best_move(&b), Some(mv(1, 2)));
        assert_eq!(analyze(&b).value, Some(-1));
    }

    #[test]
    fn test_x_takes_win() {
        let b = board("XX./OO./X.O");
        assert_eq!(best_move(&b), Some(mv(0, 2)));
        assert_eq!(analyze(&b).value, Some(1));
    }

    #[test]
    fn test_o_takes_win_over_block() {
        // O wins in column 0 while X threatens column 1
        let b = board("OX./OX./..X");
        assert_eq!(whose_turn(&b), Mark::O);
        assert_eq!(best_move(&b), Some(mv(2, 0)));
    }

    #[test]
    fn test_o_blocks_when_no_win() {
        // X threatens row 0; O has nothing to complete
        let b = board("XX./.O./...");
        assert_eq!(whose_turn(&b), Mark::O);
        assert_eq!(best_move(&b), Some(mv(0, 2)));
    }

    #[test]
    fn test_empty_board_value_is_draw() {
        assert_eq!(evaluate(&Board::new()), 0);
    }

    #[test]
    fn test_deterministic() {
        let b = board("X../.../...");
        let first = best_move(&b);
        for _ in 0..5 {
            assert_eq!(best_move(&b), first);
        }
    }

    #[test]
    fn test_values_match_plain_minimax() {
        for s in ["X../.../...", "X../.O./...", "XO./.../...", "X.O/.X./...", "XX./OO./..."] {
            let b = board(s);
            assert_eq!(evaluate(&b), plain_minimax(&b), "value mismatch for {s}");
            let analysis = analyze(&b);
            assert_eq!(analysis.value, Some(plain_minimax(&b)), "root value mismatch for {s}");
        }
    }

    #[test]
    fn test_pruning_visits_fewer_nodes() {
        let analysis = analyze(&Board::new());
        assert!(analysis.cutoffs > 0);
        // Unpruned tree from the empty board has 549_946 nodes
        assert!(analysis.nodes < 549_946, "visited {}", analysis.nodes);
    }

    #[test]
    fn test_max_min_value_on_terminal() {
        let won = board("XXX/OO./...");
        assert_eq!(max_value(&won, NEG_INFINITY, INFINITY), 1);
        assert_eq!(min_value(&won, NEG_INFINITY, INFINITY), 1);
    }
}
