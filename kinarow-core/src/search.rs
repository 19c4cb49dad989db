//! Depth-limited minimax
//!
//! Plain minimax: no alpha-beta, no transposition table. The board is
//! mutated in place and restored around each recursive call rather
//! than cloned per node; the caller's board is unchanged on return.
//!
//! There is no terminal win check inside the recursion: a leaf is
//! depth zero or a full board, scored by the static evaluator. The
//! +-SCORE_CUTOFF early exits are kept paired with the evaluator's
//! 2N^3 bound.

use crate::board::{Board, Mark};
use crate::eval::{evaluate, SCORE_CUTOFF};

/// Minimax score of `board` for `player`.
///
/// `maximizing` plies place `player`'s mark; minimizing plies place
/// the opponent's. Candidate moves on a maximizing ply are restricted
/// to empty cells adjacent (Chebyshev distance 1) to an occupied cell,
/// with every cell a candidate on a blank board; minimizing plies
/// always consider every empty cell. The asymmetry is intentional
/// tuned behavior: it trims branching at the engine's own plies while
/// modeling the opponent in full.
pub fn minimax(board: &mut Board, player: Mark, depth: u32, maximizing: bool) -> i32 {
    if depth == 0 || board.is_full() {
        return evaluate(board, player);
    }

    if maximizing {
        let mut best = i32::MIN;
        for index in max_candidates(board) {
            board.set_raw(index, player);
            let score = minimax(board, player, depth - 1, false);
            board.clear_raw(index);
            best = best.max(score);
            if best >= SCORE_CUTOFF {
                break;
            }
        }
        best
    } else {
        let opponent = player.opponent();
        let mut best = i32::MAX;
        for index in board.empty_cells() {
            board.set_raw(index, opponent);
            let score = minimax(board, player, depth - 1, true);
            board.clear_raw(index);
            best = best.min(score);
            if best <= -SCORE_CUTOFF {
                break;
            }
        }
        best
    }
}

/// Candidate cells for a maximizing ply: empty cells next to existing
/// marks, or every empty cell when the board is blank.
fn max_candidates(board: &Board) -> Vec<usize> {
    let empty = board.empty_cells();
    if board.is_blank() {
        return empty;
    }
    let near: Vec<usize> = empty
        .iter()
        .copied()
        .filter(|&i| board.has_neighbor(i))
        .collect();
    if near.is_empty() {
        empty
    } else {
        near
    }
}
