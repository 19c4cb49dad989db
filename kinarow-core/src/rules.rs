//! Win and draw detection
//!
//! Detection is incremental: it walks outward from the most recent move
//! along the four line axes instead of rescanning the whole board, so a
//! call costs O(4K) regardless of board size.

use crate::board::{Board, Mark};

/// Line axes in fixed evaluation order: horizontal, vertical,
/// diagonal, anti-diagonal. The order fixes tie-break determinism when
/// a move completes more than one line.
pub const DIRECTIONS: [(isize, isize); 4] = [
    (0, 1),  // horizontal
    (1, 0),  // vertical
    (1, 1),  // diagonal
    (1, -1), // anti-diagonal
];

/// A completed line: the mark that formed it and exactly K cell
/// indices, contiguous along one axis and containing the winning move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Win {
    pub mark: Mark,
    pub line: Vec<usize>,
}

/// Result of a position, derived after each accepted move
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    InProgress,
    Win(Win),
    Draw,
}

/// Check whether the move at `last_index` completed a K-in-a-row.
///
/// Returns `None` when `last_index` is absent or the cell there is
/// empty. For each axis the contiguous same-mark run through the move
/// is collected (at most K-1 steps each way), and every K-length
/// window of the run is tested, so a run longer than K still wins.
pub fn detect_win(board: &Board, win_len: usize, last_index: Option<usize>) -> Option<Win> {
    let index = last_index?;
    let mark = board.get(index)?;

    let n = board.size() as isize;
    let (row, col) = board.row_col(index);
    let (row, col) = (row as isize, col as isize);

    for (dr, dc) in DIRECTIONS {
        let mut run = vec![index];

        // forward
        for step in 1..win_len as isize {
            let r = row + dr * step;
            let c = col + dc * step;
            if r < 0 || r >= n || c < 0 || c >= n {
                break;
            }
            let i = (r * n + c) as usize;
            if board.get(i) == Some(mark) {
                run.push(i);
            } else {
                break;
            }
        }
        // backward
        for step in 1..win_len as isize {
            let r = row - dr * step;
            let c = col - dc * step;
            if r < 0 || r >= n || c < 0 || c >= n {
                break;
            }
            let i = (r * n + c) as usize;
            if board.get(i) == Some(mark) {
                run.insert(0, i);
            } else {
                break;
            }
        }

        if run.len() >= win_len {
            // The run is same-mark by construction; pick the first
            // window that contains the triggering move.
            for window in run.windows(win_len) {
                debug_assert!(window.iter().all(|&i| board.get(i) == Some(mark)));
                if window.contains(&index) {
                    return Some(Win {
                        mark,
                        line: window.to_vec(),
                    });
                }
            }
        }
    }

    None
}

/// Derive the position's outcome: win through the last move, draw on a
/// full board, otherwise still in progress.
pub fn detect_result(board: &Board, win_len: usize, last_index: Option<usize>) -> Outcome {
    if let Some(win) = detect_win(board, win_len, last_index) {
        return Outcome::Win(win);
    }
    if board.is_full() {
        return Outcome::Draw;
    }
    Outcome::InProgress
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Place marks at the given indices, `last` last
    fn board_with(size: usize, mark: Mark, indices: &[usize]) -> Board {
        let mut board = Board::empty(size);
        for &i in indices {
            board = board.place(i, mark);
        }
        board
    }

    #[test]
    fn test_horizontal_win() {
        let board = board_with(3, Mark::X, &[0, 1, 2]);
        let win = detect_win(&board, 3, Some(2)).expect("should detect win");
        assert_eq!(win.mark, Mark::X);
        assert_eq!(win.line, vec![0, 1, 2]);
    }

    #[test]
    fn test_vertical_win() {
        let board = board_with(4, Mark::O, &[1, 5, 9]);
        let win = detect_win(&board, 3, Some(5)).expect("should detect win");
        assert_eq!(win.line, vec![1, 5, 9]);
    }

    #[test]
    fn test_diagonal_win() {
        let board = board_with(3, Mark::X, &[0, 4, 8]);
        let win = detect_win(&board, 3, Some(8)).expect("should detect win");
        assert_eq!(win.line, vec![0, 4, 8]);
    }

    #[test]
    fn test_anti_diagonal_win() {
        let board = board_with(3, Mark::O, &[2, 4, 6]);
        let win = detect_win(&board, 3, Some(4)).expect("should detect win");
        assert_eq!(win.line, vec![2, 4, 6]);
    }

    #[test]
    fn test_no_win_short_run() {
        let board = board_with(4, Mark::X, &[0, 1]);
        assert!(detect_win(&board, 3, Some(1)).is_none());
    }

    #[test]
    fn test_none_without_last_index() {
        let board = board_with(3, Mark::X, &[0, 1, 2]);
        assert!(detect_win(&board, 3, None).is_none());
    }

    #[test]
    fn test_none_on_empty_cell() {
        let board = board_with(3, Mark::X, &[0, 1]);
        assert!(detect_win(&board, 3, Some(5)).is_none());
    }

    #[test]
    fn test_run_longer_than_k_wins() {
        // N=5, K=3: a run of four through the last move must still win
        // (window scan, not exact-length match). Row 0: cells 0..=3,
        // move at 2 joins the run.
        let mut board = Board::empty(5);
        for i in [0, 1, 3] {
            board = board.place(i, Mark::X);
        }
        let board = board.place(2, Mark::X);
        let win = detect_win(&board, 3, Some(2)).expect("should detect win in run of 4");
        assert_eq!(win.line.len(), 3);
        assert!(win.line.contains(&2));
        for &i in &win.line {
            assert_eq!(board.get(i), Some(Mark::X));
        }
    }

    #[test]
    fn test_win_at_run_edge_contains_move() {
        // Move completes the run at its far end; the returned window
        // must still contain the move.
        let board = board_with(5, Mark::O, &[0, 1, 2, 3]);
        let win = detect_win(&board, 3, Some(3)).expect("should detect win");
        assert!(win.line.contains(&3));
        assert_eq!(win.line, vec![1, 2, 3]);
    }

    #[test]
    fn test_window_respects_k() {
        // K=4 on the same run of four
        let board = board_with(5, Mark::X, &[0, 1, 2, 3]);
        let win = detect_win(&board, 4, Some(3)).expect("should detect win");
        assert_eq!(win.line, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_opponent_cell_breaks_run() {
        let mut board = board_with(5, Mark::X, &[0, 1, 3, 4]);
        board = board.place(2, Mark::O);
        assert!(detect_win(&board, 3, Some(4)).is_none());
        // but O at 2 does not win either
        assert!(detect_win(&board, 3, Some(2)).is_none());
    }

    #[test]
    fn test_draw_on_full_board() {
        // X O X / X O O / O X X: full, no three-in-a-row
        let mut board = Board::empty(3);
        let marks = [
            Mark::X,
            Mark::O,
            Mark::X,
            Mark::X,
            Mark::O,
            Mark::O,
            Mark::O,
            Mark::X,
            Mark::X,
        ];
        for (i, m) in marks.into_iter().enumerate() {
            board = board.place(i, m);
        }
        assert_eq!(detect_result(&board, 3, Some(8)), Outcome::Draw);
    }

    #[test]
    fn test_in_progress() {
        let board = board_with(3, Mark::X, &[0]);
        assert_eq!(detect_result(&board, 3, Some(0)), Outcome::InProgress);
    }

    #[test]
    fn test_win_beats_draw_on_full_board() {
        // Full board where the last move completes a line
        let mut board = Board::empty(3);
        for i in [0, 1, 4, 5] {
            board = board.place(
                i,
                if i == 0 || i == 4 { Mark::X } else { Mark::O },
            );
        }
        for i in [2, 3, 6, 7] {
            board = board.place(i, if i == 3 || i == 6 { Mark::O } else { Mark::X });
        }
        let board = board.place(8, Mark::X);
        // 0,4,8 is an X diagonal
        match detect_result(&board, 3, Some(8)) {
            Outcome::Win(win) => assert_eq!(win.line, vec![0, 4, 8]),
            other => panic!("expected win, got {:?}", other),
        }
    }
}
