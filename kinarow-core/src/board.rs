//! Board storage, marks, and the clamped size/win-length configuration

use serde::{Deserialize, Serialize};

/// Smallest supported board side
pub const MIN_SIZE: usize = 3;
/// Largest supported board side
pub const MAX_SIZE: usize = 8;
/// Smallest supported win length
pub const MIN_WIN_LEN: usize = 3;

/// A player's mark. X moves first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

impl std::fmt::Display for Mark {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mark::X => write!(f, "X"),
            Mark::O => write!(f, "O"),
        }
    }
}

/// Board side N and win length K, accepted from the surrounding
/// application. Out-of-range values are clamped, never rejected:
/// N to [3,8] (default 3), K to [3,N] (default N).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    size: usize,
    win_len: usize,
}

impl BoardConfig {
    pub fn new(size: usize, win_len: usize) -> Self {
        let size = size.clamp(MIN_SIZE, MAX_SIZE);
        let win_len = win_len.clamp(MIN_WIN_LEN, size);
        Self { size, win_len }
    }

    /// Build from optional settings; missing values fall back to the
    /// defaults (N = 3, K = N).
    pub fn from_settings(size: Option<usize>, win_len: Option<usize>) -> Self {
        let size = size.unwrap_or(MIN_SIZE).clamp(MIN_SIZE, MAX_SIZE);
        let win_len = win_len.unwrap_or(size).clamp(MIN_WIN_LEN, size);
        Self { size, win_len }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn win_len(&self) -> usize {
        self.win_len
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self::new(MIN_SIZE, MIN_WIN_LEN)
    }
}

/// An N x N board of cells, row-major (`index = row * N + col`).
///
/// Boards are snapshots: the game controller produces a new board per
/// accepted move via [`Board::place`] and never mutates one after the
/// fact. The search mutates its own scratch copy through the
/// crate-internal raw accessors instead of cloning per node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    size: usize,
    cells: Vec<Option<Mark>>,
}

impl Board {
    /// All-empty board. `size` must already be in range; the
    /// configuration surface clamps before this point.
    pub fn empty(size: usize) -> Self {
        assert!(
            (MIN_SIZE..=MAX_SIZE).contains(&size),
            "board size {} out of range",
            size
        );
        Self {
            size,
            cells: vec![None; size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of cells (N squared)
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn cells(&self) -> &[Option<Mark>] {
        &self.cells
    }

    pub fn get(&self, index: usize) -> Option<Mark> {
        self.cells[index]
    }

    pub fn index(&self, row: usize, col: usize) -> usize {
        debug_assert!(row < self.size && col < self.size);
        row * self.size + col
    }

    pub fn row_col(&self, index: usize) -> (usize, usize) {
        (index / self.size, index % self.size)
    }

    /// True when no cell holds a mark
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|c| c.is_none())
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| c.is_some())
    }

    /// Indices of empty cells in board order
    pub fn empty_cells(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(i, c)| c.is_none().then_some(i))
            .collect()
    }

    /// True when any occupied cell lies within Chebyshev distance 1
    /// of `index`
    pub fn has_neighbor(&self, index: usize) -> bool {
        let (row, col) = self.row_col(index);
        let n = self.size as isize;
        for dr in -1isize..=1 {
            for dc in -1isize..=1 {
                if dr == 0 && dc == 0 {
                    continue;
                }
                let r = row as isize + dr;
                let c = col as isize + dc;
                if r < 0 || r >= n || c < 0 || c >= n {
                    continue;
                }
                if self.cells[(r * n + c) as usize].is_some() {
                    return true;
                }
            }
        }
        false
    }

    /// Produce a new board with `mark` placed at `index`.
    ///
    /// The target cell must be empty: placing onto an occupied cell is
    /// a precondition violation and fails fast. The controller is the
    /// sole caller on the live-game path and validates first.
    pub fn place(&self, index: usize, mark: Mark) -> Board {
        assert!(index < self.cells.len(), "cell index {} out of range", index);
        assert!(
            self.cells[index].is_none(),
            "cell {} is already occupied",
            index
        );
        let mut next = self.clone();
        next.cells[index] = Some(mark);
        next
    }

    /// Place without snapshotting; search-internal mutate-then-restore.
    pub(crate) fn set_raw(&mut self, index: usize, mark: Mark) {
        debug_assert!(self.cells[index].is_none());
        self.cells[index] = Some(mark);
    }

    /// Undo a `set_raw`
    pub(crate) fn clear_raw(&mut self, index: usize) {
        debug_assert!(self.cells[index].is_some());
        self.cells[index] = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_clamps_size() {
        assert_eq!(BoardConfig::new(1, 3).size(), 3);
        assert_eq!(BoardConfig::new(12, 3).size(), 8);
        assert_eq!(BoardConfig::new(5, 3).size(), 5);
    }

    #[test]
    fn test_config_clamps_win_len() {
        assert_eq!(BoardConfig::new(5, 1).win_len(), 3);
        assert_eq!(BoardConfig::new(5, 9).win_len(), 5);
        assert_eq!(BoardConfig::new(3, 8).win_len(), 3);
    }

    #[test]
    fn test_config_defaults() {
        let config = BoardConfig::from_settings(None, None);
        assert_eq!(config.size(), 3);
        assert_eq!(config.win_len(), 3);

        // missing K defaults to N
        let config = BoardConfig::from_settings(Some(6), None);
        assert_eq!(config.size(), 6);
        assert_eq!(config.win_len(), 6);
    }

    #[test]
    fn test_indexing_round_trip() {
        let board = Board::empty(5);
        for row in 0..5 {
            for col in 0..5 {
                assert_eq!(board.row_col(board.index(row, col)), (row, col));
            }
        }
    }

    #[test]
    fn test_place_is_copy_on_write() {
        let board = Board::empty(3);
        let next = board.place(4, Mark::X);
        assert_eq!(board.get(4), None);
        assert_eq!(next.get(4), Some(Mark::X));
    }

    #[test]
    #[should_panic(expected = "already occupied")]
    fn test_place_occupied_panics() {
        let board = Board::empty(3).place(4, Mark::X);
        let _ = board.place(4, Mark::O);
    }

    #[test]
    fn test_has_neighbor() {
        let board = Board::empty(5).place(12, Mark::X); // center of 5x5
        assert!(board.has_neighbor(6)); // diagonal neighbor
        assert!(board.has_neighbor(11));
        assert!(!board.has_neighbor(0)); // far corner
        assert!(!board.has_neighbor(24));
    }

    #[test]
    fn test_empty_cells_board_order() {
        let board = Board::empty(3).place(0, Mark::X).place(5, Mark::O);
        assert_eq!(board.empty_cells(), vec![1, 2, 3, 4, 6, 7, 8]);
    }

    #[test]
    fn test_full_and_blank() {
        let mut board = Board::empty(3);
        assert!(board.is_blank());
        assert!(!board.is_full());
        for i in 0..9 {
            board = board.place(i, if i % 2 == 0 { Mark::X } else { Mark::O });
        }
        assert!(board.is_full());
        assert!(!board.is_blank());
    }
}
