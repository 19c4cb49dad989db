//! Move selection policy
//!
//! The selector layers immediate tactics over the deep search: a full
//! win pass, then a full block pass, both in board order; only then
//! does difficulty matter. All randomness (easy's uniform pick and the
//! tie-break shuffle for the search) comes from one owned, seedable
//! ChaCha8 stream, never from an ambient source.

use std::sync::atomic::{AtomicBool, Ordering};

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::{Board, Mark};
use crate::eval::SCORE_CUTOFF;
use crate::rules::detect_win;
use crate::search::minimax;

/// Opponent mode. `Human` means no computer player; the controller
/// never requests a move for it, but the selector still answers so the
/// tactic guarantees hold for every mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Human,
    Easy,
    Medium,
    Hard,
}

#[derive(Debug, Error)]
#[error("unknown difficulty `{0}`, expected human, easy, medium or hard")]
pub struct ParseDifficultyError(String);

impl std::str::FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "human" => Ok(Difficulty::Human),
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(ParseDifficultyError(other.to_string())),
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Difficulty::Human => "human",
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        };
        write!(f, "{}", name)
    }
}

impl Difficulty {
    /// Search depth for a board side: base 2, deepened to 4 on small
    /// boards (N <= 4), cut to 1 on large ones (N >= 6). Hard uses the
    /// full depth; lower difficulties cap it at 2.
    pub fn search_depth(self, size: usize) -> u32 {
        let mut depth = 2;
        if size <= 4 {
            depth = 4;
        }
        if size >= 6 {
            depth = 1;
        }
        match self {
            Difficulty::Hard => depth,
            _ => depth.min(2),
        }
    }
}

/// Computer move selector with a seedable RNG for tie-breaking
pub struct MoveSelector {
    rng: ChaCha8Rng,
}

impl MoveSelector {
    pub fn new() -> Self {
        Self::with_seed(42)
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    /// Pick a move for `player`. Returns `None` only when the board
    /// has no empty cell.
    ///
    /// Policy order: first immediate winning cell (full pass, board
    /// order), else first cell where the opponent would win (forced
    /// block), else a uniformly random cell on easy, else the
    /// depth-limited search over a shuffled candidate list where ties
    /// keep the earliest candidate seen.
    pub fn choose_move(
        &mut self,
        difficulty: Difficulty,
        board: &Board,
        win_len: usize,
        player: Mark,
    ) -> Option<usize> {
        self.choose_move_inner(difficulty, board, win_len, player, None)
    }

    /// Like [`choose_move`](Self::choose_move), but checks `cancel`
    /// once per top-level search candidate and bails out with `None`
    /// when it is raised. Used by the background worker.
    pub fn choose_move_with_cancel(
        &mut self,
        difficulty: Difficulty,
        board: &Board,
        win_len: usize,
        player: Mark,
        cancel: &AtomicBool,
    ) -> Option<usize> {
        self.choose_move_inner(difficulty, board, win_len, player, Some(cancel))
    }

    fn choose_move_inner(
        &mut self,
        difficulty: Difficulty,
        board: &Board,
        win_len: usize,
        player: Mark,
        cancel: Option<&AtomicBool>,
    ) -> Option<usize> {
        let empty = board.empty_cells();
        if empty.is_empty() {
            return None;
        }

        let mut scratch = board.clone();

        // Immediate win: a full pass before any block, so a win is
        // never shadowed by a block earlier in board order.
        if let Some(index) = first_winning_cell(&mut scratch, &empty, win_len, player) {
            return Some(index);
        }
        // Forced block: first cell where the opponent would win
        if let Some(index) = first_winning_cell(&mut scratch, &empty, win_len, player.opponent()) {
            return Some(index);
        }

        match difficulty {
            Difficulty::Human | Difficulty::Easy => {
                Some(empty[self.rng.gen_range(0..empty.len())])
            }
            Difficulty::Medium | Difficulty::Hard => {
                let depth = difficulty.search_depth(board.size());

                // Shuffle so equal-scoring candidates tie-break
                // randomly across calls; within one call the earliest
                // candidate keeps the tie.
                let mut candidates = empty;
                candidates.shuffle(&mut self.rng);

                let mut best: Option<(usize, i32)> = None;
                for index in candidates {
                    if let Some(flag) = cancel {
                        if flag.load(Ordering::Relaxed) {
                            return None;
                        }
                    }

                    scratch.set_raw(index, player);
                    let score = minimax(&mut scratch, player, depth, false);
                    scratch.clear_raw(index);

                    if best.map_or(true, |(_, b)| score > b) {
                        best = Some((index, score));
                    }
                    if score >= SCORE_CUTOFF {
                        break;
                    }
                }
                best.map(|(index, _)| index)
            }
        }
    }
}

impl Default for MoveSelector {
    fn default() -> Self {
        Self::new()
    }
}

/// First cell (board order) where placing `mark` completes a line
fn first_winning_cell(
    scratch: &mut Board,
    empty: &[usize],
    win_len: usize,
    mark: Mark,
) -> Option<usize> {
    for &index in empty {
        scratch.set_raw(index, mark);
        let wins = detect_win(scratch, win_len, Some(index)).is_some();
        scratch.clear_raw(index);
        if wins {
            return Some(index);
        }
    }
    None
}
