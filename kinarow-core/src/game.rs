//! Game controller: turn order, move validation, history, and the
//! handshake with an in-flight computer move.
//!
//! The controller owns a history of board snapshots and a cursor into
//! it. Undo steps the cursor back; a fresh move after undo truncates
//! the abandoned tail. Computer moves are two-phase (`begin_ai_move` /
//! `complete_ai_move`) with a generation ticket so a result computed
//! for a position that no longer exists is discarded, not applied.

use serde::{Deserialize, Serialize};

use crate::board::{Board, BoardConfig, Mark};
use crate::rules::{detect_result, Outcome};

/// Whole-game status as exposed to callers
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    InProgress,
    Won(Mark),
    Draw,
}

impl GameStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }
}

/// Handle for one in-flight computer move. Tickets from before a reset
/// or undo never match again.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveTicket(u64);

pub struct GameController {
    config: BoardConfig,
    history: Vec<Board>,
    cursor: usize,
    turn: Mark,
    status: GameStatus,
    winning_line: Option<Vec<usize>>,
    ai_pending: bool,
    generation: u64,
}

impl GameController {
    pub fn new(config: BoardConfig) -> Self {
        Self {
            config,
            history: vec![Board::empty(config.size())],
            cursor: 0,
            turn: Mark::X,
            status: GameStatus::InProgress,
            winning_line: None,
            ai_pending: false,
            generation: 0,
        }
    }

    /// Start over with a (possibly different) configuration. Any
    /// in-flight computer move is invalidated.
    pub fn reset(&mut self, config: BoardConfig) {
        self.config = config;
        self.history = vec![Board::empty(config.size())];
        self.cursor = 0;
        self.turn = Mark::X;
        self.status = GameStatus::InProgress;
        self.winning_line = None;
        self.ai_pending = false;
        self.generation += 1;
    }

    pub fn config(&self) -> BoardConfig {
        self.config
    }

    /// The current position
    pub fn board(&self) -> &Board {
        &self.history[self.cursor]
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn turn(&self) -> Mark {
        self.turn
    }

    /// Cells of the completed line, present exactly when the game is won
    pub fn winning_line(&self) -> Option<&[usize]> {
        self.winning_line.as_deref()
    }

    /// Number of accepted moves in the current line of play
    pub fn ply_count(&self) -> usize {
        self.cursor
    }

    pub fn ai_pending(&self) -> bool {
        self.ai_pending
    }

    pub fn can_undo(&self) -> bool {
        self.status == GameStatus::InProgress && self.cursor > 0
    }

    /// Play the current player's mark at `index`. Returns `false`
    /// without changing anything when the game is over, a computer move
    /// is in flight, the index is out of range, or the cell is taken.
    pub fn apply_move(&mut self, index: usize) -> bool {
        if self.status.is_terminal() || self.ai_pending {
            return false;
        }
        let board = self.board();
        if index >= board.len() || board.get(index).is_some() {
            return false;
        }

        let next = board.place(index, self.turn);
        self.history.truncate(self.cursor + 1);
        self.history.push(next);
        self.cursor += 1;

        match detect_result(self.board(), self.config.win_len(), Some(index)) {
            Outcome::Win(win) => {
                self.status = GameStatus::Won(win.mark);
                self.winning_line = Some(win.line);
            }
            Outcome::Draw => self.status = GameStatus::Draw,
            Outcome::InProgress => self.turn = self.turn.opponent(),
        }
        true
    }

    /// Step back one move. Only allowed mid-game; a finished game can
    /// only be reset. Cancels any in-flight computer move.
    pub fn undo(&mut self) -> bool {
        if !self.can_undo() {
            return false;
        }
        self.ai_pending = false;
        self.generation += 1;
        self.cursor -= 1;
        self.turn = self.turn.opponent();
        self.winning_line = None;
        true
    }

    /// Mark a computer move as in flight and hand out its ticket.
    /// Returns `None` when the game is over or a move is already
    /// pending.
    pub fn begin_ai_move(&mut self) -> Option<MoveTicket> {
        if self.status.is_terminal() || self.ai_pending {
            return None;
        }
        self.ai_pending = true;
        Some(MoveTicket(self.generation))
    }

    /// Deliver a computed move. A stale ticket (the position changed
    /// since `begin_ai_move`) is discarded and the board untouched.
    pub fn complete_ai_move(&mut self, ticket: MoveTicket, index: usize) -> bool {
        if !self.ai_pending || ticket.0 != self.generation {
            return false;
        }
        self.ai_pending = false;
        self.apply_move(index)
    }

    /// Drop an in-flight computer move without applying anything
    pub fn cancel_ai(&mut self) {
        self.ai_pending = false;
        self.generation += 1;
    }
}
