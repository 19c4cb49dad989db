//! # kinarow-core
//!
//! Engine for the K-in-a-row family of games (generalized
//! tic-tac-toe): an N x N board where the first player to line up K
//! marks in a row, column, or diagonal wins.
//!
//! Layers, bottom up:
//! - [`board`]: cell storage, marks, and the clamped N/K configuration
//! - [`rules`]: incremental win and draw detection around the last move
//! - [`eval`]: the positional (center-weighted) static evaluator
//! - [`search`]: depth-limited minimax over a scratch board
//! - [`ai`]: difficulty policy and the tactic-first move selector
//! - [`game`]: turn/history controller with undo and AI tickets
//! - [`worker`]: background thread running the selector with
//!   cancellation

pub mod ai;
pub mod board;
pub mod eval;
pub mod game;
pub mod rules;
pub mod search;
pub mod worker;

pub use ai::{Difficulty, MoveSelector, ParseDifficultyError};
pub use board::{Board, BoardConfig, Mark};
pub use eval::{evaluate, SCORE_CUTOFF};
pub use game::{GameController, GameStatus, MoveTicket};
pub use rules::{detect_result, detect_win, Outcome, Win, DIRECTIONS};
pub use search::minimax;
pub use worker::{AiResponse, AiWorker, WorkerError};
