//! Background computer-move worker
//!
//! One dedicated thread owns the move selector (and its RNG) and
//! serves one search at a time over a pair of channels. `cancel` stops
//! the current search at the next top-level candidate; a cancelled
//! search sends nothing, so the controller never sees a move it has to
//! throw away for that reason. Tickets ride along untouched so the
//! controller can still reject a result that raced a reset.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;

use thiserror::Error;

use crate::ai::{Difficulty, MoveSelector};
use crate::board::{Board, Mark};
use crate::game::MoveTicket;

#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("worker thread disconnected")]
    Disconnected,
}

enum AiRequest {
    Search {
        board: Board,
        win_len: usize,
        mark: Mark,
        difficulty: Difficulty,
        ticket: MoveTicket,
    },
    Stop,
}

/// A computed move, tagged with the ticket of the request that asked
/// for it. `chosen` is `None` only when the board was full.
#[derive(Debug)]
pub struct AiResponse {
    pub ticket: MoveTicket,
    pub chosen: Option<usize>,
}

pub struct AiWorker {
    handle: Option<thread::JoinHandle<()>>,
    tx: mpsc::Sender<AiRequest>,
    rx: mpsc::Receiver<AiResponse>,
    cancel: Arc<AtomicBool>,
}

impl AiWorker {
    /// Spawn the worker thread around `selector`
    pub fn new(mut selector: MoveSelector) -> Self {
        let (req_tx, req_rx) = mpsc::channel::<AiRequest>();
        let (resp_tx, resp_rx) = mpsc::channel::<AiResponse>();
        let cancel = Arc::new(AtomicBool::new(false));
        let cancel_worker = Arc::clone(&cancel);

        let handle = thread::spawn(move || {
            for request in req_rx {
                match request {
                    AiRequest::Search {
                        board,
                        win_len,
                        mark,
                        difficulty,
                        ticket,
                    } => {
                        let chosen = selector.choose_move_with_cancel(
                            difficulty,
                            &board,
                            win_len,
                            mark,
                            &cancel_worker,
                        );
                        if cancel_worker.load(Ordering::Relaxed) {
                            continue;
                        }
                        if resp_tx.send(AiResponse { ticket, chosen }).is_err() {
                            break;
                        }
                    }
                    AiRequest::Stop => break,
                }
            }
        });

        Self {
            handle: Some(handle),
            tx: req_tx,
            rx: resp_rx,
            cancel,
        }
    }

    /// Queue a search for `mark` on a snapshot of `board`
    pub fn request(
        &self,
        board: &Board,
        win_len: usize,
        mark: Mark,
        difficulty: Difficulty,
        ticket: MoveTicket,
    ) -> Result<(), WorkerError> {
        self.cancel.store(false, Ordering::Relaxed);
        self.tx
            .send(AiRequest::Search {
                board: board.clone(),
                win_len,
                mark,
                difficulty,
                ticket,
            })
            .map_err(|_| WorkerError::Disconnected)
    }

    /// Non-blocking poll for a finished search
    pub fn try_recv(&self) -> Option<AiResponse> {
        self.rx.try_recv().ok()
    }

    /// Block until the current search finishes
    pub fn recv(&self) -> Result<AiResponse, WorkerError> {
        self.rx.recv().map_err(|_| WorkerError::Disconnected)
    }

    /// Ask the in-flight search to stop; it will send no response
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::Relaxed);
    }
}

impl Drop for AiWorker {
    fn drop(&mut self) {
        self.cancel.store(true, Ordering::Relaxed);
        let _ = self.tx.send(AiRequest::Stop);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::BoardConfig;
    use crate::game::GameController;

    #[test]
    fn test_worker_returns_move_with_ticket() {
        let mut game = GameController::new(BoardConfig::new(3, 3));
        let worker = AiWorker::new(MoveSelector::with_seed(42));

        let ticket = game.begin_ai_move().expect("fresh game");
        worker
            .request(
                game.board(),
                game.config().win_len(),
                game.turn(),
                Difficulty::Hard,
                ticket,
            )
            .expect("worker alive");

        let response = worker.recv().expect("worker alive");
        assert_eq!(response.ticket, ticket);
        let chosen = response.chosen.expect("empty board has moves");
        assert!(game.complete_ai_move(response.ticket, chosen));
        assert_eq!(game.ply_count(), 1);
    }

    #[test]
    fn test_worker_plays_out_whole_game() {
        let mut game = GameController::new(BoardConfig::new(3, 3));
        let worker = AiWorker::new(MoveSelector::with_seed(7));

        while !game.status().is_terminal() {
            let ticket = game.begin_ai_move().expect("in progress");
            worker
                .request(
                    game.board(),
                    game.config().win_len(),
                    game.turn(),
                    Difficulty::Medium,
                    ticket,
                )
                .expect("worker alive");
            let response = worker.recv().expect("worker alive");
            let chosen = response.chosen.expect("in-progress board has moves");
            assert!(game.complete_ai_move(response.ticket, chosen));
        }
        assert!(game.ply_count() <= 9);
    }

    #[test]
    fn test_drop_joins_cleanly() {
        let worker = AiWorker::new(MoveSelector::with_seed(1));
        drop(worker);
    }
}
