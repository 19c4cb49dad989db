//! Play command - an interactive game in the terminal
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: game_loop(), human_turn(), computer_turn()
//! - Level 3: read_command(), render_board()
//! - Level 4: parsing/formatting utilities

use std::io::{BufRead, Write};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Args;

use kinarow_core::{
    AiWorker, BoardConfig, Difficulty, GameController, GameStatus, Mark, MoveSelector,
};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct PlayArgs {
    /// Board side length (clamped to 3..=8)
    #[arg(long, default_value = "3")]
    pub size: usize,

    /// Marks in a row needed to win (defaults to the board size)
    #[arg(long)]
    pub win_len: Option<usize>,

    /// Computer opponent strength; `human` plays both sides locally
    #[arg(long, default_value = "hard")]
    pub opponent: Difficulty,

    /// Minimum visible think time for the computer, in milliseconds
    #[arg(long, default_value = "300")]
    pub delay_ms: u64,
}

/// One parsed line of player input
enum Command {
    Move { row: usize, col: usize },
    Undo,
    Quit,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run play command
///
/// 1. Build the game from the (clamped) arguments
/// 2. Spawn the move worker
/// 3. Loop turns until the game ends or the player quits
pub fn run(args: PlayArgs, seed: Option<u64>) -> Result<()> {
    let config = BoardConfig::from_settings(Some(args.size), args.win_len);
    let mut game = GameController::new(config);

    tracing::info!(
        "Starting game: {}x{} board, {} in a row, opponent={}",
        config.size(),
        config.size(),
        config.win_len(),
        args.opponent
    );

    let selector = match seed {
        Some(s) => MoveSelector::with_seed(s),
        None => MoveSelector::from_entropy(),
    };
    let worker = AiWorker::new(selector);

    game_loop(&mut game, &worker, &args)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn game_loop(game: &mut GameController, worker: &AiWorker, args: &PlayArgs) -> Result<()> {
    let stdin = std::io::stdin();
    let mut input = stdin.lock();

    println!(
        "You are X. Enter moves as `row col` (1-based), `u` to undo, `q` to quit."
    );

    loop {
        render_board(game);

        match game.status() {
            GameStatus::Won(mark) => {
                println!("{} wins!", mark);
                return Ok(());
            }
            GameStatus::Draw => {
                println!("Draw.");
                return Ok(());
            }
            GameStatus::InProgress => {}
        }

        let computer_to_move =
            args.opponent != Difficulty::Human && game.turn() == Mark::O;
        let vs_computer = args.opponent != Difficulty::Human;
        let keep_going = if computer_to_move {
            computer_turn(game, worker, args)?
        } else {
            human_turn(game, &mut input, vs_computer)?
        };
        if !keep_going {
            return Ok(());
        }
    }
}

/// One human turn; returns false when the player quits
fn human_turn(
    game: &mut GameController,
    input: &mut impl BufRead,
    vs_computer: bool,
) -> Result<bool> {
    loop {
        match read_command(game.turn(), input)? {
            None => return Ok(false), // EOF
            Some(Command::Quit) => return Ok(false),
            Some(Command::Undo) => {
                if !game.undo() {
                    println!("Nothing to undo.");
                    continue;
                }
                // against the computer, also step over its reply so the
                // player lands on their own previous position
                if vs_computer {
                    let _ = game.undo();
                }
                return Ok(true);
            }
            Some(Command::Move { row, col }) => {
                let n = game.config().size();
                if row == 0 || col == 0 || row > n || col > n {
                    println!("Coordinates must be 1..={}.", n);
                    continue;
                }
                let index = game.board().index(row - 1, col - 1);
                if !game.apply_move(index) {
                    println!("That cell is taken.");
                    continue;
                }
                return Ok(true);
            }
        }
    }
}

/// One computer turn through the worker; always returns true
fn computer_turn(game: &mut GameController, worker: &AiWorker, args: &PlayArgs) -> Result<bool> {
    let ticket = game
        .begin_ai_move()
        .context("computer turn on a finished game")?;
    let started = Instant::now();

    worker.request(
        game.board(),
        game.config().win_len(),
        game.turn(),
        args.opponent,
        ticket,
    )?;
    let response = worker.recv()?;

    // Pad very fast searches so the move is visible as a response
    let elapsed = started.elapsed();
    let min_delay = Duration::from_millis(args.delay_ms);
    if elapsed < min_delay {
        std::thread::sleep(min_delay - elapsed);
    }

    let chosen = response
        .chosen
        .context("computer found no move on a non-full board")?;
    if game.complete_ai_move(response.ticket, chosen) {
        let (row, col) = game.board().row_col(chosen);
        println!("Computer plays {} {}.", row + 1, col + 1);
    }
    Ok(true)
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Read and parse one input line; `None` means EOF
fn read_command(turn: Mark, input: &mut impl BufRead) -> Result<Option<Command>> {
    loop {
        print!("{}> ", turn);
        std::io::stdout().flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        match parse_command(&line) {
            Some(command) => return Ok(Some(command)),
            None => println!("Enter `row col`, `u`, or `q`."),
        }
    }
}

fn render_board(game: &GameController) {
    let board = game.board();
    let n = board.size();
    let line = game.winning_line().unwrap_or(&[]);

    print!("\n   ");
    for col in 0..n {
        print!(" {} ", col + 1);
    }
    println!();
    for row in 0..n {
        print!("{:>2} ", row + 1);
        for col in 0..n {
            let index = board.index(row, col);
            let cell = match board.get(index) {
                Some(mark) => mark.to_string(),
                None => ".".to_string(),
            };
            if line.contains(&index) {
                print!("[{}]", cell);
            } else {
                print!(" {} ", cell);
            }
        }
        println!();
    }
    println!();
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn parse_command(line: &str) -> Option<Command> {
    let trimmed = line.trim();
    match trimmed {
        "q" | "quit" => return Some(Command::Quit),
        "u" | "undo" => return Some(Command::Undo),
        _ => {}
    }
    let mut parts = trimmed.split_whitespace();
    let row = parts.next()?.parse().ok()?;
    let col = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(Command::Move { row, col })
}

// ============================================================================
// TESTS
// ============================================================================
