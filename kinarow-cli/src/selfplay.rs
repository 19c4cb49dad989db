//! Selfplay command - play games between two difficulties
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: play_series(), report_results()
//! - Level 3: play_single_game(), compute_series_statistics()
//! - Level 4: formatting utilities

use anyhow::{bail, Result};
use clap::Args;

use kinarow_core::{BoardConfig, Difficulty, GameController, GameStatus, Mark, MoveSelector};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct SelfplayArgs {
    /// Number of games to play
    #[arg(long, default_value = "10")]
    pub games: usize,

    /// Board side length (clamped to 3..=8)
    #[arg(long, default_value = "3")]
    pub size: usize,

    /// Marks in a row needed to win (defaults to the board size)
    #[arg(long)]
    pub win_len: Option<usize>,

    /// Difficulty playing X
    #[arg(long, default_value = "hard")]
    pub x: Difficulty,

    /// Difficulty playing O
    #[arg(long, default_value = "hard")]
    pub o: Difficulty,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Result of a single game
#[derive(Clone, Debug)]
struct GameRecord {
    game_number: usize,
    status: GameStatus,
    plies: usize,
}

/// Aggregated series results
#[derive(Clone, Debug)]
struct SeriesResults {
    games: Vec<GameRecord>,
    x_wins: usize,
    o_wins: usize,
    draws: usize,
    avg_plies: f32,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run selfplay command
///
/// 1. Validate the pairing
/// 2. Play the series
/// 3. Report results
pub fn run(args: SelfplayArgs, seed: Option<u64>) -> Result<()> {
    if args.x == Difficulty::Human || args.o == Difficulty::Human {
        bail!("selfplay needs two computer difficulties");
    }

    let config = BoardConfig::from_settings(Some(args.size), args.win_len);

    tracing::info!(
        "Starting selfplay: {} vs {} ({} games, {}x{} board, {} in a row)",
        args.x,
        args.o,
        args.games,
        config.size(),
        config.size(),
        config.win_len()
    );

    let results = play_series(config, &args, seed);

    report_results(&results, &args);

    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Play all games in the series
fn play_series(config: BoardConfig, args: &SelfplayArgs, seed: Option<u64>) -> SeriesResults {
    let mut selector = match seed {
        Some(s) => MoveSelector::with_seed(s),
        None => MoveSelector::from_entropy(),
    };

    let mut games = Vec::with_capacity(args.games);
    for game_num in 0..args.games {
        let record = play_single_game(config, args, game_num + 1, &mut selector);

        tracing::info!(
            "Game {}: {:?} ({} plies)",
            record.game_number,
            record.status,
            record.plies
        );

        games.push(record);
    }

    compute_series_statistics(games)
}

/// Report series results
fn report_results(results: &SeriesResults, args: &SelfplayArgs) {
    if args.json {
        print_json_results(results);
    } else {
        print_text_results(results);
    }
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Play a single game to completion
fn play_single_game(
    config: BoardConfig,
    args: &SelfplayArgs,
    game_number: usize,
    selector: &mut MoveSelector,
) -> GameRecord {
    let mut game = GameController::new(config);

    while game.status() == GameStatus::InProgress {
        let difficulty = match game.turn() {
            Mark::X => args.x,
            Mark::O => args.o,
        };
        let chosen = selector.choose_move(
            difficulty,
            game.board(),
            config.win_len(),
            game.turn(),
        );
        match chosen {
            Some(index) => {
                game.apply_move(index);
            }
            // unreachable mid-game; the selector only declines a full board
            None => break,
        }
    }

    GameRecord {
        game_number,
        status: game.status(),
        plies: game.ply_count(),
    }
}

/// Compute aggregate statistics from game records
fn compute_series_statistics(games: Vec<GameRecord>) -> SeriesResults {
    let x_wins = games
        .iter()
        .filter(|g| g.status == GameStatus::Won(Mark::X))
        .count();
    let o_wins = games
        .iter()
        .filter(|g| g.status == GameStatus::Won(Mark::O))
        .count();
    let draws = games
        .iter()
        .filter(|g| g.status == GameStatus::Draw)
        .count();

    let total_plies: usize = games.iter().map(|g| g.plies).sum();
    let avg_plies = if games.is_empty() {
        0.0
    } else {
        total_plies as f32 / games.len() as f32
    };

    SeriesResults {
        games,
        x_wins,
        o_wins,
        draws,
        avg_plies,
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

/// Print results as JSON
fn print_json_results(results: &SeriesResults) {
    #[derive(serde::Serialize)]
    struct JsonGame {
        game_number: usize,
        status: String,
        plies: usize,
    }

    #[derive(serde::Serialize)]
    struct JsonOutput {
        total_games: usize,
        x_wins: usize,
        o_wins: usize,
        draws: usize,
        avg_plies: f32,
        x_win_rate: f32,
        games: Vec<JsonGame>,
    }

    let total = results.games.len();
    let output = JsonOutput {
        total_games: total,
        x_wins: results.x_wins,
        o_wins: results.o_wins,
        draws: results.draws,
        avg_plies: results.avg_plies,
        x_win_rate: if total > 0 {
            results.x_wins as f32 / total as f32
        } else {
            0.0
        },
        games: results
            .games
            .iter()
            .map(|g| JsonGame {
                game_number: g.game_number,
                status: format!("{:?}", g.status),
                plies: g.plies,
            })
            .collect(),
    };

    if let Ok(json) = serde_json::to_string_pretty(&output) {
        println!("{}", json);
    }
}

/// Print results as text
fn print_text_results(results: &SeriesResults) {
    let total = results.games.len();
    let pct = |count: usize| {
        if total > 0 {
            count as f32 / total as f32 * 100.0
        } else {
            0.0
        }
    };

    println!("\n=== Selfplay Results ===");
    println!("Total games: {}", total);
    println!("X wins:      {} ({:.1}%)", results.x_wins, pct(results.x_wins));
    println!("O wins:      {} ({:.1}%)", results.o_wins, pct(results.o_wins));
    println!("Draws:       {} ({:.1}%)", results.draws, pct(results.draws));
    println!("Avg plies:   {:.1}", results.avg_plies);

    println!("\nGame details:");
    for game in &results.games {
        println!(
            "  Game {}: {:?} in {} plies",
            game.game_number, game.status, game.plies
        );
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_series_statistics_empty() {
        let results = compute_series_statistics(vec![]);
        assert_eq!(results.x_wins, 0);
        assert_eq!(results.o_wins, 0);
        assert_eq!(results.draws, 0);
        assert_eq!(results.avg_plies, 0.0);
    }

    #[test]
    fn test_compute_series_statistics() {
        let games = vec![
            GameRecord {
                game_number: 1,
                status: GameStatus::Won(Mark::X),
                plies: 5,
            },
            GameRecord {
                game_number: 2,
                status: GameStatus::Draw,
                plies: 9,
            },
            GameRecord {
                game_number: 3,
                status: GameStatus::Won(Mark::O),
                plies: 6,
            },
            GameRecord {
                game_number: 4,
                status: GameStatus::Won(Mark::X),
                plies: 7,
            },
        ];

        let results = compute_series_statistics(games);
        assert_eq!(results.x_wins, 2);
        assert_eq!(results.o_wins, 1);
        assert_eq!(results.draws, 1);
        assert_eq!(results.avg_plies, 6.75);
    }

    #[test]
    fn test_single_game_terminates() {
        let config = BoardConfig::new(3, 3);
        let args = SelfplayArgs {
            games: 1,
            size: 3,
            win_len: None,
            x: Difficulty::Hard,
            o: Difficulty::Hard,
            json: false,
        };
        let mut selector = MoveSelector::with_seed(42);
        let record = play_single_game(config, &args, 1, &mut selector);
        assert!(record.status != GameStatus::InProgress);
        assert!(record.plies <= 9);
    }
}
