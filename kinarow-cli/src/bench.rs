//! Bench command - time move selection across board sizes
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: run_size_benchmarks(), report_results()
//! - Level 3: benchmark_difficulty()
//! - Level 4: timing utilities, formatting

use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Args;

use kinarow_core::{BoardConfig, Difficulty, GameController, GameStatus, MoveSelector};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct BenchArgs {
    /// Number of games per configuration
    #[arg(long, default_value = "10")]
    pub games: usize,

    /// Board sizes to test, comma-separated
    #[arg(long, default_value = "3,5,8", value_delimiter = ',')]
    pub sizes: Vec<usize>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Results of a single benchmark run
#[derive(Clone, Debug)]
struct BenchResult {
    name: String,
    games: usize,
    total_moves: usize,
    total_time: Duration,
    avg_time_per_move: Duration,
    moves_per_second: f64,
}

/// All benchmark results
#[derive(Clone, Debug)]
struct AllResults {
    results: Vec<BenchResult>,
    system_info: String,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run bench command
///
/// 1. Time medium and hard selection for each requested size
/// 2. Report all results
pub fn run(args: BenchArgs, seed: Option<u64>) -> Result<()> {
    tracing::info!(
        "Starting benchmarks: {} games per configuration, sizes {:?}",
        args.games,
        args.sizes
    );

    let mut all_results = AllResults {
        results: Vec::new(),
        system_info: get_system_info(),
    };

    run_size_benchmarks(&args, seed, &mut all_results);

    report_results(&all_results, &args);

    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn run_size_benchmarks(args: &BenchArgs, seed: Option<u64>, results: &mut AllResults) {
    for &size in &args.sizes {
        for difficulty in [Difficulty::Medium, Difficulty::Hard] {
            tracing::info!("Benchmarking {} on {}x{}...", difficulty, size, size);
            let result = benchmark_difficulty(size, difficulty, args.games, seed);
            results.results.push(result);
        }
    }
}

/// Report all benchmark results
fn report_results(results: &AllResults, args: &BenchArgs) {
    if args.json {
        print_json_results(results);
    } else {
        print_text_results(results);
    }
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Time self-play move selection for one size/difficulty pair
fn benchmark_difficulty(
    size: usize,
    difficulty: Difficulty,
    num_games: usize,
    seed: Option<u64>,
) -> BenchResult {
    let config = BoardConfig::from_settings(Some(size), None);
    let mut selector = match seed {
        Some(s) => MoveSelector::with_seed(s),
        None => MoveSelector::from_entropy(),
    };

    let start = Instant::now();
    let mut total_moves = 0usize;

    for _ in 0..num_games {
        let mut game = GameController::new(config);
        while game.status() == GameStatus::InProgress {
            let chosen = selector.choose_move(
                difficulty,
                game.board(),
                config.win_len(),
                game.turn(),
            );
            match chosen {
                Some(index) => {
                    game.apply_move(index);
                    total_moves += 1;
                }
                None => break,
            }
        }
    }

    let total_time = start.elapsed();
    let avg_time = if total_moves > 0 {
        total_time / total_moves as u32
    } else {
        Duration::ZERO
    };

    BenchResult {
        name: format!("{}x{} {}", size, size, difficulty),
        games: num_games,
        total_moves,
        total_time,
        avg_time_per_move: avg_time,
        moves_per_second: if total_time.as_secs_f64() > 0.0 {
            total_moves as f64 / total_time.as_secs_f64()
        } else {
            0.0
        },
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

/// Get system information string
fn get_system_info() -> String {
    format!(
        "kinarow {}, {} CPUs",
        env!("CARGO_PKG_VERSION"),
        std::thread::available_parallelism()
            .map(|p| p.get())
            .unwrap_or(1)
    )
}

/// Format duration for display
fn format_duration(d: Duration) -> String {
    if d.as_secs() >= 60 {
        format!(
            "{}m {:.1}s",
            d.as_secs() / 60,
            (d.as_secs() % 60) as f64 + d.subsec_millis() as f64 / 1000.0
        )
    } else if d.as_secs() >= 1 {
        format!("{:.2}s", d.as_secs_f64())
    } else if d.as_millis() >= 1 {
        format!("{:.1}ms", d.as_secs_f64() * 1000.0)
    } else {
        format!("{:.1}us", d.as_secs_f64() * 1_000_000.0)
    }
}

/// Print results as JSON
fn print_json_results(results: &AllResults) {
    #[derive(serde::Serialize)]
    struct JsonBenchmark {
        name: String,
        games: usize,
        total_moves: usize,
        total_time_ms: u64,
        avg_time_per_move_ms: f64,
        moves_per_second: f64,
    }

    #[derive(serde::Serialize)]
    struct JsonOutput {
        system_info: String,
        benchmarks: Vec<JsonBenchmark>,
    }

    let output = JsonOutput {
        system_info: results.system_info.clone(),
        benchmarks: results
            .results
            .iter()
            .map(|r| JsonBenchmark {
                name: r.name.clone(),
                games: r.games,
                total_moves: r.total_moves,
                total_time_ms: r.total_time.as_millis() as u64,
                avg_time_per_move_ms: r.avg_time_per_move.as_secs_f64() * 1000.0,
                moves_per_second: r.moves_per_second,
            })
            .collect(),
    };

    if let Ok(json) = serde_json::to_string_pretty(&output) {
        println!("{}", json);
    }
}

/// Print results as text table
fn print_text_results(results: &AllResults) {
    println!("\n=== KINAROW Benchmark Results ===");
    println!("System: {}\n", results.system_info);

    println!(
        "{:<16} {:>8} {:>8} {:>12} {:>12} {:>10}",
        "Benchmark", "Games", "Moves", "Total Time", "Avg/Move", "Moves/s"
    );
    println!("{}", "-".repeat(72));

    for r in &results.results {
        println!(
            "{:<16} {:>8} {:>8} {:>12} {:>12} {:>10.1}",
            r.name,
            r.games,
            r.total_moves,
            format_duration(r.total_time),
            format_duration(r.avg_time_per_move),
            r.moves_per_second
        );
    }
}

// ============================================================================
// TESTS
// ============================================================================
