//! KINAROW CLI - Command-line interface
//!
//! Commands:
//! - play: Play against the computer in the terminal
//! - selfplay: Pit two difficulties against each other
//! - bench: Time move selection across board sizes

use clap::{Parser, Subcommand};

mod bench;
mod play;
mod selfplay;

#[derive(Parser)]
#[command(name = "kinarow")]
#[command(about = "K-in-a-row game engine")]
struct Cli {
    /// RNG seed for reproducible runs
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play against the computer in the terminal
    Play(play::PlayArgs),
    /// Pit two difficulties against each other
    Selfplay(selfplay::SelfplayArgs),
    /// Time move selection across board sizes
    Bench(bench::BenchArgs),
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play(args) => play::run(args, cli.seed),
        Commands::Selfplay(args) => selfplay::run(args, cli.seed),
        Commands::Bench(args) => bench::run(args, cli.seed),
    }
}
