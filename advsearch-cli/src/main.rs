//! advsearch CLI - Command-line interface
//!
//! Commands:
//! - solve: Choose the best move in a game tree file
//! - compare: Check pruned search against exhaustive search on random trees
//! - generate: Write a random game tree to a file

mod compare;
mod generate;
mod solve;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "advsearch")]
#[command(about = "Adversarial game-tree search over explicit game trees")]
struct Cli {
    /// Random seed for reproducibility
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Choose the best move in a game tree file
    Solve(solve::SolveArgs),
    /// Compare minimax and alpha-beta on random trees
    Compare(compare::CompareArgs),
    /// Generate a random game tree
    Generate(generate::GenerateArgs),
}

fn main() -> Result<()> {
    // Logs go to stderr so JSON output stays clean
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Solve(args) => solve::run(args),
        Commands::Compare(args) => compare::run(args, cli.seed),
        Commands::Generate(args) => generate::run(args, cli.seed),
    }
}
