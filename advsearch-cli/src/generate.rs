//! Generate command - write a random game tree as JSON

use std::path::PathBuf;

use anyhow::{ensure, Result};
use clap::Args;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use advsearch_core::{GameTree, RandomTreeConfig};

#[derive(Args)]
pub struct GenerateArgs {
    /// Maximum tree depth in plies
    #[arg(long, default_value = "4")]
    pub depth: usize,

    /// Maximum children per node
    #[arg(long, default_value = "3")]
    pub branching: usize,

    /// Constant sum of both players' payoffs at every leaf
    #[arg(long, default_value = "0")]
    pub total: f64,

    /// Let the same player move several times in a row
    #[arg(long)]
    pub irregular: bool,

    /// Output JSON file
    #[arg(long, value_name = "FILE")]
    pub output: PathBuf,
}

pub fn run(args: GenerateArgs, seed: Option<u64>) -> Result<()> {
    ensure!(args.depth > 0, "depth must be at least 1");
    ensure!(args.branching > 0, "branching must be at least 1");

    let mut config = RandomTreeConfig::new(args.depth, args.branching).with_total(args.total);
    if args.irregular {
        config = config.with_irregular_turns();
    }

    let mut rng = match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    };
    let tree = GameTree::random(&mut rng, &config);
    tree.save(&args.output)?;

    tracing::info!(
        "Saved tree with {} nodes (depth {}) to {}",
        tree.node_count(),
        tree.depth(),
        args.output.display()
    );
    Ok(())
}
