//! Compare command - check alpha-beta against minimax on random trees
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: compare_trees(), report_results()
//! - Level 3: compare_single_tree(), compute_summary()
//! - Level 4: formatting utilities

use anyhow::{Context, Result};
use clap::Args;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use advsearch_core::{search, GameTree, RandomTreeConfig, SearchConfig};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct CompareArgs {
    /// Number of random trees to compare on
    #[arg(long, default_value = "100")]
    pub trees: usize,

    /// Maximum tree depth in plies
    #[arg(long, default_value = "6")]
    pub depth: usize,

    /// Maximum children per node
    #[arg(long, default_value = "4")]
    pub branching: usize,

    /// Let the same player move several times in a row
    #[arg(long)]
    pub irregular: bool,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Result of searching one tree both ways
#[derive(Clone, Debug, Serialize)]
struct TreeComparison {
    index: usize,
    tree_nodes: usize,
    minimax_nodes: u64,
    alpha_beta_nodes: u64,
    same_action: bool,
    same_value: bool,
}

/// Aggregated comparison
#[derive(Clone, Debug, Serialize)]
struct ComparisonSummary {
    trees: Vec<TreeComparison>,
    agreements: usize,
    total_minimax_nodes: u64,
    total_alpha_beta_nodes: u64,
    /// Fraction of minimax nodes alpha-beta skipped
    savings: f64,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run compare command
///
/// This function reads like a table of contents:
/// 1. Generate and search every tree
/// 2. Summarize agreement and node counts
/// 3. Report results
pub fn run(args: CompareArgs, seed: Option<u64>) -> Result<()> {
    tracing::info!(
        "Comparing on {} trees (depth {}, branching {})",
        args.trees,
        args.depth,
        args.branching
    );

    let summary = compare_trees(&args, seed)?;

    if summary.agreements < summary.trees.len() {
        tracing::warn!(
            "Alpha-beta disagreed with minimax on {} trees",
            summary.trees.len() - summary.agreements
        );
    }

    report_results(&summary, args.json)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn compare_trees(args: &CompareArgs, seed: Option<u64>) -> Result<ComparisonSummary> {
    let mut rng = create_rng(seed);
    let mut config = RandomTreeConfig::new(args.depth, args.branching);
    if args.irregular {
        config = config.with_irregular_turns();
    }

    let mut trees = Vec::with_capacity(args.trees);
    for index in 0..args.trees {
        let tree = GameTree::random(&mut rng, &config);
        let comparison = compare_single_tree(index, &tree)
            .with_context(|| format!("Search failed on tree {index}"))?;
        tracing::debug!(
            "Tree {}: minimax={} alpha-beta={} nodes",
            index,
            comparison.minimax_nodes,
            comparison.alpha_beta_nodes
        );
        trees.push(comparison);
    }

    Ok(compute_summary(trees))
}

fn report_results(summary: &ComparisonSummary, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(summary)?);
    } else {
        print_text_results(summary);
    }
    Ok(())
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

fn compare_single_tree(index: usize, tree: &GameTree) -> Result<TreeComparison> {
    let exhaustive = search(tree, &SearchConfig::minimax())?;
    let pruned = search(tree, &SearchConfig::alpha_beta())?;

    Ok(TreeComparison {
        index,
        tree_nodes: tree.node_count(),
        minimax_nodes: exhaustive.stats.nodes_visited,
        alpha_beta_nodes: pruned.stats.nodes_visited,
        same_action: exhaustive.action == pruned.action,
        same_value: exhaustive.value == pruned.value,
    })
}

fn compute_summary(trees: Vec<TreeComparison>) -> ComparisonSummary {
    let agreements = trees
        .iter()
        .filter(|t| t.same_action && t.same_value)
        .count();
    let total_minimax_nodes: u64 = trees.iter().map(|t| t.minimax_nodes).sum();
    let total_alpha_beta_nodes: u64 = trees.iter().map(|t| t.alpha_beta_nodes).sum();
    let savings = if total_minimax_nodes == 0 {
        0.0
    } else {
        1.0 - total_alpha_beta_nodes as f64 / total_minimax_nodes as f64
    };

    ComparisonSummary {
        trees,
        agreements,
        total_minimax_nodes,
        total_alpha_beta_nodes,
        savings,
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}

fn print_text_results(summary: &ComparisonSummary) {
    println!("\n=== Minimax vs Alpha-Beta ===");
    println!(
        "{:<8} {:>10} {:>12} {:>12}  {}",
        "Tree", "Nodes", "Minimax", "Alpha-Beta", "Agree"
    );
    println!("{}", "-".repeat(56));

    for t in &summary.trees {
        println!(
            "{:<8} {:>10} {:>12} {:>12}  {}",
            t.index,
            t.tree_nodes,
            t.minimax_nodes,
            t.alpha_beta_nodes,
            if t.same_action && t.same_value { "yes" } else { "NO" }
        );
    }

    println!(
        "\nAgreement: {}/{} trees",
        summary.agreements,
        summary.trees.len()
    );
    println!(
        "Nodes: minimax={} alpha-beta={} ({:.1}% skipped)",
        summary.total_minimax_nodes,
        summary.total_alpha_beta_nodes,
        summary.savings * 100.0
    );
}

// ============================================================================
// TESTS
// ============================================================================
