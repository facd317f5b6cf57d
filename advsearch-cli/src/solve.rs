//! Solve command - choose the best move in a game tree file
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: load_tree(), solve_tree(), report_result()
//! - Level 3: search dispatch per algorithm
//! - Level 4: formatting utilities

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, ValueEnum};
use serde::Serialize;

use advsearch_core::{
    search, AdversarialProblem, Algorithm, GameTree, NodeId, Player, SearchConfig, SearchError,
    SearchStats,
};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

/// Algorithm choice on the command line
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum AlgorithmArg {
    Minimax,
    AlphaBeta,
    Cutoff,
}

impl From<AlgorithmArg> for Algorithm {
    fn from(arg: AlgorithmArg) -> Self {
        match arg {
            AlgorithmArg::Minimax => Algorithm::Minimax,
            AlgorithmArg::AlphaBeta => Algorithm::AlphaBeta,
            AlgorithmArg::Cutoff => Algorithm::Cutoff,
        }
    }
}

#[derive(Args)]
pub struct SolveArgs {
    /// Game tree JSON file
    #[arg(long, value_name = "FILE")]
    pub tree: PathBuf,

    /// Search algorithm
    #[arg(long, value_enum, default_value = "alpha-beta")]
    pub algorithm: AlgorithmArg,

    /// Plies searched before the heuristic takes over (cutoff only)
    #[arg(long, default_value = "2")]
    pub cutoff_ply: u32,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Outcome of solving one tree
#[derive(Clone, Debug, Serialize)]
struct SolveReport {
    algorithm: Algorithm,
    player: Player,
    action: usize,
    value: f64,
    stats: SearchStats,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run solve command
///
/// This function reads like a table of contents:
/// 1. Load the tree
/// 2. Search it with the chosen algorithm
/// 3. Report the chosen action
pub fn run(args: SolveArgs) -> Result<()> {
    let tree = load_tree(&args)?;
    let algorithm = Algorithm::from(args.algorithm);

    tracing::info!(
        "Solving {} ({} nodes, depth {}) with {}",
        args.tree.display(),
        tree.node_count(),
        tree.depth(),
        algorithm
    );

    let report = solve_tree(&tree, algorithm, args.cutoff_ply)?;

    report_result(&report, args.json)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn load_tree(args: &SolveArgs) -> Result<GameTree> {
    GameTree::load(&args.tree)
        .with_context(|| format!("Failed to load game tree: {}", args.tree.display()))
}

/// Search a tree with the given algorithm
fn solve_tree(tree: &GameTree, algorithm: Algorithm, cutoff_ply: u32) -> Result<SolveReport> {
    let player = tree.player_to_move(&tree.root());
    let heuristic = |state: &NodeId| tree.mean_payoff(*state).for_player(player);

    let config = match algorithm {
        Algorithm::Minimax => SearchConfig::minimax(),
        Algorithm::AlphaBeta => SearchConfig::alpha_beta(),
        Algorithm::Cutoff => SearchConfig::cutoff(cutoff_ply, &heuristic),
    };

    let outcome = match search(tree, &config) {
        Ok(outcome) => outcome,
        Err(SearchError::TerminalStart { payoff }) => {
            bail!("The root of the tree is a leaf with payoff {payoff}; there is nothing to choose")
        }
        Err(e) => return Err(e).context("Search failed"),
    };

    Ok(SolveReport {
        algorithm,
        player,
        action: outcome.action,
        value: outcome.value,
        stats: outcome.stats,
    })
}

fn report_result(report: &SolveReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        print_text_report(report);
    }
    Ok(())
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn print_text_report(report: &SolveReport) {
    println!("\n=== {} ===", report.algorithm);
    println!("Player to move: {}", report.player);
    println!("Best action:    {}", report.action);
    println!("Value:          {}", report.value);
    println!(
        "Nodes visited:  {} ({} terminal, {} heuristic, {} prunes, max ply {})",
        report.stats.nodes_visited,
        report.stats.terminal_evaluations,
        report.stats.heuristic_evaluations,
        report.stats.prunes,
        report.stats.max_ply
    );
}

// ============================================================================
// TESTS
// ============================================================================
