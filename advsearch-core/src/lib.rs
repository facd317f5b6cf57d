//! advsearch core - Adversarial game-tree search
//!
//! This crate provides a generic search engine for two-player, constant-sum games:
//! - The problem contract every game implements
//! - Exhaustive minimax
//! - Alpha-beta pruning
//! - Depth-limited alpha-beta with a heuristic cutoff
//! - Explicit game trees for analysis and testing

pub mod error;
pub mod problem;
pub mod config;
pub mod observer;
pub mod search;
pub mod tree;

// Re-exports for convenient access
pub use error::{Result, SearchError};
pub use problem::{AdversarialProblem, Payoff, Player};
pub use config::{Algorithm, Bounds, Cutoff, SearchConfig};
pub use observer::{NodeVisit, NoopObserver, SearchObserver};
pub use search::{
    alpha_beta, alpha_beta_cutoff, minimax, search, search_observed, SearchOutcome, SearchStats,
};
pub use tree::{GameTree, NodeId, RandomTreeConfig, TreeNode};
