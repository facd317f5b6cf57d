//! Error types for search

use crate::problem::Payoff;
use thiserror::Error;

/// Contract violations detected while searching
///
/// Every variant is a logic defect in the caller or in the problem
/// definition. None of them is transient, so none is worth retrying.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum SearchError {
    #[error("non-terminal state at ply {ply} has no legal actions")]
    NoLegalActions { ply: usize },

    #[error("start state is terminal with payoff {payoff}; there is no move to choose")]
    TerminalStart { payoff: Payoff },

    #[error("invalid cutoff ply {ply}: must be at least 1")]
    InvalidCutoff { ply: u32 },
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, SearchError>;
