//! Search configuration
//!
//! One `SearchConfig` value selects the variant: pruning on or off, and an
//! optional depth cutoff with its heuristic.

use crate::error::{Result, SearchError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// ALGORITHM
// ============================================================================

/// Search variant
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    /// Exhaustive minimax
    Minimax,
    /// Alpha-beta pruning, same result as minimax
    AlphaBeta,
    /// Depth-limited alpha-beta with heuristic evaluation at the cutoff
    Cutoff,
}

impl Default for Algorithm {
    fn default() -> Self {
        Algorithm::AlphaBeta
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Algorithm::Minimax => "minimax",
            Algorithm::AlphaBeta => "alpha-beta",
            Algorithm::Cutoff => "cutoff",
        };
        f.write_str(name)
    }
}

impl FromStr for Algorithm {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "minimax" => Ok(Algorithm::Minimax),
            "alpha-beta" | "alpha_beta" | "alphabeta" => Ok(Algorithm::AlphaBeta),
            "cutoff" | "alpha-beta-cutoff" => Ok(Algorithm::Cutoff),
            other => Err(format!("unknown algorithm '{other}'")),
        }
    }
}

// ============================================================================
// BOUNDS
// ============================================================================

/// Alpha-beta window along the current path
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Best value the maximizer can already guarantee
    pub alpha: f64,
    /// Best value the minimizer can already guarantee
    pub beta: f64,
}

impl Bounds {
    /// The widest window, `(-inf, +inf)`
    pub fn full() -> Self {
        Self {
            alpha: f64::NEG_INFINITY,
            beta: f64::INFINITY,
        }
    }

    /// Narrow the window with a child value seen at a max- or min-node
    pub fn tighten(&mut self, maximizing: bool, value: f64) {
        if maximizing {
            self.alpha = self.alpha.max(value);
        } else {
            self.beta = self.beta.min(value);
        }
    }

    /// True once the remaining siblings cannot affect the result
    pub fn is_cut(&self) -> bool {
        self.beta <= self.alpha
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::full()
    }
}

// ============================================================================
// SEARCH CONFIG
// ============================================================================

/// Depth limit and the heuristic used once it is reached
pub struct Cutoff<'h, S> {
    /// Plies searched before falling back to the heuristic
    pub ply: u32,
    /// Scores a non-terminal state for the player who launched the search
    pub heuristic: &'h dyn Fn(&S) -> f64,
}

impl<S> Clone for Cutoff<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for Cutoff<'_, S> {}

impl<S> fmt::Debug for Cutoff<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cutoff").field("ply", &self.ply).finish_non_exhaustive()
    }
}

/// Configuration for a single search
pub struct SearchConfig<'h, S> {
    /// Prune with alpha-beta bounds
    pub pruning: bool,
    /// Optional depth cutoff (implies pruning)
    pub cutoff: Option<Cutoff<'h, S>>,
}

impl<'h, S> SearchConfig<'h, S> {
    /// Exhaustive search
    pub fn minimax() -> Self {
        Self {
            pruning: false,
            cutoff: None,
        }
    }

    /// Alpha-beta search without a depth limit
    pub fn alpha_beta() -> Self {
        Self {
            pruning: true,
            cutoff: None,
        }
    }

    /// Depth-limited alpha-beta search
    pub fn cutoff(ply: u32, heuristic: &'h dyn Fn(&S) -> f64) -> Self {
        Self {
            pruning: true,
            cutoff: Some(Cutoff { ply, heuristic }),
        }
    }

    pub fn algorithm(&self) -> Algorithm {
        match (self.pruning, &self.cutoff) {
            (_, Some(_)) => Algorithm::Cutoff,
            (true, None) => Algorithm::AlphaBeta,
            (false, None) => Algorithm::Minimax,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(cutoff) = &self.cutoff {
            if cutoff.ply == 0 {
                return Err(SearchError::InvalidCutoff { ply: cutoff.ply });
            }
        }
        Ok(())
    }
}

impl<S> Clone for SearchConfig<'_, S> {
    fn clone(&self) -> Self {
        Self {
            pruning: self.pruning,
            cutoff: self.cutoff,
        }
    }
}

impl<S> fmt::Debug for SearchConfig<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchConfig")
            .field("pruning", &self.pruning)
            .field("cutoff", &self.cutoff)
            .finish()
    }
}
