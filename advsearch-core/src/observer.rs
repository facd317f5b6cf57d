//! Observer hook - instrumentation for the search recursion
//!
//! The engine reports every node it enters and every prune it performs.
//! Observers never influence the result.

use crate::config::Bounds;

/// Snapshot of a node at the moment the search enters it
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeVisit {
    /// Distance from the root (root is ply 0)
    pub ply: usize,
    /// Window received from the parent; `None` without pruning
    pub bounds: Option<Bounds>,
    /// Plies left before the heuristic takes over; `None` without a cutoff
    pub depth_remaining: Option<u32>,
}

/// Receives search events. All methods default to doing nothing.
pub trait SearchObserver {
    /// Called on entry to every node, before terminal or cutoff checks.
    fn on_node(&mut self, _visit: &NodeVisit) {}

    /// Called when the remaining children of the node at `ply` are skipped.
    fn on_prune(&mut self, _ply: usize) {}
}

/// Observer that ignores every event
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl SearchObserver for NoopObserver {}
