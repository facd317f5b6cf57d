//! Minimax, alpha-beta and depth-limited alpha-beta search
//!
//! All three variants run through a single recursion. A `SearchConfig`
//! switches pruning and the depth cutoff on or off; everything a node needs
//! from its parent travels in a `Frame` copied into each call.
//!
//! Role rules:
//! - Without a cutoff, every node reads `player_to_move` to decide whether it
//!   maximizes or minimizes, so irregular turn orders are handled. Values are
//!   the maximizer's payoff.
//! - With a cutoff, the root is a max-node and roles alternate by ply. Terminal
//!   values are the payoff of the player who launched the search, the same
//!   perspective the heuristic scores from.
//!
//! Ties keep the first action in enumeration order.

use crate::config::{Bounds, Cutoff, SearchConfig};
use crate::error::{Result, SearchError};
use crate::observer::{NodeVisit, NoopObserver, SearchObserver};
use crate::problem::{AdversarialProblem, Player};
use serde::{Deserialize, Serialize};

// ============================================================================
// SEARCH RESULT
// ============================================================================

/// Counters collected during one search
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Nodes entered, root included
    pub nodes_visited: u64,
    /// Terminal states evaluated
    pub terminal_evaluations: u64,
    /// Heuristic calls at the depth cutoff
    pub heuristic_evaluations: u64,
    /// Nodes whose remaining children were skipped
    pub prunes: u64,
    /// Deepest ply entered
    pub max_ply: usize,
}

/// Chosen action with its backed-up value
#[derive(Clone, Debug, PartialEq)]
pub struct SearchOutcome<A> {
    pub action: A,
    /// Root value: the maximizer's payoff, or the invoking player's under a cutoff
    pub value: f64,
    pub stats: SearchStats,
}

// ============================================================================
// ENTRY POINTS (Level 1)
// ============================================================================

/// Choose a move by exhaustive minimax
pub fn minimax<P: AdversarialProblem>(problem: &P) -> Result<P::Action> {
    search(problem, &SearchConfig::minimax()).map(|outcome| outcome.action)
}

/// Choose a move by alpha-beta search; always agrees with `minimax`
pub fn alpha_beta<P: AdversarialProblem>(problem: &P) -> Result<P::Action> {
    search(problem, &SearchConfig::alpha_beta()).map(|outcome| outcome.action)
}

/// Choose a move by alpha-beta search limited to `cutoff_ply` plies.
///
/// States reached after `cutoff_ply` plies are scored by `heuristic`, from the
/// perspective of the player to move at the start state. `cutoff_ply` must be
/// at least 1.
pub fn alpha_beta_cutoff<P, H>(problem: &P, cutoff_ply: u32, heuristic: H) -> Result<P::Action>
where
    P: AdversarialProblem,
    H: Fn(&P::State) -> f64,
{
    let config = SearchConfig::cutoff(cutoff_ply, &heuristic);
    search(problem, &config).map(|outcome| outcome.action)
}

/// Run a configured search from the problem's start state.
///
/// A terminal start state yields `SearchError::TerminalStart` carrying its
/// payoff, for every variant.
pub fn search<P: AdversarialProblem>(
    problem: &P,
    config: &SearchConfig<'_, P::State>,
) -> Result<SearchOutcome<P::Action>> {
    search_observed(problem, config, &mut NoopObserver)
}

/// Like `search`, reporting every node and prune to `observer`
pub fn search_observed<P: AdversarialProblem>(
    problem: &P,
    config: &SearchConfig<'_, P::State>,
    observer: &mut dyn SearchObserver,
) -> Result<SearchOutcome<P::Action>> {
    config.validate()?;

    let start = problem.start_state();
    if problem.is_terminal(&start) {
        return Err(SearchError::TerminalStart {
            payoff: problem.evaluate_terminal(&start),
        });
    }

    let algorithm = config.algorithm();
    let invoker = problem.player_to_move(&start);
    tracing::debug!("Starting {} search for player {}", algorithm, invoker);

    let mut engine = Engine {
        problem,
        cutoff: config.cutoff,
        perspective: invoker,
        stats: SearchStats::default(),
        observer,
    };
    let evaluation = engine.visit(&start, Frame::root(config))?;
    let stats = engine.stats;

    let action = evaluation
        .action
        .ok_or(SearchError::NoLegalActions { ply: 0 })?;

    tracing::debug!(
        "Finished {} search: value={}, nodes={}, prunes={}",
        algorithm,
        evaluation.value,
        stats.nodes_visited,
        stats.prunes
    );

    Ok(SearchOutcome {
        action,
        value: evaluation.value,
        stats,
    })
}

// ============================================================================
// RECURSION (Level 2)
// ============================================================================

/// Per-call search state, copied into each child
#[derive(Clone, Copy, Debug)]
struct Frame {
    ply: usize,
    /// Role by ply parity; only consulted under a cutoff
    parity_max: bool,
    bounds: Option<Bounds>,
    depth: Option<u32>,
}

impl Frame {
    fn root<S>(config: &SearchConfig<'_, S>) -> Self {
        Self {
            ply: 0,
            parity_max: true,
            bounds: config.pruning.then(Bounds::full),
            depth: config.cutoff.map(|cutoff| cutoff.ply),
        }
    }

    fn child(&self, bounds: Option<Bounds>) -> Self {
        Self {
            ply: self.ply + 1,
            parity_max: !self.parity_max,
            bounds,
            depth: self.depth.map(|depth| depth.saturating_sub(1)),
        }
    }
}

/// Backed-up value of a node; leaves and cutoff states carry no action
struct Evaluation<A> {
    value: f64,
    action: Option<A>,
}

impl<A> Evaluation<A> {
    fn leaf(value: f64) -> Self {
        Self {
            value,
            action: None,
        }
    }
}

struct Engine<'a, 'h, P: AdversarialProblem> {
    problem: &'a P,
    cutoff: Option<Cutoff<'h, P::State>>,
    perspective: Player,
    stats: SearchStats,
    observer: &'a mut dyn SearchObserver,
}

impl<P: AdversarialProblem> Engine<'_, '_, P> {
    fn visit(&mut self, state: &P::State, frame: Frame) -> Result<Evaluation<P::Action>> {
        self.stats.nodes_visited += 1;
        self.stats.max_ply = self.stats.max_ply.max(frame.ply);
        self.observer.on_node(&NodeVisit {
            ply: frame.ply,
            bounds: frame.bounds,
            depth_remaining: frame.depth,
        });

        if self.problem.is_terminal(state) {
            return Ok(Evaluation::leaf(self.terminal_value(state)));
        }

        if let (Some(0), Some(cutoff)) = (frame.depth, self.cutoff) {
            return Ok(Evaluation::leaf(self.heuristic_value(state, cutoff)));
        }

        let maximizing = self.is_max_node(state, &frame);
        self.expand(state, frame, maximizing)
    }

    /// Evaluate every child in order, keeping the first strictly best one
    fn expand(
        &mut self,
        state: &P::State,
        frame: Frame,
        maximizing: bool,
    ) -> Result<Evaluation<P::Action>> {
        let mut bounds = frame.bounds;
        let mut best: Option<(f64, P::Action)> = None;

        for action in self.problem.available_actions(state) {
            let child_state = self.problem.transition(state, &action);
            let child = self.visit(&child_state, frame.child(bounds))?;

            let improves = match &best {
                None => true,
                Some((best_value, _)) if maximizing => child.value > *best_value,
                Some((best_value, _)) => child.value < *best_value,
            };
            if improves {
                best = Some((child.value, action));
            }

            if let Some(window) = bounds.as_mut() {
                window.tighten(maximizing, child.value);
                if window.is_cut() {
                    self.stats.prunes += 1;
                    self.observer.on_prune(frame.ply);
                    tracing::trace!(
                        "Pruned at ply {}: alpha={}, beta={}",
                        frame.ply,
                        window.alpha,
                        window.beta
                    );
                    break;
                }
            }
        }

        match best {
            Some((value, action)) => Ok(Evaluation {
                value,
                action: Some(action),
            }),
            None => Err(SearchError::NoLegalActions { ply: frame.ply }),
        }
    }

    // ========================================================================
    // EVALUATION (Level 3)
    // ========================================================================

    fn is_max_node(&self, state: &P::State, frame: &Frame) -> bool {
        match self.cutoff {
            Some(_) => frame.parity_max,
            None => self.problem.player_to_move(state) == Player::Max,
        }
    }

    fn terminal_value(&mut self, state: &P::State) -> f64 {
        self.stats.terminal_evaluations += 1;
        let payoff = self.problem.evaluate_terminal(state);
        match self.cutoff {
            Some(_) => payoff.for_player(self.perspective),
            None => payoff.for_player(Player::Max),
        }
    }

    fn heuristic_value(&mut self, state: &P::State, cutoff: Cutoff<'_, P::State>) -> f64 {
        debug_assert!(
            !self.problem.is_terminal(state),
            "heuristic must not be called on a terminal state"
        );
        self.stats.heuristic_evaluations += 1;
        let value = (cutoff.heuristic)(state);
        debug_assert!(!value.is_nan(), "heuristic returned NaN");
        value
    }
}

// ============================================================================
// TESTS
// ============================================================================
