//! The adversarial search problem contract

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// PLAYERS
// ============================================================================

/// Player index. `Max` (0) seeks larger values, `Min` (1) smaller ones.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Player {
    Max = 0,
    Min = 1,
}

impl Player {
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Player::Max),
            1 => Some(Player::Min),
            _ => None,
        }
    }

    pub fn opponent(self) -> Self {
        match self {
            Player::Max => Player::Min,
            Player::Min => Player::Max,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::Max => write!(f, "max"),
            Player::Min => write!(f, "min"),
        }
    }
}

// ============================================================================
// PAYOFFS
// ============================================================================

/// Utility each player receives at a terminal state
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Payoff([f64; 2]);

impl Payoff {
    pub fn new(max: f64, min: f64) -> Self {
        Self([max, min])
    }

    /// Payoff of a zero-sum outcome worth `value` to the maximizer
    pub fn zero_sum(value: f64) -> Self {
        Self([value, -value])
    }

    pub fn for_player(&self, player: Player) -> f64 {
        self.0[player.index()]
    }

    /// Sum of both players' utilities; constant across one game instance
    pub fn total(&self) -> f64 {
        self.0[0] + self.0[1]
    }
}

impl fmt::Display for Payoff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.0[0], self.0[1])
    }
}

// ============================================================================
// PROBLEM
// ============================================================================

/// A two-player, constant-sum game as seen by the search engine.
///
/// All operations must be pure and deterministic. The engine never mutates a
/// state; it only asks for successors.
///
/// Contract:
/// - `available_actions` is only called on non-terminal states and must
///   return at least one action. Its order is the tie-break order.
/// - `transition` is only called with an action produced for that state.
/// - `evaluate_terminal` is only called on terminal states.
/// - `player_to_move` is only called on non-terminal states.
pub trait AdversarialProblem {
    type State: Clone;
    type Action: Clone;

    fn start_state(&self) -> Self::State;

    fn available_actions(&self, state: &Self::State) -> Vec<Self::Action>;

    fn transition(&self, state: &Self::State, action: &Self::Action) -> Self::State;

    fn is_terminal(&self, state: &Self::State) -> bool;

    fn evaluate_terminal(&self, state: &Self::State) -> Payoff;

    fn player_to_move(&self, state: &Self::State) -> Player;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_index_roundtrip() {
        assert_eq!(Player::Max.index(), 0);
        assert_eq!(Player::Min.index(), 1);
        assert_eq!(Player::from_index(0), Some(Player::Max));
        assert_eq!(Player::from_index(1), Some(Player::Min));
        assert_eq!(Player::from_index(2), None);
    }

    #[test]
    fn test_player_opponent() {
        assert_eq!(Player::Max.opponent(), Player::Min);
        assert_eq!(Player::Min.opponent(), Player::Max);
    }

    #[test]
    fn test_payoff_projection() {
        let payoff = Payoff::new(0.75, 0.25);
        assert_eq!(payoff.for_player(Player::Max), 0.75);
        assert_eq!(payoff.for_player(Player::Min), 0.25);
        assert_eq!(payoff.total(), 1.0);
    }

    #[test]
    fn test_zero_sum_payoff() {
        let payoff = Payoff::zero_sum(3.0);
        assert_eq!(payoff, Payoff::new(3.0, -3.0));
        assert_eq!(payoff.total(), 0.0);
    }

    #[test]
    fn test_payoff_serializes_as_array() {
        let json = serde_json::to_string(&Payoff::new(1.0, -1.0)).unwrap();
        assert_eq!(json, "[1.0,-1.0]");
        let player = serde_json::to_string(&Player::Min).unwrap();
        assert_eq!(player, "\"min\"");
    }
}
