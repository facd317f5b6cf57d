//! Shared fixtures for integration tests

#![allow(dead_code)]

use advsearch_core::{AdversarialProblem, NodeVisit, Payoff, Player, SearchObserver};

// ============================================================================
// TIC-TAC-TOE
// ============================================================================

const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    pub fn other(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    cells: [Option<Mark>; 9],
    to_move: Mark,
}

impl Board {
    /// Parse a 9-character board, e.g. `"X.O......"`. X moves first.
    pub fn parse(text: &str) -> Self {
        let mut cells = [None; 9];
        for (i, c) in text.chars().enumerate().take(9) {
            cells[i] = match c {
                'X' => Some(Mark::X),
                'O' => Some(Mark::O),
                _ => None,
            };
        }
        let xs = cells.iter().filter(|c| **c == Some(Mark::X)).count();
        let os = cells.iter().filter(|c| **c == Some(Mark::O)).count();
        let to_move = if xs > os { Mark::O } else { Mark::X };
        Self { cells, to_move }
    }

    pub fn winner(&self) -> Option<Mark> {
        LINES.iter().find_map(|line| {
            let first = self.cells[line[0]]?;
            line.iter()
                .all(|&i| self.cells[i] == Some(first))
                .then_some(first)
        })
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    pub fn is_empty_cell(&self, cell: usize) -> bool {
        self.cells[cell].is_none()
    }

    /// Lines still winnable by `mark`
    pub fn open_lines(&self, mark: Mark) -> usize {
        LINES
            .iter()
            .filter(|line| line.iter().all(|&i| self.cells[i] != Some(mark.other())))
            .count()
    }
}

/// Tic-tac-toe from an arbitrary position; X is the maximizer
pub struct TicTacToe {
    start: Board,
}

impl TicTacToe {
    pub fn new() -> Self {
        Self::from_position(".........")
    }

    pub fn from_position(text: &str) -> Self {
        Self {
            start: Board::parse(text),
        }
    }
}

impl AdversarialProblem for TicTacToe {
    type State = Board;
    type Action = usize;

    fn start_state(&self) -> Board {
        self.start.clone()
    }

    fn available_actions(&self, state: &Board) -> Vec<usize> {
        (0..9).filter(|&i| state.is_empty_cell(i)).collect()
    }

    fn transition(&self, state: &Board, action: &usize) -> Board {
        let mut next = state.clone();
        next.cells[*action] = Some(state.to_move);
        next.to_move = state.to_move.other();
        next
    }

    fn is_terminal(&self, state: &Board) -> bool {
        state.winner().is_some() || state.is_full()
    }

    fn evaluate_terminal(&self, state: &Board) -> Payoff {
        match state.winner() {
            Some(Mark::X) => Payoff::zero_sum(1.0),
            Some(Mark::O) => Payoff::zero_sum(-1.0),
            None => Payoff::zero_sum(0.0),
        }
    }

    fn player_to_move(&self, state: &Board) -> Player {
        match state.to_move {
            Mark::X => Player::Max,
            Mark::O => Player::Min,
        }
    }
}

/// Open-line balance for `mark`, scaled into `[-1, 1]` like terminal payoffs
pub fn open_lines_heuristic(board: &Board, mark: Mark) -> f64 {
    (board.open_lines(mark) as f64 - board.open_lines(mark.other()) as f64) / 8.0
}

// ============================================================================
// OBSERVERS
// ============================================================================

/// Checks that bounds only narrow along every root-to-node path
#[derive(Default)]
pub struct BoundsTracker {
    path: Vec<(f64, f64)>,
    pub nodes: usize,
    pub prunes: usize,
}

impl SearchObserver for BoundsTracker {
    fn on_node(&mut self, visit: &NodeVisit) {
        self.nodes += 1;
        let Some(bounds) = visit.bounds else {
            return;
        };

        self.path.truncate(visit.ply);
        assert_eq!(self.path.len(), visit.ply, "parent bounds missing");
        assert!(
            bounds.alpha < bounds.beta,
            "entered ply {} with a closed window ({}, {})",
            visit.ply,
            bounds.alpha,
            bounds.beta
        );
        if let Some(&(parent_alpha, parent_beta)) = self.path.last() {
            assert!(bounds.alpha >= parent_alpha, "alpha decreased at ply {}", visit.ply);
            assert!(bounds.beta <= parent_beta, "beta increased at ply {}", visit.ply);
        }
        self.path.push((bounds.alpha, bounds.beta));
    }

    fn on_prune(&mut self, _ply: usize) {
        self.prunes += 1;
    }
}
