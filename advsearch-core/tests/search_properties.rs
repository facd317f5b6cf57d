//! Property tests over randomly generated game trees
//!
//! Every test walks a fixed range of seeds through `ChaCha8Rng`, so failures
//! reproduce exactly.

mod common;

use advsearch_core::{
    alpha_beta, minimax, search, search_observed, AdversarialProblem, GameTree, NodeId, Player,
    RandomTreeConfig, SearchConfig, TreeNode,
};
use common::BoundsTracker;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::cell::Cell;

// ============================================================================
// TEST FIXTURES
// ============================================================================

const SEEDS: u64 = 200;

fn small_trees(config: RandomTreeConfig) -> impl Iterator<Item = (u64, GameTree)> {
    (0..SEEDS).map(move |seed| {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        (seed, GameTree::random(&mut rng, &config))
    })
}

fn alternating() -> RandomTreeConfig {
    RandomTreeConfig::new(6, 4)
}

fn irregular() -> RandomTreeConfig {
    RandomTreeConfig::new(6, 4).with_irregular_turns().with_total(10.0)
}

// ============================================================================
// EQUIVALENCE
// ============================================================================

#[test]
fn test_alpha_beta_matches_minimax_on_alternating_trees() {
    for (seed, tree) in small_trees(alternating()) {
        let exhaustive = search(&tree, &SearchConfig::minimax()).unwrap();
        let pruned = search(&tree, &SearchConfig::alpha_beta()).unwrap();
        assert_eq!(pruned.action, exhaustive.action, "seed {seed}: action differs");
        assert_eq!(pruned.value, exhaustive.value, "seed {seed}: value differs");
    }
}

#[test]
fn test_alpha_beta_matches_minimax_on_irregular_trees() {
    for (seed, tree) in small_trees(irregular()) {
        let exhaustive = search(&tree, &SearchConfig::minimax()).unwrap();
        let pruned = search(&tree, &SearchConfig::alpha_beta()).unwrap();
        assert_eq!(pruned.action, exhaustive.action, "seed {seed}: action differs");
        assert_eq!(pruned.value, exhaustive.value, "seed {seed}: value differs");
    }
}

// ============================================================================
// CUTOFF CONVERGENCE
// ============================================================================

#[test]
fn test_cutoff_beyond_tree_depth_matches_alpha_beta() {
    for (seed, tree) in small_trees(alternating()) {
        let invoker = tree.player_to_move(&tree.root());
        let calls = Cell::new(0u32);
        let heuristic = |state: &NodeId| {
            calls.set(calls.get() + 1);
            tree.mean_payoff(*state).for_player(invoker)
        };

        let depth = tree.depth() as u32;
        for ply in [depth, depth + 2] {
            let config = SearchConfig::cutoff(ply, &heuristic);
            let cutoff = search(&tree, &config).unwrap();
            let pruned = search(&tree, &SearchConfig::alpha_beta()).unwrap();
            assert_eq!(cutoff.action, pruned.action, "seed {seed}, ply {ply}");
            assert_eq!(cutoff.stats.heuristic_evaluations, 0);
        }
        assert_eq!(calls.get(), 0, "seed {seed}: heuristic reached a state");
    }
}

#[test]
fn test_cutoff_value_is_from_invoking_players_perspective() {
    let config = alternating().with_total(10.0);
    for (seed, tree) in small_trees(config) {
        let invoker = tree.player_to_move(&tree.root());
        let heuristic = |state: &NodeId| tree.mean_payoff(*state).for_player(invoker);
        let cutoff_config = SearchConfig::cutoff(tree.depth() as u32, &heuristic);
        let cutoff = search(&tree, &cutoff_config).unwrap();
        let exact = search(&tree, &SearchConfig::minimax()).unwrap();

        let expected = match invoker {
            Player::Max => exact.value,
            Player::Min => 10.0 - exact.value,
        };
        assert_eq!(cutoff.value, expected, "seed {seed}");
    }
}

#[test]
fn test_shallow_cutoff_never_descends_past_limit() {
    for (seed, tree) in small_trees(alternating()) {
        let heuristic = |state: &NodeId| tree.mean_payoff(*state).for_player(Player::Max);
        for ply in 1..=3u32 {
            let config = SearchConfig::cutoff(ply, &heuristic);
            let outcome = search(&tree, &config).unwrap();
            assert!(outcome.stats.max_ply <= ply as usize, "seed {seed}, ply {ply}");
            assert!(tree.available_actions(&tree.root()).contains(&outcome.action));
        }
    }
}

// ============================================================================
// DETERMINISM AND TIE-BREAK
// ============================================================================

#[test]
fn test_repeated_searches_return_same_action() {
    for (seed, tree) in small_trees(irregular()).take(50) {
        let first = minimax(&tree).unwrap();
        let regenerated = GameTree::random(&mut ChaCha8Rng::seed_from_u64(seed), &irregular());
        for _ in 0..3 {
            assert_eq!(minimax(&tree).unwrap(), first);
            assert_eq!(alpha_beta(&tree).unwrap(), first);
            assert_eq!(minimax(&regenerated).unwrap(), first);
        }
    }
}

#[test]
fn test_equal_subtrees_resolve_to_first_action() {
    let subtree = TreeNode::branch(
        Player::Min,
        vec![TreeNode::zero_sum_leaf(4.0), TreeNode::zero_sum_leaf(6.0)],
    );
    let tree = GameTree::new(&TreeNode::branch(
        Player::Max,
        vec![
            TreeNode::zero_sum_leaf(1.0),
            subtree.clone(),
            subtree.clone(),
            subtree,
        ],
    ));
    assert_eq!(minimax(&tree), Ok(1));
    assert_eq!(alpha_beta(&tree), Ok(1));
}

// ============================================================================
// PRUNING
// ============================================================================

#[test]
fn test_alpha_beta_never_visits_more_nodes() {
    for config in [alternating(), irregular()] {
        for (seed, tree) in small_trees(config) {
            let exhaustive = search(&tree, &SearchConfig::minimax()).unwrap();
            let pruned = search(&tree, &SearchConfig::alpha_beta()).unwrap();
            assert!(
                pruned.stats.nodes_visited <= exhaustive.stats.nodes_visited,
                "seed {seed}: {} > {}",
                pruned.stats.nodes_visited,
                exhaustive.stats.nodes_visited
            );
            assert_eq!(exhaustive.stats.nodes_visited as usize, tree.node_count());
            if pruned.stats.nodes_visited < exhaustive.stats.nodes_visited {
                assert!(pruned.stats.prunes > 0);
            }
        }
    }
}

#[test]
fn test_well_ordered_tree_prunes_strictly() {
    // The later min-nodes are refuted by their first reply
    let tree = GameTree::uniform(
        3,
        3,
        &[
            9.0, 8.0, 7.0, 6.0, 5.0, 4.0, 3.0, 2.0, 1.0, //
            3.0, 2.0, 1.0, 6.0, 5.0, 4.0, 9.0, 8.0, 7.0, //
            3.0, 2.0, 1.0, 6.0, 5.0, 4.0, 9.0, 8.0, 7.0,
        ],
    )
    .unwrap();
    let exhaustive = search(&tree, &SearchConfig::minimax()).unwrap();
    let pruned = search(&tree, &SearchConfig::alpha_beta()).unwrap();

    assert_eq!(pruned.action, exhaustive.action);
    assert_eq!(pruned.value, exhaustive.value);
    assert!(pruned.stats.nodes_visited < exhaustive.stats.nodes_visited);
    assert!(pruned.stats.prunes > 0);
}

#[test]
fn test_single_ply_tree_cannot_prune() {
    let tree = GameTree::uniform(1, 4, &[1.0, 4.0, 2.0, 3.0]).unwrap();
    let exhaustive = search(&tree, &SearchConfig::minimax()).unwrap();
    let pruned = search(&tree, &SearchConfig::alpha_beta()).unwrap();
    assert_eq!(pruned.stats.nodes_visited, exhaustive.stats.nodes_visited);
    assert_eq!(pruned.stats.prunes, 0);
    assert_eq!(pruned.action, 1);
}

// ============================================================================
// BOUNDS
// ============================================================================

#[test]
fn test_bounds_narrow_monotonically() {
    for config in [alternating(), irregular()] {
        for (_, tree) in small_trees(config) {
            let mut tracker = BoundsTracker::default();
            let outcome =
                search_observed(&tree, &SearchConfig::alpha_beta(), &mut tracker).unwrap();
            assert_eq!(tracker.nodes as u64, outcome.stats.nodes_visited);
            assert_eq!(tracker.prunes as u64, outcome.stats.prunes);
        }
    }
}

#[test]
fn test_bounds_narrow_monotonically_under_cutoff() {
    for (_, tree) in small_trees(alternating()) {
        let heuristic = |state: &NodeId| tree.mean_payoff(*state).for_player(Player::Max);
        let config = SearchConfig::cutoff(3, &heuristic);
        let mut tracker = BoundsTracker::default();
        search_observed(&tree, &config, &mut tracker).unwrap();
    }
}

#[test]
fn test_minimax_reports_no_bounds() {
    let tree = GameTree::uniform(2, 2, &[3.0, 5.0, 2.0, 8.0]).unwrap();
    let mut tracker = BoundsTracker::default();
    let outcome = search_observed(&tree, &SearchConfig::minimax(), &mut tracker).unwrap();
    assert_eq!(tracker.nodes, 7);
    assert_eq!(tracker.prunes, 0);
    assert_eq!(outcome.value, 3.0);
}
