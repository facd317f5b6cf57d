//! Explicit game trees
//!
//! A `GameTree` is a finite game written out node by node. It implements
//! `AdversarialProblem`, so every search variant can run on it directly. Trees
//! are loaded from JSON, built from leaf lists, or generated at random.
//!
//! ## Architecture
//! - Level 2: Tree construction (from nodes, uniform, random)
//! - Level 3: Problem implementation, node accessors
//! - Level 4: Persistence

use crate::problem::{AdversarialProblem, Payoff, Player};
use anyhow::{ensure, Context};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::path::Path;

// ============================================================================
// TYPES
// ============================================================================

/// Node identifier (index into arena)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub usize);

impl NodeId {
    pub const ROOT: NodeId = NodeId(0);
}

/// Nested tree description, the JSON form of a game tree
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TreeNode {
    Leaf { payoff: Payoff },
    Branch { player: Player, children: Vec<TreeNode> },
}

impl TreeNode {
    pub fn leaf(payoff: Payoff) -> Self {
        TreeNode::Leaf { payoff }
    }

    pub fn zero_sum_leaf(value: f64) -> Self {
        TreeNode::Leaf {
            payoff: Payoff::zero_sum(value),
        }
    }

    pub fn branch(player: Player, children: Vec<TreeNode>) -> Self {
        TreeNode::Branch { player, children }
    }
}

#[derive(Clone, Debug)]
enum NodeKind {
    Leaf(Payoff),
    Branch { player: Player, children: Vec<NodeId> },
}

#[derive(Clone, Debug)]
struct ArenaNode {
    kind: NodeKind,
    /// Average payoff of the leaves below (the node itself for a leaf)
    mean_payoff: Payoff,
    /// Longest path to a leaf
    height: usize,
    leaves: usize,
}

/// Parameters for random tree generation
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RandomTreeConfig {
    /// Maximum plies from root to any leaf
    pub max_depth: usize,
    /// Maximum children of a branch (at least one)
    pub max_branching: usize,
    /// Constant sum of both players' payoffs at every leaf
    pub total: f64,
    /// Maximizer payoffs are integers drawn from `-payoff_range..=payoff_range`
    pub payoff_range: i32,
    /// Pick the player of every branch at random instead of alternating
    pub irregular_turns: bool,
    /// Chance that a non-root node above `max_depth` ends early as a leaf
    pub leaf_probability: f64,
}

impl Default for RandomTreeConfig {
    fn default() -> Self {
        Self {
            max_depth: 4,
            max_branching: 3,
            total: 0.0,
            payoff_range: 10,
            irregular_turns: false,
            leaf_probability: 0.15,
        }
    }
}

impl RandomTreeConfig {
    /// Create config for trees of the given shape
    pub fn new(max_depth: usize, max_branching: usize) -> Self {
        Self {
            max_depth,
            max_branching,
            ..Default::default()
        }
    }

    /// Randomize the player of each branch
    pub fn with_irregular_turns(mut self) -> Self {
        self.irregular_turns = true;
        self
    }

    /// Set the constant payoff sum
    pub fn with_total(mut self, total: f64) -> Self {
        self.total = total;
        self
    }
}

// ============================================================================
// GAME TREE (Level 2 - Construction)
// ============================================================================

/// Finite game tree with arena allocation
#[derive(Clone, Debug)]
pub struct GameTree {
    nodes: Vec<ArenaNode>,
}

impl GameTree {
    /// Build a tree from its nested description
    pub fn new(root: &TreeNode) -> Self {
        let mut tree = Self { nodes: Vec::new() };
        tree.insert(root);
        tree
    }

    /// Alternating-turn tree with `branching` children per branch, `depth`
    /// plies, and zero-sum leaves listed left to right. The root player is `Max`.
    pub fn uniform(depth: u32, branching: usize, leaf_values: &[f64]) -> anyhow::Result<Self> {
        ensure!(branching > 0, "branching factor must be positive");
        let expected = branching
            .checked_pow(depth)
            .context("tree too large for the leaf count to fit in usize")?;
        ensure!(
            leaf_values.len() == expected,
            "expected {} leaf values for depth {} and branching {}, got {}",
            expected,
            depth,
            branching,
            leaf_values.len()
        );

        let mut leaves = leaf_values.iter().copied();
        let root = build_uniform(depth, branching, Player::Max, &mut leaves);
        Ok(Self::new(&root))
    }

    /// Generate a random constant-sum tree
    pub fn random<R: Rng>(rng: &mut R, config: &RandomTreeConfig) -> Self {
        let root_player = if rng.gen_bool(0.5) {
            Player::Max
        } else {
            Player::Min
        };
        let root = build_random(rng, config, 0, root_player);
        Self::new(&root)
    }

    /// Generate a random tree from a seed
    pub fn random_seeded(seed: u64, config: &RandomTreeConfig) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        Self::random(&mut rng, config)
    }

    fn insert(&mut self, node: &TreeNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        match node {
            TreeNode::Leaf { payoff } => {
                self.nodes.push(ArenaNode {
                    kind: NodeKind::Leaf(*payoff),
                    mean_payoff: *payoff,
                    height: 0,
                    leaves: 1,
                });
            }
            TreeNode::Branch { player, children } => {
                // Reserve the slot so the parent precedes its children
                self.nodes.push(ArenaNode {
                    kind: NodeKind::Branch {
                        player: *player,
                        children: Vec::new(),
                    },
                    mean_payoff: Payoff::new(0.0, 0.0),
                    height: 0,
                    leaves: 0,
                });

                let child_ids: Vec<NodeId> = children.iter().map(|c| self.insert(c)).collect();

                let mut sums = [0.0f64; 2];
                let mut leaves = 0;
                let mut height = 0;
                for child in &child_ids {
                    let node = &self.nodes[child.0];
                    sums[0] += node.mean_payoff.for_player(Player::Max) * node.leaves as f64;
                    sums[1] += node.mean_payoff.for_player(Player::Min) * node.leaves as f64;
                    leaves += node.leaves;
                    height = height.max(node.height + 1);
                }

                let slot = &mut self.nodes[id.0];
                if leaves > 0 {
                    slot.mean_payoff = Payoff::new(sums[0] / leaves as f64, sums[1] / leaves as f64);
                }
                slot.height = height;
                slot.leaves = leaves;
                slot.kind = NodeKind::Branch {
                    player: *player,
                    children: child_ids,
                };
            }
        }
        id
    }

    // ========================================================================
    // ACCESSORS (Level 3)
    // ========================================================================

    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes[NodeId::ROOT.0].leaves
    }

    /// Longest root-to-leaf path in plies
    pub fn depth(&self) -> usize {
        self.nodes[NodeId::ROOT.0].height
    }

    /// Children of a node in action order (empty for leaves)
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        match &self.nodes[id.0].kind {
            NodeKind::Branch { children, .. } => children,
            NodeKind::Leaf(_) => &[],
        }
    }

    /// Average leaf payoff below a node, usable as a cutoff heuristic
    pub fn mean_payoff(&self, id: NodeId) -> Payoff {
        self.nodes[id.0].mean_payoff
    }

    /// Convert back to the nested description
    pub fn to_node(&self, id: NodeId) -> TreeNode {
        match &self.nodes[id.0].kind {
            NodeKind::Leaf(payoff) => TreeNode::leaf(*payoff),
            NodeKind::Branch { player, children } => TreeNode::branch(
                *player,
                children.iter().map(|&c| self.to_node(c)).collect(),
            ),
        }
    }

    // ========================================================================
    // PERSISTENCE (Level 4)
    // ========================================================================

    /// Load from JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read game tree: {}", path.display()))?;
        let root: TreeNode = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse game tree: {}", path.display()))?;
        Ok(Self::new(&root))
    }

    /// Save to JSON file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(&self.to_node(self.root()))?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write game tree: {}", path.display()))?;
        Ok(())
    }
}

// ============================================================================
// PROBLEM IMPLEMENTATION (Level 3)
// ============================================================================

impl AdversarialProblem for GameTree {
    type State = NodeId;
    type Action = usize;

    fn start_state(&self) -> NodeId {
        NodeId::ROOT
    }

    fn available_actions(&self, state: &NodeId) -> Vec<usize> {
        (0..self.children(*state).len()).collect()
    }

    fn transition(&self, state: &NodeId, action: &usize) -> NodeId {
        self.children(*state)[*action]
    }

    fn is_terminal(&self, state: &NodeId) -> bool {
        matches!(self.nodes[state.0].kind, NodeKind::Leaf(_))
    }

    /// Leaf payoff. Branches report their mean payoff, although the search
    /// never asks for it.
    fn evaluate_terminal(&self, state: &NodeId) -> Payoff {
        self.nodes[state.0].mean_payoff
    }

    /// Branch player. Leaves have no player to move and report `Max`.
    fn player_to_move(&self, state: &NodeId) -> Player {
        match &self.nodes[state.0].kind {
            NodeKind::Branch { player, .. } => *player,
            NodeKind::Leaf(_) => Player::Max,
        }
    }
}

// ============================================================================
// BUILDERS (Level 4)
// ============================================================================

fn build_uniform<I: Iterator<Item = f64>>(
    depth: u32,
    branching: usize,
    player: Player,
    leaves: &mut I,
) -> TreeNode {
    if depth == 0 {
        return TreeNode::zero_sum_leaf(leaves.next().unwrap_or(0.0));
    }
    let children = (0..branching)
        .map(|_| build_uniform(depth - 1, branching, player.opponent(), leaves))
        .collect();
    TreeNode::branch(player, children)
}

fn build_random<R: Rng>(
    rng: &mut R,
    config: &RandomTreeConfig,
    ply: usize,
    player: Player,
) -> TreeNode {
    let ends_early = ply > 0 && rng.gen_bool(config.leaf_probability.clamp(0.0, 1.0));
    if ply >= config.max_depth || ends_early {
        let value = rng.gen_range(-config.payoff_range..=config.payoff_range) as f64;
        return TreeNode::leaf(Payoff::new(value, config.total - value));
    }

    let branching = rng.gen_range(1..=config.max_branching.max(1));
    let children = (0..branching)
        .map(|_| {
            // Irregular trees let the same player move twice in a row
            let next = if config.irregular_turns && rng.gen_bool(0.5) {
                player
            } else {
                player.opponent()
            };
            build_random(rng, config, ply + 1, next)
        })
        .collect();
    TreeNode::branch(player, children)
}
