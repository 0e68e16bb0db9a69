//! MCTS tree structure with arena allocation.
//!
//! The tree uses arena allocation for efficient node storage and
//! cache-friendly traversal. Nodes are stored in a contiguous Vec
//! and referenced by NodeId indices, so parent links never own anything.

use engine_core::{credited_reward, Game, GameStatus};
use rand::Rng;

use crate::node::{MctsNode, NodeId};
use crate::search::SearchError;

/// MCTS tree with arena-based node storage.
#[derive(Debug)]
pub struct MctsTree<S, A> {
    /// Arena storing all nodes
    nodes: Vec<MctsNode<S, A>>,

    /// Root node index (always 0 after initialization)
    root: NodeId,
}

impl<S, A: Copy> MctsTree<S, A> {
    /// Create a new tree rooted at the given state.
    pub fn new(root_state: S, is_terminal: bool) -> Self {
        Self {
            nodes: vec![MctsNode::new_root(root_state, is_terminal)],
            root: NodeId(0),
        }
    }

    /// Get the root node ID.
    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Get a reference to a node by ID.
    #[inline]
    pub fn get(&self, id: NodeId) -> &MctsNode<S, A> {
        &self.nodes[id.index()]
    }

    /// Get a mutable reference to a node by ID.
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut MctsNode<S, A> {
        &mut self.nodes[id.index()]
    }

    /// Get the total number of nodes in the tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if tree is empty (should never be true after construction).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get the arena slice for read access.
    #[inline]
    pub fn arena(&self) -> &[MctsNode<S, A>] {
        &self.nodes
    }

    /// Add a child to a parent node.
    /// The caller guarantees `action` is not already a child of `parent_id`.
    pub fn add_child(
        &mut self,
        parent_id: NodeId,
        action: A,
        state: S,
        is_terminal: bool,
    ) -> NodeId {
        let child_id = NodeId(self.nodes.len() as u32);
        self.nodes
            .push(MctsNode::new_child(parent_id, action, state, is_terminal));

        self.get_mut(parent_id).children.push((action, child_id));

        child_id
    }

    /// Pick one of a node's children uniformly at random.
    pub fn select_random_child<R: Rng + ?Sized>(
        &self,
        node_id: NodeId,
        rng: &mut R,
    ) -> Result<NodeId, SearchError> {
        let children = &self.get(node_id).children;
        if children.is_empty() {
            return Err(SearchError::EmptyChildren);
        }
        Ok(children[rng.gen_range(0..children.len())].1)
    }

    /// Backpropagate a playout outcome from `leaf_id` to the root.
    ///
    /// Every node on the path gains one visit. A node additionally gains
    /// `win_reward` when its own mover (the side whose move produced its
    /// state) is the winner. Draws credit nobody.
    pub fn backpropagate<G>(
        &mut self,
        game: &G,
        leaf_id: NodeId,
        outcome: GameStatus,
        win_reward: f64,
    ) where
        G: Game<State = S, Action = A>,
    {
        let mut current = Some(leaf_id);

        while let Some(id) = current {
            let node = self.get_mut(id);
            node.increment_visits();

            let reward = credited_reward(outcome, game.mover(&node.state), win_reward);
            if reward > 0.0 {
                node.add_reward(reward);
            }

            current = node.parent;
        }
    }

    /// Get the most visited child of the root.
    /// Ties go to the first child in legal-move order.
    /// Returns (action, NodeId) or None if root has no children.
    pub fn best_action(&self) -> Option<(A, NodeId)> {
        let mut best: Option<(A, NodeId, u32)> = None;
        for &(action, id) in &self.get(self.root).children {
            let visits = self.get(id).visit_count();
            match best {
                Some((_, _, best_visits)) if visits <= best_visits => {}
                _ => best = Some((action, id, visits)),
            }
        }
        best.map(|(action, id, _)| (action, id))
    }

    /// Get the visit distribution over the root's children.
    /// Returns a vector of (action, visit_fraction) pairs, empty if unvisited.
    pub fn root_policy(&self) -> Vec<(A, f32)> {
        let root = self.get(self.root);
        let total_visits: u32 = root
            .children
            .iter()
            .map(|(_, id)| self.get(*id).visit_count())
            .sum();

        if total_visits == 0 {
            return Vec::new();
        }

        root.children
            .iter()
            .map(|(action, id)| {
                (
                    *action,
                    self.get(*id).visit_count() as f32 / total_visits as f32,
                )
            })
            .collect()
    }

    /// Get statistics about the tree for debugging.
    pub fn stats(&self) -> TreeStats {
        let root = self.get(self.root);
        TreeStats {
            total_nodes: self.nodes.len(),
            root_visits: root.visit_count(),
            root_mean_reward: root.mean_reward(),
            max_depth: self.compute_max_depth(),
        }
    }

    // Children are always allocated after their parent, so one forward pass
    // over the arena sees every parent's depth first.
    fn compute_max_depth(&self) -> u32 {
        let mut depths = vec![0u32; self.nodes.len()];
        for (i, node) in self.nodes.iter().enumerate() {
            if let Some(parent) = node.parent {
                depths[i] = depths[parent.index()] + 1;
            }
        }
        depths.into_iter().max().unwrap_or(0)
    }
}

/// Statistics about an MCTS tree.
#[derive(Debug, Clone)]
pub struct TreeStats {
    pub total_nodes: usize,
    pub root_visits: u32,
    pub root_mean_reward: f64,
    pub max_depth: u32,
}
