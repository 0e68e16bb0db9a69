//! UCB1 decision policy.
//!
//! `score = mean + c * sqrt(ln(N_parent) / n)`, with unvisited children
//! scored +inf so every child is tried once before any exploitation, and
//! proven losses scored -inf so they are never chosen again.

use crate::node::{MctsNode, NodeId};
use crate::tree::MctsTree;

/// Raw UCB1 value for a child with `visits > 0`.
#[inline]
pub fn ucb1(reward_total: f64, visits: u32, parent_visits: u32, exploration: f64) -> f64 {
    debug_assert!(visits > 0);
    debug_assert!(parent_visits > 0, "a visited child implies a visited parent");
    let n = visits as f64;
    // ln(1) = 0, so clamping keeps a broken parent count from producing NaN
    let ln_parent = (parent_visits.max(1) as f64).ln();
    reward_total / n + exploration * (ln_parent / n).sqrt()
}

/// Score a child node for selection against its parent's visit count.
#[inline]
pub fn score<S, A>(child: &MctsNode<S, A>, parent_visits: u32, exploration: f64) -> f64 {
    if child.is_proven_loss() {
        return f64::NEG_INFINITY;
    }
    if child.visit_count() == 0 {
        return f64::INFINITY;
    }
    ucb1(
        child.reward_total(),
        child.visit_count(),
        parent_visits,
        exploration,
    )
}

/// Select the child of `node_id` with the highest UCB1 score.
/// Ties go to the first child in legal-move order.
/// Returns None if the node has no children.
pub fn find_best_child<S, A: Copy>(
    tree: &MctsTree<S, A>,
    node_id: NodeId,
    exploration: f64,
) -> Option<NodeId> {
    let node = tree.get(node_id);
    let parent_visits = node.visit_count();

    let mut best: Option<(NodeId, f64)> = None;
    for &(_, child_id) in &node.children {
        let s = score(tree.get(child_id), parent_visits, exploration);
        match best {
            Some((_, best_score)) if s <= best_score => {}
            _ => best = Some((child_id, s)),
        }
    }
    best.map(|(id, _)| id)
}
