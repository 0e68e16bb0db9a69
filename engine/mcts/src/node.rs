//! MCTS tree node representation.
//!
//! Each node represents a game state reached by taking an action from the parent.
//! Nodes store the visit and reward statistics used for UCB1 selection.

/// Index into the node arena. Using a newtype for type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A node in the MCTS tree.
///
/// `S` is the game state type and `A` the action type. Statistics are only
/// changed through [`MctsNode::increment_visits`] and [`MctsNode::add_reward`].
#[derive(Debug, Clone)]
pub struct MctsNode<S, A> {
    /// Parent node index (None for root). Non-owning: the arena owns every node.
    pub parent: Option<NodeId>,

    /// Action that led to this node from parent (None for root)
    pub action: Option<A>,

    /// Game state at this node
    pub state: S,

    /// Whether this is a terminal state (game over)
    pub is_terminal: bool,

    /// Children: Vec of (action, NodeId) pairs in legal-move order.
    /// Empty until node is expanded.
    pub children: Vec<(A, NodeId)>,

    /// Number of completed iterations that passed through this node
    visit_count: u32,

    /// Sum of rewards credited to this node's mover
    reward_total: f64,

    /// The side to move here has an immediate win, so the move into this
    /// node loses. Only set when pruning is enabled.
    proven_loss: bool,
}

impl<S, A> MctsNode<S, A> {
    /// Create a new root node.
    pub fn new_root(state: S, is_terminal: bool) -> Self {
        Self {
            parent: None,
            action: None,
            state,
            is_terminal,
            children: Vec::new(),
            visit_count: 0,
            reward_total: 0.0,
            proven_loss: false,
        }
    }

    /// Create a new child node.
    pub fn new_child(parent: NodeId, action: A, state: S, is_terminal: bool) -> Self {
        Self {
            parent: Some(parent),
            action: Some(action),
            state,
            is_terminal,
            children: Vec::new(),
            visit_count: 0,
            reward_total: 0.0,
            proven_loss: false,
        }
    }

    #[inline]
    pub fn visit_count(&self) -> u32 {
        self.visit_count
    }

    #[inline]
    pub fn reward_total(&self) -> f64 {
        self.reward_total
    }

    #[inline]
    pub fn is_proven_loss(&self) -> bool {
        self.proven_loss
    }

    /// Record one more completed iteration through this node.
    #[inline]
    pub fn increment_visits(&mut self) {
        self.visit_count += 1;
    }

    /// Credit a (non-negative) reward to this node.
    #[inline]
    pub fn add_reward(&mut self, reward: f64) {
        debug_assert!(reward >= 0.0, "rewards are never negative");
        self.reward_total += reward;
    }

    /// Flag the move into this node as losing. Statistics are left intact.
    #[inline]
    pub fn mark_proven_loss(&mut self) {
        self.proven_loss = true;
    }

    /// Mean reward = reward_total / visit_count.
    /// Returns 0.0 if never visited.
    #[inline]
    pub fn mean_reward(&self) -> f64 {
        if self.visit_count == 0 {
            0.0
        } else {
            self.reward_total / self.visit_count as f64
        }
    }

    /// Check if this node stops selection: it has children, or it is
    /// terminal and never will.
    #[inline]
    pub fn is_expanded(&self) -> bool {
        !self.children.is_empty() || self.is_terminal
    }
}
