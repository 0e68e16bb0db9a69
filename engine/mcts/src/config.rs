//! MCTS configuration parameters.

use std::time::Duration;

use crate::search::SearchError;

/// Configuration for Monte Carlo Tree Search.
///
/// Every search owns its own copy; there are no shared class-level defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct MctsConfig {
    /// Number of select/expand/simulate/backpropagate iterations per search.
    pub num_iterations: u32,

    /// Exploration constant `c` in UCB1: `mean + c * sqrt(ln(N) / n)`.
    /// The classical value is sqrt(2).
    pub exploration: f64,

    /// Reward credited to every node on the path whose mover won the playout.
    pub win_reward: f64,

    /// Score a node as -inf once its side to move is found to have an
    /// immediate win (the move into it loses on the spot).
    pub prune_losing_moves: bool,

    /// Optional wall-clock budget. The search stops at whichever of
    /// `num_iterations` or the deadline comes first, but always completes
    /// at least one iteration.
    pub time_limit: Option<Duration>,

    /// Maximum plies in a single random playout before the game adapter is
    /// considered broken.
    pub max_rollout_depth: u32,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            num_iterations: 25,
            exploration: std::f64::consts::SQRT_2,
            win_reward: 10.0,
            prune_losing_moves: false,
            time_limit: None,
            max_rollout_depth: 512,
        }
    }
}

impl MctsConfig {
    /// Create a fast config for testing.
    pub fn for_testing() -> Self {
        Self {
            num_iterations: 50,
            ..Self::default()
        }
    }

    /// Builder pattern: set number of iterations.
    pub fn with_iterations(mut self, n: u32) -> Self {
        self.num_iterations = n;
        self
    }

    /// Builder pattern: set UCB1 exploration constant.
    pub fn with_exploration(mut self, c: f64) -> Self {
        self.exploration = c;
        self
    }

    /// Builder pattern: set win reward.
    pub fn with_win_reward(mut self, reward: f64) -> Self {
        self.win_reward = reward;
        self
    }

    /// Builder pattern: enable or disable losing-move pruning.
    pub fn with_pruning(mut self, enabled: bool) -> Self {
        self.prune_losing_moves = enabled;
        self
    }

    /// Builder pattern: set a wall-clock limit.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Builder pattern: set the playout depth guard.
    pub fn with_max_rollout_depth(mut self, depth: u32) -> Self {
        self.max_rollout_depth = depth;
        self
    }

    /// Reject configurations that would make the search unbounded or
    /// produce meaningless scores.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.num_iterations == 0 {
            return Err(SearchError::InvalidConfig(
                "num_iterations must be positive".into(),
            ));
        }
        if !self.exploration.is_finite() || self.exploration < 0.0 {
            return Err(SearchError::InvalidConfig(format!(
                "exploration must be finite and non-negative, got {}",
                self.exploration
            )));
        }
        if !self.win_reward.is_finite() || self.win_reward <= 0.0 {
            return Err(SearchError::InvalidConfig(format!(
                "win_reward must be finite and positive, got {}",
                self.win_reward
            )));
        }
        if self.max_rollout_depth == 0 {
            return Err(SearchError::InvalidConfig(
                "max_rollout_depth must be positive".into(),
            ));
        }
        Ok(())
    }
}
