//! MCTS search implementation.
//!
//! Implements the core UCT loop. Each iteration runs four phases:
//! 1. Selection: descend through expanded, non-terminal nodes by UCB1
//! 2. Expansion: add one child per legal move to the selected node
//! 3. Simulation: random playout from a random new child (or the terminal node)
//! 4. Backpropagation: credit visits and rewards along the path to the root

use std::collections::HashSet;
use std::time::Instant;

use engine_core::{Game, GameStatus};
use rand::Rng;
use rand_chacha::ChaCha20Rng;
use thiserror::Error;
use tracing::{debug, trace};

use crate::config::MctsConfig;
use crate::node::NodeId;
use crate::rollout::random_playout;
use crate::tree::MctsTree;
use crate::ucb::find_best_child;

/// Errors that can occur during MCTS search.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SearchError {
    #[error("No legal moves available")]
    NoLegalMoves,

    #[error("Search invariant violated: {0}")]
    InvariantViolation(String),

    #[error("Node has no children to choose from")]
    EmptyChildren,

    #[error("Invalid MCTS config: {0}")]
    InvalidConfig(String),
}

/// Result of an MCTS search.
#[derive(Debug, Clone)]
pub struct SearchResult<A> {
    /// Best action to take
    pub action: A,

    /// Visits of the chosen root child
    pub visits: u32,

    /// Mean reward of the chosen root child
    pub mean_reward: f64,

    /// Number of iterations performed
    pub iterations: u32,

    /// Visit distribution over the root's children, in legal-move order
    pub policy: Vec<(A, f32)>,
}

/// MCTS search state. One instance owns one tree for one decision.
pub struct MctsSearch<'a, G: Game> {
    game: &'a G,
    config: MctsConfig,
    tree: MctsTree<G::State, G::Action>,
    iterations: u32,
}

impl<'a, G: Game> MctsSearch<'a, G> {
    /// Create a new MCTS search rooted at `state`.
    ///
    /// Fails with `NoLegalMoves` if `state` is terminal or has no legal moves,
    /// and with `InvalidConfig` if the config does not validate.
    pub fn new(game: &'a G, config: MctsConfig, state: &G::State) -> Result<Self, SearchError> {
        config.validate()?;

        if game.status(state).is_terminal() || game.legal_moves(state).is_empty() {
            return Err(SearchError::NoLegalMoves);
        }

        Ok(Self {
            game,
            config,
            tree: MctsTree::new(state.clone(), false),
            iterations: 0,
        })
    }

    /// Run iterations until the budget or the optional deadline is exhausted.
    ///
    /// At least one iteration always runs, so a zero time limit still yields
    /// a move.
    pub fn run(&mut self, rng: &mut ChaCha20Rng) -> Result<SearchResult<G::Action>, SearchError> {
        let started = Instant::now();
        let deadline = self.config.time_limit.map(|limit| started + limit);

        for i in 0..self.config.num_iterations {
            if i > 0 && deadline.is_some_and(|d| Instant::now() >= d) {
                break;
            }
            self.run_iteration(rng)?;
        }

        let (action, child_id) = self.tree.best_action().ok_or(SearchError::NoLegalMoves)?;
        let child = self.tree.get(child_id);
        let result = SearchResult {
            action,
            visits: child.visit_count(),
            mean_reward: child.mean_reward(),
            iterations: self.iterations,
            policy: self.tree.root_policy(),
        };

        debug!(
            action = %result.action,
            visits = result.visits,
            mean_reward = result.mean_reward,
            iterations = result.iterations,
            nodes = self.tree.len(),
            elapsed_us = started.elapsed().as_micros() as u64,
            "MCTS search complete"
        );

        Ok(result)
    }

    /// Run one select -> expand -> simulate -> backpropagate iteration.
    pub fn run_iteration<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), SearchError> {
        let selected = self.select()?;

        let sim_node = if self.tree.get(selected).is_terminal {
            selected
        } else {
            self.expand(selected)?;
            self.tree.select_random_child(selected, rng)?
        };

        let playout = random_playout(
            self.game,
            &self.tree.get(sim_node).state,
            self.config.max_rollout_depth,
            rng,
        )?;

        self.tree.backpropagate(
            self.game,
            sim_node,
            playout.outcome,
            self.config.win_reward,
        );
        self.iterations += 1;

        trace!(
            iteration = self.iterations,
            selected = selected.0,
            simulated = sim_node.0,
            plies = playout.plies,
            outcome = ?playout.outcome,
            "MCTS iteration complete"
        );

        Ok(())
    }

    /// Descend from the root by UCB1 until reaching a terminal or
    /// unexpanded node.
    fn select(&self) -> Result<NodeId, SearchError> {
        let mut current = self.tree.root();

        loop {
            let node = self.tree.get(current);
            if !node.is_expanded() || node.is_terminal {
                return Ok(current);
            }

            current = find_best_child(&self.tree, current, self.config.exploration).ok_or_else(
                || SearchError::InvariantViolation(format!("node {} has no children", current.0)),
            )?;
        }
    }

    /// Add one child per legal move to a non-terminal, unexpanded node.
    fn expand(&mut self, node_id: NodeId) -> Result<(), SearchError> {
        let node = self.tree.get(node_id);
        if !node.children.is_empty() {
            return Err(SearchError::InvariantViolation(format!(
                "node {} expanded twice",
                node_id.0
            )));
        }

        let state = node.state.clone();
        let to_move = self.game.to_move(&state);
        let moves = self.game.legal_moves(&state);
        if moves.is_empty() {
            return Err(SearchError::InvariantViolation(format!(
                "ongoing state has no legal moves: {:?}",
                state
            )));
        }

        let mut seen = HashSet::with_capacity(moves.len());
        let mut has_immediate_win = false;

        for action in moves {
            if !seen.insert(action) {
                return Err(SearchError::InvariantViolation(format!(
                    "duplicate legal move {}",
                    action
                )));
            }

            let child_state = self.game.apply_move(&state, action);
            if self.game.to_move(&child_state) == to_move {
                return Err(SearchError::InvariantViolation(format!(
                    "move {} did not switch the player to move",
                    action
                )));
            }

            let status = self.game.status(&child_state);
            if status == GameStatus::Won(to_move) {
                has_immediate_win = true;
            }

            self.tree
                .add_child(node_id, action, child_state, status.is_terminal());
        }

        // The side to move here can win at once, so whoever moved into this
        // node has lost. The root belongs to the searcher and is never marked.
        if self.config.prune_losing_moves && has_immediate_win && node_id != self.tree.root() {
            self.tree.get_mut(node_id).mark_proven_loss();
            trace!(node = node_id.0, "Marked proven loss");
        }

        Ok(())
    }

    /// Get the search tree (for inspection/debugging).
    pub fn tree(&self) -> &MctsTree<G::State, G::Action> {
        &self.tree
    }

    /// Number of completed iterations.
    pub fn iterations(&self) -> u32 {
        self.iterations
    }
}

/// Run a full search on a fresh tree and return the chosen move.
pub fn choose_move<G: Game>(
    game: &G,
    state: &G::State,
    config: MctsConfig,
    rng: &mut ChaCha20Rng,
) -> Result<G::Action, SearchError> {
    run_mcts(game, state, config, rng).map(|result| result.action)
}

/// Convenience function to run a single MCTS search.
pub fn run_mcts<G: Game>(
    game: &G,
    state: &G::State,
    config: MctsConfig,
    rng: &mut ChaCha20Rng,
) -> Result<SearchResult<G::Action>, SearchError> {
    let mut search = MctsSearch::new(game, config, state)?;
    search.run(rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine_core::{DecodeError, GameMetadata, Player};
    use games_tictactoe::{Action, State, TicTacToe};
    use rand::SeedableRng;
    use std::time::Duration;

    fn scenario_b() -> State {
        State::from_rows(["XX_", "OO_", "___"]).unwrap()
    }

    /// Game adapter with a configurable defect, for invariant checks.
    #[derive(Debug)]
    struct BrokenGame {
        keeps_player: bool,
        stalls_at: Option<u8>,
    }

    impl Game for BrokenGame {
        // (stones left, player to move)
        type State = (u8, Player);
        type Action = u8;

        fn metadata(&self) -> GameMetadata {
            GameMetadata::new("broken", "Broken")
        }
        fn initial_state(&self) -> Self::State {
            (5, Player::One)
        }
        fn legal_moves(&self, state: &Self::State) -> Vec<u8> {
            if Some(state.0) == self.stalls_at || state.0 == 0 {
                Vec::new()
            } else {
                vec![1]
            }
        }
        fn apply_move(&self, state: &Self::State, action: u8) -> Self::State {
            let next = if self.keeps_player {
                state.1
            } else {
                state.1.opponent()
            };
            (state.0.saturating_sub(action), next)
        }
        fn status(&self, state: &Self::State) -> GameStatus {
            if state.0 == 0 {
                GameStatus::Won(state.1.opponent())
            } else {
                GameStatus::Ongoing
            }
        }
        fn to_move(&self, state: &Self::State) -> Player {
            state.1
        }
        fn decode_action(&self, text: &str) -> Result<u8, DecodeError> {
            text.trim()
                .parse()
                .map_err(|_| DecodeError::InvalidFormat(text.to_string()))
        }
        fn render(&self, state: &Self::State) -> String {
            state.0.to_string()
        }
    }

    #[test]
    fn test_root_visits_equal_iterations() {
        let game = TicTacToe::new();
        let state = game.initial_state();
        let config = MctsConfig::for_testing().with_iterations(137);
        let mut rng = ChaCha20Rng::seed_from_u64(42);

        let mut search = MctsSearch::new(&game, config, &state).unwrap();
        let result = search.run(&mut rng).unwrap();

        assert_eq!(result.iterations, 137);
        assert_eq!(search.tree().get(search.tree().root()).visit_count(), 137);
        assert_eq!(search.tree().stats().root_visits, 137);
    }

    #[test]
    fn test_statistics_never_decrease() {
        let game = TicTacToe::new();
        let state = game.initial_state();
        let mut rng = ChaCha20Rng::seed_from_u64(7);
        let mut search = MctsSearch::new(&game, MctsConfig::default(), &state).unwrap();

        let mut previous: Vec<(u32, f64)> = Vec::new();
        for _ in 0..100 {
            search.run_iteration(&mut rng).unwrap();
            let current: Vec<(u32, f64)> = search
                .tree()
                .arena()
                .iter()
                .map(|n| (n.visit_count(), n.reward_total()))
                .collect();

            for (before, after) in previous.iter().zip(&current) {
                assert!(after.0 >= before.0);
                assert!(after.1.abs() >= before.1.abs());
            }
            previous = current;
        }
    }

    #[test]
    fn test_expansion_is_complete_and_unique() {
        let game = TicTacToe::new();
        let state = game.initial_state();
        let mut rng = ChaCha20Rng::seed_from_u64(3);
        let mut search = MctsSearch::new(&game, MctsConfig::default(), &state).unwrap();

        for _ in 0..300 {
            search.run_iteration(&mut rng).unwrap();
        }

        let tree = search.tree();
        let mut expanded = 0;
        for node in tree.arena() {
            if node.children.is_empty() {
                continue;
            }
            expanded += 1;
            let legal = game.legal_moves(&node.state);
            assert_eq!(node.children.len(), legal.len());

            let actions: HashSet<Action> = node.children.iter().map(|(a, _)| *a).collect();
            assert_eq!(actions.len(), node.children.len());
            for (action, child_id) in &node.children {
                assert_eq!(tree.get(*child_id).action, Some(*action));
                assert_eq!(tree.get(*child_id).state, game.apply_move(&node.state, *action));
            }
        }
        assert!(expanded > 1);
    }

    #[test]
    fn test_selection_stops_at_unexpanded_child() {
        let game = TicTacToe::new();
        let state = game.initial_state();
        let mut rng = ChaCha20Rng::seed_from_u64(8);
        let mut search = MctsSearch::new(&game, MctsConfig::default(), &state).unwrap();

        search.run_iteration(&mut rng).unwrap();
        let root = search.tree().root();
        assert!(search.tree().get(root).is_expanded());

        // The second iteration descends one level and expands a single child
        search.run_iteration(&mut rng).unwrap();
        let tree = search.tree();
        let expanded: Vec<_> = tree
            .arena()
            .iter()
            .filter(|n| n.is_expanded() && !n.is_terminal)
            .collect();
        assert_eq!(expanded.len(), 2);
        assert_eq!(expanded[1].parent, Some(root));
    }

    #[test]
    fn test_terminal_nodes_never_expanded() {
        let game = TicTacToe::new();
        let mut rng = ChaCha20Rng::seed_from_u64(11);
        let mut search = MctsSearch::new(&game, MctsConfig::default(), &scenario_b()).unwrap();

        for _ in 0..200 {
            search.run_iteration(&mut rng).unwrap();
        }

        for node in search.tree().arena() {
            if node.is_terminal {
                assert!(node.children.is_empty());
            }
        }
    }

    #[test]
    fn test_same_seed_same_move() {
        let game = TicTacToe::new();
        let state = State::from_rows(["X__", "_O_", "___"]).unwrap();

        for seed in [0, 1, 42, 1234] {
            let config = MctsConfig::default().with_iterations(100);
            let mut rng_a = ChaCha20Rng::seed_from_u64(seed);
            let mut rng_b = ChaCha20Rng::seed_from_u64(seed);

            let a = run_mcts(&game, &state, config.clone(), &mut rng_a).unwrap();
            let b = run_mcts(&game, &state, config, &mut rng_b).unwrap();

            assert_eq!(a.action, b.action);
            assert_eq!(a.policy, b.policy);
        }
    }

    #[test]
    fn test_empty_board_returns_legal_move() {
        let game = TicTacToe::new();
        let state = game.initial_state();
        let mut rng = ChaCha20Rng::seed_from_u64(42);

        let action = choose_move(&game, &state, MctsConfig::default(), &mut rng).unwrap();
        assert!(action.row <= 2 && action.col <= 2);
        assert!(state.legal_moves().contains(&action));
    }

    #[test]
    fn test_finds_winning_move_deterministically() {
        let game = TicTacToe::new();
        let state = scenario_b();

        for seed in [0, 7, 42] {
            let mut rng = ChaCha20Rng::seed_from_u64(seed);
            let config = MctsConfig::default().with_iterations(200);
            let result = run_mcts(&game, &state, config, &mut rng).unwrap();

            assert_eq!(result.action, Action::new(0, 2));
            assert!(result.visits > 100, "winning move got {} visits", result.visits);
            assert!((result.mean_reward - 10.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_finds_winning_move_at_small_budget() {
        let game = TicTacToe::new();
        let state = scenario_b();

        let hits = (0..10u64)
            .filter(|&seed| {
                let mut rng = ChaCha20Rng::seed_from_u64(seed);
                choose_move(&game, &state, MctsConfig::default(), &mut rng).unwrap()
                    == Action::new(0, 2)
            })
            .count();
        assert!(hits >= 8, "winning move chosen in {} of 10 searches", hits);
    }

    #[test]
    fn test_near_draw_returns_legal_move() {
        let game = TicTacToe::new();
        let state = State::from_rows(["XOX", "XOO", "OX_"]).unwrap();
        let mut rng = ChaCha20Rng::seed_from_u64(5);

        let action = choose_move(&game, &state, MctsConfig::default(), &mut rng).unwrap();
        assert_eq!(action, Action::new(2, 2));
    }

    #[test]
    fn test_near_draw_with_several_moves() {
        let game = TicTacToe::new();
        // O to move; both (1, 2) and (2, 2) lead to a draw
        let state = State::from_rows(["XOX", "XO_", "OX_"]).unwrap();
        let legal = game.legal_moves(&state);
        assert_eq!(legal.len(), 2);

        for seed in [0u64, 5, 9] {
            let mut rng = ChaCha20Rng::seed_from_u64(seed);
            let result = run_mcts(&game, &state, MctsConfig::default(), &mut rng).unwrap();
            assert!(legal.contains(&result.action));
            assert_eq!(result.mean_reward, 0.0);
        }
    }

    #[test]
    fn test_terminal_position_rejected() {
        let game = TicTacToe::new();
        let state = State::from_rows(["XXX", "OO_", "___"]).unwrap();
        let mut rng = ChaCha20Rng::seed_from_u64(0);

        let result = choose_move(&game, &state, MctsConfig::default(), &mut rng);
        assert_eq!(result, Err(SearchError::NoLegalMoves));
    }

    #[test]
    fn test_pruning_forces_block() {
        let game = TicTacToe::new();
        // X to move; O threatens (1, 2)
        let state = State::from_rows(["X__", "OO_", "X__"]).unwrap();
        let config = MctsConfig::default()
            .with_iterations(200)
            .with_pruning(true);
        let mut rng = ChaCha20Rng::seed_from_u64(42);

        let mut search = MctsSearch::new(&game, config, &state).unwrap();
        let result = search.run(&mut rng).unwrap();
        assert_eq!(result.action, Action::new(1, 2));

        // The child simulated on the first iteration is only marked once it
        // is selected and expanded, so it may hold one extra visit.
        let tree = search.tree();
        let mut pruned = 0;
        for (action, child_id) in &tree.get(tree.root()).children {
            let child = tree.get(*child_id);
            if *action == Action::new(1, 2) {
                assert!(!child.is_proven_loss());
                assert!(child.visit_count() > 180);
            } else {
                assert!(child.visit_count() <= 2, "{} kept being selected", action);
                if child.is_proven_loss() {
                    pruned += 1;
                }
            }
        }
        // Every reply except the block lets O complete the middle row
        assert_eq!(pruned, tree.get(tree.root()).children.len() - 1);
        assert_eq!(pruned, 4);
        assert!(!tree.get(tree.root()).is_proven_loss());
    }

    #[test]
    fn test_pruning_off_marks_nothing() {
        let game = TicTacToe::new();
        let state = State::from_rows(["X__", "OO_", "X__"]).unwrap();
        let mut rng = ChaCha20Rng::seed_from_u64(42);

        let mut search = MctsSearch::new(&game, MctsConfig::default(), &state).unwrap();
        search.run(&mut rng).unwrap();
        assert!(search.tree().arena().iter().all(|n| !n.is_proven_loss()));
    }

    #[test]
    fn test_zero_time_limit_runs_one_iteration() {
        let game = TicTacToe::new();
        let config = MctsConfig::default()
            .with_iterations(10_000)
            .with_time_limit(Duration::ZERO);
        let mut rng = ChaCha20Rng::seed_from_u64(1);

        let result = run_mcts(&game, &game.initial_state(), config, &mut rng).unwrap();
        assert_eq!(result.iterations, 1);
    }

    #[test]
    fn test_generous_time_limit_keeps_budget() {
        let game = TicTacToe::new();
        let config = MctsConfig::default()
            .with_iterations(30)
            .with_time_limit(Duration::from_secs(60));
        let mut rng = ChaCha20Rng::seed_from_u64(1);

        let result = run_mcts(&game, &game.initial_state(), config, &mut rng).unwrap();
        assert_eq!(result.iterations, 30);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let game = TicTacToe::new();
        let config = MctsConfig::default().with_iterations(0);

        let result = MctsSearch::new(&game, config, &game.initial_state());
        assert!(matches!(result, Err(SearchError::InvalidConfig(_))));
    }

    #[test]
    fn test_move_that_keeps_player_is_violation() {
        let game = BrokenGame {
            keeps_player: true,
            stalls_at: None,
        };
        let mut rng = ChaCha20Rng::seed_from_u64(0);

        let result = choose_move(&game, &game.initial_state(), MctsConfig::default(), &mut rng);
        assert!(matches!(result, Err(SearchError::InvariantViolation(_))));
    }

    #[test]
    fn test_stalled_position_is_violation() {
        let game = BrokenGame {
            keeps_player: false,
            stalls_at: Some(3),
        };
        let mut rng = ChaCha20Rng::seed_from_u64(0);

        let result = choose_move(&game, &game.initial_state(), MctsConfig::default(), &mut rng);
        assert!(matches!(result, Err(SearchError::InvariantViolation(_))));
    }

    #[test]
    fn test_policy_covers_root_children() {
        let game = TicTacToe::new();
        let state = game.initial_state();
        let mut rng = ChaCha20Rng::seed_from_u64(42);

        let result = run_mcts(&game, &state, MctsConfig::default(), &mut rng).unwrap();
        assert_eq!(result.policy.len(), 9);
        let sum: f32 = result.policy.iter().map(|(_, p)| p).sum();
        assert!((sum - 1.0).abs() < 1e-4);
    }
}
