//! Monte Carlo Tree Search (UCT) for two-player, turn-alternating games.
//!
//! This crate provides a game-agnostic MCTS implementation that works with any
//! game implementing the `engine-core` Game trait.
//!
//! # Overview
//!
//! Each call builds a fresh tree rooted at the given position and runs a fixed
//! number of iterations. Each iteration consists of four phases:
//!
//! 1. **Selection**: Descend the tree using UCB1 (Upper Confidence Bound) to
//!    balance exploration and exploitation
//! 2. **Expansion**: When reaching an unexpanded node, add one child per
//!    legal move
//! 3. **Simulation**: Play uniformly random moves from one new child (or the
//!    terminal node itself) until the game ends
//! 4. **Backpropagation**: Walk back to the root, adding a visit to every node
//!    and the win reward to nodes whose mover won the playout
//!
//! The move leading to the most visited root child is returned.
//!
//! # Usage
//!
//! ```rust
//! use engine_core::Game;
//! use games_tictactoe::TicTacToe;
//! use mcts::{choose_move, MctsConfig};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha20Rng;
//!
//! let game = TicTacToe::new();
//! let state = game.initial_state();
//!
//! let mut rng = ChaCha20Rng::seed_from_u64(42);
//! let action = choose_move(&game, &state, MctsConfig::default(), &mut rng).unwrap();
//!
//! assert!(state.legal_moves().contains(&action));
//! ```
//!
//! # Configuration
//!
//! The [`MctsConfig`] struct controls search behavior:
//!
//! - `num_iterations`: Iterations per search (default: 25)
//! - `exploration`: UCB1 exploration constant (default: sqrt 2)
//! - `win_reward`: Reward credited for a win (default: 10.0)
//! - `prune_losing_moves`: Never revisit moves that allow an immediate reply win
//! - `time_limit`: Optional wall-clock cap, checked between iterations
//! - `max_rollout_depth`: Plies after which a playout is treated as broken

mod config;
mod node;
mod rollout;
mod search;
mod tree;
mod ucb;

pub use config::MctsConfig;
pub use node::{MctsNode, NodeId};
pub use rollout::{random_playout, Playout};
pub use search::{choose_move, run_mcts, MctsSearch, SearchError, SearchResult};
pub use tree::{MctsTree, TreeStats};
pub use ucb::{find_best_child, score, ucb1};
