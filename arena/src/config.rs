//! Configuration for the arena binary
//!
//! Configuration is loaded from config.toml with environment variable overrides.
//! CLI arguments take highest priority, followed by env vars, then config.toml.

use anyhow::{anyhow, Result};
use clap::Parser;
use engine_config::{load_config, CentralConfig};
use mcts::MctsConfig;
use once_cell::sync::Lazy;
use std::path::PathBuf;
use std::time::Duration;
use tracing::level_filters::LevelFilter;

use crate::agent::AgentKind;

// Load central config once at startup
static CENTRAL_CONFIG: Lazy<CentralConfig> = Lazy::new(load_config);

// Default value functions that read from central config
fn default_player_x() -> String {
    CENTRAL_CONFIG.arena.player_x.clone()
}

fn default_player_o() -> String {
    CENTRAL_CONFIG.arena.player_o.clone()
}

fn default_games() -> u32 {
    CENTRAL_CONFIG.arena.games
}

fn default_seed() -> u64 {
    CENTRAL_CONFIG.arena.seed
}

fn default_log_level() -> String {
    CENTRAL_CONFIG.common.log_level.clone()
}

fn default_iterations() -> u32 {
    CENTRAL_CONFIG.mcts.num_iterations
}

fn default_exploration() -> f64 {
    CENTRAL_CONFIG.mcts.exploration
}

fn default_win_reward() -> f64 {
    CENTRAL_CONFIG.mcts.win_reward
}

fn default_prune_losing_moves() -> bool {
    CENTRAL_CONFIG.mcts.prune_losing_moves
}

fn default_time_limit_ms() -> u64 {
    CENTRAL_CONFIG.mcts.time_limit_ms
}

fn default_max_rollout_depth() -> u32 {
    CENTRAL_CONFIG.mcts.max_rollout_depth
}

#[derive(Parser, Debug, Clone)]
#[command(name = "arena")]
#[command(about = "Tic-tac-toe arena - human, random and MCTS players")]
#[command(
    long_about = "Plays tic-tac-toe games between any two of a human at the terminal,
a uniformly random player, and a UCT Monte Carlo Tree Search player.

Configuration is loaded from config.toml with environment variable overrides.
CLI arguments take highest priority."
)]
pub struct Config {
    /// Agent playing X, who moves first (human, random, mcts)
    #[arg(long, short = 'x', default_value_t = default_player_x())]
    pub player_x: String,

    /// Agent playing O (human, random, mcts)
    #[arg(long, short = 'o', default_value_t = default_player_o())]
    pub player_o: String,

    /// Number of games to play
    #[arg(long, short = 'n', default_value_t = default_games())]
    pub games: u32,

    /// Base RNG seed for random and MCTS agents (0 to seed from entropy)
    #[arg(long, default_value_t = default_seed())]
    pub seed: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value_t = default_log_level())]
    pub log_level: String,

    /// MCTS iterations per move
    #[arg(long, default_value_t = default_iterations())]
    pub iterations: u32,

    /// UCB1 exploration constant
    #[arg(long, default_value_t = default_exploration())]
    pub exploration: f64,

    /// Reward credited to a node whose mover wins a playout
    #[arg(long, default_value_t = default_win_reward())]
    pub win_reward: f64,

    /// Stop revisiting moves that hand the opponent an immediate win
    #[arg(long, default_value_t = default_prune_losing_moves(), action = clap::ArgAction::Set)]
    pub prune_losing_moves: bool,

    /// Wall-clock cap per MCTS decision in milliseconds (0 to disable)
    #[arg(long, default_value_t = default_time_limit_ms())]
    pub time_limit_ms: u64,

    /// Maximum plies in a single random playout
    #[arg(long, default_value_t = default_max_rollout_depth())]
    pub max_rollout_depth: u32,

    /// Write a JSON summary of the run to this path
    #[arg(long)]
    pub stats_path: Option<PathBuf>,
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        self.player_x_kind()?;
        self.player_o_kind()?;

        if self.games == 0 {
            return Err(anyhow!("games must be greater than 0"));
        }

        if self.log_level.parse::<LevelFilter>().is_err() {
            return Err(anyhow!(
                "invalid log level '{}', expected one of trace, debug, info, warn, error",
                self.log_level
            ));
        }

        self.mcts_config()
            .validate()
            .map_err(|e| anyhow!("invalid search settings: {}", e))?;

        Ok(())
    }

    pub fn player_x_kind(&self) -> Result<AgentKind> {
        self.player_x.parse()
    }

    pub fn player_o_kind(&self) -> Result<AgentKind> {
        self.player_o.parse()
    }

    /// Seed for the agent at `index`, distinct per side unless seeding from entropy.
    pub fn seed_for(&self, index: usize) -> u64 {
        if self.seed == 0 {
            0
        } else {
            self.seed.wrapping_add(index as u64)
        }
    }

    /// Search settings shared by every MCTS agent in the run.
    pub fn mcts_config(&self) -> MctsConfig {
        let config = MctsConfig::default()
            .with_iterations(self.iterations)
            .with_exploration(self.exploration)
            .with_win_reward(self.win_reward)
            .with_pruning(self.prune_losing_moves)
            .with_max_rollout_depth(self.max_rollout_depth);

        if self.time_limit_ms > 0 {
            config.with_time_limit(Duration::from_millis(self.time_limit_ms))
        } else {
            config
        }
    }
}
