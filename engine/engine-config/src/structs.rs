//! Configuration struct definitions.
//!
//! All config structs with serde deserialization support and default values.

use std::time::Duration;

use crate::defaults;
use serde::Deserialize;

// ============================================================================
// Serde default functions (required for #[serde(default = "...")])
// These call the accessor functions from defaults module
// ============================================================================

fn d_log_level() -> String {
    defaults::log_level().into()
}
fn d_num_iterations() -> u32 {
    defaults::num_iterations()
}
fn d_exploration() -> f64 {
    defaults::exploration()
}
fn d_win_reward() -> f64 {
    defaults::win_reward()
}
fn d_prune_losing_moves() -> bool {
    defaults::prune_losing_moves()
}
fn d_time_limit_ms() -> u64 {
    defaults::time_limit_ms()
}
fn d_max_rollout_depth() -> u32 {
    defaults::max_rollout_depth()
}
fn d_player_x() -> String {
    defaults::player_x().into()
}
fn d_player_o() -> String {
    defaults::player_o().into()
}
fn d_games() -> u32 {
    defaults::games()
}
fn d_seed() -> u64 {
    defaults::seed()
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Root configuration structure matching config.toml
#[derive(Debug, Deserialize, Default, Clone)]
pub struct CentralConfig {
    #[serde(default)]
    pub common: CommonConfig,
    #[serde(default)]
    pub mcts: MctsConfig,
    #[serde(default)]
    pub arena: ArenaConfig,
}

/// Common configuration shared by all components
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CommonConfig {
    #[serde(default = "d_log_level")]
    pub log_level: String,
}

impl Default for CommonConfig {
    fn default() -> Self {
        Self {
            log_level: defaults::log_level().into(),
        }
    }
}

/// MCTS (Monte Carlo Tree Search) configuration
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct MctsConfig {
    #[serde(default = "d_num_iterations")]
    pub num_iterations: u32,
    #[serde(default = "d_exploration")]
    pub exploration: f64,
    #[serde(default = "d_win_reward")]
    pub win_reward: f64,
    #[serde(default = "d_prune_losing_moves")]
    pub prune_losing_moves: bool,
    /// Wall-clock cap per decision in milliseconds (0 = iteration budget only)
    #[serde(default = "d_time_limit_ms")]
    pub time_limit_ms: u64,
    #[serde(default = "d_max_rollout_depth")]
    pub max_rollout_depth: u32,
}

impl MctsConfig {
    /// The time limit as a duration, or None when disabled.
    pub fn time_limit(&self) -> Option<Duration> {
        (self.time_limit_ms > 0).then(|| Duration::from_millis(self.time_limit_ms))
    }
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            num_iterations: defaults::num_iterations(),
            exploration: defaults::exploration(),
            win_reward: defaults::win_reward(),
            prune_losing_moves: defaults::prune_losing_moves(),
            time_limit_ms: defaults::time_limit_ms(),
            max_rollout_depth: defaults::max_rollout_depth(),
        }
    }
}

/// Arena (match runner) configuration
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ArenaConfig {
    /// Agent kind for X: "human", "random" or "mcts"
    #[serde(default = "d_player_x")]
    pub player_x: String,
    /// Agent kind for O: "human", "random" or "mcts"
    #[serde(default = "d_player_o")]
    pub player_o: String,
    #[serde(default = "d_games")]
    pub games: u32,
    /// Base seed for agent RNGs (0 = seed from entropy)
    #[serde(default = "d_seed")]
    pub seed: u64,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            player_x: defaults::player_x().into(),
            player_o: defaults::player_o().into(),
            games: defaults::games(),
            seed: defaults::seed(),
        }
    }
}
