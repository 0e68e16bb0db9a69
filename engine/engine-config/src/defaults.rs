//! Default configuration values loaded from config.defaults.toml.
//!
//! The shared TOML file is embedded at compile time, so the binary and the
//! checked-in defaults file can never disagree.

use once_cell::sync::Lazy;
use serde::Deserialize;

/// The embedded defaults TOML file (loaded at compile time)
const DEFAULTS_TOML: &str = include_str!("../../../config.defaults.toml");

/// Parsed defaults structure (parsed once at first use)
static DEFAULTS: Lazy<DefaultsConfig> = Lazy::new(|| {
    toml::from_str(DEFAULTS_TOML).expect("config.defaults.toml should be valid TOML")
});

// ============================================================================
// Internal structs for parsing config.defaults.toml
// ============================================================================

#[derive(Debug, Deserialize)]
struct DefaultsConfig {
    common: CommonDefaults,
    mcts: MctsDefaults,
    arena: ArenaDefaults,
}

#[derive(Debug, Deserialize)]
struct CommonDefaults {
    log_level: String,
}

#[derive(Debug, Deserialize)]
struct MctsDefaults {
    num_iterations: u32,
    exploration: f64,
    win_reward: f64,
    prune_losing_moves: bool,
    time_limit_ms: u64,
    max_rollout_depth: u32,
}

#[derive(Debug, Deserialize)]
struct ArenaDefaults {
    player_x: String,
    player_o: String,
    games: u32,
    seed: u64,
}

// ============================================================================
// Public accessor functions
// ============================================================================

// Common
pub fn log_level() -> &'static str {
    &DEFAULTS.common.log_level
}

// MCTS
pub fn num_iterations() -> u32 {
    DEFAULTS.mcts.num_iterations
}
pub fn exploration() -> f64 {
    DEFAULTS.mcts.exploration
}
pub fn win_reward() -> f64 {
    DEFAULTS.mcts.win_reward
}
pub fn prune_losing_moves() -> bool {
    DEFAULTS.mcts.prune_losing_moves
}
pub fn time_limit_ms() -> u64 {
    DEFAULTS.mcts.time_limit_ms
}
pub fn max_rollout_depth() -> u32 {
    DEFAULTS.mcts.max_rollout_depth
}

// Arena
pub fn player_x() -> &'static str {
    &DEFAULTS.arena.player_x
}
pub fn player_o() -> &'static str {
    &DEFAULTS.arena.player_o
}
pub fn games() -> u32 {
    DEFAULTS.arena.games
}
pub fn seed() -> u64 {
    DEFAULTS.arena.seed
}
