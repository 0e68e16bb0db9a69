//! Configuration loading logic.
//!
//! Handles loading config from files and applying environment variable overrides.

use crate::CentralConfig;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Standard locations to search for config.toml
pub const CONFIG_SEARCH_PATHS: &[&str] = &[
    "config.toml",    // Current directory
    "../config.toml", // Parent directory (when running from subdirectory)
];

/// Load the central configuration from config.toml.
///
/// Searches for config.toml in the following order:
/// 1. Path specified by TTT_CONFIG environment variable
/// 2. Current directory (config.toml)
/// 3. Parent directory (../config.toml)
///
/// After loading, environment variable overrides are applied.
pub fn load_config() -> CentralConfig {
    // Check for explicit config path
    if let Ok(path) = std::env::var("TTT_CONFIG") {
        let path = PathBuf::from(&path);
        if path.exists() {
            info!("Loading config from TTT_CONFIG: {}", path.display());
            return load_from_path(&path);
        }
        warn!("TTT_CONFIG={} not found, searching defaults", path.display());
    }

    // Search default locations
    for path_str in CONFIG_SEARCH_PATHS {
        let path = Path::new(path_str);
        if path.exists() {
            info!("Loading config from {}", path.display());
            return load_from_path(path);
        }
    }

    // Fall back to defaults
    debug!("No config.toml found, using built-in defaults");
    apply_env_overrides(CentralConfig::default())
}

/// Load configuration from a specific path.
///
/// An unreadable or malformed file falls back to the built-in defaults with
/// a warning; env overrides are applied either way.
pub fn load_from_path(path: &Path) -> CentralConfig {
    match std::fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(config) => apply_env_overrides(config),
            Err(e) => {
                warn!("Failed to parse {}: {}, using defaults", path.display(), e);
                apply_env_overrides(CentralConfig::default())
            }
        },
        Err(e) => {
            warn!("Failed to read {}: {}, using defaults", path.display(), e);
            apply_env_overrides(CentralConfig::default())
        }
    }
}

/// Macro to reduce env override boilerplate
macro_rules! env_override {
    // String field
    ($config:expr, $section:ident . $field:ident, $key:expr) => {
        if let Ok(v) = std::env::var($key) {
            $config.$section.$field = v;
        }
    };
    // Parseable field (u32, f64, bool, etc.)
    ($config:expr, $section:ident . $field:ident, $key:expr, parse) => {
        match std::env::var($key).map(|s| s.parse()) {
            Ok(Ok(v)) => $config.$section.$field = v,
            Ok(Err(_)) => warn!("Ignoring unparsable {}", $key),
            Err(_) => {}
        }
    };
}

/// Apply environment variable overrides to a configuration.
///
/// Environment variables follow the pattern: TTT_<SECTION>_<KEY>
pub fn apply_env_overrides(mut config: CentralConfig) -> CentralConfig {
    // Common
    env_override!(config, common.log_level, "TTT_COMMON_LOG_LEVEL");

    // MCTS
    env_override!(
        config,
        mcts.num_iterations,
        "TTT_MCTS_NUM_ITERATIONS",
        parse
    );
    env_override!(config, mcts.exploration, "TTT_MCTS_EXPLORATION", parse);
    env_override!(config, mcts.win_reward, "TTT_MCTS_WIN_REWARD", parse);
    env_override!(
        config,
        mcts.prune_losing_moves,
        "TTT_MCTS_PRUNE_LOSING_MOVES",
        parse
    );
    env_override!(config, mcts.time_limit_ms, "TTT_MCTS_TIME_LIMIT_MS", parse);
    env_override!(
        config,
        mcts.max_rollout_depth,
        "TTT_MCTS_MAX_ROLLOUT_DEPTH",
        parse
    );

    // Arena
    env_override!(config, arena.player_x, "TTT_ARENA_PLAYER_X");
    env_override!(config, arena.player_o, "TTT_ARENA_PLAYER_O");
    env_override!(config, arena.games, "TTT_ARENA_GAMES", parse);
    env_override!(config, arena.seed, "TTT_ARENA_SEED", parse);

    config
}
