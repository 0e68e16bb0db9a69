//! Centralized configuration loading from config.toml.
//!
//! This crate provides the configuration structs and loading logic used by
//! the arena binary and anything else that needs search or match settings.
//!
//! # Configuration Priority
//!
//! Settings are loaded with the following priority (highest to lowest):
//! 1. Command-line flags (applied by the binary)
//! 2. Environment variables (`TTT_<SECTION>_<KEY>`)
//! 3. config.toml file
//! 4. Built-in defaults from config.defaults.toml
//!
//! # Environment Variable Override Pattern
//!
//! ```text
//! TTT_<SECTION>_<KEY>=value
//!
//! Examples:
//!     TTT_COMMON_LOG_LEVEL=debug
//!     TTT_MCTS_NUM_ITERATIONS=400
//!     TTT_MCTS_PRUNE_LOSING_MOVES=true
//!     TTT_ARENA_PLAYER_X=random
//! ```

mod defaults;
mod loader;
mod structs;

pub use defaults::*;
pub use loader::{apply_env_overrides, load_config, load_from_path, CONFIG_SEARCH_PATHS};
pub use structs::*;
