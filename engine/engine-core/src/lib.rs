//! Core traits and types shared by games and search
//!
//! This crate provides the contract between a game's rules and anything that
//! plays it:
//! - `Game`: Typed trait exposing legal moves, move application and status
//! - `Player` / `GameStatus`: Side identity and game outcome
//! - `GameMetadata`: Display information for front ends
//! - `game_utils`: Outcome and reward helpers shared by search and tooling

pub mod game_utils;
pub mod metadata;
pub mod typed;

// Re-export main types for convenience
pub use game_utils::{credited_reward, winner_of};
pub use metadata::GameMetadata;
pub use typed::{DecodeError, Game, GameStatus, Player};
