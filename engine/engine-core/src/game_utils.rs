//! Shared utilities for two-player games
//!
//! Outcome and reward helpers used by the search and by match tooling so
//! that every caller agrees on who gets credited for a result.

use crate::typed::{GameStatus, Player};

/// Reward credited to `player` for a finished game.
///
/// Returns `win_reward` if `player` won and `0.0` otherwise. Losses are not
/// penalised and draws score nothing.
///
/// # Example
/// ```
/// use engine_core::{credited_reward, GameStatus, Player};
///
/// assert_eq!(credited_reward(GameStatus::Won(Player::One), Player::One, 10.0), 10.0);
/// assert_eq!(credited_reward(GameStatus::Won(Player::One), Player::Two, 10.0), 0.0);
/// assert_eq!(credited_reward(GameStatus::Draw, Player::One, 10.0), 0.0);
/// ```
#[inline]
pub fn credited_reward(status: GameStatus, player: Player, win_reward: f64) -> f64 {
    match status.winner() {
        Some(winner) if winner == player => win_reward,
        _ => 0.0,
    }
}

/// Winner of a terminal status.
///
/// Returns `Some(None)` for a draw, `Some(Some(p))` for a win by `p`, and
/// `None` while the game is still going.
#[inline]
pub fn winner_of(status: GameStatus) -> Option<Option<Player>> {
    match status {
        GameStatus::Ongoing => None,
        GameStatus::Draw => Some(None),
        GameStatus::Won(player) => Some(Some(player)),
    }
}
