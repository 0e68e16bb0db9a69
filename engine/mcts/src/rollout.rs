//! Random playouts.
//!
//! A playout clones the starting state and applies uniformly random legal
//! moves until the game ends. Only the clone is mutated, so the tree's
//! states are never touched.

use engine_core::{Game, GameStatus};
use rand::Rng;

use crate::search::SearchError;

/// Result of a single playout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Playout {
    /// Terminal status the playout reached
    pub outcome: GameStatus,
    /// Number of random moves applied
    pub plies: u32,
}

/// Play uniformly random legal moves from `state` until the game ends.
///
/// Fails with `InvariantViolation` if the game adapter reports an ongoing
/// position without legal moves, or if `max_depth` plies pass without a
/// terminal status.
pub fn random_playout<G, R>(
    game: &G,
    state: &G::State,
    max_depth: u32,
    rng: &mut R,
) -> Result<Playout, SearchError>
where
    G: Game,
    R: Rng + ?Sized,
{
    let mut current = state.clone();
    let mut plies = 0;

    loop {
        let status = game.status(&current);
        if status.is_terminal() {
            return Ok(Playout {
                outcome: status,
                plies,
            });
        }

        if plies >= max_depth {
            return Err(SearchError::InvariantViolation(format!(
                "playout exceeded {} plies without reaching a terminal state",
                max_depth
            )));
        }

        let moves = game.legal_moves(&current);
        if moves.is_empty() {
            return Err(SearchError::InvariantViolation(format!(
                "ongoing state has no legal moves: {:?}",
                current
            )));
        }

        let action = moves[rng.gen_range(0..moves.len())];
        current = game.apply_move(&current, action);
        plies += 1;
    }
}
