//! Typed Game trait providing the adapter contract consumed by search
//!
//! Games implement this trait with their own strongly-typed state and action
//! types. Every method takes the state by reference and never mutates it:
//! applying a move yields a fresh state, so sibling branches of a search tree
//! never alias one another.

use std::fmt;
use std::hash::Hash;

use crate::metadata::GameMetadata;

/// One of the two sides of a turn-alternating game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    /// The side that moves first
    One,
    /// The side that moves second
    Two,
}

impl Player {
    /// The other side.
    #[inline]
    pub fn opponent(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Zero-based index, handy for per-player arrays.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }
}

/// Status of a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    /// The game continues; the side to move has at least one legal move
    Ongoing,
    /// The given player has won
    Won(Player),
    /// No further moves and no winner
    Draw,
}

impl GameStatus {
    /// Check if the game is over
    #[inline]
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::Ongoing)
    }

    /// The winning player, if any
    #[inline]
    pub fn winner(self) -> Option<Player> {
        match self {
            GameStatus::Won(player) => Some(player),
            _ => None,
        }
    }
}

/// Main trait for game implementations
///
/// # Type Parameters
///
/// * `State` - A fully specified position, including whose turn it is
/// * `Action` - A small, copyable identifier of one legal transition
///
/// # Contract
///
/// * `legal_moves` is empty exactly when `status` is terminal.
/// * `apply_move` is pure and deterministic, and always hands the turn to
///   the other side.
/// * `mover` is the side whose move produced the state. For the initial
///   position it is the opponent of the side to move.
///
/// # Example
///
/// ```rust
/// # use engine_core::typed::*;
/// # use engine_core::GameMetadata;
/// /// Take-away: remove 1 or 2 stones, whoever takes the last stone wins.
/// #[derive(Debug)]
/// struct TakeAway;
///
/// #[derive(Debug, Clone, Copy, PartialEq)]
/// struct Pile { stones: u8, to_move: Player }
///
/// impl Game for TakeAway {
///     type State = Pile;
///     type Action = u8;
///
///     fn metadata(&self) -> GameMetadata { GameMetadata::new("takeaway", "Take-Away") }
///     fn initial_state(&self) -> Pile { Pile { stones: 5, to_move: Player::One } }
///     fn legal_moves(&self, s: &Pile) -> Vec<u8> { (1..=s.stones.min(2)).collect() }
///     fn apply_move(&self, s: &Pile, a: u8) -> Pile {
///         Pile { stones: s.stones - a, to_move: s.to_move.opponent() }
///     }
///     fn status(&self, s: &Pile) -> GameStatus {
///         if s.stones == 0 { GameStatus::Won(s.to_move.opponent()) } else { GameStatus::Ongoing }
///     }
///     fn to_move(&self, s: &Pile) -> Player { s.to_move }
///     fn decode_action(&self, text: &str) -> Result<u8, DecodeError> {
///         text.trim().parse().map_err(|_| DecodeError::InvalidFormat(text.to_string()))
///     }
///     fn render(&self, s: &Pile) -> String { format!("{} stones", s.stones) }
/// }
///
/// let game = TakeAway;
/// let pile = game.apply_move(&game.initial_state(), 2);
/// assert_eq!(game.mover(&pile), Player::One);
/// assert_eq!(game.legal_moves(&pile), vec![1, 2]);
/// ```
pub trait Game: fmt::Debug {
    /// Position type - cloned for every tree node and every playout
    type State: Clone + fmt::Debug;

    /// Move type - equality-comparable and hashable
    type Action: Copy + Eq + Hash + fmt::Debug + fmt::Display;

    /// Get game metadata for display
    fn metadata(&self) -> GameMetadata;

    /// The starting position
    fn initial_state(&self) -> Self::State;

    /// Legal moves from `state`, in a stable order. Empty for terminal states.
    fn legal_moves(&self, state: &Self::State) -> Vec<Self::Action>;

    /// Apply `action` to `state` and return the resulting position
    fn apply_move(&self, state: &Self::State, action: Self::Action) -> Self::State;

    /// Ongoing, won by a player, or drawn
    fn status(&self, state: &Self::State) -> GameStatus;

    /// The side about to move in `state`
    fn to_move(&self, state: &Self::State) -> Player;

    /// The side whose move produced `state`
    fn mover(&self, state: &Self::State) -> Player {
        self.to_move(state).opponent()
    }

    /// Parse an action typed by a human
    fn decode_action(&self, text: &str) -> Result<Self::Action, DecodeError>;

    /// Human-readable rendering of `state`
    fn render(&self, state: &Self::State) -> String;
}

/// Error type for decoding actions from text
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("Invalid action format: {0:?}")]
    InvalidFormat(String),
    #[error("Coordinate {value} out of range (max {max})")]
    OutOfRange { value: u32, max: u32 },
}
