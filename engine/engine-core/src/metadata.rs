//! Game metadata for display
//!
//! Front ends use this to label the board and the players without knowing
//! the concrete game type.

use serde::{Deserialize, Serialize};

use crate::typed::Player;

/// Metadata about a game for display and logging
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameMetadata {
    /// Environment identifier (e.g., "tictactoe")
    pub env_id: String,

    /// Human-readable display name (e.g., "Tic-Tac-Toe")
    pub display_name: String,

    /// Board width in cells
    pub board_width: usize,

    /// Board height in cells
    pub board_height: usize,

    /// Display names for each player (e.g., ["X", "O"])
    pub player_names: Vec<String>,

    /// Single-character symbols for each player (e.g., ['X', 'O'])
    pub player_symbols: Vec<char>,

    /// Brief description of the game rules
    pub description: String,
}

impl GameMetadata {
    /// Create a new GameMetadata with required fields
    pub fn new(env_id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            env_id: env_id.into(),
            display_name: display_name.into(),
            board_width: 0,
            board_height: 0,
            player_names: vec!["Player 1".to_string(), "Player 2".to_string()],
            player_symbols: vec!['1', '2'],
            description: String::new(),
        }
    }

    /// Builder method for board dimensions
    pub fn with_board(mut self, width: usize, height: usize) -> Self {
        self.board_width = width;
        self.board_height = height;
        self
    }

    /// Builder method for player information
    pub fn with_players(mut self, names: Vec<String>, symbols: Vec<char>) -> Self {
        self.player_names = names;
        self.player_symbols = symbols;
        self
    }

    /// Builder method for description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Get the total number of board cells
    pub fn board_size(&self) -> usize {
        self.board_width * self.board_height
    }

    /// Display name of `player`, falling back to "Player N"
    pub fn player_name(&self, player: Player) -> String {
        self.player_names
            .get(player.index())
            .cloned()
            .unwrap_or_else(|| format!("Player {}", player.index() + 1))
    }
}
