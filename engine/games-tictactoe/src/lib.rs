//! TicTacToe game implementation for the engine
//!
//! This crate provides a complete reference implementation of 3x3
//! tic-tac-toe on top of the `engine_core::Game` trait.
//!
//! # Usage
//!
//! ```rust
//! use engine_core::{Game, GameStatus, Player};
//! use games_tictactoe::{Action, TicTacToe};
//!
//! let game = TicTacToe::new();
//! let state = game.initial_state();
//! assert_eq!(game.legal_moves(&state).len(), 9);
//!
//! let state = game.apply_move(&state, Action::new(1, 1));
//! assert_eq!(game.to_move(&state), Player::Two);
//! assert_eq!(game.status(&state), GameStatus::Ongoing);
//! ```

use std::fmt;

use engine_core::typed::{DecodeError, Game, GameStatus, Player};
use engine_core::GameMetadata;

/// Side length of the board
pub const BOARD_SIZE: usize = 3;

const CELLS: usize = BOARD_SIZE * BOARD_SIZE;

// Winning positions (rows, columns, diagonals)
const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8], // rows
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8], // columns
    [0, 4, 8],
    [2, 4, 6], // diagonals
];

/// Cell value for an empty square
const EMPTY: u8 = 0;

#[inline]
fn cell_of(player: Player) -> u8 {
    match player {
        Player::One => 1,
        Player::Two => 2,
    }
}

#[inline]
fn symbol_of(cell: u8) -> char {
    match cell {
        1 => 'X',
        2 => 'O',
        _ => '_',
    }
}

/// TicTacToe game state
///
/// Represents the complete state of a TicTacToe game including the board,
/// the side to move, and the game status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct State {
    /// Board representation: 0=empty, 1=X, 2=O
    board: [u8; CELLS],
    /// Side to move (X is `Player::One`)
    to_move: Player,
    /// Cached result of `check_status`
    status: GameStatus,
}

impl State {
    /// Create a new initial game state
    pub fn new() -> Self {
        Self {
            board: [EMPTY; CELLS],
            to_move: Player::One, // X goes first
            status: GameStatus::Ongoing,
        }
    }

    /// Build a position from three row strings using `X`, `O` and `_` (or `.`).
    ///
    /// The side to move is inferred from the piece counts: X moves when both
    /// sides have the same number of pieces, O when X has one more.
    ///
    /// ```
    /// use engine_core::Player;
    /// use games_tictactoe::State;
    ///
    /// let state = State::from_rows(["XX_", "OO_", "___"]).unwrap();
    /// assert_eq!(state.to_move(), Player::One);
    /// ```
    pub fn from_rows(rows: [&str; BOARD_SIZE]) -> Result<Self, DecodeError> {
        let mut board = [EMPTY; CELLS];

        for (r, row) in rows.iter().enumerate() {
            let cells: Vec<char> = row.chars().filter(|c| !c.is_whitespace()).collect();
            if cells.len() != BOARD_SIZE {
                return Err(DecodeError::InvalidFormat((*row).to_string()));
            }
            for (c, ch) in cells.into_iter().enumerate() {
                board[r * BOARD_SIZE + c] = match ch {
                    'X' | 'x' => cell_of(Player::One),
                    'O' | 'o' => cell_of(Player::Two),
                    '_' | '.' => EMPTY,
                    _ => return Err(DecodeError::InvalidFormat((*row).to_string())),
                };
            }
        }

        let xs = board.iter().filter(|&&c| c == cell_of(Player::One)).count();
        let os = board.iter().filter(|&&c| c == cell_of(Player::Two)).count();
        let to_move = match xs.checked_sub(os) {
            Some(0) => Player::One,
            Some(1) => Player::Two,
            _ => return Err(DecodeError::InvalidFormat(rows.join("/"))),
        };

        Ok(Self {
            board,
            to_move,
            status: Self::check_status(&board),
        })
    }

    /// Check if the game is over
    pub fn is_done(&self) -> bool {
        self.status.is_terminal()
    }

    /// Current game status
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Side to move
    pub fn to_move(&self) -> Player {
        self.to_move
    }

    /// Occupant of the square at (row, col), if any
    pub fn cell(&self, row: usize, col: usize) -> Option<Player> {
        match self.board[row * BOARD_SIZE + col] {
            1 => Some(Player::One),
            2 => Some(Player::Two),
            _ => None,
        }
    }

    /// Number of pieces on the board
    pub fn moves_played(&self) -> usize {
        self.board.iter().filter(|&&c| c != EMPTY).count()
    }

    /// Get legal moves (empty positions) in row-major order
    pub fn legal_moves(&self) -> Vec<Action> {
        if self.is_done() {
            return Vec::new();
        }

        (0..CELLS)
            .filter(|&pos| self.board[pos] == EMPTY)
            .filter_map(Action::from_index)
            .collect()
    }

    /// Make a move and return the new state
    pub fn make_move(&self, action: Action) -> State {
        if self.is_done() || !action.on_board() {
            return *self;
        }

        let pos = action.index();
        if self.board[pos] != EMPTY {
            return *self; // Invalid move, return unchanged state
        }

        let mut new_state = *self;
        new_state.board[pos] = cell_of(self.to_move);
        new_state.status = Self::check_status(&new_state.board);
        new_state.to_move = self.to_move.opponent();

        new_state
    }

    /// Check for a winner or a full board
    fn check_status(board: &[u8; CELLS]) -> GameStatus {
        for line in &LINES {
            let [a, b, c] = *line;
            if board[a] != EMPTY && board[a] == board[b] && board[b] == board[c] {
                let winner = if board[a] == cell_of(Player::One) {
                    Player::One
                } else {
                    Player::Two
                };
                return GameStatus::Won(winner);
            }
        }

        if board.iter().all(|&cell| cell != EMPTY) {
            return GameStatus::Draw;
        }

        GameStatus::Ongoing
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..BOARD_SIZE {
            let cells: Vec<String> = (0..BOARD_SIZE)
                .map(|col| symbol_of(self.board[row * BOARD_SIZE + col]).to_string())
                .collect();
            writeln!(f, "{}", cells.join(" "))?;
        }
        Ok(())
    }
}

/// TicTacToe action: place the mover's piece at (row, col)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Action {
    pub row: u8,
    pub col: u8,
}

impl Action {
    /// Create an action. Coordinates are not range-checked here; `make_move`
    /// ignores squares off the board.
    pub fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Whether both coordinates lie on the board
    #[inline]
    pub fn on_board(&self) -> bool {
        (self.row as usize) < BOARD_SIZE && (self.col as usize) < BOARD_SIZE
    }

    /// Row-major board index
    #[inline]
    pub fn index(&self) -> usize {
        self.row as usize * BOARD_SIZE + self.col as usize
    }

    /// Action for a row-major board index, `None` if off the board
    pub fn from_index(index: usize) -> Option<Self> {
        if index >= CELLS {
            return None;
        }
        Some(Self::new(
            (index / BOARD_SIZE) as u8,
            (index % BOARD_SIZE) as u8,
        ))
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// TicTacToe game implementation
#[derive(Debug, Default)]
pub struct TicTacToe;

impl TicTacToe {
    /// Create a new TicTacToe game
    pub fn new() -> Self {
        Self
    }

    fn parse_coordinate(text: &str, raw: &str) -> Result<u8, DecodeError> {
        let value: u32 = text
            .parse()
            .map_err(|_| DecodeError::InvalidFormat(raw.to_string()))?;
        let max = (BOARD_SIZE - 1) as u32;
        if value > max {
            return Err(DecodeError::OutOfRange { value, max });
        }
        Ok(value as u8)
    }
}

impl Game for TicTacToe {
    type State = State;
    type Action = Action;

    fn metadata(&self) -> GameMetadata {
        GameMetadata::new("tictactoe", "Tic-Tac-Toe")
            .with_board(BOARD_SIZE, BOARD_SIZE)
            .with_players(vec!["X".to_string(), "O".to_string()], vec!['X', 'O'])
            .with_description("Get three in a row horizontally, vertically, or diagonally")
    }

    fn initial_state(&self) -> State {
        State::new()
    }

    fn legal_moves(&self, state: &State) -> Vec<Action> {
        state.legal_moves()
    }

    fn apply_move(&self, state: &State, action: Action) -> State {
        state.make_move(action)
    }

    fn status(&self, state: &State) -> GameStatus {
        state.status
    }

    fn to_move(&self, state: &State) -> Player {
        state.to_move
    }

    /// Accepts `"r c"`, `"r,c"` and `"(r, c)"`.
    fn decode_action(&self, text: &str) -> Result<Action, DecodeError> {
        let cleaned = text.trim().trim_start_matches('(').trim_end_matches(')');
        let parts: Vec<&str> = cleaned
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|s| !s.is_empty())
            .collect();

        match parts.as_slice() {
            [row, col] => Ok(Action::new(
                Self::parse_coordinate(row, text)?,
                Self::parse_coordinate(col, text)?,
            )),
            _ => Err(DecodeError::InvalidFormat(text.to_string())),
        }
    }

    fn render(&self, state: &State) -> String {
        state.to_string()
    }
}
