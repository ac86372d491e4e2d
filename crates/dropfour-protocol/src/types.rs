//! Core types for the Dropfour wire format.
//!
//! Everything that travels between the game server and the client — the
//! board grid, move records, the tagged server frames, and the single
//! outbound request shape — lives here. The JSON conversion rules
//! (nested-board strings, stringified winners) live in [`crate::codec`];
//! this module only defines the shapes.

use serde::{Deserialize, Serialize};

use std::fmt;

/// Number of rows on the board.
pub const ROWS: usize = 6;

/// Number of columns on the board.
pub const COLUMNS: usize = 7;

// ---------------------------------------------------------------------------
// Cells and the board
// ---------------------------------------------------------------------------

/// One slot of the board grid.
///
/// The wire encoding is numeric: `0` empty, `1` human disc, `2` machine
/// disc. `#[serde(try_from = "u8", into = "u8")]` keeps the JSON form a
/// plain number while rejecting anything outside that range at decode time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Cell {
    /// No disc.
    Empty,
    /// A disc played by the human.
    Human,
    /// A disc played by the machine opponent.
    Machine,
}

impl TryFrom<u8> for Cell {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Cell::Empty),
            1 => Ok(Cell::Human),
            2 => Ok(Cell::Machine),
            other => Err(format!("cell value out of range: {other}")),
        }
    }
}

impl From<Cell> for u8 {
    fn from(cell: Cell) -> Self {
        match cell {
            Cell::Empty => 0,
            Cell::Human => 1,
            Cell::Machine => 2,
        }
    }
}

/// The full 6x7 game grid, row 0 at the top.
///
/// The server replaces the board wholesale on every update; there is no
/// incremental patching, and the dimensions never change. Decoding a grid
/// with the wrong dimensions fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board(pub [[Cell; COLUMNS]; ROWS]);

impl Board {
    /// The cell at `row`, `col`. Panics on out-of-range indices.
    pub fn cell(&self, row: usize, col: usize) -> Cell {
        self.0[row][col]
    }

    /// Iterates over the rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell; COLUMNS]> {
        self.0.iter()
    }
}

impl Default for Board {
    fn default() -> Self {
        Board([[Cell::Empty; COLUMNS]; ROWS])
    }
}

/// Renders the grid with `.`, `X` (human), `O` (machine).
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for cell in row {
                let mark = match cell {
                    Cell::Empty => '.',
                    Cell::Human => 'X',
                    Cell::Machine => 'O',
                };
                write!(f, "{mark} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Moves
// ---------------------------------------------------------------------------

/// Which side made a move. Wire values: `1` human, `2` machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Player {
    Human,
    Machine,
}

impl TryFrom<u8> for Player {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Player::Human),
            2 => Ok(Player::Machine),
            other => Err(format!("player value out of range: {other}")),
        }
    }
}

impl From<Player> for u8 {
    fn from(player: Player) -> Self {
        match player {
            Player::Human => 1,
            Player::Machine => 2,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::Human => write!(f, "human"),
            Player::Machine => write!(f, "machine"),
        }
    }
}

/// One entry of the move log: who played, and into which column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    /// The side that moved.
    pub player: Player,
    /// Zero-based column index.
    pub column: usize,
}

// ---------------------------------------------------------------------------
// Frames
// ---------------------------------------------------------------------------

/// A decoded inbound frame.
///
/// Inbound JSON objects are discriminated by their `status` field, except
/// that a top-level `error` string takes precedence over any tag. Unknown
/// tags decode to [`ServerFrame::Unrecognized`] so a newer server never
/// breaks an older client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerFrame {
    /// Handshake: the server's catalog of selectable opponent algorithms.
    /// First frame on every connection.
    ConnectionEstablished { algorithms: Vec<String> },

    /// Acknowledgement of a start request, echoing the chosen parameters.
    GameStarted { algorithm: String, difficulty: u32 },

    /// The human placed a disc; `board` is the full grid after the move.
    HumanMove { board: Board, column: usize },

    /// The machine placed a disc; `board` is the full grid after the move.
    ComputerMove { board: Board, column: usize },

    /// The game is over. `winner` is `0` for a draw, `1` for the human,
    /// anything else for the machine.
    GameOver { board: Board, winner: i64 },

    /// A server-reported error, verbatim.
    ServerError { message: String },

    /// A `status` tag this client does not know.
    Unrecognized { status: String },
}

/// The one outbound request: start a game against the named algorithm.
///
/// JSON shape: `{ "algorithm": "MiniMax", "difficulty": 2 }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartRequest {
    /// A catalog member name. Membership is not validated client-side;
    /// the server rejects unknown names.
    pub algorithm: String,
    /// Positive difficulty level.
    pub difficulty: u32,
}

// =========================================================================
// Tests
// =========================================================================
