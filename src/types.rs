use serde::Serialize;

use crate::error::GameError;

pub const BOARD_WIDTH: u8 = 8;
pub const NUM_SQUARES: usize = (BOARD_WIDTH as usize) * (BOARD_WIDTH as usize);

/// Contents of a single square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Cell {
    Empty,
    Black,
    White,
}

impl Cell {
    /// Wire code used by the JS host: 0=empty, 1=black, 2=white.
    pub fn code(self) -> u8 {
        match self {
            Cell::Empty => 0,
            Cell::Black => 1,
            Cell::White => 2,
        }
    }
}

impl From<Player> for Cell {
    fn from(player: Player) -> Self {
        match player {
            Player::Black => Cell::Black,
            Player::White => Cell::White,
        }
    }
}

/// A side. Black moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Player {
    Black,
    White,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::Black => Player::White,
            Player::White => Player::Black,
        }
    }

    pub fn code(self) -> u8 {
        Cell::from(self).code()
    }

    pub fn from_code(code: u8) -> Result<Self, GameError> {
        match code {
            1 => Ok(Player::Black),
            2 => Ok(Player::White),
            _ => Err(GameError::InvalidPlayer { code: code.into() }),
        }
    }
}

/// A board coordinate, always within the 8x8 grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Position {
    row: u8,
    col: u8,
}

impl Position {
    pub fn new(row: u8, col: u8) -> Result<Self, GameError> {
        if row >= BOARD_WIDTH || col >= BOARD_WIDTH {
            return Err(GameError::InvalidCoordinate {
                row: row.into(),
                col: col.into(),
            });
        }
        Ok(Self { row, col })
    }

    /// Caller contract: `index < 64`.
    pub(crate) fn from_index(index: usize) -> Self {
        debug_assert!(index < NUM_SQUARES);
        Self {
            row: (index / BOARD_WIDTH as usize) as u8,
            col: (index % BOARD_WIDTH as usize) as u8,
        }
    }

    pub fn row(self) -> u8 {
        self.row
    }

    pub fn col(self) -> u8 {
        self.col
    }

    /// Row-major square index (0..=63).
    pub fn index(self) -> usize {
        self.row as usize * BOARD_WIDTH as usize + self.col as usize
    }

    /// Returns the neighbouring square in `dir`, or `None` past the edge.
    pub fn step(self, dir: Direction) -> Option<Self> {
        let row = self.row as i8 + dir.d_row;
        let col = self.col as i8 + dir.d_col;
        let width = BOARD_WIDTH as i8;
        if (0..width).contains(&row) && (0..width).contains(&col) {
            Some(Self {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    /// Algebraic label, e.g. `d3` for row 2, col 3.
    pub fn label(self) -> String {
        format!("{}{}", (b'a' + self.col) as char, self.row + 1)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One of the eight compass offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Direction {
    pub d_row: i8,
    pub d_col: i8,
}

impl Direction {
    /// N, NE, E, SE, S, SW, W, NW.
    pub const ALL: [Direction; 8] = [
        Direction::new(-1, 0),
        Direction::new(-1, 1),
        Direction::new(0, 1),
        Direction::new(1, 1),
        Direction::new(1, 0),
        Direction::new(1, -1),
        Direction::new(0, -1),
        Direction::new(-1, -1),
    ];

    const fn new(d_row: i8, d_col: i8) -> Self {
        Self { d_row, d_col }
    }
}

/// Piece counts for both sides.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Score {
    pub black: u8,
    pub white: u8,
}

impl Score {
    /// Count for one side, for hosts that track a player rather than a colour field.
    pub fn of(&self, player: Player) -> u8 {
        match player {
            Player::Black => self.black,
            Player::White => self.white,
        }
    }

    /// Squares not held by either side.
    pub fn empty(&self) -> u8 {
        NUM_SQUARES as u8 - self.black - self.white
    }

    /// Higher count wins; equal counts draw.
    pub fn winner(&self) -> Winner {
        match self.black.cmp(&self.white) {
            std::cmp::Ordering::Greater => Winner::Black,
            std::cmp::Ordering::Less => Winner::White,
            std::cmp::Ordering::Equal => Winner::Draw,
        }
    }
}

/// Final outcome of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Winner {
    Black,
    White,
    Draw,
}

impl Winner {
    /// Wire code: 0=draw, 1=black, 2=white.
    pub fn code(self) -> u8 {
        match self {
            Winner::Draw => 0,
            Winner::Black => Player::Black.code(),
            Winner::White => Player::White.code(),
        }
    }
}

/// How the turn was resolved after a successful move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Turn {
    /// The opponent moves next.
    Next(Player),
    /// The opponent had no legal move and was skipped; the mover plays again.
    Passed { skipped: Player },
    /// Neither side can move.
    GameOver(Winner),
}

/// Result of a successful `make_move`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoveOutcome {
    pub player: Player,
    pub position: Position,
    /// Captured squares, grouped by direction, nearest first.
    pub flipped: Vec<Position>,
    pub turn: Turn,
}

/// Public game state returned to hosts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameState {
    /// 64 row-major cell codes (0=empty, 1=black, 2=white).
    pub board: Vec<u8>,
    pub current_player: u8,
    pub black_count: u8,
    pub white_count: u8,
    pub is_game_over: bool,
    /// 0=draw, 1=black, 2=white; absent while the game is live.
    pub winner: Option<u8>,
    /// Contract:
    /// - `true` when the previous move caused the other side to pass.
    /// - `false` otherwise, including on a fresh game.
    pub is_pass: bool,
    /// Squares flipped by the previous move (0..=63). Empty on a fresh game.
    pub flipped: Vec<u8>,
}

/// Final result after game over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameResult {
    pub winner: u8,
    pub black_count: u8,
    pub white_count: u8,
}
