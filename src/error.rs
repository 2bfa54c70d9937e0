/// Reasons a query or move is rejected. None of these mutate the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum GameError {
    /// Row or column outside `0..=7`. Signed so hosts can report negative input.
    #[display("coordinate ({row}, {col}) is outside the 8x8 board")]
    InvalidCoordinate { row: i32, col: i32 },

    /// Target occupied, or nothing would be captured.
    #[display("illegal move at ({row}, {col})")]
    IllegalMove { row: u8, col: u8 },

    #[display("game is already over")]
    GameAlreadyOver,

    /// Host passed a player code other than 1 (black) or 2 (white).
    #[display("invalid player code: {code}")]
    InvalidPlayer { code: i32 },
}

impl GameError {
    /// Stable reason code reported to hosts.
    pub fn reason(&self) -> &'static str {
        match self {
            GameError::InvalidCoordinate { .. } => "invalid_coordinate",
            GameError::IllegalMove { .. } => "illegal_move",
            GameError::GameAlreadyOver => "game_already_over",
            GameError::InvalidPlayer { .. } => "invalid_player",
        }
    }
}
