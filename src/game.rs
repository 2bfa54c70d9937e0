use tracing::{debug, info, instrument};

use crate::board::Board;
use crate::error::GameError;
use crate::types::{GameResult, GameState, MoveOutcome, Player, Position, Score, Turn, Winner};

/// One Othello game: the board plus whose turn it is and whether play has ended.
///
/// The board only changes through [`Game::make_move`] and [`Game::reset`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    board: Board,
    current_player: Player,
    game_over: bool,
    winner: Option<Winner>,
    score: Score,
    is_pass: bool,
    flipped: Vec<Position>,
}

impl Game {
    pub fn new() -> Self {
        let board = Board::new();
        Self {
            board,
            current_player: Player::Black,
            game_over: false,
            winner: None,
            score: board.count(),
            is_pass: false,
            flipped: Vec::new(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Meaningless once the game is over.
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// `None` while the game is live.
    pub fn winner(&self) -> Option<Winner> {
        self.winner
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn is_valid_move(&self, row: u8, col: u8, player: Player) -> Result<bool, GameError> {
        let pos = Position::new(row, col)?;
        Ok(self.board.is_valid_move(pos, player))
    }

    /// Legal targets for `player` in row-major order.
    pub fn valid_moves(&self, player: Player) -> Vec<Position> {
        self.board.valid_moves(player)
    }

    /// Plays `(row, col)` for the current player.
    ///
    /// Rejections leave the game untouched.
    #[instrument(skip(self), fields(player = ?self.current_player))]
    pub fn make_move(&mut self, row: u8, col: u8) -> Result<MoveOutcome, GameError> {
        if self.game_over {
            debug!("move rejected: game is over");
            return Err(GameError::GameAlreadyOver);
        }

        let pos = Position::new(row, col)?;
        let player = self.current_player;
        if !self.board.is_valid_move(pos, player) {
            debug!(square = %pos, "move rejected: illegal");
            return Err(GameError::IllegalMove { row, col });
        }

        let flipped = self.board.place(pos, player);
        self.score = self.board.count();
        debug_assert_eq!(self.score.empty(), self.board.empty_count());
        self.flipped = flipped.clone();
        let turn = self.switch_turn(player);
        self.is_pass = matches!(turn, Turn::Passed { .. });

        Ok(MoveOutcome {
            player,
            position: pos,
            flipped,
            turn,
        })
    }

    /// Restores the opening position. Same as constructing a fresh game.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn to_game_state(&self) -> GameState {
        GameState {
            board: self.board.to_array().to_vec(),
            current_player: self.current_player.code(),
            black_count: self.score.black,
            white_count: self.score.white,
            is_game_over: self.game_over,
            winner: self.winner.map(Winner::code),
            is_pass: self.is_pass,
            flipped: self.flipped.iter().map(|pos| pos.index() as u8).collect(),
        }
    }

    /// Final counts, or `None` while the game is live.
    pub fn to_game_result(&self) -> Option<GameResult> {
        self.winner.map(|winner| GameResult {
            winner: winner.code(),
            black_count: self.score.black,
            white_count: self.score.white,
        })
    }

    fn switch_turn(&mut self, mover: Player) -> Turn {
        let opponent = mover.opponent();

        if self.board.has_valid_move(opponent) {
            self.current_player = opponent;
            return Turn::Next(opponent);
        }

        if self.board.has_valid_move(mover) {
            debug!(skipped = ?opponent, "no legal moves, turn passes back to {:?}", mover);
            return Turn::Passed { skipped: opponent };
        }

        Turn::GameOver(self.end_game())
    }

    fn end_game(&mut self) -> Winner {
        let winner = self.score.winner();
        self.game_over = true;
        self.winner = Some(winner);
        info!(
            ?winner,
            black = self.score.of(Player::Black),
            white = self.score.of(Player::White),
            "game over"
        );
        winner
    }

    #[cfg(test)]
    fn set_board_for_test(&mut self, board: Board, current_player: Player) {
        self.board = board;
        self.current_player = current_player;
        self.score = board.count();
        self.game_over = false;
        self.winner = None;
        self.is_pass = false;
        self.flipped.clear();
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Cell;

    const FULL_BOARD: u64 = u64::MAX;
    const TOP_HALF: u64 = 0x0000_0000_FFFF_FFFF;

    fn bit(row: usize, col: usize) -> u64 {
        1u64 << (row * 8 + col)
    }

    fn pos(row: u8, col: u8) -> Position {
        Position::new(row, col).unwrap()
    }

    fn game_with(black: u64, white: u64, to_move: Player) -> Game {
        let mut game = Game::new();
        game.set_board_for_test(Board::from_bitboards(black, white), to_move);
        game
    }

    fn assert_score_matches_board(game: &Game) {
        let score = game.score();
        let empty = game
            .board()
            .rows()
            .iter()
            .flatten()
            .filter(|&&cell| cell == Cell::Empty)
            .count();
        assert_eq!(score, game.board().count());
        assert_eq!(score.black as usize + score.white as usize + empty, 64);
    }

    #[test]
    fn initial_state_is_correct() {
        let game = Game::new();
        let state = game.to_game_state();

        assert_eq!(game.current_player(), Player::Black);
        assert_eq!(game.score(), Score { black: 2, white: 2 });
        assert!(!game.is_game_over());
        assert_eq!(game.winner(), None);
        assert_eq!(game.to_game_result(), None);
        assert!(!state.is_pass);
        assert!(state.flipped.is_empty());
        assert_eq!(state.winner, None);
        assert_eq!(game.valid_moves(Player::Black).len(), 4);
        assert_score_matches_board(&game);
    }

    #[test]
    fn known_first_move_flips_one_stone() {
        let mut game = Game::new();

        let outcome = game.make_move(2, 3).unwrap();

        assert_eq!(outcome.player, Player::Black);
        assert_eq!(outcome.position, pos(2, 3));
        assert_eq!(outcome.flipped, vec![pos(3, 3)]);
        assert_eq!(outcome.turn, Turn::Next(Player::White));
        assert_eq!(game.score(), Score { black: 4, white: 1 });
        assert_eq!(game.current_player(), Player::White);
        assert_eq!(game.board().cell(pos(3, 3)), Cell::Black);
        assert_eq!(game.to_game_state().flipped, vec![27]);
    }

    #[test]
    fn illegal_player_move_returns_error_and_keeps_state() {
        let mut game = Game::new();
        let before = game.clone();

        assert_eq!(
            game.make_move(0, 0),
            Err(GameError::IllegalMove { row: 0, col: 0 })
        );
        assert_eq!(
            game.make_move(3, 3),
            Err(GameError::IllegalMove { row: 3, col: 3 })
        );
        // c3 touches d4 diagonally, but that run ends e5 white then f6 empty.
        assert_eq!(
            game.make_move(2, 2),
            Err(GameError::IllegalMove { row: 2, col: 2 })
        );
        assert_eq!(game, before);
    }

    #[test]
    fn out_of_range_coordinates_are_rejected() {
        let mut game = Game::new();
        let before = game.clone();

        assert_eq!(
            game.make_move(8, 3),
            Err(GameError::InvalidCoordinate { row: 8, col: 3 })
        );
        assert_eq!(
            game.is_valid_move(2, 255, Player::Black),
            Err(GameError::InvalidCoordinate { row: 2, col: 255 })
        );
        assert_eq!(game, before);
    }

    #[test]
    fn is_valid_move_checks_the_given_player() {
        let game = Game::new();

        assert_eq!(game.is_valid_move(2, 3, Player::Black), Ok(true));
        assert_eq!(game.is_valid_move(2, 3, Player::White), Ok(false));
        assert_eq!(game.is_valid_move(2, 4, Player::White), Ok(true));
    }

    #[test]
    fn opponent_without_moves_is_skipped() {
        // Black a1, a5; white b1, b5. After black c1 takes b1, white has
        // nothing to capture but black can still play c5.
        let mut game = game_with(bit(0, 0) | bit(4, 0), bit(0, 1) | bit(4, 1), Player::Black);

        let outcome = game.make_move(0, 2).unwrap();

        assert_eq!(outcome.flipped, vec![pos(0, 1)]);
        assert_eq!(outcome.turn, Turn::Passed { skipped: Player::White });
        assert_eq!(game.current_player(), Player::Black);
        assert!(!game.is_game_over());
        assert!(game.to_game_state().is_pass);
        assert_eq!(game.valid_moves(Player::White), Vec::new());
        assert_eq!(game.valid_moves(Player::Black), vec![pos(4, 2)]);

        let outcome = game.make_move(4, 2).unwrap();

        assert_eq!(outcome.turn, Turn::GameOver(Winner::Black));
        assert!(!game.to_game_state().is_pass);
        assert_eq!(game.score(), Score { black: 6, white: 0 });
    }

    #[test]
    fn both_sides_stuck_ends_game_before_board_is_full() {
        // Black c1 takes b1; the white stones on row 8 are unreachable.
        let white = bit(0, 1) | bit(7, 5) | bit(7, 6) | bit(7, 7);
        let mut game = game_with(bit(0, 0), white, Player::Black);

        let outcome = game.make_move(0, 2).unwrap();

        assert_eq!(outcome.turn, Turn::GameOver(Winner::Draw));
        assert!(game.is_game_over());
        assert_eq!(game.winner(), Some(Winner::Draw));
        assert_eq!(game.score(), Score { black: 3, white: 3 });
        assert_eq!(game.board().empty_count(), 58);
    }

    #[test]
    fn full_board_after_move_sets_game_over() {
        let black = bit(0, 1);
        let white = FULL_BOARD ^ bit(0, 0) ^ black;
        let mut game = game_with(black, white, Player::White);

        let outcome = game.make_move(0, 0).unwrap();
        let state = game.to_game_state();

        assert_eq!(outcome.turn, Turn::GameOver(Winner::White));
        assert!(state.is_game_over);
        assert_eq!(state.black_count, 0);
        assert_eq!(state.white_count, 64);
        assert_eq!(state.flipped, vec![1]);
        assert_eq!(state.winner, Some(2));
        assert_eq!(
            game.to_game_result(),
            Some(GameResult {
                winner: 2,
                black_count: 0,
                white_count: 64,
            })
        );
    }

    #[test]
    fn full_board_with_equal_counts_is_a_draw() {
        // Top half black except a1 (empty) and b1 (white); bottom half white.
        let black = TOP_HALF ^ bit(0, 0) ^ bit(0, 1);
        let white = !TOP_HALF | bit(0, 1);
        let mut game = game_with(black, white, Player::Black);

        let outcome = game.make_move(0, 0).unwrap();

        assert_eq!(outcome.flipped, vec![pos(0, 1)]);
        assert_eq!(outcome.turn, Turn::GameOver(Winner::Draw));
        assert_eq!(game.score(), Score { black: 32, white: 32 });
        assert_eq!(game.to_game_result().map(|result| result.winner), Some(0));
    }

    #[test]
    fn white_wins_when_it_holds_more_stones() {
        let mut game = game_with(bit(0, 1), bit(0, 0), Player::White);

        let outcome = game.make_move(0, 2).unwrap();

        assert_eq!(outcome.turn, Turn::GameOver(Winner::White));
        assert_eq!(game.winner(), Some(Winner::White));
        assert_eq!(game.score(), Score { black: 0, white: 3 });
    }

    #[test]
    fn finished_game_rejects_moves_without_changes() {
        let mut game = game_with(bit(0, 1), bit(0, 0), Player::White);
        game.make_move(0, 2).unwrap();
        let before = game.clone();

        assert_eq!(game.make_move(0, 3), Err(GameError::GameAlreadyOver));
        assert_eq!(game.make_move(9, 9), Err(GameError::GameAlreadyOver));
        assert_eq!(game, before);
    }

    #[test]
    fn self_play_keeps_score_in_sync_until_game_over() {
        let mut game = Game::new();
        let mut moves = 0;

        while !game.is_game_over() {
            let player = game.current_player();
            let candidates = game.valid_moves(player);
            assert!(!candidates.is_empty(), "{player:?} to move without legal moves");

            let target = candidates[candidates.len() / 2];
            game.make_move(target.row(), target.col()).unwrap();
            assert_score_matches_board(&game);
            assert_eq!(game.winner().is_some(), game.is_game_over());

            moves += 1;
            assert!(moves <= 60);
        }

        let score = game.score();
        assert_eq!(game.winner(), Some(score.winner()));
        assert!(game.valid_moves(Player::Black).is_empty());
        assert!(game.valid_moves(Player::White).is_empty());
    }

    #[test]
    fn reset_restores_opening_from_any_state() {
        let fresh = Game::new();

        let mut game = Game::new();
        game.reset();
        assert_eq!(game, fresh);

        game.make_move(2, 3).unwrap();
        game.make_move(2, 2).unwrap();
        game.reset();
        assert_eq!(game, fresh);

        let mut finished = game_with(bit(0, 1), bit(0, 0), Player::White);
        finished.make_move(0, 2).unwrap();
        assert!(finished.is_game_over());
        finished.reset();
        assert_eq!(finished, fresh);
        assert_eq!(finished.to_game_state(), fresh.to_game_state());
    }
}
