use crate::types::{BOARD_WIDTH, Cell, Direction, NUM_SQUARES, Player, Position, Score};

/// Othello grid stored as one occupancy mask per colour.
///
/// Square `row * 8 + col` maps to bit `row * 8 + col`, so the masks are a
/// row-major grid. A square is never set in both masks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    black: u64,
    white: u64,
}

impl Board {
    /// Opening position: white on d4 and e5, black on e4 and d5.
    pub fn new() -> Self {
        Self {
            black: bit(3, 4) | bit(4, 3),
            white: bit(3, 3) | bit(4, 4),
        }
    }

    /// Builds a board from raw occupancy masks. Squares set in both masks
    /// are treated as black.
    pub fn from_bitboards(black: u64, white: u64) -> Self {
        Self {
            black,
            white: white & !black,
        }
    }

    pub fn cell(&self, pos: Position) -> Cell {
        let square = 1u64 << pos.index();
        if (self.black & square) != 0 {
            Cell::Black
        } else if (self.white & square) != 0 {
            Cell::White
        } else {
            Cell::Empty
        }
    }

    /// Returns the grid as `rows[row][col]`.
    pub fn rows(&self) -> [[Cell; BOARD_WIDTH as usize]; BOARD_WIDTH as usize] {
        let mut rows = [[Cell::Empty; BOARD_WIDTH as usize]; BOARD_WIDTH as usize];
        for (index, cell) in rows.iter_mut().flatten().enumerate() {
            *cell = self.cell(Position::from_index(index));
        }
        rows
    }

    /// Row-major cell codes for the JS host (see [`Cell::code`]).
    pub fn to_array(&self) -> [u8; NUM_SQUARES] {
        let mut board = [0u8; NUM_SQUARES];
        for (index, code) in board.iter_mut().enumerate() {
            *code = self.cell(Position::from_index(index)).code();
        }
        board
    }

    /// Whether placing at `pos` for `player` would capture along `dir`:
    /// one or more opponent stones followed by one of `player`'s own.
    /// Hitting an empty square or the edge first means no capture.
    pub fn can_capture_in_direction(&self, pos: Position, dir: Direction, player: Player) -> bool {
        let (me, opp) = self.sides(player);
        let mut has_opponent = false;
        let mut cursor = pos.step(dir);

        while let Some(square) = cursor {
            let mask = 1u64 << square.index();
            if (opp & mask) != 0 {
                has_opponent = true;
            } else if (me & mask) != 0 {
                return has_opponent;
            } else {
                return false;
            }
            cursor = square.step(dir);
        }

        false
    }

    /// Target must be empty and capture in at least one direction.
    pub fn is_valid_move(&self, pos: Position, player: Player) -> bool {
        if self.cell(pos) != Cell::Empty {
            return false;
        }
        Direction::ALL
            .iter()
            .any(|&dir| self.can_capture_in_direction(pos, dir, player))
    }

    /// Bit `row * 8 + col` is set for every square `player` may take.
    pub fn legal_moves(&self, player: Player) -> u64 {
        let occupied = self.black | self.white;
        let mut legal = 0u64;

        for index in 0..NUM_SQUARES {
            let move_bit = 1u64 << index;
            if (occupied & move_bit) != 0 {
                continue;
            }
            if self.is_valid_move(Position::from_index(index), player) {
                legal |= move_bit;
            }
        }

        legal
    }

    /// Legal targets in row-major order.
    pub fn valid_moves(&self, player: Player) -> Vec<Position> {
        mask_to_positions(self.legal_moves(player))
    }

    pub fn has_valid_move(&self, player: Player) -> bool {
        self.legal_moves(player) != 0
    }

    /// Drops a `player` stone on `pos` and turns every captured run.
    ///
    /// The captured squares come back grouped by direction in [`Direction::ALL`]
    /// order, nearest first. An illegal target yields no captures and no change.
    pub fn place(&mut self, pos: Position, player: Player) -> Vec<Position> {
        if !self.is_valid_move(pos, player) {
            return Vec::new();
        }

        let mut flipped = Vec::new();
        for dir in Direction::ALL {
            if !self.can_capture_in_direction(pos, dir, player) {
                continue;
            }
            let mut cursor = pos.step(dir);
            while let Some(square) = cursor {
                if self.cell(square) == Cell::from(player) {
                    break;
                }
                flipped.push(square);
                cursor = square.step(dir);
            }
        }

        let flips = flipped
            .iter()
            .fold(0u64, |mask, square| mask | (1u64 << square.index()));
        let move_bit = 1u64 << pos.index();
        let (me, opp) = self.sides(player);
        let next_me = me | move_bit | flips;
        let next_opp = opp & !flips;

        match player {
            Player::Black => {
                self.black = next_me;
                self.white = next_opp;
            }
            Player::White => {
                self.white = next_me;
                self.black = next_opp;
            }
        }

        flipped
    }

    /// Tallies both sides from the full board.
    pub fn count(&self) -> Score {
        Score {
            black: self.black.count_ones() as u8,
            white: self.white.count_ones() as u8,
        }
    }

    /// Unoccupied squares, counted straight from the masks.
    pub fn empty_count(&self) -> u8 {
        (!(self.black | self.white)).count_ones() as u8
    }

    fn sides(&self, player: Player) -> (u64, u64) {
        match player {
            Player::Black => (self.black, self.white),
            Player::White => (self.white, self.black),
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

fn bit(row: usize, col: usize) -> u64 {
    1u64 << (row * BOARD_WIDTH as usize + col)
}

fn mask_to_positions(mask: u64) -> Vec<Position> {
    let mut bits = mask;
    let mut out = Vec::with_capacity(bits.count_ones() as usize);

    while bits != 0 {
        out.push(Position::from_index(bits.trailing_zeros() as usize));
        bits &= bits - 1;
    }

    out
}
