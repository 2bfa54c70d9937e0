use wasm_bindgen::prelude::*;

pub mod board;
pub mod error;
pub mod game;
pub mod types;
pub mod wasm;

pub use board::Board;
pub use error::GameError;
pub use game::Game;
pub use types::{Cell, Direction, MoveOutcome, Player, Position, Score, Turn, Winner};

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}
