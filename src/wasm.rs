use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::error::GameError;
use crate::game::Game;
use crate::types::{Player, Turn};

/// JS-facing handle to one game. The host owns it and calls it sequentially.
#[wasm_bindgen]
pub struct WasmGame {
    inner: Game,
}

/// Reply to `make_move`. Illegal attempts are reported, never thrown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoveReport {
    pub success: bool,
    /// Flipped squares (0..=63); empty on failure.
    pub flipped: Vec<u8>,
    /// `true` when the other side had to pass after this move.
    pub passed: bool,
    pub game_over: bool,
    /// Rejection code on failure, e.g. `illegal_move`.
    pub reason: Option<&'static str>,
}

impl MoveReport {
    fn rejected(err: GameError) -> Self {
        Self {
            success: false,
            flipped: Vec::new(),
            passed: false,
            game_over: err == GameError::GameAlreadyOver,
            reason: Some(err.reason()),
        }
    }
}

#[wasm_bindgen]
impl WasmGame {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self { inner: Game::new() }
    }

    pub fn reset(&mut self) {
        self.inner.reset();
    }

    pub fn state(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.to_game_state())
    }

    /// `undefined` until the game is over.
    pub fn result(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.to_game_result())
    }

    /// Coordinates and player code arrive as raw JS numbers so that values
    /// outside `u8` are rejected instead of wrapping onto a real square.
    pub fn is_valid_move(&self, row: f64, col: f64, player: f64) -> Result<bool, JsValue> {
        let player = player_from_js(player).map_err(to_js_error)?;
        let (row, col) = coordinates_from_js(row, col).map_err(to_js_error)?;
        self.inner
            .is_valid_move(row, col, player)
            .map_err(to_js_error)
    }

    /// Array of `{ row, col }` in row-major order.
    pub fn valid_moves(&self, player: f64) -> Result<JsValue, JsValue> {
        let player = player_from_js(player).map_err(to_js_error)?;
        to_js(&self.inner.valid_moves(player))
    }

    pub fn make_move(&mut self, row: f64, col: f64) -> Result<JsValue, JsValue> {
        to_js(&self.play(row, col))
    }
}

impl WasmGame {
    fn play(&mut self, row: f64, col: f64) -> MoveReport {
        if self.inner.is_game_over() {
            return MoveReport::rejected(GameError::GameAlreadyOver);
        }
        let played = coordinates_from_js(row, col)
            .and_then(|(row, col)| self.inner.make_move(row, col));
        match played {
            Ok(outcome) => MoveReport {
                success: true,
                flipped: outcome
                    .flipped
                    .iter()
                    .map(|pos| pos.index() as u8)
                    .collect(),
                passed: matches!(outcome.turn, Turn::Passed { .. }),
                game_over: matches!(outcome.turn, Turn::GameOver(_)),
                reason: None,
            },
            Err(err) => MoveReport::rejected(err),
        }
    }
}

impl Default for WasmGame {
    fn default() -> Self {
        Self::new()
    }
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(JsValue::from)
}

/// Exact non-negative integer that fits in a `u8`; NaN, fractions and
/// infinities are rejected.
fn js_u8(value: f64) -> Option<u8> {
    if value.fract() == 0.0 && (0.0..=f64::from(u8::MAX)).contains(&value) {
        Some(value as u8)
    } else {
        None
    }
}

fn coordinates_from_js(row: f64, col: f64) -> Result<(u8, u8), GameError> {
    match (js_u8(row), js_u8(col)) {
        (Some(row), Some(col)) => Ok((row, col)),
        _ => Err(GameError::InvalidCoordinate {
            row: row as i32,
            col: col as i32,
        }),
    }
}

fn player_from_js(code: f64) -> Result<Player, GameError> {
    match js_u8(code) {
        Some(code) => Player::from_code(code),
        None => Err(GameError::InvalidPlayer { code: code as i32 }),
    }
}

fn to_js_error(err: GameError) -> JsValue {
    JsValue::from_str(&err.to_string())
}
