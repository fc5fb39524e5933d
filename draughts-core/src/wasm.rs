//! WASM bindings for draughts-core
//!
//! Provides a JavaScript-friendly API for the game logic. The page owns the
//! pacing: it calls `machineStep` from a timer while it is the machine's
//! turn, so the engine itself stays free of timing concerns.

use rand::rngs::StdRng;
use rand::SeedableRng;
use wasm_bindgen::prelude::*;

use crate::{Game, MoveCandidate, Player, Pos};

/// WASM-friendly wrapper around Game
#[wasm_bindgen]
pub struct WasmGame {
    inner: Game,
    rng: StdRng,
}

#[wasm_bindgen]
impl WasmGame {
    /// Create a new game. The seed drives the machine's move choice; pass
    /// e.g. `Date.now()` for varied play or a fixed value for replays.
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u64) -> WasmGame {
        WasmGame {
            inner: Game::new(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Restart from the standard starting layout.
    pub fn reset(&mut self) {
        self.inner.restart();
    }

    /// Current player (1 = human, 2 = machine)
    #[wasm_bindgen(js_name = currentPlayer)]
    pub fn current_player(&self) -> u8 {
        self.inner.current_player() as u8
    }

    /// Check if the game is over
    #[wasm_bindgen(js_name = isGameOver)]
    pub fn is_game_over(&self) -> bool {
        self.inner.is_over()
    }

    /// Winner. Returns 0 (none), 1 (human), or 2 (machine)
    pub fn winner(&self) -> u8 {
        match self.inner.winner() {
            None => 0,
            Some(Player::Human) => 1,
            Some(Player::Machine) => 2,
        }
    }

    /// True while the side to move may only play capturing moves
    #[wasm_bindgen(js_name = forcedCapture)]
    pub fn forced_capture(&self) -> bool {
        self.inner.forced_capture()
    }

    /// True while a chain capture is pending for the piece that just jumped
    #[wasm_bindgen(js_name = chainPending)]
    pub fn chain_pending(&self) -> bool {
        self.inner.chain_pending()
    }

    /// Piece at a cell as [owner, isKing] (owner 1|2, isKing 0|1).
    /// Returns an empty array for empty or off-board cells.
    #[wasm_bindgen(js_name = pieceAt)]
    pub fn piece_at(&self, row: u8, col: u8) -> Vec<u8> {
        let Some(pos) = Pos::checked(row as i8, col as i8) else {
            return vec![];
        };
        match self.inner.board().piece(pos) {
            Some(piece) => vec![piece.owner as u8, piece.king as u8],
            None => vec![],
        }
    }

    /// Current selection as [row, col], or an empty array
    pub fn selection(&self) -> Vec<u8> {
        match self.inner.selection() {
            Some(pos) => vec![pos.row(), pos.col()],
            None => vec![],
        }
    }

    /// Offered candidates as a JSON array.
    /// Each candidate is { to: [row, col], captured: [row, col] | null }
    pub fn candidates(&self) -> JsValue {
        let moves: Vec<JsCandidate> = self
            .inner
            .candidates()
            .iter()
            .copied()
            .map(JsCandidate::from)
            .collect();
        serde_wasm_bindgen::to_value(&moves).unwrap()
    }

    /// Handle a cell click on the human's turn: selects an own piece, or
    /// moves the selected piece if the cell is an offered destination.
    /// Returns true if the click had any effect.
    #[wasm_bindgen(js_name = handleClick)]
    pub fn handle_click(&mut self, row: u8, col: u8) -> bool {
        let Some(pos) = Pos::checked(row as i8, col as i8) else {
            return false;
        };
        if self.inner.select(pos) {
            return true;
        }
        self.inner.attempt_move(pos)
    }

    /// Play one leg of the machine's turn. Returns true if a move was
    /// applied; call again while `chainPending()` to finish a multi-jump.
    #[wasm_bindgen(js_name = machineStep)]
    pub fn machine_step(&mut self) -> bool {
        self.inner.machine_step(&mut self.rng).is_some()
    }
}

/// Serializable candidate for JavaScript
#[derive(serde::Serialize)]
struct JsCandidate {
    to: [u8; 2],
    captured: Option<[u8; 2]>,
}

impl From<MoveCandidate> for JsCandidate {
    fn from(candidate: MoveCandidate) -> Self {
        JsCandidate {
            to: [candidate.to.row(), candidate.to.col()],
            captured: candidate.captured.map(|pos| [pos.row(), pos.col()]),
        }
    }
}
