//! Checkers (draughts) rules engine: human vs. random machine.
//!
//! # Board Layout
//!
//! ```text
//! Rows 0-7 top to bottom, columns 0-7 left to right.
//! Only dark squares, where (row + col) is odd, are playable.
//!
//!   Starting position:
//!     row 0-2: machine men (moving toward row 7)
//!     row 5-7: human men   (moving toward row 0)
//! ```
//!
//! # Rules
//!
//! - Men step one square diagonally forward; kings step one square along any
//!   of the four diagonals.
//! - A capture jumps exactly one adjacent opponent piece, landing on the
//!   empty square directly beyond it. No long-range king jumps.
//! - Captures are mandatory: if the side to move has any capture, only
//!   capturing moves may be played this turn.
//! - After a capture, the same piece must keep jumping while further
//!   captures exist from its new square (chain capture).
//! - A man reaching the far row is crowned immediately, before the chain
//!   check, so a crowning jump may continue with king directions.
//!
//! The [`Game`] struct is the turn state machine; [`Board`] holds the pure
//! position queries. All state lives in these values, never in globals, so a
//! position can be snapshotted or rebuilt freely.

#[cfg(feature = "wasm")]
pub mod wasm;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Player identifier.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Player {
    Human = 1,
    Machine = 2,
}

impl Player {
    /// Get the opponent player.
    #[inline]
    pub fn opponent(self) -> Player {
        match self {
            Player::Human => Player::Machine,
            Player::Machine => Player::Human,
        }
    }

    /// Convert from u8 (1 or 2) to Player.
    #[inline]
    pub fn from_bits(bits: u8) -> Option<Player> {
        match bits {
            1 => Some(Player::Human),
            2 => Some(Player::Machine),
            _ => None,
        }
    }

    /// Row direction this player's men move in (-1 for Human, +1 for Machine).
    #[inline]
    pub fn forward(self) -> i8 {
        match self {
            Player::Human => -1,
            Player::Machine => 1,
        }
    }

    /// The far row where this player's men are crowned.
    #[inline]
    pub fn crown_row(self) -> u8 {
        match self {
            Player::Human => 0,
            Player::Machine => 7,
        }
    }
}

/// A piece on the board.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub owner: Player,
    pub king: bool,
}

impl Piece {
    /// Create a non-promoted piece.
    #[inline]
    pub fn man(owner: Player) -> Piece {
        Piece { owner, king: false }
    }

    /// Create a promoted piece.
    #[inline]
    pub fn king(owner: Player) -> Piece {
        Piece { owner, king: true }
    }
}

/// Position on the 8x8 board (0-63, row-major).
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub struct Pos(pub u8);

impl Pos {
    /// Create a position from row and column (0-7 each).
    #[inline]
    pub fn from_row_col(row: u8, col: u8) -> Pos {
        debug_assert!(row < 8 && col < 8);
        Pos(row * 8 + col)
    }

    /// Create a position from signed coordinates, rejecting anything
    /// off-board. Used for step arithmetic during move generation.
    #[inline]
    pub fn checked(row: i8, col: i8) -> Option<Pos> {
        if (0..8).contains(&row) && (0..8).contains(&col) {
            Some(Pos(row as u8 * 8 + col as u8))
        } else {
            None
        }
    }

    /// Get the row (0-7).
    #[inline]
    pub fn row(self) -> u8 {
        self.0 / 8
    }

    /// Get the column (0-7).
    #[inline]
    pub fn col(self) -> u8 {
        self.0 % 8
    }

    /// Check if this is a valid position (0-63).
    #[inline]
    pub fn is_valid(self) -> bool {
        self.0 < 64
    }

    /// Check if this is a dark (playable) square.
    #[inline]
    pub fn is_dark(self) -> bool {
        (self.row() + self.col()) % 2 == 1
    }

    /// The position one diagonal step away, or None if off-board.
    #[inline]
    fn step(self, dr: i8, dc: i8) -> Option<Pos> {
        Pos::checked(self.row() as i8 + dr, self.col() as i8 + dc)
    }

    /// Iterate over all 64 positions.
    pub fn all() -> impl Iterator<Item = Pos> {
        (0..64).map(Pos)
    }

    /// Iterate over the 32 playable dark squares.
    pub fn playable() -> impl Iterator<Item = Pos> {
        Pos::all().filter(|p| p.is_dark())
    }
}

/// A single-step destination for a piece, optionally recording the opponent
/// square jumped over.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct MoveCandidate {
    pub to: Pos,
    pub captured: Option<Pos>,
}

impl MoveCandidate {
    /// Check if this candidate is a capture.
    #[inline]
    pub fn is_capture(self) -> bool {
        self.captured.is_some()
    }
}

/// The four diagonal king directions.
const KING_DIRS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
/// Forward diagonals for a human man (toward row 0).
const HUMAN_DIRS: [(i8, i8); 2] = [(-1, -1), (-1, 1)];
/// Forward diagonals for a machine man (toward row 7).
const MACHINE_DIRS: [(i8, i8); 2] = [(1, -1), (1, 1)];

/// Direction set for a piece: men move forward only, kings every diagonal.
#[inline]
fn directions(piece: Piece) -> &'static [(i8, i8)] {
    if piece.king {
        &KING_DIRS
    } else {
        match piece.owner {
            Player::Human => &HUMAN_DIRS,
            Player::Machine => &MACHINE_DIRS,
        }
    }
}

/// The 8x8 board. Light squares are always empty.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
pub struct Board {
    #[serde(serialize_with = "serialize_squares")]
    squares: [Option<Piece>; 64],
}

// serde's derive only covers arrays up to length 32; emit the 64 squares
// as a sequence.
fn serialize_squares<S>(squares: &[Option<Piece>; 64], serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_seq(squares.iter())
}

impl Board {
    /// Create an empty board.
    #[inline]
    pub fn new() -> Board {
        Board { squares: [None; 64] }
    }

    /// Create a board with the standard starting layout: machine men on the
    /// dark squares of rows 0-2, human men on rows 5-7.
    pub fn starting() -> Board {
        let mut board = Board::new();
        for pos in Pos::playable() {
            if pos.row() < 3 {
                board.set(pos, Some(Piece::man(Player::Machine)));
            } else if pos.row() > 4 {
                board.set(pos, Some(Piece::man(Player::Human)));
            }
        }
        board
    }

    /// Get the piece at a position. Out-of-range positions read as empty.
    #[inline]
    pub fn piece(&self, pos: Pos) -> Option<Piece> {
        if pos.is_valid() {
            self.squares[pos.0 as usize]
        } else {
            None
        }
    }

    /// Set or clear a square.
    /// Does NOT validate - caller must keep light squares empty.
    #[inline]
    pub fn set(&mut self, pos: Pos, piece: Option<Piece>) {
        debug_assert!(pos.is_valid());
        self.squares[pos.0 as usize] = piece;
    }

    /// Count the pieces owned by a player.
    pub fn count_pieces(&self, player: Player) -> usize {
        self.squares
            .iter()
            .filter(|sq| sq.is_some_and(|p| p.owner == player))
            .count()
    }

    /// Iterate over the positions of a player's pieces.
    pub fn pieces(&self, player: Player) -> impl Iterator<Item = Pos> + '_ {
        Pos::all().filter(move |&pos| self.piece(pos).is_some_and(|p| p.owner == player))
    }

    // ========== Move Generation ==========

    /// Generate the non-capturing move candidates for the piece at `pos`.
    /// Returns an empty list if the square is empty or off-board.
    pub fn moves_from(&self, pos: Pos) -> Vec<MoveCandidate> {
        let Some(piece) = self.piece(pos) else {
            return Vec::new();
        };

        let mut moves = Vec::new();
        for &(dr, dc) in directions(piece) {
            if let Some(to) = pos.step(dr, dc) {
                if self.piece(to).is_none() {
                    moves.push(MoveCandidate { to, captured: None });
                }
            }
        }
        moves
    }

    /// Generate the capture candidates for the piece at `pos`: single jumps
    /// over an adjacent opponent piece into the empty square beyond it.
    /// Each candidate records the jumped square for removal.
    pub fn captures_from(&self, pos: Pos) -> Vec<MoveCandidate> {
        let Some(piece) = self.piece(pos) else {
            return Vec::new();
        };

        let mut captures = Vec::new();
        for &(dr, dc) in directions(piece) {
            let Some(over) = pos.step(dr, dc) else {
                continue;
            };
            let Some(to) = pos.step(2 * dr, 2 * dc) else {
                continue;
            };
            match self.piece(over) {
                Some(p) if p.owner != piece.owner && self.piece(to).is_none() => {
                    captures.push(MoveCandidate { to, captured: Some(over) });
                }
                _ => {}
            }
        }
        captures
    }

    /// Check if any of the player's pieces has a legal capture.
    pub fn has_capture(&self, player: Player) -> bool {
        self.pieces(player)
            .any(|pos| !self.captures_from(pos).is_empty())
    }

    /// Check if the player has any legal action at all (move or capture).
    pub fn has_action(&self, player: Player) -> bool {
        self.pieces(player)
            .any(|pos| !self.moves_from(pos).is_empty() || !self.captures_from(pos).is_empty())
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Game outcome.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum Status {
    Ongoing,
    Won(Player),
}

/// The turn state machine.
///
/// Holds the board plus everything that changes between clicks: whose turn
/// it is, the selected piece and its offered candidates, the forced-capture
/// and chain-capture flags, and the outcome.
///
/// All precondition violations (wrong turn, opponent piece, non-offered
/// destination, input after game over, off-board coordinates) are rejected
/// as no-ops returning `false`; there is no error channel.
#[derive(Clone, Debug, Serialize)]
pub struct Game {
    board: Board,
    current: Player,
    selection: Option<Pos>,
    candidates: Vec<MoveCandidate>,
    forced_capture: bool,
    chain_capture: bool,
    status: Status,
}

impl Game {
    /// Start a new game from the standard layout, human to move.
    pub fn new() -> Game {
        Game::from_position(Board::starting(), Player::Human)
    }

    /// Start a game from an arbitrary position with the given side to move.
    /// Computes the forced-capture flag for the side to move.
    pub fn from_position(board: Board, to_move: Player) -> Game {
        let forced_capture = board.has_capture(to_move);
        Game {
            board,
            current: to_move,
            selection: None,
            candidates: Vec::new(),
            forced_capture,
            chain_capture: false,
            status: Status::Ongoing,
        }
    }

    /// Discard all state and rebuild the starting position.
    pub fn restart(&mut self) {
        *self = Game::new();
    }

    // ========== Queries ==========

    /// The current board snapshot.
    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The side to move.
    #[inline]
    pub fn current_player(&self) -> Player {
        self.current
    }

    /// The currently selected piece, if any.
    #[inline]
    pub fn selection(&self) -> Option<Pos> {
        self.selection
    }

    /// The offered destinations for the current selection.
    #[inline]
    pub fn candidates(&self) -> &[MoveCandidate] {
        &self.candidates
    }

    /// True iff the side to move has a capture somewhere and may therefore
    /// only play capturing moves this turn.
    #[inline]
    pub fn forced_capture(&self) -> bool {
        self.forced_capture
    }

    /// True iff the piece that just captured must keep jumping.
    #[inline]
    pub fn chain_pending(&self) -> bool {
        self.chain_capture
    }

    /// The game outcome.
    #[inline]
    pub fn status(&self) -> Status {
        self.status
    }

    /// The winner, if the game is over.
    #[inline]
    pub fn winner(&self) -> Option<Player> {
        match self.status {
            Status::Ongoing => None,
            Status::Won(player) => Some(player),
        }
    }

    /// Check if the game has ended.
    #[inline]
    pub fn is_over(&self) -> bool {
        self.status != Status::Ongoing
    }

    // ========== Commands ==========

    /// Select a human piece, making its candidates the offered destinations.
    ///
    /// Valid only on the human's turn, on a square holding a human piece,
    /// and - under forced capture - only on a piece that has a capture.
    /// While a chain capture is pending the selection is pinned to the
    /// jumping piece; clicking it again is accepted but changes nothing.
    /// Returns `false` (state unchanged) on any precondition violation.
    pub fn select(&mut self, pos: Pos) -> bool {
        if self.is_over() || self.current != Player::Human {
            return false;
        }
        if self.chain_capture {
            return self.selection == Some(pos);
        }
        if !self.board.piece(pos).is_some_and(|p| p.owner == Player::Human) {
            return false;
        }

        if self.forced_capture {
            let captures = self.board.captures_from(pos);
            if captures.is_empty() {
                return false;
            }
            self.selection = Some(pos);
            self.candidates = captures;
        } else {
            // No capture anywhere for this side, so plain steps are offered.
            self.selection = Some(pos);
            self.candidates = self.board.moves_from(pos);
        }
        true
    }

    /// Move the selected piece to `to`, which must be among the offered
    /// candidates. Returns `false` (state unchanged) otherwise.
    pub fn attempt_move(&mut self, to: Pos) -> bool {
        if self.is_over() || self.current != Player::Human {
            return false;
        }
        let Some(from) = self.selection else {
            return false;
        };
        let Some(candidate) = self.candidates.iter().copied().find(|c| c.to == to) else {
            return false;
        };

        self.apply(from, candidate);
        true
    }

    /// Apply one candidate for the piece at `from`. Core of the state
    /// machine; `candidate` must come from the offered set.
    fn apply(&mut self, from: Pos, candidate: MoveCandidate) {
        let Some(mut piece) = self.board.piece(from) else {
            return;
        };

        // Relocate, then crown at the far row. Promotion happens before the
        // chain check, so a crowning jump continues with king directions.
        self.board.set(from, None);
        if !piece.king && candidate.to.row() == piece.owner.crown_row() {
            piece.king = true;
        }
        self.board.set(candidate.to, Some(piece));

        if let Some(captured) = candidate.captured {
            self.board.set(captured, None);

            let further = self.board.captures_from(candidate.to);
            if !further.is_empty() {
                // Same piece must keep jumping; the turn does not pass.
                self.chain_capture = true;
                self.selection = Some(candidate.to);
                self.candidates = further;
                return;
            }
        }

        // Turn passes to the opponent.
        self.current = self.current.opponent();
        self.selection = None;
        self.candidates.clear();
        self.chain_capture = false;
        self.forced_capture = self.board.has_capture(self.current);

        // Termination: the new mover loses with no pieces, and also with
        // pieces but no legal action (documented stalemate policy).
        if self.board.count_pieces(self.current) == 0 || !self.board.has_action(self.current) {
            self.status = Status::Won(self.current.opponent());
        }
    }

    // ========== Machine Move Selection ==========

    /// Play one leg of the machine's turn, chosen uniformly at random from
    /// its legal candidates. Returns the applied move, or `None` if it is
    /// not the machine's turn or the game is over.
    ///
    /// The caller drives pacing: while a chain capture is pending after a
    /// leg, call again (after any presentation delay) to continue the chain.
    pub fn machine_step(&mut self, rng: &mut impl Rng) -> Option<(Pos, MoveCandidate)> {
        if self.is_over() || self.current != Player::Machine {
            return None;
        }

        if self.chain_capture {
            let from = self.selection?;
            if self.candidates.is_empty() {
                return None;
            }
            let candidate = self.candidates[rng.random_range(0..self.candidates.len())];
            self.apply(from, candidate);
            return Some((from, candidate));
        }

        let mut options: Vec<(Pos, MoveCandidate)> = Vec::new();
        for pos in self.board.pieces(Player::Machine) {
            for candidate in self.board.captures_from(pos) {
                options.push((pos, candidate));
            }
            if !self.forced_capture {
                for candidate in self.board.moves_from(pos) {
                    options.push((pos, candidate));
                }
            }
        }

        if options.is_empty() {
            // Unreachable given the turn-switch termination check; kept as a
            // guard so a hand-built position still terminates cleanly.
            self.status = Status::Won(Player::Human);
            return None;
        }

        // Capture priority, reapplied on top of the forced-capture filter.
        if options.iter().any(|(_, c)| c.is_capture()) {
            options.retain(|(_, c)| c.is_capture());
        }

        let (from, candidate) = options[rng.random_range(0..options.len())];
        self.apply(from, candidate);
        Some((from, candidate))
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
