//! Chess rules engine backed by `cozy-chess`.
//!
//! `cozy-chess` boards are cheap to copy, so undo is a stack of prior boards
//! rather than incremental unmake bookkeeping.

use std::fmt;

use cozy_chess::{Board, Color, GameStatus, Move, Piece, Square};
use tracing::debug;

use crate::error::GameError;
use crate::rules::Rules;

/// Canonical identity of a chess position, including the state that decides
/// whether a line ends in a draw.
///
/// Holds the first four FEN fields (placement, side to move, castling rights,
/// en-passant square), the halfmove clock and the boards seen since the last
/// irreversible move. Two games share a key only when every continuation ends
/// the same way; the fullmove number is left out.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PositionKey {
    fen_fields: String,
    halfmove_clock: u8,
    // Sorted hashes of earlier boards that can still repeat.
    reversible_history: Vec<u64>,
}

impl PositionKey {
    /// Key of a board with no earlier positions.
    pub fn of(board: &Board) -> Self {
        Self::with_history(board, Vec::new())
    }

    fn with_history(board: &Board, mut reversible_history: Vec<u64>) -> Self {
        let fen = board.to_string();
        let fields: Vec<&str> = fen.split_whitespace().take(4).collect();
        reversible_history.sort_unstable();
        Self {
            fen_fields: fields.join(" "),
            halfmove_clock: board.halfmove_clock(),
            reversible_history,
        }
    }

    /// Placement, side to move, castling rights and en-passant square.
    pub fn fen_fields(&self) -> &str {
        &self.fen_fields
    }

    pub fn halfmove_clock(&self) -> u8 {
        self.halfmove_clock
    }
}

impl fmt::Display for PositionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.fen_fields, self.halfmove_clock)
    }
}

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Checkmate { winner: Color },
    /// Stalemate, the fifty-move rule, threefold repetition or insufficient
    /// material.
    Draw,
}

/// The live game state shared between the driver and the search.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    history: Vec<(Board, Move)>,
}

impl Game {
    pub fn startpos() -> Self {
        Self::from_board(Board::default())
    }

    pub fn from_board(board: Board) -> Self {
        Self {
            board,
            history: Vec::new(),
        }
    }

    pub fn from_fen(fen: &str) -> Result<Self, GameError> {
        Board::from_fen(fen.trim(), false)
            .map(Self::from_board)
            .map_err(|err| GameError::InvalidFen {
                fen: fen.to_string(),
                reason: format!("{err:?}"),
            })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn fen(&self) -> String {
        self.board.to_string()
    }

    /// Number of moves applied since the game was created.
    pub fn ply_count(&self) -> usize {
        self.history.len()
    }

    /// Applies a move coming from outside the engine, rejecting illegal ones.
    pub fn try_apply(&mut self, mv: Move) -> Result<(), GameError> {
        if !self.board.is_legal(mv) {
            debug!(%mv, fen = %self.board, "rejected illegal move");
            return Err(GameError::IllegalMove(mv.to_string()));
        }
        self.apply_move(mv);
        Ok(())
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.board.status() {
            GameStatus::Won => Some(Outcome::Checkmate {
                winner: !self.board.side_to_move(),
            }),
            GameStatus::Drawn => Some(Outcome::Draw),
            GameStatus::Ongoing
                if self.repetition_count() >= 3 || is_insufficient_material(&self.board) =>
            {
                Some(Outcome::Draw)
            }
            GameStatus::Ongoing => None,
        }
    }

    /// How many times the current position has occurred, this one included.
    pub fn repetition_count(&self) -> usize {
        let current = self.board.hash();
        1 + self
            .reversible_history()
            .iter()
            .filter(|(board, _)| board.hash() == current)
            .count()
    }

    // Boards since the last pawn move or capture; earlier ones cannot recur.
    fn reversible_history(&self) -> &[(Board, Move)] {
        let window = usize::from(self.board.halfmove_clock()).min(self.history.len());
        &self.history[self.history.len() - window..]
    }
}

/// True when neither side can deliver mate: bare kings, a single minor piece,
/// or only bishops that all stand on squares of one colour.
pub fn is_insufficient_material(board: &Board) -> bool {
    let heavy = [Piece::Pawn, Piece::Rook, Piece::Queen]
        .into_iter()
        .any(|piece| !board.pieces(piece).is_empty());
    if heavy {
        return false;
    }

    let knights = board.pieces(Piece::Knight).len();
    let bishops: Vec<Square> = board.pieces(Piece::Bishop).into_iter().collect();
    match (knights, bishops.len()) {
        (0, 0) | (1, 0) | (0, 1) => true,
        (0, _) => {
            let shade = |sq: &Square| (sq.file() as usize + sq.rank() as usize) % 2;
            bishops.iter().all(|sq| shade(sq) == shade(&bishops[0]))
        }
        _ => false,
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::startpos()
    }
}

impl Rules for Game {
    type Move = Move;
    type Side = Color;
    type Key = PositionKey;

    fn side_to_move(&self) -> Color {
        self.board.side_to_move()
    }

    fn legal_moves(&self) -> Vec<Move> {
        let mut moves = Vec::with_capacity(64);
        self.board.generate_moves(|piece_moves| {
            moves.extend(piece_moves);
            false
        });
        moves
    }

    fn apply_move(&mut self, mv: Move) {
        debug_assert!(self.board.is_legal(mv), "illegal move {mv} applied");
        let previous = self.board.clone();
        self.board.play_unchecked(mv);
        self.history.push((previous, mv));
    }

    fn undo_move(&mut self) -> Option<Move> {
        let (previous, mv) = self.history.pop()?;
        self.board = previous;
        Some(mv)
    }

    fn is_terminal(&self) -> bool {
        self.outcome().is_some()
    }

    fn position_key(&self) -> PositionKey {
        let earlier = self
            .reversible_history()
            .iter()
            .map(|(board, _)| board.hash())
            .collect();
        PositionKey::with_history(&self.board, earlier)
    }
}

#[cfg(test)]
#[path = "game_tests.rs"]
mod game_tests;
