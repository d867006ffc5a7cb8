//! Material plus piece-square evaluation.

use chess_core::{Board, Color, Game, Outcome, Piece, Rules};

use crate::pst::{piece_value, positional_bonus};
use crate::score::{Score, DRAW_SCORE, MATE_SCORE};

/// Static scoring of positions for the search.
///
/// Both methods score from `side`'s perspective: positive favours `side`.
/// Implementations must be pure; the position is only borrowed immutably.
pub trait Evaluator<R: Rules> {
    /// Static score of a non-terminal position, without lookahead.
    fn evaluate(&self, position: &R, side: R::Side) -> Score;

    /// Score of a position where the game is over.
    fn terminal_score(&self, position: &R, side: R::Side) -> Score;
}

/// Material balance augmented with per-piece positional tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct PieceSquareEvaluator;

impl PieceSquareEvaluator {
    pub fn new() -> Self {
        Self
    }
}

impl Evaluator<Game> for PieceSquareEvaluator {
    fn evaluate(&self, game: &Game, side: Color) -> Score {
        evaluate(game.board(), side)
    }

    fn terminal_score(&self, game: &Game, side: Color) -> Score {
        match game.outcome() {
            Some(Outcome::Checkmate { winner }) if winner == side => MATE_SCORE,
            Some(Outcome::Checkmate { .. }) => -MATE_SCORE,
            Some(Outcome::Draw) => DRAW_SCORE,
            None => evaluate(game.board(), side),
        }
    }
}

/// Evaluates the board from `side`'s perspective.
///
/// Returns a score in centipawns:
/// - Positive = good for `side`
/// - Negative = bad for `side`
/// - 0 = equal position
pub fn evaluate(board: &Board, side: Color) -> Score {
    let white = side_total(board, Color::White) - side_total(board, Color::Black);

    match side {
        Color::White => white,
        Color::Black => -white,
    }
}

fn side_total(board: &Board, color: Color) -> Score {
    let mut total = 0;
    for piece in Piece::ALL {
        for square in board.colored_pieces(color, piece) {
            total += piece_value(piece) + positional_bonus(piece, color, square);
        }
    }
    total
}

#[cfg(test)]
#[path = "eval_tests.rs"]
mod eval_tests;
