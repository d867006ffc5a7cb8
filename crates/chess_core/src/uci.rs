//! UCI long algebraic notation.
//!
//! `cozy-chess` encodes castling as "king captures own rook" (`e1h1`); UCI
//! expects the king's two-square move (`e1g1`). Conversion happens here.

use cozy_chess::{Board, File, Move, Piece, Square};

use crate::error::GameError;
use crate::game::Game;
use crate::rules::Rules;

pub fn move_to_uci(board: &Board, mv: Move) -> String {
    let to = if is_castle(board, mv) {
        let file = if (mv.to.file() as usize) > (mv.from.file() as usize) {
            File::G
        } else {
            File::C
        };
        Square::new(file, mv.from.rank())
    } else {
        mv.to
    };

    let mut s = format!("{}{}", mv.from, to);
    if let Some(piece) = mv.promotion {
        s.push(promotion_char(piece));
    }
    s
}

/// Finds the legal move written as `txt`. Castling, promotion and en-passant
/// are resolved by matching against the generated moves.
pub fn parse_uci_move(board: &Board, txt: &str) -> Option<Move> {
    let wanted = txt.trim().to_ascii_lowercase();
    if wanted.len() < 4 {
        return None;
    }

    let mut found = None;
    board.generate_moves(|piece_moves| {
        for mv in piece_moves {
            if move_to_uci(board, mv) == wanted {
                found = Some(mv);
                return true;
            }
        }
        false
    });
    found
}

/// Handles the arguments of a UCI `position` command:
/// `startpos [moves ...]` or `fen <fields> [moves ...]`.
pub fn set_position_from_uci(game: &mut Game, args: &[&str]) -> Result<(), GameError> {
    let moves_at = args.iter().position(|&arg| arg == "moves");
    let (setup, moves) = match moves_at {
        Some(idx) => (&args[..idx], &args[idx + 1..]),
        None => (args, &[][..]),
    };

    *game = match setup.split_first() {
        None | Some((&"startpos", _)) => Game::startpos(),
        Some((&"fen", fields)) => Game::from_fen(&fields.join(" "))?,
        Some(_) => {
            return Err(GameError::InvalidFen {
                fen: setup.join(" "),
                reason: "expected `startpos` or `fen`".to_string(),
            });
        }
    };

    for txt in moves {
        let mv = parse_uci_move(game.board(), txt)
            .ok_or_else(|| GameError::IllegalMove((*txt).to_string()))?;
        game.apply_move(mv);
    }
    Ok(())
}

fn is_castle(board: &Board, mv: Move) -> bool {
    board.piece_on(mv.from) == Some(Piece::King)
        && board.color_on(mv.to) == Some(board.side_to_move())
}

fn promotion_char(piece: Piece) -> char {
    match piece {
        Piece::Queen => 'q',
        Piece::Rook => 'r',
        Piece::Bishop => 'b',
        Piece::Knight => 'n',
        Piece::Pawn | Piece::King => 'q',
    }
}

#[cfg(test)]
#[path = "uci_tests.rs"]
mod uci_tests;
