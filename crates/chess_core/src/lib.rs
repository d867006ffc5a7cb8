pub mod error;
pub mod game;
pub mod perft;
pub mod rules;
pub mod uci;

// Re-export the rules-engine collaborator and notation helpers
pub use cozy_chess::{Board, Color, Move, Piece, Square};
pub use error::*;
pub use game::*;
pub use perft::perft;
pub use rules::*;
pub use uci::*;

// =============================================================================
// Engine trait: implemented by every move-choosing engine
// =============================================================================

/// Result of one move decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult<M = Move> {
    /// The move committed to the game (None if no move was available)
    pub best_move: Option<M>,
    /// Evaluation in centipawns from the moving side's perspective
    pub score: i32,
    /// Deepest iteration that completed
    pub depth: u8,
    /// Number of nodes searched across all iterations
    pub nodes: u64,
    /// Number of nodes answered from the transposition cache
    pub cache_hits: u64,
}

impl<M> SearchResult<M> {
    /// Result for a position where the side to move cannot move.
    pub fn no_move(score: i32) -> Self {
        Self {
            best_move: None,
            score,
            depth: 0,
            nodes: 0,
            cache_hits: 0,
        }
    }
}

/// Trait that all chess engines must implement.
///
/// An engine chooses a move for the side to move in `game` and commits it to
/// the game before returning.
pub trait Engine {
    fn choose_move(&mut self, game: &mut Game) -> Result<SearchResult, SearchError>;

    /// Returns the engine's name for UCI identification
    fn name(&self) -> &str;

    /// Returns the engine's author for UCI identification
    fn author(&self) -> &str {
        "ML-chess"
    }

    /// Reset internal state for a new game (clear hash tables, history, etc.)
    fn new_game(&mut self) {}

    /// Optional: Set a UCI option. Returns true if the option was recognized.
    fn set_option(&mut self, _name: &str, _value: &str) -> bool {
        false
    }
}
