use thiserror::Error;

/// Errors raised when external input does not describe a legal game.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("invalid FEN `{fen}`: {reason}")]
    InvalidFen { fen: String, reason: String },

    #[error("illegal move `{0}` in current position")]
    IllegalMove(String),
}

/// Errors that abort a search call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// The position after searching differs from the one searched, meaning an
    /// apply was not matched by its undo. The search result is discarded.
    #[error("game state changed during search: started at {before}, ended at {after}")]
    InconsistentState { before: String, after: String },
}
