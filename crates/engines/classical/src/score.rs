//! Score scale shared by the evaluator, cache and search.

/// Centipawns from the maximizing side's point of view.
pub type Score = i32;

/// Window sentinel. Never returned as a result at the root.
pub const SCORE_INFINITY: Score = 1_000_000;

/// Score of a position where the maximizing side has delivered mate.
pub const MATE_SCORE: Score = 100_000;

pub const DRAW_SCORE: Score = 0;

// Mates are reported as MATE_SCORE - ply; anything beyond this is a mate.
const MATE_THRESHOLD: Score = MATE_SCORE - 1_000;

#[inline]
pub fn is_mate_score(score: Score) -> bool {
    score.abs() >= MATE_THRESHOLD
}

/// Makes a terminal mate score prefer shorter mates: winning mates lose one
/// point per ply from the search root, losing mates gain one.
#[inline]
pub fn mate_in_plies(score: Score, ply: u8) -> Score {
    if score >= MATE_THRESHOLD {
        score - Score::from(ply)
    } else if score <= -MATE_THRESHOLD {
        score + Score::from(ply)
    } else {
        score
    }
}

/// Re-bases a mate score from root distance to node distance before caching.
#[inline]
pub fn to_cache(score: Score, ply: u8) -> Score {
    if score >= MATE_THRESHOLD {
        score + Score::from(ply)
    } else if score <= -MATE_THRESHOLD {
        score - Score::from(ply)
    } else {
        score
    }
}

/// Inverse of [`to_cache`] for a probe at `ply`.
#[inline]
pub fn from_cache(score: Score, ply: u8) -> Score {
    mate_in_plies(score, ply)
}
