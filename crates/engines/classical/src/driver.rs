//! Iterative-deepening move selection for one engine turn.

use chess_core::{Rules, SearchError, SearchResult};
use tracing::{debug, info, trace, warn};

use crate::cache::TranspositionCache;
use crate::eval::Evaluator;
use crate::score::Score;
use crate::search::Search;

/// Chooses a move for the side to move in `rules` and commits it.
///
/// Searches depths `1..=max_depth`, where depth counts plies including the
/// root move. Each iteration scores every root move with a full window and is
/// only adopted once it has finished, so a deeper iteration always replaces a
/// shallower answer. The previous iteration's best move is tried first; among
/// equal scores the first move searched wins.
///
/// Returns a result without a move when the root is terminal or has no legal
/// moves. Fails if the position after searching differs from the one searched.
pub fn choose_move<R, E>(
    rules: &mut R,
    evaluator: &E,
    cache: &mut TranspositionCache<R::Key>,
    max_depth: u8,
) -> Result<SearchResult<R::Move>, SearchError>
where
    R: Rules,
    E: Evaluator<R>,
{
    let side = rules.side_to_move();
    if rules.is_terminal() {
        debug!("root position is terminal, no move available");
        return Ok(SearchResult::no_move(evaluator.terminal_score(rules, side)));
    }

    let mut root_moves = rules.legal_moves();
    if root_moves.is_empty() {
        debug!("no legal moves at root");
        return Ok(SearchResult::no_move(evaluator.evaluate(rules, side)));
    }

    let root_key = rules.position_key();
    cache.new_generation();
    let mut search = Search::<R, E>::new(evaluator, cache, side);

    let mut best: Option<(R::Move, Score)> = None;
    let mut completed = 0;

    for depth in 1..=max_depth.max(1) {
        if let Some((previous, _)) = best {
            if let Some(idx) = root_moves.iter().position(|&mv| mv == previous) {
                root_moves[..=idx].rotate_right(1);
            }
        }

        let mut iteration: Option<(R::Move, Score)> = None;
        for &mv in &root_moves {
            let score = search.score_root_move(rules, mv, depth - 1);
            trace!(depth, ?mv, score, "root move scored");

            let improves = match iteration {
                Some((_, best_score)) => score > best_score,
                None => true,
            };
            if improves {
                iteration = Some((mv, score));
            }
        }

        let after = rules.position_key();
        if after != root_key {
            warn!(?root_key, ?after, depth, "position changed during search");
            return Err(SearchError::InconsistentState {
                before: format!("{root_key:?}"),
                after: format!("{after:?}"),
            });
        }

        best = iteration;
        completed = depth;
        let stats = search.stats();
        debug!(
            depth,
            score = ?best.map(|(_, score)| score),
            nodes = stats.nodes,
            cache_hits = stats.cache_hits,
            cutoffs = stats.cutoffs,
            "iteration complete"
        );
    }

    let stats = search.stats();
    let Some((mv, score)) = best else {
        return Ok(SearchResult::no_move(evaluator.evaluate(rules, side)));
    };

    rules.apply_move(mv);
    info!(?mv, score, depth = completed, nodes = stats.nodes, "move committed");

    Ok(SearchResult {
        best_move: Some(mv),
        score,
        depth: completed,
        nodes: stats.nodes,
        cache_hits: stats.cache_hits,
    })
}

#[cfg(test)]
#[path = "driver_tests.rs"]
mod driver_tests;
