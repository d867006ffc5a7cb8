//! Depth-limited minimax with alpha-beta pruning.
//!
//! The search explores the caller's live game in place. Every move it plays is
//! wrapped in a [`MoveGuard`], so the position is restored on every exit path,
//! pruning breaks included.

use chess_core::{MoveGuard, Rules};

use crate::cache::{Bound, CacheKey, TranspositionCache};
use crate::eval::Evaluator;
use crate::score::{from_cache, mate_in_plies, to_cache, Score, SCORE_INFINITY};

/// Counters collected while searching.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes entered, including those answered by the cache
    pub nodes: u64,
    /// Nodes answered by the transposition cache
    pub cache_hits: u64,
    /// Move loops abandoned by a beta or alpha cutoff
    pub cutoffs: u64,
}

/// Search context for one move decision.
///
/// Scores are always from the perspective of `side`, the maximizing player.
pub struct Search<'a, R: Rules, E> {
    evaluator: &'a E,
    cache: &'a mut TranspositionCache<R::Key>,
    side: R::Side,
    stats: SearchStats,
}

impl<'a, R: Rules, E: Evaluator<R>> Search<'a, R, E> {
    pub fn new(evaluator: &'a E, cache: &'a mut TranspositionCache<R::Key>, side: R::Side) -> Self {
        Self {
            evaluator,
            cache,
            side,
            stats: SearchStats::default(),
        }
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Scores the current position of `rules` searched `depth` plies deep
    /// within the `(alpha, beta)` window.
    ///
    /// With a full window the result equals [`Search::minimax`] at the same
    /// depth. Mate distances are counted from the position passed in.
    pub fn search(
        &mut self,
        rules: &mut R,
        depth: u8,
        alpha: Score,
        beta: Score,
        maximizing: bool,
    ) -> Score {
        self.alpha_beta(rules, depth, 0, alpha, beta, maximizing)
    }

    /// Plays `mv` at the root and searches the reply `depth` plies deep with a
    /// full window. Mate distances include the root move.
    pub fn score_root_move(&mut self, rules: &mut R, mv: R::Move, depth: u8) -> Score {
        let mut child = MoveGuard::new(rules, mv);
        self.alpha_beta(&mut *child, depth, 1, -SCORE_INFINITY, SCORE_INFINITY, false)
    }

    /// Plain minimax without pruning or caching. Visits every node up to
    /// `depth`; used to verify [`Search::search`].
    pub fn minimax(&mut self, rules: &mut R, depth: u8, maximizing: bool) -> Score {
        self.full_width(rules, depth, 0, maximizing)
    }

    fn alpha_beta(
        &mut self,
        rules: &mut R,
        depth: u8,
        ply: u8,
        mut alpha: Score,
        mut beta: Score,
        maximizing: bool,
    ) -> Score {
        self.stats.nodes += 1;

        let key = CacheKey::new(rules.position_key(), depth, maximizing);
        if let Some(cached) = self
            .cache
            .probe(&key, to_cache(alpha, ply), to_cache(beta, ply))
        {
            self.stats.cache_hits += 1;
            return from_cache(cached, ply);
        }

        let terminal = rules.is_terminal();
        if depth == 0 || terminal {
            let score = self.leaf(rules, terminal, ply);
            self.cache.store(key, to_cache(score, ply), Bound::Exact);
            return score;
        }

        let moves = rules.legal_moves();
        if moves.is_empty() {
            // No moves but not flagged terminal: score the position as it stands.
            let score = self.leaf(rules, false, ply);
            self.cache.store(key, to_cache(score, ply), Bound::Exact);
            return score;
        }

        let (alpha_orig, beta_orig) = (alpha, beta);
        let mut best = if maximizing {
            -SCORE_INFINITY
        } else {
            SCORE_INFINITY
        };

        for mv in moves {
            let score = {
                let mut child = MoveGuard::new(rules, mv);
                self.alpha_beta(
                    &mut *child,
                    depth - 1,
                    ply.saturating_add(1),
                    alpha,
                    beta,
                    !maximizing,
                )
            };

            if maximizing {
                best = best.max(score);
                alpha = alpha.max(score);
            } else {
                best = best.min(score);
                beta = beta.min(score);
            }
            if beta <= alpha {
                self.stats.cutoffs += 1;
                break;
            }
        }

        let bound = if best <= alpha_orig {
            Bound::Upper
        } else if best >= beta_orig {
            Bound::Lower
        } else {
            Bound::Exact
        };
        self.cache.store(key, to_cache(best, ply), bound);
        best
    }

    fn full_width(&mut self, rules: &mut R, depth: u8, ply: u8, maximizing: bool) -> Score {
        self.stats.nodes += 1;

        let terminal = rules.is_terminal();
        if depth == 0 || terminal {
            return self.leaf(rules, terminal, ply);
        }

        let moves = rules.legal_moves();
        if moves.is_empty() {
            return self.leaf(rules, false, ply);
        }

        let mut best = if maximizing {
            -SCORE_INFINITY
        } else {
            SCORE_INFINITY
        };
        for mv in moves {
            let mut child = MoveGuard::new(rules, mv);
            let score = self.full_width(&mut *child, depth - 1, ply.saturating_add(1), !maximizing);
            best = if maximizing {
                best.max(score)
            } else {
                best.min(score)
            };
        }
        best
    }

    fn leaf(&self, rules: &R, terminal: bool, ply: u8) -> Score {
        if terminal {
            mate_in_plies(self.evaluator.terminal_score(rules, self.side), ply)
        } else {
            self.evaluator.evaluate(rules, self.side)
        }
    }
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
