//! Classical Chess Engine
//!
//! Minimax search with alpha-beta pruning over material plus piece-square
//! evaluation, backed by a bounded transposition cache.
//!
//! The search is generic over [`chess_core::Rules`], so the same driver that
//! plays chess through [`ClassicalEngine`] can search any two-player game that
//! supplies its own [`Evaluator`].

pub mod cache;
pub mod config;
pub mod driver;
pub mod eval;
pub mod pst;
pub mod score;
pub mod search;

#[cfg(test)]
mod test_tree;

use chess_core::{Engine, Game, PositionKey, SearchError, SearchResult};
use tracing::debug;

pub use cache::{
    entries_for_megabytes, megabytes_for_entries, Bound, CacheKey, CacheStats, TranspositionCache,
};
pub use config::{ConfigError, EngineConfig, MAX_HASH_MEGABYTES, MAX_SEARCH_DEPTH};
pub use driver::choose_move;
pub use eval::{evaluate, Evaluator, PieceSquareEvaluator};
pub use score::{Score, DRAW_SCORE, MATE_SCORE, SCORE_INFINITY};
pub use search::{Search, SearchStats};

/// Classical chess engine using alpha-beta pruning with iterative deepening.
///
/// This engine uses:
/// - Minimax search with alpha-beta pruning
/// - Material and piece-square evaluation
/// - A transposition cache kept across moves of one game
#[derive(Debug, Clone)]
pub struct ClassicalEngine {
    config: EngineConfig,
    evaluator: PieceSquareEvaluator,
    cache: TranspositionCache<PositionKey>,
}

impl ClassicalEngine {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            cache: TranspositionCache::new(config.cache_capacity),
            evaluator: PieceSquareEvaluator::new(),
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Cache size in megabytes, as reported through the UCI `Hash` option.
    pub fn hash_megabytes(&self) -> usize {
        megabytes_for_entries(self.config.cache_capacity)
    }
}

impl Default for ClassicalEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for ClassicalEngine {
    fn choose_move(&mut self, game: &mut Game) -> Result<SearchResult, SearchError> {
        driver::choose_move(
            game,
            &self.evaluator,
            &mut self.cache,
            self.config.max_depth,
        )
    }

    fn name(&self) -> &str {
        "Classical v1.0"
    }

    fn new_game(&mut self) {
        self.cache.clear();
    }

    fn set_option(&mut self, name: &str, value: &str) -> bool {
        if name.eq_ignore_ascii_case("Depth") {
            let Ok(depth) = value.trim().parse::<u8>() else {
                return false;
            };
            self.config.max_depth = depth.clamp(1, MAX_SEARCH_DEPTH);
            debug!(depth = self.config.max_depth, "search depth set");
            true
        } else if name.eq_ignore_ascii_case("Hash") {
            // UCI sends the table size in megabytes.
            let Ok(megabytes) = value.trim().parse::<usize>() else {
                return false;
            };
            let capacity = entries_for_megabytes(megabytes.min(MAX_HASH_MEGABYTES));
            self.config.cache_capacity = capacity;
            self.cache.set_capacity(capacity);
            debug!(megabytes, capacity, "cache capacity set");
            true
        } else {
            false
        }
    }
}
