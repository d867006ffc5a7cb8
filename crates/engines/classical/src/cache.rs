//! Bounded transposition cache.
//!
//! Entries are keyed by position, remaining depth and node kind, so a score is
//! only reused for the exact query it answered. Capacity is enforced with
//! generational eviction: every move decision opens a new generation and, when
//! the table is full, entries from older generations are dropped first.

use std::collections::HashMap;
use std::hash::Hash;

use tracing::trace;

use crate::score::Score;

/// How a stored score relates to the true minimax value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    /// The score is the exact value.
    Exact,
    /// The search failed high; the true value is at least the score.
    Lower,
    /// The search failed low; the true value is at most the score.
    Upper,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey<K> {
    pub position: K,
    pub depth: u8,
    pub maximizing: bool,
}

impl<K> CacheKey<K> {
    pub fn new(position: K, depth: u8, maximizing: bool) -> Self {
        Self {
            position,
            depth,
            maximizing,
        }
    }
}

/// Approximate memory per entry, key included, used to size the table from a
/// megabyte budget.
pub const ENTRY_BYTES: usize = 256;

/// Number of entries that fit in `megabytes` of memory.
pub fn entries_for_megabytes(megabytes: usize) -> usize {
    megabytes.saturating_mul(1 << 20) / ENTRY_BYTES
}

/// Megabytes taken by `entries` entries, rounded down.
pub fn megabytes_for_entries(entries: usize) -> usize {
    entries.saturating_mul(ENTRY_BYTES) >> 20
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheEntry {
    pub score: Score,
    pub bound: Bound,
    generation: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub probes: u64,
    pub hits: u64,
    pub stores: u64,
    pub evictions: u64,
}

#[derive(Debug, Clone)]
pub struct TranspositionCache<K> {
    entries: HashMap<CacheKey<K>, CacheEntry>,
    capacity: usize,
    generation: u32,
    stats: CacheStats,
}

impl<K: Clone + Eq + Hash> TranspositionCache<K> {
    /// Creates a cache holding at most `capacity` entries. Zero disables it.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            capacity,
            generation: 0,
            stats: CacheStats::default(),
        }
    }

    /// A cache that never stores anything.
    pub fn disabled() -> Self {
        Self::new(0)
    }

    pub fn is_enabled(&self) -> bool {
        self.capacity > 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Changes the capacity, dropping everything if the table no longer fits.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity;
        if self.entries.len() > capacity {
            self.clear();
        }
    }

    /// Opens a new generation. Called once per move decision.
    pub fn new_generation(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn lookup(&self, key: &CacheKey<K>) -> Option<CacheEntry> {
        self.entries.get(key).copied()
    }

    /// Returns a score for `key` if the stored bound settles the node under
    /// the `(alpha, beta)` window.
    pub fn probe(&mut self, key: &CacheKey<K>, alpha: Score, beta: Score) -> Option<Score> {
        if !self.is_enabled() {
            return None;
        }
        self.stats.probes += 1;

        let entry = self.entries.get_mut(key)?;
        let usable = match entry.bound {
            Bound::Exact => true,
            Bound::Lower => entry.score >= beta,
            Bound::Upper => entry.score <= alpha,
        };
        if !usable {
            return None;
        }

        entry.generation = self.generation;
        self.stats.hits += 1;
        Some(entry.score)
    }

    /// Stores a score, replacing any previous entry for the same key.
    pub fn store(&mut self, key: CacheKey<K>, score: Score, bound: Bound) {
        if !self.is_enabled() {
            return;
        }
        if self.entries.len() >= self.capacity && !self.entries.contains_key(&key) {
            self.make_room();
        }

        self.stats.stores += 1;
        self.entries.insert(
            key,
            CacheEntry {
                score,
                bound,
                generation: self.generation,
            },
        );
    }

    fn make_room(&mut self) {
        let before = self.entries.len();
        let current = self.generation;
        self.entries.retain(|_, entry| entry.generation == current);

        let dropped = before - self.entries.len();
        if dropped > 0 {
            trace!(dropped, "evicted entries from older generations");
            self.stats.evictions += dropped as u64;
        } else {
            trace!(dropped = before, "cache full within one generation, clearing");
            self.stats.evictions += before as u64;
            self.entries.clear();
        }
    }
}

#[cfg(test)]
#[path = "cache_tests.rs"]
mod cache_tests;
