//! # Score Cache Module
//!
//! LRU cache for computed scores.
//!
//! Scores are recomputed on demand; this cache avoids re-aggregating an
//! unchanged (employee, cycle) on every read. It uses a logical clock
//! (monotonic counter, never wall time) for eviction ordering, so cache
//! behavior is deterministic for a given call sequence.

use crate::engine::CalculatedScore;
use crate::store::SubjectKey;
use std::collections::BTreeMap;

/// Default maximum number of cached scores.
pub const DEFAULT_CACHE_SIZE: usize = 1024;

#[derive(Debug, Clone)]
struct Entry {
    score: CalculatedScore,
    last_access: u64,
}

/// Cache performance counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub size: usize,
    pub hits: u64,
    pub misses: u64,
    pub invalidations: u64,
}

/// LRU cache for calculated scores, keyed by (employee, cycle).
///
/// BTreeMap storage keeps iteration deterministic. Submissions must call
/// [`ScoreCache::invalidate`] for the affected subject, otherwise a stale
/// score would violate the label/score invariant.
#[derive(Debug, Clone)]
pub struct ScoreCache {
    entries: BTreeMap<SubjectKey, Entry>,
    max_size: usize,
    logical_clock: u64,
    hits: u64,
    misses: u64,
    invalidations: u64,
}

impl Default for ScoreCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_SIZE)
    }
}

impl ScoreCache {
    /// Create a cache holding at most `max_size` scores.
    #[must_use]
    pub fn new(max_size: usize) -> Self {
        Self {
            entries: BTreeMap::new(),
            max_size: max_size.max(1),
            logical_clock: 0,
            hits: 0,
            misses: 0,
            invalidations: 0,
        }
    }

    fn tick(&mut self) -> u64 {
        self.logical_clock = self.logical_clock.saturating_add(1);
        self.logical_clock
    }

    /// Get a cached score, updating the access time on hit.
    pub fn get(&mut self, key: &SubjectKey) -> Option<CalculatedScore> {
        let now = self.tick();
        if let Some(entry) = self.entries.get_mut(key) {
            entry.last_access = now;
            self.hits = self.hits.saturating_add(1);
            Some(entry.score.clone())
        } else {
            self.misses = self.misses.saturating_add(1);
            None
        }
    }

    /// Cache a computed score, evicting the least recently used entry
    /// when full.
    pub fn insert(&mut self, key: SubjectKey, score: CalculatedScore) {
        let now = self.tick();
        if self.entries.len() >= self.max_size && !self.entries.contains_key(&key) {
            self.evict_one();
        }
        self.entries.insert(
            key,
            Entry {
                score,
                last_access: now,
            },
        );
    }

    /// Drop the cached score for one subject, if present.
    pub fn invalidate(&mut self, key: &SubjectKey) {
        if self.entries.remove(key).is_some() {
            self.invalidations = self.invalidations.saturating_add(1);
        }
    }

    /// Drop everything. Counters survive.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of cached scores.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Current counters.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            size: self.entries.len(),
            hits: self.hits,
            misses: self.misses,
            invalidations: self.invalidations,
        }
    }

    fn evict_one(&mut self) {
        // Oldest last_access wins; ties break on the smaller key because
        // of BTreeMap iteration order.
        let victim = self
            .entries
            .iter()
            .min_by_key(|(key, entry)| (entry.last_access, *key))
            .map(|(key, _)| *key);
        if let Some(key) = victim {
            self.entries.remove(&key);
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::RatingLabel;
    use crate::primitives::{CycleId, EmployeeId};

    fn score(employee: u64, hundredths: u32) -> CalculatedScore {
        CalculatedScore {
            employee_id: EmployeeId(employee),
            cycle_id: CycleId(1),
            score_hundredths: hundredths,
            label: RatingLabel::Good,
            total_reviewers: 3,
            total_responses: 3,
            by_type: Vec::new(),
        }
    }

    fn key(employee: u64) -> SubjectKey {
        (EmployeeId(employee), CycleId(1))
    }

    #[test]
    fn insert_and_get() {
        let mut cache = ScoreCache::new(4);
        cache.insert(key(1), score(1, 300));

        assert_eq!(cache.get(&key(1)).map(|s| s.score_hundredths), Some(300));
        assert!(cache.get(&key(2)).is_none());

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
    }

    #[test]
    fn invalidate_removes_entry() {
        let mut cache = ScoreCache::new(4);
        cache.insert(key(1), score(1, 300));
        cache.invalidate(&key(1));

        assert!(cache.get(&key(1)).is_none());
        assert_eq!(cache.stats().invalidations, 1);
    }

    #[test]
    fn invalidate_missing_is_noop() {
        let mut cache = ScoreCache::new(4);
        cache.invalidate(&key(9));
        assert_eq!(cache.stats().invalidations, 0);
    }

    #[test]
    fn evicts_least_recently_used() {
        let mut cache = ScoreCache::new(2);
        cache.insert(key(1), score(1, 300));
        cache.insert(key(2), score(2, 200));

        // Touch 1 so 2 becomes the LRU.
        let _ = cache.get(&key(1));
        cache.insert(key(3), score(3, 400));

        assert!(cache.get(&key(1)).is_some());
        assert!(cache.get(&key(2)).is_none());
        assert!(cache.get(&key(3)).is_some());
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn reinsert_updates_value() {
        let mut cache = ScoreCache::new(4);
        cache.insert(key(1), score(1, 300));
        cache.insert(key(1), score(1, 350));

        assert_eq!(cache.get(&key(1)).map(|s| s.score_hundredths), Some(350));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn clear_keeps_counters() {
        let mut cache = ScoreCache::new(4);
        cache.insert(key(1), score(1, 300));
        let _ = cache.get(&key(1));
        cache.clear();

        assert!(cache.is_empty());
        assert_eq!(cache.stats().hits, 1);
    }
}
