//! # Engine Module
//!
//! The scoring engine: the single owner of the response store, weight
//! table, threshold table and score cache.
//!
//! `CalculatedScore` is constructed in exactly one place
//! ([`ScoringEngine::compute`]), which is what guarantees the invariant
//! that `label` always equals `classify(score_hundredths)`.

use crate::aggregate::{aggregate, TypeBreakdown};
use crate::cache::{CacheStats, ScoreCache};
use crate::classify::{classify, RatingLabel, ThresholdTable};
use crate::error::CoreError;
use crate::primitives::{CycleId, EmployeeId, RatingResponse, ReviewerType};
use crate::store::{MemoryStore, ResponseStore};
use crate::weights::WeightTable;
use serde::{Deserialize, Serialize};

/// A derived score for one (employee, cycle).
///
/// Never persisted independently; recomputed on demand from the raw
/// responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculatedScore {
    pub employee_id: EmployeeId,
    pub cycle_id: CycleId,
    /// Weighted colleague score in hundredths of a rating point.
    pub score_hundredths: u32,
    /// Always `classify(score_hundredths)` under the engine's thresholds.
    pub label: RatingLabel,
    /// Distinct non-self reviewers who contributed.
    pub total_reviewers: u32,
    /// Non-self responses that contributed.
    pub total_responses: u32,
    /// Per-type unweighted means (self included, for display).
    pub by_type: Vec<(ReviewerType, TypeBreakdown)>,
}

/// Store and cache counters for status reporting.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct EngineStatus {
    pub response_count: usize,
    pub subject_count: usize,
    pub cache_size: usize,
    pub cache_hits: u64,
    pub cache_misses: u64,
}

/// The scoring engine.
///
/// Synchronous and single-threaded; callers that need concurrent access
/// wrap it in their own lock.
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    store: MemoryStore,
    weights: WeightTable,
    thresholds: ThresholdTable,
    cache: ScoreCache,
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self::new(WeightTable::default(), ThresholdTable::default())
    }
}

impl ScoringEngine {
    /// Create an engine over an empty store.
    ///
    /// The tables are taken as given; validate them first when they come
    /// from configuration.
    #[must_use]
    pub fn new(weights: WeightTable, thresholds: ThresholdTable) -> Self {
        Self {
            store: MemoryStore::new(),
            weights,
            thresholds,
            cache: ScoreCache::default(),
        }
    }

    /// Create an engine with validated tables.
    pub fn try_new(weights: WeightTable, thresholds: ThresholdTable) -> Result<Self, CoreError> {
        weights.validate()?;
        thresholds.validate()?;
        Ok(Self::new(weights, thresholds))
    }

    /// The active weight table.
    #[must_use]
    pub fn weights(&self) -> &WeightTable {
        &self.weights
    }

    /// The active threshold table.
    #[must_use]
    pub fn thresholds(&self) -> &ThresholdTable {
        &self.thresholds
    }

    /// Submit a response, invalidating any cached score for its subject.
    pub fn submit(&mut self, response: RatingResponse) -> Result<(), CoreError> {
        let subject = (response.employee_id, response.cycle_id);
        self.store.submit(response)?;
        self.cache.invalidate(&subject);
        Ok(())
    }

    /// The `getScore` boundary operation.
    ///
    /// Returns `None` when the employee has no weighted responses in the
    /// cycle — explicit "no score", never zero.
    pub fn get_score(&mut self, employee: EmployeeId, cycle: CycleId) -> Option<CalculatedScore> {
        let subject = (employee, cycle);
        if let Some(cached) = self.cache.get(&subject) {
            return Some(cached);
        }
        let score = self.compute(employee, cycle)?;
        self.cache.insert(subject, score.clone());
        Some(score)
    }

    /// Scores for every employee in a cycle that has one, sorted by id.
    pub fn cycle_summary(&mut self, cycle: CycleId) -> Vec<CalculatedScore> {
        self.store
            .employees_in_cycle(cycle)
            .into_iter()
            .filter_map(|employee| self.get_score(employee, cycle))
            .collect()
    }

    /// Store and cache counters.
    #[must_use]
    pub fn status(&self) -> EngineStatus {
        let cache: CacheStats = self.cache.stats();
        EngineStatus {
            response_count: self.store.response_count(),
            subject_count: self.store.subject_count(),
            cache_size: cache.size,
            cache_hits: cache.hits,
            cache_misses: cache.misses,
        }
    }

    fn compute(&self, employee: EmployeeId, cycle: CycleId) -> Option<CalculatedScore> {
        let responses = self.store.responses_for(employee, cycle);
        let breakdown = aggregate(&responses, &self.weights)?;
        Some(CalculatedScore {
            employee_id: employee,
            cycle_id: cycle,
            score_hundredths: breakdown.score_hundredths,
            label: classify(breakdown.score_hundredths, &self.thresholds),
            total_reviewers: breakdown.total_reviewers,
            total_responses: breakdown.total_responses,
            by_type: breakdown.by_type,
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================
