//! # Response Store Module
//!
//! Storage boundary for raw rating responses.
//!
//! The `ResponseStore` trait is the seam to whatever holds submitted
//! responses; `MemoryStore` is the deterministic in-memory implementation
//! used by the engine. All collections are `BTreeMap` so iteration order
//! is stable across runs.

use crate::error::CoreError;
use crate::primitives::{CycleId, EmployeeId, QuestionId, RatingResponse, ReviewerId};
use std::collections::BTreeMap;

/// Key for one employee's responses within one cycle.
pub type SubjectKey = (EmployeeId, CycleId);

/// The ResponseStore trait defines the persistence boundary for responses.
///
/// Implementations must preserve the invariant that no reviewer
/// contributes more than one response per question per (employee, cycle).
pub trait ResponseStore {
    /// Submit a response. Rejects duplicates for the same
    /// (reviewer, question) within one (employee, cycle).
    fn submit(&mut self, response: RatingResponse) -> Result<(), CoreError>;

    /// All responses for one (employee, cycle), in deterministic order.
    fn responses_for(&self, employee: EmployeeId, cycle: CycleId) -> Vec<RatingResponse>;

    /// Distinct employees with at least one response in the cycle, sorted.
    fn employees_in_cycle(&self, cycle: CycleId) -> Vec<EmployeeId>;

    /// Total number of stored responses.
    fn response_count(&self) -> usize;

    /// Number of distinct (employee, cycle) subjects.
    fn subject_count(&self) -> usize;
}

/// Deterministic in-memory response store.
///
/// Outer map: (employee, cycle) -> inner map.
/// Inner map: (reviewer, question) -> response. The inner key is what
/// enforces the one-response-per-reviewer-per-question invariant.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    responses: BTreeMap<SubjectKey, BTreeMap<(ReviewerId, QuestionId), RatingResponse>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Iterate all responses in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &RatingResponse> {
        self.responses.values().flat_map(|inner| inner.values())
    }
}

impl ResponseStore for MemoryStore {
    fn submit(&mut self, response: RatingResponse) -> Result<(), CoreError> {
        let subject = (response.employee_id, response.cycle_id);
        let slot = (response.reviewer_id, response.question_id);

        let inner = self.responses.entry(subject).or_default();
        if inner.contains_key(&slot) {
            return Err(CoreError::DuplicateResponse {
                reviewer: response.reviewer_id,
                question: response.question_id,
                employee: response.employee_id,
                cycle: response.cycle_id,
            });
        }

        inner.insert(slot, response);
        Ok(())
    }

    fn responses_for(&self, employee: EmployeeId, cycle: CycleId) -> Vec<RatingResponse> {
        self.responses
            .get(&(employee, cycle))
            .map(|inner| inner.values().cloned().collect())
            .unwrap_or_default()
    }

    fn employees_in_cycle(&self, cycle: CycleId) -> Vec<EmployeeId> {
        // Subject keys are sorted by (employee, cycle), so employees come
        // out ascending without an extra sort.
        self.responses
            .keys()
            .filter(|(_, c)| *c == cycle)
            .map(|(e, _)| *e)
            .collect()
    }

    fn response_count(&self) -> usize {
        self.responses.values().map(BTreeMap::len).sum()
    }

    fn subject_count(&self) -> usize {
        self.responses.len()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::{Rating, ReviewerType};

    fn response(reviewer: u64, employee: u64, cycle: u64, question: u64, rating: u8) -> RatingResponse {
        RatingResponse::new(
            ReviewerId(reviewer),
            ReviewerType::Peer,
            EmployeeId(employee),
            CycleId(cycle),
            QuestionId(question),
            Rating::try_new(rating).expect("test rating in scale"),
        )
    }

    #[test]
    fn submit_and_read_back() {
        let mut store = MemoryStore::new();
        assert!(store.submit(response(1, 10, 1, 1, 3)).is_ok());
        assert!(store.submit(response(2, 10, 1, 1, 4)).is_ok());

        let responses = store.responses_for(EmployeeId(10), CycleId(1));
        assert_eq!(responses.len(), 2);
        assert_eq!(store.response_count(), 2);
        assert_eq!(store.subject_count(), 1);
    }

    #[test]
    fn duplicate_reviewer_question_rejected() {
        let mut store = MemoryStore::new();
        assert!(store.submit(response(1, 10, 1, 1, 3)).is_ok());

        let err = store.submit(response(1, 10, 1, 1, 2));
        assert!(matches!(err, Err(CoreError::DuplicateResponse { .. })));
        assert_eq!(store.response_count(), 1);
    }

    #[test]
    fn same_reviewer_different_question_allowed() {
        let mut store = MemoryStore::new();
        assert!(store.submit(response(1, 10, 1, 1, 3)).is_ok());
        assert!(store.submit(response(1, 10, 1, 2, 4)).is_ok());
        assert_eq!(store.response_count(), 2);
    }

    #[test]
    fn same_reviewer_different_cycle_allowed() {
        let mut store = MemoryStore::new();
        assert!(store.submit(response(1, 10, 1, 1, 3)).is_ok());
        assert!(store.submit(response(1, 10, 2, 1, 2)).is_ok());
        assert_eq!(store.subject_count(), 2);
    }

    #[test]
    fn missing_subject_is_empty_not_error() {
        let store = MemoryStore::new();
        let responses = store.responses_for(EmployeeId(99), CycleId(1));
        assert!(responses.is_empty());
    }

    #[test]
    fn employees_in_cycle_sorted_and_distinct() {
        let mut store = MemoryStore::new();
        // Insert in non-sorted employee order
        assert!(store.submit(response(1, 30, 1, 1, 3)).is_ok());
        assert!(store.submit(response(1, 10, 1, 1, 3)).is_ok());
        assert!(store.submit(response(2, 10, 1, 2, 4)).is_ok());
        assert!(store.submit(response(1, 20, 2, 1, 2)).is_ok());

        let employees = store.employees_in_cycle(CycleId(1));
        assert_eq!(employees, vec![EmployeeId(10), EmployeeId(30)]);
    }
}
