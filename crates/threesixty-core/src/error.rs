//! # Error Module
//!
//! Typed errors for the scoring engine.
//!
//! Missing data is never an error here: a score that cannot be computed
//! is `None`, not a failure. Errors cover invalid input only.

use crate::primitives::{CycleId, EmployeeId, QuestionId, ReviewerId};
use thiserror::Error;

/// Errors from the threesixty core.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// A rating outside the 1..=4 scale.
    #[error("rating {0} outside valid scale 1..=4")]
    InvalidRating(u8),

    /// A reviewer already answered this question for this employee/cycle.
    #[error(
        "duplicate response: reviewer {reviewer:?} already rated question \
         {question:?} for employee {employee:?} in cycle {cycle:?}"
    )]
    DuplicateResponse {
        reviewer: ReviewerId,
        question: QuestionId,
        employee: EmployeeId,
        cycle: CycleId,
    },

    /// A weight table that cannot produce a score.
    #[error("invalid weight table: {0}")]
    InvalidWeights(String),

    /// A threshold table with unordered or out-of-range bounds.
    #[error("invalid threshold table: {0}")]
    InvalidThresholds(String),
}
