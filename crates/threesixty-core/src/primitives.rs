//! # Primitives Module
//!
//! Core identifier and rating types shared across the engine.
//!
//! All identifiers are `u64` newtypes with transparent serde so the wire
//! format stays plain numbers. Ratings are validated on construction and
//! cannot hold an out-of-scale value.

use crate::error::CoreError;
use serde::{Deserialize, Serialize};

// =============================================================================
// SCALE CONSTANTS
// =============================================================================

/// Lowest valid raw rating.
pub const RATING_MIN: u8 = 1;

/// Highest valid raw rating.
pub const RATING_MAX: u8 = 4;

/// Number of points on the rating scale.
pub const RATING_SCALE: u8 = RATING_MAX;

/// Lowest possible aggregated score, in hundredths of a rating point.
pub const SCORE_MIN: u32 = RATING_MIN as u32 * 100;

/// Highest possible aggregated score, in hundredths of a rating point.
pub const SCORE_MAX: u32 = RATING_MAX as u32 * 100;

// =============================================================================
// IDENTIFIERS
// =============================================================================

/// Identifier for an employee being reviewed.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct EmployeeId(pub u64);

/// Identifier for a feedback cycle (a time-boxed collection period).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct CycleId(pub u64);

/// Identifier for the person submitting a rating.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct ReviewerId(pub u64);

/// Identifier for a survey question or competency.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct QuestionId(pub u64);

// =============================================================================
// RATING
// =============================================================================

/// A validated rating on the 1..=4 scale.
///
/// Construct via [`Rating::try_new`]; the inner value is guaranteed to be
/// within range, so downstream arithmetic never needs to re-check it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    /// Create a rating, rejecting values outside `1..=4`.
    pub fn try_new(value: u8) -> Result<Self, CoreError> {
        if (RATING_MIN..=RATING_MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(CoreError::InvalidRating(value))
        }
    }

    /// The raw scale value.
    #[must_use]
    pub fn value(&self) -> u8 {
        self.0
    }

    /// The rating in hundredths of a point (e.g. 3 -> 300).
    #[must_use]
    pub fn hundredths(&self) -> u32 {
        u32::from(self.0) * 100
    }
}

impl TryFrom<u8> for Rating {
    type Error = CoreError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

// =============================================================================
// REVIEWER TYPE
// =============================================================================

/// Relationship of the rater to the ratee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewerType {
    /// The employee rating themselves. Excluded from the colleague score.
    #[serde(rename = "self")]
    SelfReview,
    Peer,
    Manager,
    Subordinate,
}

impl ReviewerType {
    /// The non-self reviewer types, in deterministic order.
    pub const COLLEAGUES: [Self; 3] = [Self::Peer, Self::Manager, Self::Subordinate];

    /// Whether responses of this type count toward the colleague score.
    #[must_use]
    pub fn is_colleague(&self) -> bool {
        !matches!(self, Self::SelfReview)
    }

    /// Stable lowercase name, matching the wire format.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SelfReview => "self",
            Self::Peer => "peer",
            Self::Manager => "manager",
            Self::Subordinate => "subordinate",
        }
    }
}

// =============================================================================
// RATING RESPONSE
// =============================================================================

/// A single submitted rating.
///
/// Responses are immutable once submitted: the store rejects a second
/// response for the same (reviewer, question) within one (employee, cycle).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingResponse {
    pub reviewer_id: ReviewerId,
    pub reviewer_type: ReviewerType,
    pub employee_id: EmployeeId,
    pub cycle_id: CycleId,
    pub question_id: QuestionId,
    pub rating: Rating,
}

impl RatingResponse {
    /// Create a new response.
    #[must_use]
    pub fn new(
        reviewer_id: ReviewerId,
        reviewer_type: ReviewerType,
        employee_id: EmployeeId,
        cycle_id: CycleId,
        question_id: QuestionId,
        rating: Rating,
    ) -> Self {
        Self {
            reviewer_id,
            reviewer_type,
            employee_id,
            cycle_id,
            question_id,
            rating,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_accepts_scale_values() {
        for v in RATING_MIN..=RATING_MAX {
            let rating = Rating::try_new(v);
            assert!(rating.is_ok());
            assert_eq!(rating.map(|r| r.value()), Ok(v));
        }
    }

    #[test]
    fn rating_rejects_out_of_scale() {
        assert!(Rating::try_new(0).is_err());
        assert!(Rating::try_new(5).is_err());
        assert!(Rating::try_new(255).is_err());
    }

    #[test]
    fn rating_hundredths() {
        let rating = Rating::try_new(3).map(|r| r.hundredths());
        assert_eq!(rating, Ok(300));
    }

    #[test]
    fn reviewer_type_colleague_flag() {
        assert!(!ReviewerType::SelfReview.is_colleague());
        for ty in ReviewerType::COLLEAGUES {
            assert!(ty.is_colleague());
        }
    }

    #[test]
    fn reviewer_type_wire_names() {
        let json = serde_json::to_string(&ReviewerType::SelfReview).unwrap_or_default();
        assert_eq!(json, "\"self\"");
        let parsed: Result<ReviewerType, _> = serde_json::from_str("\"peer\"");
        assert_eq!(parsed.ok(), Some(ReviewerType::Peer));
    }

    #[test]
    fn rating_serde_rejects_invalid() {
        let parsed: Result<Rating, _> = serde_json::from_str("7");
        assert!(parsed.is_err());
    }
}
