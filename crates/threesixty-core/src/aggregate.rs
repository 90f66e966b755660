//! # Aggregate Module
//!
//! Reduction of raw responses into a single colleague score.
//!
//! The score is a weighted arithmetic mean over all non-self responses,
//! carried in hundredths of a rating point with round-half-up integer
//! division. Zero eligible responses yields an explicit `None`, never a
//! zero score.

use crate::primitives::{RatingResponse, ReviewerId, ReviewerType, SCORE_MAX, SCORE_MIN};
use crate::weights::WeightTable;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Unweighted mean and counts for one reviewer type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeBreakdown {
    /// Unweighted mean for this type, in hundredths.
    pub mean_hundredths: u32,
    /// Distinct reviewers of this type.
    pub reviewers: u32,
    /// Responses of this type.
    pub responses: u32,
}

/// The raw aggregation result, before label classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Weighted colleague score in hundredths, always in `100..=400`.
    pub score_hundredths: u32,
    /// Distinct non-self reviewers who contributed.
    pub total_reviewers: u32,
    /// Non-self responses that contributed.
    pub total_responses: u32,
    /// Per-type unweighted means, in deterministic type order.
    /// Includes self reviews for display even though they carry no weight.
    pub by_type: Vec<(ReviewerType, TypeBreakdown)>,
}

/// Round-half-up integer division.
fn div_round(numerator: u64, denominator: u64) -> u64 {
    debug_assert!(denominator > 0);
    (numerator + denominator / 2) / denominator
}

/// Unweighted mean in hundredths over the responses of one reviewer type.
fn type_breakdown(responses: &[&RatingResponse]) -> Option<TypeBreakdown> {
    if responses.is_empty() {
        return None;
    }
    let sum: u64 = responses.iter().map(|r| u64::from(r.rating.hundredths())).sum();
    let reviewers: BTreeSet<ReviewerId> = responses.iter().map(|r| r.reviewer_id).collect();
    Some(TypeBreakdown {
        mean_hundredths: div_round(sum, responses.len() as u64) as u32,
        reviewers: reviewers.len() as u32,
        responses: responses.len() as u32,
    })
}

/// Aggregate responses for one (employee, cycle) into a colleague score.
///
/// Each non-self response contributes `weight(type) * rating`; the score
/// is the weighted sum divided by the total weight present. Responses
/// whose type has weight zero are excluded from the score but still show
/// up in the per-type breakdown.
///
/// Returns `None` when no weighted response exists — an employee with
/// only a self review has no colleague score.
#[must_use]
pub fn aggregate(responses: &[RatingResponse], weights: &WeightTable) -> Option<ScoreBreakdown> {
    let mut weighted_sum: u64 = 0;
    let mut weight_total: u64 = 0;
    let mut contributing_reviewers: BTreeSet<ReviewerId> = BTreeSet::new();
    let mut contributing_responses: u32 = 0;

    for response in responses {
        let weight = u64::from(weights.weight_for(response.reviewer_type));
        if weight == 0 {
            continue;
        }
        weighted_sum = weighted_sum.saturating_add(weight * u64::from(response.rating.hundredths()));
        weight_total = weight_total.saturating_add(weight);
        contributing_reviewers.insert(response.reviewer_id);
        contributing_responses = contributing_responses.saturating_add(1);
    }

    if weight_total == 0 {
        return None;
    }

    let score = div_round(weighted_sum, weight_total) as u32;
    // Ratings are validated 1..=4, so the mean cannot leave the scale;
    // clamp anyway so the invariant holds even if a store misbehaves.
    let score_hundredths = score.clamp(SCORE_MIN, SCORE_MAX);

    let mut by_type = Vec::new();
    for ty in [
        ReviewerType::SelfReview,
        ReviewerType::Peer,
        ReviewerType::Manager,
        ReviewerType::Subordinate,
    ] {
        let of_type: Vec<&RatingResponse> =
            responses.iter().filter(|r| r.reviewer_type == ty).collect();
        if let Some(breakdown) = type_breakdown(&of_type) {
            by_type.push((ty, breakdown));
        }
    }

    Some(ScoreBreakdown {
        score_hundredths,
        total_reviewers: contributing_reviewers.len() as u32,
        total_responses: contributing_responses,
        by_type,
    })
}

// =============================================================================
// TESTS
// =============================================================================
