//! # Weights Module
//!
//! Reviewer-type weighting for the colleague score.
//!
//! Weights are relative integer units, not percentages: the aggregator
//! divides by the sum of weights actually present, so `40/40/20` and
//! `4/4/2` behave identically. Self reviews have no weight slot at all —
//! the colleague score excludes them by construction.

use crate::error::CoreError;
use crate::primitives::ReviewerType;
use serde::{Deserialize, Serialize};

/// Upper bound on a single weight.
///
/// Keeps `weight * rating_hundredths * response_count` comfortably inside
/// u64 for any realistic response volume.
pub const MAX_WEIGHT: u32 = 10_000;

/// Default manager weight.
pub const DEFAULT_MANAGER_WEIGHT: u32 = 40;

/// Default peer weight.
pub const DEFAULT_PEER_WEIGHT: u32 = 40;

/// Default subordinate weight.
pub const DEFAULT_SUBORDINATE_WEIGHT: u32 = 20;

/// Per-reviewer-type weights for score aggregation.
///
/// A zero weight removes that reviewer type from the colleague score
/// entirely (its responses still appear in the per-type breakdown).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightTable {
    pub manager: u32,
    pub peer: u32,
    pub subordinate: u32,
}

impl Default for WeightTable {
    fn default() -> Self {
        Self {
            manager: DEFAULT_MANAGER_WEIGHT,
            peer: DEFAULT_PEER_WEIGHT,
            subordinate: DEFAULT_SUBORDINATE_WEIGHT,
        }
    }
}

impl WeightTable {
    /// Create a validated weight table.
    pub fn try_new(manager: u32, peer: u32, subordinate: u32) -> Result<Self, CoreError> {
        let table = Self {
            manager,
            peer,
            subordinate,
        };
        table.validate()?;
        Ok(table)
    }

    /// Check the table can produce a score.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.manager == 0 && self.peer == 0 && self.subordinate == 0 {
            return Err(CoreError::InvalidWeights(String::from(
                "all weights are zero",
            )));
        }
        for (name, weight) in [
            ("manager", self.manager),
            ("peer", self.peer),
            ("subordinate", self.subordinate),
        ] {
            if weight > MAX_WEIGHT {
                return Err(CoreError::InvalidWeights(format!(
                    "{name} weight {weight} exceeds maximum {MAX_WEIGHT}"
                )));
            }
        }
        Ok(())
    }

    /// Weight for a reviewer type. Self reviews always weigh zero.
    #[must_use]
    pub fn weight_for(&self, reviewer_type: ReviewerType) -> u32 {
        match reviewer_type {
            ReviewerType::SelfReview => 0,
            ReviewerType::Peer => self.peer,
            ReviewerType::Manager => self.manager,
            ReviewerType::Subordinate => self.subordinate,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
