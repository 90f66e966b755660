//! # Classify Module
//!
//! Mapping of numeric scores to discrete rating labels.
//!
//! Labels are defined by ascending lower bounds in hundredths. The bands
//! are non-overlapping by construction: a score belongs to the highest
//! band whose lower bound it reaches.

use crate::error::CoreError;
use crate::primitives::{SCORE_MAX, SCORE_MIN};
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// RATING LABEL
// =============================================================================

/// Qualitative rating derived from the colleague score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatingLabel {
    NeedsImprovement,
    Moderate,
    Good,
    Outstanding,
}

impl RatingLabel {
    /// Human-readable label text, as shown on report badges.
    #[must_use]
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::NeedsImprovement => "Needs Improvement",
            Self::Moderate => "Moderate",
            Self::Good => "Good",
            Self::Outstanding => "Outstanding",
        }
    }
}

impl fmt::Display for RatingLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

// =============================================================================
// THRESHOLD TABLE
// =============================================================================

/// Default lower bound for Moderate, in hundredths.
pub const DEFAULT_MODERATE_BOUND: u32 = 200;

/// Default lower bound for Good, in hundredths.
pub const DEFAULT_GOOD_BOUND: u32 = 275;

/// Default lower bound for Outstanding, in hundredths.
pub const DEFAULT_OUTSTANDING_BOUND: u32 = 350;

/// Lower bounds for the upper three labels, in hundredths.
///
/// Anything below `moderate` is NeedsImprovement. Bounds must be strictly
/// ascending and inside the score range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThresholdTable {
    pub moderate: u32,
    pub good: u32,
    pub outstanding: u32,
}

impl Default for ThresholdTable {
    fn default() -> Self {
        Self {
            moderate: DEFAULT_MODERATE_BOUND,
            good: DEFAULT_GOOD_BOUND,
            outstanding: DEFAULT_OUTSTANDING_BOUND,
        }
    }
}

impl ThresholdTable {
    /// Create a validated threshold table.
    pub fn try_new(moderate: u32, good: u32, outstanding: u32) -> Result<Self, CoreError> {
        let table = Self {
            moderate,
            good,
            outstanding,
        };
        table.validate()?;
        Ok(table)
    }

    /// Check bounds are strictly ascending and inside the score range.
    pub fn validate(&self) -> Result<(), CoreError> {
        if !(self.moderate < self.good && self.good < self.outstanding) {
            return Err(CoreError::InvalidThresholds(format!(
                "bounds must be strictly ascending, got {}/{}/{}",
                self.moderate, self.good, self.outstanding
            )));
        }
        if self.moderate <= SCORE_MIN || self.outstanding > SCORE_MAX {
            return Err(CoreError::InvalidThresholds(format!(
                "bounds must lie inside {}..={}, got {}/{}/{}",
                SCORE_MIN, SCORE_MAX, self.moderate, self.good, self.outstanding
            )));
        }
        Ok(())
    }
}

/// Classify a score (in hundredths) into a label.
///
/// Pure and total: every score maps to exactly one label, and the same
/// score always yields the same label.
#[must_use]
pub fn classify(score_hundredths: u32, thresholds: &ThresholdTable) -> RatingLabel {
    if score_hundredths >= thresholds.outstanding {
        RatingLabel::Outstanding
    } else if score_hundredths >= thresholds.good {
        RatingLabel::Good
    } else if score_hundredths >= thresholds.moderate {
        RatingLabel::Moderate
    } else {
        RatingLabel::NeedsImprovement
    }
}

// =============================================================================
// TESTS
// =============================================================================
