//! # threesixty-core
//!
//! Deterministic scoring engine for 360-degree feedback.
//!
//! This crate reduces raw multi-reviewer ratings into per-employee scores
//! and qualitative labels. It is pure computation:
//! - No async, no network, no file I/O
//! - `BTreeMap` only, for deterministic iteration order
//! - Integer-only arithmetic: scores are carried in hundredths of a
//!   rating point, never as floats
//!
//! The app layer (`apps/threesixty`) wraps this engine in an HTTP API
//! and CLI.

pub mod aggregate;
pub mod cache;
pub mod classify;
pub mod engine;
pub mod error;
pub mod primitives;
pub mod store;
pub mod weights;

pub use aggregate::{aggregate, ScoreBreakdown, TypeBreakdown};
pub use cache::{CacheStats, ScoreCache};
pub use classify::{classify, RatingLabel, ThresholdTable};
pub use engine::{CalculatedScore, EngineStatus, ScoringEngine};
pub use error::CoreError;
pub use primitives::{
    CycleId, EmployeeId, QuestionId, Rating, RatingResponse, ReviewerId, ReviewerType,
    RATING_SCALE, SCORE_MAX, SCORE_MIN,
};
pub use store::{MemoryStore, ResponseStore};
pub use weights::WeightTable;
