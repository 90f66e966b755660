//! Integration tests for threesixty CLI commands.
//!
//! Uses tempfile for testing file-based operations.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic)]

use std::path::PathBuf;
use tempfile::TempDir;
use threesixty::cli::{cmd_score, cmd_summary, load_engine, load_responses, CliError};
use threesixty_core::{CycleId, EmployeeId, RatingLabel};

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Create a temporary directory for tests.
fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Create a sample responses JSON file.
///
/// Employee 10 gets the spec worked example (peer ratings 3,4,2,3 plus a
/// self rating that must not count); employee 20 has a single manager
/// rating; employee 30 has only a self rating.
fn create_responses_json(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("responses.json");
    let content = r#"[
        {"reviewer_id": 1, "reviewer_type": "peer", "employee_id": 10, "cycle_id": 1, "question_id": 1, "rating": 3},
        {"reviewer_id": 2, "reviewer_type": "peer", "employee_id": 10, "cycle_id": 1, "question_id": 1, "rating": 4},
        {"reviewer_id": 3, "reviewer_type": "peer", "employee_id": 10, "cycle_id": 1, "question_id": 1, "rating": 2},
        {"reviewer_id": 4, "reviewer_type": "peer", "employee_id": 10, "cycle_id": 1, "question_id": 1, "rating": 3},
        {"reviewer_id": 10, "reviewer_type": "self", "employee_id": 10, "cycle_id": 1, "question_id": 1, "rating": 4},
        {"reviewer_id": 5, "reviewer_type": "manager", "employee_id": 20, "cycle_id": 1, "question_id": 1, "rating": 4},
        {"reviewer_id": 30, "reviewer_type": "self", "employee_id": 30, "cycle_id": 1, "question_id": 1, "rating": 4}
    ]"#;
    std::fs::write(&path, content).unwrap();
    path
}

/// Create a config file that makes every band reachable only at 4.0.
fn create_strict_config(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("config.json");
    let content = r#"{"thresholds": {"moderate": 380, "good": 390, "outstanding": 400}}"#;
    std::fs::write(&path, content).unwrap();
    path
}

// =============================================================================
// LOAD TESTS
// =============================================================================

#[test]
fn test_load_responses_parses_file() {
    let temp = create_temp_dir();
    let path = create_responses_json(&temp);

    let responses = load_responses(&path).unwrap();
    assert_eq!(responses.len(), 7);
}

#[test]
fn test_load_responses_invalid_json() {
    let temp = create_temp_dir();
    let path = temp.path().join("bad.json");
    std::fs::write(&path, "not valid json").unwrap();

    let result = load_responses(&path);
    assert!(matches!(result, Err(CliError::Parse(_))));
}

#[test]
fn test_load_responses_out_of_scale_rating() {
    let temp = create_temp_dir();
    let path = temp.path().join("bad_rating.json");
    let content = r#"[
        {"reviewer_id": 1, "reviewer_type": "peer", "employee_id": 10, "cycle_id": 1, "question_id": 1, "rating": 9}
    ]"#;
    std::fs::write(&path, content).unwrap();

    let result = load_responses(&path);
    assert!(result.is_err());
}

#[test]
fn test_load_engine_rejects_duplicate_rows() {
    let temp = create_temp_dir();
    let path = temp.path().join("dupes.json");
    let content = r#"[
        {"reviewer_id": 1, "reviewer_type": "peer", "employee_id": 10, "cycle_id": 1, "question_id": 1, "rating": 3},
        {"reviewer_id": 1, "reviewer_type": "peer", "employee_id": 10, "cycle_id": 1, "question_id": 1, "rating": 4}
    ]"#;
    std::fs::write(&path, content).unwrap();

    let result = load_engine(&path, None);
    assert!(matches!(result, Err(CliError::Core(_))));
}

#[test]
fn test_load_engine_missing_file() {
    let temp = create_temp_dir();
    let path = temp.path().join("nonexistent.json");

    let result = load_engine(&path, None);
    assert!(matches!(result, Err(CliError::Io(_))));
}

// =============================================================================
// SCORE COMMAND TESTS
// =============================================================================

#[test]
fn test_score_worked_example() {
    let temp = create_temp_dir();
    let path = create_responses_json(&temp);

    let mut engine = load_engine(&path, None).unwrap();
    let score = engine.get_score(EmployeeId(10), CycleId(1)).unwrap();
    assert_eq!(score.score_hundredths, 300);
    assert_eq!(score.label, RatingLabel::Good);
    assert_eq!(score.total_reviewers, 4);

    let result = cmd_score(&path, 10, 1, None, false);
    assert!(result.is_ok());
}

#[test]
fn test_score_json_mode() {
    let temp = create_temp_dir();
    let path = create_responses_json(&temp);

    let result = cmd_score(&path, 10, 1, None, true);
    assert!(result.is_ok());
}

#[test]
fn test_score_self_only_employee_has_none() {
    let temp = create_temp_dir();
    let path = create_responses_json(&temp);

    let result = cmd_score(&path, 30, 1, None, false);
    assert!(matches!(result, Err(CliError::NoScore(30, 1))));
}

#[test]
fn test_score_unknown_employee() {
    let temp = create_temp_dir();
    let path = create_responses_json(&temp);

    let result = cmd_score(&path, 999, 1, None, false);
    assert!(matches!(result, Err(CliError::NoScore(999, 1))));
}

#[test]
fn test_score_with_config_changes_label() {
    let temp = create_temp_dir();
    let responses = create_responses_json(&temp);
    let config = create_strict_config(&temp);

    // Under strict thresholds, a 3.0 drops to Needs Improvement.
    let mut engine = load_engine(&responses, Some(&config)).unwrap();
    let score = engine.get_score(EmployeeId(10), CycleId(1)).unwrap();
    assert_eq!(score.label, RatingLabel::NeedsImprovement);

    // Employee 20's straight 4.0 still reaches Outstanding.
    let score = engine.get_score(EmployeeId(20), CycleId(1)).unwrap();
    assert_eq!(score.label, RatingLabel::Outstanding);
}

#[test]
fn test_score_invalid_config() {
    let temp = create_temp_dir();
    let responses = create_responses_json(&temp);
    let config = temp.path().join("bad_config.json");
    std::fs::write(&config, r#"{"thresholds": {"moderate": 399}}"#).unwrap();

    let result = cmd_score(&responses, 10, 1, Some(&config), false);
    assert!(matches!(result, Err(CliError::Config(_))));
}

// =============================================================================
// SUMMARY COMMAND TESTS
// =============================================================================

#[test]
fn test_summary_text_mode() {
    let temp = create_temp_dir();
    let path = create_responses_json(&temp);

    let result = cmd_summary(&path, 1, None, false);
    assert!(result.is_ok());
}

#[test]
fn test_summary_json_mode() {
    let temp = create_temp_dir();
    let path = create_responses_json(&temp);

    let result = cmd_summary(&path, 1, None, true);
    assert!(result.is_ok());
}

#[test]
fn test_summary_excludes_self_only_employee() {
    let temp = create_temp_dir();
    let path = create_responses_json(&temp);

    let mut engine = load_engine(&path, None).unwrap();
    let summary = engine.cycle_summary(CycleId(1));
    let employees: Vec<u64> = summary.iter().map(|s| s.employee_id.0).collect();
    assert_eq!(employees, vec![10, 20]);
}

#[test]
fn test_summary_empty_cycle() {
    let temp = create_temp_dir();
    let path = create_responses_json(&temp);

    let result = cmd_summary(&path, 99, None, false);
    assert!(result.is_ok());
}
