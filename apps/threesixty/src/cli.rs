//! # CLI Module
//!
//! One-shot scoring commands over JSON response files.
//!
//! The command functions are public so integration tests can drive them
//! directly, without spawning the binary.

use crate::config::{load_config, ConfigError};
use std::path::Path;
use thiserror::Error;
use threesixty_core::{
    CalculatedScore, CoreError, CycleId, EmployeeId, RatingResponse, ScoringEngine,
};

/// Errors from CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("failed to read responses file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse responses file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("no score for employee {0} in cycle {1}")]
    NoScore(u64, u64),
}

/// Load a JSON array of responses from a file.
pub fn load_responses(path: &Path) -> Result<Vec<RatingResponse>, CliError> {
    let content = std::fs::read_to_string(path)?;
    let responses = serde_json::from_str(&content)?;
    Ok(responses)
}

/// Build an engine from optional config and feed it a response file.
///
/// Duplicate responses in the file are an error: responses are immutable
/// once submitted, and a file that re-rates a question is malformed.
pub fn load_engine(
    responses_path: &Path,
    config_path: Option<&Path>,
) -> Result<ScoringEngine, CliError> {
    let config = load_config(config_path)?;
    let mut engine = config.build_engine()?;
    for response in load_responses(responses_path)? {
        engine.submit(response)?;
    }
    Ok(engine)
}

fn format_score_line(score: &CalculatedScore) -> String {
    format!(
        "employee {:>6}  score {}.{:02}  {:<17}  reviewers {}  responses {}",
        score.employee_id.0,
        score.score_hundredths / 100,
        score.score_hundredths % 100,
        score.label.display_name(),
        score.total_reviewers,
        score.total_responses,
    )
}

fn print_score(score: &CalculatedScore, json: bool) -> Result<(), CliError> {
    if json {
        println!("{}", serde_json::to_string_pretty(score)?);
    } else {
        println!("{}", format_score_line(score));
        for (ty, breakdown) in &score.by_type {
            println!(
                "  {:<12} mean {}.{:02}  reviewers {}  responses {}",
                ty.as_str(),
                breakdown.mean_hundredths / 100,
                breakdown.mean_hundredths % 100,
                breakdown.reviewers,
                breakdown.responses,
            );
        }
    }
    Ok(())
}

/// `score` command: one employee's score within a cycle.
pub fn cmd_score(
    responses_path: &Path,
    employee: u64,
    cycle: u64,
    config_path: Option<&Path>,
    json: bool,
) -> Result<(), CliError> {
    let mut engine = load_engine(responses_path, config_path)?;
    let score = engine
        .get_score(EmployeeId(employee), CycleId(cycle))
        .ok_or(CliError::NoScore(employee, cycle))?;
    print_score(&score, json)
}

/// `summary` command: every scored employee in a cycle.
pub fn cmd_summary(
    responses_path: &Path,
    cycle: u64,
    config_path: Option<&Path>,
    json: bool,
) -> Result<(), CliError> {
    let mut engine = load_engine(responses_path, config_path)?;
    let summary = engine.cycle_summary(CycleId(cycle));

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    if summary.is_empty() {
        println!("no scores in cycle {cycle}");
        return Ok(());
    }
    println!("cycle {cycle}: {} scored employee(s)", summary.len());
    for score in &summary {
        println!("{}", format_score_line(score));
    }
    Ok(())
}
