//! # Config Module
//!
//! Optional JSON configuration for weights and label thresholds.
//!
//! Missing file or missing fields fall back to the engine defaults; an
//! unreadable or invalid file is an error, never a silent default.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;
use threesixty_core::{CoreError, ScoringEngine, ThresholdTable, WeightTable};

/// Errors loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(#[from] CoreError),
}

/// Weight overrides, all fields optional.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct WeightConfig {
    pub manager: Option<u32>,
    pub peer: Option<u32>,
    pub subordinate: Option<u32>,
}

/// Threshold overrides (lower bounds in hundredths), all fields optional.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ThresholdConfig {
    pub moderate: Option<u32>,
    pub good: Option<u32>,
    pub outstanding: Option<u32>,
}

/// Top-level score configuration file.
///
/// ```json
/// {
///   "weights": { "manager": 50, "peer": 30, "subordinate": 20 },
///   "thresholds": { "moderate": 200, "good": 275, "outstanding": 350 }
/// }
/// ```
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ScoreConfig {
    #[serde(default)]
    pub weights: WeightConfig,
    #[serde(default)]
    pub thresholds: ThresholdConfig,
}

impl ScoreConfig {
    /// Load from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Resolve to a validated weight table, defaults filling the gaps.
    pub fn weight_table(&self) -> Result<WeightTable, CoreError> {
        let defaults = WeightTable::default();
        WeightTable::try_new(
            self.weights.manager.unwrap_or(defaults.manager),
            self.weights.peer.unwrap_or(defaults.peer),
            self.weights.subordinate.unwrap_or(defaults.subordinate),
        )
    }

    /// Resolve to a validated threshold table, defaults filling the gaps.
    pub fn threshold_table(&self) -> Result<ThresholdTable, CoreError> {
        let defaults = ThresholdTable::default();
        ThresholdTable::try_new(
            self.thresholds.moderate.unwrap_or(defaults.moderate),
            self.thresholds.good.unwrap_or(defaults.good),
            self.thresholds.outstanding.unwrap_or(defaults.outstanding),
        )
    }

    /// Build an engine from this configuration.
    pub fn build_engine(&self) -> Result<ScoringEngine, ConfigError> {
        let engine = ScoringEngine::try_new(self.weight_table()?, self.threshold_table()?)?;
        Ok(engine)
    }
}

/// Load config from an optional path; `None` means defaults.
pub fn load_config(path: Option<&Path>) -> Result<ScoreConfig, ConfigError> {
    match path {
        Some(path) => ScoreConfig::load(path),
        None => Ok(ScoreConfig::default()),
    }
}

// =============================================================================
// TESTS
// =============================================================================
