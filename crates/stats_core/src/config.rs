//! Rule constants for validation and ranking.
//!
//! Defaults carry the contract values. A JSON override can be supplied through
//! `STATS_CONFIG_PATH`; every field is optional in the file.

use serde::{Deserialize, Serialize};
use std::{env, fs};

use crate::error::{Result, StatsError};

pub const STATS_CONFIG_PATH_ENV: &str = "STATS_CONFIG_PATH";

/// Upper bound for `SeasonRules::max_span_days` (ten years).
pub const MAX_SEASON_SPAN_DAYS: i64 = 3653;

/// Match submission checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmissionRules {
    /// Required starters per side (default: 11)
    pub starters_per_side: usize,
    /// Lower bound of summed minutes per side (default: 990)
    pub min_total_minutes: u32,
    /// Upper bound of summed minutes per side (default: 1000)
    pub max_total_minutes: u32,
}

impl Default for SubmissionRules {
    fn default() -> Self {
        Self { starters_per_side: 11, min_total_minutes: 990, max_total_minutes: 1000 }
    }
}

/// Season window checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeasonRules {
    /// `end_date` may be at most this many days after `start_date` (default: 365)
    pub max_span_days: i64,
}

impl Default for SeasonRules {
    fn default() -> Self {
        Self { max_span_days: 365 }
    }
}

impl SeasonRules {
    /// Inclusive length of the longest allowed season.
    pub fn max_period_days(&self) -> i64 {
        self.max_span_days + 1
    }
}

/// Standings tie-break parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingRules {
    /// Meetings required before a gated head-to-head criterion applies (default: 2)
    pub head_to_head_min_encounters: u32,
}

impl Default for RankingRules {
    fn default() -> Self {
        Self { head_to_head_min_encounters: 2 }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsConfig {
    pub submission: SubmissionRules,
    pub season: SeasonRules,
    pub ranking: RankingRules,
}

impl StatsConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: StatsConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.submission.starters_per_side == 0 {
            return Err(StatsError::InvalidConfig("starters_per_side must be > 0".into()));
        }
        if self.submission.min_total_minutes > self.submission.max_total_minutes {
            return Err(StatsError::InvalidConfig(format!(
                "min_total_minutes ({}) exceeds max_total_minutes ({})",
                self.submission.min_total_minutes, self.submission.max_total_minutes
            )));
        }
        if !(0..=MAX_SEASON_SPAN_DAYS).contains(&self.season.max_span_days) {
            return Err(StatsError::InvalidConfig(format!(
                "max_span_days must be between 0 and {}",
                MAX_SEASON_SPAN_DAYS
            )));
        }
        if self.ranking.head_to_head_min_encounters == 0 {
            return Err(StatsError::InvalidConfig(
                "head_to_head_min_encounters must be >= 1".into(),
            ));
        }
        Ok(())
    }

    /// Load from the file named by `STATS_CONFIG_PATH`, or defaults when unset.
    pub fn from_env() -> Result<Self> {
        let Ok(path) = env::var(STATS_CONFIG_PATH_ENV) else {
            return Ok(Self::default());
        };

        let path = path.trim();
        if path.is_empty() {
            return Ok(Self::default());
        }

        Self::from_file(path)
    }

    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            StatsError::InvalidConfig(format!("Failed to read {}: {}", path.display(), e))
        })?;
        log::debug!("loading stats config from {}", path.display());
        Self::from_json(&content)
    }
}
