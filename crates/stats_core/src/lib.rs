//! # stats_core - Football Competition Statistics Engine
//!
//! Derives ranked competition tables from raw match results and checks match
//! and season submissions for consistency before they are committed.
//!
//! ## Features
//! - Standings with per-competition tie-break chains (stored regulation or
//!   built-in profile), gated head-to-head criteria, stable sequential ranks
//! - First-violation match validation: roster, score, assists, starters, minutes
//! - Season window validation with an atomic current-season switch
//! - Player season and career rollups

pub mod config;
pub mod error;
pub mod models;
pub mod service;
pub mod standings;
pub mod stats;
pub mod store;
pub mod validation;

pub use config::{RankingRules, SeasonRules, StatsConfig, SubmissionRules};
pub use error::{ErrorKind, Result, StatsError};
pub use service::{CommittedMatch, StatsService};
pub use standings::{Standing, StandingRow, StandingsComputer, TieBreakPolicy};
pub use store::{DataStore, InMemoryStore};
pub use validation::{MatchSubmission, MatchSubmissionValidator, SeasonWindowValidator};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
