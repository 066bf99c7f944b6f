//! Write-path consistency checks
//!
//! Both validators are pure: every input is fetched by the caller and passed in.

pub mod match_submission;
pub mod season_window;

pub use match_submission::{MatchContext, MatchSubmission, MatchSubmissionValidator, ValidatedMatch};
pub use season_window::SeasonWindowValidator;
