//! Built-in tie-break profiles
//!
//! `include_str!` embeds the profile table at compile time; it is parsed once on
//! first use. Profiles are plain criterion-id lists, the same shape as a stored
//! [`Regulation`](crate::models::Regulation).

use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use crate::models::LeagueId;

pub const TIEBREAK_PROFILES_JSON: &str = include_str!("../../data/tiebreak_profiles.json");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileEntry {
    pub name: String,
    pub criterion_ids: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeagueProfile {
    pub league_id: LeagueId,
    pub name: String,
    pub criterion_ids: Vec<u8>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileTable {
    #[serde(default)]
    pub description: Option<String>,
    pub default: ProfileEntry,
    pub profiles: Vec<LeagueProfile>,
}

impl ProfileTable {
    pub fn for_league(&self, league_id: LeagueId) -> Option<&LeagueProfile> {
        self.profiles.iter().find(|p| p.league_id == league_id)
    }
}

static PROFILE_TABLE: OnceLock<ProfileTable> = OnceLock::new();

pub fn profile_table() -> &'static ProfileTable {
    PROFILE_TABLE.get_or_init(|| {
        serde_json::from_str(TIEBREAK_PROFILES_JSON)
            .expect("Embedded tie-break profile JSON is corrupted")
    })
}
