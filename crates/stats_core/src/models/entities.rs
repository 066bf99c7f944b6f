use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{ClubId, CountryId, LeagueId, PlayerId, SeasonId};
use crate::error::{Result, StatsError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    pub id: CountryId,
    pub name: String,
}

/// A competition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct League {
    pub id: LeagueId,
    pub country_id: CountryId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Club {
    pub id: ClubId,
    pub league_id: LeagueId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub club_id: ClubId,
    pub name: String,
    pub number: u32,
}

/// A player as submitted for registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerDraft {
    pub club_id: ClubId,
    pub name: String,
    pub number: u32,
}

impl PlayerDraft {
    pub fn into_player(self, id: PlayerId) -> Player {
        Player { id, club_id: self.club_id, name: self.name, number: self.number }
    }
}

/// Stored tie-break regulation: ordered criterion ids for one competition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Regulation {
    pub league_id: LeagueId,
    pub criterion_ids: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Season {
    pub id: SeasonId,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub current: bool,
}

impl Season {
    /// Inclusive date window check.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }
}

/// A season as submitted for registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonDraft {
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl SeasonDraft {
    /// Season ids are the name with the dash removed: "2023-24" -> 202324.
    pub fn season_id(&self) -> Option<SeasonId> {
        self.name.replace('-', "").parse().ok()
    }

    /// Build the stored season, flagged as current.
    pub fn into_current_season(self) -> Result<Season> {
        let id = self
            .season_id()
            .ok_or_else(|| StatsError::rule("Season name must be in the format of 'yyyy-yy'"))?;
        Ok(Season {
            id,
            name: self.name,
            start_date: self.start_date,
            end_date: self.end_date,
            current: true,
        })
    }
}
