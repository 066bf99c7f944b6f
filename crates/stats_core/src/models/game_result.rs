use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{ClubId, GameId, LeagueId, SeasonId};

/// A committed match result.
///
/// `winner_club_id` is `None` exactly when the scores are level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    pub id: GameId,
    pub home_club_id: ClubId,
    pub away_club_id: ClubId,
    pub home_score: u32,
    pub away_score: u32,
    pub winner_club_id: Option<ClubId>,
    pub league_id: LeagueId,
    pub season_id: SeasonId,
    pub game_date: NaiveDate,
}

/// Side of the pitch a club played on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Venue {
    Home,
    Away,
}

impl GameResult {
    pub fn is_draw(&self) -> bool {
        self.winner_club_id.is_none()
    }

    pub fn venue_of(&self, club_id: ClubId) -> Option<Venue> {
        if self.home_club_id == club_id {
            Some(Venue::Home)
        } else if self.away_club_id == club_id {
            Some(Venue::Away)
        } else {
            None
        }
    }

    pub fn involves(&self, club_id: ClubId) -> bool {
        self.venue_of(club_id).is_some()
    }

    /// Goals scored by `club_id`, zero if it did not play.
    pub fn goals_for(&self, club_id: ClubId) -> u32 {
        match self.venue_of(club_id) {
            Some(Venue::Home) => self.home_score,
            Some(Venue::Away) => self.away_score,
            None => 0,
        }
    }

    /// Goals conceded by `club_id`, zero if it did not play.
    pub fn goals_against(&self, club_id: ClubId) -> u32 {
        match self.venue_of(club_id) {
            Some(Venue::Home) => self.away_score,
            Some(Venue::Away) => self.home_score,
            None => 0,
        }
    }

    /// The opponent of `club_id` in this fixture.
    pub fn opponent_of(&self, club_id: ClubId) -> Option<ClubId> {
        match self.venue_of(club_id) {
            Some(Venue::Home) => Some(self.away_club_id),
            Some(Venue::Away) => Some(self.home_club_id),
            None => None,
        }
    }

    /// Scoreline from `club_id`'s point of view, e.g. "○2-1" / "△1-1" / "●0-3".
    pub fn score_label_for(&self, club_id: ClubId) -> String {
        let score = format!("{}-{}", self.home_score, self.away_score);
        match self.winner_club_id {
            None => format!("△{}", score),
            Some(winner) if winner == club_id => format!("○{}", score),
            Some(_) => format!("●{}", score),
        }
    }
}

/// A result as submitted, before an id is assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResultDraft {
    pub home_club_id: ClubId,
    pub away_club_id: ClubId,
    pub home_score: u32,
    pub away_score: u32,
    pub league_id: LeagueId,
    pub season_id: SeasonId,
    pub game_date: NaiveDate,
}

impl GameResultDraft {
    /// Winner derived from the scoreline.
    pub fn winner_club_id(&self) -> Option<ClubId> {
        if self.home_score > self.away_score {
            Some(self.home_club_id)
        } else if self.away_score > self.home_score {
            Some(self.away_club_id)
        } else {
            None
        }
    }

    pub fn into_result(self, id: GameId) -> GameResult {
        let winner_club_id = self.winner_club_id();
        GameResult {
            id,
            home_club_id: self.home_club_id,
            away_club_id: self.away_club_id,
            home_score: self.home_score,
            away_score: self.away_score,
            winner_club_id,
            league_id: self.league_id,
            season_id: self.season_id,
            game_date: self.game_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(home_score: u32, away_score: u32) -> GameResultDraft {
        GameResultDraft {
            home_club_id: 1,
            away_club_id: 2,
            home_score,
            away_score,
            league_id: 1,
            season_id: 202324,
            game_date: NaiveDate::from_ymd_opt(2023, 8, 12).unwrap(),
        }
    }

    #[test]
    fn test_winner_follows_score() {
        assert_eq!(draft(2, 1).winner_club_id(), Some(1));
        assert_eq!(draft(0, 3).winner_club_id(), Some(2));
        assert_eq!(draft(2, 2).winner_club_id(), None);
    }

    #[test]
    fn test_goals_from_each_side() {
        let result = draft(3, 1).into_result(10);
        assert_eq!(result.id, 10);
        assert_eq!(result.goals_for(1), 3);
        assert_eq!(result.goals_against(1), 1);
        assert_eq!(result.goals_for(2), 1);
        assert_eq!(result.goals_against(2), 3);
        assert_eq!(result.goals_for(99), 0);
        assert_eq!(result.opponent_of(2), Some(1));
        assert!(!result.involves(99));
    }

    #[test]
    fn test_score_label() {
        let result = draft(2, 1).into_result(1);
        assert_eq!(result.score_label_for(1), "○2-1");
        assert_eq!(result.score_label_for(2), "●2-1");
        assert_eq!(draft(1, 1).into_result(2).score_label_for(1), "△1-1");
    }
}
