//! Result listings: a season's fixtures by date and single-game sheets.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::{GameResult, LeagueId, PlayerMatchEntry, SeasonId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayGameResult {
    pub game_date: NaiveDate,
    pub results: Vec<GameResult>,
}

/// A competition season's results grouped by match date, earliest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonGameResult {
    pub league_id: LeagueId,
    pub season_id: SeasonId,
    pub days: Vec<DayGameResult>,
}

impl SeasonGameResult {
    /// Results sharing a date keep their input order.
    pub fn from_results(league_id: LeagueId, season_id: SeasonId, results: Vec<GameResult>) -> Self {
        let mut by_date: BTreeMap<NaiveDate, Vec<GameResult>> = BTreeMap::new();
        for result in results {
            by_date.entry(result.game_date).or_default().push(result);
        }
        let days = by_date
            .into_iter()
            .map(|(game_date, results)| DayGameResult { game_date, results })
            .collect();
        Self { league_id, season_id, days }
    }

    pub fn game_dates(&self) -> Vec<NaiveDate> {
        self.days.iter().map(|d| d.game_date).collect()
    }
}

/// A committed result with its entries split by side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSheet {
    pub result: GameResult,
    pub home_entries: Vec<PlayerMatchEntry>,
    pub away_entries: Vec<PlayerMatchEntry>,
}

impl GameSheet {
    /// Entries belonging to neither club are dropped.
    pub fn new(result: GameResult, entries: Vec<PlayerMatchEntry>) -> Self {
        let (home_entries, rest): (Vec<_>, Vec<_>) =
            entries.into_iter().partition(|e| e.club_id == result.home_club_id);
        let away_entries = rest.into_iter().filter(|e| e.club_id == result.away_club_id).collect();
        Self { result, home_entries, away_entries }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GameResultDraft;

    fn result(id: u32, day: u32) -> GameResult {
        GameResultDraft {
            home_club_id: id,
            away_club_id: id + 10,
            home_score: 1,
            away_score: 0,
            league_id: 1,
            season_id: 202324,
            game_date: NaiveDate::from_ymd_opt(2023, 8, day).unwrap(),
        }
        .into_result(id)
    }

    #[test]
    fn test_groups_by_date_ascending() {
        let season = SeasonGameResult::from_results(
            1,
            202324,
            vec![result(1, 19), result(2, 12), result(3, 19), result(4, 12)],
        );
        assert_eq!(season.days.len(), 2);
        assert_eq!(season.days[0].game_date, NaiveDate::from_ymd_opt(2023, 8, 12).unwrap());
        let ids: Vec<u32> = season.days[0].results.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2, 4]);
        let ids: Vec<u32> = season.days[1].results.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_empty_season_has_no_days() {
        let season = SeasonGameResult::from_results(1, 202324, Vec::new());
        assert!(season.days.is_empty());
        assert!(season.game_dates().is_empty());
    }
}
