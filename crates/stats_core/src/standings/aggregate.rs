//! Per-club season summaries folded from raw results.

use serde::{Deserialize, Serialize};

use crate::models::{ClubId, GameResult, SeasonId, Venue};

pub const POINTS_FOR_WIN: u32 = 3;
pub const POINTS_FOR_DRAW: u32 = 1;

/// A club's record over one season.
///
/// The raw results are kept for head-to-head lookups. Rank is not stored here;
/// it is the row index of a [`super::Standing`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClubSeasonAggregate {
    pub club_id: ClubId,
    pub season_id: SeasonId,
    #[serde(skip_serializing, default)]
    pub results: Vec<GameResult>,
    pub games_played: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub points: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub goal_difference: i32,
}

impl ClubSeasonAggregate {
    /// Fold `results` (every fixture `club_id` played that season).
    pub fn from_results(club_id: ClubId, season_id: SeasonId, results: Vec<GameResult>) -> Self {
        let games_played = results.len() as u32;
        let wins = results.iter().filter(|r| r.winner_club_id == Some(club_id)).count() as u32;
        let draws = results.iter().filter(|r| r.is_draw()).count() as u32;
        let losses = games_played - wins - draws;
        let goals_for: u32 = results.iter().map(|r| r.goals_for(club_id)).sum();
        let goals_against: u32 = results.iter().map(|r| r.goals_against(club_id)).sum();

        Self {
            club_id,
            season_id,
            results,
            games_played,
            wins,
            draws,
            losses,
            points: wins * POINTS_FOR_WIN + draws * POINTS_FOR_DRAW,
            goals_for,
            goals_against,
            goal_difference: goals_for as i32 - goals_against as i32,
        }
    }

    fn results_against(&self, opponent: ClubId) -> impl Iterator<Item = &GameResult> + '_ {
        self.results.iter().filter(move |r| r.opponent_of(self.club_id) == Some(opponent))
    }

    /// Number of meetings with `opponent` this season.
    pub fn games_against(&self, opponent: ClubId) -> u32 {
        self.results_against(opponent).count() as u32
    }

    /// Points taken off `opponent` in mutual fixtures.
    pub fn points_against(&self, opponent: ClubId) -> u32 {
        self.results_against(opponent)
            .map(|r| match r.winner_club_id {
                None => POINTS_FOR_DRAW,
                Some(winner) if winner == self.club_id => POINTS_FOR_WIN,
                Some(_) => 0,
            })
            .sum()
    }

    /// Goal difference in mutual fixtures with `opponent`.
    pub fn goal_difference_against(&self, opponent: ClubId) -> i32 {
        self.results_against(opponent)
            .map(|r| r.goals_for(self.club_id) as i32 - r.goals_against(self.club_id) as i32)
            .sum()
    }

    /// Goals scored while visiting `opponent`.
    pub fn away_goals_against(&self, opponent: ClubId) -> u32 {
        self.results_against(opponent)
            .filter(|r| r.venue_of(self.club_id) == Some(Venue::Away))
            .map(|r| r.away_score)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use proptest::prelude::*;

    fn result(id: u32, home: u32, away: u32, home_score: u32, away_score: u32) -> GameResult {
        let winner = if home_score > away_score {
            Some(home)
        } else if away_score > home_score {
            Some(away)
        } else {
            None
        };
        GameResult {
            id,
            home_club_id: home,
            away_club_id: away,
            home_score,
            away_score,
            winner_club_id: winner,
            league_id: 1,
            season_id: 202324,
            game_date: NaiveDate::from_ymd_opt(2023, 8, 1).unwrap() + chrono::Days::new(id as u64),
        }
    }

    #[test]
    fn test_empty_results_yield_zero_aggregate() {
        let agg = ClubSeasonAggregate::from_results(1, 202324, Vec::new());
        assert_eq!(agg.games_played, 0);
        assert_eq!(agg.points, 0);
        assert_eq!(agg.goal_difference, 0);
        assert!(agg.results.is_empty());
    }

    #[test]
    fn test_win_draw_loss_fold() {
        let results = vec![result(1, 1, 2, 2, 1), result(2, 3, 1, 2, 2), result(3, 1, 4, 0, 3)];
        let agg = ClubSeasonAggregate::from_results(1, 202324, results);

        assert_eq!(agg.games_played, 3);
        assert_eq!((agg.wins, agg.draws, agg.losses), (1, 1, 1));
        assert_eq!(agg.points, 4);
        assert_eq!(agg.goals_for, 4);
        assert_eq!(agg.goals_against, 6);
        assert_eq!(agg.goal_difference, -2);
    }

    #[test]
    fn test_head_to_head_helpers() {
        // Club 1 beats 2 at home 2-1, then draws 2-2 away; also plays club 3.
        let results = vec![result(1, 1, 2, 2, 1), result(2, 2, 1, 2, 2), result(3, 1, 3, 5, 0)];
        let agg = ClubSeasonAggregate::from_results(1, 202324, results);

        assert_eq!(agg.games_against(2), 2);
        assert_eq!(agg.games_against(3), 1);
        assert_eq!(agg.games_against(4), 0);
        assert_eq!(agg.points_against(2), 4);
        assert_eq!(agg.goal_difference_against(2), 1);
        assert_eq!(agg.away_goals_against(2), 2);
        assert_eq!(agg.away_goals_against(3), 0);
    }

    fn results_strategy() -> impl Strategy<Value = Vec<GameResult>> {
        prop::collection::vec((any::<bool>(), 2u32..6, 0u32..6, 0u32..6), 0..20).prop_map(|rows| {
            rows.into_iter()
                .enumerate()
                .map(|(i, (at_home, opponent, gf, ga))| {
                    if at_home {
                        result(i as u32, 1, opponent, gf, ga)
                    } else {
                        result(i as u32, opponent, 1, ga, gf)
                    }
                })
                .collect()
        })
    }

    proptest! {
        #[test]
        fn prop_aggregate_identities(results in results_strategy()) {
            let count = results.len() as u32;
            let agg = ClubSeasonAggregate::from_results(1, 202324, results);

            prop_assert_eq!(agg.points, 3 * agg.wins + agg.draws);
            prop_assert_eq!(agg.goal_difference, agg.goals_for as i32 - agg.goals_against as i32);
            prop_assert_eq!(agg.games_played, agg.wins + agg.draws + agg.losses);
            prop_assert_eq!(agg.games_played, count);
        }
    }
}
