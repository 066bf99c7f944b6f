//! Player appearance rollups.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{
    Club, ClubId, GameResult, Player, PlayerId, PlayerMatchEntry, Season, SeasonId,
};

/// Summed appearance counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatLine {
    pub games: u32,
    pub starter_games: u32,
    pub substitute_games: u32,
    pub goals: u32,
    pub assists: u32,
    pub minutes: u32,
    pub yellow_cards: u32,
    pub red_cards: u32,
}

impl StatLine {
    pub fn from_entries<'a>(entries: impl IntoIterator<Item = &'a PlayerMatchEntry>) -> Self {
        entries.into_iter().fold(Self::default(), |mut line, e| {
            line.games += 1;
            if e.starter {
                line.starter_games += 1;
            } else {
                line.substitute_games += 1;
            }
            line.goals += e.goals;
            line.assists += e.assists;
            line.minutes += e.minutes;
            line.yellow_cards += e.yellow_cards;
            line.red_cards += e.red_cards;
            line
        })
    }

    pub fn merge(self, other: Self) -> Self {
        Self {
            games: self.games + other.games,
            starter_games: self.starter_games + other.starter_games,
            substitute_games: self.substitute_games + other.substitute_games,
            goals: self.goals + other.goals,
            assists: self.assists + other.assists,
            minutes: self.minutes + other.minutes,
            yellow_cards: self.yellow_cards + other.yellow_cards,
            red_cards: self.red_cards + other.red_cards,
        }
    }
}

/// One player's record for one club in one season.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSeasonStat {
    pub player_id: PlayerId,
    pub season_id: SeasonId,
    pub club_id: ClubId,
    pub player_name: String,
    pub club_name: String,
    pub season_name: String,
    #[serde(flatten)]
    pub line: StatLine,
}

impl PlayerSeasonStat {
    /// Entries of other clubs are ignored; a mid-season transfer yields two stats.
    pub fn from_entries(
        player: &Player,
        club: &Club,
        season: &Season,
        entries: &[PlayerMatchEntry],
    ) -> Self {
        let line = StatLine::from_entries(
            entries.iter().filter(|e| e.player_id == player.id && e.club_id == club.id),
        );
        Self {
            player_id: player.id,
            season_id: season.id,
            club_id: club.id,
            player_name: player.name.clone(),
            club_name: club.name.clone(),
            season_name: season.name.clone(),
            line,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerTotalStat {
    pub player_id: PlayerId,
    pub player_name: String,
    #[serde(flatten)]
    pub line: StatLine,
}

/// Every season stat of a player and their sum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerCareerStat {
    pub season_stats: Vec<PlayerSeasonStat>,
    pub total: PlayerTotalStat,
}

impl PlayerCareerStat {
    pub fn new(player: &Player, season_stats: Vec<PlayerSeasonStat>) -> Self {
        let line = season_stats.iter().fold(StatLine::default(), |acc, s| acc.merge(s.line));
        Self {
            season_stats,
            total: PlayerTotalStat { player_id: player.id, player_name: player.name.clone(), line },
        }
    }
}

/// One appearance as listed in a player's game log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerGameLine {
    pub game_date: NaiveDate,
    pub opponent_club_name: String,
    /// Scoreline from the player's side, e.g. "○2-1".
    pub score: String,
    #[serde(flatten)]
    pub entry: PlayerMatchEntry,
}

impl PlayerGameLine {
    pub fn new(entry: PlayerMatchEntry, result: &GameResult, opponent: &Club) -> Self {
        Self {
            game_date: result.game_date,
            opponent_club_name: opponent.name.clone(),
            score: result.score_label_for(entry.club_id),
            entry,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player() -> Player {
        Player { id: 5, club_id: 1, name: "Keeper".into(), number: 1 }
    }

    fn club(id: u32) -> Club {
        Club { id, league_id: 1, name: format!("Club {}", id) }
    }

    fn season(id: u32, name: &str) -> Season {
        let start = NaiveDate::from_ymd_opt(2023, 7, 1).unwrap();
        Season { id, name: name.into(), start_date: start, end_date: start, current: false }
    }

    fn entry(club_id: u32, starter: bool, goals: u32, minutes: u32) -> PlayerMatchEntry {
        PlayerMatchEntry {
            id: 0,
            game_id: 1,
            player_id: 5,
            club_id,
            number: 1,
            starter,
            goals,
            assists: 1,
            own_goals: 0,
            minutes,
            yellow_cards: 1,
            red_cards: 0,
        }
    }

    #[test]
    fn test_season_stat_counts_one_club() {
        let entries = vec![entry(1, true, 1, 90), entry(1, false, 0, 20), entry(2, true, 3, 90)];
        let stat = PlayerSeasonStat::from_entries(&player(), &club(1), &season(202324, "2023-24"), &entries);

        assert_eq!(stat.line.games, 2);
        assert_eq!(stat.line.starter_games, 1);
        assert_eq!(stat.line.substitute_games, 1);
        assert_eq!(stat.line.goals, 1);
        assert_eq!(stat.line.assists, 2);
        assert_eq!(stat.line.minutes, 110);
        assert_eq!(stat.line.yellow_cards, 2);
        assert_eq!(stat.club_name, "Club 1");
    }

    #[test]
    fn test_career_total_sums_seasons() {
        let entries = vec![entry(1, true, 1, 90), entry(2, true, 3, 90)];
        let stats = vec![
            PlayerSeasonStat::from_entries(&player(), &club(1), &season(202223, "2022-23"), &entries),
            PlayerSeasonStat::from_entries(&player(), &club(2), &season(202324, "2023-24"), &entries),
        ];
        let career = PlayerCareerStat::new(&player(), stats);

        assert_eq!(career.season_stats.len(), 2);
        assert_eq!(career.total.line.games, 2);
        assert_eq!(career.total.line.goals, 4);
        assert_eq!(career.total.line.minutes, 180);
        assert_eq!(career.total.player_name, "Keeper");
    }

    #[test]
    fn test_game_line_labels_from_player_side() {
        let result = crate::models::GameResultDraft {
            home_club_id: 2,
            away_club_id: 1,
            home_score: 3,
            away_score: 1,
            league_id: 1,
            season_id: 202324,
            game_date: NaiveDate::from_ymd_opt(2023, 9, 9).unwrap(),
        }
        .into_result(1);
        let line = PlayerGameLine::new(entry(1, true, 1, 90), &result, &club(2));
        assert_eq!(line.score, "●3-1");
        assert_eq!(line.opponent_club_name, "Club 2");
    }

    #[test]
    fn test_career_without_appearances_is_zero() {
        let career = PlayerCareerStat::new(&player(), Vec::new());
        assert_eq!(career.total.line, StatLine::default());
    }
}
