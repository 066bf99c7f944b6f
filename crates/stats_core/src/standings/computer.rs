//! Standings table assembly.

use serde::Serialize;
use std::cmp::Ordering;

use super::aggregate::ClubSeasonAggregate;
use super::policy::{PolicySource, TieBreakPolicy};
use crate::config::RankingRules;
use crate::models::{Club, ClubId, GameResult, League, LeagueId, Regulation, Season, SeasonId};

/// A ranked row. `position` is the 1-based row index; tied clubs keep distinct
/// positions in input order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StandingRow {
    pub position: u32,
    pub club_name: String,
    #[serde(flatten)]
    pub aggregate: ClubSeasonAggregate,
}

/// A competition table for one season. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Standing {
    league_id: LeagueId,
    season_id: SeasonId,
    league_name: String,
    season_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    policy: Option<PolicySource>,
    rows: Vec<StandingRow>,
}

impl Standing {
    pub fn league_id(&self) -> LeagueId {
        self.league_id
    }

    pub fn season_id(&self) -> SeasonId {
        self.season_id
    }

    pub fn league_name(&self) -> &str {
        &self.league_name
    }

    pub fn season_name(&self) -> &str {
        &self.season_name
    }

    /// Source of the tie-break policy; `None` for an empty table.
    pub fn policy(&self) -> Option<&PolicySource> {
        self.policy.as_ref()
    }

    pub fn rows(&self) -> &[StandingRow] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row_for(&self, club_id: ClubId) -> Option<&StandingRow> {
        self.rows.iter().find(|row| row.aggregate.club_id == club_id)
    }

    pub fn position_of(&self, club_id: ClubId) -> Option<u32> {
        self.row_for(club_id).map(|row| row.position)
    }
}

/// One club of the competition with every result it played that season.
#[derive(Debug, Clone)]
pub struct ClubResults {
    pub club: Club,
    pub results: Vec<GameResult>,
}

#[derive(Debug, Clone, Default)]
pub struct StandingsComputer {
    rules: RankingRules,
}

impl StandingsComputer {
    pub fn new(rules: RankingRules) -> Self {
        Self { rules }
    }

    pub fn compute(
        &self,
        league: &League,
        season: &Season,
        clubs: Vec<ClubResults>,
        regulation: Option<&Regulation>,
    ) -> Standing {
        let mut entries: Vec<(String, ClubSeasonAggregate)> = clubs
            .into_iter()
            .map(|c| {
                let aggregate = ClubSeasonAggregate::from_results(c.club.id, season.id, c.results);
                (c.club.name, aggregate)
            })
            .collect();

        let mut standing = Standing {
            league_id: league.id,
            season_id: season.id,
            league_name: league.name.clone(),
            season_name: season.name.clone(),
            policy: None,
            rows: Vec::new(),
        };

        // No fixtures played yet: no rows at all, not a zero-filled table.
        if entries.iter().all(|(_, agg)| agg.games_played == 0) {
            log::debug!("league {} season {}: no games played", league.id, season.id);
            return standing;
        }

        let policy = TieBreakPolicy::resolve(league.id, regulation, &self.rules);
        stable_insertion_sort(&mut entries, |a, b| policy.compare(&a.1, &b.1));

        standing.policy = Some(policy.source);
        standing.rows = entries
            .into_iter()
            .enumerate()
            .map(|(index, (club_name, aggregate))| StandingRow {
                position: index as u32 + 1,
                club_name,
                aggregate,
            })
            .collect();
        standing
    }
}

/// Head-to-head steps need not be transitive, so the sort must not assume a
/// total order. Equal elements keep their input order.
fn stable_insertion_sort<T, F>(items: &mut [T], mut compare: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    for i in 1..items.len() {
        let mut j = i;
        while j > 0 && compare(&items[j - 1], &items[j]) == Ordering::Greater {
            items.swap(j - 1, j);
            j -= 1;
        }
    }
}
