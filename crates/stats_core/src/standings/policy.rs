//! Tie-break policy: an ordered criterion chain, optionally gated.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use super::aggregate::ClubSeasonAggregate;
use super::criteria::Criterion;
use super::profiles::profile_table;
use crate::config::RankingRules;
use crate::models::{LeagueId, Regulation};

/// One link in the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TieBreakStep {
    pub criterion: Criterion,
    /// Skip the step unless the two clubs met at least this many times.
    #[serde(default)]
    pub min_encounters: Option<u32>,
}

impl TieBreakStep {
    pub fn new(criterion: Criterion) -> Self {
        Self { criterion, min_encounters: None }
    }

    pub fn gated(criterion: Criterion, min_encounters: u32) -> Self {
        Self { criterion, min_encounters: Some(min_encounters) }
    }

    /// Map a regulation criterion id. Ids 2 and 3 are gated; 7 is ungated
    /// head-to-head points.
    pub fn from_regulation_id(id: u8, min_encounters: u32) -> Option<Self> {
        let step = match id {
            1 => Self::new(Criterion::Points),
            2 => Self::gated(Criterion::HeadToHeadPoints, min_encounters),
            3 => Self::gated(Criterion::HeadToHeadGoalDifference, min_encounters),
            4 => Self::new(Criterion::GoalDifference),
            5 => Self::new(Criterion::GoalsFor),
            6 => Self::new(Criterion::HeadToHeadAwayGoals),
            7 => Self::new(Criterion::HeadToHeadPoints),
            _ => return None,
        };
        Some(step)
    }

    pub fn diff(&self, a: &ClubSeasonAggregate, b: &ClubSeasonAggregate) -> i32 {
        if let Some(threshold) = self.min_encounters {
            if a.games_against(b.club_id) < threshold {
                return 0;
            }
        }
        self.criterion.diff(a, b)
    }
}

/// Where a resolved policy came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "name")]
pub enum PolicySource {
    Regulation,
    Profile(String),
    Default(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TieBreakPolicy {
    pub source: PolicySource,
    pub steps: Vec<TieBreakStep>,
}

impl TieBreakPolicy {
    pub fn from_criterion_ids(source: PolicySource, ids: &[u8], rules: &RankingRules) -> Self {
        let steps = ids
            .iter()
            .filter_map(|&id| {
                let step = TieBreakStep::from_regulation_id(id, rules.head_to_head_min_encounters);
                if step.is_none() {
                    log::warn!("ignoring unknown tie-break criterion id {}", id);
                }
                step
            })
            .collect();
        Self { source, steps }
    }

    /// Stored regulation first, then the competition's built-in profile, then
    /// the points-only default.
    pub fn resolve(
        league_id: LeagueId,
        regulation: Option<&Regulation>,
        rules: &RankingRules,
    ) -> Self {
        let policy = if let Some(regulation) = regulation {
            Self::from_criterion_ids(PolicySource::Regulation, &regulation.criterion_ids, rules)
        } else {
            let table = profile_table();
            match table.for_league(league_id) {
                Some(profile) => Self::from_criterion_ids(
                    PolicySource::Profile(profile.name.clone()),
                    &profile.criterion_ids,
                    rules,
                ),
                None => Self::from_criterion_ids(
                    PolicySource::Default(table.default.name.clone()),
                    &table.default.criterion_ids,
                    rules,
                ),
            }
        };
        log::debug!("league {} ranks by {:?}", league_id, policy.source);
        policy
    }

    /// First non-zero step wins; exhausting the chain is a tie.
    pub fn diff(&self, a: &ClubSeasonAggregate, b: &ClubSeasonAggregate) -> i32 {
        self.steps.iter().map(|step| step.diff(a, b)).find(|&d| d != 0).unwrap_or(0)
    }

    pub fn compare(&self, a: &ClubSeasonAggregate, b: &ClubSeasonAggregate) -> Ordering {
        self.diff(a, b).cmp(&0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GameResult;
    use chrono::NaiveDate;

    fn result(day: u32, home: u32, away: u32, hs: u32, aws: u32) -> GameResult {
        GameResult {
            id: day,
            home_club_id: home,
            away_club_id: away,
            home_score: hs,
            away_score: aws,
            winner_club_id: match hs.cmp(&aws) {
                Ordering::Greater => Some(home),
                Ordering::Less => Some(away),
                Ordering::Equal => None,
            },
            league_id: 7,
            season_id: 1,
            game_date: NaiveDate::from_ymd_opt(2023, 10, day).unwrap(),
        }
    }

    fn aggregate(club: u32, all: &[GameResult]) -> ClubSeasonAggregate {
        let own = all.iter().filter(|r| r.involves(club)).cloned().collect();
        ClubSeasonAggregate::from_results(club, 1, own)
    }

    #[test]
    fn test_regulation_takes_precedence() {
        let regulation = Regulation { league_id: 7, criterion_ids: vec![1, 4] };
        let policy = TieBreakPolicy::resolve(7, Some(&regulation), &RankingRules::default());
        assert_eq!(policy.source, PolicySource::Regulation);
        assert_eq!(
            policy.steps,
            vec![TieBreakStep::new(Criterion::Points), TieBreakStep::new(Criterion::GoalDifference)]
        );
    }

    #[test]
    fn test_profile_and_default_resolution() {
        let rules = RankingRules::default();
        let gated = TieBreakPolicy::resolve(7, None, &rules);
        assert_eq!(gated.source, PolicySource::Profile("gated_head_to_head".into()));
        assert_eq!(gated.steps[1], TieBreakStep::gated(Criterion::HeadToHeadPoints, 2));
        assert_eq!(gated.steps[2], TieBreakStep::gated(Criterion::HeadToHeadGoalDifference, 2));

        let epl = TieBreakPolicy::resolve(11, None, &rules);
        let criteria: Vec<Criterion> = epl.steps.iter().map(|s| s.criterion).collect();
        assert_eq!(
            criteria,
            vec![
                Criterion::Points,
                Criterion::GoalDifference,
                Criterion::GoalsFor,
                Criterion::HeadToHeadPoints,
                Criterion::HeadToHeadAwayGoals,
            ]
        );
        assert!(epl.steps.iter().all(|s| s.min_encounters.is_none()));

        let common = TieBreakPolicy::resolve(42, None, &rules);
        assert_eq!(common.source, PolicySource::Default("common".into()));
        assert_eq!(common.steps, vec![TieBreakStep::new(Criterion::Points)]);
    }

    #[test]
    fn test_unknown_ids_are_skipped() {
        let policy = TieBreakPolicy::from_criterion_ids(
            PolicySource::Regulation,
            &[9, 1, 0],
            &RankingRules::default(),
        );
        assert_eq!(policy.steps, vec![TieBreakStep::new(Criterion::Points)]);
    }

    #[test]
    fn test_gate_skips_single_meeting() {
        // Level on points; 1 beat 2 in their only meeting, 2 has better goal difference.
        let all = vec![result(1, 1, 2, 1, 0), result(2, 2, 3, 5, 0), result(3, 1, 3, 0, 1)];
        let a = aggregate(1, &all);
        let b = aggregate(2, &all);
        assert_eq!(a.points, b.points);

        let gated = TieBreakPolicy::resolve(7, None, &RankingRules::default());
        assert_eq!(gated.compare(&a, &b), Ordering::Greater);

        let ungated = TieBreakPolicy::from_criterion_ids(
            PolicySource::Regulation,
            &[1, 7, 4],
            &RankingRules::default(),
        );
        assert_eq!(ungated.compare(&a, &b), Ordering::Less);
    }

    #[test]
    fn test_gate_opens_after_two_meetings() {
        // 1 and 2 split their meetings but 1 wins on head-to-head goal difference.
        let all = vec![
            result(1, 1, 2, 4, 0),
            result(2, 2, 1, 1, 0),
            result(3, 2, 3, 9, 0),
            result(4, 1, 3, 1, 0),
        ];
        let a = aggregate(1, &all);
        let b = aggregate(2, &all);
        assert_eq!(a.points, b.points);
        assert!(b.goal_difference > a.goal_difference);

        let gated = TieBreakPolicy::resolve(7, None, &RankingRules::default());
        assert_eq!(gated.compare(&a, &b), Ordering::Less);

        let epl = TieBreakPolicy::resolve(11, None, &RankingRules::default());
        assert_eq!(epl.compare(&a, &b), Ordering::Greater);
    }

    #[test]
    fn test_exhausted_chain_is_tie() {
        let all = vec![result(1, 1, 3, 1, 1), result(2, 2, 3, 1, 1)];
        let a = aggregate(1, &all);
        let b = aggregate(2, &all);
        let policy = TieBreakPolicy::resolve(11, None, &RankingRules::default());
        assert_eq!(policy.compare(&a, &b), Ordering::Equal);
    }
}
