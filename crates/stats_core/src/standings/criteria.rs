//! Pairwise ranking criteria.
//!
//! Every criterion returns `diff(a, b)`: negative when `a` ranks ahead of `b`,
//! positive when `b` does, zero when the criterion cannot separate them.

use serde::{Deserialize, Serialize};

use super::aggregate::ClubSeasonAggregate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
    /// Total points.
    Points,
    /// Points taken in mutual fixtures.
    #[serde(rename = "points_against")]
    HeadToHeadPoints,
    /// Goal difference in mutual fixtures.
    #[serde(rename = "goal_differences_against")]
    HeadToHeadGoalDifference,
    /// Goal difference over all matches.
    #[serde(rename = "goal_differences")]
    GoalDifference,
    /// Goals scored over all matches.
    #[serde(rename = "goals")]
    GoalsFor,
    /// Goals scored away in mutual fixtures.
    #[serde(rename = "away_goals_against")]
    HeadToHeadAwayGoals,
}

impl Criterion {
    pub fn diff(self, a: &ClubSeasonAggregate, b: &ClubSeasonAggregate) -> i32 {
        match self {
            Criterion::Points => b.points as i32 - a.points as i32,
            Criterion::HeadToHeadPoints => {
                b.points_against(a.club_id) as i32 - a.points_against(b.club_id) as i32
            }
            Criterion::HeadToHeadGoalDifference => {
                b.goal_difference_against(a.club_id) - a.goal_difference_against(b.club_id)
            }
            Criterion::GoalDifference => b.goal_difference - a.goal_difference,
            Criterion::GoalsFor => b.goals_for as i32 - a.goals_for as i32,
            Criterion::HeadToHeadAwayGoals => {
                b.away_goals_against(a.club_id) as i32 - a.away_goals_against(b.club_id) as i32
            }
        }
    }

    pub fn is_head_to_head(self) -> bool {
        matches!(
            self,
            Criterion::HeadToHeadPoints
                | Criterion::HeadToHeadGoalDifference
                | Criterion::HeadToHeadAwayGoals
        )
    }

    pub fn name(self) -> &'static str {
        match self {
            Criterion::Points => "points",
            Criterion::HeadToHeadPoints => "points_against",
            Criterion::HeadToHeadGoalDifference => "goal_differences_against",
            Criterion::GoalDifference => "goal_differences",
            Criterion::GoalsFor => "goals",
            Criterion::HeadToHeadAwayGoals => "away_goals_against",
        }
    }
}
