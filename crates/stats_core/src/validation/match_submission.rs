//! Match submission consistency checks.
//!
//! The checks run in a fixed order and stop at the first failure, so a given
//! invalid submission always reports the same violation.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::config::SubmissionRules;
use crate::error::{Result, StatsError};
use crate::models::{Club, GameResultDraft, League, PlayerEntryDraft, PlayerMatchEntry, Season};

/// A result plus both lineups, as received from the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSubmission {
    pub result: GameResultDraft,
    #[serde(default)]
    pub home_entries: Vec<PlayerEntryDraft>,
    #[serde(default)]
    pub away_entries: Vec<PlayerEntryDraft>,
}

impl MatchSubmission {
    /// Shape checks on the raw submission, run before absent entries are
    /// dropped and before any lookup.
    pub fn check_shape(&self) -> Result<()> {
        if self.result.home_club_id == self.result.away_club_id {
            return Err(StatsError::rule("Home club and away club must be different."));
        }
        let mut entries = self.home_entries.iter().chain(&self.away_entries);
        if !entries.all(PlayerEntryDraft::is_consistent_absence) {
            return Err(StatsError::rule(
                "If minutes is 0, stats must be 0, and the player must not be a starter.",
            ));
        }
        Ok(())
    }

    /// Drop squad members who did not play (zero minutes) from both sides.
    pub fn drop_absent(mut self) -> Self {
        self.home_entries.retain(PlayerEntryDraft::played);
        self.away_entries.retain(PlayerEntryDraft::played);
        self
    }
}

/// Everything the checks look at besides the submission itself.
///
/// Lookups that may miss are passed as `Option` so the not-found errors are
/// raised at their place in the check order.
#[derive(Debug, Clone, Copy)]
pub struct MatchContext<'a> {
    pub current_season: &'a Season,
    pub league: Option<&'a League>,
    pub home_club: Option<&'a Club>,
    pub away_club: Option<&'a Club>,
}

/// A submission that passed every check. Holds exactly what gets committed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidatedMatch {
    pub result: GameResultDraft,
    pub home_entries: Vec<PlayerMatchEntry>,
    pub away_entries: Vec<PlayerMatchEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Home,
    Away,
}

impl Side {
    fn title(self) -> &'static str {
        match self {
            Side::Home => "Home",
            Side::Away => "Away",
        }
    }

    fn lower(self) -> &'static str {
        match self {
            Side::Home => "home",
            Side::Away => "away",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MatchSubmissionValidator {
    rules: SubmissionRules,
}

impl MatchSubmissionValidator {
    pub fn new(rules: SubmissionRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &SubmissionRules {
        &self.rules
    }

    /// Check `result` and the roster-resolved entries of both sides.
    pub fn validate(
        &self,
        ctx: MatchContext<'_>,
        result: GameResultDraft,
        home_entries: Vec<PlayerMatchEntry>,
        away_entries: Vec<PlayerMatchEntry>,
    ) -> Result<ValidatedMatch> {
        let home: Vec<PlayerMatchEntry> = home_entries.into_iter().filter(|e| e.played()).collect();
        let away: Vec<PlayerMatchEntry> = away_entries.into_iter().filter(|e| e.played()).collect();

        if !ctx.current_season.contains(result.game_date) {
            return Err(StatsError::rule("Game date must be in the current season period"));
        }

        let league = ctx.league.ok_or_else(|| StatsError::not_found("League not found"))?;
        let home_club = ctx.home_club.ok_or_else(|| StatsError::not_found("Club not found"))?;
        let away_club = ctx.away_club.ok_or_else(|| StatsError::not_found("Club not found"))?;

        check_league_membership(Side::Home, home_club, league)?;
        check_league_membership(Side::Away, away_club, league)?;

        check_roster(Side::Home, &home, home_club)?;
        check_roster(Side::Away, &away, away_club)?;

        check_duplicates(Side::Home, &home)?;
        check_duplicates(Side::Away, &away)?;

        check_score(Side::Home, result.home_score, &home, &away)?;
        check_score(Side::Away, result.away_score, &away, &home)?;

        check_assists(Side::Home, result.home_score, &home)?;
        check_assists(Side::Away, result.away_score, &away)?;

        self.check_starters(Side::Home, &home)?;
        self.check_starters(Side::Away, &away)?;

        self.check_minutes(Side::Home, &home)?;
        self.check_minutes(Side::Away, &away)?;

        log::debug!(
            "submission {} v {} on {} passed ({} + {} entries)",
            result.home_club_id,
            result.away_club_id,
            result.game_date,
            home.len(),
            away.len()
        );

        Ok(ValidatedMatch { result, home_entries: home, away_entries: away })
    }

    fn check_starters(&self, side: Side, entries: &[PlayerMatchEntry]) -> Result<()> {
        let starters = entries.iter().filter(|e| e.starter).count();
        if starters != self.rules.starters_per_side {
            return Err(StatsError::rule(format!(
                "{} starter count must be {}",
                side.title(),
                self.rules.starters_per_side
            )));
        }
        Ok(())
    }

    fn check_minutes(&self, side: Side, entries: &[PlayerMatchEntry]) -> Result<()> {
        let minutes: u32 = entries.iter().map(|e| e.minutes).sum();
        if minutes < self.rules.min_total_minutes || minutes > self.rules.max_total_minutes {
            return Err(StatsError::rule(format!(
                "{} minutes must be between {} and {}",
                side.title(),
                self.rules.min_total_minutes,
                self.rules.max_total_minutes
            )));
        }
        Ok(())
    }
}

fn check_league_membership(side: Side, club: &Club, league: &League) -> Result<()> {
    if club.league_id != league.id {
        return Err(StatsError::rule(format!("{} club is not in the league", side.title())));
    }
    Ok(())
}

fn check_roster(side: Side, entries: &[PlayerMatchEntry], club: &Club) -> Result<()> {
    if entries.iter().any(|e| e.club_id != club.id) {
        return Err(StatsError::rule(format!(
            "{} club and player are not matched",
            side.title()
        )));
    }
    Ok(())
}

fn check_duplicates(side: Side, entries: &[PlayerMatchEntry]) -> Result<()> {
    let mut seen = HashSet::with_capacity(entries.len());
    if !entries.iter().all(|e| seen.insert(e.player_id)) {
        return Err(StatsError::rule(format!("{} club has duplicate players", side.title())));
    }
    Ok(())
}

/// A side's score is its own goals plus the opponent's own goals.
fn check_score(
    side: Side,
    score: u32,
    own: &[PlayerMatchEntry],
    opponent: &[PlayerMatchEntry],
) -> Result<()> {
    let goals: u32 = own.iter().map(|e| e.goals).sum();
    let own_goals: u32 = opponent.iter().map(|e| e.own_goals).sum();
    if score != goals + own_goals {
        let other = match side {
            Side::Home => Side::Away,
            Side::Away => Side::Home,
        };
        return Err(StatsError::rule(format!(
            "There is contradiction in {s} score and {s} goals and {o} own goals",
            s = side.lower(),
            o = other.lower()
        )));
    }
    Ok(())
}

fn check_assists(side: Side, score: u32, entries: &[PlayerMatchEntry]) -> Result<()> {
    let assists: u32 = entries.iter().map(|e| e.assists).sum();
    if assists > score {
        return Err(StatsError::rule(format!(
            "{} assists is more than {} score",
            side.title(),
            side.lower()
        )));
    }
    Ok(())
}
