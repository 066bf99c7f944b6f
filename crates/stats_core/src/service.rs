//! Service facade
//!
//! Each operation fetches its inputs from the [`DataStore`], hands them to the
//! pure engine components, and wraps multi-row writes in one transaction.

use crate::config::StatsConfig;
use crate::error::{Result, StatsError};
use crate::models::{
    Club, ClubId, GameId, GameResult, League, LeagueId, Player, PlayerDraft, PlayerEntryDraft,
    PlayerId, PlayerMatchEntry, Regulation, Season, SeasonDraft, SeasonId,
};
use crate::standings::{ClubResults, Standing, StandingsComputer};
use crate::stats::{GameSheet, PlayerCareerStat, PlayerGameLine, PlayerSeasonStat, SeasonGameResult};
use crate::store::DataStore;
use crate::validation::{
    MatchContext, MatchSubmission, MatchSubmissionValidator, SeasonWindowValidator, ValidatedMatch,
};

/// A registered match: the stored result and the committed entries per side.
pub type CommittedMatch = GameSheet;

pub struct StatsService<S: DataStore> {
    store: S,
    config: StatsConfig,
    standings: StandingsComputer,
    match_validator: MatchSubmissionValidator,
    season_validator: SeasonWindowValidator,
}

impl<S: DataStore> StatsService<S> {
    pub fn new(store: S) -> Self {
        Self::with_config(store, StatsConfig::default())
    }

    pub fn with_config(store: S, config: StatsConfig) -> Self {
        Self {
            standings: StandingsComputer::new(config.ranking.clone()),
            match_validator: MatchSubmissionValidator::new(config.submission.clone()),
            season_validator: SeasonWindowValidator::new(config.season.clone()),
            store,
            config,
        }
    }

    pub fn config(&self) -> &StatsConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    // ========================================================================
    // Lookups
    // ========================================================================

    pub fn league(&self, id: LeagueId) -> Result<League> {
        self.store.find_league(id).ok_or_else(|| StatsError::not_found("League not found"))
    }

    pub fn club(&self, id: ClubId) -> Result<Club> {
        self.store.find_club(id).ok_or_else(|| StatsError::not_found("Club not found"))
    }

    pub fn season(&self, id: SeasonId) -> Result<Season> {
        self.store.find_season(id).ok_or_else(|| StatsError::not_found("Season not found"))
    }

    pub fn current_season(&self) -> Result<Season> {
        self.store
            .current_season()
            .ok_or_else(|| StatsError::not_found("Current season not found"))
    }

    pub fn player(&self, id: PlayerId) -> Result<Player> {
        self.store.find_player(id).ok_or_else(|| StatsError::not_found("Player not found"))
    }

    pub fn game_result(&self, id: GameId) -> Result<GameResult> {
        self.store.game_result(id).ok_or_else(|| StatsError::not_found("Game result not found"))
    }

    // ========================================================================
    // Standings
    // ========================================================================

    pub fn compute_standings(&self, league_id: LeagueId, season_id: SeasonId) -> Result<Standing> {
        let league = self.league(league_id)?;
        let season = self.season(season_id)?;

        let clubs = self
            .store
            .clubs_by_league(league_id)
            .into_iter()
            .map(|club| {
                let results = self.store.results_by_club_and_season(club.id, season_id);
                ClubResults { club, results }
            })
            .collect();
        let regulation = self.store.regulation_by_league(league_id);

        Ok(self.standings.compute(&league, &season, clubs, regulation.as_ref()))
    }

    pub fn set_regulation(&mut self, regulation: Regulation) -> Result<()> {
        self.league(regulation.league_id)?;
        self.store.upsert_regulation(regulation)
    }

    // ========================================================================
    // Registration
    // ========================================================================

    /// Validate a result with both lineups and commit it all-or-nothing.
    pub fn validate_and_register_match(
        &mut self,
        submission: MatchSubmission,
    ) -> Result<CommittedMatch> {
        submission.check_shape()?;
        let MatchSubmission { result, home_entries, away_entries } = submission.drop_absent();

        let home = self.resolve_entries(home_entries)?;
        let away = self.resolve_entries(away_entries)?;

        let current = self.current_season()?;
        let league = self.store.find_league(result.league_id);
        let home_club = self.store.find_club(result.home_club_id);
        let away_club = self.store.find_club(result.away_club_id);
        let ctx = MatchContext {
            current_season: &current,
            league: league.as_ref(),
            home_club: home_club.as_ref(),
            away_club: away_club.as_ref(),
        };

        let validated = self.match_validator.validate(ctx, result, home, away)?;
        let committed = self.store.transaction(|store| commit_match(store, validated))?;

        log::info!(
            "registered game {} ({} v {}, {}-{}) with {} entries",
            committed.result.id,
            committed.result.home_club_id,
            committed.result.away_club_id,
            committed.result.home_score,
            committed.result.away_score,
            committed.home_entries.len() + committed.away_entries.len()
        );
        Ok(committed)
    }

    /// Attach roster club and shirt number to each entry.
    fn resolve_entries(&self, drafts: Vec<PlayerEntryDraft>) -> Result<Vec<PlayerMatchEntry>> {
        drafts
            .into_iter()
            .map(|draft| {
                let player = self.player(draft.player_id)?;
                Ok(draft.resolve(&player))
            })
            .collect()
    }

    /// Validate a season and make it the only current one.
    pub fn validate_and_register_season(&mut self, draft: SeasonDraft) -> Result<Season> {
        let existing = self.store.seasons();
        self.season_validator.validate(&draft, &existing)?;
        let season = draft.into_current_season()?;

        let season = self.store.transaction(|store| {
            store.clear_current_season_flag()?;
            store.insert_season(season)
        })?;

        log::info!("registered season {} as current", season.name);
        Ok(season)
    }

    // ========================================================================
    // Roster
    // ========================================================================

    pub fn register_player(&mut self, draft: PlayerDraft) -> Result<Player> {
        self.club(draft.club_id)?;
        if self.number_taken(draft.club_id, draft.number, None) {
            return Err(StatsError::rule("Player number is already used in Club"));
        }
        let player = self.store.insert_player(draft)?;
        log::info!("registered player {} #{} at club {}", player.id, player.number, player.club_id);
        Ok(player)
    }

    pub fn update_player_number_and_name(
        &mut self,
        id: PlayerId,
        number: u32,
        name: &str,
    ) -> Result<Player> {
        let player = self.player(id)?;
        if self.number_taken(player.club_id, number, Some(id)) {
            return Err(StatsError::rule("Player number is already used"));
        }
        if player.number == number && player.name == name {
            return Err(StatsError::conflict("There is no change"));
        }

        let updated = Player { number, name: name.to_string(), ..player };
        self.store.update_player(updated.clone())?;
        Ok(updated)
    }

    /// Move a player to another club under a new shirt number.
    pub fn transfer_player(&mut self, id: PlayerId, club_id: ClubId, number: u32) -> Result<Player> {
        let player = self.player(id)?;
        if player.club_id == club_id {
            return Err(StatsError::conflict("Player club is not changed"));
        }
        self.club(club_id)?;
        if self.number_taken(club_id, number, None) {
            return Err(StatsError::rule("Player number is already used"));
        }

        let updated = Player { club_id, number, ..player };
        self.store.update_player(updated.clone())?;
        log::info!("transferred player {} to club {}", id, club_id);
        Ok(updated)
    }

    pub fn update_club_league(&mut self, club_id: ClubId, league_id: LeagueId) -> Result<Club> {
        let club = self.club(club_id)?;
        if club.league_id == league_id {
            return Err(StatsError::conflict("There is no change"));
        }
        self.league(league_id)?;

        let updated = Club { league_id, ..club };
        self.store.update_club(updated.clone())?;
        Ok(updated)
    }

    fn number_taken(&self, club_id: ClubId, number: u32, except: Option<PlayerId>) -> bool {
        self.store
            .players_by_club(club_id)
            .iter()
            .any(|p| p.number == number && Some(p.id) != except)
    }

    // ========================================================================
    // Listings
    // ========================================================================

    pub fn season_game_results(
        &self,
        league_id: LeagueId,
        season_id: SeasonId,
    ) -> Result<SeasonGameResult> {
        self.league(league_id)?;
        self.season(season_id)?;
        let results = self.store.results_by_league_and_season(league_id, season_id);
        Ok(SeasonGameResult::from_results(league_id, season_id, results))
    }

    pub fn game_result_with_entries(&self, game_id: GameId) -> Result<GameSheet> {
        let result = self.game_result(game_id)?;
        let entries = self.store.entries_by_game(game_id);
        Ok(GameSheet::new(result, entries))
    }

    /// A player's appearances in one season, paired with their results.
    fn season_appearances(
        &self,
        player_id: PlayerId,
        season_id: SeasonId,
    ) -> Vec<(PlayerMatchEntry, GameResult)> {
        self.store
            .entries_by_player(player_id)
            .into_iter()
            .filter_map(|entry| {
                let result = self.store.game_result(entry.game_id)?;
                (result.season_id == season_id).then_some((entry, result))
            })
            .collect()
    }

    /// One stat per club the player appeared for in the season, in order of
    /// first appearance.
    pub fn player_season_stats(
        &self,
        player_id: PlayerId,
        season_id: SeasonId,
    ) -> Result<Vec<PlayerSeasonStat>> {
        let player = self.player(player_id)?;
        let season = self.season(season_id)?;
        let entries: Vec<PlayerMatchEntry> = self
            .season_appearances(player_id, season_id)
            .into_iter()
            .map(|(entry, _)| entry)
            .collect();

        let mut club_ids: Vec<ClubId> = Vec::new();
        for entry in &entries {
            if !club_ids.contains(&entry.club_id) {
                club_ids.push(entry.club_id);
            }
        }

        club_ids
            .into_iter()
            .map(|club_id| {
                let club = self.club(club_id)?;
                Ok(PlayerSeasonStat::from_entries(&player, &club, &season, &entries))
            })
            .collect()
    }

    /// Season stats of everyone currently on the club's roster.
    pub fn club_player_season_stats(
        &self,
        club_id: ClubId,
        season_id: SeasonId,
    ) -> Result<Vec<PlayerSeasonStat>> {
        let club = self.club(club_id)?;
        let season = self.season(season_id)?;
        Ok(self
            .store
            .players_by_club(club_id)
            .iter()
            .map(|player| {
                let entries: Vec<PlayerMatchEntry> = self
                    .season_appearances(player.id, season_id)
                    .into_iter()
                    .map(|(entry, _)| entry)
                    .collect();
                PlayerSeasonStat::from_entries(player, &club, &season, &entries)
            })
            .collect())
    }

    pub fn player_career_stat(&self, player_id: PlayerId) -> Result<PlayerCareerStat> {
        let player = self.player(player_id)?;
        let mut season_stats = Vec::new();
        for season in self.store.seasons() {
            season_stats.extend(self.player_season_stats(player_id, season.id)?);
        }
        Ok(PlayerCareerStat::new(&player, season_stats))
    }

    pub fn player_game_log(
        &self,
        player_id: PlayerId,
        season_id: SeasonId,
    ) -> Result<Vec<PlayerGameLine>> {
        self.player(player_id)?;
        self.season(season_id)?;
        self.season_appearances(player_id, season_id)
            .into_iter()
            .map(|(entry, result)| {
                let opponent_id = result
                    .opponent_of(entry.club_id)
                    .ok_or_else(|| StatsError::not_found("Club not found"))?;
                let opponent = self.club(opponent_id)?;
                Ok(PlayerGameLine::new(entry, &result, &opponent))
            })
            .collect()
    }
}

/// Insert the result, then every entry under the new game id.
fn commit_match<S: DataStore>(store: &mut S, validated: ValidatedMatch) -> Result<CommittedMatch> {
    let result = store.insert_game_result(validated.result)?;

    let mut insert_side = |entries: Vec<PlayerMatchEntry>| -> Result<Vec<PlayerMatchEntry>> {
        entries
            .into_iter()
            .map(|entry| store.insert_player_match_entry(PlayerMatchEntry { game_id: result.id, ..entry }))
            .collect()
    };
    let home_entries = insert_side(validated.home_entries)?;
    let away_entries = insert_side(validated.away_entries)?;

    Ok(GameSheet { result, home_entries, away_entries })
}
