use serde::{Deserialize, Serialize};

use super::DataStore;
use crate::error::{Result, StatsError};
use crate::models::{
    Club, ClubId, Country, GameId, GameResult, GameResultDraft, League, LeagueId, Player,
    PlayerDraft, PlayerId, PlayerMatchEntry, Regulation, Season, SeasonId,
};

/// Vec-backed store. Serializes to the dataset format the CLI reads and writes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InMemoryStore {
    pub countries: Vec<Country>,
    pub leagues: Vec<League>,
    pub clubs: Vec<Club>,
    pub players: Vec<Player>,
    pub seasons: Vec<Season>,
    pub regulations: Vec<Regulation>,
    pub game_results: Vec<GameResult>,
    pub player_entries: Vec<PlayerMatchEntry>,
}

fn next_id(ids: impl Iterator<Item = u32>) -> u32 {
    ids.max().unwrap_or(0) + 1
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    // Fixture builders; ids are taken as given.

    pub fn with_country(mut self, country: Country) -> Self {
        self.countries.push(country);
        self
    }

    pub fn with_league(mut self, league: League) -> Self {
        self.leagues.push(league);
        self
    }

    pub fn with_club(mut self, club: Club) -> Self {
        self.clubs.push(club);
        self
    }

    pub fn with_player(mut self, player: Player) -> Self {
        self.players.push(player);
        self
    }

    pub fn with_season(mut self, season: Season) -> Self {
        self.seasons.push(season);
        self
    }

    pub fn with_regulation(mut self, regulation: Regulation) -> Self {
        self.regulations.push(regulation);
        self
    }
}

impl DataStore for InMemoryStore {
    fn results_by_club_and_season(&self, club_id: ClubId, season_id: SeasonId) -> Vec<GameResult> {
        self.game_results
            .iter()
            .filter(|r| r.season_id == season_id && r.involves(club_id))
            .cloned()
            .collect()
    }

    fn results_by_league_and_season(
        &self,
        league_id: LeagueId,
        season_id: SeasonId,
    ) -> Vec<GameResult> {
        self.game_results
            .iter()
            .filter(|r| r.league_id == league_id && r.season_id == season_id)
            .cloned()
            .collect()
    }

    fn clubs_by_league(&self, league_id: LeagueId) -> Vec<Club> {
        self.clubs.iter().filter(|c| c.league_id == league_id).cloned().collect()
    }

    fn regulation_by_league(&self, league_id: LeagueId) -> Option<Regulation> {
        self.regulations.iter().find(|r| r.league_id == league_id).cloned()
    }

    fn seasons(&self) -> Vec<Season> {
        self.seasons.clone()
    }

    fn current_season(&self) -> Option<Season> {
        self.seasons.iter().find(|s| s.current).cloned()
    }

    fn find_league(&self, id: LeagueId) -> Option<League> {
        self.leagues.iter().find(|l| l.id == id).cloned()
    }

    fn find_club(&self, id: ClubId) -> Option<Club> {
        self.clubs.iter().find(|c| c.id == id).cloned()
    }

    fn find_season(&self, id: SeasonId) -> Option<Season> {
        self.seasons.iter().find(|s| s.id == id).cloned()
    }

    fn find_player(&self, id: PlayerId) -> Option<Player> {
        self.players.iter().find(|p| p.id == id).cloned()
    }

    fn game_result(&self, id: GameId) -> Option<GameResult> {
        self.game_results.iter().find(|r| r.id == id).cloned()
    }

    fn players_by_club(&self, club_id: ClubId) -> Vec<Player> {
        self.players.iter().filter(|p| p.club_id == club_id).cloned().collect()
    }

    fn entries_by_player(&self, player_id: PlayerId) -> Vec<PlayerMatchEntry> {
        self.player_entries.iter().filter(|e| e.player_id == player_id).cloned().collect()
    }

    fn entries_by_game(&self, game_id: GameId) -> Vec<PlayerMatchEntry> {
        self.player_entries.iter().filter(|e| e.game_id == game_id).cloned().collect()
    }

    fn insert_game_result(&mut self, draft: GameResultDraft) -> Result<GameResult> {
        let id = next_id(self.game_results.iter().map(|r| r.id));
        let result = draft.into_result(id);
        self.game_results.push(result.clone());
        Ok(result)
    }

    fn insert_player_match_entry(&mut self, mut entry: PlayerMatchEntry) -> Result<PlayerMatchEntry> {
        if self.game_result(entry.game_id).is_none() {
            return Err(StatsError::not_found("Game result not found"));
        }
        entry.id = next_id(self.player_entries.iter().map(|e| e.id));
        self.player_entries.push(entry.clone());
        Ok(entry)
    }

    fn insert_season(&mut self, season: Season) -> Result<Season> {
        if self.seasons.iter().any(|s| s.id == season.id) {
            return Err(StatsError::rule("Season name is already used"));
        }
        self.seasons.push(season.clone());
        Ok(season)
    }

    fn clear_current_season_flag(&mut self) -> Result<()> {
        for season in &mut self.seasons {
            season.current = false;
        }
        Ok(())
    }

    fn insert_player(&mut self, draft: PlayerDraft) -> Result<Player> {
        let id = next_id(self.players.iter().map(|p| p.id));
        let player = draft.into_player(id);
        self.players.push(player.clone());
        Ok(player)
    }

    fn update_player(&mut self, player: Player) -> Result<()> {
        let slot = self
            .players
            .iter_mut()
            .find(|p| p.id == player.id)
            .ok_or_else(|| StatsError::not_found("Player not found"))?;
        *slot = player;
        Ok(())
    }

    fn update_club(&mut self, club: Club) -> Result<()> {
        let slot = self
            .clubs
            .iter_mut()
            .find(|c| c.id == club.id)
            .ok_or_else(|| StatsError::not_found("Club not found"))?;
        *slot = club;
        Ok(())
    }

    fn upsert_regulation(&mut self, regulation: Regulation) -> Result<()> {
        match self.regulations.iter_mut().find(|r| r.league_id == regulation.league_id) {
            Some(slot) => *slot = regulation,
            None => self.regulations.push(regulation),
        }
        Ok(())
    }

    fn transaction<T, F>(&mut self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Self) -> Result<T>,
    {
        let snapshot = self.clone();
        let outcome = f(self);
        if outcome.is_err() {
            log::debug!("transaction failed, restoring snapshot");
            *self = snapshot;
        }
        outcome
    }
}
