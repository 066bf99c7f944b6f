//! Data store seam
//!
//! The engine never performs I/O itself; the service layer reads through this
//! trait and hands the results to the pure components.

mod memory;

pub use memory::InMemoryStore;

use crate::error::Result;
use crate::models::{
    Club, ClubId, GameId, GameResult, GameResultDraft, League, LeagueId, Player, PlayerDraft,
    PlayerId, PlayerMatchEntry, Regulation, Season, SeasonId,
};

pub trait DataStore {
    // ========================================================================
    // Reads
    // ========================================================================

    /// Results of every fixture `club_id` played in `season_id`.
    fn results_by_club_and_season(&self, club_id: ClubId, season_id: SeasonId) -> Vec<GameResult>;

    /// Results of one competition season, in insertion order.
    fn results_by_league_and_season(&self, league_id: LeagueId, season_id: SeasonId)
        -> Vec<GameResult>;

    fn clubs_by_league(&self, league_id: LeagueId) -> Vec<Club>;

    fn regulation_by_league(&self, league_id: LeagueId) -> Option<Regulation>;

    fn seasons(&self) -> Vec<Season>;

    /// The season flagged current, if any.
    fn current_season(&self) -> Option<Season>;

    fn find_league(&self, id: LeagueId) -> Option<League>;

    fn find_club(&self, id: ClubId) -> Option<Club>;

    fn find_season(&self, id: SeasonId) -> Option<Season>;

    fn find_player(&self, id: PlayerId) -> Option<Player>;

    fn game_result(&self, id: GameId) -> Option<GameResult>;

    fn players_by_club(&self, club_id: ClubId) -> Vec<Player>;

    fn entries_by_player(&self, player_id: PlayerId) -> Vec<PlayerMatchEntry>;

    fn entries_by_game(&self, game_id: GameId) -> Vec<PlayerMatchEntry>;

    // ========================================================================
    // Writes
    // ========================================================================

    /// Store a result; the store assigns the id and derives the winner.
    fn insert_game_result(&mut self, draft: GameResultDraft) -> Result<GameResult>;

    /// Store an entry; the store assigns `id`, `game_id` must already be set.
    fn insert_player_match_entry(&mut self, entry: PlayerMatchEntry) -> Result<PlayerMatchEntry>;

    fn insert_season(&mut self, season: Season) -> Result<Season>;

    /// Clear the current flag on every season.
    fn clear_current_season_flag(&mut self) -> Result<()>;

    fn insert_player(&mut self, draft: PlayerDraft) -> Result<Player>;

    /// Replace the stored player with the same id.
    fn update_player(&mut self, player: Player) -> Result<()>;

    /// Replace the stored club with the same id.
    fn update_club(&mut self, club: Club) -> Result<()>;

    /// Insert or replace a competition's regulation.
    fn upsert_regulation(&mut self, regulation: Regulation) -> Result<()>;

    /// Run `f` as one unit: if it returns `Err`, none of its writes persist.
    fn transaction<T, F>(&mut self, f: F) -> Result<T>
    where
        Self: Sized,
        F: FnOnce(&mut Self) -> Result<T>;
}
