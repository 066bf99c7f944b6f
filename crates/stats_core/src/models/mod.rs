pub mod entities;
pub mod game_result;
pub mod player_entry;

pub type CountryId = u32;
pub type LeagueId = u32;
pub type ClubId = u32;
pub type PlayerId = u32;
pub type SeasonId = u32;
pub type GameId = u32;

pub use entities::{Club, Country, League, Player, PlayerDraft, Regulation, Season, SeasonDraft};
pub use game_result::{GameResult, GameResultDraft, Venue};
pub use player_entry::{PlayerEntryDraft, PlayerMatchEntry};
