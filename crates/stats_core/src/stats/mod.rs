pub mod fixtures;
pub mod player_stats;

pub use fixtures::{DayGameResult, GameSheet, SeasonGameResult};
pub use player_stats::{
    PlayerCareerStat, PlayerGameLine, PlayerSeasonStat, PlayerTotalStat, StatLine,
};
