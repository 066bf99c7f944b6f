use serde::{Deserialize, Serialize};

use super::{ClubId, GameId, Player, PlayerId};

/// Per-player statistics for one side of a match, as submitted by the client.
///
/// Club and shirt number are not client-supplied; they are resolved from the
/// roster when the submission is registered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerEntryDraft {
    pub player_id: PlayerId,
    #[serde(default)]
    pub starter: bool,
    #[serde(default)]
    pub goals: u32,
    #[serde(default)]
    pub assists: u32,
    #[serde(default)]
    pub own_goals: u32,
    #[serde(default)]
    pub minutes: u32,
    #[serde(default)]
    pub yellow_cards: u32,
    #[serde(default)]
    pub red_cards: u32,
}

impl PlayerEntryDraft {
    /// Entries with zero minutes record a squad member who did not play.
    pub fn played(&self) -> bool {
        self.minutes > 0
    }

    /// A zero-minute entry must be a bench entry with no recorded stats.
    pub fn is_consistent_absence(&self) -> bool {
        self.played()
            || (!self.starter
                && self.goals == 0
                && self.assists == 0
                && self.own_goals == 0
                && self.yellow_cards == 0
                && self.red_cards == 0)
    }

    /// Attach the roster club and shirt number.
    pub fn resolve(self, player: &Player) -> PlayerMatchEntry {
        PlayerMatchEntry {
            id: 0,
            game_id: 0,
            player_id: self.player_id,
            club_id: player.club_id,
            number: player.number,
            starter: self.starter,
            goals: self.goals,
            assists: self.assists,
            own_goals: self.own_goals,
            minutes: self.minutes,
            yellow_cards: self.yellow_cards,
            red_cards: self.red_cards,
        }
    }
}

/// Per-player, per-match statistics with roster data attached.
///
/// `id` and `game_id` are zero until the entry is committed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerMatchEntry {
    pub id: u32,
    pub game_id: GameId,
    pub player_id: PlayerId,
    pub club_id: ClubId,
    pub number: u32,
    pub starter: bool,
    pub goals: u32,
    pub assists: u32,
    pub own_goals: u32,
    pub minutes: u32,
    pub yellow_cards: u32,
    pub red_cards: u32,
}

impl PlayerMatchEntry {
    pub fn played(&self) -> bool {
        self.minutes > 0
    }
}
