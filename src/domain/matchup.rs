use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::types::{ItemId, MatchupId, UserId};

/// A pairwise comparison between two ranked items.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Matchup {
    pub id: MatchupId,
    pub item1_id: ItemId,
    pub item2_id: ItemId,
    pub user_id: UserId,
    pub context: Value,
    pub winner_id: Option<ItemId>,
}

impl Matchup {
    /// Whether `item` is one of the two competitors.
    pub fn is_competitor(&self, item: ItemId) -> bool {
        self.item1_id == item || self.item2_id == item
    }

    /// Classifies an attempt to record `winner` against the current state.
    ///
    /// A matchup is resolved once a winner is recorded. Recording the stored
    /// winner again is accepted; any other winner is refused.
    pub fn check_winner(&self, winner: ItemId) -> ResolveOutcome {
        if !self.is_competitor(winner) {
            return ResolveOutcome::NotACompetitor;
        }
        match self.winner_id {
            Some(current) if current != winner => {
                ResolveOutcome::AlreadyResolved { winner: current }
            }
            _ => ResolveOutcome::Recorded,
        }
    }
}

/// Data required to open a new [`Matchup`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewMatchup {
    pub item1_id: ItemId,
    pub item2_id: ItemId,
    pub user_id: UserId,
    pub context: Value,
}

/// Outcome of an attempt to record a winner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveOutcome {
    /// The winner was stored (or was already the stored winner).
    Recorded,
    /// No matchup with that id exists.
    Missing,
    /// The winner is neither of the two competitors.
    NotACompetitor,
    /// A different winner was recorded earlier.
    AlreadyResolved { winner: ItemId },
}
