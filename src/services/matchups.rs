use serde_json::Value;

use crate::domain::matchup::{Matchup, NewMatchup, ResolveOutcome};
use crate::domain::types::{ItemId, MatchupId, UserId};
use crate::repository::{MatchupReader, MatchupWriter};

use super::errors::store_error;
use super::{ServiceError, ServiceResult};

/// Open a matchup between two distinct items on behalf of `user_id`.
pub fn create_matchup<R>(
    item1_id: i32,
    item2_id: i32,
    user_id: &str,
    context: Value,
    repo: &R,
) -> ServiceResult<Matchup>
where
    R: MatchupWriter,
{
    let item1_id = ItemId::new(item1_id)?;
    let item2_id = ItemId::new(item2_id)?;
    if item1_id == item2_id {
        log::warn!("Rejected matchup of item {item1_id} against itself");
        return Err(ServiceError::InvalidInput(
            "a matchup needs two different items".to_string(),
        ));
    }

    let matchup = NewMatchup {
        item1_id,
        item2_id,
        user_id: UserId::new(user_id)?,
        context: if context.is_null() {
            Value::Object(Default::default())
        } else {
            context
        },
    };
    repo.create_matchup(&matchup)
        .map_err(|e| store_error("create matchup", e))
}

pub fn get_matchup<R>(matchup_id: i32, repo: &R) -> ServiceResult<Matchup>
where
    R: MatchupReader,
{
    let matchup_id = MatchupId::new(matchup_id)?;
    match repo.get_matchup_by_id(matchup_id) {
        Ok(Some(matchup)) => Ok(matchup),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => Err(store_error("get matchup", e)),
    }
}

/// Resolve a matchup. Recording the stored winner again is a no-op success.
pub fn record_result<R>(matchup_id: i32, winner_id: i32, repo: &R) -> ServiceResult<()>
where
    R: MatchupWriter,
{
    let matchup_id = MatchupId::new(matchup_id)?;
    let winner_id = ItemId::new(winner_id)?;

    match repo.record_matchup_winner(matchup_id, winner_id) {
        Ok(ResolveOutcome::Recorded) => Ok(()),
        Ok(ResolveOutcome::Missing) => Err(ServiceError::NotFound),
        Ok(ResolveOutcome::NotACompetitor) => {
            log::warn!("Item {winner_id} is not a competitor in matchup {matchup_id}");
            Err(ServiceError::InvalidInput(format!(
                "item {winner_id} is not part of matchup {matchup_id}"
            )))
        }
        Ok(ResolveOutcome::AlreadyResolved { winner }) => {
            log::warn!("Matchup {matchup_id} already resolved to {winner}");
            Err(ServiceError::Conflict(format!(
                "matchup {matchup_id} already resolved to item {winner}"
            )))
        }
        Err(e) => Err(store_error("record matchup result", e)),
    }
}
