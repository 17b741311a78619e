use diesel::prelude::*;

use crate::domain::matchup::{Matchup, NewMatchup, ResolveOutcome};
use crate::domain::types::{ItemId, MatchupId};
use crate::models::matchup::{Matchup as DbMatchup, NewMatchup as DbNewMatchup};
use crate::repository::{
    DieselRepository, MatchupReader, MatchupWriter, RepositoryError, RepositoryResult,
};

impl MatchupReader for DieselRepository {
    fn get_matchup_by_id(&self, id: MatchupId) -> RepositoryResult<Option<Matchup>> {
        use crate::schema::matchups;

        let mut conn = self.conn()?;

        let matchup = matchups::table
            .filter(matchups::id.eq(id.get()))
            .first::<DbMatchup>(&mut conn)
            .optional()?;

        let matchup = matchup.map(TryInto::try_into).transpose()?;
        Ok(matchup)
    }
}

impl MatchupWriter for DieselRepository {
    fn create_matchup(&self, matchup: &NewMatchup) -> RepositoryResult<Matchup> {
        use crate::schema::matchups;

        let mut conn = self.conn()?;

        let created = diesel::insert_into(matchups::table)
            .values(DbNewMatchup::from(matchup))
            .get_result::<DbMatchup>(&mut conn)?;

        Ok(created.try_into()?)
    }

    fn record_matchup_winner(
        &self,
        id: MatchupId,
        winner: ItemId,
    ) -> RepositoryResult<ResolveOutcome> {
        use crate::schema::matchups;

        let mut conn = self.conn()?;

        conn.immediate_transaction::<_, RepositoryError, _>(|conn| {
            let winner_id = winner.get();
            let updated = diesel::update(
                matchups::table
                    .filter(matchups::id.eq(id.get()))
                    .filter(
                        matchups::item1_id
                            .eq(winner_id)
                            .or(matchups::item2_id.eq(winner_id)),
                    )
                    .filter(
                        matchups::winner_id
                            .is_null()
                            .or(matchups::winner_id.eq(winner_id)),
                    ),
            )
            .set(matchups::winner_id.eq(Some(winner_id)))
            .execute(conn)?;

            if updated > 0 {
                return Ok(ResolveOutcome::Recorded);
            }

            // Nothing matched: find out why from the row as it stands.
            let current = matchups::table
                .filter(matchups::id.eq(id.get()))
                .first::<DbMatchup>(conn)
                .optional()?;

            match current {
                Some(current) => Ok(Matchup::try_from(current)?.check_winner(winner)),
                None => Ok(ResolveOutcome::Missing),
            }
        })
    }
}
