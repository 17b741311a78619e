use diesel::prelude::*;

use crate::domain::matchup::{Matchup as DomainMatchup, NewMatchup as DomainNewMatchup};
use crate::domain::types::{ItemId, TypeConstraintError, UserId};
use crate::models::parse_json;

/// Diesel model representing the `matchups` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::matchups)]
pub struct Matchup {
    pub id: i32,
    pub item1_id: i32,
    pub item2_id: i32,
    pub user_id: String,
    pub context: String,
    pub winner_id: Option<i32>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::matchups)]
pub struct NewMatchup<'a> {
    pub item1_id: i32,
    pub item2_id: i32,
    pub user_id: &'a str,
    pub context: String,
}

impl TryFrom<Matchup> for DomainMatchup {
    type Error = TypeConstraintError;

    fn try_from(matchup: Matchup) -> Result<Self, Self::Error> {
        Ok(Self {
            id: matchup.id.try_into()?,
            item1_id: matchup.item1_id.try_into()?,
            item2_id: matchup.item2_id.try_into()?,
            user_id: UserId::new(matchup.user_id)?,
            context: parse_json(&matchup.context, "context")?,
            winner_id: matchup.winner_id.map(ItemId::new).transpose()?,
        })
    }
}

impl<'a> From<&'a DomainNewMatchup> for NewMatchup<'a> {
    fn from(matchup: &'a DomainNewMatchup) -> Self {
        Self {
            item1_id: matchup.item1_id.get(),
            item2_id: matchup.item2_id.get(),
            user_id: matchup.user_id.as_str(),
            context: matchup.context.to_string(),
        }
    }
}
