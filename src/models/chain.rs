use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::chain::{
    NewRestaurantChain as DomainNewRestaurantChain, RestaurantChain as DomainRestaurantChain,
};
use crate::domain::types::{ChainDescription, ChainName, TypeConstraintError, WebsiteUrl};

/// Diesel model representing the `restaurant_chains` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::restaurant_chains)]
pub struct RestaurantChain {
    pub id: i32,
    pub name: String,
    pub website: Option<String>,
    pub description: Option<String>,
    pub founded_year: Option<i32>,
    pub created_at: NaiveDateTime,
}

/// Insertable form of [`RestaurantChain`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::restaurant_chains)]
pub struct NewRestaurantChain {
    pub name: String,
    pub website: Option<String>,
    pub description: Option<String>,
    pub founded_year: Option<i32>,
    pub created_at: NaiveDateTime,
}

impl TryFrom<RestaurantChain> for DomainRestaurantChain {
    type Error = TypeConstraintError;

    fn try_from(chain: RestaurantChain) -> Result<Self, Self::Error> {
        Ok(Self {
            id: chain.id.try_into()?,
            name: ChainName::new(chain.name)?,
            website: chain.website.map(WebsiteUrl::new).transpose()?,
            description: chain.description.map(ChainDescription::new).transpose()?,
            founded_year: chain.founded_year,
            created_at: chain.created_at,
        })
    }
}

impl From<DomainNewRestaurantChain> for NewRestaurantChain {
    fn from(chain: DomainNewRestaurantChain) -> Self {
        Self {
            name: chain.name.into_inner(),
            website: chain.website.map(String::from),
            description: chain.description.map(String::from),
            founded_year: chain.founded_year,
            created_at: chain.created_at,
        }
    }
}
