use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{ChainDescription, ChainId, ChainName, WebsiteUrl};

/// A restaurant brand, potentially with many physical locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestaurantChain {
    pub id: ChainId,
    pub name: ChainName,
    pub website: Option<WebsiteUrl>,
    pub description: Option<ChainDescription>,
    pub founded_year: Option<i32>,
    pub created_at: NaiveDateTime,
}

/// Data required to insert a new [`RestaurantChain`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewRestaurantChain {
    pub name: ChainName,
    pub website: Option<WebsiteUrl>,
    pub description: Option<ChainDescription>,
    pub founded_year: Option<i32>,
    pub created_at: NaiveDateTime,
}
