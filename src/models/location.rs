use diesel::prelude::*;

use crate::domain::geo::Coordinates;
use crate::domain::location::{
    NewRestaurantLocation as DomainNewRestaurantLocation, PlaceEnrichment,
    RestaurantLocation as DomainRestaurantLocation,
};
use crate::domain::types::{
    Address, CuisineType, PhoneNumber, PlaceId, PriceRange, Rating, RatingCount,
    TypeConstraintError, WebsiteUrl,
};
use crate::models::parse_json;

/// Diesel model representing a row in the `restaurant_metadata` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::restaurant_metadata, primary_key(item_id))]
pub struct RestaurantLocation {
    pub item_id: i32,
    pub chain_id: i32,
    pub cuisine_type: Option<String>,
    pub price_range: Option<i32>,
    pub latitude: f64,
    pub longitude: f64,
    pub address: Option<String>,
    pub operating_hours: Option<String>,
    pub website: Option<String>,
    pub phone: Option<String>,
    pub google_place_id: Option<String>,
    pub rating: f64,
    pub user_ratings_count: i32,
}

/// Insertable form of [`RestaurantLocation`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::restaurant_metadata)]
pub struct NewRestaurantLocation {
    pub chain_id: i32,
    pub cuisine_type: Option<String>,
    pub price_range: Option<i32>,
    pub latitude: f64,
    pub longitude: f64,
    pub address: Option<String>,
    pub operating_hours: Option<String>,
    pub website: Option<String>,
    pub phone: Option<String>,
    pub google_place_id: Option<String>,
    pub rating: f64,
    pub user_ratings_count: i32,
}

/// Reconciliation changeset. `None` writes `NULL` so a re-applied record
/// always lands on the same row state.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = crate::schema::restaurant_metadata, treat_none_as_null = true)]
pub struct LocationEnrichment {
    pub latitude: f64,
    pub longitude: f64,
    pub address: Option<String>,
    pub operating_hours: Option<String>,
    pub website: Option<String>,
    pub phone: Option<String>,
    pub rating: f64,
    pub user_ratings_count: i32,
    pub price_range: Option<i32>,
}

impl TryFrom<RestaurantLocation> for DomainRestaurantLocation {
    type Error = TypeConstraintError;

    fn try_from(location: RestaurantLocation) -> Result<Self, Self::Error> {
        Ok(Self {
            item_id: location.item_id.try_into()?,
            chain_id: location.chain_id.try_into()?,
            cuisine_type: location.cuisine_type.map(CuisineType::new).transpose()?,
            price_range: location.price_range.map(PriceRange::new).transpose()?,
            coordinates: Coordinates::new(location.latitude, location.longitude)?,
            address: location.address.map(Address::new).transpose()?,
            operating_hours: location
                .operating_hours
                .as_deref()
                .map(|raw| parse_json(raw, "operating_hours"))
                .transpose()?,
            website: location.website.map(WebsiteUrl::new).transpose()?,
            phone: location.phone.map(PhoneNumber::new).transpose()?,
            external_place_id: location.google_place_id.map(PlaceId::new).transpose()?,
            rating: Rating::new(location.rating)?,
            rating_count: RatingCount::new(location.user_ratings_count)?,
        })
    }
}

impl From<DomainNewRestaurantLocation> for NewRestaurantLocation {
    fn from(location: DomainNewRestaurantLocation) -> Self {
        Self {
            chain_id: location.chain_id.get(),
            cuisine_type: location.cuisine_type.map(String::from),
            price_range: location.price_range.map(PriceRange::get),
            latitude: location.coordinates.lat.get(),
            longitude: location.coordinates.lon.get(),
            address: location.address.map(String::from),
            operating_hours: location.operating_hours.map(|hours| hours.to_string()),
            website: location.website.map(String::from),
            phone: location.phone.map(String::from),
            google_place_id: location.external_place_id.map(String::from),
            rating: location.rating.get(),
            user_ratings_count: location.rating_count.get(),
        }
    }
}

impl From<&PlaceEnrichment> for LocationEnrichment {
    fn from(enrichment: &PlaceEnrichment) -> Self {
        Self {
            latitude: enrichment.coordinates.lat.get(),
            longitude: enrichment.coordinates.lon.get(),
            address: enrichment.address.as_ref().map(|a| a.as_str().to_string()),
            operating_hours: enrichment.operating_hours.as_ref().map(|h| h.to_string()),
            website: enrichment.website.as_ref().map(|w| w.as_str().to_string()),
            phone: enrichment.phone.as_ref().map(|p| p.as_str().to_string()),
            rating: enrichment.rating.get(),
            user_ratings_count: enrichment.rating_count.get(),
            price_range: enrichment.price_range.map(PriceRange::get),
        }
    }
}
