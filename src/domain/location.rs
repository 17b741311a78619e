use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::geo::Coordinates;
use crate::domain::types::{
    Address, ChainId, CuisineType, LocationId, PhoneNumber, PlaceId, PriceRange, Rating,
    RatingCount, WebsiteUrl,
};

/// One physical restaurant venue tied to a chain.
///
/// Mirrors a row of `restaurant_metadata`; `external_place_id` is the key used
/// by reconciliation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RestaurantLocation {
    pub item_id: LocationId,
    pub chain_id: ChainId,
    pub cuisine_type: Option<CuisineType>,
    pub price_range: Option<PriceRange>,
    pub coordinates: Coordinates,
    pub address: Option<Address>,
    /// Opaque opening-hours payload as returned by the place provider.
    pub operating_hours: Option<Value>,
    pub website: Option<WebsiteUrl>,
    pub phone: Option<PhoneNumber>,
    pub external_place_id: Option<PlaceId>,
    pub rating: Rating,
    pub rating_count: RatingCount,
}

/// Data required to insert a new [`RestaurantLocation`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewRestaurantLocation {
    pub chain_id: ChainId,
    pub cuisine_type: Option<CuisineType>,
    pub price_range: Option<PriceRange>,
    pub coordinates: Coordinates,
    pub address: Option<Address>,
    pub operating_hours: Option<Value>,
    pub website: Option<WebsiteUrl>,
    pub phone: Option<PhoneNumber>,
    pub external_place_id: Option<PlaceId>,
    pub rating: Rating,
    pub rating_count: RatingCount,
}

/// Enrichment fields merged into an existing location by reconciliation.
///
/// Every field overwrites the stored value, `None` included, which is what
/// makes re-applying the same record idempotent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlaceEnrichment {
    pub coordinates: Coordinates,
    pub address: Option<Address>,
    pub operating_hours: Option<Value>,
    pub website: Option<WebsiteUrl>,
    pub phone: Option<PhoneNumber>,
    pub rating: Rating,
    pub rating_count: RatingCount,
    pub price_range: Option<PriceRange>,
}

impl RestaurantLocation {
    /// Applies an enrichment in place, leaving identity and chain fields alone.
    pub fn apply(&mut self, enrichment: &PlaceEnrichment) {
        self.coordinates = enrichment.coordinates;
        self.address = enrichment.address.clone();
        self.operating_hours = enrichment.operating_hours.clone();
        self.website = enrichment.website.clone();
        self.phone = enrichment.phone.clone();
        self.rating = enrichment.rating;
        self.rating_count = enrichment.rating_count;
        self.price_range = enrichment.price_range;
    }
}
