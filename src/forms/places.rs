use serde::Deserialize;
use serde_json::Value;
use validator::Validate;

use crate::domain::geo::Coordinates;
use crate::domain::location::PlaceEnrichment;
use crate::domain::types::{Address, PhoneNumber, PriceRange, Rating, RatingCount, WebsiteUrl};
use crate::forms::{FormError, non_blank};

/// Place details as delivered by the external place-data provider.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ExternalPlaceRecord {
    #[serde(default)]
    pub place_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    #[validate(range(min = 0.0, max = 5.0))]
    pub rating: f64,
    #[serde(default, rename = "user_ratings_total")]
    #[validate(range(min = 0))]
    pub user_ratings: i32,
    /// 0–4, where 0 means the provider has no data.
    #[serde(default)]
    #[validate(range(min = 0, max = 4))]
    pub price_level: i32,
    #[serde(default)]
    pub types: Vec<String>,
    #[validate(nested)]
    pub geometry: Geometry,
    #[serde(default)]
    pub formatted_address: Option<String>,
    #[serde(default)]
    pub opening_hours: Option<Value>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub international_phone_number: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct Geometry {
    #[validate(nested)]
    pub location: LatLng,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Validate)]
pub struct LatLng {
    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub lng: f64,
}

impl ExternalPlaceRecord {
    /// The provider's own id for this place, if it sent one.
    pub fn declared_place_id(&self) -> Option<&str> {
        Some(self.place_id.trim()).filter(|id| !id.is_empty())
    }
}

/// Providers send bare hosts like `www.example.com`; those are stored as
/// unknown rather than failing the whole record.
fn provider_website(raw: String) -> Option<WebsiteUrl> {
    match WebsiteUrl::new(raw.as_str()) {
        Ok(url) => Some(url),
        Err(e) => {
            log::warn!("Dropping provider website {raw:?}: {e}");
            None
        }
    }
}

impl TryFrom<ExternalPlaceRecord> for PlaceEnrichment {
    type Error = FormError;

    fn try_from(record: ExternalPlaceRecord) -> Result<Self, Self::Error> {
        record.validate()?;

        let location = record.geometry.location;
        Ok(Self {
            coordinates: Coordinates::new(location.lat, location.lng)?,
            address: non_blank(record.formatted_address)
                .map(Address::new)
                .transpose()?,
            operating_hours: record.opening_hours.filter(|hours| !hours.is_null()),
            website: non_blank(record.website).and_then(provider_website),
            phone: non_blank(record.international_phone_number)
                .map(PhoneNumber::new)
                .transpose()?,
            rating: Rating::new(record.rating)?,
            rating_count: RatingCount::new(record.user_ratings)?,
            price_range: PriceRange::from_price_level(record.price_level)?,
        })
    }
}
