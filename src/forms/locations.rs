use serde::Deserialize;
use serde_json::Value;
use validator::Validate;

use crate::domain::geo::Coordinates;
use crate::domain::location::NewRestaurantLocation;
use crate::domain::types::{
    Address, ChainId, CuisineType, PhoneNumber, PlaceId, PriceRange, Rating, RatingCount,
    WebsiteUrl,
};
use crate::forms::{FormError, non_blank};

/// Explicit creation of a location, typically a skeleton row carrying the
/// external place id that reconciliation later enriches.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct AddLocationForm {
    #[validate(range(min = 1))]
    pub chain_id: i32,
    pub cuisine_type: Option<String>,
    #[validate(range(min = 1, max = 4))]
    pub price_range: Option<i32>,
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
    pub address: Option<String>,
    pub operating_hours: Option<Value>,
    pub website: Option<String>,
    pub phone: Option<String>,
    pub external_place_id: Option<String>,
    #[validate(range(min = 0.0, max = 5.0))]
    pub rating: Option<f64>,
    #[validate(range(min = 0))]
    pub rating_count: Option<i32>,
}

impl TryFrom<AddLocationForm> for NewRestaurantLocation {
    type Error = FormError;

    fn try_from(form: AddLocationForm) -> Result<Self, Self::Error> {
        form.validate()?;

        Ok(Self {
            chain_id: ChainId::new(form.chain_id)?,
            cuisine_type: non_blank(form.cuisine_type)
                .map(CuisineType::new)
                .transpose()?,
            price_range: form.price_range.map(PriceRange::new).transpose()?,
            coordinates: Coordinates::new(form.latitude, form.longitude)?,
            address: non_blank(form.address).map(Address::new).transpose()?,
            operating_hours: form.operating_hours.filter(|hours| !hours.is_null()),
            website: non_blank(form.website).map(WebsiteUrl::new).transpose()?,
            phone: non_blank(form.phone).map(PhoneNumber::new).transpose()?,
            external_place_id: non_blank(form.external_place_id)
                .map(PlaceId::new)
                .transpose()?,
            rating: Rating::new(form.rating.unwrap_or(0.0))?,
            rating_count: RatingCount::new(form.rating_count.unwrap_or(0))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skeleton() -> AddLocationForm {
        AddLocationForm {
            chain_id: 1,
            latitude: 51.5,
            longitude: -0.12,
            external_place_id: Some("ext-1".into()),
            ..Default::default()
        }
    }

    #[test]
    fn skeleton_rows_default_their_ratings() {
        let location = NewRestaurantLocation::try_from(skeleton()).unwrap();
        assert_eq!(location.rating, 0.0);
        assert_eq!(location.rating_count, 0);
        assert_eq!(location.external_place_id.unwrap(), "ext-1");
    }

    #[test]
    fn rejects_price_range_outside_one_to_four() {
        let form = AddLocationForm {
            price_range: Some(5),
            ..skeleton()
        };
        assert!(NewRestaurantLocation::try_from(form).is_err());
    }

    #[test]
    fn rejects_out_of_range_coordinates() {
        let form = AddLocationForm {
            latitude: 120.0,
            ..skeleton()
        };
        assert!(matches!(
            NewRestaurantLocation::try_from(form),
            Err(FormError::Validation(_))
        ));
    }
}
