use diesel::prelude::*;

use crate::db::great_circle_km;
use crate::domain::location::{NewRestaurantLocation, PlaceEnrichment, RestaurantLocation};
use crate::domain::types::{ChainId, PlaceId};
use crate::models::location::{
    LocationEnrichment, NewRestaurantLocation as DbNewRestaurantLocation,
    RestaurantLocation as DbRestaurantLocation,
};
use crate::repository::{
    DieselRepository, LocationReader, LocationWriter, ProximityQuery, RepositoryResult,
};

impl LocationReader for DieselRepository {
    fn list_locations_by_chain(
        &self,
        chain_id: ChainId,
    ) -> RepositoryResult<Vec<RestaurantLocation>> {
        use crate::schema::restaurant_metadata;

        let mut conn = self.conn()?;

        let items = restaurant_metadata::table
            .filter(restaurant_metadata::chain_id.eq(chain_id.get()))
            .order(restaurant_metadata::item_id.asc())
            .load::<DbRestaurantLocation>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<RestaurantLocation>, _>>()?;

        Ok(items)
    }

    fn list_nearby_locations(
        &self,
        query: ProximityQuery,
    ) -> RepositoryResult<Vec<RestaurantLocation>> {
        use crate::schema::restaurant_metadata;

        let mut conn = self.conn()?;

        // Distance filters; rating ranks.
        let items = restaurant_metadata::table
            .filter(
                great_circle_km(
                    query.center.lat.get(),
                    query.center.lon.get(),
                    restaurant_metadata::latitude,
                    restaurant_metadata::longitude,
                )
                .le(query.radius.get()),
            )
            .order((
                restaurant_metadata::rating.desc(),
                restaurant_metadata::user_ratings_count.desc(),
                restaurant_metadata::item_id.asc(),
            ))
            .load::<DbRestaurantLocation>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<RestaurantLocation>, _>>()?;

        Ok(items)
    }

    fn get_location_by_place_id(
        &self,
        place_id: &PlaceId,
    ) -> RepositoryResult<Option<RestaurantLocation>> {
        use crate::schema::restaurant_metadata;

        let mut conn = self.conn()?;

        let location = restaurant_metadata::table
            .filter(restaurant_metadata::google_place_id.eq(place_id.as_str()))
            .first::<DbRestaurantLocation>(&mut conn)
            .optional()?;

        let location = location.map(TryInto::try_into).transpose()?;
        Ok(location)
    }
}

impl LocationWriter for DieselRepository {
    fn create_location(
        &self,
        location: &NewRestaurantLocation,
    ) -> RepositoryResult<RestaurantLocation> {
        use crate::schema::restaurant_metadata;

        let mut conn = self.conn()?;
        let db_location: DbNewRestaurantLocation = location.clone().into();

        let created = diesel::insert_into(restaurant_metadata::table)
            .values(db_location)
            .get_result::<DbRestaurantLocation>(&mut conn)?;

        Ok(created.try_into()?)
    }

    fn update_location_from_place(
        &self,
        place_id: &PlaceId,
        enrichment: &PlaceEnrichment,
    ) -> RepositoryResult<usize> {
        use crate::schema::restaurant_metadata;

        let mut conn = self.conn()?;
        let changes = LocationEnrichment::from(enrichment);

        let affected = diesel::update(
            restaurant_metadata::table
                .filter(restaurant_metadata::google_place_id.eq(place_id.as_str())),
        )
        .set(&changes)
        .execute(&mut conn)?;

        Ok(affected)
    }
}
