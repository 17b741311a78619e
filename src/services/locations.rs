use crate::domain::chain::{NewRestaurantChain, RestaurantChain};
use crate::domain::geo::Coordinates;
use crate::domain::location::{NewRestaurantLocation, RestaurantLocation};
use crate::domain::types::{ChainId, RadiusKm};
use crate::forms::chains::AddChainForm;
use crate::forms::locations::AddLocationForm;
use crate::repository::{ChainReader, ChainWriter, LocationReader, LocationWriter, ProximityQuery};

use super::errors::store_error;
use super::{ServiceError, ServiceResult};

/// Validate a caller-supplied search centre and radius.
pub(crate) fn proximity_query(lat: f64, lon: f64, radius_km: f64) -> ServiceResult<ProximityQuery> {
    let center = Coordinates::new(lat, lon).map_err(|e| {
        log::warn!("Rejected proximity search centre ({lat}, {lon}): {e}");
        ServiceError::from(e)
    })?;
    let radius = RadiusKm::new(radius_km).map_err(|e| {
        log::warn!("Rejected proximity search radius {radius_km}: {e}");
        ServiceError::from(e)
    })?;
    Ok(ProximityQuery::new(center, radius))
}

pub fn create_chain<R>(form: AddChainForm, repo: &R) -> ServiceResult<RestaurantChain>
where
    R: ChainWriter,
{
    let chain = NewRestaurantChain::try_from(form)?;
    repo.create_chain(&chain)
        .map_err(|e| store_error("create chain", e))
}

pub fn get_chain<R>(chain_id: i32, repo: &R) -> ServiceResult<RestaurantChain>
where
    R: ChainReader,
{
    let chain_id = ChainId::new(chain_id)?;
    match repo.get_chain_by_id(chain_id) {
        Ok(Some(chain)) => Ok(chain),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => Err(store_error("get chain", e)),
    }
}

pub fn create_location<R>(form: AddLocationForm, repo: &R) -> ServiceResult<RestaurantLocation>
where
    R: LocationWriter,
{
    let location = NewRestaurantLocation::try_from(form)?;
    repo.create_location(&location)
        .map_err(|e| store_error("create location", e))
}

pub fn list_chain_locations<R>(chain_id: i32, repo: &R) -> ServiceResult<Vec<RestaurantLocation>>
where
    R: LocationReader,
{
    let chain_id = ChainId::new(chain_id)?;
    repo.list_locations_by_chain(chain_id)
        .map_err(|e| store_error("list chain locations", e))
}

/// Locations within `radius_km` of the point, best rated first.
pub fn nearby_locations<R>(
    lat: f64,
    lon: f64,
    radius_km: f64,
    repo: &R,
) -> ServiceResult<Vec<RestaurantLocation>>
where
    R: LocationReader,
{
    let query = proximity_query(lat, lon, radius_km)?;
    repo.list_nearby_locations(query)
        .map_err(|e| store_error("list nearby locations", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test::TestRepository;

    fn chain(repo: &TestRepository) -> RestaurantChain {
        create_chain(
            AddChainForm {
                name: "Wharf Co".into(),
                ..Default::default()
            },
            repo,
        )
        .unwrap()
    }

    fn location(chain_id: i32, lat: f64, lon: f64, rating: f64, count: i32) -> AddLocationForm {
        AddLocationForm {
            chain_id,
            latitude: lat,
            longitude: lon,
            rating: Some(rating),
            rating_count: Some(count),
            ..Default::default()
        }
    }

    #[test]
    fn nearby_locations_orders_by_rating_then_count() {
        let repo = TestRepository::new();
        let chain_id = chain(&repo).id.get();
        let a = create_location(location(chain_id, 51.5, -0.12, 4.0, 10), &repo).unwrap();
        let b = create_location(location(chain_id, 51.501, -0.121, 4.5, 3), &repo).unwrap();
        let c = create_location(location(chain_id, 51.502, -0.119, 4.0, 99), &repo).unwrap();
        // Far away, filtered out.
        create_location(location(chain_id, 48.85, 2.35, 5.0, 1000), &repo).unwrap();

        let found = nearby_locations(51.5, -0.12, 5.0, &repo).unwrap();
        let ids: Vec<_> = found.iter().map(|l| l.item_id).collect();
        assert_eq!(ids, vec![b.item_id, c.item_id, a.item_id]);
    }

    #[test]
    fn zero_radius_still_matches_the_exact_point() {
        let repo = TestRepository::new();
        let chain_id = chain(&repo).id.get();
        create_location(location(chain_id, 51.5, -0.12, 3.0, 1), &repo).unwrap();

        assert_eq!(nearby_locations(51.5, -0.12, 0.0, &repo).unwrap().len(), 1);
        assert!(nearby_locations(0.0, 0.0, 1.0, &repo).unwrap().is_empty());
    }

    #[test]
    fn rejects_invalid_search_input() {
        let repo = TestRepository::new();
        for (lat, lon, radius) in [(91.0, 0.0, 1.0), (0.0, -181.0, 1.0), (0.0, 0.0, -1.0)] {
            assert!(matches!(
                nearby_locations(lat, lon, radius, &repo),
                Err(ServiceError::InvalidInput(_))
            ));
        }
        assert!(nearby_locations(0.0, 0.0, f64::NAN, &repo).is_err());
    }

    #[test]
    fn create_location_requires_existing_chain() {
        let repo = TestRepository::new();
        let result = create_location(location(42, 51.5, -0.12, 0.0, 0), &repo);
        assert_eq!(result.unwrap_err(), ServiceError::NotFound);
    }

    #[test]
    fn duplicate_place_id_is_rejected() {
        let repo = TestRepository::new();
        let chain_id = chain(&repo).id.get();
        let form = AddLocationForm {
            external_place_id: Some("ext-1".into()),
            ..location(chain_id, 51.5, -0.12, 0.0, 0)
        };
        create_location(form.clone(), &repo).unwrap();
        assert_eq!(
            create_location(form, &repo).unwrap_err(),
            ServiceError::DuplicateKey
        );
    }

    #[test]
    fn chain_lookup_and_listing() {
        let repo = TestRepository::new();
        let created = chain(&repo);
        let fetched = get_chain(created.id.get(), &repo).unwrap();
        assert_eq!(fetched.name, "Wharf Co");
        assert_eq!(get_chain(99, &repo).unwrap_err(), ServiceError::NotFound);

        create_location(location(created.id.get(), 1.0, 1.0, 0.0, 0), &repo).unwrap();
        create_location(location(created.id.get(), 2.0, 2.0, 0.0, 0), &repo).unwrap();
        let listed = list_chain_locations(created.id.get(), &repo).unwrap();
        assert_eq!(listed.len(), 2);
        assert!(listed[0].item_id < listed[1].item_id);
    }
}
