use chrono::Utc;

use crate::domain::group::{Group, GroupMember, NewGroup, NewGroupMember};
use crate::domain::location::RestaurantLocation;
use crate::domain::types::{GroupId, GroupName, SearchRadius, UserId};
use crate::domain::user::UserProfile;
use crate::repository::{GroupReader, GroupWriter, LocationReader, ProximityQuery};

use super::errors::store_error;
use super::{ServiceError, ServiceResult};

/// Create a group in status "planning" with `creator` as its first member.
pub fn create_group<R>(name: &str, creator: &str, repo: &R) -> ServiceResult<Group>
where
    R: GroupWriter,
{
    let group = NewGroup {
        name: GroupName::new(name)?,
        created_by: UserId::new(creator)?,
        joined_at: Utc::now().naive_utc(),
    };
    repo.create_group(&group)
        .map_err(|e| store_error("create group", e))
}

pub fn get_group<R>(group_id: i32, repo: &R) -> ServiceResult<Group>
where
    R: GroupReader,
{
    let group_id = GroupId::new(group_id)?;
    match repo.get_group_by_id(group_id) {
        Ok(Some(group)) => Ok(group),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => Err(store_error("get group", e)),
    }
}

/// Add `user_id` to the group. A non-positive radius selects the default.
pub fn add_member<R>(
    group_id: i32,
    user_id: &str,
    search_radius_meters: i32,
    repo: &R,
) -> ServiceResult<()>
where
    R: GroupWriter,
{
    let member = NewGroupMember {
        group_id: GroupId::new(group_id)?,
        user_id: UserId::new(user_id)?,
        search_radius: SearchRadius::or_default(search_radius_meters),
        joined_at: Utc::now().naive_utc(),
    };
    match repo.add_group_member(&member) {
        Ok(_) => Ok(()),
        Err(e) => Err(store_error("add group member", e)),
    }
}

/// Profiles of the group's members, most recent joiner first.
pub fn list_members<R>(group_id: i32, repo: &R) -> ServiceResult<Vec<UserProfile>>
where
    R: GroupReader,
{
    let group_id = GroupId::new(group_id)?;
    repo.list_member_profiles(group_id)
        .map_err(|e| store_error("list group members", e))
}

/// Raw membership rows, most recent joiner first.
pub fn list_memberships<R>(group_id: i32, repo: &R) -> ServiceResult<Vec<GroupMember>>
where
    R: GroupReader,
{
    let group_id = GroupId::new(group_id)?;
    repo.list_group_members(group_id)
        .map_err(|e| store_error("list group memberships", e))
}

/// Locations within every member's own search radius of their home.
///
/// Members without a profile have no home and place no constraint. The
/// result keeps the nearby-locations order of the first constraint.
pub fn group_nearby_locations<R>(group_id: i32, repo: &R) -> ServiceResult<Vec<RestaurantLocation>>
where
    R: GroupReader + LocationReader,
{
    let group_id = GroupId::new(group_id)?;
    let memberships = repo
        .list_group_members(group_id)
        .map_err(|e| store_error("list group memberships", e))?;
    let profiles = repo
        .list_member_profiles(group_id)
        .map_err(|e| store_error("list group members", e))?;

    let queries: Vec<ProximityQuery> = memberships
        .iter()
        .filter_map(|member| {
            profiles
                .iter()
                .find(|p| p.user_id == member.user_id)
                .map(|p| ProximityQuery::new(p.home, member.search_radius.as_km()))
        })
        .collect();

    let Some((first, rest)) = queries.split_first() else {
        return Ok(Vec::new());
    };

    let candidates = repo
        .list_nearby_locations(*first)
        .map_err(|e| store_error("list nearby locations", e))?;

    Ok(candidates
        .into_iter()
        .filter(|location| rest.iter().all(|q| q.contains(&location.coordinates)))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::chains::AddChainForm;
    use crate::forms::locations::AddLocationForm;
    use crate::forms::profiles::ProfileForm;
    use crate::repository::test::TestRepository;
    use crate::services::{locations, users};
    use serde_json::json;

    fn profile(repo: &TestRepository, user_id: &str, lat: f64, lon: f64) {
        users::create_profile(
            user_id,
            ProfileForm {
                preferences: json!({}),
                home_lat: lat,
                home_lon: lon,
                dietary_restrictions: vec![],
            },
            repo,
        )
        .unwrap();
    }

    #[test]
    fn creator_joins_with_default_radius() {
        let repo = TestRepository::new();
        let group = create_group("Friday lunch", "alice", &repo).unwrap();
        assert_eq!(group.status.as_str(), "planning");

        let members = list_memberships(group.id.get(), &repo).unwrap();
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].user_id, "alice");
        assert_eq!(members[0].search_radius.meters(), 5000);
        assert_eq!(get_group(group.id.get(), &repo).unwrap(), group);
    }

    #[test]
    fn failed_creator_insert_leaves_no_group() {
        let repo = TestRepository::new().reject_members("mallory");
        let result = create_group("Doomed", "mallory", &repo);
        assert_eq!(result.unwrap_err(), ServiceError::StoreFailure);
        assert_eq!(repo.group_count(), 0);
    }

    #[test]
    fn non_positive_radius_uses_default() {
        let repo = TestRepository::new();
        let group = create_group("Dinner", "alice", &repo).unwrap();
        add_member(group.id.get(), "bob", 0, &repo).unwrap();
        add_member(group.id.get(), "carol", -5, &repo).unwrap();
        add_member(group.id.get(), "dave", 1200, &repo).unwrap();

        let radii: Vec<(String, i32)> = list_memberships(group.id.get(), &repo)
            .unwrap()
            .into_iter()
            .map(|m| (m.user_id.into_inner(), m.search_radius.meters()))
            .collect();
        assert!(radii.contains(&("bob".to_string(), 5000)));
        assert!(radii.contains(&("carol".to_string(), 5000)));
        assert!(radii.contains(&("dave".to_string(), 1200)));
    }

    #[test]
    fn duplicate_and_orphan_memberships_fail() {
        let repo = TestRepository::new();
        let group = create_group("Dinner", "alice", &repo).unwrap();
        add_member(group.id.get(), "bob", 100, &repo).unwrap();

        assert_eq!(
            add_member(group.id.get(), "bob", 100, &repo).unwrap_err(),
            ServiceError::DuplicateKey
        );
        assert_eq!(
            add_member(999, "bob", 100, &repo).unwrap_err(),
            ServiceError::NotFound
        );
        assert_eq!(get_group(999, &repo).unwrap_err(), ServiceError::NotFound);
    }

    #[test]
    fn members_without_profiles_are_omitted() {
        let repo = TestRepository::new();
        profile(&repo, "alice", 51.5, -0.12);
        let group = create_group("Dinner", "alice", &repo).unwrap();
        add_member(group.id.get(), "ghost", 100, &repo).unwrap();

        let members = list_members(group.id.get(), &repo).unwrap();
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].user_id, "alice");
    }

    #[test]
    fn group_locations_are_the_intersection_of_member_radii() {
        let repo = TestRepository::new();
        let chain = locations::create_chain(
            AddChainForm {
                name: "Wharf Co".into(),
                ..Default::default()
            },
            &repo,
        )
        .unwrap();
        let add = |lat: f64, lon: f64| {
            locations::create_location(
                AddLocationForm {
                    chain_id: chain.id.get(),
                    latitude: lat,
                    longitude: lon,
                    ..Default::default()
                },
                &repo,
            )
            .unwrap()
        };
        // Roughly 1.1 km apart along the meridian.
        let shared = add(51.505, -0.12);
        let alice_only = add(51.47, -0.12);

        profile(&repo, "alice", 51.5, -0.12);
        profile(&repo, "bob", 51.51, -0.12);
        let group = create_group("Dinner", "alice", &repo).unwrap();
        add_member(group.id.get(), "bob", 2000, &repo).unwrap();

        let found = group_nearby_locations(group.id.get(), &repo).unwrap();
        let ids: Vec<_> = found.iter().map(|l| l.item_id).collect();
        assert_eq!(ids, vec![shared.item_id]);
        assert_ne!(shared.item_id, alice_only.item_id);
    }

    #[test]
    fn group_without_profiles_has_no_locations() {
        let repo = TestRepository::new();
        let group = create_group("Dinner", "alice", &repo).unwrap();
        assert!(group_nearby_locations(group.id.get(), &repo)
            .unwrap()
            .is_empty());
    }
}
