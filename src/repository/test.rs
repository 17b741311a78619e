use std::sync::{Mutex, MutexGuard};

use chrono::Utc;

use crate::domain::account::{Account, NewAccount};
use crate::domain::chain::{NewRestaurantChain, RestaurantChain};
use crate::domain::group::{Group, GroupMember, NewGroup, NewGroupMember};
use crate::domain::location::{NewRestaurantLocation, PlaceEnrichment, RestaurantLocation};
use crate::domain::matchup::{Matchup, NewMatchup, ResolveOutcome};
use crate::domain::types::{
    AccountEmail, AccountId, AccountName, AccountStatus, ChainId, GroupId, GroupStatus, ItemId,
    LocationId, MatchupId, PlaceId, SearchRadius, UserId,
};
use crate::domain::user::{NewUserProfile, UserProfile, UserProfileUpdate};
use crate::repository::{
    AccountListQuery, AccountReader, AccountWriter, ChainReader, ChainWriter, GroupReader,
    GroupWriter, LocationReader, LocationWriter, MatchupReader, MatchupWriter, ProximityQuery,
    RepositoryError, RepositoryResult, UserProfileReader, UserProfileWriter,
};

/// Simple in-memory repository used for unit tests.
///
/// Mirrors the constraints the SQLite schema enforces (unique keys, foreign
/// keys, ordering) closely enough for service tests.
#[derive(Default)]
pub struct TestRepository {
    state: Mutex<State>,
}

#[derive(Default)]
struct State {
    chains: Vec<RestaurantChain>,
    locations: Vec<RestaurantLocation>,
    profiles: Vec<UserProfile>,
    groups: Vec<Group>,
    members: Vec<GroupMember>,
    matchups: Vec<Matchup>,
    accounts: Vec<Account>,
    /// User ids whose membership inserts fail, to exercise rollback.
    rejected_members: Vec<UserId>,
}

fn next_id(len: usize) -> i32 {
    len as i32 + 1
}

fn duplicate(what: &str) -> RepositoryError {
    RepositoryError::DuplicateKey(format!("UNIQUE constraint failed: {what}"))
}

impl TestRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every membership insert for `user_id` fail.
    pub fn reject_members(self, user_id: &str) -> Self {
        self.lock()
            .rejected_members
            .push(UserId::new(user_id).expect("valid user id"));
        self
    }

    pub fn group_count(&self) -> usize {
        self.lock().groups.len()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().expect("test repository lock poisoned")
    }
}

impl ChainReader for TestRepository {
    fn get_chain_by_id(&self, id: ChainId) -> RepositoryResult<Option<RestaurantChain>> {
        Ok(self.lock().chains.iter().find(|c| c.id == id).cloned())
    }
}

impl ChainWriter for TestRepository {
    fn create_chain(&self, chain: &NewRestaurantChain) -> RepositoryResult<RestaurantChain> {
        let mut state = self.lock();
        let created = RestaurantChain {
            id: ChainId::new(next_id(state.chains.len()))?,
            name: chain.name.clone(),
            website: chain.website.clone(),
            description: chain.description.clone(),
            founded_year: chain.founded_year,
            created_at: chain.created_at,
        };
        state.chains.push(created.clone());
        Ok(created)
    }
}

impl LocationReader for TestRepository {
    fn list_locations_by_chain(
        &self,
        chain_id: ChainId,
    ) -> RepositoryResult<Vec<RestaurantLocation>> {
        let mut items: Vec<RestaurantLocation> = self
            .lock()
            .locations
            .iter()
            .filter(|l| l.chain_id == chain_id)
            .cloned()
            .collect();
        items.sort_by_key(|l| l.item_id);
        Ok(items)
    }

    fn list_nearby_locations(
        &self,
        query: ProximityQuery,
    ) -> RepositoryResult<Vec<RestaurantLocation>> {
        let mut items: Vec<RestaurantLocation> = self
            .lock()
            .locations
            .iter()
            .filter(|l| query.contains(&l.coordinates))
            .cloned()
            .collect();
        items.sort_by(|a, b| {
            b.rating
                .get()
                .total_cmp(&a.rating.get())
                .then(b.rating_count.cmp(&a.rating_count))
                .then(a.item_id.cmp(&b.item_id))
        });
        Ok(items)
    }

    fn get_location_by_place_id(
        &self,
        place_id: &PlaceId,
    ) -> RepositoryResult<Option<RestaurantLocation>> {
        Ok(self
            .lock()
            .locations
            .iter()
            .find(|l| l.external_place_id.as_ref() == Some(place_id))
            .cloned())
    }
}

impl LocationWriter for TestRepository {
    fn create_location(
        &self,
        location: &NewRestaurantLocation,
    ) -> RepositoryResult<RestaurantLocation> {
        let mut state = self.lock();
        if !state.chains.iter().any(|c| c.id == location.chain_id) {
            return Err(RepositoryError::ForeignKeyViolation(
                "FOREIGN KEY constraint failed".to_string(),
            ));
        }
        if location.external_place_id.is_some()
            && state
                .locations
                .iter()
                .any(|l| l.external_place_id == location.external_place_id)
        {
            return Err(duplicate("restaurant_metadata.google_place_id"));
        }
        let created = RestaurantLocation {
            item_id: LocationId::new(next_id(state.locations.len()))?,
            chain_id: location.chain_id,
            cuisine_type: location.cuisine_type.clone(),
            price_range: location.price_range,
            coordinates: location.coordinates,
            address: location.address.clone(),
            operating_hours: location.operating_hours.clone(),
            website: location.website.clone(),
            phone: location.phone.clone(),
            external_place_id: location.external_place_id.clone(),
            rating: location.rating,
            rating_count: location.rating_count,
        };
        state.locations.push(created.clone());
        Ok(created)
    }

    fn update_location_from_place(
        &self,
        place_id: &PlaceId,
        enrichment: &PlaceEnrichment,
    ) -> RepositoryResult<usize> {
        let mut state = self.lock();
        let mut affected = 0;
        for location in state
            .locations
            .iter_mut()
            .filter(|l| l.external_place_id.as_ref() == Some(place_id))
        {
            location.apply(enrichment);
            affected += 1;
        }
        Ok(affected)
    }
}

impl UserProfileReader for TestRepository {
    fn get_profile(&self, user_id: &UserId) -> RepositoryResult<Option<UserProfile>> {
        Ok(self
            .lock()
            .profiles
            .iter()
            .find(|p| &p.user_id == user_id)
            .cloned())
    }

    fn list_nearby_profiles(&self, query: ProximityQuery) -> RepositoryResult<Vec<UserProfile>> {
        let mut items: Vec<UserProfile> = self
            .lock()
            .profiles
            .iter()
            .filter(|p| query.contains(&p.home))
            .cloned()
            .collect();
        items.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then(a.user_id.cmp(&b.user_id))
        });
        Ok(items)
    }
}

impl UserProfileWriter for TestRepository {
    fn create_profile(&self, profile: &NewUserProfile) -> RepositoryResult<UserProfile> {
        let mut state = self.lock();
        if state.profiles.iter().any(|p| p.user_id == profile.user_id) {
            return Err(duplicate("user_profiles.user_id"));
        }
        let created = UserProfile {
            user_id: profile.user_id.clone(),
            preferences: profile.preferences.clone(),
            home: profile.home,
            dietary_restrictions: profile.dietary_restrictions.clone(),
            created_at: profile.created_at,
            updated_at: profile.updated_at,
        };
        state.profiles.push(created.clone());
        Ok(created)
    }

    fn update_profile(
        &self,
        user_id: &UserId,
        update: &UserProfileUpdate,
    ) -> RepositoryResult<usize> {
        let mut state = self.lock();
        let Some(profile) = state.profiles.iter_mut().find(|p| &p.user_id == user_id) else {
            return Ok(0);
        };
        profile.preferences = update.preferences.clone();
        profile.home = update.home;
        profile.dietary_restrictions = update.dietary_restrictions.clone();
        profile.updated_at = update.updated_at;
        Ok(1)
    }
}

fn members_newest_first(state: &State, group_id: GroupId) -> Vec<GroupMember> {
    // Stable sort keeps insertion order among equal timestamps; reverse so the
    // later insert wins ties, like `ORDER BY joined_at DESC, id DESC`.
    let mut members: Vec<GroupMember> = state
        .members
        .iter()
        .filter(|m| m.group_id == group_id)
        .cloned()
        .collect();
    members.reverse();
    members.sort_by(|a, b| b.joined_at.cmp(&a.joined_at));
    members
}

impl GroupReader for TestRepository {
    fn get_group_by_id(&self, id: GroupId) -> RepositoryResult<Option<Group>> {
        Ok(self.lock().groups.iter().find(|g| g.id == id).cloned())
    }

    fn list_group_members(&self, group_id: GroupId) -> RepositoryResult<Vec<GroupMember>> {
        Ok(members_newest_first(&self.lock(), group_id))
    }

    fn list_member_profiles(&self, group_id: GroupId) -> RepositoryResult<Vec<UserProfile>> {
        let state = self.lock();
        Ok(members_newest_first(&state, group_id)
            .into_iter()
            .filter_map(|m| state.profiles.iter().find(|p| p.user_id == m.user_id).cloned())
            .collect())
    }
}

fn insert_member(state: &mut State, member: GroupMember) -> RepositoryResult<()> {
    if state.rejected_members.contains(&member.user_id) {
        return Err(RepositoryError::ValidationError(
            "membership rejected".to_string(),
        ));
    }
    if !state.groups.iter().any(|g| g.id == member.group_id) {
        return Err(RepositoryError::ForeignKeyViolation(
            "FOREIGN KEY constraint failed".to_string(),
        ));
    }
    if state
        .members
        .iter()
        .any(|m| m.group_id == member.group_id && m.user_id == member.user_id)
    {
        return Err(duplicate("group_members.group_id, group_members.user_id"));
    }
    state.members.push(member);
    Ok(())
}

impl GroupWriter for TestRepository {
    fn create_group(&self, group: &NewGroup) -> RepositoryResult<Group> {
        let mut state = self.lock();
        let created = Group {
            id: GroupId::new(next_id(state.groups.len()))?,
            name: group.name.clone(),
            created_by: group.created_by.clone(),
            status: GroupStatus::planning(),
        };
        state.groups.push(created.clone());

        let creator = GroupMember {
            group_id: created.id,
            user_id: group.created_by.clone(),
            search_radius: SearchRadius::default(),
            joined_at: group.joined_at,
        };
        if let Err(e) = insert_member(&mut state, creator) {
            state.groups.pop();
            return Err(e);
        }
        Ok(created)
    }

    fn add_group_member(&self, member: &NewGroupMember) -> RepositoryResult<usize> {
        let mut state = self.lock();
        insert_member(
            &mut state,
            GroupMember {
                group_id: member.group_id,
                user_id: member.user_id.clone(),
                search_radius: member.search_radius,
                joined_at: member.joined_at,
            },
        )?;
        Ok(1)
    }
}

impl MatchupReader for TestRepository {
    fn get_matchup_by_id(&self, id: MatchupId) -> RepositoryResult<Option<Matchup>> {
        Ok(self.lock().matchups.iter().find(|m| m.id == id).cloned())
    }
}

impl MatchupWriter for TestRepository {
    fn create_matchup(&self, matchup: &NewMatchup) -> RepositoryResult<Matchup> {
        let mut state = self.lock();
        let created = Matchup {
            id: MatchupId::new(next_id(state.matchups.len()))?,
            item1_id: matchup.item1_id,
            item2_id: matchup.item2_id,
            user_id: matchup.user_id.clone(),
            context: matchup.context.clone(),
            winner_id: None,
        };
        state.matchups.push(created.clone());
        Ok(created)
    }

    fn record_matchup_winner(
        &self,
        id: MatchupId,
        winner: ItemId,
    ) -> RepositoryResult<ResolveOutcome> {
        let mut state = self.lock();
        let Some(matchup) = state.matchups.iter_mut().find(|m| m.id == id) else {
            return Ok(ResolveOutcome::Missing);
        };
        let outcome = matchup.check_winner(winner);
        if outcome == ResolveOutcome::Recorded {
            matchup.winner_id = Some(winner);
        }
        Ok(outcome)
    }
}

impl AccountReader for TestRepository {
    fn get_account_by_id(&self, id: AccountId) -> RepositoryResult<Option<Account>> {
        Ok(self
            .lock()
            .accounts
            .iter()
            .find(|a| a.id == id && a.status == AccountStatus::Active)
            .cloned())
    }

    fn get_account_by_email(&self, email: &AccountEmail) -> RepositoryResult<Option<Account>> {
        Ok(self
            .lock()
            .accounts
            .iter()
            .find(|a| &a.email == email && a.status == AccountStatus::Active)
            .cloned())
    }

    fn list_accounts(&self, query: AccountListQuery) -> RepositoryResult<Vec<Account>> {
        let mut items: Vec<Account> = self
            .lock()
            .accounts
            .iter()
            .filter(|a| a.status == AccountStatus::Active)
            .cloned()
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(items
            .into_iter()
            .skip(query.offset as usize)
            .take(query.limit as usize)
            .collect())
    }
}

impl AccountWriter for TestRepository {
    fn create_account(&self, account: &NewAccount) -> RepositoryResult<Account> {
        let mut state = self.lock();
        // Uniqueness spans deleted rows too, as the table constraint does.
        if state.accounts.iter().any(|a| a.email == account.email) {
            return Err(duplicate("accounts.email"));
        }
        let created = Account {
            id: AccountId::new(next_id(state.accounts.len()))?,
            email: account.email.clone(),
            name: account.name.clone(),
            status: AccountStatus::Active,
            created_at: account.created_at,
            updated_at: account.updated_at,
        };
        state.accounts.push(created.clone());
        Ok(created)
    }

    fn update_account(
        &self,
        id: AccountId,
        email: &AccountEmail,
        name: &AccountName,
    ) -> RepositoryResult<Option<Account>> {
        let mut state = self.lock();
        if state.accounts.iter().any(|a| a.id != id && &a.email == email) {
            return Err(duplicate("accounts.email"));
        }
        let Some(account) = state
            .accounts
            .iter_mut()
            .find(|a| a.id == id && a.status == AccountStatus::Active)
        else {
            return Ok(None);
        };
        account.email = email.clone();
        account.name = name.clone();
        account.updated_at = Utc::now().naive_utc();
        Ok(Some(account.clone()))
    }

    fn delete_account(&self, id: AccountId) -> RepositoryResult<usize> {
        let mut state = self.lock();
        match state
            .accounts
            .iter_mut()
            .find(|a| a.id == id && a.status == AccountStatus::Active)
        {
            Some(account) => {
                account.status = AccountStatus::Deleted;
                account.updated_at = Utc::now().naive_utc();
                Ok(1)
            }
            None => Ok(0),
        }
    }
}
