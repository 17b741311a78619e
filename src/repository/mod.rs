use crate::db::{DbConnection, DbPool};
use crate::domain::account::{Account, NewAccount};
use crate::domain::chain::{NewRestaurantChain, RestaurantChain};
use crate::domain::geo::Coordinates;
use crate::domain::group::{Group, GroupMember, NewGroup, NewGroupMember};
use crate::domain::location::{NewRestaurantLocation, PlaceEnrichment, RestaurantLocation};
use crate::domain::matchup::{Matchup, NewMatchup, ResolveOutcome};
use crate::domain::types::{
    AccountEmail, AccountId, AccountName, ChainId, GroupId, ItemId, MatchupId, PlaceId, RadiusKm,
    UserId,
};
use crate::domain::user::{NewUserProfile, UserProfile, UserProfileUpdate};

pub mod account;
pub mod chain;
pub mod errors;
pub mod group;
pub mod location;
pub mod matchup;
#[cfg(test)]
pub mod test;
pub mod user;

pub use errors::{RepositoryError, RepositoryResult};

/// Repository implementation backed by Diesel and SQLite.
///
/// The underlying `r2d2::Pool` is cheap to clone, allowing the repository to
/// be passed around freely between callers. Every method checks out its own
/// connection; nothing is cached between calls.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository from an established database pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a pooled database connection.
    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Reference point and radius for proximity searches.
#[derive(Debug, Clone, Copy)]
pub struct ProximityQuery {
    pub center: Coordinates,
    /// Inclusive upper bound on great-circle distance.
    pub radius: RadiusKm,
}

impl ProximityQuery {
    pub fn new(center: Coordinates, radius: RadiusKm) -> Self {
        Self { center, radius }
    }

    /// Whether `point` lies within the radius (boundary inclusive).
    pub fn contains(&self, point: &Coordinates) -> bool {
        self.center.distance_km(point) <= self.radius.get()
    }
}

/// Paging parameters for listing accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountListQuery {
    pub limit: i64,
    pub offset: i64,
}

impl AccountListQuery {
    pub const DEFAULT_LIMIT: i64 = 50;

    /// Non-positive limits fall back to [`Self::DEFAULT_LIMIT`]; negative
    /// offsets are treated as zero.
    pub fn new(limit: i64, offset: i64) -> Self {
        Self {
            limit: if limit > 0 { limit } else { Self::DEFAULT_LIMIT },
            offset: offset.max(0),
        }
    }
}

impl Default for AccountListQuery {
    fn default() -> Self {
        Self::new(Self::DEFAULT_LIMIT, 0)
    }
}

/// Read-only operations for restaurant chains.
pub trait ChainReader {
    /// Retrieve a chain by its identifier.
    fn get_chain_by_id(&self, id: ChainId) -> RepositoryResult<Option<RestaurantChain>>;
}

/// Write operations for restaurant chains.
pub trait ChainWriter {
    /// Persist a new chain and return it with its assigned id.
    fn create_chain(&self, chain: &NewRestaurantChain) -> RepositoryResult<RestaurantChain>;
}

/// Read-only operations for restaurant locations.
pub trait LocationReader {
    /// List the locations of a chain ordered by `item_id`.
    fn list_locations_by_chain(
        &self,
        chain_id: ChainId,
    ) -> RepositoryResult<Vec<RestaurantLocation>>;
    /// Locations within the query radius, best rated first.
    fn list_nearby_locations(
        &self,
        query: ProximityQuery,
    ) -> RepositoryResult<Vec<RestaurantLocation>>;
    /// Retrieve a location by its external place id.
    fn get_location_by_place_id(
        &self,
        place_id: &PlaceId,
    ) -> RepositoryResult<Option<RestaurantLocation>>;
}

/// Write operations for restaurant locations.
pub trait LocationWriter {
    /// Persist a new location and return it with its assigned `item_id`.
    fn create_location(
        &self,
        location: &NewRestaurantLocation,
    ) -> RepositoryResult<RestaurantLocation>;
    /// Overwrite the enrichment fields of the location matching `place_id`.
    /// Returns the number of rows updated.
    fn update_location_from_place(
        &self,
        place_id: &PlaceId,
        enrichment: &PlaceEnrichment,
    ) -> RepositoryResult<usize>;
}

/// Read-only operations for user profiles.
pub trait UserProfileReader {
    /// Retrieve a profile by user identity.
    fn get_profile(&self, user_id: &UserId) -> RepositoryResult<Option<UserProfile>>;
    /// Profiles whose home lies within the query radius, newest first.
    fn list_nearby_profiles(&self, query: ProximityQuery) -> RepositoryResult<Vec<UserProfile>>;
}

/// Write operations for user profiles.
pub trait UserProfileWriter {
    /// Persist a new profile.
    fn create_profile(&self, profile: &NewUserProfile) -> RepositoryResult<UserProfile>;
    /// Replace the mutable fields of a profile. Returns the number of rows updated.
    fn update_profile(
        &self,
        user_id: &UserId,
        update: &UserProfileUpdate,
    ) -> RepositoryResult<usize>;
}

/// Read-only operations for groups and memberships.
pub trait GroupReader {
    /// Retrieve a group by its identifier.
    fn get_group_by_id(&self, id: GroupId) -> RepositoryResult<Option<Group>>;
    /// Membership rows of a group, most recent joiner first.
    fn list_group_members(&self, group_id: GroupId) -> RepositoryResult<Vec<GroupMember>>;
    /// Profiles of the members of a group, most recent joiner first.
    /// Members without a profile are skipped.
    fn list_member_profiles(&self, group_id: GroupId) -> RepositoryResult<Vec<UserProfile>>;
}

/// Write operations for groups and memberships.
pub trait GroupWriter {
    /// Create a group and enrol its creator with the default radius, atomically.
    fn create_group(&self, group: &NewGroup) -> RepositoryResult<Group>;
    /// Add a member to a group.
    fn add_group_member(&self, member: &NewGroupMember) -> RepositoryResult<usize>;
}

/// Read-only operations for matchups.
pub trait MatchupReader {
    /// Retrieve a matchup by its identifier.
    fn get_matchup_by_id(&self, id: MatchupId) -> RepositoryResult<Option<Matchup>>;
}

/// Write operations for matchups.
pub trait MatchupWriter {
    /// Persist a new, unresolved matchup.
    fn create_matchup(&self, matchup: &NewMatchup) -> RepositoryResult<Matchup>;
    /// Record `winner` for the matchup unless that would contradict its state.
    fn record_matchup_winner(
        &self,
        id: MatchupId,
        winner: ItemId,
    ) -> RepositoryResult<ResolveOutcome>;
}

/// Read-only operations for accounts. Soft-deleted accounts are invisible.
pub trait AccountReader {
    /// Retrieve an active account by id.
    fn get_account_by_id(&self, id: AccountId) -> RepositoryResult<Option<Account>>;
    /// Retrieve an active account by email.
    fn get_account_by_email(&self, email: &AccountEmail) -> RepositoryResult<Option<Account>>;
    /// List active accounts, newest first.
    fn list_accounts(&self, query: AccountListQuery) -> RepositoryResult<Vec<Account>>;
}

/// Write operations for accounts.
pub trait AccountWriter {
    /// Persist a new active account.
    fn create_account(&self, account: &NewAccount) -> RepositoryResult<Account>;
    /// Replace email and name of an active account, returning the updated row.
    fn update_account(
        &self,
        id: AccountId,
        email: &AccountEmail,
        name: &AccountName,
    ) -> RepositoryResult<Option<Account>>;
    /// Soft-delete an active account. Returns the number of rows updated.
    fn delete_account(&self, id: AccountId) -> RepositoryResult<usize>;
}
