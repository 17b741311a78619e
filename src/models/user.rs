use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::geo::Coordinates;
use crate::domain::types::{DietaryRestriction, TypeConstraintError, UserId};
use crate::domain::user::{
    NewUserProfile as DomainNewUserProfile, UserProfile as DomainUserProfile, UserProfileUpdate,
};
use crate::models::parse_json;

/// Diesel model representing the `user_profiles` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::user_profiles, primary_key(user_id))]
pub struct UserProfile {
    pub user_id: String,
    pub preferences: String,
    pub home_location_lat: f64,
    pub home_location_lon: f64,
    /// JSON array of restriction labels, order preserved.
    pub dietary_restrictions: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::user_profiles)]
pub struct NewUserProfile {
    pub user_id: String,
    pub preferences: String,
    pub home_location_lat: f64,
    pub home_location_lon: f64,
    pub dietary_restrictions: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, AsChangeset)]
#[diesel(table_name = crate::schema::user_profiles)]
pub struct UserProfileChangeset {
    pub preferences: String,
    pub home_location_lat: f64,
    pub home_location_lon: f64,
    pub dietary_restrictions: String,
    pub updated_at: NaiveDateTime,
}

fn encode_restrictions(restrictions: &[DietaryRestriction]) -> String {
    serde_json::Value::from(
        restrictions
            .iter()
            .map(|r| r.as_str().to_string())
            .collect::<Vec<_>>(),
    )
    .to_string()
}

fn decode_restrictions(raw: &str) -> Result<Vec<DietaryRestriction>, TypeConstraintError> {
    let labels: Vec<String> = serde_json::from_str(raw).map_err(|e| {
        TypeConstraintError::InvalidValue(format!("dietary_restrictions is not a JSON array: {e}"))
    })?;
    labels.into_iter().map(DietaryRestriction::new).collect()
}

impl TryFrom<UserProfile> for DomainUserProfile {
    type Error = TypeConstraintError;

    fn try_from(profile: UserProfile) -> Result<Self, Self::Error> {
        Ok(Self {
            user_id: UserId::new(profile.user_id)?,
            preferences: parse_json(&profile.preferences, "preferences")?,
            home: Coordinates::new(profile.home_location_lat, profile.home_location_lon)?,
            dietary_restrictions: decode_restrictions(&profile.dietary_restrictions)?,
            created_at: profile.created_at,
            updated_at: profile.updated_at,
        })
    }
}

impl From<&DomainNewUserProfile> for NewUserProfile {
    fn from(profile: &DomainNewUserProfile) -> Self {
        Self {
            user_id: profile.user_id.as_str().to_string(),
            preferences: profile.preferences.to_string(),
            home_location_lat: profile.home.lat.get(),
            home_location_lon: profile.home.lon.get(),
            dietary_restrictions: encode_restrictions(&profile.dietary_restrictions),
            created_at: profile.created_at,
            updated_at: profile.updated_at,
        }
    }
}

impl From<&UserProfileUpdate> for UserProfileChangeset {
    fn from(update: &UserProfileUpdate) -> Self {
        Self {
            preferences: update.preferences.to_string(),
            home_location_lat: update.home.lat.get(),
            home_location_lon: update.home.lon.get(),
            dietary_restrictions: encode_restrictions(&update.dietary_restrictions),
            updated_at: update.updated_at,
        }
    }
}
