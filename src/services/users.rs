use chrono::Utc;

use crate::domain::types::UserId;
use crate::domain::user::{NewUserProfile, UserProfile, UserProfileUpdate};
use crate::forms::profiles::{ProfileForm, ProfilePayload};
use crate::repository::{UserProfileReader, UserProfileWriter};

use super::errors::store_error;
use super::locations::proximity_query;
use super::{ServiceError, ServiceResult};

pub fn create_profile<R>(user_id: &str, form: ProfileForm, repo: &R) -> ServiceResult<UserProfile>
where
    R: UserProfileWriter,
{
    let user_id = UserId::new(user_id)?;
    let payload = ProfilePayload::try_from(form)?;
    let now = Utc::now().naive_utc();

    let profile = NewUserProfile {
        user_id,
        preferences: payload.preferences,
        home: payload.home,
        dietary_restrictions: payload.dietary_restrictions,
        created_at: now,
        updated_at: now,
    };
    repo.create_profile(&profile)
        .map_err(|e| store_error("create profile", e))
}

pub fn get_profile<R>(user_id: &str, repo: &R) -> ServiceResult<UserProfile>
where
    R: UserProfileReader,
{
    let user_id = UserId::new(user_id)?;
    match repo.get_profile(&user_id) {
        Ok(Some(profile)) => Ok(profile),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => Err(store_error("get profile", e)),
    }
}

/// Replace preferences, home location and dietary restrictions wholesale.
pub fn update_profile<R>(user_id: &str, form: ProfileForm, repo: &R) -> ServiceResult<UserProfile>
where
    R: UserProfileReader + UserProfileWriter,
{
    let user_id = UserId::new(user_id)?;
    let payload = ProfilePayload::try_from(form)?;

    let update = UserProfileUpdate {
        preferences: payload.preferences,
        home: payload.home,
        dietary_restrictions: payload.dietary_restrictions,
        updated_at: Utc::now().naive_utc(),
    };
    match repo.update_profile(&user_id, &update) {
        Ok(0) => return Err(ServiceError::NotFound),
        Ok(_) => {}
        Err(e) => return Err(store_error("update profile", e)),
    }

    match repo.get_profile(&user_id) {
        Ok(Some(profile)) => Ok(profile),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => Err(store_error("get profile", e)),
    }
}

/// Profiles whose home lies within `radius_km`, most recently created first.
pub fn nearby_users<R>(
    lat: f64,
    lon: f64,
    radius_km: f64,
    repo: &R,
) -> ServiceResult<Vec<UserProfile>>
where
    R: UserProfileReader,
{
    let query = proximity_query(lat, lon, radius_km)?;
    repo.list_nearby_profiles(query)
        .map_err(|e| store_error("list nearby users", e))
}
