use diesel::prelude::*;

use crate::db::great_circle_km;
use crate::domain::types::UserId;
use crate::domain::user::{NewUserProfile, UserProfile, UserProfileUpdate};
use crate::models::user::{
    NewUserProfile as DbNewUserProfile, UserProfile as DbUserProfile, UserProfileChangeset,
};
use crate::repository::{
    DieselRepository, ProximityQuery, RepositoryResult, UserProfileReader, UserProfileWriter,
};

impl UserProfileReader for DieselRepository {
    fn get_profile(&self, user_id: &UserId) -> RepositoryResult<Option<UserProfile>> {
        use crate::schema::user_profiles;

        let mut conn = self.conn()?;

        let profile = user_profiles::table
            .filter(user_profiles::user_id.eq(user_id.as_str()))
            .first::<DbUserProfile>(&mut conn)
            .optional()?;

        let profile = profile.map(TryInto::try_into).transpose()?;
        Ok(profile)
    }

    fn list_nearby_profiles(&self, query: ProximityQuery) -> RepositoryResult<Vec<UserProfile>> {
        use crate::schema::user_profiles;

        let mut conn = self.conn()?;

        let items = user_profiles::table
            .filter(
                great_circle_km(
                    query.center.lat.get(),
                    query.center.lon.get(),
                    user_profiles::home_location_lat,
                    user_profiles::home_location_lon,
                )
                .le(query.radius.get()),
            )
            .order((user_profiles::created_at.desc(), user_profiles::user_id.asc()))
            .load::<DbUserProfile>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<UserProfile>, _>>()?;

        Ok(items)
    }
}

impl UserProfileWriter for DieselRepository {
    fn create_profile(&self, profile: &NewUserProfile) -> RepositoryResult<UserProfile> {
        use crate::schema::user_profiles;

        let mut conn = self.conn()?;

        let created = diesel::insert_into(user_profiles::table)
            .values(DbNewUserProfile::from(profile))
            .get_result::<DbUserProfile>(&mut conn)?;

        Ok(created.try_into()?)
    }

    fn update_profile(
        &self,
        user_id: &UserId,
        update: &UserProfileUpdate,
    ) -> RepositoryResult<usize> {
        use crate::schema::user_profiles;

        let mut conn = self.conn()?;

        let affected = diesel::update(
            user_profiles::table.filter(user_profiles::user_id.eq(user_id.as_str())),
        )
        .set(UserProfileChangeset::from(update))
        .execute(&mut conn)?;

        Ok(affected)
    }
}
