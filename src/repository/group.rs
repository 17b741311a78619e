use diesel::prelude::*;

use crate::domain::group::{Group, GroupMember, NewGroup, NewGroupMember};
use crate::domain::types::{GroupId, GroupStatus, SearchRadius};
use crate::domain::user::UserProfile;
use crate::models::group::{
    Group as DbGroup, GroupMember as DbGroupMember, NewGroup as DbNewGroup,
    NewGroupMember as DbNewGroupMember,
};
use crate::models::user::UserProfile as DbUserProfile;
use crate::repository::{
    DieselRepository, GroupReader, GroupWriter, RepositoryError, RepositoryResult,
};

impl GroupReader for DieselRepository {
    fn get_group_by_id(&self, id: GroupId) -> RepositoryResult<Option<Group>> {
        use crate::schema::groups;

        let mut conn = self.conn()?;

        let group = groups::table
            .filter(groups::id.eq(id.get()))
            .first::<DbGroup>(&mut conn)
            .optional()?;

        let group = group.map(TryInto::try_into).transpose()?;
        Ok(group)
    }

    fn list_group_members(&self, group_id: GroupId) -> RepositoryResult<Vec<GroupMember>> {
        use crate::schema::group_members;

        let mut conn = self.conn()?;

        let items = group_members::table
            .filter(group_members::group_id.eq(group_id.get()))
            .order((group_members::joined_at.desc(), group_members::id.desc()))
            .load::<DbGroupMember>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<GroupMember>, _>>()?;

        Ok(items)
    }

    fn list_member_profiles(&self, group_id: GroupId) -> RepositoryResult<Vec<UserProfile>> {
        use crate::schema::{group_members, user_profiles};

        let mut conn = self.conn()?;

        let items = group_members::table
            .inner_join(user_profiles::table.on(user_profiles::user_id.eq(group_members::user_id)))
            .filter(group_members::group_id.eq(group_id.get()))
            .order((group_members::joined_at.desc(), group_members::id.desc()))
            .select(user_profiles::all_columns)
            .load::<DbUserProfile>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<UserProfile>, _>>()?;

        Ok(items)
    }
}

impl GroupWriter for DieselRepository {
    fn create_group(&self, group: &NewGroup) -> RepositoryResult<Group> {
        use crate::schema::{group_members, groups};

        let mut conn = self.conn()?;

        // Group row and creator membership commit together or not at all.
        let status = GroupStatus::planning();
        let created = conn.transaction::<_, RepositoryError, _>(|conn| {
            let created = diesel::insert_into(groups::table)
                .values(DbNewGroup {
                    name: group.name.as_str(),
                    created_by: group.created_by.as_str(),
                    status: status.as_str(),
                })
                .get_result::<DbGroup>(conn)?;

            diesel::insert_into(group_members::table)
                .values(DbNewGroupMember {
                    group_id: created.id,
                    user_id: group.created_by.as_str(),
                    search_radius_meters: SearchRadius::default().meters(),
                    joined_at: group.joined_at,
                })
                .execute(conn)?;

            Ok(created)
        })?;

        Ok(created.try_into()?)
    }

    fn add_group_member(&self, member: &NewGroupMember) -> RepositoryResult<usize> {
        use crate::schema::group_members;

        let mut conn = self.conn()?;

        let affected = diesel::insert_into(group_members::table)
            .values(DbNewGroupMember::from(member))
            .execute(&mut conn)?;

        Ok(affected)
    }
}
