use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::group::{
    Group as DomainGroup, GroupMember as DomainGroupMember,
    NewGroupMember as DomainNewGroupMember,
};
use crate::domain::types::{GroupName, GroupStatus, TypeConstraintError, UserId};

/// Diesel model representing the `groups` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::groups)]
pub struct Group {
    pub id: i32,
    pub name: String,
    pub created_by: String,
    pub status: String,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::groups)]
pub struct NewGroup<'a> {
    pub name: &'a str,
    pub created_by: &'a str,
    pub status: &'a str,
}

/// Diesel model representing the `group_members` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::group_members)]
pub struct GroupMember {
    pub id: i32,
    pub group_id: i32,
    pub user_id: String,
    pub search_radius_meters: i32,
    pub joined_at: NaiveDateTime,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::group_members)]
pub struct NewGroupMember<'a> {
    pub group_id: i32,
    pub user_id: &'a str,
    pub search_radius_meters: i32,
    pub joined_at: NaiveDateTime,
}

impl TryFrom<Group> for DomainGroup {
    type Error = TypeConstraintError;

    fn try_from(group: Group) -> Result<Self, Self::Error> {
        Ok(Self {
            id: group.id.try_into()?,
            name: GroupName::new(group.name)?,
            created_by: UserId::new(group.created_by)?,
            status: GroupStatus::new(group.status)?,
        })
    }
}

impl TryFrom<GroupMember> for DomainGroupMember {
    type Error = TypeConstraintError;

    fn try_from(member: GroupMember) -> Result<Self, Self::Error> {
        Ok(Self {
            group_id: member.group_id.try_into()?,
            user_id: UserId::new(member.user_id)?,
            search_radius: member.search_radius_meters.try_into()?,
            joined_at: member.joined_at,
        })
    }
}

impl<'a> From<&'a DomainNewGroupMember> for NewGroupMember<'a> {
    fn from(member: &'a DomainNewGroupMember) -> Self {
        Self {
            group_id: member.group_id.get(),
            user_id: member.user_id.as_str(),
            search_radius_meters: member.search_radius.meters(),
            joined_at: member.joined_at,
        }
    }
}
