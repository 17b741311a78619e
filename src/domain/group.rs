use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{GroupId, GroupName, GroupStatus, SearchRadius, UserId};

/// A set of users collaborating on a shared restaurant search.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Group {
    pub id: GroupId,
    pub name: GroupName,
    pub created_by: UserId,
    pub status: GroupStatus,
}

/// Data required to create a [`Group`]; the creator becomes its first member.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewGroup {
    pub name: GroupName,
    pub created_by: UserId,
    pub joined_at: NaiveDateTime,
}

/// Membership of a user in a group together with their own search radius.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GroupMember {
    pub group_id: GroupId,
    pub user_id: UserId,
    pub search_radius: SearchRadius,
    pub joined_at: NaiveDateTime,
}

/// Data required to add a member to a group.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewGroupMember {
    pub group_id: GroupId,
    pub user_id: UserId,
    pub search_radius: SearchRadius,
    pub joined_at: NaiveDateTime,
}
