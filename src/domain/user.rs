use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::geo::Coordinates;
use crate::domain::types::{DietaryRestriction, UserId};

/// A user's preferences and home location.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub user_id: UserId,
    /// Opaque preference payload owned by the caller.
    pub preferences: Value,
    pub home: Coordinates,
    pub dietary_restrictions: Vec<DietaryRestriction>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Data required to insert a new [`UserProfile`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewUserProfile {
    pub user_id: UserId,
    pub preferences: Value,
    pub home: Coordinates,
    pub dietary_restrictions: Vec<DietaryRestriction>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Full replacement of the mutable profile fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfileUpdate {
    pub preferences: Value,
    pub home: Coordinates,
    pub dietary_restrictions: Vec<DietaryRestriction>,
    pub updated_at: NaiveDateTime,
}
