use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{AccountEmail, AccountId, AccountName, AccountStatus};

/// Account record keyed by a unique email address.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Account {
    pub id: AccountId,
    pub email: AccountEmail,
    pub name: AccountName,
    pub status: AccountStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Data required to insert a new [`Account`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewAccount {
    pub email: AccountEmail,
    pub name: AccountName,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
