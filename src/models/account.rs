use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::account::{Account as DomainAccount, NewAccount as DomainNewAccount};
use crate::domain::types::{AccountEmail, AccountName, AccountStatus, TypeConstraintError};

/// Diesel model representing the `accounts` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::accounts)]
pub struct Account {
    pub id: i32,
    pub email: String,
    pub name: String,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::accounts)]
pub struct NewAccount<'a> {
    pub email: &'a str,
    pub name: &'a str,
    pub status: &'a str,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Account> for DomainAccount {
    type Error = TypeConstraintError;

    fn try_from(account: Account) -> Result<Self, Self::Error> {
        Ok(Self {
            id: account.id.try_into()?,
            email: AccountEmail::new(account.email)?,
            name: AccountName::new(account.name)?,
            status: AccountStatus::try_from(account.status)?,
            created_at: account.created_at,
            updated_at: account.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewAccount> for NewAccount<'a> {
    fn from(account: &'a DomainNewAccount) -> Self {
        Self {
            email: account.email.as_str(),
            name: account.name.as_str(),
            status: AccountStatus::Active.as_str(),
            created_at: account.created_at,
            updated_at: account.updated_at,
        }
    }
}
