use chrono::Utc;

use crate::domain::account::{Account, NewAccount};
use crate::domain::types::{AccountEmail, AccountId, AccountName};
use crate::repository::{AccountListQuery, AccountReader, AccountWriter};

use super::errors::store_error;
use super::{ServiceError, ServiceResult};

pub fn create_account<R>(email: &str, name: &str, repo: &R) -> ServiceResult<Account>
where
    R: AccountWriter,
{
    let now = Utc::now().naive_utc();
    let account = NewAccount {
        email: AccountEmail::new(email)?,
        name: AccountName::new(name)?,
        created_at: now,
        updated_at: now,
    };
    repo.create_account(&account)
        .map_err(|e| store_error("create account", e))
}

pub fn get_account<R>(account_id: i32, repo: &R) -> ServiceResult<Account>
where
    R: AccountReader,
{
    let account_id = AccountId::new(account_id)?;
    match repo.get_account_by_id(account_id) {
        Ok(Some(account)) => Ok(account),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => Err(store_error("get account", e)),
    }
}

pub fn get_account_by_email<R>(email: &str, repo: &R) -> ServiceResult<Account>
where
    R: AccountReader,
{
    let email = AccountEmail::new(email)?;
    match repo.get_account_by_email(&email) {
        Ok(Some(account)) => Ok(account),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => Err(store_error("get account by email", e)),
    }
}

pub fn update_account<R>(account_id: i32, email: &str, name: &str, repo: &R) -> ServiceResult<Account>
where
    R: AccountWriter,
{
    let account_id = AccountId::new(account_id)?;
    let email = AccountEmail::new(email)?;
    let name = AccountName::new(name)?;

    match repo.update_account(account_id, &email, &name) {
        Ok(Some(account)) => Ok(account),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => Err(store_error("update account", e)),
    }
}

/// Soft delete; the row stays but is no longer visible to reads.
pub fn delete_account<R>(account_id: i32, repo: &R) -> ServiceResult<()>
where
    R: AccountWriter,
{
    let account_id = AccountId::new(account_id)?;
    match repo.delete_account(account_id) {
        Ok(0) => Err(ServiceError::NotFound),
        Ok(_) => Ok(()),
        Err(e) => Err(store_error("delete account", e)),
    }
}

/// Active accounts, newest first. A non-positive `limit` means 50.
pub fn list_accounts<R>(limit: i64, offset: i64, repo: &R) -> ServiceResult<Vec<Account>>
where
    R: AccountReader,
{
    repo.list_accounts(AccountListQuery::new(limit, offset))
        .map_err(|e| store_error("list accounts", e))
}
