use chrono::Utc;
use diesel::prelude::*;

use crate::domain::account::{Account, NewAccount};
use crate::domain::types::{AccountEmail, AccountId, AccountName, AccountStatus};
use crate::models::account::{Account as DbAccount, NewAccount as DbNewAccount};
use crate::repository::{
    AccountListQuery, AccountReader, AccountWriter, DieselRepository, RepositoryResult,
};

const DELETED: &str = AccountStatus::Deleted.as_str();

impl AccountReader for DieselRepository {
    fn get_account_by_id(&self, id: AccountId) -> RepositoryResult<Option<Account>> {
        use crate::schema::accounts;

        let mut conn = self.conn()?;

        let account = accounts::table
            .filter(accounts::id.eq(id.get()))
            .filter(accounts::status.ne(DELETED))
            .first::<DbAccount>(&mut conn)
            .optional()?;

        let account = account.map(TryInto::try_into).transpose()?;
        Ok(account)
    }

    fn get_account_by_email(&self, email: &AccountEmail) -> RepositoryResult<Option<Account>> {
        use crate::schema::accounts;

        let mut conn = self.conn()?;

        let account = accounts::table
            .filter(accounts::email.eq(email.as_str()))
            .filter(accounts::status.ne(DELETED))
            .first::<DbAccount>(&mut conn)
            .optional()?;

        let account = account.map(TryInto::try_into).transpose()?;
        Ok(account)
    }

    fn list_accounts(&self, query: AccountListQuery) -> RepositoryResult<Vec<Account>> {
        use crate::schema::accounts;

        let mut conn = self.conn()?;

        let items = accounts::table
            .filter(accounts::status.ne(DELETED))
            .order((accounts::created_at.desc(), accounts::id.desc()))
            .limit(query.limit)
            .offset(query.offset)
            .load::<DbAccount>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Account>, _>>()?;

        Ok(items)
    }
}

impl AccountWriter for DieselRepository {
    fn create_account(&self, account: &NewAccount) -> RepositoryResult<Account> {
        use crate::schema::accounts;

        let mut conn = self.conn()?;

        let created = diesel::insert_into(accounts::table)
            .values(DbNewAccount::from(account))
            .get_result::<DbAccount>(&mut conn)?;

        Ok(created.try_into()?)
    }

    fn update_account(
        &self,
        id: AccountId,
        email: &AccountEmail,
        name: &AccountName,
    ) -> RepositoryResult<Option<Account>> {
        use crate::schema::accounts;

        let mut conn = self.conn()?;

        let updated = diesel::update(
            accounts::table
                .filter(accounts::id.eq(id.get()))
                .filter(accounts::status.ne(DELETED)),
        )
        .set((
            accounts::email.eq(email.as_str()),
            accounts::name.eq(name.as_str()),
            accounts::updated_at.eq(Utc::now().naive_utc()),
        ))
        .get_result::<DbAccount>(&mut conn)
        .optional()?;

        let updated = updated.map(TryInto::try_into).transpose()?;
        Ok(updated)
    }

    fn delete_account(&self, id: AccountId) -> RepositoryResult<usize> {
        use crate::schema::accounts;

        let mut conn = self.conn()?;

        let affected = diesel::update(
            accounts::table
                .filter(accounts::id.eq(id.get()))
                .filter(accounts::status.ne(DELETED)),
        )
        .set((
            accounts::status.eq(DELETED),
            accounts::updated_at.eq(Utc::now().naive_utc()),
        ))
        .execute(&mut conn)?;

        Ok(affected)
    }
}
