//! Account repository functions for domain layer (generic over ConnectionTrait).

use sea_orm::ConnectionTrait;
use time::OffsetDateTime;

use crate::adapters::accounts_sea::{self as accounts_adapter, AccountCreate};
use crate::entities::accounts;
use crate::errors::domain::DomainError;

/// Account domain model. The credential digest stays inside this module's
/// [`AccountCredential`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: i64,
    pub display_name: String,
    pub created_at: OffsetDateTime,
}

/// An account together with its stored digest, for credential checks only.
#[derive(Debug, Clone)]
pub struct AccountCredential {
    pub account: Account,
    pub password_hash: String,
}

impl From<accounts::Model> for Account {
    fn from(model: accounts::Model) -> Self {
        Self {
            id: model.id,
            display_name: model.display_name,
            created_at: model.created_at,
        }
    }
}

impl From<accounts::Model> for AccountCredential {
    fn from(model: accounts::Model) -> Self {
        let password_hash = model.password_hash.clone();
        Self {
            account: Account::from(model),
            password_hash,
        }
    }
}

pub async fn create_account<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    display_name: &str,
    password_hash: String,
    created_at: OffsetDateTime,
) -> Result<Account, DomainError> {
    let dto = AccountCreate {
        display_name: display_name.to_string(),
        password_hash,
        created_at,
    };
    let account = accounts_adapter::create_account(conn, dto).await?;
    Ok(Account::from(account))
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    account_id: i64,
) -> Result<Option<Account>, DomainError> {
    let account = accounts_adapter::find_by_id(conn, account_id).await?;
    Ok(account.map(Account::from))
}

pub async fn find_by_display_name<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    display_name: &str,
) -> Result<Option<Account>, DomainError> {
    let account = accounts_adapter::find_by_display_name(conn, display_name).await?;
    Ok(account.map(Account::from))
}

pub async fn find_credential_by_display_name<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    display_name: &str,
) -> Result<Option<AccountCredential>, DomainError> {
    let account = accounts_adapter::find_by_display_name(conn, display_name).await?;
    Ok(account.map(AccountCredential::from))
}

pub async fn update_password_hash<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    account_id: i64,
    password_hash: String,
) -> Result<Account, DomainError> {
    let account = accounts_adapter::update_password_hash(conn, account_id, password_hash).await?;
    Ok(Account::from(account))
}
