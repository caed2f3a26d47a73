//! AccountService: registration, login and contact lookup.

use std::sync::Arc;

use sea_orm::DatabaseConnection;
use tracing::{debug, info};

use super::credentials::CredentialVerifier;
use super::sessions::SessionManager;
use crate::db::txn::with_txn;
use crate::domain::clock::Clock;
use crate::errors::domain::{DomainError, NotFoundKind, ValidationKind};
use crate::logging::pii::Redacted;
use crate::logging::security;
use crate::repos::accounts::{self, Account};
use crate::state::AppState;

fn no_such_user() -> DomainError {
    DomainError::not_found(NotFoundKind::Account, "No such user.")
}

#[derive(Debug, Clone)]
pub struct AccountService {
    db: DatabaseConnection,
    clock: Arc<dyn Clock>,
    credentials: Arc<dyn CredentialVerifier>,
    sessions: SessionManager,
    min_password_len: usize,
}

impl AccountService {
    pub fn new(state: &AppState) -> Self {
        Self {
            db: state.db().clone(),
            clock: state.clock(),
            credentials: state.credentials(),
            sessions: SessionManager::new(state),
            min_password_len: state.config().min_password_len,
        }
    }

    fn check_password(&self, password: &str) -> Result<(), DomainError> {
        if password.chars().count() < self.min_password_len {
            return Err(DomainError::validation(
                ValidationKind::PasswordTooShort,
                format!(
                    "Password must be at least {} characters.",
                    self.min_password_len
                ),
            ));
        }
        Ok(())
    }

    /// Create an account. The display name is trimmed; a duplicate is a
    /// `DisplayNameTaken` conflict.
    pub async fn register(&self, display_name: &str, password: &str) -> Result<Account, DomainError> {
        let display_name = display_name.trim().to_string();
        if display_name.is_empty() {
            return Err(DomainError::validation(
                ValidationKind::DisplayNameRequired,
                "A display name is required.",
            ));
        }
        self.check_password(password)?;

        let password_hash = self.credentials.hash(password)?;
        let now = self.clock.now();
        let account = with_txn(&self.db, move |txn| {
            Box::pin(async move {
                accounts::create_account(txn, &display_name, password_hash, now).await
            })
        })
        .await?;

        info!(account_id = account.id, display_name = %account.display_name, "account registered");
        Ok(account)
    }

    /// Check credentials and mint a session token.
    pub async fn login(
        &self,
        display_name: &str,
        password: &str,
    ) -> Result<(Account, String), DomainError> {
        let display_name = display_name.trim();
        let Some(credential) =
            accounts::find_credential_by_display_name(&self.db, display_name).await?
        else {
            security::login_failed("unknown_display_name", display_name);
            return Err(no_such_user());
        };

        if !self.credentials.verify(password, &credential.password_hash) {
            security::login_failed("invalid_password", display_name);
            return Err(DomainError::validation(
                ValidationKind::InvalidPassword,
                "Invalid password.",
            ));
        }

        let account = credential.account;
        let token = self.sessions.new_token(account.id).await?;
        info!(account_id = account.id, token = %Redacted(&token), "login succeeded");
        Ok((account, token))
    }

    pub async fn set_password(&self, account_id: i64, password: &str) -> Result<Account, DomainError> {
        self.check_password(password)?;
        let password_hash = self.credentials.hash(password)?;

        let account = with_txn(&self.db, move |txn| {
            Box::pin(async move {
                match accounts::update_password_hash(txn, account_id, password_hash).await {
                    Err(e) if e.is_not_found() => Err(no_such_user()),
                    other => other,
                }
            })
        })
        .await?;

        info!(account_id, "password updated");
        Ok(account)
    }

    pub async fn lookup_contact(&self, display_name: &str) -> Result<Account, DomainError> {
        let account = accounts::find_by_display_name(&self.db, display_name.trim())
            .await?
            .ok_or_else(no_such_user)?;
        debug!(account_id = account.id, "contact found");
        Ok(account)
    }

    pub async fn find_account(&self, account_id: i64) -> Result<Account, DomainError> {
        accounts::find_by_id(&self.db, account_id)
            .await?
            .ok_or_else(no_such_user)
    }
}
