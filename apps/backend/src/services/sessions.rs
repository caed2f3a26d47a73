//! SessionManager: mints, resolves and expires bearer tokens.

use std::sync::Arc;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::RngCore;
use sea_orm::DatabaseConnection;
use time::Duration;
use tracing::{debug, info, warn};

use crate::db::txn::with_txn;
use crate::domain::clock::Clock;
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::logging::security;
use crate::repos::sessions;
use crate::state::AppState;

/// Random bytes per token (256 bits).
const TOKEN_BYTES: usize = 32;

/// 32 bytes from the thread CSPRNG, URL-safe base64 without padding.
pub fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

#[derive(Debug, Clone)]
pub struct SessionManager {
    db: DatabaseConnection,
    clock: Arc<dyn Clock>,
    ttl: Duration,
}

impl SessionManager {
    pub fn new(state: &AppState) -> Self {
        Self {
            db: state.db().clone(),
            clock: state.clock(),
            ttl: state.config().session_ttl,
        }
    }

    /// Mint a token bound to `account_id`.
    pub async fn new_token(&self, account_id: i64) -> Result<String, DomainError> {
        let now = self.clock.now();
        self.prune(now).await;

        let token = generate_token();
        let stored = token.clone();
        with_txn(&self.db, move |txn| {
            Box::pin(async move {
                sessions::create_session(txn, stored, account_id, now).await?;
                Ok::<_, DomainError>(())
            })
        })
        .await?;

        info!(account_id, "session created");
        Ok(token)
    }

    /// Resolve a token to its account id. Tokens older than the TTL are
    /// treated exactly like unknown ones.
    pub async fn lookup(&self, token: &str) -> Result<i64, DomainError> {
        let now = self.clock.now();
        self.prune(now).await;

        match sessions::find_created_since(&self.db, token, now - self.ttl).await? {
            Some(session) => {
                debug!(account_id = session.account_id, "session resolved");
                Ok(session.account_id)
            }
            None => {
                security::session_rejected(token);
                Err(DomainError::not_found(
                    NotFoundKind::Session,
                    "Invalid authentication token.",
                ))
            }
        }
    }

    /// Drop sessions past the TTL. Failure is logged and otherwise ignored.
    async fn prune(&self, now: time::OffsetDateTime) {
        match sessions::prune_created_before(&self.db, now - self.ttl).await {
            Ok(0) => {}
            Ok(pruned) => debug!(pruned, "pruned expired sessions"),
            Err(e) => warn!(error = %e, "session pruning failed"),
        }
    }
}
