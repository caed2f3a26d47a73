use std::sync::Arc;

use crate::config::db::{DbKind, DbProfile};
use crate::config::engine::EngineConfig;
use crate::domain::clock::{Clock, SystemClock};
use crate::domain::player_order::{PlayerOrder, RandomOrder};
use crate::error::AppError;
use crate::infra::db::connect_db;
use crate::services::credentials::{Argon2Verifier, CredentialVerifier};
use crate::state::AppState;

/// Builder for creating AppState instances (used in both tests and callers
/// embedding the engine)
pub struct StateBuilder {
    db_profile: Option<DbProfile>,
    db_kind: Option<DbKind>,
    config: EngineConfig,
    clock: Arc<dyn Clock>,
    player_order: Arc<dyn PlayerOrder>,
    credentials: Arc<dyn CredentialVerifier>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            db_profile: None,
            db_kind: None,
            config: EngineConfig::default(),
            clock: Arc::new(SystemClock),
            player_order: Arc::new(RandomOrder),
            credentials: Arc::new(Argon2Verifier),
        }
    }

    pub fn with_db(mut self, profile: DbProfile) -> Self {
        self.db_profile = Some(profile);
        self
    }

    /// Override the storage engine; otherwise `DB_KIND` decides.
    pub fn with_db_kind(mut self, kind: DbKind) -> Self {
        self.db_kind = Some(kind);
        self
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_player_order(mut self, player_order: Arc<dyn PlayerOrder>) -> Self {
        self.player_order = player_order;
        self
    }

    pub fn with_credentials(mut self, credentials: Arc<dyn CredentialVerifier>) -> Self {
        self.credentials = credentials;
        self
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        let profile = self
            .db_profile
            .ok_or_else(|| AppError::config("No database profile configured; call with_db()"))?;
        let kind = match self.db_kind {
            Some(kind) => kind,
            None => DbKind::from_env()?,
        };

        // single entrypoint: connect + migrate
        let conn = connect_db(profile, kind).await?;
        Ok(AppState::new(
            conn,
            self.config,
            self.clock,
            self.player_order,
            self.credentials,
        ))
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
