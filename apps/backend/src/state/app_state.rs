use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::config::engine::EngineConfig;
use crate::domain::clock::Clock;
use crate::domain::player_order::PlayerOrder;
use crate::services::credentials::CredentialVerifier;

/// Explicitly constructed bundle of the store handle, engine settings and
/// injectable collaborators. Cloning is cheap; every service takes what it
/// needs from here at construction.
#[derive(Debug, Clone)]
pub struct AppState {
    db: DatabaseConnection,
    config: EngineConfig,
    clock: Arc<dyn Clock>,
    player_order: Arc<dyn PlayerOrder>,
    credentials: Arc<dyn CredentialVerifier>,
}

impl AppState {
    pub fn new(
        db: DatabaseConnection,
        config: EngineConfig,
        clock: Arc<dyn Clock>,
        player_order: Arc<dyn PlayerOrder>,
        credentials: Arc<dyn CredentialVerifier>,
    ) -> Self {
        Self {
            db,
            config,
            clock,
            player_order,
            credentials,
        }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn clock(&self) -> Arc<dyn Clock> {
        Arc::clone(&self.clock)
    }

    pub fn player_order(&self) -> Arc<dyn PlayerOrder> {
        Arc::clone(&self.player_order)
    }

    pub fn credentials(&self) -> Arc<dyn CredentialVerifier> {
        Arc::clone(&self.credentials)
    }
}
