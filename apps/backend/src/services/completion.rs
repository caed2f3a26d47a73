//! CompletionDetector: records a game's completion exactly once.

use std::sync::Arc;

use sea_orm::{ConnectionTrait, DatabaseConnection};
use time::OffsetDateTime;
use tracing::{debug, info};

use crate::db::txn::with_txn;
use crate::domain::clock::Clock;
use crate::errors::domain::DomainError;
use crate::repos::games::{self, CompletionRecord};
use crate::state::AppState;

/// Completion step usable inside an existing transaction.
pub(crate) async fn complete_if_finished<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    now: OffsetDateTime,
) -> Result<Option<CompletionRecord>, DomainError> {
    let record = games::record_completion_if_finished(conn, game_id, now).await?;
    match &record {
        Some(record) => info!(game_id, completion_id = record.id, "game completed"),
        None => debug!(game_id, "game not finished or already completed"),
    }
    Ok(record)
}

#[derive(Debug, Clone)]
pub struct CompletionDetector {
    db: DatabaseConnection,
    clock: Arc<dyn Clock>,
}

impl CompletionDetector {
    pub fn new(state: &AppState) -> Self {
        Self {
            db: state.db().clone(),
            clock: state.clock(),
        }
    }

    /// Record the game's completion if every turn is complete and no record
    /// exists yet. Unfinished and already-completed games are a no-op.
    ///
    /// Returns true only for the call that created the record.
    pub async fn maybe_complete_game(&self, game_id: i64) -> Result<bool, DomainError> {
        let now = self.clock.now();
        let record = with_txn(&self.db, move |txn| {
            Box::pin(async move { complete_if_finished(txn, game_id, now).await })
        })
        .await?;
        Ok(record.is_some())
    }
}
