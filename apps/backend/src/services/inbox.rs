//! InboxResolver: what each account owes next.

use sea_orm::DatabaseConnection;
use tracing::{debug, warn};

use crate::domain::inbox::InboxEntry;
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::repos::turns;
use crate::state::AppState;

#[derive(Debug, Clone)]
pub struct InboxResolver {
    db: DatabaseConnection,
}

impl InboxResolver {
    pub fn new(state: &AppState) -> Self {
        Self {
            db: state.db().clone(),
        }
    }

    /// One entry per game whose current turn belongs to `account_id`, with
    /// the game's latest completed turn, ordered by game id.
    ///
    /// An entry whose previous turn cannot be decoded is skipped and logged;
    /// the rest of the inbox is still returned.
    pub async fn pending_turns_for_user(
        &self,
        account_id: i64,
    ) -> Result<Vec<InboxEntry>, DomainError> {
        let rows = turns::previous_turns_owed_by(&self.db, account_id).await?;

        let mut entries = Vec::with_capacity(rows.len());
        for row in rows {
            match row {
                Ok(turn) => entries.push(InboxEntry {
                    game_id: turn.game_id,
                    previous_turn: Some(turn),
                }),
                Err(e) => warn!(account_id, error = %e, "skipping unreadable inbox entry"),
            }
        }

        debug!(account_id, entries = entries.len(), "inbox resolved");
        Ok(entries)
    }

    /// The inbox entry for a single game, or `NotFound` when the account
    /// does not own that game's current turn.
    ///
    /// Ownership and the previous turn come from one query. The opening
    /// turn is complete from creation, so an owned current turn always has
    /// a previous one.
    pub async fn pending_turn_for_game(
        &self,
        account_id: i64,
        game_id: i64,
    ) -> Result<InboxEntry, DomainError> {
        match turns::previous_turn_owed_in_game(&self.db, account_id, game_id).await? {
            Some(turn) => Ok(InboxEntry {
                game_id,
                previous_turn: Some(turn),
            }),
            None => {
                debug!(account_id, game_id, "no pending turn in game");
                Err(DomainError::not_found(
                    NotFoundKind::InboxEntry,
                    "No pending turn for this game.",
                ))
            }
        }
    }
}
