//! TurnEngine: claims and completes the current turn of a game.

use std::sync::Arc;

use sea_orm::DatabaseConnection;
use time::Duration;
use tracing::{debug, error, info};

use super::completion::CompletionDetector;
use crate::db::txn::with_txn;
use crate::domain::clock::Clock;
use crate::domain::turn::TurnPayload;
use crate::errors::domain::{DomainError, ValidationKind};
use crate::repos::{games, turns};
use crate::state::AppState;

#[derive(Debug, Clone)]
pub struct TurnEngine {
    db: DatabaseConnection,
    clock: Arc<dyn Clock>,
    turn_window: Duration,
    completion: CompletionDetector,
}

impl TurnEngine {
    pub fn new(state: &AppState) -> Self {
        Self {
            db: state.db().clone(),
            clock: state.clock(),
            turn_window: state.config().turn_window,
            completion: CompletionDetector::new(state),
        }
    }

    /// Complete the game's current turn for `account_id` with `payload`.
    ///
    /// Succeeds only if the current turn (lowest-id incomplete turn of the
    /// game) belongs to the account and has the payload's type; otherwise
    /// returns the single `NotYourTurn` conflict. The check and the write
    /// are one conditional statement, so among concurrent callers at most
    /// one wins. On success the game's deadline is pushed out by the turn
    /// window in the same transaction.
    ///
    /// A drawing with a NaN or infinite number is rejected as `InvalidTurn`
    /// before anything is written.
    ///
    /// Completion detection runs afterwards in its own transaction; if it
    /// fails the turn stays completed and the failure is only logged.
    pub async fn claim_and_complete(
        &self,
        account_id: i64,
        game_id: i64,
        payload: TurnPayload,
    ) -> Result<(), DomainError> {
        if let TurnPayload::Drawing(drawing) = &payload {
            if !drawing.is_finite() {
                debug!(account_id, game_id, "drawing with non-finite values rejected");
                return Err(DomainError::validation(
                    ValidationKind::InvalidTurn,
                    "A drawing may only contain finite numbers.",
                ));
            }
        }

        let is_drawing = payload.is_drawing();
        let next_expiration = self.clock.now() + self.turn_window;

        with_txn(&self.db, move |txn| {
            Box::pin(async move {
                if !turns::complete_current_turn(txn, account_id, game_id, payload).await? {
                    debug!(account_id, game_id, is_drawing, "turn claim rejected");
                    return Err(DomainError::not_your_turn());
                }
                games::set_next_expiration(txn, game_id, next_expiration).await?;
                Ok::<_, DomainError>(())
            })
        })
        .await?;

        info!(account_id, game_id, is_drawing, "turn completed");

        if let Err(e) = self.completion.maybe_complete_game(game_id).await {
            error!(game_id, error = %e, "completion detection failed after a successful turn");
        }
        Ok(())
    }
}
