//! GameService: completed-game history and reaping of stalled games.

use std::collections::HashMap;
use std::sync::Arc;

use sea_orm::DatabaseConnection;
use tracing::{debug, info, warn};

use super::completion::complete_if_finished;
use crate::db::txn::with_txn;
use crate::domain::clock::Clock;
use crate::domain::game::{GameRecord, PlayedTurn};
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::repos::games::{self, CompletionRecord};
use crate::repos::turns;
use crate::state::AppState;

fn no_such_game() -> DomainError {
    DomainError::not_found(NotFoundKind::Game, "No such game.")
}

#[derive(Debug, Clone)]
pub struct GameService {
    db: DatabaseConnection,
    clock: Arc<dyn Clock>,
}

impl GameService {
    pub fn new(state: &AppState) -> Self {
        Self {
            db: state.db().clone(),
            clock: state.clock(),
        }
    }

    /// Completed games the account played in whose completion id is greater
    /// than `since_completion_id`, in completion order.
    pub async fn completed_games(
        &self,
        account_id: i64,
        since_completion_id: i64,
    ) -> Result<Vec<GameRecord>, DomainError> {
        let completions =
            games::find_completions_for_account(&self.db, account_id, since_completion_id).await?;
        let records = self.assemble(completions).await?;
        debug!(account_id, since_completion_id, games = records.len(), "history resolved");
        Ok(records)
    }

    /// One completed game the account played in. In-progress games and
    /// games the account had no part in are reported as not found.
    pub async fn game_by_id(&self, account_id: i64, game_id: i64) -> Result<GameRecord, DomainError> {
        let completion = games::find_completion_for_game(&self.db, game_id)
            .await?
            .ok_or_else(no_such_game)?;

        let record = self
            .assemble(vec![completion])
            .await?
            .into_iter()
            .next()
            .ok_or_else(no_such_game)?;

        let played = record
            .turns
            .iter()
            .any(|played| played.turn.account_id == account_id);
        if !played {
            return Err(no_such_game());
        }
        Ok(record)
    }

    /// Finish every incomplete game whose deadline has passed: drop its
    /// unplayed turns and record completion with the turns that were
    /// played. Each game is handled in its own transaction. Returns how many
    /// games were completed.
    pub async fn reap_expired_games(&self) -> Result<usize, DomainError> {
        let now = self.clock.now();
        let expired = games::find_expired_incomplete(&self.db, now).await?;

        let mut reaped = 0;
        for game_id in expired {
            let completed = with_txn(&self.db, move |txn| {
                Box::pin(async move {
                    let dropped = turns::delete_unplayed_if_expired(txn, game_id, now).await?;
                    debug!(game_id, dropped, "dropped unplayed turns");
                    let record = complete_if_finished(txn, game_id, now).await?;
                    Ok::<_, DomainError>(record.is_some())
                })
            })
            .await;

            match completed {
                Ok(true) => reaped += 1,
                Ok(false) => {}
                Err(e) => warn!(game_id, error = %e, "failed to reap expired game"),
            }
        }

        if reaped > 0 {
            info!(reaped, "reaped expired games");
        }
        Ok(reaped)
    }

    /// Assemble records for the given completions, keeping their order. A
    /// game with an unreadable turn is left out.
    async fn assemble(
        &self,
        completions: Vec<CompletionRecord>,
    ) -> Result<Vec<GameRecord>, DomainError> {
        if completions.is_empty() {
            return Ok(Vec::new());
        }

        let game_ids: Vec<i64> = completions.iter().map(|c| c.game_id).collect();
        let mut by_game: HashMap<i64, Result<Vec<PlayedTurn>, DomainError>> = HashMap::new();
        for (game_id, player, decoded) in turns::turns_with_players(&self.db, game_ids).await? {
            let slot = by_game.entry(game_id).or_insert_with(|| Ok(Vec::new()));
            match (slot, decoded) {
                (Ok(turns), Ok(turn)) => turns.push(PlayedTurn { player, turn }),
                (slot, Err(e)) => *slot = Err(e),
                (Err(_), Ok(_)) => {}
            }
        }

        let mut records = Vec::with_capacity(completions.len());
        for completion in completions {
            match by_game.remove(&completion.game_id).unwrap_or_else(|| Ok(Vec::new())) {
                Ok(turns) => records.push(GameRecord {
                    id: completion.game_id,
                    completion_id: completion.id,
                    completed_at: completion.completed_at,
                    turns,
                }),
                Err(e) => warn!(game_id = completion.game_id, error = %e, "omitting game with unreadable turns"),
            }
        }
        Ok(records)
    }
}
