//! Game repository functions for domain layer (generic over ConnectionTrait).

use sea_orm::ConnectionTrait;
use time::OffsetDateTime;

use crate::adapters::games_sea::{self as games_adapter, GameCreate};
use crate::entities::{games, games_completed_at};
use crate::errors::domain::DomainError;

/// Game domain model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    pub id: i64,
    pub created_at: OffsetDateTime,
    pub completed_at_id: Option<i64>,
    pub next_expiration: OffsetDateTime,
}

impl Game {
    pub fn is_complete(&self) -> bool {
        self.completed_at_id.is_some()
    }
}

/// The once-only marker of a finished game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRecord {
    pub id: i64,
    pub game_id: i64,
    pub completed_at: OffsetDateTime,
}

impl From<games::Model> for Game {
    fn from(model: games::Model) -> Self {
        Self {
            id: model.id,
            created_at: model.created_at,
            completed_at_id: model.completed_at_id,
            next_expiration: model.next_expiration,
        }
    }
}

impl From<games_completed_at::Model> for CompletionRecord {
    fn from(model: games_completed_at::Model) -> Self {
        Self {
            id: model.id,
            game_id: model.game_id,
            completed_at: model.completed_at,
        }
    }
}

pub async fn create_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    created_at: OffsetDateTime,
    next_expiration: OffsetDateTime,
) -> Result<Game, DomainError> {
    let game = games_adapter::create_game(conn, GameCreate::new(created_at, next_expiration)).await?;
    Ok(Game::from(game))
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Option<Game>, DomainError> {
    let game = games_adapter::find_by_id(conn, game_id).await?;
    Ok(game.map(Game::from))
}

pub async fn set_next_expiration<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    next_expiration: OffsetDateTime,
) -> Result<(), DomainError> {
    games_adapter::set_next_expiration(conn, game_id, next_expiration).await?;
    Ok(())
}

/// Record the game's completion if all of its turns are complete and it has
/// no record yet, and link the game to it.
///
/// Returns the new record, or `None` when the game is unfinished or was
/// already completed by someone else.
pub async fn record_completion_if_finished<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    completed_at: OffsetDateTime,
) -> Result<Option<CompletionRecord>, DomainError> {
    if !games_adapter::insert_completion_if_finished(conn, game_id, completed_at).await? {
        return Ok(None);
    }

    let record = games_adapter::find_completion_for_game(conn, game_id)
        .await?
        .ok_or_else(|| sea_orm::DbErr::RecordNotFound("Completion record not found".into()))?;
    games_adapter::link_completion(conn, game_id, record.id).await?;
    Ok(Some(CompletionRecord::from(record)))
}

pub async fn find_completion_for_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Option<CompletionRecord>, DomainError> {
    let record = games_adapter::find_completion_for_game(conn, game_id).await?;
    Ok(record.map(CompletionRecord::from))
}

pub async fn find_expired_incomplete<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    now: OffsetDateTime,
) -> Result<Vec<i64>, DomainError> {
    Ok(games_adapter::find_expired_incomplete(conn, now).await?)
}

pub async fn find_completions_for_account<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    account_id: i64,
    since_completion_id: i64,
) -> Result<Vec<CompletionRecord>, DomainError> {
    let records =
        games_adapter::find_completions_for_account(conn, account_id, since_completion_id).await?;
    Ok(records.into_iter().map(CompletionRecord::from).collect())
}
