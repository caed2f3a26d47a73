//! SeaORM adapter for games and their completion records - generic over ConnectionTrait.

use sea_orm::sea_query::{Expr, OnConflict, Query};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use time::OffsetDateTime;

use crate::entities::{games, games_completed_at, turns};

pub mod dto;

pub use dto::GameCreate;

// Adapter functions return DbErr; repos layer maps to DomainError via From<DbErr>.

pub async fn create_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: GameCreate,
) -> Result<games::Model, sea_orm::DbErr> {
    let game = games::ActiveModel {
        id: NotSet,
        created_at: Set(dto.created_at),
        completed_at_id: Set(None),
        next_expiration: Set(dto.next_expiration),
    };
    game.insert(conn).await
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Option<games::Model>, sea_orm::DbErr> {
    games::Entity::find_by_id(game_id).one(conn).await
}

/// Move a game's deadline. Returns rows affected.
pub async fn set_next_expiration<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    next_expiration: OffsetDateTime,
) -> Result<u64, sea_orm::DbErr> {
    let result = games::Entity::update_many()
        .col_expr(games::Column::NextExpiration, Expr::value(next_expiration))
        .filter(games::Column::Id.eq(game_id))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}

/// Insert a completion record for the game if, and only if, every one of its
/// turns is complete and it is not yet linked to a record.
///
/// Runs as a single `INSERT .. SELECT .. ON CONFLICT (game_id) DO NOTHING`;
/// the unique index on `games_completed_at.game_id` rejects a second record
/// for the same game even when two callers both saw it unlinked.
///
/// Returns true when this call inserted the record.
pub async fn insert_completion_if_finished<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    completed_at: OffsetDateTime,
) -> Result<bool, sea_orm::DbErr> {
    let pending_turns = Query::select()
        .expr(Expr::val(1))
        .from(turns::Entity)
        .and_where(turns::Column::GameId.eq(game_id))
        .and_where(turns::Column::IsComplete.eq(false))
        .to_owned();

    let finished_game = Query::select()
        .column(games::Column::Id)
        .expr(Expr::val(completed_at))
        .from(games::Entity)
        .and_where(games::Column::Id.eq(game_id))
        .and_where(games::Column::CompletedAtId.is_null())
        .and_where(Expr::exists(pending_turns).not())
        .to_owned();

    let insert = Query::insert()
        .into_table(games_completed_at::Entity)
        .columns([
            games_completed_at::Column::GameId,
            games_completed_at::Column::CompletedAt,
        ])
        .select_from(finished_game)
        .map_err(|e| sea_orm::DbErr::Custom(format!("completion insert: {e}")))?
        .on_conflict(
            OnConflict::column(games_completed_at::Column::GameId)
                .do_nothing()
                .to_owned(),
        )
        .to_owned();

    let backend = conn.get_database_backend();
    let result = conn.execute(backend.build(&insert)).await?;
    Ok(result.rows_affected() > 0)
}

pub async fn find_completion_for_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Option<games_completed_at::Model>, sea_orm::DbErr> {
    games_completed_at::Entity::find()
        .filter(games_completed_at::Column::GameId.eq(game_id))
        .one(conn)
        .await
}

/// Point an unlinked game at its completion record. Returns rows affected.
pub async fn link_completion<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    completion_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    let result = games::Entity::update_many()
        .col_expr(games::Column::CompletedAtId, Expr::value(completion_id))
        .filter(games::Column::Id.eq(game_id))
        .filter(games::Column::CompletedAtId.is_null())
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}

/// Ids of incomplete games whose deadline is before `now`.
pub async fn find_expired_incomplete<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    now: OffsetDateTime,
) -> Result<Vec<i64>, sea_orm::DbErr> {
    games::Entity::find()
        .select_only()
        .column(games::Column::Id)
        .filter(games::Column::CompletedAtId.is_null())
        .filter(games::Column::NextExpiration.lt(now))
        .order_by_asc(games::Column::Id)
        .into_tuple::<i64>()
        .all(conn)
        .await
}

/// Completion records of games the account played a turn in, newer than
/// `since_completion_id`, oldest first.
pub async fn find_completions_for_account<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    account_id: i64,
    since_completion_id: i64,
) -> Result<Vec<games_completed_at::Model>, sea_orm::DbErr> {
    let played_games = Query::select()
        .column(turns::Column::GameId)
        .from(turns::Entity)
        .and_where(turns::Column::AccountId.eq(account_id))
        .to_owned();

    games_completed_at::Entity::find()
        .filter(games_completed_at::Column::Id.gt(since_completion_id))
        .filter(games_completed_at::Column::GameId.in_subquery(played_games))
        .order_by_asc(games_completed_at::Column::Id)
        .all(conn)
        .await
}
