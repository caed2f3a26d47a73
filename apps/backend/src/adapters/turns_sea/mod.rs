//! SeaORM adapter for turns - generic over ConnectionTrait.

use sea_orm::sea_query::{Expr, Func, Query, SelectStatement};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    Set,
};

use crate::entities::{accounts, games, turns};

pub mod dto;

pub use dto::{TurnContent, TurnCreate};

/// `SELECT MIN(id) FROM turns WHERE game_id = ? AND is_complete = false`:
/// the id of the game's current turn.
fn current_turn_id(game_id: i64) -> SelectStatement {
    Query::select()
        .expr(Func::min(Expr::col(turns::Column::Id)))
        .from(turns::Entity)
        .and_where(turns::Column::GameId.eq(game_id))
        .and_where(turns::Column::IsComplete.eq(false))
        .to_owned()
}

pub async fn create_turn<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: TurnCreate,
) -> Result<turns::Model, sea_orm::DbErr> {
    let turn = turns::ActiveModel {
        id: NotSet,
        account_id: Set(dto.account_id),
        game_id: Set(dto.game_id),
        is_complete: Set(dto.is_complete),
        is_drawing: Set(dto.is_drawing),
        label: Set(dto.label),
        drawing: Set(None),
    };
    turn.insert(conn).await
}

/// Complete the game's current turn on behalf of `account_id`.
///
/// One conditional `UPDATE`: it matches only if the turn belongs to the
/// account, is still incomplete, has the type of `content`, and is the
/// lowest-id incomplete turn of the game. Returns rows affected (0 or 1).
pub async fn complete_current_turn<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    account_id: i64,
    game_id: i64,
    content: TurnContent,
) -> Result<u64, sea_orm::DbErr> {
    let is_drawing = content.is_drawing();
    let update = turns::Entity::update_many().col_expr(turns::Column::IsComplete, Expr::value(true));
    let update = match content {
        TurnContent::Drawing(json) => update.col_expr(turns::Column::Drawing, Expr::value(json)),
        TurnContent::Label(label) => update.col_expr(turns::Column::Label, Expr::value(label)),
    };

    let result = update
        .filter(turns::Column::GameId.eq(game_id))
        .filter(turns::Column::AccountId.eq(account_id))
        .filter(turns::Column::IsComplete.eq(false))
        .filter(turns::Column::IsDrawing.eq(is_drawing))
        .filter(turns::Column::Id.in_subquery(current_turn_id(game_id)))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}

/// For every game whose current turn belongs to `account_id`, the most
/// recently completed turn of that game, ordered by game id.
///
/// ```sql
/// SELECT * FROM turns WHERE id IN (
///   SELECT MAX(id) FROM turns WHERE is_complete AND game_id IN (
///     SELECT game_id FROM turns WHERE account_id = ? AND NOT is_complete AND id IN (
///       SELECT MIN(id) FROM turns WHERE NOT is_complete GROUP BY game_id))
///   GROUP BY game_id)
/// ORDER BY game_id
/// ```
pub async fn find_previous_turns_owed_by<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    account_id: i64,
) -> Result<Vec<turns::Model>, sea_orm::DbErr> {
    let current_turns = Query::select()
        .expr(Func::min(Expr::col(turns::Column::Id)))
        .from(turns::Entity)
        .and_where(turns::Column::IsComplete.eq(false))
        .group_by_col(turns::Column::GameId)
        .to_owned();

    let owed_games = Query::select()
        .column(turns::Column::GameId)
        .from(turns::Entity)
        .and_where(turns::Column::AccountId.eq(account_id))
        .and_where(turns::Column::IsComplete.eq(false))
        .and_where(turns::Column::Id.in_subquery(current_turns))
        .to_owned();

    let previous_turns = Query::select()
        .expr(Func::max(Expr::col(turns::Column::Id)))
        .from(turns::Entity)
        .and_where(turns::Column::IsComplete.eq(true))
        .and_where(turns::Column::GameId.in_subquery(owed_games))
        .group_by_col(turns::Column::GameId)
        .to_owned();

    turns::Entity::find()
        .filter(turns::Column::Id.in_subquery(previous_turns))
        .order_by_asc(turns::Column::GameId)
        .all(conn)
        .await
}

/// The lowest-id incomplete turn of a game.
pub async fn find_current_turn<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Option<turns::Model>, sea_orm::DbErr> {
    turns::Entity::find()
        .filter(turns::Column::GameId.eq(game_id))
        .filter(turns::Column::IsComplete.eq(false))
        .order_by_asc(turns::Column::Id)
        .one(conn)
        .await
}

/// The latest completed turn of `game_id`, but only while the game's
/// current turn belongs to `account_id`.
///
/// ```sql
/// SELECT * FROM turns WHERE game_id = ? AND is_complete AND game_id IN (
///   SELECT game_id FROM turns WHERE account_id = ? AND id IN (
///     SELECT MIN(id) FROM turns WHERE game_id = ? AND NOT is_complete))
/// ORDER BY id DESC LIMIT 1
/// ```
pub async fn find_previous_turn_owed_in_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    account_id: i64,
    game_id: i64,
) -> Result<Option<turns::Model>, sea_orm::DbErr> {
    let owned = Query::select()
        .column(turns::Column::GameId)
        .from(turns::Entity)
        .and_where(turns::Column::AccountId.eq(account_id))
        .and_where(turns::Column::Id.in_subquery(current_turn_id(game_id)))
        .to_owned();

    turns::Entity::find()
        .filter(turns::Column::GameId.eq(game_id))
        .filter(turns::Column::IsComplete.eq(true))
        .filter(turns::Column::GameId.in_subquery(owned))
        .order_by_desc(turns::Column::Id)
        .one(conn)
        .await
}

/// All turns of the given games in play order, each with its player's account.
pub async fn find_turns_with_players<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_ids: Vec<i64>,
) -> Result<Vec<(turns::Model, Option<accounts::Model>)>, sea_orm::DbErr> {
    turns::Entity::find()
        .find_also_related(accounts::Entity)
        .filter(turns::Column::GameId.is_in(game_ids))
        .order_by_asc(turns::Column::Id)
        .all(conn)
        .await
}

pub async fn find_by_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Vec<turns::Model>, sea_orm::DbErr> {
    turns::Entity::find()
        .filter(turns::Column::GameId.eq(game_id))
        .order_by_asc(turns::Column::Id)
        .all(conn)
        .await
}

/// Delete the game's incomplete turns, provided the game is still
/// incomplete and its deadline is before `now`. Returns rows deleted.
pub async fn delete_unplayed_if_expired<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    now: time::OffsetDateTime,
) -> Result<u64, sea_orm::DbErr> {
    let still_expired = Query::select()
        .column(games::Column::Id)
        .from(games::Entity)
        .and_where(games::Column::Id.eq(game_id))
        .and_where(games::Column::CompletedAtId.is_null())
        .and_where(games::Column::NextExpiration.lt(now))
        .to_owned();

    let result = turns::Entity::delete_many()
        .filter(turns::Column::GameId.eq(game_id))
        .filter(turns::Column::IsComplete.eq(false))
        .filter(turns::Column::GameId.in_subquery(still_expired))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}
