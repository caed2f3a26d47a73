//! SeaORM adapter for session tokens - generic over ConnectionTrait.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set,
};
use time::OffsetDateTime;

use crate::entities::sessions;

pub async fn insert_session<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    auth_token: String,
    account_id: i64,
    created_at: OffsetDateTime,
) -> Result<sessions::Model, sea_orm::DbErr> {
    let session = sessions::ActiveModel {
        auth_token: Set(auth_token),
        account_id: Set(account_id),
        created_at: Set(created_at),
    };
    session.insert(conn).await
}

/// Delete every session created before `cutoff`. Returns the number removed.
pub async fn delete_created_before<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    cutoff: OffsetDateTime,
) -> Result<u64, sea_orm::DbErr> {
    let result = sessions::Entity::delete_many()
        .filter(sessions::Column::CreatedAt.lt(cutoff))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}

/// Find a session by token, ignoring any created before `cutoff`.
pub async fn find_created_since<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    auth_token: &str,
    cutoff: OffsetDateTime,
) -> Result<Option<sessions::Model>, sea_orm::DbErr> {
    sessions::Entity::find()
        .filter(sessions::Column::AuthToken.eq(auth_token))
        .filter(sessions::Column::CreatedAt.gte(cutoff))
        .one(conn)
        .await
}
