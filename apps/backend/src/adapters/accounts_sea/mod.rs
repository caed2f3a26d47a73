//! SeaORM adapter for accounts - generic over ConnectionTrait.

use sea_orm::sea_query::Expr;
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, Set};

use crate::entities::accounts;

pub mod dto;

pub use dto::AccountCreate;

pub async fn create_account<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: AccountCreate,
) -> Result<accounts::Model, sea_orm::DbErr> {
    let account = accounts::ActiveModel {
        id: NotSet,
        display_name: Set(dto.display_name),
        password_hash: Set(dto.password_hash),
        created_at: Set(dto.created_at),
    };
    account.insert(conn).await
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    account_id: i64,
) -> Result<Option<accounts::Model>, sea_orm::DbErr> {
    accounts::Entity::find_by_id(account_id).one(conn).await
}

pub async fn find_by_display_name<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    display_name: &str,
) -> Result<Option<accounts::Model>, sea_orm::DbErr> {
    accounts::Entity::find()
        .filter(accounts::Column::DisplayName.eq(display_name))
        .one(conn)
        .await
}

/// Replace an account's credential digest, then refetch.
pub async fn update_password_hash<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    account_id: i64,
    password_hash: String,
) -> Result<accounts::Model, sea_orm::DbErr> {
    let result = accounts::Entity::update_many()
        .col_expr(accounts::Column::PasswordHash, Expr::value(password_hash))
        .filter(accounts::Column::Id.eq(account_id))
        .exec(conn)
        .await?;

    if result.rows_affected == 0 {
        return Err(sea_orm::DbErr::RecordNotFound(
            "Account not found".to_string(),
        ));
    }

    find_by_id(conn, account_id)
        .await?
        .ok_or_else(|| sea_orm::DbErr::RecordNotFound("Account not found".to_string()))
}
