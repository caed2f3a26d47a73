//! Session repository functions (generic over ConnectionTrait).

use sea_orm::ConnectionTrait;
use time::OffsetDateTime;

use crate::adapters::sessions_sea as sessions_adapter;
use crate::entities::sessions;
use crate::errors::domain::DomainError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub auth_token: String,
    pub account_id: i64,
    pub created_at: OffsetDateTime,
}

impl From<sessions::Model> for Session {
    fn from(model: sessions::Model) -> Self {
        Self {
            auth_token: model.auth_token,
            account_id: model.account_id,
            created_at: model.created_at,
        }
    }
}

pub async fn create_session<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    auth_token: String,
    account_id: i64,
    created_at: OffsetDateTime,
) -> Result<Session, DomainError> {
    let session = sessions_adapter::insert_session(conn, auth_token, account_id, created_at).await?;
    Ok(Session::from(session))
}

pub async fn prune_created_before<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    cutoff: OffsetDateTime,
) -> Result<u64, DomainError> {
    Ok(sessions_adapter::delete_created_before(conn, cutoff).await?)
}

pub async fn find_created_since<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    auth_token: &str,
    cutoff: OffsetDateTime,
) -> Result<Option<Session>, DomainError> {
    let session = sessions_adapter::find_created_since(conn, auth_token, cutoff).await?;
    Ok(session.map(Session::from))
}
