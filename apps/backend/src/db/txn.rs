use futures::future::BoxFuture;
use sea_orm::{DatabaseConnection, DatabaseTransaction, DbErr, TransactionTrait};
use tracing::warn;

/// Execute a unit of work within a database transaction.
///
/// Begins a transaction, runs `f`, commits when it returns `Ok` and rolls back
/// when it returns `Err`. If the future is dropped before completing (task
/// cancelled or panicked) the `DatabaseTransaction` is dropped uncommitted,
/// which rolls it back.
///
/// The closure receives the transaction by reference and must return a boxed
/// future; anything else it needs should be moved in as owned values:
///
/// ```ignore
/// with_txn(&db, |txn| {
///     let label = label.clone();
///     Box::pin(async move { insert_turn(txn, label).await })
/// })
/// .await?;
/// ```
pub async fn with_txn<R, E, F>(db: &DatabaseConnection, f: F) -> Result<R, E>
where
    F: for<'c> FnOnce(&'c DatabaseTransaction) -> BoxFuture<'c, Result<R, E>> + Send,
    R: Send,
    E: From<DbErr> + Send,
{
    let txn = db.begin().await?;

    match f(&txn).await {
        Ok(val) => {
            txn.commit().await?;
            Ok(val)
        }
        Err(err) => {
            // Best-effort rollback; preserve original error
            if let Err(rollback_err) = txn.rollback().await {
                warn!(error = %rollback_err, "transaction rollback failed");
            }
            Err(err)
        }
    }
}
