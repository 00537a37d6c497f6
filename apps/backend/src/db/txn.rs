use std::future::Future;
use std::pin::Pin;

use actix_web::HttpRequest;
use sea_orm::{DatabaseTransaction, TransactionTrait};
use tracing::warn;

use crate::error::AppError;
use crate::state::app_state::AppState;
use crate::web::trace_ctx;

/// Boxed future borrowed from the transaction handed to a `with_txn` closure.
pub type TxnFuture<'a, R> = Pin<Box<dyn Future<Output = Result<R, AppError>> + 'a>>;

/// Execute a function within a database transaction.
///
/// Commits when the closure returns `Ok`, rolls back on `Err`. Services never
/// open transactions themselves; every mutating route goes through here.
pub async fn with_txn<R, F>(
    req: Option<&HttpRequest>,
    state: &AppState,
    f: F,
) -> Result<R, AppError>
where
    F: for<'a> FnOnce(&'a DatabaseTransaction) -> TxnFuture<'a, R>,
{
    let txn = state.db().begin().await?;
    let out = f(&txn).await;

    match out {
        Ok(val) => {
            txn.commit().await?;
            Ok(val)
        }
        Err(err) => {
            // Best-effort rollback; preserve original error
            if let Err(rollback_err) = txn.rollback().await {
                warn!(
                    trace_id = %trace_ctx::trace_id(),
                    path = req.map(|r| r.path()).unwrap_or(""),
                    error = %rollback_err,
                    "rollback failed"
                );
            }
            Err(err)
        }
    }
}
