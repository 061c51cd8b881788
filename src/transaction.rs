//! Transaction execution helper.
//!
//! [`transact`] owns the begin/commit/rollback lifecycle so callers only
//! write the unit of work. The starter is anything implementing
//! [`sqlx::Acquire`] — a pool, a connection, or an already-open
//! transaction (which begins a nested transaction where the driver
//! supports it).

use futures::future::BoxFuture;
use sqlx::{Acquire, Transaction};
use tracing::warn;

use crate::error::TransactError;

/// Run `work` inside a transaction begun on `starter`.
///
/// The transaction handle is lent to the callback and never escapes this
/// call. Exactly one of commit/rollback is issued per invocation:
///
/// - `Ok(_)` from the work commits; a commit failure is returned as
///   [`TransactError::Commit`].
/// - `Err(_)` from the work rolls back and is returned as
///   [`TransactError::Work`], preserving the caller's error by value. A
///   rollback failure is logged at `warn` and otherwise swallowed — the
///   work's own error is the one that matters.
/// - A panic (or cancellation) inside the work drops the transaction
///   guard, and sqlx rolls it back before the panic propagates unchanged.
///
/// No retries, no timeouts; cancel by dropping the returned future.
///
/// ```no_run
/// # use sqlx::SqlitePool;
/// # async fn demo(pool: SqlitePool) -> Result<(), Box<dyn std::error::Error>> {
/// sqlutil::transact(&pool, |tx| {
///     Box::pin(async move {
///         sqlx::query("UPDATE task SET is_completed = TRUE WHERE id = 1")
///             .execute(&mut **tx)
///             .await?;
///         Ok::<_, sqlx::Error>(())
///     })
/// })
/// .await?;
/// # Ok(())
/// # }
/// ```
pub async fn transact<'a, A, F, T, E>(starter: A, work: F) -> Result<T, TransactError<E>>
where
    A: Acquire<'a>,
    F: for<'t> FnOnce(&'t mut Transaction<'a, A::Database>) -> BoxFuture<'t, Result<T, E>>,
{
    let mut tx = starter.begin().await.map_err(TransactError::Begin)?;

    match work(&mut tx).await {
        Ok(value) => match tx.commit().await {
            Ok(()) => Ok(value),
            Err(err) => Err(TransactError::Commit(err)),
        },
        Err(err) => {
            if let Err(rollback_err) = tx.rollback().await {
                warn!(error = %rollback_err, "failed to roll back transaction");
            }
            Err(TransactError::Work(err))
        }
    }
}
