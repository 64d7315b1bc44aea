//! Scoped transaction execution.
//!
//! [`with_transaction`] opens a transaction, runs a unit of work against it and
//! then either commits or rolls back. The handle never outlives the call, even
//! when the unit of work panics.

use std::panic::{self, AssertUnwindSafe};

use futures_util::future::BoxFuture;
use futures_util::FutureExt;

use super::{BoxedTransaction, RepositoryError, TransactionProvider};

/// Runs `work` inside a store transaction.
///
/// - `Ok` from the unit of work commits; a failed commit is returned as an error.
/// - `Err` rolls back and returns the original error.
/// - A panic rolls back and then resumes unwinding.
///
/// Rollback failures are logged and do not replace the original outcome.
///
/// # Examples
///
/// ```ignore
/// let updated = with_transaction(repository.as_ref(), move |tx| {
///     Box::pin(async move {
///         let updated = tx.update_product(&product).await?;
///         Ok::<_, RepositoryError>(updated)
///     })
/// })
/// .await?;
/// ```
pub async fn with_transaction<P, T, E, F>(provider: &P, work: F) -> Result<T, E>
where
    P: TransactionProvider + ?Sized,
    F: for<'t> FnOnce(&'t mut BoxedTransaction) -> BoxFuture<'t, Result<T, E>>,
    E: From<RepositoryError>,
{
    let mut tx = provider.begin().await?;

    let outcome = AssertUnwindSafe(work(&mut tx)).catch_unwind().await;

    match outcome {
        Ok(Ok(value)) => {
            tx.commit().await?;
            Ok(value)
        }
        Ok(Err(err)) => {
            rollback(tx).await;
            Err(err)
        }
        Err(payload) => {
            rollback(tx).await;
            panic::resume_unwind(payload)
        }
    }
}

async fn rollback(tx: BoxedTransaction) {
    if let Err(err) = tx.rollback().await {
        tracing::warn!(error = %err, "Transaction rollback failed");
    }
}
