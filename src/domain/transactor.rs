use async_trait::async_trait;
use futures_util::future::BoxFuture;

use super::errors::ClinicError;

/// Unit of work over a single storage transaction.
///
/// `within_transaction` begins a transaction, hands the unit of work an
/// explicit `&mut Self::Tx`, commits if and only if the work returns `Ok`
/// and rolls back otherwise. The work's error is returned unchanged.
///
/// The work only ever sees the transaction handle, so it cannot open a
/// nested unit of work on the same connection.
///
/// Closures passed here must own what they capture (clone `Arc`s in), since
/// the returned future has to live as long as the transaction borrow:
///
/// ```ignore
/// let patients = Arc::clone(&self.patients);
/// transactor
///   .within_transaction(move |tx| Box::pin(async move { patients.count(tx).await }))
///   .await
/// ```
#[async_trait]
pub trait Transactor: Send + Sync + 'static {
  /// Transaction handle threaded through repository calls
  type Tx: Send + 'static;

  /// Runs `work` in a transaction and returns its value.
  async fn within_transaction<T, F>(&self, work: F) -> Result<T, ClinicError>
  where
    T: Send,
    F: for<'t> FnOnce(&'t mut Self::Tx) -> BoxFuture<'t, Result<T, ClinicError>> + Send;

  /// Runs `work` in a transaction when only success or failure matters.
  async fn within_transaction_unit<F>(&self, work: F) -> Result<(), ClinicError>
  where
    F: for<'t> FnOnce(&'t mut Self::Tx) -> BoxFuture<'t, Result<(), ClinicError>> + Send,
  {
    self.within_transaction(work).await
  }
}
