use async_trait::async_trait;
use futures_util::future::BoxFuture;
use sqlx::{PgConnection, PgPool};

use crate::domain::{ClinicError, Transactor};

/// Runs units of work inside a PostgreSQL transaction.
///
/// If the caller's future is dropped before commit, the `sqlx` transaction
/// is dropped too and the driver rolls it back.
#[derive(Clone)]
pub struct PostgresTransactor {
  pool: PgPool,
}

impl PostgresTransactor {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl Transactor for PostgresTransactor {
  type Tx = PgConnection;

  async fn within_transaction<T, F>(&self, work: F) -> Result<T, ClinicError>
  where
    T: Send,
    F: for<'t> FnOnce(&'t mut PgConnection) -> BoxFuture<'t, Result<T, ClinicError>> + Send,
  {
    let mut tx = self.pool.begin().await.map_err(|e| {
      tracing::error!("failed to begin transaction: {}", e);
      ClinicError::database()
    })?;

    match work(&mut *tx).await {
      Ok(value) => {
        tx.commit().await.map_err(|e| {
          tracing::error!("failed to commit transaction: {}", e);
          ClinicError::database()
        })?;
        Ok(value)
      }
      Err(err) => {
        if let Err(rollback_err) = tx.rollback().await {
          tracing::error!("failed to roll back transaction: {}", rollback_err);
        }
        Err(err)
      }
    }
  }
}
