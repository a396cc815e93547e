use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use futures_util::future::BoxFuture;
use tokio::sync::Mutex;

use crate::domain::auth::User;
use crate::domain::medicine::Medicine;
use crate::domain::patient::Patient;
use crate::domain::{ClinicError, Transactor};

/// Tables of the in-memory store, keyed by id
#[derive(Debug, Clone, Default)]
pub struct MemoryState {
  pub(super) users: BTreeMap<i64, User>,
  pub(super) patients: BTreeMap<i64, Patient>,
  pub(super) medicines: BTreeMap<i64, Medicine>,
  last_id: i64,
}

impl MemoryState {
  /// Hands out ids the way a shared sequence would
  pub(super) fn next_id(&mut self) -> i64 {
    self.last_id += 1;
    self.last_id
  }

  pub fn user_count(&self) -> usize {
    self.users.len()
  }

  pub fn patient_count(&self) -> usize {
    self.patients.len()
  }
}

#[derive(Clone, Default)]
pub struct MemoryTransactor {
  state: Arc<Mutex<MemoryState>>,
}

impl MemoryTransactor {
  pub fn new() -> Self {
    Self::default()
  }

  /// Copy of the committed state
  pub async fn snapshot(&self) -> MemoryState {
    self.state.lock().await.clone()
  }
}

#[async_trait]
impl Transactor for MemoryTransactor {
  type Tx = MemoryState;

  async fn within_transaction<T, F>(&self, work: F) -> Result<T, ClinicError>
  where
    T: Send,
    F: for<'t> FnOnce(&'t mut MemoryState) -> BoxFuture<'t, Result<T, ClinicError>> + Send,
  {
    let mut committed = self.state.lock().await;
    let mut working = committed.clone();

    let value = work(&mut working).await?;
    *committed = working;
    Ok(value)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::auth::{NewUser, UserRepository};
  use crate::infrastructure::persistence::memory::MemoryUserRepository;

  #[tokio::test]
  async fn test_commits_on_success() {
    let transactor = MemoryTransactor::new();
    let users = Arc::new(MemoryUserRepository::new());

    let created = transactor
      .within_transaction(move |tx| {
        Box::pin(async move {
          users
            .create(tx, NewUser::new("a@x.com", "h".to_string(), 2))
            .await
        })
      })
      .await
      .unwrap();

    assert_eq!(created.id, 1);
    assert_eq!(transactor.snapshot().await.user_count(), 1);
  }

  #[tokio::test]
  async fn test_rolls_back_on_error() {
    let transactor = MemoryTransactor::new();
    let users = Arc::new(MemoryUserRepository::new());

    let result = transactor
      .within_transaction_unit(move |tx| {
        Box::pin(async move {
          users
            .create(tx, NewUser::new("a@x.com", "h".to_string(), 2))
            .await?;
          Err::<(), _>(ClinicError::invalid_action("abort"))
        })
      })
      .await;

    assert_eq!(result, Err(ClinicError::invalid_action("abort")));
    assert_eq!(transactor.snapshot().await.user_count(), 0);
  }
}
