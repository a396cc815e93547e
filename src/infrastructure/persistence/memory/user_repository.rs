use async_trait::async_trait;
use chrono::Utc;

use super::transactor::MemoryState;
use crate::domain::ClinicError;
use crate::domain::auth::{NewUser, User, UserRepository};

#[derive(Debug, Default, Clone, Copy)]
pub struct MemoryUserRepository;

impl MemoryUserRepository {
  pub fn new() -> Self {
    Self
  }
}

#[async_trait]
impl UserRepository<MemoryState> for MemoryUserRepository {
  async fn email_exists(&self, tx: &mut MemoryState, email: &str) -> Result<bool, ClinicError> {
    Ok(tx.users.values().any(|user| user.email == email))
  }

  async fn create(&self, tx: &mut MemoryState, user: NewUser) -> Result<User, ClinicError> {
    // Mirrors the UNIQUE constraint on users.email
    if tx.users.values().any(|existing| existing.email == user.email) {
      return Err(ClinicError::already_exist("record already exists"));
    }

    let now = Utc::now();
    let created = User {
      id: tx.next_id(),
      email: user.email,
      password_hash: user.password_hash,
      role_id: user.role_id,
      created_at: now,
      updated_at: now,
    };
    tx.users.insert(created.id, created.clone());
    Ok(created)
  }

  async fn find_by_email(
    &self,
    tx: &mut MemoryState,
    email: &str,
  ) -> Result<Option<User>, ClinicError> {
    Ok(tx.users.values().find(|user| user.email == email).cloned())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::ErrorKind;

  #[tokio::test]
  async fn test_email_uniqueness_is_enforced_on_insert() {
    let repo = MemoryUserRepository::new();
    let mut state = MemoryState::default();

    repo
      .create(&mut state, NewUser::new("a@x.com", "h".to_string(), 2))
      .await
      .unwrap();
    let err = repo
      .create(&mut state, NewUser::new("A@X.com", "h".to_string(), 2))
      .await
      .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::AlreadyExist);
    assert!(repo.email_exists(&mut state, "a@x.com").await.unwrap());
    assert!(repo.find_by_email(&mut state, "b@x.com").await.unwrap().is_none());
  }
}
