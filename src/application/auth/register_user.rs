use std::sync::Arc;

use crate::domain::auth::entities::normalize_email;
use crate::domain::auth::{NewUser, PasswordHasher, UserRepository};
use crate::domain::{ClinicError, Transactor};

/// Command for registering a new user
#[derive(Debug, Clone)]
pub struct RegisterUserCommand {
  pub email: String,
  /// Plain text, hashed before it is stored
  pub password: String,
  pub role_id: i32,
}

/// Response after successful user registration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterUserResponse {
  pub user_id: i64,
  pub email: String,
  pub role_id: i32,
}

/// Use case for registering a new user
pub struct RegisterUserUseCase<T: Transactor> {
  transactor: Arc<T>,
  users: Arc<dyn UserRepository<T::Tx>>,
  hasher: Arc<dyn PasswordHasher>,
}

impl<T: Transactor> RegisterUserUseCase<T> {
  pub fn new(
    transactor: Arc<T>,
    users: Arc<dyn UserRepository<T::Tx>>,
    hasher: Arc<dyn PasswordHasher>,
  ) -> Self {
    Self {
      transactor,
      users,
      hasher,
    }
  }

  /// Checks the email is unused, hashes the password and stores the user,
  /// all in one transaction.
  ///
  /// # Errors
  /// `AlreadyExist` if the email is taken, either by the check or by the
  /// storage constraint when a concurrent registration wins the race.
  pub async fn execute(
    &self,
    command: RegisterUserCommand,
  ) -> Result<RegisterUserResponse, ClinicError> {
    let users = Arc::clone(&self.users);
    let hasher = Arc::clone(&self.hasher);
    let email = normalize_email(&command.email);
    let RegisterUserCommand {
      password, role_id, ..
    } = command;

    let user = self
      .transactor
      .within_transaction(move |tx| {
        Box::pin(async move {
          if users.email_exists(tx, &email).await? {
            return Err(ClinicError::already_exist("email already used"));
          }

          let password_hash = hasher.hash(&password).await?;
          users
            .create(tx, NewUser::new(&email, password_hash, role_id))
            .await
        })
      })
      .await
      .map_err(|err| match err {
        ClinicError::AlreadyExist(_) => ClinicError::already_exist("email already used"),
        other => other,
      })?;

    tracing::info!(user_id = user.id, role_id = user.role_id, "user registered");

    Ok(RegisterUserResponse {
      user_id: user.id,
      email: user.email,
      role_id: user.role_id,
    })
  }
}
