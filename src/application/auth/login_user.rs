use std::sync::Arc;

use crate::domain::auth::entities::normalize_email;
use crate::domain::auth::{PasswordHasher, TokenService, UserRepository};
use crate::domain::{ClinicError, Transactor};

const INVALID_CREDENTIALS: &str = "invalid credentials";

/// Command for logging in a user
#[derive(Debug, Clone)]
pub struct LoginUserCommand {
  pub email: String,
  pub password: String,
}

/// Response after successful user login
#[derive(Debug, Clone)]
pub struct LoginUserResponse {
  pub user_id: i64,
  pub role_id: i32,
  /// Signed bearer token
  pub token: String,
}

/// Use case for logging in a user
pub struct LoginUserUseCase<T: Transactor> {
  transactor: Arc<T>,
  users: Arc<dyn UserRepository<T::Tx>>,
  hasher: Arc<dyn PasswordHasher>,
  tokens: Arc<dyn TokenService>,
}

impl<T: Transactor> LoginUserUseCase<T> {
  pub fn new(
    transactor: Arc<T>,
    users: Arc<dyn UserRepository<T::Tx>>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenService>,
  ) -> Self {
    Self {
      transactor,
      users,
      hasher,
      tokens,
    }
  }

  /// Unknown email and wrong password fail with the same
  /// `InvalidAction("invalid credentials")`.
  pub async fn execute(&self, command: LoginUserCommand) -> Result<LoginUserResponse, ClinicError> {
    let users = Arc::clone(&self.users);
    let hasher = Arc::clone(&self.hasher);
    let email = normalize_email(&command.email);
    let password = command.password;

    let user = self
      .transactor
      .within_transaction(move |tx| {
        Box::pin(async move {
          let Some(user) = users.find_by_email(tx, &email).await? else {
            tracing::warn!("login rejected: unknown email");
            return Err(ClinicError::invalid_action(INVALID_CREDENTIALS));
          };

          if !hasher.verify(&password, &user.password_hash).await? {
            tracing::warn!(user_id = user.id, "login rejected: wrong password");
            return Err(ClinicError::invalid_action(INVALID_CREDENTIALS));
          }

          Ok(user)
        })
      })
      .await?;

    let token = self.tokens.issue(user.id, user.role_id)?;
    tracing::info!(user_id = user.id, "user logged in");

    Ok(LoginUserResponse {
      user_id: user.id,
      role_id: user.role_id,
      token,
    })
  }
}
