use async_trait::async_trait;

use super::entities::{NewUser, TokenClaims, User};
use crate::domain::errors::{ClinicError, TokenError};

/// Repository trait for user persistence operations.
///
/// `Tx` is the transaction handle of the backing store; every call runs
/// inside the caller's unit of work.
#[async_trait]
pub trait UserRepository<Tx: Send>: Send + Sync {
  /// Returns true if a user with this (normalized) email already exists
  async fn email_exists(&self, tx: &mut Tx, email: &str) -> Result<bool, ClinicError>;

  /// Creates a new user in the repository
  async fn create(&self, tx: &mut Tx, user: NewUser) -> Result<User, ClinicError>;

  /// Finds a user by their email address
  async fn find_by_email(&self, tx: &mut Tx, email: &str) -> Result<Option<User>, ClinicError>;
}

/// Service trait for password hashing operations
#[async_trait]
pub trait PasswordHasher: Send + Sync {
  /// Hashes a plain text password
  async fn hash(&self, password: &str) -> Result<String, ClinicError>;

  /// Verifies a plain text password against a hashed password
  async fn verify(&self, password: &str, password_hash: &str) -> Result<bool, ClinicError>;
}

/// Service trait for signing and verifying bearer tokens
pub trait TokenService: Send + Sync {
  /// Signs a token for the given identity
  fn issue(&self, user_id: i64, role_id: i32) -> Result<String, ClinicError>;

  /// Verifies signature, issuer and expiry, returning the embedded identity
  fn verify(&self, token: &str) -> Result<TokenClaims, TokenError>;
}
