use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User entity representing a registered account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
  /// Unique identifier for the user
  pub id: i64,
  /// User's email address (unique, lower-cased)
  pub email: String,
  /// Argon2id PHC string; never leaves the service
  #[serde(skip_serializing)]
  pub password_hash: String,
  /// Role the user was registered with
  pub role_id: i32,
  /// Timestamp when the user was created
  pub created_at: DateTime<Utc>,
  /// Timestamp when the user was last updated
  pub updated_at: DateTime<Utc>,
}

/// Data required to insert a user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
  pub email: String,
  pub password_hash: String,
  pub role_id: i32,
}

impl NewUser {
  pub fn new(email: &str, password_hash: String, role_id: i32) -> Self {
    Self {
      email: normalize_email(email),
      password_hash,
      role_id,
    }
  }
}

/// Identity proven by a verified bearer token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenClaims {
  pub user_id: i64,
  pub role_id: i32,
  pub expires_at: DateTime<Utc>,
}

/// Emails are compared and stored trimmed and lower-cased.
pub fn normalize_email(email: &str) -> String {
  email.trim().to_lowercase()
}
