use std::fmt;

use thiserror::Error;

/// Closed set of failure categories shared by every layer.
///
/// Each kind maps to exactly one HTTP status in the HTTP adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
  InvalidAction,
  AlreadyExist,
  NotExist,
  Unauthorized,
  CommonErr,
  DatabaseError,
}

impl fmt::Display for ErrorKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      ErrorKind::InvalidAction => "InvalidAction",
      ErrorKind::AlreadyExist => "AlreadyExist",
      ErrorKind::NotExist => "NotExist",
      ErrorKind::Unauthorized => "Unauthorized",
      ErrorKind::CommonErr => "CommonErr",
      ErrorKind::DatabaseError => "DatabaseError",
    };
    f.write_str(name)
  }
}

/// Domain error carrying a client-facing message.
///
/// Messages must never contain driver output, SQL or hashing internals;
/// those are logged where the error is created.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClinicError {
  #[error("{0}")]
  InvalidAction(String),

  #[error("{0}")]
  AlreadyExist(String),

  #[error("{0}")]
  NotExist(String),

  #[error("{0}")]
  Unauthorized(String),

  #[error("{0}")]
  Common(String),

  #[error("{0}")]
  Database(String),
}

impl ClinicError {
  pub fn invalid_action(message: impl Into<String>) -> Self {
    Self::InvalidAction(message.into())
  }

  pub fn already_exist(message: impl Into<String>) -> Self {
    Self::AlreadyExist(message.into())
  }

  pub fn not_exist(message: impl Into<String>) -> Self {
    Self::NotExist(message.into())
  }

  pub fn unauthorized(message: impl Into<String>) -> Self {
    Self::Unauthorized(message.into())
  }

  /// Generic server-side failure ("error occured" in client terms).
  pub fn common() -> Self {
    Self::Common("error occured".to_string())
  }

  /// Normalized storage failure.
  pub fn database() -> Self {
    Self::Database("internal server error".to_string())
  }

  pub fn kind(&self) -> ErrorKind {
    match self {
      ClinicError::InvalidAction(_) => ErrorKind::InvalidAction,
      ClinicError::AlreadyExist(_) => ErrorKind::AlreadyExist,
      ClinicError::NotExist(_) => ErrorKind::NotExist,
      ClinicError::Unauthorized(_) => ErrorKind::Unauthorized,
      ClinicError::Common(_) => ErrorKind::CommonErr,
      ClinicError::Database(_) => ErrorKind::DatabaseError,
    }
  }

  pub fn message(&self) -> &str {
    match self {
      ClinicError::InvalidAction(msg)
      | ClinicError::AlreadyExist(msg)
      | ClinicError::NotExist(msg)
      | ClinicError::Unauthorized(msg)
      | ClinicError::Common(msg)
      | ClinicError::Database(msg) => msg,
    }
  }
}

/// Outcome of a failed bearer token verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
  #[error("token has expired")]
  Expired,

  #[error("cannot parse token")]
  Invalid,
}

// Driver errors are logged here and never surface verbatim.
impl From<sqlx::Error> for ClinicError {
  fn from(error: sqlx::Error) -> Self {
    match &error {
      sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
        tracing::warn!(constraint = ?db_err.constraint(), "unique constraint violated");
        ClinicError::already_exist("record already exists")
      }
      sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
        tracing::error!("database pool unavailable: {}", error);
        ClinicError::database()
      }
      _ => {
        tracing::error!("database query failed: {}", error);
        ClinicError::database()
      }
    }
  }
}
