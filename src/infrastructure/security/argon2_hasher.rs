use argon2::password_hash::SaltString;
use argon2::{
  Algorithm, Argon2, Params, Version,
  password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier},
};
use async_trait::async_trait;

use crate::domain::ClinicError;
use crate::domain::auth::PasswordHasher;

/// Argon2id password hasher
///
/// - Memory cost: 19 MiB (19456 KiB)
/// - Time cost: 2 iterations
/// - Parallelism: 1 thread
///
/// Hashing and verification run on the blocking pool so they do not stall
/// the actix workers.
#[derive(Clone)]
pub struct Argon2PasswordHasher {
  argon2: Argon2<'static>,
}

impl Argon2PasswordHasher {
  pub fn new() -> Result<Self, ClinicError> {
    let params = Params::new(19456, 2, 1, Some(32)).map_err(|e| {
      tracing::error!("invalid argon2 parameters: {}", e);
      ClinicError::common()
    })?;

    Ok(Self {
      argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
    })
  }
}

fn join_failed(e: tokio::task::JoinError) -> ClinicError {
  tracing::error!("password hashing task failed: {}", e);
  ClinicError::common()
}

#[async_trait]
impl PasswordHasher for Argon2PasswordHasher {
  async fn hash(&self, password: &str) -> Result<String, ClinicError> {
    let argon2 = self.argon2.clone();
    let password = password.to_owned();

    tokio::task::spawn_blocking(move || {
      let salt = SaltString::generate(&mut rand::rngs::OsRng);
      argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| {
          tracing::error!("failed to hash password: {}", e);
          ClinicError::common()
        })
    })
    .await
    .map_err(join_failed)?
  }

  /// Constant-time comparison is done inside `verify_password`.
  async fn verify(&self, password: &str, password_hash: &str) -> Result<bool, ClinicError> {
    let argon2 = self.argon2.clone();
    let password = password.to_owned();
    let password_hash = password_hash.to_owned();

    tokio::task::spawn_blocking(move || {
      let parsed = PasswordHash::new(&password_hash).map_err(|e| {
        tracing::error!("stored password hash is malformed: {}", e);
        ClinicError::common()
      })?;

      match argon2.verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => {
          tracing::error!("password verification failed: {}", e);
          Err(ClinicError::common())
        }
      }
    })
    .await
    .map_err(join_failed)?
  }
}
