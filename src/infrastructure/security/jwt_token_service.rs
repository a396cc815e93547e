use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::domain::auth::{TokenClaims, TokenService};
use crate::domain::{ClinicError, TokenError};

/// Claims carried by access tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
struct JwtClaims {
  sub: String, // user id
  role: i32,
  iss: String,
  iat: i64,
  exp: i64,
}

/// HS256 token service; tokens are not persisted and cannot be revoked.
pub struct JwtTokenService {
  encoding_key: EncodingKey,
  decoding_key: DecodingKey,
  issuer: String,
  ttl: Duration,
}

impl JwtTokenService {
  pub fn new(secret: &str, issuer: impl Into<String>, ttl_seconds: u64) -> Self {
    let ttl = i64::try_from(ttl_seconds)
      .ok()
      .and_then(Duration::try_seconds)
      .unwrap_or(Duration::MAX);
    Self {
      encoding_key: EncodingKey::from_secret(secret.as_bytes()),
      decoding_key: DecodingKey::from_secret(secret.as_bytes()),
      issuer: issuer.into(),
      ttl,
    }
  }

  fn issue_at(
    &self,
    user_id: i64,
    role_id: i32,
    issued_at: DateTime<Utc>,
  ) -> Result<String, ClinicError> {
    let expires_at = issued_at.checked_add_signed(self.ttl).ok_or_else(|| {
      tracing::error!("token ttl overflows the expiry timestamp");
      ClinicError::common()
    })?;
    let claims = JwtClaims {
      sub: user_id.to_string(),
      role: role_id,
      iss: self.issuer.clone(),
      iat: issued_at.timestamp(),
      exp: expires_at.timestamp(),
    };

    encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|e| {
      tracing::error!("failed to sign token: {}", e);
      ClinicError::common()
    })
  }

  fn validation(&self) -> Validation {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    validation.set_issuer(&[self.issuer.as_str()]);
    validation.set_required_spec_claims(&["exp", "sub", "iss"]);
    validation
  }
}

impl TokenService for JwtTokenService {
  fn issue(&self, user_id: i64, role_id: i32) -> Result<String, ClinicError> {
    self.issue_at(user_id, role_id, Utc::now())
  }

  fn verify(&self, token: &str) -> Result<TokenClaims, TokenError> {
    let data = decode::<JwtClaims>(token, &self.decoding_key, &self.validation()).map_err(|e| {
      match e.kind() {
        JwtErrorKind::ExpiredSignature => TokenError::Expired,
        _ => {
          tracing::debug!("rejected token: {}", e);
          TokenError::Invalid
        }
      }
    })?;

    let user_id = data
      .claims
      .sub
      .parse::<i64>()
      .map_err(|_| TokenError::Invalid)?;
    let expires_at = DateTime::from_timestamp(data.claims.exp, 0).ok_or(TokenError::Invalid)?;

    Ok(TokenClaims {
      user_id,
      role_id: data.claims.role,
      expires_at,
    })
  }
}
