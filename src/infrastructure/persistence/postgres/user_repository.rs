use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgConnection;

use crate::domain::ClinicError;
use crate::domain::auth::{NewUser, User, UserRepository};

/// PostgreSQL implementation of the UserRepository trait
#[derive(Debug, Default, Clone, Copy)]
pub struct PostgresUserRepository;

impl PostgresUserRepository {
  pub fn new() -> Self {
    Self
  }
}

/// Database row structure for users table
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
  id: i64,
  email: String,
  password_hash: String,
  role_id: i32,
  created_at: DateTime<Utc>,
  updated_at: DateTime<Utc>,
}

impl From<UserRow> for User {
  fn from(row: UserRow) -> Self {
    User {
      id: row.id,
      email: row.email,
      password_hash: row.password_hash,
      role_id: row.role_id,
      created_at: row.created_at,
      updated_at: row.updated_at,
    }
  }
}

#[async_trait]
impl UserRepository<PgConnection> for PostgresUserRepository {
  async fn email_exists(&self, tx: &mut PgConnection, email: &str) -> Result<bool, ClinicError> {
    let found = sqlx::query_scalar::<_, i64>("SELECT id FROM users WHERE email = $1")
      .bind(email)
      .fetch_optional(&mut *tx)
      .await?;

    Ok(found.is_some())
  }

  async fn create(&self, tx: &mut PgConnection, user: NewUser) -> Result<User, ClinicError> {
    let row = sqlx::query_as::<_, UserRow>(
      r#"
            INSERT INTO users (email, password_hash, role_id)
            VALUES ($1, $2, $3)
            RETURNING id, email, password_hash, role_id, created_at, updated_at
            "#,
    )
    .bind(&user.email)
    .bind(&user.password_hash)
    .bind(user.role_id)
    .fetch_one(&mut *tx)
    .await?;

    Ok(row.into())
  }

  async fn find_by_email(
    &self,
    tx: &mut PgConnection,
    email: &str,
  ) -> Result<Option<User>, ClinicError> {
    let row = sqlx::query_as::<_, UserRow>(
      r#"
            SELECT id, email, password_hash, role_id, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
    )
    .bind(email)
    .fetch_optional(&mut *tx)
    .await?;

    Ok(row.map(Into::into))
  }
}
