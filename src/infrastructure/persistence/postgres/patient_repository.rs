use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgConnection;

use crate::domain::patient::{NewPatient, Patient, PatientChanges, PatientRepository};
use crate::domain::{ClinicError, PageFilter};

/// PostgreSQL implementation of the PatientRepository trait
#[derive(Debug, Default, Clone, Copy)]
pub struct PostgresPatientRepository;

impl PostgresPatientRepository {
  pub fn new() -> Self {
    Self
  }
}

#[derive(Debug, sqlx::FromRow)]
struct PatientRow {
  id: i64,
  full_name: String,
  dob: NaiveDate,
  gender: String,
  address: String,
  phone: String,
  created_by: i64,
  created_at: DateTime<Utc>,
  updated_at: DateTime<Utc>,
  deleted_at: Option<DateTime<Utc>>,
}

impl From<PatientRow> for Patient {
  fn from(row: PatientRow) -> Self {
    Patient {
      id: row.id,
      full_name: row.full_name,
      dob: row.dob,
      gender: row.gender,
      address: row.address,
      phone: row.phone,
      created_by: row.created_by,
      created_at: row.created_at,
      updated_at: row.updated_at,
      deleted_at: row.deleted_at,
    }
  }
}

fn expect_one_row(rows_affected: u64) -> Result<(), ClinicError> {
  if rows_affected == 0 {
    Err(ClinicError::not_exist("patient not found"))
  } else {
    Ok(())
  }
}

#[async_trait]
impl PatientRepository<PgConnection> for PostgresPatientRepository {
  async fn create(&self, tx: &mut PgConnection, patient: NewPatient) -> Result<Patient, ClinicError> {
    let row = sqlx::query_as::<_, PatientRow>(
      r#"
            INSERT INTO patients (full_name, dob, gender, address, phone, created_by)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, full_name, dob, gender, address, phone, created_by,
                      created_at, updated_at, deleted_at
            "#,
    )
    .bind(&patient.full_name)
    .bind(patient.dob)
    .bind(&patient.gender)
    .bind(&patient.address)
    .bind(&patient.phone)
    .bind(patient.created_by)
    .fetch_one(&mut *tx)
    .await?;

    Ok(row.into())
  }

  async fn list(
    &self,
    tx: &mut PgConnection,
    filter: &PageFilter,
  ) -> Result<Vec<Patient>, ClinicError> {
    let rows = sqlx::query_as::<_, PatientRow>(
      r#"
            SELECT id, full_name, dob, gender, address, phone, created_by,
                   created_at, updated_at, deleted_at
            FROM patients
            WHERE deleted_at IS NULL
            ORDER BY id ASC
            LIMIT $1 OFFSET $2
            "#,
    )
    .bind(i64::from(filter.limit()))
    .bind(filter.offset() as i64)
    .fetch_all(&mut *tx)
    .await?;

    Ok(rows.into_iter().map(Into::into).collect())
  }

  async fn count(&self, tx: &mut PgConnection) -> Result<i64, ClinicError> {
    let total = sqlx::query_scalar::<_, i64>(
      "SELECT count(*) FROM patients WHERE deleted_at IS NULL",
    )
    .fetch_one(&mut *tx)
    .await?;

    Ok(total)
  }

  async fn find_by_id(&self, tx: &mut PgConnection, id: i64) -> Result<Option<Patient>, ClinicError> {
    let row = sqlx::query_as::<_, PatientRow>(
      r#"
            SELECT id, full_name, dob, gender, address, phone, created_by,
                   created_at, updated_at, deleted_at
            FROM patients
            WHERE id = $1 AND deleted_at IS NULL
            "#,
    )
    .bind(id)
    .fetch_optional(&mut *tx)
    .await?;

    Ok(row.map(Into::into))
  }

  async fn update(
    &self,
    tx: &mut PgConnection,
    id: i64,
    changes: &PatientChanges,
  ) -> Result<(), ClinicError> {
    let result = sqlx::query(
      r#"
            UPDATE patients
            SET
                full_name = COALESCE($2, full_name),
                dob = COALESCE($3, dob),
                gender = COALESCE($4, gender),
                address = COALESCE($5, address),
                phone = COALESCE($6, phone),
                updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            "#,
    )
    .bind(id)
    .bind(changes.full_name.as_deref())
    .bind(changes.dob)
    .bind(changes.gender.as_deref())
    .bind(changes.address.as_deref())
    .bind(changes.phone.as_deref())
    .execute(&mut *tx)
    .await?;

    expect_one_row(result.rows_affected())
  }

  async fn soft_delete(&self, tx: &mut PgConnection, id: i64) -> Result<(), ClinicError> {
    let result = sqlx::query(
      r#"
            UPDATE patients
            SET
                deleted_at = NOW(),
                updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            "#,
    )
    .bind(id)
    .execute(&mut *tx)
    .await?;

    expect_one_row(result.rows_affected())
  }

  async fn restore(&self, tx: &mut PgConnection, id: i64) -> Result<(), ClinicError> {
    let result = sqlx::query(
      r#"
            UPDATE patients
            SET
                deleted_at = NULL,
                updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NOT NULL
            "#,
    )
    .bind(id)
    .execute(&mut *tx)
    .await?;

    expect_one_row(result.rows_affected())
  }
}
