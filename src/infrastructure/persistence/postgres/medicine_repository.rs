use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgConnection;

use crate::domain::ClinicError;
use crate::domain::medicine::{Medicine, MedicineRepository, NewMedicine};

/// PostgreSQL implementation of the MedicineRepository trait
#[derive(Debug, Default, Clone, Copy)]
pub struct PostgresMedicineRepository;

impl PostgresMedicineRepository {
  pub fn new() -> Self {
    Self
  }
}

#[derive(Debug, sqlx::FromRow)]
struct MedicineRow {
  id: i64,
  name: String,
  stock: i32,
  price: Decimal,
  created_at: DateTime<Utc>,
  updated_at: DateTime<Utc>,
}

impl From<MedicineRow> for Medicine {
  fn from(row: MedicineRow) -> Self {
    Medicine {
      id: row.id,
      name: row.name,
      stock: row.stock,
      price: row.price,
      created_at: row.created_at,
      updated_at: row.updated_at,
    }
  }
}

#[async_trait]
impl MedicineRepository<PgConnection> for PostgresMedicineRepository {
  async fn create(
    &self,
    tx: &mut PgConnection,
    medicine: NewMedicine,
  ) -> Result<Medicine, ClinicError> {
    let row = sqlx::query_as::<_, MedicineRow>(
      r#"
            INSERT INTO medicines (name, stock, price)
            VALUES ($1, $2, $3)
            RETURNING id, name, stock, price, created_at, updated_at
            "#,
    )
    .bind(&medicine.name)
    .bind(medicine.stock)
    .bind(medicine.price)
    .fetch_one(&mut *tx)
    .await?;

    Ok(row.into())
  }
}
