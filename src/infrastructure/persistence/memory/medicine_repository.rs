use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;

use super::transactor::MemoryState;
use crate::domain::ClinicError;
use crate::domain::medicine::{Medicine, MedicineRepository, NewMedicine, price_in_range};

#[derive(Debug, Default, Clone, Copy)]
pub struct MemoryMedicineRepository;

impl MemoryMedicineRepository {
  pub fn new() -> Self {
    Self
  }
}

#[async_trait]
impl MedicineRepository<MemoryState> for MemoryMedicineRepository {
  async fn create(
    &self,
    tx: &mut MemoryState,
    medicine: NewMedicine,
  ) -> Result<Medicine, ClinicError> {
    // Same guards as the CHECK constraints on the medicines table
    if medicine.stock < 0 || medicine.price < Decimal::ZERO {
      tracing::error!(name = %medicine.name, "medicine violates stock/price checks");
      return Err(ClinicError::database());
    }

    // NUMERIC(14,2) always reports two fractional digits
    let mut price = medicine.price.round_dp(2);
    price.rescale(2);
    if !price_in_range(&price) {
      tracing::error!(name = %medicine.name, "medicine price overflows NUMERIC(14,2)");
      return Err(ClinicError::database());
    }

    let now = Utc::now();
    let created = Medicine {
      id: tx.next_id(),
      name: medicine.name,
      stock: medicine.stock,
      price,
      created_at: now,
      updated_at: now,
    };
    tx.medicines.insert(created.id, created.clone());
    Ok(created)
  }
}
