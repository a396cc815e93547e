use async_trait::async_trait;

use super::entities::{Medicine, NewMedicine};
use crate::domain::errors::ClinicError;

/// Repository trait for medicine inventory
#[async_trait]
pub trait MedicineRepository<Tx: Send>: Send + Sync {
  async fn create(&self, tx: &mut Tx, medicine: NewMedicine) -> Result<Medicine, ClinicError>;
}
