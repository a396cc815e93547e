use std::sync::Arc;

use rust_decimal::Decimal;

use crate::domain::medicine::{Medicine, MedicineRepository, NewMedicine};
use crate::domain::{ClinicError, Transactor};

#[derive(Debug, Clone)]
pub struct AddMedicineCommand {
  pub name: String,
  pub stock: i32,
  pub price: Decimal,
}

pub struct AddMedicineUseCase<T: Transactor> {
  transactor: Arc<T>,
  medicines: Arc<dyn MedicineRepository<T::Tx>>,
}

impl<T: Transactor> AddMedicineUseCase<T> {
  pub fn new(transactor: Arc<T>, medicines: Arc<dyn MedicineRepository<T::Tx>>) -> Self {
    Self {
      transactor,
      medicines,
    }
  }

  pub async fn execute(&self, command: AddMedicineCommand) -> Result<Medicine, ClinicError> {
    let medicines = Arc::clone(&self.medicines);
    let new_medicine = NewMedicine {
      name: command.name,
      stock: command.stock,
      price: command.price,
    };

    let medicine = self
      .transactor
      .within_transaction(move |tx| {
        Box::pin(async move { medicines.create(tx, new_medicine).await })
      })
      .await?;

    tracing::info!(medicine_id = medicine.id, "medicine added");
    Ok(medicine)
  }
}
