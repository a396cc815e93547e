use std::sync::Arc;

use crate::domain::patient::PatientRepository;
use crate::domain::{ClinicError, Transactor};

/// Soft-deletes a patient; the row stays and can be restored.
pub struct DeletePatientUseCase<T: Transactor> {
  transactor: Arc<T>,
  patients: Arc<dyn PatientRepository<T::Tx>>,
}

impl<T: Transactor> DeletePatientUseCase<T> {
  pub fn new(transactor: Arc<T>, patients: Arc<dyn PatientRepository<T::Tx>>) -> Self {
    Self {
      transactor,
      patients,
    }
  }

  pub async fn execute(&self, patient_id: i64) -> Result<(), ClinicError> {
    let patients = Arc::clone(&self.patients);

    self
      .transactor
      .within_transaction_unit(move |tx| {
        Box::pin(async move { patients.soft_delete(tx, patient_id).await })
      })
      .await?;

    tracing::info!(patient_id, "patient deleted");
    Ok(())
  }
}
